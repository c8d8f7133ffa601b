//! Prompt text for the generator.
//!
//! System prompts are fixed; user prompts carry only request data and
//! retrieved context.

use std::fmt::Write;

use syllabus_core::constants::{UNKNOWN_LABEL, UNSPECIFIED_LABEL};
use syllabus_core::models::Passage;
use syllabus_core::text::summarize_text;

use crate::assessment::AssessmentRequest;
use crate::feedback::{CurriculumContext, FeedbackStats};

pub const ASSESSMENT_SYSTEM_PROMPT: &str = "\
당신은 한국 초·중·고 교육과정에 맞춘 객관식 문제를 만드는 출제 위원입니다.
[참고 자료]에 근거해 80자 이상의 지문 하나와 그 지문에 대한 문항을 작성하세요.
모든 문항은 요청된 보기 수만큼 보기를 가지며, 보기 라벨은 \"1\"부터 순서대로 붙입니다.
정답(answer)은 보기 라벨 중 하나이고, 해설(explanation)은 지문의 근거를 밝힙니다.
다음 JSON 형식으로만 답하세요:
{\"passage\": \"...\", \"questions\": [{\"question\": \"...\", \"options\": [{\"label\": \"1\", \"text\": \"...\"}], \"answer\": \"1\", \"explanation\": \"...\"}], \"metadata\": {\"grade\": \"...\", \"subject\": \"...\", \"sub_subject\": \"...\", \"source_ids\": []}}";

pub const FEEDBACK_SYSTEM_PROMPT: &str = "\
당신은 학생의 평가 결과를 분석해 학습 피드백을 주는 교사입니다.
긍정적이고 격려하는 어조로, 구체적이고 실행 가능한 조언을 JSON으로만 답하세요.";

fn or_label<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
}

/// Numbered context block followed by the request parameters.
pub fn render_assessment_prompt(
    request: &AssessmentRequest,
    passages: &[Passage],
    summary_budget: usize,
) -> String {
    let mut context = String::new();
    for (idx, passage) in passages.iter().take(request.retrieval_limit).enumerate() {
        let achievements = if passage.achievement_codes.is_empty() {
            "미등록".to_string()
        } else {
            passage.achievement_codes.join(", ")
        };
        let _ = writeln!(
            context,
            "{}. 출처: {} (세부: {}, 난이도: {})\n   성취기준: {}\n   요약: {}",
            idx + 1,
            or_label(passage.source_label(), UNKNOWN_LABEL),
            or_label(passage.sub_topic_label(), UNKNOWN_LABEL),
            or_label(passage.difficulty_label(), UNKNOWN_LABEL),
            achievements,
            summarize_text(&passage.text, summary_budget),
        );
    }

    let source_ids: Vec<&str> = passages.iter().map(|p| p.source_name.as_str()).collect();
    let source_ids_json =
        serde_json::to_string(&source_ids).unwrap_or_else(|_| "[]".to_string());

    format!(
        "[참고 자료]\n{context}\n[요청 사항]\n\
         - 문제 수: {}개\n\
         - 보기 수: {}지선다\n\
         - 학년: {}\n\
         - 과목: {}\n\
         - 세부 과목: {}\n\n\
         metadata의 source_ids는 다음과 같이 설정하세요: {source_ids_json}",
        request.num_questions,
        request.num_choices,
        or_label(request.grade.as_deref(), UNSPECIFIED_LABEL),
        or_label(request.subject.as_deref(), UNSPECIFIED_LABEL),
        or_label(request.sub_topic.as_deref(), UNSPECIFIED_LABEL),
    )
}

/// Accuracy figures, per-topic lines, learner context, and the reply schema.
pub fn render_feedback_prompt(stats: &FeedbackStats, context: Option<&CurriculumContext>) -> String {
    let topics = if stats.topics.is_empty() {
        "  - 분석 불가".to_string()
    } else {
        stats
            .topics
            .iter()
            .map(|t| {
                format!(
                    "  - {}: 정답률 {} ({}/{}), 평균 소요 시간 {:.1}초",
                    t.topic,
                    percent(t.accuracy()),
                    t.correct,
                    t.total,
                    t.avg_time_secs
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut learner = String::new();
    if let Some(ctx) = context {
        if let Some(grade) = ctx.grade.as_deref().filter(|g| !g.is_empty()) {
            let _ = writeln!(learner, "- 학년: {grade}");
        }
        if let Some(subject) = ctx.subject.as_deref().filter(|s| !s.is_empty()) {
            let _ = writeln!(learner, "- 과목: {subject}");
        }
        if !ctx.recent_topics.is_empty() {
            let _ = writeln!(learner, "- 최근 학습 주제: {}", ctx.recent_topics.join(", "));
        }
    }
    if learner.is_empty() {
        learner.push_str("- 정보 없음\n");
    }

    format!(
        "평가 결과 분석:\n\
         - 전체 정답률: {}\n\
         - 맞힌 문제: {}/{}\n\n\
         주제별 성취도:\n{topics}\n\n\
         학생 정보:\n{learner}\n\
         위 결과를 바탕으로 다음을 JSON 형식으로 생성하세요:\n\
         {{\"feedback_summary\": \"1-2문장 요약\", \"strengths\": [\"잘한 점\"], \
         \"weaknesses\": [\"개선 필요한 점\"], \"recommendations\": [\"구체적인 학습 조언\"]}}\n\
         각 항목은 최소 3개 이상 작성하세요.",
        percent(stats.accuracy),
        stats.correct_count,
        stats.total_questions,
    )
}

/// `0.756` → `"75.6%"`.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
