//! Learning feedback from assessment results.
//!
//! The generator is asked first. When it fails or answers with something
//! that is not a feedback document, a deterministic rule-based summary is
//! returned instead and the degradation is logged.

use serde::{Deserialize, Serialize};

use syllabus_core::errors::GenerationError;
use syllabus_core::traits::IGenerator;
use syllabus_observability::{events, generation_span};

use crate::prompt::{percent, render_feedback_prompt, FEEDBACK_SYSTEM_PROMPT};

const OTHER_TOPIC: &str = "기타";
const MAX_ITEMS: usize = 5;
const EXCELLENT_ACCURACY: f64 = 0.8;
const GOOD_ACCURACY: f64 = 0.6;
const STRENGTH_ACCURACY: f64 = 0.7;
const WEAKNESS_ACCURACY: f64 = 0.5;

/// One answered problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub correct: bool,
    #[serde(default)]
    pub time_spent: f64,
    #[serde(default)]
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumContext {
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub recent_topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicStats {
    pub topic: String,
    pub correct: usize,
    pub total: usize,
    pub avg_time_secs: f64,
}

impl TopicStats {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Overall and per-topic accuracy. Topics keep first-appearance order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackStats {
    pub accuracy: f64,
    pub total_questions: usize,
    pub correct_count: usize,
    pub topics: Vec<TopicStats>,
}

impl FeedbackStats {
    pub fn from_results(results: &[AssessmentResult]) -> Self {
        let mut topics: Vec<(TopicStats, f64)> = Vec::new();
        for result in results {
            let name = result
                .topic
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(OTHER_TOPIC);
            let slot = match topics.iter().position(|(t, _)| t.topic == name) {
                Some(slot) => slot,
                None => {
                    topics.push((
                        TopicStats {
                            topic: name.to_string(),
                            correct: 0,
                            total: 0,
                            avg_time_secs: 0.0,
                        },
                        0.0,
                    ));
                    topics.len() - 1
                }
            };
            let (stats, time_total) = &mut topics[slot];
            stats.total += 1;
            if result.correct {
                stats.correct += 1;
            }
            *time_total += result.time_spent;
        }

        let topics: Vec<TopicStats> = topics
            .into_iter()
            .map(|(mut stats, time_total)| {
                stats.avg_time_secs = time_total / stats.total as f64;
                stats
            })
            .collect();
        let correct_count = results.iter().filter(|r| r.correct).count();
        let total_questions = results.len();
        Self {
            accuracy: if total_questions == 0 {
                0.0
            } else {
                correct_count as f64 / total_questions as f64
            },
            total_questions,
            correct_count,
            topics,
        }
    }
}

/// The feedback document returned to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub feedback_summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSource {
    Generated,
    RuleBased,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackOutcome {
    pub feedback: Feedback,
    pub source: FeedbackSource,
    pub stats: FeedbackStats,
}

pub struct FeedbackService<'a> {
    generator: &'a dyn IGenerator,
}

impl<'a> FeedbackService<'a> {
    pub fn new(generator: &'a dyn IGenerator) -> Self {
        Self { generator }
    }

    /// Never fails: generator trouble degrades to [`rule_based_feedback`].
    pub fn generate(
        &self,
        results: &[AssessmentResult],
        context: Option<&CurriculumContext>,
    ) -> FeedbackOutcome {
        let stats = FeedbackStats::from_results(results);
        match self.ask_generator(&stats, context) {
            Ok(feedback) => {
                tracing::info!(
                    accuracy = stats.accuracy,
                    strengths = feedback.strengths.len(),
                    weaknesses = feedback.weaknesses.len(),
                    "feedback generated"
                );
                FeedbackOutcome {
                    feedback,
                    source: FeedbackSource::Generated,
                    stats,
                }
            }
            Err(err) => {
                events::feedback_degraded(&err.to_string(), "rule_based");
                FeedbackOutcome {
                    feedback: rule_based_feedback(&stats),
                    source: FeedbackSource::RuleBased,
                    stats,
                }
            }
        }
    }

    fn ask_generator(
        &self,
        stats: &FeedbackStats,
        context: Option<&CurriculumContext>,
    ) -> Result<Feedback, GenerationError> {
        let span = generation_span!("feedback");
        let _guard = span.enter();
        let prompt = render_feedback_prompt(stats, context);
        let raw = self.generator.complete_json(FEEDBACK_SYSTEM_PROMPT, &prompt)?;
        serde_json::from_value(raw).map_err(|e| GenerationError::MalformedGenerationOutput {
            reason: e.to_string(),
        })
    }
}

/// Deterministic feedback from accuracy bands and per-topic thresholds.
pub fn rule_based_feedback(stats: &FeedbackStats) -> Feedback {
    let accuracy = percent(stats.accuracy);
    let feedback_summary = if stats.accuracy >= EXCELLENT_ACCURACY {
        format!("우수한 성취도를 보였습니다 (정답률 {accuracy}). 계속 학습을 이어가세요.")
    } else if stats.accuracy >= GOOD_ACCURACY {
        format!(
            "양호한 성취도를 보였습니다 (정답률 {accuracy}). 조금 더 노력하면 더 좋은 결과를 얻을 수 있습니다."
        )
    } else {
        format!("추가 학습이 필요합니다 (정답률 {accuracy}). 기초를 다시 다지는 것을 추천합니다.")
    };

    let strengths = or_defaults(
        stats
            .topics
            .iter()
            .filter(|t| t.accuracy() >= STRENGTH_ACCURACY)
            .map(|t| format!("{} 영역에서 좋은 성과를 보였습니다", t.topic))
            .collect(),
        &["문제를 끝까지 풀어보려는 노력을 보였습니다"],
    );
    let struggling: Vec<&TopicStats> = stats
        .topics
        .iter()
        .filter(|t| t.accuracy() < WEAKNESS_ACCURACY)
        .collect();
    let weaknesses = or_defaults(
        struggling
            .iter()
            .map(|t| {
                format!(
                    "{} 영역에서 어려움을 겪었습니다 ({}/{} 정답)",
                    t.topic, t.correct, t.total
                )
            })
            .collect(),
        &["시간 관리를 조금 더 신경 쓸 필요가 있습니다"],
    );
    let recommendations = or_defaults(
        struggling
            .iter()
            .map(|t| format!("{} 기초 개념을 복습하고 연습 문제를 풀어보세요", t.topic))
            .collect(),
        &[
            "틀린 문제를 다시 풀어보며 왜 틀렸는지 분석해보세요",
            "매일 꾸준히 학습하는 습관을 들이세요",
            "어려운 부분은 선생님이나 친구에게 질문하세요",
        ],
    );

    Feedback {
        feedback_summary,
        strengths,
        weaknesses,
        recommendations,
    }
}

fn or_defaults(mut items: Vec<String>, defaults: &[&str]) -> Vec<String> {
    if items.is_empty() {
        items = defaults.iter().map(|d| d.to_string()).collect();
    }
    items.truncate(MAX_ITEMS);
    items
}
