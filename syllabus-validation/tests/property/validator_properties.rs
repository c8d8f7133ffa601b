//! Property tests for label and answer checks.

use proptest::prelude::*;

use syllabus_core::errors::ValidationError;
use syllabus_validation::{AnswerOption, ContentValidator, Question, QuestionSet, QuestionSetMetadata};

const PASSAGE: &str = "식물은 빛에너지를 이용하여 이산화 탄소와 물로 포도당과 산소를 만든다. \
                       이 과정을 광합성이라고 하며 주로 잎의 엽록체에서 일어난다. \
                       광합성량은 빛의 세기와 이산화 탄소 농도, 온도의 영향을 받는다.";

fn question(labels: &[String], answer: &str) -> Question {
    Question {
        question: "다음 중 옳은 것은?".to_string(),
        options: labels
            .iter()
            .map(|label| AnswerOption {
                label: label.clone(),
                text: format!("{label}번 보기"),
            })
            .collect(),
        answer: answer.to_string(),
        explanation: "지문의 둘째 문장에 근거한다.".to_string(),
    }
}

fn set(questions: Vec<Question>) -> QuestionSet {
    QuestionSet {
        passage: PASSAGE.to_string(),
        questions,
        metadata: QuestionSetMetadata::default(),
    }
}

/// A shuffled `1..=n` label list for `n` in 3..=5.
fn shuffled_labels() -> impl Strategy<Value = Vec<String>> {
    (3usize..=5).prop_flat_map(|n| {
        Just((1..=n).map(|l| l.to_string()).collect::<Vec<_>>()).prop_shuffle()
    })
}

proptest! {
    #[test]
    fn any_label_order_with_an_in_set_answer_passes(
        labels in shuffled_labels(),
        answer_at in any::<prop::sample::Index>(),
        count in 1usize..4,
    ) {
        let answer = labels[answer_at.index(labels.len())].clone();
        let questions = (0..count).map(|_| question(&labels, &answer)).collect();
        let result = ContentValidator::default().validate(&set(questions), labels.len(), 80);
        prop_assert_eq!(result, Ok(()));
    }

    #[test]
    fn duplicated_label_names_the_offending_question(
        labels in shuffled_labels(),
        from in any::<prop::sample::Index>(),
        to in any::<prop::sample::Index>(),
        valid_before in 0usize..3,
    ) {
        let n = labels.len();
        let (from, to) = (from.index(n), to.index(n));
        prop_assume!(from != to);

        let mut broken = labels.clone();
        broken[to] = labels[from].clone();
        let mut questions: Vec<Question> =
            (0..valid_before).map(|_| question(&labels, "1")).collect();
        questions.push(question(&broken, &labels[from]));

        let err = ContentValidator::default()
            .validate(&set(questions), n, 80)
            .unwrap_err();

        prop_assert_eq!(err.question_index(), Some(valid_before + 1));
        prop_assert_eq!(
            err,
            ValidationError::DuplicateLabel {
                question: valid_before + 1,
                label: labels[from].clone(),
            }
        );
    }
}
