use std::sync::Mutex;

use syllabus_core::config::SyllabusConfig;
use syllabus_core::errors::{GenerationError, RetrievalError, SyllabusError, ValidationError};
use syllabus_core::models::FilterTuple;
use syllabus_observability::QueryLog;
use syllabus_pipeline::{AssessmentRequest, AssessmentService};
use test_fixtures::{load_fixture_value, load_passages, ScriptedGenerator, ScriptedRetriever};

fn request() -> AssessmentRequest {
    AssessmentRequest::new("함수의 극한")
        .with_grade("고등학교 2학년")
        .with_subject("수학")
        .with_sub_topic("함수의 극한")
}

fn stocked_retriever() -> ScriptedRetriever {
    let rows: Vec<_> = load_passages("high_school_math")
        .into_iter()
        .filter(|p| p.sub_topic.as_deref() == Some("함수의 극한"))
        .collect();
    ScriptedRetriever::new().with_rows(
        FilterTuple::new(Some("고등학교 2학년"), Some("수학"), Some("함수의 극한")),
        rows,
    )
}

#[test]
fn valid_generation_is_returned_with_its_retrieval() {
    let retriever = stocked_retriever();
    let generator = ScriptedGenerator::new()
        .respond_with(load_fixture_value("golden/generation/valid_question_set.json"));
    let config = SyllabusConfig::default();
    let service = AssessmentService::new(&retriever, &generator, &config);

    let generated = service.generate(&request()).unwrap();

    assert_eq!(generated.question_set.questions.len(), 2);
    assert!(!generated.retrieval.relaxed());
    assert_eq!(generated.retrieval.passages.len(), 2);
    assert_eq!(retriever.calls()[0].limit, 5);

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].user_prompt.contains("함수의 극한"));
}

#[test]
fn wrong_option_count_rejects_the_whole_set() {
    let retriever = stocked_retriever();
    let generator = ScriptedGenerator::new()
        .respond_with(load_fixture_value("golden/generation/five_options_for_four.json"));
    let config = SyllabusConfig::default();
    let service = AssessmentService::new(&retriever, &generator, &config);

    let err = service.generate(&request()).unwrap_err();

    match err {
        SyllabusError::Validation(ValidationError::OptionCountMismatch {
            question,
            expected,
            actual,
        }) => {
            assert_eq!((question, expected, actual), (2, 4, 5));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_output_is_reported_as_generation_error() {
    let retriever = stocked_retriever();
    let generator = ScriptedGenerator::new().respond_with(serde_json::json!(["not", "a", "set"]));
    let config = SyllabusConfig::default();
    let service = AssessmentService::new(&retriever, &generator, &config);

    let err = service.generate(&request()).unwrap_err();

    assert!(matches!(
        err,
        SyllabusError::Generation(GenerationError::MalformedGenerationOutput { .. })
    ));
}

#[test]
fn exhausted_retrieval_never_reaches_the_generator() {
    let retriever = ScriptedRetriever::new();
    let generator = ScriptedGenerator::new()
        .respond_with(load_fixture_value("golden/generation/valid_question_set.json"));
    let config = SyllabusConfig::default();
    let service = AssessmentService::new(&retriever, &generator, &config);

    let err = service.generate(&request()).unwrap_err();

    match err {
        SyllabusError::Retrieval(RetrievalError::NoMatchingContent { attempts }) => {
            assert_eq!(attempts, retriever.call_count());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(generator.calls().is_empty());
}

#[test]
fn out_of_range_request_is_rejected_before_retrieval() {
    let retriever = stocked_retriever();
    let generator = ScriptedGenerator::new();
    let config = SyllabusConfig::default();
    let service = AssessmentService::new(&retriever, &generator, &config);

    let err = service.generate(&request().with_choices(6)).unwrap_err();

    match err {
        SyllabusError::InvalidRequest { field, .. } => assert_eq!(field, "num_choices"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(retriever.call_count(), 0);

    let blank = AssessmentRequest::new("   ");
    assert!(matches!(
        service.generate(&blank),
        Err(SyllabusError::InvalidRequest { .. })
    ));
}

#[test]
fn request_defaults_apply_when_deserialized() {
    let request: AssessmentRequest = serde_json::from_value(serde_json::json!({
        "query": "광합성",
        "sub_subject": "식물과 에너지"
    }))
    .unwrap();

    assert_eq!(request.num_questions, 3);
    assert_eq!(request.num_choices, 4);
    assert_eq!(request.retrieval_limit, 5);
    assert_eq!(request.sub_topic.as_deref(), Some("식물과 에너지"));
}

#[test]
fn retrievals_are_recorded_in_the_query_log() {
    let retriever = stocked_retriever();
    let generator = ScriptedGenerator::new()
        .respond_with(load_fixture_value("golden/generation/valid_question_set.json"));
    let config = SyllabusConfig::default();
    let log = Mutex::new(QueryLog::new());
    let service = AssessmentService::new(&retriever, &generator, &config).with_query_log(&log);

    service.generate(&request()).unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.count(), 1);
    let entry = &log.entries()[0];
    assert!(entry.matched());
    assert_eq!(entry.attempts, 1);
    assert_eq!(entry.result_count, 2);
}

#[test]
fn transport_failure_is_not_logged() {
    let retriever = ScriptedRetriever::failing(RetrievalError::StorageUnavailable {
        reason: "connection refused".to_string(),
    });
    let generator = ScriptedGenerator::new();
    let config = SyllabusConfig::default();
    let log = Mutex::new(QueryLog::new());
    let service = AssessmentService::new(&retriever, &generator, &config).with_query_log(&log);

    assert!(service.generate(&request()).is_err());
    assert_eq!(log.lock().unwrap().count(), 0);
}
