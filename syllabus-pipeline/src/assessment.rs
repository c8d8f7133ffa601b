//! Question-set generation grounded in retrieved passages.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use syllabus_core::config::SyllabusConfig;
use syllabus_core::errors::{SyllabusError, SyllabusResult};
use syllabus_core::models::RetrievalFilter;
use syllabus_core::traits::{IGenerator, IPassageRetriever};
use syllabus_observability::{events, generation_span, validation_span, QueryLog};
use syllabus_retrieval::{build_query, CascadeOutcome, RetrievalCascade};
use syllabus_validation::{question_set_from_value, ContentValidator, QuestionSet};

use crate::prompt::{render_assessment_prompt, ASSESSMENT_SYSTEM_PROMPT};
use crate::retrieval::run_cascade;

fn default_num_questions() -> usize {
    3
}

fn default_num_choices() -> usize {
    4
}

fn default_retrieval_limit() -> usize {
    5
}

/// What the learner asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub query: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, alias = "sub_subject")]
    pub sub_topic: Option<String>,
    #[serde(default = "default_num_questions")]
    pub num_questions: usize,
    #[serde(default = "default_num_choices")]
    pub num_choices: usize,
    #[serde(default = "default_retrieval_limit")]
    pub retrieval_limit: usize,
}

impl AssessmentRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            grade: None,
            subject: None,
            sub_topic: None,
            num_questions: default_num_questions(),
            num_choices: default_num_choices(),
            retrieval_limit: default_retrieval_limit(),
        }
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_sub_topic(mut self, sub_topic: impl Into<String>) -> Self {
        self.sub_topic = Some(sub_topic.into());
        self
    }

    pub fn with_choices(mut self, num_choices: usize) -> Self {
        self.num_choices = num_choices;
        self
    }

    /// Range checks: 1–10 questions, 3–5 choices, 1–10 retrieved passages.
    pub fn check(&self) -> SyllabusResult<()> {
        check_range("num_questions", self.num_questions, 1, 10)?;
        check_range("num_choices", self.num_choices, 3, 5)?;
        check_range("retrieval_limit", self.retrieval_limit, 1, 10)?;
        if self.query.trim().is_empty() {
            return Err(SyllabusError::InvalidRequest {
                field: "query".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        Ok(())
    }

    fn filter(&self) -> RetrievalFilter {
        let mut filter = RetrievalFilter {
            query: self.query.clone(),
            grade: self.grade.clone(),
            subject: self.subject.clone(),
            sub_topic: self.sub_topic.clone(),
        };
        filter.query = build_query(&filter);
        filter
    }
}

fn check_range(field: &str, value: usize, min: usize, max: usize) -> SyllabusResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SyllabusError::InvalidRequest {
            field: field.to_string(),
            message: format!("must be between {min} and {max}, got {value}"),
        })
    }
}

/// A validated question set plus the retrieval that grounded it.
#[derive(Debug, Clone)]
pub struct GeneratedAssessment {
    pub question_set: QuestionSet,
    pub retrieval: CascadeOutcome,
}

/// Retrieve → prompt → generate → parse → validate.
///
/// Any failure discards the generator's response; nothing partially valid
/// is returned.
pub struct AssessmentService<'a> {
    retriever: &'a dyn IPassageRetriever,
    generator: &'a dyn IGenerator,
    cascade: RetrievalCascade,
    validator: ContentValidator,
    min_passage_chars: usize,
    summary_budget: usize,
    query_log: Option<&'a Mutex<QueryLog>>,
}

impl<'a> AssessmentService<'a> {
    pub fn new(
        retriever: &'a dyn IPassageRetriever,
        generator: &'a dyn IGenerator,
        config: &SyllabusConfig,
    ) -> Self {
        Self {
            retriever,
            generator,
            cascade: RetrievalCascade::from_config(&config.retrieval),
            validator: ContentValidator::new(config.validation.clone()),
            min_passage_chars: config.validation.min_passage_chars,
            summary_budget: config.roadmap.summary_char_budget,
            query_log: None,
        }
    }

    /// Record every retrieval in `log`.
    pub fn with_query_log(mut self, log: &'a Mutex<QueryLog>) -> Self {
        self.query_log = Some(log);
        self
    }

    pub fn generate(&self, request: &AssessmentRequest) -> SyllabusResult<GeneratedAssessment> {
        request.check()?;

        let filter = request.filter();
        let cascade = self.cascade.with_limit(request.retrieval_limit);
        let retrieval = run_cascade(&cascade, &filter, self.retriever, self.query_log)?;

        let user_prompt =
            render_assessment_prompt(request, &retrieval.passages, self.summary_budget);
        let raw = {
            let span = generation_span!("assessment");
            let _guard = span.enter();
            self.generator
                .complete_json(ASSESSMENT_SYSTEM_PROMPT, &user_prompt)?
        };

        let question_set = question_set_from_value(raw).map_err(|e| {
            events::content_rejected(&e.to_string(), None);
            e
        })?;

        {
            let span = validation_span!(question_set.questions.len(), request.num_choices);
            let _guard = span.enter();
            self.validator
                .validate(&question_set, request.num_choices, self.min_passage_chars)
                .map_err(|e| {
                    events::content_rejected(&e.to_string(), e.question_index());
                    e
                })?;
        }

        Ok(GeneratedAssessment {
            question_set,
            retrieval,
        })
    }
}
