use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

use syllabus_core::config::SyllabusConfig;
use syllabus_core::models::FilterTuple;
use syllabus_observability::QueryLog;
use syllabus_pipeline::{CurriculumRequest, CurriculumService};
use test_fixtures::{load_passages, ScriptedRetriever};

/// Counts events whose `event` field equals `name`.
struct EventCounter {
    name: &'static str,
    seen: Arc<AtomicUsize>,
}

struct EventName(Option<String>);

impl Visit for EventName {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "event" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "event" && self.0.is_none() {
            self.0 = Some(format!("{value:?}").trim_matches('"').to_string());
        }
    }
}

impl<S: Subscriber> Layer<S> for EventCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut name = EventName(None);
        event.record(&mut name);
        if name.0.as_deref() == Some(self.name) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn relaxed_retriever() -> ScriptedRetriever {
    ScriptedRetriever::new().with_rows(
        FilterTuple::new(Some("고등학교 2학년"), Some("수학"), None),
        load_passages("high_school_math"),
    )
}

#[test]
fn each_cascade_attempt_is_logged_once() {
    let retriever = relaxed_retriever();
    let config = SyllabusConfig::default();
    let service = CurriculumService::new(&retriever, &config);
    let seen = Arc::new(AtomicUsize::new(0));
    let subscriber = Registry::default().with(EventCounter {
        name: "relaxation_attempted",
        seen: Arc::clone(&seen),
    });

    let result = tracing::subscriber::with_default(subscriber, || {
        service.generate_roadmap(&CurriculumRequest::new("수학", Some("고등학교 3학년")))
    })
    .unwrap();

    assert_eq!(result.retrieval.attempts.len(), 2);
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[test]
fn poisoned_query_log_still_records() {
    let retriever = relaxed_retriever();
    let config = SyllabusConfig::default();
    let log = Mutex::new(QueryLog::new());
    std::thread::scope(|scope| {
        let holder = scope.spawn(|| {
            let _held = log.lock().unwrap();
            panic!("holder failed");
        });
        assert!(holder.join().is_err());
    });
    assert!(log.is_poisoned());

    let service = CurriculumService::new(&retriever, &config).with_query_log(&log);
    service
        .generate_roadmap(&CurriculumRequest::new("수학", Some("고등학교 2학년")))
        .unwrap();

    let log = log.lock().unwrap_or_else(PoisonError::into_inner);
    assert_eq!(log.count(), 1);
}
