//! Property tests for the relaxation plan and cascade bounds.

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use syllabus_core::errors::RetrievalError;
use syllabus_core::models::{FilterTuple, RetrievalFilter};
use syllabus_retrieval::cascade::plan;
use syllabus_retrieval::{retrieve_with_fallback, FilterRelaxationTable};

const GRADES: [&str; 6] = [
    "고등학교 3학년",
    "고등학교 2학년",
    "고등학교 1학년",
    "중학교 3학년",
    "중학교 1학년",
    "초등학교 6학년",
];

fn label() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[가-힣]{1,4}".prop_map(Some),
    ]
}

fn grade() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        prop::sample::select(GRADES.to_vec()).prop_map(|g| Some(g.to_string())),
        "[가-힣]{1,3} [1-6]학년".prop_map(Some),
    ]
}

fn table() -> impl Strategy<Value = FilterRelaxationTable> {
    prop::collection::btree_map(
        prop::sample::select(GRADES.to_vec()).prop_map(str::to_string),
        prop::collection::vec(
            prop::sample::select(GRADES.to_vec()).prop_map(str::to_string),
            0..5,
        ),
        0..6,
    )
    .prop_map(|raw: BTreeMap<String, Vec<String>>| FilterRelaxationTable::new(raw))
}

fn filter(g: Option<String>, s: Option<String>, t: Option<String>) -> RetrievalFilter {
    RetrievalFilter {
        query: "질의".to_string(),
        grade: g,
        subject: s,
        sub_topic: t,
    }
}

proptest! {
    #[test]
    fn plan_never_repeats_a_tuple(
        g in grade(), s in label(), t in label(), table in table()
    ) {
        let steps = plan(&FilterTuple::new(g.as_deref(), s.as_deref(), t.as_deref()), &table);
        let unique: HashSet<&FilterTuple> = steps.iter().map(|s| &s.tuple).collect();
        prop_assert_eq!(unique.len(), steps.len());
    }

    #[test]
    fn plan_starts_with_primary_and_ends_unfiltered(
        g in grade(), s in label(), t in label(), table in table()
    ) {
        let primary = FilterTuple::new(g.as_deref(), s.as_deref(), t.as_deref());
        let steps = plan(&primary, &table);
        prop_assert_eq!(&steps[0].tuple, &primary);
        prop_assert!(steps.last().map(|s| s.tuple.is_unfiltered()).unwrap_or(false));
    }

    #[test]
    fn exhausted_cascade_stays_within_bound(
        g in grade(), s in label(), t in label(), table in table()
    ) {
        let filter = filter(g, s, t);
        let mut seen = Vec::new();
        let result = retrieve_with_fallback(
            &filter,
            &table,
            |_, tuple, _| {
                seen.push(tuple.clone());
                Ok(Vec::new())
            },
            5,
        );
        let bound = table.relaxation_depth(filter.grade.as_deref()) + 2;
        prop_assert!(seen.len() <= bound, "{} calls > bound {}", seen.len(), bound);
        prop_assert_eq!(result, Err(RetrievalError::NoMatchingContent { attempts: seen.len() }));
        let unique: HashSet<&FilterTuple> = seen.iter().collect();
        prop_assert_eq!(unique.len(), seen.len());
    }

    #[test]
    fn first_error_stops_the_cascade(
        g in grade(), s in label(), t in label(), fail_at in 0usize..6
    ) {
        let filter = filter(g, s, t);
        let mut calls = 0usize;
        let result = retrieve_with_fallback(
            &filter,
            &FilterRelaxationTable::default(),
            |_, _, _| {
                calls += 1;
                if calls > fail_at {
                    Err(RetrievalError::StorageUnavailable { reason: "down".to_string() })
                } else {
                    Ok(Vec::new())
                }
            },
            5,
        );
        if let Err(RetrievalError::StorageUnavailable { .. }) = result {
            prop_assert_eq!(calls, fail_at + 1);
        } else {
            let exhausted = matches!(result, Err(RetrievalError::NoMatchingContent { .. }));
            prop_assert!(exhausted);
            prop_assert!(calls <= fail_at);
        }
    }
}
