//! Property tests for roadmap construction and graph invariants.

use std::collections::HashSet;

use proptest::prelude::*;

use syllabus_core::errors::RoadmapError;
use syllabus_core::models::Passage;
use syllabus_roadmap::{Roadmap, RoadmapBuilder, RoadmapNode};

fn passage_strategy() -> impl Strategy<Value = Passage> {
    (
        prop::option::of(prop::sample::select(vec!["함수", "방정식", "도형", "확률", " "])),
        "[가-힣 ]{0,40}",
        prop::collection::vec("[A-Z]{2}[0-9]{2}", 0..3),
        prop::option::of(prop::sample::select(vec!["상", "중", "하"])),
    )
        .prop_map(|(sub_topic, text, codes, difficulty)| Passage {
            source_name: format!("{}.pdf", text.chars().take(3).collect::<String>()),
            grade: Some("중학교 3학년".to_string()),
            subject: Some("수학".to_string()),
            sub_topic: sub_topic.map(str::to_string),
            text,
            achievement_codes: codes,
            difficulty: difficulty.map(str::to_string),
            distance: 0.0,
        })
}

fn random_forest(n: usize, links: &[(usize, usize)]) -> Roadmap {
    let mut roadmap = Roadmap::new();
    for i in 0..n {
        roadmap
            .add_node(RoadmapNode::new(format!("n{i}"), format!("Node {i}"), "목표"), false)
            .unwrap();
    }
    for &(parent, child) in links {
        match roadmap.link(&format!("n{parent}"), &format!("n{child}")) {
            Ok(()) | Err(RoadmapError::CycleDetected { .. }) => {}
            Err(other) => panic!("unexpected link error: {other}"),
        }
    }
    roadmap
}

proptest! {
    #[test]
    fn built_roadmap_links_agree_both_ways(
        passages in prop::collection::vec(passage_strategy(), 1..25)
    ) {
        let roadmap = RoadmapBuilder::default().build("중학교 3학년", "수학", &passages).unwrap();
        prop_assert!(roadmap.check_integrity().is_ok());
        let root_id = roadmap.root_id().unwrap().to_string();
        for node in roadmap.nodes() {
            if node.id == root_id {
                prop_assert!(node.parent_id.is_none());
                continue;
            }
            let parent_id = node.parent_id.as_deref().unwrap();
            let parent = roadmap.get_node(parent_id).unwrap();
            prop_assert_eq!(
                parent.child_ids.iter().filter(|c| **c == node.id).count(),
                1
            );
        }
    }

    #[test]
    fn tree_walk_visits_every_node_once(
        passages in prop::collection::vec(passage_strategy(), 1..25)
    ) {
        let roadmap = RoadmapBuilder::default().build("중학교 3학년", "수학", &passages).unwrap();
        let tree = roadmap.as_tree(None).unwrap().unwrap();
        let ids = tree.ids();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        prop_assert_eq!(ids.len(), roadmap.len());
        prop_assert_eq!(unique.len(), roadmap.len());
    }

    #[test]
    fn every_passage_lands_in_exactly_one_group(
        passages in prop::collection::vec(passage_strategy(), 1..25)
    ) {
        let roadmap = RoadmapBuilder::default().build("중학교 3학년", "수학", &passages).unwrap();
        let labels: HashSet<String> = passages
            .iter()
            .map(|p| p.sub_topic_label().unwrap_or("기초 개념 다지기").trim().to_string())
            .collect();
        // root + subject + one topic per distinct label
        prop_assert_eq!(roadmap.len(), 2 + labels.len());
        let attached: usize = roadmap.nodes().map(|n| n.resources.len()).sum();
        prop_assert!(attached <= passages.len());
    }

    #[test]
    fn random_links_never_break_integrity(
        links in prop::collection::vec((0usize..12, 0usize..12), 0..40)
    ) {
        let roadmap = random_forest(12, &links);
        prop_assert!(roadmap.check_integrity().is_ok());
        for node in roadmap.nodes() {
            let ancestors = roadmap.get_ancestors(&node.id).unwrap();
            prop_assert!(ancestors.iter().all(|a| a.id != node.id));
        }
    }

    #[test]
    fn depth_first_matches_tree_preorder(
        links in prop::collection::vec((0usize..8, 0usize..8), 0..20)
    ) {
        let roadmap = random_forest(8, &links);
        let walked: Vec<String> = roadmap.depth_first(None).unwrap().map(|n| n.id.clone()).collect();
        let tree = roadmap.as_tree(None).unwrap().unwrap();
        let preorder: Vec<String> = tree.ids().into_iter().map(str::to_string).collect();
        prop_assert_eq!(walked, preorder);
    }
}
