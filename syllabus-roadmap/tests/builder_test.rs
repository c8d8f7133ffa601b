use syllabus_core::config::RoadmapConfig;
use syllabus_core::models::Passage;
use syllabus_roadmap::{ResourceKind, RoadmapBuilder};
use test_fixtures::{load_passages, passage};

fn builder() -> RoadmapBuilder {
    RoadmapBuilder::new(RoadmapConfig::default())
}

#[test]
fn relaxed_passages_form_two_topics_under_one_subject() {
    let passages = vec![
        passage("a.pdf", Some("고등학교 2학년"), Some("수학"), Some("함수"), "함수의 뜻"),
        passage("b.pdf", Some("고등학교 2학년"), Some("수학"), Some("방정식"), "방정식의 풀이"),
        passage("c.pdf", Some("고등학교 2학년"), Some("수학"), Some("함수"), "합성함수"),
    ];

    let roadmap = builder().build("고등학교 3학년", "수학", &passages).unwrap();

    let root = roadmap.root().unwrap();
    assert_eq!(root.title, "고등학교 3학년");
    assert_eq!(root.objective, "고등학교 3학년 수준의 학습 흐름을 정리합니다.");
    let subjects = roadmap.get_children(&root.id).unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].title, "수학");
    assert_eq!(subjects[0].objective, "수학 교과 핵심 영역을 재구성합니다.");

    let topics = roadmap.get_children(&subjects[0].id).unwrap();
    let titles: Vec<&str> = topics.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["함수", "방정식"]);
    assert_eq!(topics[0].resources.len(), 2);
    assert_eq!(topics[1].resources.len(), 1);
    assert_eq!(
        topics[0].objective,
        "함수 핵심 개념을 이해하고 대표 문제를 해결합니다."
    );
    assert_eq!(roadmap.len(), 4);
    roadmap.check_integrity().unwrap();
}

#[test]
fn topic_fields_come_from_the_group() {
    let passages = load_passages("high_school_math");

    let roadmap = builder().build("고등학교 2학년", "수학", &passages).unwrap();

    let subject = roadmap.get_children(roadmap.root_id().unwrap()).unwrap().remove(0);
    let topics = roadmap.get_children(&subject.id).unwrap();
    let derivative = topics.iter().find(|t| t.title == "미분").unwrap();
    let codes: Vec<&str> = derivative.achievement_codes.iter().map(String::as_str).collect();
    assert_eq!(codes, vec!["12수학Ⅱ02-01", "12수학Ⅱ02-02"]);
    assert_eq!(derivative.difficulty.as_deref(), Some("상"));
    assert!(derivative
        .summary
        .as_deref()
        .unwrap()
        .starts_with("함수 y=f(x)에서"));

    let resource = &derivative.resources[0];
    assert_eq!(resource.kind, ResourceKind::Passage);
    assert_eq!(resource.label, "수학II_미분계수.pdf");
    assert_eq!(resource.source_id, "수학II_미분계수.pdf");
    assert_eq!(resource.metadata["sub_topic"], "미분");
    assert_eq!(resource.metadata["difficulty"], "상");
    assert_eq!(
        resource.metadata["achievement_codes"],
        serde_json::json!(["12수학Ⅱ02-01"])
    );
}

#[test]
fn long_summary_is_truncated_to_budget() {
    let text = "가나다라마 ".repeat(60);
    let passages = vec![passage("long.pdf", None, None, Some("긴 글"), &text)];

    let roadmap = builder().build("중학교 1학년", "국어", &passages).unwrap();

    let topic = roadmap
        .depth_first(None)
        .unwrap()
        .find(|n| n.title == "긴 글")
        .unwrap()
        .clone();
    let summary = topic.summary.unwrap();
    assert_eq!(summary.chars().count(), 160);
    assert!(summary.ends_with("..."));
}

#[test]
fn resources_are_capped_but_passages_are_not_dropped() {
    let passages: Vec<Passage> = (0..7)
        .map(|i| {
            let mut p = passage(&format!("{i}.pdf"), None, None, Some("통계"), "자료");
            p.achievement_codes = vec![format!("CODE-{i}")];
            p
        })
        .collect();

    let roadmap = builder().build("", "", &passages).unwrap();

    let topic = roadmap
        .depth_first(None)
        .unwrap()
        .find(|n| n.title == "통계")
        .unwrap()
        .clone();
    assert_eq!(topic.resources.len(), 5);
    let labels: Vec<&str> = topic.resources.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["0.pdf", "1.pdf", "2.pdf", "3.pdf", "4.pdf"]);
    assert_eq!(topic.achievement_codes.len(), 7);
}

#[test]
fn blank_labels_use_configured_defaults() {
    let mut anonymous = passage("", None, None, None, "본문");
    anonymous.difficulty = Some("  ".to_string());

    let roadmap = builder().build(" ", "", &[anonymous]).unwrap();

    let titles: Vec<String> = roadmap
        .depth_first(None)
        .unwrap()
        .map(|n| n.title.clone())
        .collect();
    assert_eq!(titles, vec!["학습 로드맵", "교과", "기초 개념 다지기"]);
    let topic = roadmap.depth_first(None).unwrap().last().unwrap().clone();
    assert_eq!(topic.difficulty, None);
    assert_eq!(topic.resources[0].label, "자료");
    assert_eq!(topic.resources[0].source_id, topic.id);
}

#[test]
fn custom_config_changes_cap_and_budget() {
    let config = RoadmapConfig {
        summary_char_budget: 10,
        max_resources_per_topic: 1,
        ..RoadmapConfig::default()
    };
    let passages = vec![
        passage("a.pdf", None, None, Some("t"), "abcdefghijklmnop"),
        passage("b.pdf", None, None, Some("t"), "x"),
    ];

    let roadmap = RoadmapBuilder::new(config).build("g", "s", &passages).unwrap();

    let topic = roadmap.depth_first(None).unwrap().last().unwrap().clone();
    assert_eq!(topic.summary.as_deref(), Some("abcdefg..."));
    assert_eq!(topic.resources.len(), 1);
}
