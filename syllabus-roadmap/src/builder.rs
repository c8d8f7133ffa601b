//! Passages → three-level roadmap (grade → subject → topics).

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use syllabus_core::config::RoadmapConfig;
use syllabus_core::constants::NODE_ID_SUFFIX_LEN;
use syllabus_core::errors::{RoadmapError, RoadmapResult};
use syllabus_core::models::Passage;
use syllabus_core::text::{slugify, summarize_text};

use crate::graph::Roadmap;
use crate::node::{RoadmapNode, RoadmapResource};

/// Builds a roadmap from retrieved passages.
///
/// Passages are grouped by sub-topic in first-appearance order; each group
/// becomes one topic node under the single subject node. Grouping never drops
/// a passage, but at most `max_resources_per_topic` of them are attached as
/// resources.
#[derive(Debug, Clone, Default)]
pub struct RoadmapBuilder {
    config: RoadmapConfig,
}

impl RoadmapBuilder {
    pub fn new(config: RoadmapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoadmapConfig {
        &self.config
    }

    pub fn build(
        &self,
        grade: &str,
        subject: &str,
        passages: &[Passage],
    ) -> RoadmapResult<Roadmap> {
        if passages.is_empty() {
            return Err(RoadmapError::NoPassages);
        }
        let mut roadmap = Roadmap::new();

        let grade_title = non_blank_or(grade, &self.config.default_root_title);
        let root_id = unique_id(&roadmap, grade_title);
        roadmap.add_node(
            RoadmapNode::new(
                root_id.clone(),
                grade_title,
                format!("{grade_title} 수준의 학습 흐름을 정리합니다."),
            ),
            true,
        )?;

        let subject_title = non_blank_or(subject, &self.config.default_subject_title);
        let subject_id = unique_id(&roadmap, subject_title);
        roadmap.add_node(
            RoadmapNode::new(
                subject_id.clone(),
                subject_title,
                format!("{subject_title} 교과 핵심 영역을 재구성합니다."),
            ),
            false,
        )?;
        roadmap.link(&root_id, &subject_id)?;

        let groups = group_by_sub_topic(passages, &self.config.default_topic_label);
        let topic_count = groups.len();
        for (label, items) in groups {
            let objective = format!("{label} 핵심 개념을 이해하고 대표 문제를 해결합니다.");
            let topic = self.topic_node(&roadmap, &label, objective, &items);
            let topic_id = topic.id.clone();
            roadmap.add_node(topic, false)?;
            roadmap.link(&subject_id, &topic_id)?;
        }

        info!(
            root = %root_id,
            nodes = roadmap.len(),
            topics = topic_count,
            passages = passages.len(),
            "roadmap built"
        );
        Ok(roadmap)
    }

    /// Attach a remedial `"{area} 보충 학습"` topic under `parent_id`, citing
    /// `passages` the same way regular topics do. Returns the new node's id.
    pub fn add_supplement(
        &self,
        roadmap: &mut Roadmap,
        parent_id: &str,
        area: &str,
        passages: &[Passage],
    ) -> RoadmapResult<String> {
        if !roadmap.contains(parent_id) {
            return Err(RoadmapError::NodeNotFound {
                id: parent_id.to_string(),
            });
        }
        let area = non_blank_or(area, &self.config.default_topic_label);
        let items: Vec<&Passage> = passages.iter().collect();
        let node = self.topic_node(
            roadmap,
            &format!("{area} 보충 학습"),
            format!("{area}에 대한 추가 학습이 필요합니다."),
            &items,
        );
        let id = node.id.clone();
        roadmap.add_node(node, false)?;
        roadmap.link(parent_id, &id)?;
        debug!(parent = parent_id, node = %id, passages = passages.len(), "supplement attached");
        Ok(id)
    }

    fn topic_node(
        &self,
        roadmap: &Roadmap,
        label: &str,
        objective: String,
        items: &[&Passage],
    ) -> RoadmapNode {
        let id = unique_id(roadmap, label);

        let codes: BTreeSet<String> = items
            .iter()
            .flat_map(|p| p.achievement_codes.iter())
            .filter(|code| !code.trim().is_empty())
            .cloned()
            .collect();
        let difficulty = items
            .iter()
            .find_map(|p| p.difficulty_label())
            .map(str::to_string);
        let summary = items
            .first()
            .map(|p| summarize_text(&p.text, self.config.summary_char_budget));

        let cap = self.config.max_resources_per_topic;
        if items.len() > cap {
            debug!(
                topic = label,
                attached = cap,
                unattached = items.len() - cap,
                "resource cap reached; remaining passages not attached"
            );
        }
        let resources = items
            .iter()
            .take(cap)
            .map(|p| self.resource(p, &id))
            .collect();

        let node = RoadmapNode::new(id, label, objective)
            .with_difficulty(difficulty)
            .with_achievement_codes(codes)
            .with_resources(resources);
        match summary {
            Some(summary) => node.with_summary(summary),
            None => node,
        }
    }

    fn resource(&self, passage: &Passage, topic_id: &str) -> RoadmapResource {
        let label = passage
            .source_label()
            .unwrap_or(self.config.default_resource_label.as_str());
        let source_id = passage.source_label().unwrap_or(topic_id);
        RoadmapResource::passage(label, source_id)
            .with_metadata("grade", optional(passage.grade.as_deref()))
            .with_metadata("subject", optional(passage.subject.as_deref()))
            .with_metadata("sub_topic", optional(passage.sub_topic_label()))
            .with_metadata("difficulty", optional(passage.difficulty_label()))
            .with_metadata(
                "achievement_codes",
                Value::from(passage.achievement_codes.clone()),
            )
    }
}

fn non_blank_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed
    }
}

fn optional(value: Option<&str>) -> Value {
    value.map_or(Value::Null, Value::from)
}

/// `slug-xxxxxx` with a random hex suffix, regenerated on collision.
fn unique_id(roadmap: &Roadmap, title: &str) -> String {
    let slug = slugify(title);
    loop {
        let suffix = Uuid::new_v4().simple().to_string();
        let id = format!("{slug}-{}", &suffix[..NODE_ID_SUFFIX_LEN]);
        if !roadmap.contains(&id) {
            return id;
        }
    }
}

/// Group passages by sub-topic label, keeping first-appearance order.
fn group_by_sub_topic<'a>(
    passages: &'a [Passage],
    default_label: &str,
) -> Vec<(String, Vec<&'a Passage>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&Passage>)> = Vec::new();
    for passage in passages {
        let label = passage
            .sub_topic_label()
            .map(str::trim)
            .unwrap_or(default_label)
            .to_string();
        match index.get(&label).copied() {
            Some(slot) => groups[slot].1.push(passage),
            None => {
                index.insert(label.clone(), groups.len());
                groups.push((label, vec![passage]));
            }
        }
    }
    groups
}
