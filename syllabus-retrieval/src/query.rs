use syllabus_core::models::RetrievalFilter;

/// Text sent to the embedding step: the query followed by whichever filter
/// labels are present. Falls back to the raw query when everything is blank.
pub fn build_query(filter: &RetrievalFilter) -> String {
    let parts = [
        Some(filter.query.as_str()),
        filter.grade.as_deref(),
        filter.subject.as_deref(),
        filter.sub_topic.as_deref(),
    ];
    let joined = parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        filter.query.clone()
    } else {
        joined
    }
}
