use super::classify::Taxonomy;
use super::types::{ArticleRecord, DirectionAggregate};

/// Group a batch of records by research direction.
///
/// A Vec keeps directions in first-seen order, which the top-direction
/// tie-break depends on; an unordered map would make it run-dependent.
/// Multi-label records appear in every matching group.
pub fn aggregate(records: &[ArticleRecord], taxonomy: &Taxonomy) -> Vec<DirectionAggregate> {
    let mut groups: Vec<DirectionAggregate> = Vec::new();

    for record in records {
        for label in taxonomy.classify(&record.search_text()) {
            match groups.iter_mut().find(|g| g.direction == label) {
                Some(group) => {
                    group.support_count += 1;
                    group.articles.push(record.clone());
                }
                None => groups.push(DirectionAggregate {
                    direction: label,
                    support_count: 1,
                    articles: vec![record.clone()],
                }),
            }
        }
    }

    groups
}

/// The group with strictly greatest support. On ties the earlier-seen
/// direction keeps priority.
pub fn top_direction(groups: &[DirectionAggregate]) -> Option<&DirectionAggregate> {
    let mut top: Option<&DirectionAggregate> = None;
    for group in groups {
        if top.map_or(true, |t| group.support_count > t.support_count) {
            top = Some(group);
        }
    }
    top
}
