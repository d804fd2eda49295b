use super::types::{ArticleRecord, Citation};

/// Up to `limit` corroborating citations, in input order, never the excluded
/// record.
pub fn select_support(records: &[ArticleRecord], exclude_pmid: &str, limit: usize) -> Vec<Citation> {
    records
        .iter()
        .filter(|a| a.pmid != exclude_pmid)
        .take(limit)
        .map(|a| Citation {
            title: a.title.clone(),
            link: a.link.clone(),
        })
        .collect()
}
