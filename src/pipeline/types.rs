use serde::{Deserialize, Serialize};

/// One retrieved PubMed publication.
///
/// Fields the source omits (abstract, DOI) come through as empty strings,
/// never as options — positional correspondence with the id list must hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub pmid: String,
    pub title: String,
    pub abstract_text: String,
    /// Derived deterministically from `pmid`.
    pub link: String,
    pub doi: String,
}

impl ArticleRecord {
    /// Title and abstract joined — the text the filter and the classifier see.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.abstract_text)
    }
}

/// Evidentiary grouping for one research direction.
#[derive(Debug, Clone)]
pub struct DirectionAggregate {
    pub direction: String,
    pub support_count: usize,
    /// Insertion order = the order records were processed. The first entry is
    /// the direction's representative article.
    pub articles: Vec<ArticleRecord>,
}

/// A supporting citation. Only title and link are ever rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub title: String,
    pub link: String,
}

/// What the answer block leads with: the chosen direction (aggregation
/// strategy) or the LLM-extracted research question (single-article strategy).
#[derive(Debug, Clone)]
pub enum Heading {
    Direction(String),
    Question(String),
}

/// The assembled result. Built once per invocation, rendered, discarded.
#[derive(Debug, Clone)]
pub struct Answer {
    pub heading: Heading,
    /// Day.month.year.
    pub date: String,
    pub title: String,
    pub link: String,
    pub doi: String,
    pub keywords: String,
    pub description: String,
    pub support_count: usize,
    /// Never contains the representative article.
    pub supporting: Vec<Citation>,
    pub confidence: String,
    pub consensus: String,
}
