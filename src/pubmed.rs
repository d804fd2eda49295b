use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::pipeline::types::ArticleRecord;
use crate::pipeline::ArticleSource;

const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

#[derive(Debug, Deserialize)]
struct EsearchEnvelope {
    #[serde(default)]
    esearchresult: EsearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

/// PubMed E-utilities client: esearch for the id list, efetch for the record
/// XML, regex extraction of the fields the pipeline needs.
pub struct PubMedClient {
    client: reqwest::Client,
    title_re: Regex,
    abstract_re: Regex,
    doi_re: Regex,
}

impl PubMedClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            title_re: Regex::new(r"(?s)<ArticleTitle>(.*?)</ArticleTitle>")
                .context("title pattern")?,
            abstract_re: Regex::new(r"(?s)<AbstractText[^>]*>(.*?)</AbstractText>")
                .context("abstract pattern")?,
            doi_re: Regex::new(r#"<ELocationID EIdType="doi" ValidYN="Y">(.*?)</ELocationID>"#)
                .context("doi pattern")?,
        })
    }

    pub fn article_link(pmid: &str) -> String {
        format!("https://pubmed.ncbi.nlm.nih.gov/{}/", pmid)
    }

    /// Bind titles/abstracts/DOIs to ids by list position.
    ///
    /// Known limitation, kept from the source behavior: each field list is
    /// scanned independently over the whole response, so a record missing one
    /// sub-field (commonly the abstract or DOI) shifts that field for every
    /// later record in the batch. Fields past the end of a list come back as
    /// empty strings.
    fn parse_efetch(&self, ids: &[String], xml: &str) -> Vec<ArticleRecord> {
        let titles: Vec<&str> = self
            .title_re
            .captures_iter(xml)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();
        let abstracts: Vec<&str> = self
            .abstract_re
            .captures_iter(xml)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();
        let dois: Vec<&str> = self
            .doi_re
            .captures_iter(xml)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();

        ids.iter()
            .enumerate()
            .map(|(i, pmid)| ArticleRecord {
                pmid: pmid.clone(),
                title: titles.get(i).copied().unwrap_or("").trim().to_string(),
                abstract_text: abstracts.get(i).copied().unwrap_or("").trim().to_string(),
                link: Self::article_link(pmid),
                doi: dois.get(i).copied().unwrap_or("").trim().to_string(),
            })
            .collect()
    }
}

#[async_trait]
impl ArticleSource for PubMedClient {
    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<ArticleRecord>> {
        let start = std::time::Instant::now();
        debug!(query, max_results, "PubMed esearch");

        let envelope: EsearchEnvelope = self
            .client
            .get(ESEARCH_URL)
            .query(&[("db", "pubmed"), ("term", query), ("retmode", "json")])
            .query(&[("retmax", max_results)])
            .send()
            .await
            .context("esearch request failed")?
            .error_for_status()
            .context("esearch HTTP error")?
            .json()
            .await
            .context("Decoding esearch JSON")?;

        let ids = envelope.esearchresult.idlist;
        if ids.is_empty() {
            warn!("esearch returned no ids");
            return Ok(Vec::new());
        }

        let id_param = ids.join(",");
        let xml = self
            .client
            .get(EFETCH_URL)
            .query(&[
                ("db", "pubmed"),
                ("id", id_param.as_str()),
                ("retmode", "xml"),
            ])
            .send()
            .await
            .context("efetch request failed")?
            .error_for_status()
            .context("efetch HTTP error")?
            .text()
            .await
            .context("Reading efetch body")?;

        let articles = self.parse_efetch(&ids, &xml);
        info!(
            articles = articles.len(),
            duration_s = start.elapsed().as_secs_f32(),
            "PubMed fetch completed"
        );
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PubMedClient {
        PubMedClient::new().unwrap()
    }

    fn article_xml(title: &str, abstract_text: Option<&str>, doi: Option<&str>) -> String {
        let mut xml = format!("<PubmedArticle><ArticleTitle>{}</ArticleTitle>", title);
        if let Some(a) = abstract_text {
            xml.push_str(&format!("<AbstractText Label=\"BACKGROUND\">{}</AbstractText>", a));
        }
        if let Some(d) = doi {
            xml.push_str(&format!(
                "<ELocationID EIdType=\"doi\" ValidYN=\"Y\">{}</ELocationID>",
                d
            ));
        }
        xml.push_str("</PubmedArticle>");
        xml
    }

    #[test]
    fn test_parse_complete_records() {
        let ids = vec!["100".to_string(), "200".to_string()];
        let xml = format!(
            "{}{}",
            article_xml("First title", Some("First abstract"), Some("10.1/a")),
            article_xml("Second title", Some("Second abstract"), Some("10.1/b")),
        );
        let records = client().parse_efetch(&ids, &xml);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "First title");
        assert_eq!(records[0].abstract_text, "First abstract");
        assert_eq!(records[0].doi, "10.1/a");
        assert_eq!(records[0].link, "https://pubmed.ncbi.nlm.nih.gov/100/");
        assert_eq!(records[1].doi, "10.1/b");
    }

    #[test]
    fn test_missing_tail_fields_default_to_empty() {
        let ids = vec!["100".to_string(), "200".to_string()];
        // Only the first record carries an abstract and a DOI.
        let xml = format!(
            "{}{}",
            article_xml("First title", Some("Only abstract"), Some("10.1/a")),
            article_xml("Second title", None, None),
        );
        let records = client().parse_efetch(&ids, &xml);

        assert_eq!(records[1].title, "Second title");
        assert_eq!(records[1].abstract_text, "");
        assert_eq!(records[1].doi, "");
    }

    #[test]
    fn test_positional_misalignment_when_middle_record_lacks_abstract() {
        // Accepted limitation: the middle record has no abstract, so the third
        // record's abstract shifts up to position two and the last slot is
        // left empty.
        let ids = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        let xml = format!(
            "{}{}{}",
            article_xml("T1", Some("A1"), None),
            article_xml("T2", None, None),
            article_xml("T3", Some("A3"), None),
        );
        let records = client().parse_efetch(&ids, &xml);

        assert_eq!(records[0].abstract_text, "A1");
        assert_eq!(records[1].abstract_text, "A3");
        assert_eq!(records[2].abstract_text, "");
    }

    #[test]
    fn test_multiline_abstract_captured() {
        let ids = vec!["1".to_string()];
        let xml = article_xml("T1", Some("Line one\nLine two"), None);
        let records = client().parse_efetch(&ids, &xml);
        assert_eq!(records[0].abstract_text, "Line one\nLine two");
    }

    #[test]
    fn test_more_ids_than_records() {
        let ids = vec!["1".to_string(), "2".to_string()];
        let xml = article_xml("Only title", None, None);
        let records = client().parse_efetch(&ids, &xml);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title, "");
        assert_eq!(records[1].link, "https://pubmed.ncbi.nlm.nih.gov/2/");
    }
}
