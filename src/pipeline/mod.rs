pub mod aggregate;
pub mod classify;
pub mod filter;
pub mod prompts;
pub mod render;
pub mod score;
pub mod support;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use tracing::{debug, info};

use aggregate::{aggregate, top_direction};
use classify::Taxonomy;
use filter::is_human_study;
use prompts::{
    direction_summary_prompt, keywords_prompt, parse_question_answer, question_answer_prompt,
    KEYWORDS_PARAMS, QA_PARAMS, SUMMARY_PARAMS,
};
use render::render_answer;
use score::{confidence, consensus};
use support::select_support;
use types::{Answer, ArticleRecord, Heading};

/// Publication repository: a search expression in, ordered records out.
/// May return fewer than `max_results`, or nothing at all.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<ArticleRecord>>;
}

/// Text-completion service behind the summary, keyword, and Q/A requests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenParams) -> Result<String>;
}

/// Generation controls for one text-generation request.
#[derive(Debug, Clone)]
pub struct GenParams {
    pub system: &'static str,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Which of the two pipeline variants a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Group the batch by research direction, answer with the top group.
    Directions,
    /// Answer with the first record that passes the human-study filter.
    FirstRelevant,
}

impl Strategy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "directions" => Some(Self::Directions),
            "first-relevant" | "first_relevant" => Some(Self::FirstRelevant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Directions => "directions",
            Self::FirstRelevant => "first-relevant",
        }
    }
}

/// Everything one pipeline run depends on besides its collaborators.
/// Runtime-tunable through the admin config command.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub query: String,
    pub max_results: usize,
    pub support_limit: usize,
    pub strategy: Strategy,
    pub taxonomy: Taxonomy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            query: "aging AND (lifespan OR longevity OR senescence OR anti-aging) AND (human OR homo sapiens)"
                .to_string(),
            max_results: 15,
            support_limit: 3,
            strategy: Strategy::Directions,
            taxonomy: Taxonomy::default(),
        }
    }
}

/// The retrieval → classify → aggregate → score → assemble pipeline over two
/// narrow collaborator seams. Everything between the seams is pure and
/// deterministic for fixed inputs.
pub struct PipelineEngine {
    source: Arc<dyn ArticleSource>,
    generator: Arc<dyn TextGenerator>,
}

impl PipelineEngine {
    pub fn new(source: Arc<dyn ArticleSource>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { source, generator }
    }

    /// One full pipeline invocation. `Ok(None)` means nothing relevant was
    /// found today; no generator call has been made in that case.
    pub async fn run(&self, cfg: &PipelineConfig) -> Result<Option<String>> {
        let date = Local::now().format("%d.%m.%Y").to_string();
        self.run_dated(cfg, &date).await
    }

    async fn run_dated(&self, cfg: &PipelineConfig, date: &str) -> Result<Option<String>> {
        let records = self.source.fetch(&cfg.query, cfg.max_results).await?;
        info!(
            records = records.len(),
            strategy = cfg.strategy.as_str(),
            "Fetched publication batch"
        );
        if records.is_empty() {
            return Ok(None);
        }

        let answer = match cfg.strategy {
            Strategy::Directions => self.run_directions(cfg, &records, date).await?,
            Strategy::FirstRelevant => self.run_first_relevant(cfg, &records, date).await?,
        };

        Ok(answer.map(|a| render_answer(&a)))
    }

    /// Direction-aggregation variant: every record contributes via the
    /// fallback label, supporting evidence comes from the top group.
    async fn run_directions(
        &self,
        cfg: &PipelineConfig,
        records: &[ArticleRecord],
        date: &str,
    ) -> Result<Option<Answer>> {
        let groups = aggregate(records, &cfg.taxonomy);
        let Some(top) = top_direction(&groups) else {
            return Ok(None);
        };
        debug!(
            direction = top.direction,
            support = top.support_count,
            "Top direction selected"
        );

        let main = &top.articles[0];
        let supporting = select_support(&top.articles, &main.pmid, cfg.support_limit);

        let description = self
            .generator
            .generate(
                &direction_summary_prompt(&top.direction, main, top.support_count),
                &SUMMARY_PARAMS,
            )
            .await?;
        let keywords = self
            .generator
            .generate(&keywords_prompt(main), &KEYWORDS_PARAMS)
            .await?;

        Ok(Some(Answer {
            heading: Heading::Direction(top.direction.clone()),
            date: date.to_string(),
            title: main.title.clone(),
            link: main.link.clone(),
            doi: main.doi.clone(),
            keywords,
            description,
            support_count: top.support_count,
            supporting,
            confidence: confidence(top.support_count).to_string(),
            consensus: consensus(top.support_count).to_string(),
        }))
    }

    /// Single-article variant: the first human-study record answers, the rest
    /// of the batch corroborates.
    async fn run_first_relevant(
        &self,
        cfg: &PipelineConfig,
        records: &[ArticleRecord],
        date: &str,
    ) -> Result<Option<Answer>> {
        let Some(main) = records.iter().find(|a| is_human_study(&a.search_text())) else {
            return Ok(None);
        };
        debug!(pmid = main.pmid, "First relevant article selected");

        let supporting = select_support(records, &main.pmid, cfg.support_limit);
        let n_support = 1 + supporting.len();

        let qa_text = self
            .generator
            .generate(&question_answer_prompt(main), &QA_PARAMS)
            .await?;
        let qa = parse_question_answer(&qa_text);
        let keywords = self
            .generator
            .generate(&keywords_prompt(main), &KEYWORDS_PARAMS)
            .await?;

        Ok(Some(Answer {
            heading: Heading::Question(qa.question),
            date: date.to_string(),
            title: main.title.clone(),
            link: main.link.clone(),
            doi: main.doi.clone(),
            keywords,
            description: qa.answer,
            support_count: n_support,
            supporting,
            confidence: confidence(n_support).to_string(),
            consensus: consensus(n_support).to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        records: Vec<ArticleRecord>,
    }

    #[async_trait]
    impl ArticleSource for FixedSource {
        async fn fetch(&self, _query: &str, _max_results: usize) -> Result<Vec<ArticleRecord>> {
            Ok(self.records.clone())
        }
    }

    /// Deterministic generator stand-in that counts calls.
    struct ScriptedGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str, _params: &GenParams) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if prompt.starts_with("Выдели 5–7") {
                Ok("старение, долголетие, публикации".to_string())
            } else if prompt.contains("Ответь в формате") {
                Ok("Вопрос: Как замедлить старение человека?\nОтвет: Вмешательство снижает маркеры старения.".to_string())
            } else {
                Ok("Краткое описание результата.".to_string())
            }
        }
    }

    fn record(pmid: &str, title: &str, abstract_text: &str) -> ArticleRecord {
        ArticleRecord {
            pmid: pmid.to_string(),
            title: title.to_string(),
            abstract_text: abstract_text.to_string(),
            link: format!("https://pubmed.ncbi.nlm.nih.gov/{}/", pmid),
            doi: String::new(),
        }
    }

    fn engine_with(records: Vec<ArticleRecord>) -> (PipelineEngine, Arc<ScriptedGenerator>) {
        let generator = Arc::new(ScriptedGenerator {
            calls: AtomicUsize::new(0),
        });
        let engine = PipelineEngine::new(
            Arc::new(FixedSource { records }),
            generator.clone(),
        );
        (engine, generator)
    }

    fn senescence_majority_batch() -> Vec<ArticleRecord> {
        vec![
            record("1", "Cellular senescence in human skin", "Senescent cell burden grows with age."),
            record("2", "Senolytic therapy outcomes", "Clearing senescent cells improved markers."),
            record("3", "Senescence-associated secretory phenotype", "SASP drives inflammation."),
            record("4", "Markers of senescence in blood", "Circulating senescence markers rise."),
            record("5", "Telomere length in elderly humans", "Shorter telomeres track with frailty."),
        ]
    }

    #[tokio::test]
    async fn test_directions_scenario_senescence_majority() {
        let (engine, generator) = engine_with(senescence_majority_batch());
        let cfg = PipelineConfig::default();

        let out = engine.run_dated(&cfg, "01.06.2025").await.unwrap().unwrap();

        assert!(out.starts_with("Приоритетное направление 🎯: Сенесценция\n"));
        assert!(out.contains("Вспомогательные источники 📚: 4\n"));
        assert!(out.contains("Уверенность ✅: Средняя (есть несколько подтверждений)\n"));
        assert!(out.contains("Консенсус 🤝: Да (данные согласуются)\n"));
        // Summary + keywords, nothing else.
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_representative_excluded_from_supporting() {
        let (engine, _) = engine_with(senescence_majority_batch());
        let cfg = PipelineConfig::default();

        let out = engine.run_dated(&cfg, "01.06.2025").await.unwrap().unwrap();

        // The representative's link appears once (the Ссылка line), never as a
        // supporting citation.
        let link = "https://pubmed.ncbi.nlm.nih.gov/1/";
        assert_eq!(out.matches(link).count(), 1);
        // Three supporting entries out of the remaining senescence records.
        assert!(out.contains("Senolytic therapy outcomes 🔗 (https://pubmed.ncbi.nlm.nih.gov/2/)\n"));
    }

    #[tokio::test]
    async fn test_empty_fetch_yields_none_without_generator_calls() {
        let (engine, generator) = engine_with(Vec::new());
        let cfg = PipelineConfig::default();

        let out = engine.run_dated(&cfg, "01.06.2025").await.unwrap();

        assert!(out.is_none());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_run_is_byte_identical_for_fixed_inputs() {
        let (engine, _) = engine_with(senescence_majority_batch());
        let cfg = PipelineConfig::default();

        let first = engine.run_dated(&cfg, "01.06.2025").await.unwrap().unwrap();
        let second = engine.run_dated(&cfg, "01.06.2025").await.unwrap().unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_first_relevant_skips_non_human_records() {
        let records = vec![
            record("1", "Lifespan extension in aged mice", "Caloric restriction in mice."),
            record("2", "Longevity in human centenarians", "Human cohort data."),
            record("3", "Telomere dynamics in human cells", "Human fibroblast study."),
        ];
        let (engine, generator) = engine_with(records);
        let cfg = PipelineConfig {
            strategy: Strategy::FirstRelevant,
            ..PipelineConfig::default()
        };

        let out = engine.run_dated(&cfg, "01.06.2025").await.unwrap().unwrap();

        assert!(out.starts_with("Решаемый вопрос:📋 Как замедлить старение человека?\n"));
        assert!(out.contains("Название статьи 📄: Longevity in human centenarians\n"));
        // The mouse record still counts as corroboration: 1 + 2 supporting.
        assert!(out.contains("Вспомогательные источники 📚: 3\n"));
        // Q/A + keywords.
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_first_relevant_none_when_no_human_study() {
        let records = vec![record(
            "1",
            "Aging pathways in drosophila",
            "Fly lifespan genetics.",
        )];
        let (engine, generator) = engine_with(records);
        let cfg = PipelineConfig {
            strategy: Strategy::FirstRelevant,
            ..PipelineConfig::default()
        };

        let out = engine.run_dated(&cfg, "01.06.2025").await.unwrap();

        assert!(out.is_none());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_strategy_parse_round_trip() {
        assert_eq!(Strategy::parse("directions"), Some(Strategy::Directions));
        assert_eq!(
            Strategy::parse("first-relevant"),
            Some(Strategy::FirstRelevant)
        );
        assert_eq!(Strategy::parse("unknown"), None);
        assert_eq!(Strategy::Directions.as_str(), "directions");
    }
}
