/// One taxonomy entry: a direction name and the keywords that put a record
/// under it. Keywords are case-insensitive substrings; the first hit per
/// direction wins, there is no scoring.
#[derive(Debug, Clone)]
pub struct Direction {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Direction {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// The closed set of aging-research directions plus a catch-all label.
///
/// Passed into the pipeline as a value so test instances can run with a
/// different taxonomy.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub directions: Vec<Direction>,
    /// Label for records matching no direction. Guarantees every record
    /// contributes to aggregation.
    pub default_label: String,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            directions: vec![
                Direction::new("Эпигенетика", &["epigenet", "methylation", "histone", "chromatin"]),
                Direction::new("Теломеры", &["telomer"]),
                Direction::new("Сенесценция", &["senescen", "senolytic"]),
                Direction::new(
                    "Метаболизм",
                    &["metabol", "caloric restriction", "mtor", "rapamycin", "metformin", "nad+"],
                ),
                Direction::new(
                    "Клеточная терапия",
                    &["stem cell", "reprogramming", "regenerat"],
                ),
                Direction::new("Микробиом", &["microbiome", "microbiota", "gut bacteria"]),
            ],
            default_label: "Общее старение".to_string(),
        }
    }
}

impl Taxonomy {
    /// Labels for a record's text, in taxonomy order. Never empty: a record
    /// matching nothing gets the default label alone.
    pub fn classify(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();
        let labels: Vec<String> = self
            .directions
            .iter()
            .filter(|d| d.keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|d| d.name.clone())
            .collect();

        if labels.is_empty() {
            vec![self.default_label.clone()]
        } else {
            labels
        }
    }
}
