use super::types::{Answer, Heading};

/// Placeholder sentence for an empty supporting list.
const NO_SUPPORTING: &str = "Нет других supporting-статей";

/// Render the fixed answer block. Label text, emoji markers, and line order
/// are the output contract and must not change.
pub fn render_answer(a: &Answer) -> String {
    let heading = match &a.heading {
        Heading::Direction(d) => format!("Приоритетное направление 🎯: {}", d),
        Heading::Question(q) => format!("Решаемый вопрос:📋 {}", q),
    };

    let doi_part = if a.doi.is_empty() {
        String::new()
    } else {
        format!(" (DOI: {})", a.doi)
    };

    let mut supporting_lines = String::new();
    for c in &a.supporting {
        supporting_lines.push_str(&format!("{} 🔗 ({})\n", c.title, c.link));
    }
    if supporting_lines.is_empty() {
        supporting_lines = format!("{}\n", NO_SUPPORTING);
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", heading));
    out.push_str(&format!("Дата 📅: {}\n\n", a.date));
    out.push_str(&format!("Название статьи 📄: {}\n", a.title));
    out.push_str(&format!("Ссылка 🔗: {}{}\n", a.link, doi_part));
    out.push_str(&format!("Ключевые слова 🏷️: {}\n\n", a.keywords));
    out.push_str(&format!("Короткое описание ℹ️:\n{}\n\n", a.description));
    out.push_str("Оценка достоверности статьи 📊:\n");
    out.push_str(&format!(
        "Вспомогательные источники 📚: {}\n",
        a.support_count
    ));
    out.push_str("Примеры:\n");
    out.push_str(&supporting_lines);
    out.push_str(&format!("Уверенность ✅: {}\n", a.confidence));
    out.push_str(&format!("Консенсус 🤝: {}\n", a.consensus));
    out.push_str("Тип источника 🔬: PubMed\n");
    out.push_str("Качество ⭐: Аннотированные рецензируемые издания");
    out
}
