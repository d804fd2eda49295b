use super::types::ArticleRecord;
use super::GenParams;

const EXPERT_ROLE: &str = "Ты биомедицинский эксперт.";
const ANALYST_ROLE: &str = "Ты биомедицинский аналитик.";

/// Question/answer extraction from a single abstract.
pub const QA_PARAMS: GenParams = GenParams {
    system: EXPERT_ROLE,
    max_tokens: 220,
    temperature: 0.2,
};

/// Short comma-separated keyword list.
pub const KEYWORDS_PARAMS: GenParams = GenParams {
    system: ANALYST_ROLE,
    max_tokens: 40,
    temperature: 0.3,
};

/// Non-technical paraphrase of the top direction's representative article.
pub const SUMMARY_PARAMS: GenParams = GenParams {
    system: EXPERT_ROLE,
    max_tokens: 200,
    temperature: 0.3,
};

pub fn question_answer_prompt(article: &ArticleRecord) -> String {
    format!(
        "Ты эксперт по биомедицине и старению человека. Прочитай аннотацию: \"{}\". \
         1. Сформулируй один конкретный исследовательский вопрос, который решали авторы статьи (строго по сути аннотации!). \
         2. Дай короткий научный ответ на вопрос 1, который нашли авторы, строго по тексту статьи.\n\
         Ответь в формате:\nВопрос: ...\nОтвет: ...\n\
         Если статья не по старению человека — напиши: \"Статья не подходит для задачи приоритезации\".",
        article.abstract_text
    )
}

pub fn keywords_prompt(article: &ArticleRecord) -> String {
    format!(
        "Выдели 5–7 ключевых слов или фраз по статье и её аннотации на русском языке, перечисли их через запятую. Без лишних комментариев.\n\
         Название: {}\nАннотация: {}",
        article.title, article.abstract_text
    )
}

pub fn direction_summary_prompt(
    direction: &str,
    article: &ArticleRecord,
    support_count: usize,
) -> String {
    format!(
        "Ты эксперт по биомедицине и старению человека. Направление исследований: \"{}\" \
         (подтверждено {} публикациями за сегодня). Прочитай название и аннотацию главной статьи \
         и напиши короткое научно-популярное описание её результата на русском языке, \
         не пересказывая аннотацию дословно.\n\
         Название: {}\nАннотация: {}",
        direction, support_count, article.title, article.abstract_text
    )
}

/// The two labeled fields parsed from a Q/A generation response.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Parse the fixed "Вопрос: ...\nОтвет: ..." template. Absent labels —
/// including the off-topic sentinel reply — degrade to empty strings, never
/// an error.
pub fn parse_question_answer(text: &str) -> QuestionAnswer {
    QuestionAnswer {
        question: extract_labeled(text, "Вопрос:"),
        answer: extract_labeled(text, "Ответ:"),
    }
}

/// Value after `label` up to end of line, trimmed; empty when absent.
fn extract_labeled(text: &str, label: &str) -> String {
    let Some(idx) = text.find(label) else {
        return String::new();
    };
    let after = &text[idx + label.len()..];
    let end = after.find('\n').unwrap_or(after.len());
    after[..end].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_fields() {
        let qa = parse_question_answer(
            "Вопрос: Влияет ли длина теломер на продолжительность жизни?\n\
             Ответ: Да, укорочение теломер коррелирует со смертностью.",
        );
        assert_eq!(
            qa.question,
            "Влияет ли длина теломер на продолжительность жизни?"
        );
        assert_eq!(
            qa.answer,
            "Да, укорочение теломер коррелирует со смертностью."
        );
    }

    #[test]
    fn test_parse_with_preamble() {
        let qa = parse_question_answer("Вот результат.\nВопрос: Q\nОтвет: A\n");
        assert_eq!(qa.question, "Q");
        assert_eq!(qa.answer, "A");
    }

    #[test]
    fn test_missing_labels_default_to_empty() {
        let qa = parse_question_answer("Статья не подходит для задачи приоритезации");
        assert_eq!(qa, QuestionAnswer::default());
    }

    #[test]
    fn test_missing_answer_only() {
        let qa = parse_question_answer("Вопрос: Q");
        assert_eq!(qa.question, "Q");
        assert_eq!(qa.answer, "");
    }
}
