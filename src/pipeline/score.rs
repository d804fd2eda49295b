/// Three-tier confidence label from the support count. The 4 and 7 boundaries
/// are load-bearing: 3 is Low, 4 and 6 are Medium, 7 is High.
pub fn confidence(n_support: usize) -> &'static str {
    if n_support >= 7 {
        "Высокая (на основе рецензируемых публикаций)"
    } else if n_support >= 4 {
        "Средняя (есть несколько подтверждений)"
    } else {
        "Низкая (ограниченное число публикаций)"
    }
}

/// Consensus verdict: more than one record counts as cross-source agreement.
pub fn consensus(n_support: usize) -> &'static str {
    if n_support > 1 {
        "Да (данные согласуются)"
    } else {
        "Нет (только одна публикация)"
    }
}
