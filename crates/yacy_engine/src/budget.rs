/// Even share of `word_budget` for each of `result_count` blocks.
///
/// Every block gets the same share whether it holds page text or a short failure
/// message. Returns 0 when there are no results.
pub fn per_result_word_cap(word_budget: usize, result_count: usize) -> usize {
    word_budget.checked_div(result_count).unwrap_or(0)
}

/// Keeps the first `cap` whitespace-delimited words of `text`, joined by single spaces.
pub fn truncate_words(text: &str, cap: usize) -> String {
    text.split_whitespace().take(cap).collect::<Vec<_>>().join(" ")
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
