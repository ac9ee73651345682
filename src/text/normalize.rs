// ---------------------------------------------------------------------------
// Title normalization
// ---------------------------------------------------------------------------

/// Common English words excluded from frequency analysis.
/// Kept sorted so membership checks can binary-search.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has",
    "in", "into", "is", "it", "its", "of", "on", "or", "that", "the", "this",
    "to", "using", "was", "with",
];

fn is_stopword(token: &str) -> bool {
    STOPWORDS.binary_search(&token).is_ok()
}

/// Normalize raw text for frequency analysis: lowercase, replace every
/// non-alphanumeric character with a space, drop stopwords, and collapse
/// whitespace to single spaces. Deterministic.
pub fn preprocess(raw: &str) -> String {
    let lowered: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut out = String::with_capacity(lowered.len());
    for token in lowered.split_whitespace() {
        if is_stopword(token) {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopword_list_is_sorted() {
        // Binary search depends on it.
        let mut sorted = STOPWORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(STOPWORDS, sorted.as_slice());
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(preprocess("Hello, World!"), "hello world");
    }

    #[test]
    fn removes_stopwords_and_collapses_whitespace() {
        assert_eq!(
            preprocess("The  Streaming   Pipeline for Taxi Data"),
            "streaming pipeline taxi data"
        );
    }

    #[test]
    fn all_stopwords_yield_empty_string() {
        assert_eq!(preprocess("the and of"), "");
        assert_eq!(preprocess("!!!"), "");
        assert_eq!(preprocess(""), "");
    }

    #[test]
    fn is_deterministic() {
        let raw = "End-to-End MLOps: Model Serving & Monitoring";
        assert_eq!(preprocess(raw), preprocess(raw));
        assert_eq!(preprocess(raw), "end end mlops model serving monitoring");
    }
}
