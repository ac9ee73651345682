use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Token frequency table
// ---------------------------------------------------------------------------

/// Token counts ordered by descending count, ties broken by first-seen
/// order in the source corpus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    /// All (token, count) entries in rank order.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// The `n` highest-ranked entries.
    pub fn top(&self, n: usize) -> &[(String, usize)] {
        &self.entries[..self.entries.len().min(n)]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Count whitespace-separated tokens across the corpus.
///
/// Every count is ≥ 1; empty strings contribute nothing.
pub fn word_frequency<I, S>(corpus: I) -> FrequencyTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new(); // token → (count, first_seen)
    let mut next_rank = 0usize;

    for text in corpus {
        for token in text.as_ref().split_whitespace() {
            let entry = counts.entry(token.to_string()).or_insert_with(|| {
                let rank = next_rank;
                next_rank += 1;
                (0, rank)
            });
            entry.0 += 1;
        }
    }

    let mut entries: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(token, (count, first_seen))| (token, count, first_seen))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    FrequencyTable {
        entries: entries.into_iter().map(|(t, c, _)| (t, c)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_across_the_corpus() {
        let freq = word_frequency(["a b", "a c", "a"]);
        assert_eq!(
            freq.entries(),
            &[("a".into(), 3), ("b".into(), 1), ("c".into(), 1)]
        );
    }

    #[test]
    fn ties_break_by_first_seen_order() {
        let freq = word_frequency(["zebra apple", "apple zebra mango"]);
        assert_eq!(
            freq.entries(),
            &[("zebra".into(), 2), ("apple".into(), 2), ("mango".into(), 1)]
        );
    }

    #[test]
    fn empty_corpus_yields_empty_table() {
        assert!(word_frequency(Vec::<String>::new()).is_empty());
        assert!(word_frequency(["", "   ", ""]).is_empty());
    }

    #[test]
    fn top_clamps_to_available_entries() {
        let freq = word_frequency(["a b"]);
        assert_eq!(freq.top(10).len(), 2);
        assert_eq!(freq.top(1), &[("a".into(), 1)]);
    }
}
