/// Word overlap between a query and a title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Similarity {
    /// Every query word was found.
    pub equal: bool,
    /// Matching (query word, title word) pairs.
    pub matches: usize,
    /// Number of words in the query.
    pub max_matches: usize,
}

impl Similarity {
    /// Accepted by estimate matching: every word matched, or at least half of them did.
    pub fn is_close(&self) -> bool {
        self.equal || self.matches * 2 >= self.max_matches
    }
}

/// Counts case-insensitive occurrences of the words of `a` in `b`.
pub fn compare_strings(a: &str, b: &str) -> Similarity {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let a_parts = a.split(' ').collect::<Vec<_>>();
    let b_parts = b.split(' ').collect::<Vec<_>>();

    let matches = a_parts
        .iter()
        .map(|x| b_parts.iter().filter(|y| x == *y).count())
        .sum::<usize>();

    Similarity {
        equal: a_parts.len() == matches,
        matches,
        max_matches: a_parts.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_titles() {
        let x = compare_strings("Enola Holmes", "enola holmes");
        assert!(x.equal);
        assert_eq!((x.matches, x.max_matches), (2, 2));
    }

    #[test]
    fn partial_overlap() {
        let x = compare_strings("enola holmes", "Enola Holmes 2");
        assert!(x.equal);

        let x = compare_strings("rick and morty", "Rick");
        assert!(!x.equal);
        assert_eq!(x.matches, 1);
        assert!(!x.is_close());

        let x = compare_strings("the last of us", "The Last Kingdom");
        assert_eq!(x.matches, 2);
        assert!(x.is_close());
    }

    #[test]
    fn repeated_words_count_every_pair() {
        let x = compare_strings("la la", "La La Land");
        assert_eq!(x.matches, 4);
    }
}
