//! Spelling suggestions using Levenshtein distance
//!
//! Used to power "did you mean?" hints when a document refers to an undefined
//!     command, counter, document class or package.
//!
//! The distance between two words is the minimal number of single character
//!     additions, removals and substitutions that transform one word into the other.
//! It is computed with the standard dynamic programming recurrence,
//!     keeping only the previous row of the matrix:
//!
//! ```text
//! X[i][j] = X[i-1][j-1]                                    if a[i] == b[j]
//!         = 1 + min(X[i-1][j], X[i][j-1], X[i-1][j-1])     otherwise
//! ```

/// A dictionary word together with its distance from the search word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion<'a> {
    pub word: &'a str,
    pub distance: usize,
}

/// Returns every word in the dictionary ordered by distance from the search word.
///
/// Words at the same distance keep their dictionary order.
pub fn find_close_words<'a, I>(dictionary: I, word: &str) -> Vec<Suggestion<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let word: Vec<char> = word.chars().collect();
    let mut suggestions: Vec<Suggestion<'a>> = dictionary
        .into_iter()
        .map(|candidate| Suggestion {
            word: candidate,
            distance: distance(&word, candidate),
        })
        .collect();
    suggestions.sort_by_key(|s| s.distance);
    suggestions
}

/// Returns the closest dictionary words that are plausible misspellings of the search word.
///
/// A word is plausible if its distance is at most a third of the longer word's length,
///     rounded up.
/// Only the plausible words at the smallest distance are returned, at most `limit` of them.
pub fn suggest<'a, I>(dictionary: I, word: &str, limit: usize) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let length = word.chars().count();
    let plausible: Vec<Suggestion<'a>> = find_close_words(dictionary, word)
        .into_iter()
        .filter(|s| {
            let longest = std::cmp::max(length, s.word.chars().count());
            s.distance > 0 && s.distance * 3 <= longest + 2
        })
        .collect();
    let Some(closest) = plausible.first().map(|s| s.distance) else {
        return vec![];
    };
    plausible
        .into_iter()
        .take_while(|s| s.distance == closest)
        .take(limit)
        .map(|s| s.word)
        .collect()
}

fn distance(a: &[char], b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, a_i) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_j) in b.iter().enumerate() {
            current[j + 1] = if a_i == b_j {
                previous[j]
            } else {
                1 + previous[j].min(previous[j + 1]).min(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! distance_tests {
        ($( ($name: ident, $a: expr, $b: expr, $want: expr),)+) => {
            $(
            #[test]
            fn $name() {
                let a: Vec<char> = $a.chars().collect();
                let b: Vec<char> = $b.chars().collect();
                assert_eq!(distance(&a, $b), $want);
                assert_eq!(distance(&b, $a), $want);
            }
            )+
        };
    }

    distance_tests![
        (empty, "", "", 0),
        (one_removal, "a", "", 1),
        (same, "a", "a", 0),
        (substitution, "a", "b", 1),
        (addition, "abb", "acbb", 1),
        (prefix_removal, "aabb", "abb", 1),
        (names, "james", "laura", 4),
        (shift, "ab12345e", "a12345de", 2),
        (command, "setcounter", "stepcounter", 2),
    ];

    #[test]
    fn find_close_words_orders_by_distance() {
        let dictionary = ["section", "subsection", "chapter"];
        let result = find_close_words(dictionary, "sectoin");
        assert_eq!(result[0].word, "section");
        assert_eq!(result[1].word, "subsection");
        assert_eq!(result[2].word, "chapter");
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn suggest_filters_unrelated_words() {
        let dictionary = ["textbf", "textit", "footnote", "label"];
        assert_eq!(suggest(dictionary, "textbd", 3), vec!["textbf"]);
        assert_eq!(suggest(dictionary, "xyz", 3), Vec::<&str>::new());
    }

    #[test]
    fn suggest_skips_exact_match() {
        let dictionary = ["article", "articl"];
        assert_eq!(suggest(dictionary, "article", 3), vec!["articl"]);
    }
}
