//! Key-value and comma separated lists, as in `\documentclass[a4paper,fontsize=12pt]{...}`.
//!
//! Entries are separated by commas at brace depth zero.
//! Surrounding whitespace and one level of enclosing braces are stripped from
//!     keys and values; empty entries are dropped.

fn split(text: &str) -> Vec<&str> {
    let mut entries = vec![];
    let mut depth = 0_usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&text[start..]);
    entries
}

fn strip(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

/// Parses a comma separated list.
pub fn parse_csv(text: &str) -> Vec<String> {
    split(text)
        .into_iter()
        .map(strip)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a key-value list; keys without `=` have no value.
pub fn parse_key_values(text: &str) -> Vec<(String, Option<String>)> {
    split(text)
        .into_iter()
        .filter_map(|entry| {
            let (key, value) = match entry.split_once('=') {
                None => (strip(entry), None),
                Some((key, value)) => (strip(key), Some(strip(value).to_string())),
            };
            if key.is_empty() {
                None
            } else {
                Some((key.to_string(), value))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv() {
        assert_eq!(parse_csv(" a, b ,,{c,d} "), vec!["a", "b", "c,d"]);
        assert!(parse_csv("  ").is_empty());
    }

    #[test]
    fn key_values() {
        assert_eq!(
            parse_key_values("a4paper, fontsize = 12pt, title={a, b=c}"),
            vec![
                ("a4paper".to_string(), None),
                ("fontsize".to_string(), Some("12pt".to_string())),
                ("title".to_string(), Some("a, b=c".to_string())),
            ]
        );
    }

    #[test]
    fn empty_value() {
        assert_eq!(
            parse_key_values("draft=, =x"),
            vec![("draft".to_string(), Some(String::new()))]
        );
    }
}
