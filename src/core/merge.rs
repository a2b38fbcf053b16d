//! # Paragraph Join Rule
//!
//! A continuation usually resumes mid-sentence, so its first paragraph is
//! stitched onto the last paragraph already on screen instead of starting a
//! new one:
//!
//! ```text
//! existing: ["Hello world"]
//! new:      ["! Nice to meet you.", "Second part."]
//! merged:   ["Hello world! Nice to meet you.", "Second part."]
//! ```
//!
//! The seam is joined directly when the continuation opens with punctuation,
//! otherwise with a single space.

/// Leading characters that attach to the previous paragraph without a space.
pub const CONTINUATION_PUNCTUATION: [char; 7] = ['.', ',', '!', '?', '—', '-', '/'];

/// Separator placed between the last existing paragraph and `first_new`.
pub fn join_separator(first_new: &str) -> &'static str {
    match first_new.chars().next() {
        Some(c) if CONTINUATION_PUNCTUATION.contains(&c) => "",
        _ => " ",
    }
}

/// Merges `new` onto the end of `existing` using the paragraph join rule.
///
/// If either side is empty the result is plain concatenation. Otherwise the
/// result has `existing.len() + new.len() - 1` paragraphs.
pub fn merge_paragraphs(mut existing: Vec<String>, new: Vec<String>) -> Vec<String> {
    if existing.is_empty() || new.is_empty() {
        existing.extend(new);
        return existing;
    }

    let mut new = new.into_iter();
    if let (Some(last), Some(first)) = (existing.last_mut(), new.next()) {
        last.push_str(join_separator(&first));
        last.push_str(&first);
    }
    existing.extend(new);
    existing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn punctuation_continuation_joins_directly() {
        let merged = merge_paragraphs(
            strings(&["Hello world"]),
            strings(&["! Nice to meet you.", "Second part."]),
        );
        assert_eq!(merged, strings(&["Hello world! Nice to meet you.", "Second part."]));
    }

    #[test]
    fn word_continuation_joins_with_space() {
        let merged = merge_paragraphs(strings(&["Done."]), strings(&["Next thought here."]));
        assert_eq!(merged, strings(&["Done. Next thought here."]));
    }

    #[test]
    fn empty_existing_is_plain_concatenation() {
        let merged = merge_paragraphs(vec![], strings(&["a", "b"]));
        assert_eq!(merged, strings(&["a", "b"]));
    }

    #[test]
    fn empty_new_leaves_existing_untouched() {
        let merged = merge_paragraphs(strings(&["a", "b"]), vec![]);
        assert_eq!(merged, strings(&["a", "b"]));
    }

    #[test]
    fn both_empty_is_empty() {
        assert!(merge_paragraphs(vec![], vec![]).is_empty());
    }

    #[test]
    fn only_the_seam_is_joined() {
        let merged = merge_paragraphs(
            strings(&["p1", "p2", "p3"]),
            strings(&["n1", "n2", "n3"]),
        );
        assert_eq!(merged, strings(&["p1", "p2", "p3 n1", "n2", "n3"]));
    }

    #[test]
    fn merged_length_accounts_for_the_seam() {
        let cases: [(&[&str], &[&str]); 5] = [
            (&["a"], &["b"]),
            (&["a", "b"], &["c"]),
            (&["a"], &["b", "c", "d"]),
            (&[], &["b", "c"]),
            (&["a", "b"], &[]),
        ];
        for (p, n) in cases {
            let merged = merge_paragraphs(strings(p), strings(n));
            let expected = if p.is_empty() || n.is_empty() {
                p.len() + n.len()
            } else {
                p.len() + n.len() - 1
            };
            assert_eq!(merged.len(), expected, "P={p:?} N={n:?}");
        }
    }

    #[test]
    fn every_continuation_mark_joins_without_space() {
        for mark in CONTINUATION_PUNCTUATION {
            let first = format!("{mark}rest");
            assert_eq!(join_separator(&first), "", "mark {mark:?}");
        }
    }

    #[test]
    fn other_leading_characters_get_a_space() {
        for first in ["word", "\"quoted\"", ";semi", ":colon", "(paren", " space", "–en dash"] {
            assert_eq!(join_separator(first), " ", "first {first:?}");
        }
    }

    #[test]
    fn em_dash_is_matched_as_a_whole_character() {
        let merged = merge_paragraphs(strings(&["She paused"]), strings(&["— then spoke."]));
        assert_eq!(merged, strings(&["She paused— then spoke."]));
    }

    #[test]
    fn empty_first_new_paragraph_gets_a_space() {
        assert_eq!(join_separator(""), " ");
    }
}
