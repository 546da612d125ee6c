//! Case-insensitive find and replace over the buffer text
//!
//! Offsets are byte offsets into the searched string and always fall on char
//! boundaries. Case folding is ASCII-only so match lengths equal query lengths.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    pub start: usize,
    pub end: usize,
    /// The search ran off one end of the text and continued from the other
    pub wrapped: bool,
}

fn matches_at(text: &str, query: &str, at: usize) -> bool {
    text.get(at..at + query.len())
        .is_some_and(|candidate| candidate.eq_ignore_ascii_case(query))
}

/// Byte offsets of every non-overlapping match
pub fn find_all(text: &str, query: &str) -> Vec<usize> {
    let mut hits = Vec::new();
    if query.is_empty() {
        return hits;
    }

    let mut next_allowed = 0;
    for (idx, _) in text.char_indices() {
        if idx >= next_allowed && matches_at(text, query, idx) {
            hits.push(idx);
            next_allowed = idx + query.len();
        }
    }
    hits
}

fn find_from(text: &str, query: &str, from: usize) -> Option<usize> {
    text.char_indices()
        .map(|(idx, _)| idx)
        .find(|&idx| idx >= from && matches_at(text, query, idx))
}

/// First match starting at or after `from`, wrapping to the start of the text
pub fn find_next(text: &str, query: &str, from: usize) -> Option<SearchHit> {
    if query.is_empty() {
        return None;
    }

    if let Some(start) = find_from(text, query, from) {
        return Some(SearchHit {
            start,
            end: start + query.len(),
            wrapped: false,
        });
    }

    find_from(text, query, 0)
        .filter(|&start| start < from)
        .map(|start| SearchHit {
            start,
            end: start + query.len(),
            wrapped: true,
        })
}

/// Last match starting before `before`, wrapping to the end of the text
pub fn find_prev(text: &str, query: &str, before: usize) -> Option<SearchHit> {
    if query.is_empty() {
        return None;
    }

    let candidates: Vec<usize> = text
        .char_indices()
        .map(|(idx, _)| idx)
        .filter(|&idx| matches_at(text, query, idx))
        .collect();

    if let Some(&start) = candidates.iter().rev().find(|&&idx| idx < before) {
        return Some(SearchHit {
            start,
            end: start + query.len(),
            wrapped: false,
        });
    }

    candidates.last().map(|&start| SearchHit {
        start,
        end: start + query.len(),
        wrapped: true,
    })
}

/// Replace every match, returning the new text and how many were replaced
pub fn replace_all(text: &str, query: &str, replacement: &str) -> (String, usize) {
    let hits = find_all(text, query);
    if hits.is_empty() {
        return (text.to_string(), 0);
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for &start in &hits {
        out.push_str(&text[last..start]);
        out.push_str(replacement);
        last = start + query.len();
    }
    out.push_str(&text[last..]);
    (out, hits.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_case_insensitive() {
        assert_eq!(find_all("Test a test TEST", "test"), vec![0, 7, 12]);
        assert_eq!(find_all("aaaa", "aa"), vec![0, 2]);
        assert!(find_all("abc", "").is_empty());
    }

    #[test]
    fn test_find_next_wraps() {
        let text = "one two one";
        let hit = find_next(text, "one", 1).unwrap();
        assert_eq!((hit.start, hit.end, hit.wrapped), (8, 11, false));

        let hit = find_next(text, "one", 9).unwrap();
        assert_eq!((hit.start, hit.wrapped), (0, true));

        assert!(find_next(text, "three", 0).is_none());
    }

    #[test]
    fn test_find_next_single_match_not_wrapped_onto_itself() {
        let text = "only once";
        assert!(find_next(text, "once", 5).is_some());
        assert!(find_next(text, "only", 0).is_some_and(|h| !h.wrapped));
        // Starting past the only match wraps back to it
        assert!(find_next(text, "only", 1).is_some_and(|h| h.wrapped));
    }

    #[test]
    fn test_find_prev_wraps() {
        let text = "ab ab ab";
        let hit = find_prev(text, "ab", 6).unwrap();
        assert_eq!((hit.start, hit.wrapped), (3, false));

        let hit = find_prev(text, "ab", 0).unwrap();
        assert_eq!((hit.start, hit.wrapped), (6, true));
    }

    #[test]
    fn test_multibyte_text() {
        let text = "café Café";
        assert_eq!(find_all(text, "café"), vec![0, 6]);
        assert_eq!(find_all(text, "É"), Vec::<usize>::new());
    }

    #[test]
    fn test_replace_all() {
        let (out, count) = replace_all("Cat cat dog", "cat", "bird");
        assert_eq!(out, "bird bird dog");
        assert_eq!(count, 2);

        let (out, count) = replace_all("nothing", "cat", "bird");
        assert_eq!(out, "nothing");
        assert_eq!(count, 0);
    }
}
