//! Rewriting resolved references to canonical basenames

use std::collections::HashMap;

use crate::reference::references;

/// Replace every reference whose display name equals a key of `targets` with a reference
/// to the mapped basename, preserving its anchor/label suffix.
///
/// Matching is exact string equality. Bytes outside replaced tokens are copied unchanged.
/// A token already pointing at its basename is left alone and not counted.
/// Returns the new body and the number of substitutions, or `None` when nothing changed.
pub fn rewrite_references(
    body: &str,
    targets: &HashMap<String, String>,
) -> Option<(String, usize)> {
    let mut out = String::with_capacity(body.len());
    let mut last_end = 0;
    let mut substitutions = 0;

    for reference in references(body) {
        let Some(basename) = targets.get(reference.name) else {
            continue;
        };
        let replacement = reference.retarget(basename);
        if replacement == body[reference.start..reference.end] {
            continue;
        }
        out.push_str(&body[last_end..reference.start]);
        out.push_str(&replacement);
        last_end = reference.end;
        substitutions += 1;
    }

    if substitutions == 0 {
        return None;
    }
    out.push_str(&body[last_end..]);
    Some((out, substitutions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_rewrite_preserves_anchor_and_surroundings() {
        let body = "Intro\n  see [[OldName#Section]], then [[Other]]!\n\ttail";
        let (out, n) = rewrite_references(body, &targets(&[("OldName", "NewBase")])).unwrap();
        assert_eq!(n, 1);
        assert_eq!(out, "Intro\n  see [[NewBase#Section]], then [[Other]]!\n\ttail");
    }

    #[test]
    fn test_rewrite_all_occurrences() {
        let body = "[[Memory Bank]] and [[Memory Bank|label]] and [[Memory Bank]]";
        let (out, n) =
            rewrite_references(body, &targets(&[("Memory Bank", "4.2. Memory.md")])).unwrap();
        assert_eq!(n, 3);
        assert_eq!(
            out,
            "[[4.2. Memory.md]] and [[4.2. Memory.md|label]] and [[4.2. Memory.md]]"
        );
    }

    #[test]
    fn test_matching_is_exact_not_fuzzy() {
        let body = "[[memory bank]] [[Memory Banks]]";
        assert!(rewrite_references(body, &targets(&[("Memory Bank", "X.md")])).is_none());
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let map = targets(&[("Old", "New.md")]);
        let (once, _) = rewrite_references("a [[Old#x]] b", &map).unwrap();
        assert!(rewrite_references(&once, &map).is_none());
    }

    #[test]
    fn test_name_equal_to_basename_is_not_counted() {
        let map = targets(&[("A.md", "A.md")]);
        assert!(rewrite_references("see [[A.md#x]] and [[A.md]]", &map).is_none());

        let map = targets(&[("A.md", "A.md"), ("B", "A.md")]);
        let (out, n) = rewrite_references("[[A.md]] [[B]]", &map).unwrap();
        assert_eq!(n, 1);
        assert_eq!(out, "[[A.md]] [[A.md]]");
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let body = "Смотри [[Старое]] — «кавычки»";
        let (out, _) = rewrite_references(body, &targets(&[("Старое", "Новое.md")])).unwrap();
        assert_eq!(out, "Смотри [[Новое.md]] — «кавычки»");
    }
}
