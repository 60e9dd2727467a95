//! Text wrapping and truncation
//!
//! Greedy fill against a measured width, never splitting a grapheme
//! cluster. Content left over after the allowed lines is truncated with
//! an ellipsis that itself must fit the column.

use unicode_segmentation::UnicodeSegmentation;

use crate::measure::{Measure, WrapUnit};

/// Truncation marker appended to the last line when content is dropped
pub const ELLIPSIS: &str = "...";

/// Wrap `text` into at most `max_lines` lines that each fit `max_width`.
///
/// Word mode joins words with single spaces (whitespace runs collapse);
/// a single word wider than the column is split cluster-wise so that no
/// produced line ever exceeds the width. If content remains after
/// `max_lines`, the last line is ellipsized.
pub fn wrap_to_width(
    text: &str,
    max_width: u32,
    max_lines: usize,
    m: &dyn Measure,
) -> Vec<String> {
    if max_lines == 0 {
        return Vec::new();
    }

    let mut lines = match m.wrap_unit() {
        WrapUnit::Word => wrap_words(text, max_width, m),
        WrapUnit::Cluster => wrap_clusters(text, max_width, m),
    };

    if lines.is_empty() {
        lines.push(String::new());
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        // SAFETY: max_lines >= 1, so truncate left at least one element
        let last = lines.last_mut().expect("at least one wrapped line");
        *last = ellipsize(last, max_width, m);
    }

    lines
}

/// Shorten `line` so `line + ELLIPSIS` fits `max_width`, then append the
/// ellipsis. Returns an empty string when even the bare marker does not
/// fit - the column is never overflowed.
pub fn ellipsize(line: &str, max_width: u32, m: &dyn Measure) -> String {
    if m.width(ELLIPSIS) > max_width {
        return String::new();
    }

    let mut clusters: Vec<&str> = line.graphemes(true).collect();
    loop {
        let candidate = format!("{}{}", clusters.concat(), ELLIPSIS);
        if m.width(&candidate) <= max_width {
            return candidate;
        }
        if clusters.pop().is_none() {
            return ELLIPSIS.to_string();
        }
    }
}

fn wrap_words(text: &str, max_width: u32, m: &dyn Measure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if m.width(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if m.width(word) <= max_width {
            current = word.to_string();
        } else {
            // Word alone overflows the column: fall back to cluster fill
            let mut pieces = wrap_clusters(word, max_width, m);
            current = pieces.pop().unwrap_or_default();
            lines.append(&mut pieces);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn wrap_clusters(text: &str, max_width: u32, m: &dyn Measure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for cluster in text.graphemes(true) {
        let candidate = format!("{current}{cluster}");
        if m.width(&candidate) <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            // A single cluster wider than the column still gets its own
            // line; truncation downstream decides what survives.
            current = cluster.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{CharCells, FontMetrics};

    #[test]
    fn test_wrap_reference_item_name() {
        let m = CharCells::new();
        let lines = wrap_to_width("Perun Seeragam 100g", 14, 2, &m);
        assert_eq!(lines, vec!["Perun Seeragam", "100g"]);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let m = CharCells::new();
        assert_eq!(wrap_to_width("Milk", 14, 2, &m), vec!["Milk"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        let m = CharCells::new();
        assert_eq!(wrap_to_width("", 10, 2, &m), vec![""]);
    }

    #[test]
    fn test_every_line_fits() {
        let m = CharCells::new();
        let text = "Sambar powder family pack special offer 500 grams";
        for w in [4, 7, 10, 14, 21] {
            for line in wrap_to_width(text, w, 3, &m) {
                assert!(m.width(&line) <= w, "line {line:?} exceeds width {w}");
            }
        }
    }

    #[test]
    fn test_truncation_appends_ellipsis() {
        let m = CharCells::new();
        let lines = wrap_to_width("Extra long product description that keeps going", 10, 2, &m);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with(ELLIPSIS));
        assert!(m.width(&lines[1]) <= 10);
    }

    #[test]
    fn test_truncation_when_ellipsis_does_not_fit() {
        let m = CharCells::new();
        let lines = wrap_to_width("abcdefghij", 2, 1, &m);
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn test_oversized_word_splits_by_cluster() {
        let m = CharCells::new();
        let lines = wrap_to_width("superkalifragilistic", 6, 5, &m);
        for line in &lines {
            assert!(m.width(line) <= 6);
        }
        assert_eq!(lines.concat(), "superkalifragilistic");
    }

    #[test]
    fn test_tamil_never_splits_mid_cluster() {
        let m = CharCells::new();
        // Each produced line must be a concatenation of whole clusters:
        // re-segmenting and re-joining must round-trip.
        let text = "பெருங்காயம் தூள்";
        for w in [2, 3, 5, 8] {
            for line in wrap_to_width(text, w, 4, &m) {
                let rejoined: String =
                    unicode_segmentation::UnicodeSegmentation::graphemes(line.as_str(), true)
                        .collect();
                assert_eq!(rejoined, line);
                assert!(m.width(&line) <= w);
            }
        }
    }

    #[test]
    fn test_pixel_mode_wraps_cluster_wise() {
        let m = FontMetrics::bitmap(24.0);
        let w = m.width("abcd");
        let lines = wrap_to_width("abcdefgh", w, 4, &m);
        assert_eq!(lines, vec!["abcd", "efgh"]);
    }

    #[test]
    fn test_ellipsize_fit_is_noop_free() {
        let m = CharCells::new();
        assert_eq!(ellipsize("abcdef", 9, &m), "abcdef...");
        assert_eq!(ellipsize("abcdef", 6, &m), "abc...");
        assert_eq!(ellipsize("abcdef", 3, &m), "...");
        assert_eq!(ellipsize("abcdef", 2, &m), "");
    }
}
