use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Control characters such as tabs and
/// newlines count as one cell so table cells never collapse.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_display_width).sum()
}

const ELLIPSIS: char = '\u{2026}';

/// Shorten `s` to at most `max_cells` cells. A shortened string ends in `…`,
/// which takes the last cell.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    match max_cells {
        0 => return String::new(),
        _ if display_width(s) <= max_cells => return s.to_string(),
        1 => return ELLIPSIS.to_string(),
        _ => {}
    }
    let mut used = 0;
    let mut out: String = s
        .graphemes(true)
        .take_while(|g| {
            used += grapheme_display_width(g);
            used < max_cells
        })
        .collect();
    out.push(ELLIPSIS);
    out
}

/// Left-align `s` in a column `width` cells wide, padding with spaces.
/// Text wider than the column is returned unchanged.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let w = display_width(s);
    let mut out = String::with_capacity(s.len() + width.saturating_sub(w));
    out.push_str(s);
    for _ in w..width {
        out.push(' ');
    }
    out
}

/// Right-align `s` in a column `width` cells wide.
pub fn pad_left_to_width(s: &str, width: usize) -> String {
    let w = display_width(s);
    let mut out = " ".repeat(width.saturating_sub(w));
    out.push_str(s);
    out
}

fn grapheme_display_width(g: &str) -> usize {
    if g.chars().all(char::is_control) {
        return 1;
    }
    UnicodeWidthStr::width(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_characters_take_one_cell() {
        assert_eq!(display_width("a\tb"), 3);
        assert_eq!(display_width("line\nbreak"), 10);
        // CRLF is a single grapheme
        assert_eq!(display_width("a\r\nb"), 3);
    }

    #[test]
    fn accented_title_is_measured_per_grapheme() {
        assert_eq!(display_width("Re\u{0301}sume\u{0301}"), 6);
        assert_eq!(display_width("東京 launch"), 11);
    }

    #[test]
    fn truncate_stops_after_a_control_character() {
        assert_eq!(truncate_to_width("ab\tcdef", 4), "ab\t…");
    }

    #[test]
    fn truncate_keeps_titles_that_fit() {
        assert_eq!(truncate_to_width("Ship v2", 7), "Ship v2");
        assert_eq!(truncate_to_width("Déploiement 東京", 12), "Déploiement…");
    }

    #[test]
    fn truncate_tiny_columns() {
        assert_eq!(truncate_to_width("anything", 0), "");
        assert_eq!(truncate_to_width("anything", 1), "…");
    }

    #[test]
    fn pad_counts_control_characters() {
        assert_eq!(pad_to_width("a\tb", 5), "a\tb  ");
        assert_eq!(pad_to_width("overdue", 3), "overdue");
        assert_eq!(pad_left_to_width("42", 5), "   42");
    }
}
