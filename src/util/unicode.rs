use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to fit within `max_cells`, ending in `…` when cut
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Next grapheme boundary after `byte_offset`, or None at the end
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let rest = s.get(byte_offset..)?;
    let first = rest.graphemes(true).next()?;
    Some(byte_offset + first.len())
}

/// Previous grapheme boundary before `byte_offset`, or None at the start
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let head = s.get(..byte_offset)?;
    let last = head.graphemes(true).next_back()?;
    Some(byte_offset - last.len())
}

/// Display column of a byte offset
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    let clamped = byte_offset.min(s.len());
    s.get(..clamped).map_or(0, display_width)
}

/// Byte offset of the grapheme covering display column `col`, or `s.len()`
/// past the end. A column inside a wide character maps to its start.
pub fn display_col_to_byte_offset(s: &str, col: usize) -> usize {
    let mut width = 0;
    for (i, g) in s.grapheme_indices(true) {
        let gw = display_width(g);
        if width + gw > col {
            return i;
        }
        width += gw;
    }
    s.len()
}
