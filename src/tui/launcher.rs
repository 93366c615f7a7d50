use ratatui::layout::Rect;

use crate::model::PopupConfig;

/// Fixed popup rectangle for a terminal of `(cols, rows)`.
/// Anchored at the configured corner and clamped to the screen.
pub fn popup_area(popup: &PopupConfig, (cols, rows): (u16, u16)) -> Rect {
    let left = popup.left.min(cols.saturating_sub(1));
    let top = popup.top.min(rows.saturating_sub(1));
    let width = popup.width.min(cols.saturating_sub(left));
    let height = popup.height.min(rows.saturating_sub(top));
    Rect::new(left, top, width, height)
}
