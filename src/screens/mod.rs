pub mod details_screen;
pub mod list_screen;

use ratatui::layout::Rect;

pub(crate) fn area_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// A `width`-wide slice of `area`, centred horizontally.
pub(crate) fn centered_horizontally(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect { x: area.x + (area.width - width) / 2, width, ..area }
}
