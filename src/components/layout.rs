//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub table: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Table on top, one status line, help bar at the bottom
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    MainLayout {
        table: chunks[0],
        status: chunks[1],
        help: chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup() {
        let popup = centered_popup(Rect::new(0, 0, 100, 40), 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));

        let clamped = centered_popup(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!(clamped, Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_main_layout() {
        let layout = calculate_main_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.table.height, 22);
        assert_eq!(layout.status.y, 22);
        assert_eq!(layout.help.y, 23);
    }
}
