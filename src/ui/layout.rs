use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub clusters: Rect,
    pub services: Rect,
    pub logs: Rect,
    pub status_bar: Rect,
}

pub fn create_layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Main area
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(40), // Selection panes
            Constraint::Min(1),     // Logs
        ])
        .split(rows[0]);

    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    AppLayout {
        clusters: panes[0],
        services: panes[1],
        logs: columns[1],
        status_bar: rows[1],
    }
}
