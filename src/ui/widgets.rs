use crate::regions::RegionInfo;
use crate::types::LogLine;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, StatefulWidget, Widget, Wrap},
};

/// One selection pane: a titled, bordered list of resource identifiers.
pub struct ResourceList<'a> {
    title: &'static str,
    items: &'a [String],
    focused: bool,
    loading: bool,
}

impl<'a> ResourceList<'a> {
    pub fn new(title: &'static str, items: &'a [String], focused: bool, loading: bool) -> Self {
        Self {
            title,
            items,
            focused,
            loading,
        }
    }
}

impl<'a> StatefulWidget for ResourceList<'a> {
    type State = ratatui::widgets::ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let title = if self.loading {
            format!("{} (loading...)", self.title)
        } else {
            format!("{} ({})", self.title, self.items.len())
        };

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|name| ListItem::new(name.as_str()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(
                Style::default()
                    .add_modifier(Modifier::REVERSED)
                    .fg(Color::Yellow),
            )
            .highlight_symbol("→ ");

        StatefulWidget::render(list, area, buf, state);
    }
}

/// The most recent record batch for the selected service, oldest first.
pub struct LogView<'a> {
    lines: &'a [LogLine],
    scroll: usize,
    show_timestamps: bool,
    service: Option<&'a str>,
    loading: bool,
}

impl<'a> LogView<'a> {
    pub fn new(
        lines: &'a [LogLine],
        scroll: usize,
        show_timestamps: bool,
        service: Option<&'a str>,
        loading: bool,
    ) -> Self {
        Self {
            lines,
            scroll,
            show_timestamps,
            service,
            loading,
        }
    }

    fn format_line<'b>(&self, line: &'b LogLine) -> Line<'b> {
        let mut spans = Vec::new();
        if self.show_timestamps
            && let Some(ts) = line.timestamp
        {
            spans.push(Span::styled(
                format!("{} ", ts.format("%H:%M:%S%.3f")),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::raw(line.message.as_str()));
        Line::from(spans)
    }
}

impl<'a> Widget for LogView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.service {
            Some(service) if self.loading => format!("Logs: {service} (loading...)"),
            Some(service) => format!("Logs: {service}"),
            None => "Logs".to_string(),
        };

        let lines: Vec<Line> = self.lines.iter().map(|l| self.format_line(l)).collect();

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title(title).borders(Borders::ALL))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll as u16, 0));

        paragraph.render(area, buf);
    }
}

pub struct StatusBar<'a> {
    region: &'a RegionInfo,
    cluster: Option<&'a str>,
    service: Option<&'a str>,
    message: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        region: &'a RegionInfo,
        cluster: Option<&'a str>,
        service: Option<&'a str>,
        message: Option<&'a str>,
    ) -> Self {
        Self {
            region,
            cluster,
            service,
            message,
        }
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let status_parts = [
            format!("Region: {}", self.region.code),
            format!("Cluster: {}", self.cluster.unwrap_or("-")),
            format!("Service: {}", self.service.unwrap_or("-")),
        ];

        let mut status_text = status_parts.join(" | ");
        if let Some(message) = self.message {
            status_text.push_str(" | ");
            status_text.push_str(message);
        }
        status_text.push_str(" | ? for help");

        let paragraph = Paragraph::new(status_text)
            .style(Style::default().bg(Color::DarkGray).fg(Color::White));

        paragraph.render(area, buf);
    }
}

/// Centered overlay listing the region catalog.
pub struct RegionPicker<'a> {
    regions: &'a [RegionInfo],
}

impl<'a> RegionPicker<'a> {
    pub fn new(regions: &'a [RegionInfo]) -> Self {
        Self { regions }
    }
}

impl<'a> StatefulWidget for RegionPicker<'a> {
    type State = ratatui::widgets::ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let picker_width = 52u16;
        let picker_height = (self.regions.len() as u16 + 2).min(area.height);
        let x = (area.width.saturating_sub(picker_width)) / 2;
        let y = (area.height.saturating_sub(picker_height)) / 2;

        let picker_area = Rect {
            x: area.x + x,
            y: area.y + y,
            width: picker_width.min(area.width),
            height: picker_height,
        };

        // Clear the area to make it opaque
        Clear.render(picker_area, buf);

        let items: Vec<ListItem> = self
            .regions
            .iter()
            .map(|r| ListItem::new(format!("{:<15} {}", r.code, r.name)))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Region (Enter to bind, Esc to cancel)")
                    .borders(Borders::ALL)
                    .style(Style::default().bg(Color::Black).fg(Color::White)),
            )
            .highlight_style(
                Style::default()
                    .add_modifier(Modifier::REVERSED)
                    .fg(Color::Yellow),
            )
            .highlight_symbol("→ ");

        StatefulWidget::render(list, picker_area, buf, state);
    }
}

pub struct HelpOverlay;

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_lines = vec![
            "Keyboard Shortcuts",
            "",
            "  q/Q/Ctrl-C  - Quit",
            "  Tab         - Switch between cluster and service panes",
            "  ↑/↓ or j/k  - Move highlight",
            "  Enter       - Select the highlighted cluster or service",
            "  r           - Choose region",
            "  d           - Force a new deployment of the selection",
            "  t           - Toggle log timestamps",
            "  PgUp/PgDn   - Scroll the log view",
            "  ?           - Toggle this help",
            "",
            "Press any key to close",
        ];

        let lines: Vec<Line> = help_lines.iter().map(|s| Line::from(*s)).collect();

        // Center the help overlay
        let help_width = 60;
        let help_height = help_lines.len() as u16 + 2;
        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;

        let help_area = Rect {
            x: area.x + x,
            y: area.y + y,
            width: help_width.min(area.width),
            height: help_height.min(area.height),
        };

        // Clear the area to make it opaque
        Clear.render(help_area, buf);

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black).fg(Color::White));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .style(Style::default().bg(Color::Black).fg(Color::White));

        paragraph.render(help_area, buf);
    }
}
