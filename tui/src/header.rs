//! Compact one-line header shown instead of the sidebar on narrow terminals.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::SITE_NAME;

/// Terminals narrower than this get the mobile layout.
pub(crate) const MOBILE_BREAKPOINT: u16 = 80;

pub(crate) struct MobileHeader<'a> {
    pub active_label: &'a str,
}

impl Widget for MobileHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Logo centered, current route on the right, like the web header.
        let logo = format!("◉ {SITE_NAME}");
        let pad = usize::from(area.width)
            .saturating_sub(logo.width())
            .saturating_sub(self.active_label.width() + 1)
            / 2;

        let line = Line::from(vec![
            Span::raw(" ".repeat(pad.max(1))),
            Span::styled(
                logo,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(pad.max(1))),
            Span::styled(self.active_label, Style::default().fg(Color::DarkGray)),
        ]);

        Paragraph::new(line).render(area, buf);
    }
}
