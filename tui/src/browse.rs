//! Scrollable browse list under the carousel, with the back-to-top control.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;

/// Rows scrolled past before the back-to-top affordance appears
/// (the 300px threshold of the web button, in list rows).
const SCROLL_TOP_THRESHOLD: usize = 10;

pub(crate) struct BrowseList {
    heading: String,
    items: Vec<String>,
    offset: usize,
    has_focus: bool,
}

impl BrowseList {
    pub(crate) fn new(heading: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            heading: heading.into(),
            items,
            offset: 0,
            has_focus: false,
        }
    }

    /// Replace the content when the route changes; scroll resets.
    pub(crate) fn set_content(&mut self, heading: impl Into<String>, items: Vec<String>) {
        self.heading = heading.into();
        self.items = items;
        self.offset = 0;
    }

    pub(crate) fn set_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }

    pub(crate) fn scroll_down(&mut self, rows: usize) {
        let max = self.items.len().saturating_sub(1);
        self.offset = (self.offset + rows).min(max);
    }

    pub(crate) fn scroll_up(&mut self, rows: usize) {
        self.offset = self.offset.saturating_sub(rows);
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn back_to_top_visible(&self) -> bool {
        self.offset > SCROLL_TOP_THRESHOLD
    }

    pub(crate) fn jump_to_top(&mut self) {
        self.offset = 0;
    }
}

impl WidgetRef for BrowseList {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = Vec::new();

        let mut heading_style = Style::default().add_modifier(Modifier::BOLD);
        if self.has_focus {
            heading_style = heading_style.fg(Color::Green);
        }
        lines.push(Line::from(Span::styled(
            format!(" {}", self.heading),
            heading_style,
        )));

        let rows = usize::from(area.height).saturating_sub(2);
        for item in self.items.iter().skip(self.offset).take(rows) {
            lines.push(Line::from(format!("   {item}")));
        }

        if self.back_to_top_visible() {
            lines.push(Line::from(Span::styled(
                " ⌃ 返回顶部 (g)",
                Style::default().fg(Color::DarkGray),
            )));
        }

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(n: usize) -> BrowseList {
        BrowseList::new("首页", (0..n).map(|i| format!("item {i}")).collect())
    }

    #[test]
    fn back_to_top_appears_past_the_threshold() {
        let mut browse = list(40);
        browse.scroll_down(SCROLL_TOP_THRESHOLD);
        assert!(!browse.back_to_top_visible());
        browse.scroll_down(1);
        assert!(browse.back_to_top_visible());
        browse.jump_to_top();
        assert_eq!(browse.offset(), 0);
        assert!(!browse.back_to_top_visible());
    }

    #[test]
    fn scrolling_clamps_to_content() {
        let mut browse = list(5);
        browse.scroll_down(100);
        assert_eq!(browse.offset(), 4);
        browse.scroll_up(100);
        assert_eq!(browse.offset(), 0);
    }

    #[test]
    fn route_change_resets_the_scroll_position() {
        let mut browse = list(40);
        browse.scroll_down(20);
        browse.set_content("电影", vec!["a".to_string()]);
        assert_eq!(browse.offset(), 0);
    }
}
