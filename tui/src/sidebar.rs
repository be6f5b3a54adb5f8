//! Left navigation rail: logo, fixed entries, and custom categories.

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

use crate::SITE_NAME;

const COLLAPSED_WIDTH: u16 = 4;
const EXPANDED_WIDTH: u16 = 24;
const ACCENT: Color = Color::Green;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NavEntry {
    pub icon: &'static str,
    pub label: String,
}

impl NavEntry {
    fn new(icon: &'static str, label: impl Into<String>) -> Self {
        Self {
            icon,
            label: label.into(),
        }
    }
}

pub(crate) struct Sidebar {
    entries: Vec<NavEntry>,
    /// Entry under the selection cursor.
    selected: usize,
    /// Entry for the route currently shown (active-route highlight).
    active: usize,
    collapsed: bool,
    has_focus: bool,
}

impl Sidebar {
    pub(crate) fn new(custom_categories: &[String], collapsed: bool) -> Self {
        let mut entries = vec![
            NavEntry::new("⌂", "首页"),
            NavEntry::new("⌕", "搜索"),
            NavEntry::new("▣", "电影"),
            NavEntry::new("▤", "剧集"),
            NavEntry::new("✦", "综艺"),
        ];
        // Custom categories reuse the star icon, same as the web sidebar.
        for category in custom_categories {
            entries.push(NavEntry::new("★", category.clone()));
        }

        Self {
            entries,
            selected: 0,
            active: 0,
            collapsed,
            has_focus: false,
        }
    }

    pub(crate) fn width(&self) -> u16 {
        if self.collapsed {
            COLLAPSED_WIDTH
        } else {
            EXPANDED_WIDTH
        }
    }

    pub(crate) fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Flip collapse state and report the new value so the caller can
    /// persist it.
    pub(crate) fn toggle_collapsed(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.collapsed
    }

    pub(crate) fn set_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }

    pub(crate) fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub(crate) fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Activate the selected entry and return its label (the "route").
    pub(crate) fn activate(&mut self) -> &str {
        self.active = self.selected;
        &self.entries[self.active].label
    }

    pub(crate) fn active_label(&self) -> &str {
        &self.entries[self.active].label
    }
}

impl WidgetRef for Sidebar {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = Vec::new();

        // Logo row, hidden while collapsed like the web layout.
        if self.collapsed {
            lines.push(Line::from(Span::styled(
                " ≡",
                Style::default().add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!(" ◉ {SITE_NAME}"),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(""));

        for (index, entry) in self.entries.iter().enumerate() {
            let is_active = index == self.active;
            let is_selected = self.has_focus && index == self.selected;

            let mut style = Style::default();
            if is_active {
                style = style.fg(ACCENT).add_modifier(Modifier::BOLD);
            }
            if is_selected {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let text = if self.collapsed {
                format!(" {}", entry.icon)
            } else {
                format!(" {}  {}", entry.icon, entry.label)
            };
            lines.push(Line::from(Span::styled(text, style)));
        }

        Paragraph::new(lines).render(area, buf);
    }
}
