//! Auto-advancing hero rotator for the top of the home view.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;

/// At most five trending items rotate, same cap as the web carousel.
const MAX_SLIDES: usize = 5;

/// Slide delay of the web carousel.
pub(crate) const AUTOPLAY_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroSlide {
    pub title: String,
    pub year: Option<String>,
    pub rating: Option<String>,
}

pub(crate) struct HeroCarousel {
    slides: Vec<HeroSlide>,
    active: usize,
    /// Autoplay stops while the pointer (here: focus) rests on the carousel.
    paused: bool,
}

impl HeroCarousel {
    pub(crate) fn new(items: Vec<HeroSlide>) -> Self {
        let mut slides = items;
        slides.truncate(MAX_SLIDES);
        Self {
            slides,
            active: 0,
            paused: false,
        }
    }

    pub(crate) fn active_index(&self) -> usize {
        self.active
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Autoplay tick: advance unless paused or there is nothing to rotate.
    pub(crate) fn tick(&mut self) {
        if !self.paused && self.slides.len() > 1 {
            self.next();
        }
    }

    pub(crate) fn next(&mut self) {
        if !self.slides.is_empty() {
            self.active = (self.active + 1) % self.slides.len();
        }
    }

    pub(crate) fn prev(&mut self) {
        if !self.slides.is_empty() {
            self.active = (self.active + self.slides.len() - 1) % self.slides.len();
        }
    }

    pub(crate) fn jump_to(&mut self, index: usize) {
        if index < self.slides.len() {
            self.active = index;
        }
    }
}

impl WidgetRef for HeroCarousel {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let Some(slide) = self.slides.get(self.active) else {
            return;
        };

        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut tags: Vec<Span> = Vec::new();
        if let Some(rating) = &slide.rating {
            tags.push(Span::styled(
                format!(" ★ {rating} "),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ));
            tags.push(Span::raw(" "));
        }
        if let Some(year) = &slide.year {
            tags.push(Span::styled(
                format!(" {year} "),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
        }

        let mut indicator: Vec<Span> = Vec::new();
        for index in 0..self.slides.len() {
            indicator.push(if index == self.active {
                Span::styled("●", Style::default().fg(Color::White))
            } else {
                Span::styled("○", Style::default().fg(Color::DarkGray))
            });
            indicator.push(Span::raw(" "));
        }
        if self.paused {
            indicator.push(Span::styled("⏸", Style::default().fg(Color::DarkGray)));
        }

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", slide.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from_iter(std::iter::once(Span::raw("  ")).chain(tags)),
            Line::from(Span::styled(
                "  ▶ 立即播放",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from_iter(std::iter::once(Span::raw("  ")).chain(indicator)),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}
