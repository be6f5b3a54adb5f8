use color_eyre::eyre::Result;
use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use ratatui::DefaultTerminal;
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use tokio::select;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::Instant;
use tokio::time::interval_at;
use tokio_stream::StreamExt;

use crate::Cli;
use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::browse::BrowseList;
use crate::chatbot::ChatbotWidget;
use crate::header::MOBILE_BREAKPOINT;
use crate::header::MobileHeader;
use crate::hero_carousel::AUTOPLAY_INTERVAL;
use crate::hero_carousel::HeroCarousel;
use crate::hero_carousel::HeroSlide;
use crate::prefs::UiPrefs;
use crate::sidebar::Sidebar;

const CAROUSEL_HEIGHT: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelFocus {
    Sidebar,
    Carousel,
    Browse,
}

pub struct App {
    sidebar: Sidebar,
    carousel: HeroCarousel,
    browse: BrowseList,
    chatbot: ChatbotWidget,
    focus: PanelFocus,
    prefs: UiPrefs,
    trending: Vec<HeroSlide>,
    app_event_rx: UnboundedReceiver<AppEvent>,
    app_event_tx: AppEventSender,
    should_exit: bool,
}

impl App {
    pub fn new(cli: &Cli, slides: Vec<HeroSlide>) -> Self {
        let (app_event_tx, app_event_rx) = unbounded_channel();
        let app_event_tx = AppEventSender::new(app_event_tx);
        let prefs = UiPrefs::load();
        let sidebar = Sidebar::new(&cli.categories, prefs.sidebar_collapsed);
        let browse = BrowseList::new("首页", items_for_route("首页", &slides));
        let chatbot = ChatbotWidget::new(app_event_tx.clone(), &cli.server_url);

        let mut app = Self {
            sidebar,
            carousel: HeroCarousel::new(slides.clone()),
            browse,
            chatbot,
            focus: PanelFocus::Browse,
            prefs,
            trending: slides,
            app_event_rx,
            app_event_tx,
            should_exit: false,
        };
        app.apply_focus();
        app
    }

    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();
        // Skip the immediate first tick so the first slide gets a full slot.
        let mut autoplay = interval_at(Instant::now() + AUTOPLAY_INTERVAL, AUTOPLAY_INTERVAL);

        while !self.should_exit {
            terminal.draw(|frame| self.render(frame))?;

            select! {
                Some(event) = events.next() => {
                    if let Event::Key(key) = event? {
                        if key.kind == KeyEventKind::Press {
                            self.handle_key(key);
                        }
                    }
                }
                _ = autoplay.tick() => self.carousel.tick(),
                Some(app_event) = self.app_event_rx.recv() => self.handle_app_event(app_event),
            }
        }

        Ok(())
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ChatCompleted(content) => self.chatbot.on_completed(content),
            AppEvent::ChatFailed(reason) => self.chatbot.on_failed(&reason),
            AppEvent::ExitRequest => self.should_exit = true,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.app_event_tx.send(AppEvent::ExitRequest);
            return;
        }

        // The open chat widget captures the keyboard, like a modal.
        if self.chatbot.is_open() && self.chatbot.handle_key(key) {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.app_event_tx.send(AppEvent::ExitRequest),
            KeyCode::Char('c') => self.chatbot.toggle_open(),
            KeyCode::Tab => self.cycle_focus(),
            _ => match self.focus {
                PanelFocus::Sidebar => self.handle_sidebar_key(key),
                PanelFocus::Carousel => self.handle_carousel_key(key),
                PanelFocus::Browse => self.handle_browse_key(key),
            },
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.sidebar.select_prev(),
            KeyCode::Down => self.sidebar.select_next(),
            KeyCode::Enter => {
                let label = self.sidebar.activate().to_string();
                self.browse
                    .set_content(label.clone(), items_for_route(&label, &self.trending));
            }
            KeyCode::Char('t') => {
                self.prefs.sidebar_collapsed = self.sidebar.toggle_collapsed();
                // Persisting is best effort, the toggle itself already took.
                if let Err(e) = self.prefs.save() {
                    tracing::warn!("failed to persist ui prefs: {e}");
                }
            }
            _ => {}
        }
    }

    fn handle_carousel_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.carousel.prev(),
            KeyCode::Right => self.carousel.next(),
            KeyCode::Char(c @ '1'..='5') => {
                self.carousel.jump_to(c as usize - '1' as usize);
            }
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.browse.scroll_up(1),
            KeyCode::Down => self.browse.scroll_down(1),
            KeyCode::PageUp => self.browse.scroll_up(10),
            KeyCode::PageDown => self.browse.scroll_down(10),
            KeyCode::Char('g') => self.browse.jump_to_top(),
            _ => {}
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Sidebar => PanelFocus::Carousel,
            PanelFocus::Carousel => PanelFocus::Browse,
            PanelFocus::Browse => PanelFocus::Sidebar,
        };
        self.apply_focus();
    }

    fn apply_focus(&mut self) {
        self.sidebar.set_focus(self.focus == PanelFocus::Sidebar);
        self.browse.set_focus(self.focus == PanelFocus::Browse);
        // Focus is the pointer-hover analog: autoplay pauses while the
        // carousel is focused.
        self.carousel.set_paused(self.focus == PanelFocus::Carousel);
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let content = if area.width < MOBILE_BREAKPOINT {
            // Mobile layout: compact header on top, no sidebar.
            let [header_area, content_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
            frame.render_widget(
                MobileHeader {
                    active_label: self.sidebar.active_label(),
                },
                header_area,
            );
            content_area
        } else {
            let [sidebar_area, content_area] = Layout::horizontal([
                Constraint::Length(self.sidebar.width()),
                Constraint::Min(0),
            ])
            .areas(area);
            frame.render_widget(&self.sidebar, sidebar_area);
            content_area
        };

        if self.carousel.is_empty() {
            frame.render_widget(&self.browse, content);
        } else {
            let [carousel_area, browse_area] =
                Layout::vertical([Constraint::Length(CAROUSEL_HEIGHT), Constraint::Min(0)])
                    .areas(content);
            frame.render_widget(&self.carousel, carousel_area);
            frame.render_widget(&self.browse, browse_area);
        }

        if self.chatbot.is_open() {
            frame.render_widget(&self.chatbot, chat_overlay_area(area));
        }
    }
}

/// Bottom-right floating window, like the web widget.
fn chat_overlay_area(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(46);
    let height = area.height.saturating_sub(2).min(18);
    Rect {
        x: area.right().saturating_sub(width + 2),
        y: area.bottom().saturating_sub(height + 1),
        width,
        height,
    }
}

fn items_for_route(label: &str, trending: &[HeroSlide]) -> Vec<String> {
    // Catalog retrieval is out of scope here; the browse list reuses the
    // trending titles the carousel already has.
    match label {
        "首页" => trending.iter().map(|slide| slide.title.clone()).collect(),
        "搜索" => vec!["输入关键字开始搜索".to_string()],
        _ => trending
            .iter()
            .map(|slide| format!("{label} · {}", slide.title))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn overlay_stays_inside_the_viewport() {
        let overlay = chat_overlay_area(Rect::new(0, 0, 120, 40));
        assert!(overlay.right() <= 120);
        assert!(overlay.bottom() <= 40);
        assert_eq!(overlay.width, 46);
        assert_eq!(overlay.height, 18);

        let tiny = chat_overlay_area(Rect::new(0, 0, 20, 6));
        assert!(tiny.right() <= 20);
        assert!(tiny.bottom() <= 6);
    }

    #[test]
    fn home_route_lists_trending_titles() {
        let trending = vec![HeroSlide {
            title: "漫长的季节".to_string(),
            year: None,
            rating: None,
        }];
        assert_eq!(items_for_route("首页", &trending), vec!["漫长的季节"]);
        assert_eq!(
            items_for_route("电影", &trending),
            vec!["电影 · 漫长的季节"]
        );
    }
}
