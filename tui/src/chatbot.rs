//! Embedded chatbot widget backed by the `/api/hunyuan` signing route.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::WidgetRef;
use std::time::Duration;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;

const GREETING: &str = "Hello，Here's Hunyuan Uibo，What can I do for you？";
const FALLBACK_REPLY: &str = "抱歉，我无法回答这个问题。";
const ERROR_REPLY: &str = "发生错误，请稍后再试。";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

pub(crate) struct ChatbotWidget {
    app_event_tx: AppEventSender,
    http: reqwest::Client,
    chat_url: String,
    open: bool,
    turns: Vec<ChatTurn>,
    input: String,
    is_loading: bool,
}

impl ChatbotWidget {
    pub(crate) fn new(app_event_tx: AppEventSender, server_url: &str) -> Self {
        let chat_url = format!("{}/api/hunyuan", server_url.trim_end_matches('/'));
        Self {
            app_event_tx,
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            chat_url,
            open: false,
            turns: vec![ChatTurn {
                role: ChatRole::Assistant,
                content: GREETING.to_string(),
            }],
            input: String::new(),
            is_loading: false,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub(crate) fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    fn can_submit(&self) -> bool {
        !self.input.trim().is_empty() && !self.is_loading
    }

    /// Handle a key while the widget is open. Returns false for keys the
    /// widget does not consume.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.open = false;
                true
            }
            KeyCode::Enter => {
                self.submit();
                true
            }
            KeyCode::Backspace => {
                self.input.pop();
                true
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                true
            }
            _ => false,
        }
    }

    /// Send the pending utterance to the signing route in the background.
    /// Ignored while empty or while a previous turn is still in flight.
    pub(crate) fn submit(&mut self) {
        if !self.can_submit() {
            return;
        }

        let message = std::mem::take(&mut self.input);
        self.turns.push(ChatTurn {
            role: ChatRole::User,
            content: message.clone(),
        });
        self.is_loading = true;

        let http = self.http.clone();
        let chat_url = self.chat_url.clone();
        let app_event_tx = self.app_event_tx.clone();
        tokio::spawn(async move {
            let result = http
                .post(&chat_url)
                .json(&serde_json::json!({ "message": message }))
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    let content = response
                        .json::<serde_json::Value>()
                        .await
                        .ok()
                        .and_then(|data| {
                            data.pointer("/Choices/0/Message/Content")
                                .and_then(|v| v.as_str())
                                .map(str::to_string)
                        })
                        .unwrap_or_else(|| FALLBACK_REPLY.to_string());
                    app_event_tx.send(AppEvent::ChatCompleted(content));
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    app_event_tx.send(AppEvent::ChatFailed(format!("{status}: {body}")));
                }
                Err(err) => {
                    app_event_tx.send(AppEvent::ChatFailed(err.to_string()));
                }
            }
        });
    }

    pub(crate) fn on_completed(&mut self, content: String) {
        self.turns.push(ChatTurn {
            role: ChatRole::Assistant,
            content,
        });
        self.is_loading = false;
    }

    pub(crate) fn on_failed(&mut self, reason: &str) {
        tracing::warn!("chatbot request failed: {reason}");
        self.turns.push(ChatTurn {
            role: ChatRole::Assistant,
            content: ERROR_REPLY.to_string(),
        });
        self.is_loading = false;
    }
}

impl WidgetRef for ChatbotWidget {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Hunyuan Uibo ")
            .title_bottom(" Esc 关闭 · Enter 发送 ");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        for turn in &self.turns {
            lines.push(match turn.role {
                ChatRole::Assistant => Line::from(vec![
                    Span::styled("🤖 ", Style::default().fg(Color::Blue)),
                    Span::raw(turn.content.clone()),
                ]),
                ChatRole::User => Line::from(vec![
                    Span::styled("🧑 ", Style::default().fg(Color::Cyan)),
                    Span::styled(
                        turn.content.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
            });
        }
        if self.is_loading {
            lines.push(Line::from(Span::styled(
                "🤖 · · ·",
                Style::default().fg(Color::DarkGray),
            )));
        }

        // Pin the view to the latest turn; input takes the bottom row.
        let transcript_rows = usize::from(inner.height).saturating_sub(1);
        let skip = lines.len().saturating_sub(transcript_rows);
        let mut view: Vec<Line> = lines.into_iter().skip(skip).collect();

        let prompt = if self.input.is_empty() && !self.is_loading {
            Span::styled("说点什么...", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.input.clone())
        };
        view.push(Line::from(vec![Span::raw("> "), prompt]));

        Paragraph::new(view).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::unbounded_channel;

    fn widget() -> ChatbotWidget {
        let (tx, _rx) = unbounded_channel();
        ChatbotWidget::new(AppEventSender::new(tx), "http://127.0.0.1:3100/")
    }

    #[test]
    fn greeting_seeds_the_transcript() {
        let widget = widget();
        assert_eq!(widget.turns().len(), 1);
        assert_eq!(widget.turns()[0].role, ChatRole::Assistant);
    }

    #[test]
    fn trailing_slash_in_server_url_is_tolerated() {
        let widget = widget();
        assert_eq!(widget.chat_url, "http://127.0.0.1:3100/api/hunyuan");
    }

    #[tokio::test]
    async fn empty_or_whitespace_input_is_not_submitted() {
        let mut widget = widget();
        widget.input = "   ".to_string();
        widget.submit();
        assert_eq!(widget.turns().len(), 1);
        assert!(!widget.is_loading);
    }

    #[tokio::test]
    async fn submit_is_ignored_while_a_turn_is_in_flight() {
        let mut widget = widget();
        widget.input = "第一条".to_string();
        widget.submit();
        assert!(widget.is_loading);
        assert_eq!(widget.turns().len(), 2);

        widget.input = "第二条".to_string();
        widget.submit();
        assert_eq!(widget.turns().len(), 2);
        assert_eq!(widget.input, "第二条");
    }

    #[test]
    fn completion_and_failure_append_assistant_turns() {
        let mut widget = widget();
        widget.is_loading = true;
        widget.on_completed("回复".to_string());
        assert!(!widget.is_loading);
        assert_eq!(widget.turns().last().unwrap().content, "回复");

        widget.is_loading = true;
        widget.on_failed("connection refused");
        assert!(!widget.is_loading);
        assert_eq!(widget.turns().last().unwrap().content, ERROR_REPLY);
    }

    #[test]
    fn escape_closes_the_widget() {
        let mut widget = widget();
        widget.open = true;
        assert!(widget.handle_key(KeyEvent::from(KeyCode::Esc)));
        assert!(!widget.is_open());
    }

    #[test]
    fn typing_edits_the_input_buffer() {
        let mut widget = widget();
        widget.handle_key(KeyEvent::from(KeyCode::Char('h')));
        widget.handle_key(KeyEvent::from(KeyCode::Char('i')));
        widget.handle_key(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(widget.input, "h");
    }
}
