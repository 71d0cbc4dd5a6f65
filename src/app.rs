use ratatui::layout::Rect;

use crate::client::AnswerClient;
use crate::config::{self, Config};

/// Widget visibility. Transitions are a fixed cycle:
/// Closed -> Open -> Minimized -> Open -> Closed. Anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    Open,
    Minimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub visibility: Visibility,
    pub minimizable: bool,
    pub input_mode: InputMode,

    // Chat state
    pub query_input: String,
    pub query_cursor: usize, // cursor position in query_input, in chars
    pub chat_messages: Vec<ChatMessage>,
    pub query_loading: bool,
    pub query_scroll: u16,
    pub query_chat_height: u16, // Height of chat area for scroll calculations
    pub query_chat_width: u16,  // Width of chat area for wrap calculations
    pub query_task: Option<tokio::task::JoinHandle<anyhow::Result<String>>>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Areas for mouse hit-testing (updated during render)
    pub widget_area: Option<Rect>,
    pub chat_area: Option<Rect>,
    pub input_area: Option<Rect>,

    // Answer service
    pub client: AnswerClient,
    pub fallback_message: String,
}

impl App {
    pub fn new(cfg: &Config) -> Self {
        // Endpoint: env var first, then config, then default
        let endpoint = std::env::var("MOSDAC_ENDPOINT")
            .ok()
            .or_else(|| cfg.endpoint_url.clone())
            .unwrap_or_else(|| config::DEFAULT_ENDPOINT.to_string());
        let client = AnswerClient::new(&endpoint);

        let minimizable = cfg.minimizable.unwrap_or(true);
        let greeting = cfg
            .greeting
            .clone()
            .unwrap_or_else(|| config::DEFAULT_GREETING.to_string());
        let fallback_message = cfg
            .fallback_message
            .clone()
            .unwrap_or_else(|| config::DEFAULT_FALLBACK.to_string());

        Self {
            should_quit: false,
            visibility: if minimizable {
                Visibility::Closed
            } else {
                Visibility::Open
            },
            minimizable,
            input_mode: InputMode::Normal,

            query_input: String::new(),
            query_cursor: 0,
            chat_messages: vec![ChatMessage {
                role: ChatRole::Assistant,
                content: greeting,
            }],
            query_loading: false,
            query_scroll: 0,
            query_chat_height: 0,
            query_chat_width: 0,
            query_task: None,

            animation_frame: 0,

            widget_area: None,
            chat_area: None,
            input_area: None,

            client,
            fallback_message,
        }
    }

    /// Submit the current draft. Ignored when the trimmed draft is empty or
    /// a query is already in flight.
    pub fn submit_query(&mut self) {
        if self.query_input.trim().is_empty() || self.query_task.is_some() {
            return;
        }

        let question = self.query_input.clone();
        self.chat_messages.push(ChatMessage {
            role: ChatRole::User,
            content: question.clone(),
        });

        self.query_input.clear();
        self.query_cursor = 0;
        self.query_loading = true;
        self.scroll_chat_to_bottom();

        let client = self.client.clone();
        self.query_task = Some(tokio::spawn(async move { client.ask(&question).await }));
    }

    pub fn query_finished(&self) -> bool {
        self.query_task
            .as_ref()
            .map(|task| task.is_finished())
            .unwrap_or(false)
    }

    /// Take the finished query into the transcript: the answer on success,
    /// the fallback string on any failure. Failures never propagate.
    pub async fn finish_query(&mut self) {
        if let Some(task) = self.query_task.take() {
            let content = match task.await {
                Ok(Ok(answer)) => answer,
                Ok(Err(_)) | Err(_) => self.fallback_message.clone(),
            };

            self.chat_messages.push(ChatMessage {
                role: ChatRole::Assistant,
                content,
            });
            self.query_loading = false;
            self.scroll_chat_to_bottom();
        }
    }

    // Visibility transitions. Invalid transitions leave the state unchanged,
    // and a non-minimizable widget never leaves Open.

    pub fn open_widget(&mut self) {
        if self.minimizable && self.visibility == Visibility::Closed {
            self.visibility = Visibility::Open;
        }
    }

    pub fn close_widget(&mut self) {
        if self.minimizable && self.visibility == Visibility::Open {
            self.visibility = Visibility::Closed;
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn minimize_widget(&mut self) {
        if self.minimizable && self.visibility == Visibility::Open {
            self.visibility = Visibility::Minimized;
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn restore_widget(&mut self) {
        if self.minimizable && self.visibility == Visibility::Minimized {
            self.visibility = Visibility::Open;
        }
    }

    // Transcript scrolling
    pub fn scroll_chat_down(&mut self) {
        self.query_scroll = self.query_scroll.saturating_add(1);
    }

    pub fn scroll_chat_up(&mut self) {
        self.query_scroll = self.query_scroll.saturating_sub(1);
    }

    /// Scroll the transcript so the newest message (and the typing indicator
    /// while loading) is visible.
    pub fn scroll_chat_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.query_chat_width > 0 {
            self.query_chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in &self.chat_messages {
            total_lines += 1; // Role line
            for line in msg.content.lines() {
                // Use character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1; // Empty line still takes one line
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.query_loading {
            total_lines += 2; // Role line + typing indicator
        }

        let visible_height = if self.query_chat_height > 0 {
            self.query_chat_height
        } else {
            20
        };

        if total_lines > visible_height {
            self.query_scroll = total_lines.saturating_sub(visible_height);
        } else {
            self.query_scroll = 0;
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.query_loading {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}
