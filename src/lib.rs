//! Terminal chat widget for the MOSDAC assistant: collects a question,
//! POSTs it to the assistant's `/query` endpoint, and renders the markdown
//! answer in a scrolling transcript.

pub mod app;
pub mod client;
pub mod config;
pub mod handler;
pub mod markdown;
pub mod tui;
pub mod ui;

pub use app::{App, ChatMessage, ChatRole, Visibility};
pub use client::AnswerClient;
pub use config::Config;
