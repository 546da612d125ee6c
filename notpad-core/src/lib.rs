//! notpad Core - Markdown rendering, document session, and configuration
//!
//! This crate contains the core logic for notpad, independent of terminal UI concerns:
//! - Markdown line renderer producing tagged spans
//! - HTML export sink
//! - Rope-based session document and cursor editing
//! - Save flows (prepend, append, save as new, overwrite)
//! - Find and replace
//! - Configuration management

pub mod config;
pub mod cursor;
pub mod doc;
pub mod html;
pub mod markdown;
pub mod save;
pub mod search;

// Re-export commonly used types
pub use config::{Config, ThemeVariant};
pub use cursor::Cursor;
pub use doc::Document;
pub use markdown::{render, RenderedSpan, StyleSink, StyleTag};
pub use save::{SaveChoice, SaveOptions, SaveOutcome};
