//! # Restwatch - work break reminders
//!
//! Watches keyboard and mouse activity, measures continuous work inside a
//! daily work window, and reminds you to take a break on every display.
//!
//! ## Features
//!
//! - **Activity Monitoring**: OS-level input hooks feed a last-activity timestamp
//! - **Work Clock**: 1 Hz state machine with first and repeat reminders
//! - **Notifications**: Desktop or console reminders, dismissed automatically
//! - **Settings**: Flat JSON settings with an interactive editor
//! - **Background Mode**: Detached watcher with PID file and graceful shutdown
//!
//! ## Usage
//!
//! ```rust,no_run
//! use restwatch::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
