//! Core library modules for restwatch.
//!
//! ## Components
//!
//! - **Activity**: OS input hook keeping the last-activity timestamp
//! - **Clock**: the 1 Hz work clock and its thresholds
//! - **Alerts**: dispatching reminders to every display, auto-dismissal
//! - **Settings**: persisted user settings with validation
//! - **Monitor / Daemon**: the watch loop and its background process
//! - **Messages / View**: user-facing text and terminal tables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use restwatch::libs::clock::WorkClock;
//! use restwatch::libs::settings::Settings;
//! use chrono::Local;
//! use std::time::Duration;
//!
//! let mut clock = WorkClock::new(Settings::read());
//! let tick = clock.tick(Local::now().time(), Duration::from_secs(2));
//! if let Some(kind) = tick.alert {
//!     println!("time for a break (repeat: {})", kind.is_repeat());
//! }
//! ```

pub mod activity;
pub mod alert;
pub mod clock;
pub mod daemon;
pub mod data_storage;
pub mod messages;
pub mod monitor;
pub mod presenters;
pub mod settings;
pub mod status;
pub mod view;
