//! Display implementation for application messages.
//!
//! This is the single place where message text is written. Variants carrying
//! data interpolate it here, so call sites never format user-facing strings
//! themselves.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SETTINGS MESSAGES ===
            Message::SettingsSaved => "Settings saved successfully".to_string(),
            Message::SettingsDeleted => "Settings file removed, defaults restored".to_string(),
            Message::SettingsFileNotFound => "No settings file found, defaults are already in use".to_string(),
            Message::SettingsLoadFailed(error) => format!("Could not load settings, using defaults: {}", error),
            Message::SettingsUsingDefaults => "No settings file, using defaults".to_string(),
            Message::SettingsReloaded => "Settings changed on disk, reloaded".to_string(),
            Message::SettingsNothingToChange => "No changes given, settings left as they are".to_string(),
            Message::SettingsWizardHeader => "Break reminder settings".to_string(),

            // === PROMPTS ===
            Message::PromptWorkDuration => "Continuous work before a reminder (minutes)".to_string(),
            Message::PromptRepeatInterval => "Repeat reminder interval (minutes)".to_string(),
            Message::PromptIdleThreshold => "Idle time before you count as away (seconds)".to_string(),
            Message::PromptWorkStart => "Work window start (HH:MM)".to_string(),
            Message::PromptWorkEnd => "Work window end (HH:MM)".to_string(),
            Message::PromptAutostart => "Start with the session".to_string(),

            // === WORK CLOCK STATUS ===
            Message::StatusOutOfHours => "Outside working hours".to_string(),
            Message::StatusResting => "Resting".to_string(),
            Message::StatusWorking(minutes) => format!("Working ({} min)", minutes),
            Message::StatusBreakSuggested(minutes) => format!("Break suggested (next reminder in {} min)", minutes),
            Message::ClockStateChanged(from, to) => format!("Work clock: {} -> {}", from, to),
            Message::StatusNotAvailable => "The watcher has not reported its status yet".to_string(),

            // === ALERT MESSAGES ===
            Message::AlertTitleFirst => "🕐 Break reminder".to_string(),
            Message::AlertBodyFirst => "You have been working for a while. Time to take a break!".to_string(),
            Message::AlertTitleRepeat => "⚠️ Still working".to_string(),
            Message::AlertBodyRepeat => "You have been working for a long time. Please take a break!".to_string(),
            Message::ConsoleAlert(title, body) => format!("{}\n{}", title, body),
            Message::AlertDispatched { repeat, displays } => {
                let kind = if *repeat { "Repeat reminder" } else { "Break reminder" };
                format!("{} shown on {} display(s)", kind, displays)
            }
            Message::NotificationShowFailed(display, error) => format!("Failed to show notification on {}: {}", display, error),
            Message::NotificationNotShown => "The reminder could not be shown on any display".to_string(),

            // === ACTIVITY MESSAGES ===
            Message::ActivityListenerFailed(error) => format!("Failed to listen for input events: {}. Retrying in 1 second...", error),

            // === MONITOR MESSAGES ===
            Message::MonitorStarted {
                work_duration,
                repeat_interval,
                idle_threshold,
                work_start,
                work_end,
            } => format!(
                "Monitor is running: reminder after {} min, repeat every {} min, idle after {}s, work window {}-{}",
                work_duration, repeat_interval, idle_threshold, work_start, work_end
            ),
            Message::MonitorExitedNormally => "Monitor exited normally".to_string(),
            Message::MonitorShuttingDown => "Shutting down monitor...".to_string(),
            Message::MonitorError(error) => format!("Monitor error: {}", error),

            // === WATCHER / DAEMON MESSAGES ===
            Message::WatcherStarted(pid) => format!("Watcher started in the background (PID: {}).", pid),
            Message::WatcherStopped(pid) => format!("Watcher process (PID: {}) stopped successfully.", pid),
            Message::WatcherNotRunning => "Watcher is not running.".to_string(),
            Message::WatcherNotRunningPidNotFound => "Watcher does not appear to be running (PID file not found).".to_string(),
            Message::WatcherStartingForeground => "Starting watcher in foreground... Press Ctrl+C to exit.".to_string(),
            Message::WatcherStoppingExisting(pid) => format!("Stopping existing watcher (PID: {})...", pid),
            Message::WatcherFailedToStopExisting(error) => format!("Failed to stop existing watcher: {}", error),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down gracefully...".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down gracefully...".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down gracefully...".to_string(),
            Message::WatcherCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::WatcherSignalHandlingNotSupported => "Signal handling not supported on this platform".to_string(),
            Message::InvalidPidFileContent => "Invalid PID file content".to_string(),
            Message::FailedToGetCurrentExecutable(error) => format!("Failed to get current executable path: {}", error),
            Message::DaemonModeNotSupported => "Background mode is not supported on this platform".to_string(),
            Message::FailedToOpenProcess(code) => format!("Failed to open process (error code {})", code),
            Message::FailedToTerminateProcess(code) => format!("Failed to terminate process (error code {})", code),
            Message::ProcessTerminationNotSupported => "Process termination is not supported on this platform".to_string(),
        };
        write!(f, "{}", text)
    }
}
