//! Non-interactive settings access.
//!
//! `config show` prints the effective settings; `config set` changes one or
//! more fields, validating them with the same ranges as the interactive editor.

use crate::libs::messages::Message;
use crate::libs::settings::Settings;
use crate::libs::view::View;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the current settings
    Show,
    /// Change one or more settings
    Set(SetArgs),
}

#[derive(Debug, Default, Args)]
pub struct SetArgs {
    /// Minutes of continuous work before the first reminder (1-180)
    #[arg(long)]
    pub work_duration: Option<u64>,

    /// Minutes between repeat reminders (1-120)
    #[arg(long)]
    pub repeat_interval: Option<u64>,

    /// Seconds without input before you count as away (10-300)
    #[arg(long)]
    pub idle_time: Option<u64>,

    /// Start of the work window, HH:MM
    #[arg(long)]
    pub start_time: Option<String>,

    /// End of the work window, HH:MM
    #[arg(long)]
    pub end_time: Option<String>,

    /// Remember whether to start with the session
    #[arg(long)]
    pub autostart: Option<bool>,
}

impl SetArgs {
    /// True when no setting was given on the command line.
    pub fn is_empty(&self) -> bool {
        self.work_duration.is_none()
            && self.repeat_interval.is_none()
            && self.idle_time.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.autostart.is_none()
    }
}

pub fn cmd(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            View::settings(&Settings::read());
            Ok(())
        }
        ConfigCommand::Set(set_args) => {
            if set_args.is_empty() {
                msg_info!(Message::SettingsNothingToChange);
                return Ok(());
            }
            let updated = apply(Settings::read(), &set_args)?;
            updated.save()?;
            msg_success!(Message::SettingsSaved);
            View::settings(&updated);
            Ok(())
        }
    }
}

/// Applies the given changes and validates the result.
///
/// Nothing is written when any value is out of range or malformed.
pub fn apply(mut settings: Settings, args: &SetArgs) -> Result<Settings> {
    if let Some(value) = args.work_duration {
        settings.work_duration_minutes = value;
    }
    if let Some(value) = args.repeat_interval {
        settings.repeat_interval_minutes = value;
    }
    if let Some(value) = args.idle_time {
        settings.idle_threshold_seconds = value;
    }
    if let Some(value) = &args.start_time {
        settings.work_start = Settings::parse_time(value)?;
    }
    if let Some(value) = &args.end_time {
        settings.work_end = Settings::parse_time(value)?;
    }
    if let Some(value) = args.autostart {
        settings.autostart_enabled = value;
    }

    settings.validate()?;
    Ok(settings)
}
