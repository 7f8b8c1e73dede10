//! Interactive settings editor.
//!
//! Walks through every setting, offering the current value as the default.
//! A running watcher notices the saved file on its next tick.

use crate::{
    libs::{messages::Message, settings::Settings},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the settings file instead, restoring the defaults
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        if Settings::delete()? {
            msg_success!(Message::SettingsDeleted);
        } else {
            msg_info!(Message::SettingsFileNotFound);
        }
        return Ok(());
    }

    Settings::init()?.save()?;
    msg_success!(Message::SettingsSaved);
    Ok(())
}
