use crate::libs::daemon;
use crate::libs::messages::Message;
use crate::libs::status::StatusSnapshot;
use crate::libs::view::View;
use crate::{msg_info, msg_warning};
use anyhow::Result;

// Prints the snapshot written by the running watcher.
pub fn cmd() -> Result<()> {
    if daemon::read_pid().is_err() {
        msg_info!(Message::WatcherNotRunning);
        return Ok(());
    }

    match StatusSnapshot::read()? {
        Some(status) => View::status(&status),
        None => msg_warning!(Message::StatusNotAvailable),
    }
    Ok(())
}
