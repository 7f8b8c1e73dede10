use crate::libs::daemon;
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Run in the current terminal instead of detaching
    #[arg(short, long)]
    foreground: bool,

    /// Stop the background watcher
    #[arg(short, long, conflicts_with_all = ["foreground", "console"])]
    stop: bool,

    /// Print reminders to the terminal instead of desktop notifications (implies --foreground)
    #[arg(short, long)]
    console: bool,
}

// Starts, stops, or runs the watcher.
pub async fn cmd(args: WatchArgs) -> Result<()> {
    if args.stop {
        return daemon::stop();
    }

    if args.foreground || args.console {
        msg_info!(Message::WatcherStartingForeground);
        daemon::write_own_pid()?;
        return daemon::run_with_signal_handling(args.console).await;
    }

    daemon::spawn()
}
