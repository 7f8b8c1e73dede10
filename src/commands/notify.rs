use crate::libs::alert::{AlertDispatcher, Presenter, NOTIFICATION_TIMEOUT};
use crate::libs::clock::AlertKind;
use crate::libs::messages::Message;
use crate::libs::presenters::{ConsolePresenter, DesktopPresenter};
use crate::{msg_bail_anyhow, msg_info};
use anyhow::Result;
use clap::Args;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct NotifyArgs {
    /// Show the repeat ("still working") reminder
    #[arg(short, long)]
    repeat: bool,

    /// Print to the terminal instead of a desktop notification
    #[arg(short, long)]
    console: bool,

    /// Return right away instead of waiting to dismiss the notification
    #[arg(long)]
    no_wait: bool,
}

// Fires one reminder through the same dispatcher the watcher uses.
pub async fn cmd(args: NotifyArgs) -> Result<()> {
    let presenter: Box<dyn Presenter> = if args.console {
        Box::new(ConsolePresenter::new())
    } else {
        Box::new(DesktopPresenter::new())
    };
    let mut dispatcher = AlertDispatcher::new(presenter);

    let kind = if args.repeat { AlertKind::Repeat } else { AlertKind::First };
    let shown = dispatcher.dispatch(kind, Instant::now());
    if shown == 0 {
        msg_bail_anyhow!(Message::NotificationNotShown);
    }
    msg_info!(Message::AlertDispatched {
        repeat: kind.is_repeat(),
        displays: shown
    });

    if !args.no_wait {
        tokio::time::sleep(NOTIFICATION_TIMEOUT).await;
        dispatcher.dismiss_expired(Instant::now());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_notification_without_waiting() {
        let args = NotifyArgs {
            repeat: true,
            console: true,
            no_wait: true,
        };
        assert!(cmd(args).await.is_ok());
    }
}
