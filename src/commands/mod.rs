pub mod config;
pub mod init;
pub mod notify;
pub mod status;
pub mod watch;

use crate::libs::daemon;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Edit settings interactively")]
    Init(init::InitArgs),
    #[command(about = "Show or change settings")]
    Config(config::ConfigArgs),
    #[command(about = "Watch keyboard and mouse activity and remind about breaks")]
    Watch(watch::WatchArgs),
    #[command(about = "Show the state of the running watcher")]
    Status,
    #[command(about = "Show a break reminder right now")]
    Notify(notify::NotifyArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Internal: run as the detached watcher process
    #[arg(long, hide = true)]
    daemon_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();

        if cli.daemon_run {
            return daemon::run_with_signal_handling(false).await;
        }

        match cli.command {
            Some(Commands::Init(args)) => init::cmd(args),
            Some(Commands::Config(args)) => config::cmd(args),
            Some(Commands::Watch(args)) => watch::cmd(args).await,
            Some(Commands::Status) => status::cmd(),
            Some(Commands::Notify(args)) => notify::cmd(args).await,
            None => Ok(()),
        }
    }
}
