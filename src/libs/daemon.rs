//! Background process management for the watch command.
//!
//! Handles the lifecycle of the watcher: detaching it from the terminal,
//! tracking it through a PID file, stopping it, and shutting it down cleanly on
//! SIGINT/SIGTERM/Ctrl+C.

use crate::libs::alert::Presenter;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::monitor::Monitor;
use crate::libs::presenters::{ConsolePresenter, DesktopPresenter};
use crate::libs::settings::Settings;
use crate::libs::status::StatusSnapshot;
use crate::{msg_bail_anyhow, msg_error, msg_error_anyhow, msg_info, msg_warning};
use anyhow::Result;
#[cfg(any(unix, windows))]
use std::process::Stdio;
use std::time::Duration;

pub const PID_FILE: &str = "restwatch-watch.pid";

/// Hidden flag the detached child is started with.
pub const DAEMON_RUN_FLAG: &str = "--daemon-run";

/// Runs the watcher until it fails or a shutdown signal arrives.
///
/// `console` selects the terminal presenter instead of desktop notifications.
pub async fn run_with_signal_handling(console: bool) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::WatcherReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::WatcherReceivedSigint);
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::WatcherReceivedCtrlC);
                }
                Err(e) => {
                    msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        tokio::spawn(async move {
            std::future::pending::<()>().await;
            let _ = shutdown_tx.send(());
        });
        msg_warning!(Message::WatcherSignalHandlingNotSupported);
    }

    // The monitor owns the presenter, which is not required to be Send, so it
    // runs on this task rather than being spawned.
    tokio::select! {
        result = run_monitor(console) => {
            match result {
                Ok(()) => msg_info!(Message::MonitorExitedNormally),
                Err(e) => msg_error!(Message::MonitorError(e.to_string())),
            }
        }
        _ = shutdown_rx => {
            msg_info!(Message::MonitorShuttingDown);
        }
    }

    let _ = StatusSnapshot::clear();

    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if pid_path.exists() && read_pid().ok() == Some(std::process::id()) {
        let _ = std::fs::remove_file(&pid_path);
    }

    Ok(())
}

/// Loads the settings and runs the activity monitor.
async fn run_monitor(console: bool) -> Result<()> {
    let presenter: Box<dyn Presenter> = if console {
        Box::new(ConsolePresenter::new())
    } else {
        Box::new(DesktopPresenter::new())
    };
    let mut monitor = Monitor::new(Settings::read(), presenter);
    monitor.run().await
}

/// Stops a watcher recorded in the PID file, if any, so a new one can take over.
pub fn replace_running() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;

    if pid_path.exists() {
        if let Ok(pid_str) = std::fs::read_to_string(&pid_path) {
            msg_info!(Message::WatcherStoppingExisting(pid_str.trim().to_string()));
            if let Err(e) = stop_internal() {
                msg_warning!(Message::WatcherFailedToStopExisting(e.to_string()));
                // The process may already be dead; drop the stale PID file.
                let _ = std::fs::remove_file(&pid_path);
            }
            std::thread::sleep(Duration::from_millis(1000));
        }
    }

    Ok(())
}

/// Spawns the application as a detached background process.
/// If a watcher is already running, it is stopped first.
pub fn spawn() -> Result<()> {
    replace_running()?;
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    let current_exe = std::env::current_exe().map_err(|e| msg_error_anyhow!(Message::FailedToGetCurrentExecutable(e.to_string())))?;

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let mut command = std::process::Command::new(current_exe);
        command
            .arg(DAEMON_RUN_FLAG)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        // SAFETY: setsid is async-signal-safe and touches no parent state.
        unsafe {
            command.pre_exec(|| {
                nix::unistd::setsid()?;
                Ok(())
            });
        }
        let child = command.spawn()?;
        let pid = child.id();
        std::fs::write(pid_path, pid.to_string())?;
        msg_info!(Message::WatcherStarted(pid));
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        let child = std::process::Command::new(current_exe)
            .arg(DAEMON_RUN_FLAG)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .creation_flags(CREATE_NO_WINDOW)
            .spawn()?;
        let pid = child.id();
        std::fs::write(pid_path, pid.to_string())?;
        msg_info!(Message::WatcherStarted(pid));
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = (current_exe, pid_path);
        msg_bail_anyhow!(Message::DaemonModeNotSupported);
    }

    Ok(())
}

/// Finds and stops the running watcher.
pub fn stop() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if !pid_path.exists() {
        msg_info!(Message::WatcherNotRunning);
        return Ok(());
    }
    stop_internal()
}

/// Records the current process as the watcher, used by foreground runs.
pub fn write_own_pid() -> Result<()> {
    replace_running()?;
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    std::fs::write(pid_path, std::process::id().to_string())?;
    Ok(())
}

/// Reads the PID recorded in the PID file.
///
/// Only positive values that fit an `i32` are accepted. `0` and negative PIDs
/// address process groups.
pub fn read_pid() -> Result<u32> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if !pid_path.exists() {
        msg_bail_anyhow!(Message::WatcherNotRunningPidNotFound);
    }
    let pid_str = std::fs::read_to_string(&pid_path)?;
    parse_pid(&pid_str).ok_or_else(|| msg_error_anyhow!(Message::InvalidPidFileContent))
}

fn parse_pid(content: &str) -> Option<u32> {
    let pid: i32 = content.trim().parse().ok()?;
    u32::try_from(pid).ok().filter(|pid| *pid > 0)
}

fn stop_internal() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    let pid = read_pid()?;

    let killed = kill_process(pid)?;

    // The watcher removes its own PID file on a graceful exit; clean up in
    // case it was killed or never existed.
    if pid_path.exists() {
        let _ = std::fs::remove_file(&pid_path);
    }
    let _ = StatusSnapshot::clear();

    if killed {
        msg_info!(Message::WatcherStopped(pid));
        Ok(())
    } else {
        msg_info!(Message::WatcherNotRunning);
        Ok(())
    }
}

#[cfg(windows)]
fn kill_process(pid: u32) -> Result<bool> {
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
    use winapi::um::winnt::PROCESS_TERMINATE;

    unsafe {
        let handle = OpenProcess(PROCESS_TERMINATE, 0, pid);
        if handle.is_null() {
            let error = GetLastError();
            if error == 87 {
                // ERROR_INVALID_PARAMETER: no such process
                return Ok(false);
            }
            msg_bail_anyhow!(Message::FailedToOpenProcess(error));
        }

        let result = TerminateProcess(handle, 0);
        CloseHandle(handle);

        if result == 0 {
            let error = GetLastError();
            msg_bail_anyhow!(Message::FailedToTerminateProcess(error));
        }

        std::thread::sleep(Duration::from_millis(100));
        Ok(true)
    }
}

#[cfg(unix)]
fn kill_process(pid: u32) -> Result<bool> {
    use nix::errno::Errno;
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let pid = match i32::try_from(pid) {
        Ok(raw) if raw > 0 => Pid::from_raw(raw),
        _ => msg_bail_anyhow!(Message::InvalidPidFileContent),
    };

    match kill(pid, None) {
        Ok(()) => {}
        Err(Errno::ESRCH) => return Ok(false),
        Err(e) => return Err(e.into()),
    }

    kill(pid, Signal::SIGTERM)?;

    for _ in 0..10 {
        std::thread::sleep(Duration::from_millis(100));
        if kill(pid, None) == Err(Errno::ESRCH) {
            return Ok(true);
        }
    }

    // Didn't exit after SIGTERM, force it.
    let _ = kill(pid, Signal::SIGKILL);
    std::thread::sleep(Duration::from_millis(100));
    Ok(true)
}

#[cfg(not(any(unix, windows)))]
fn kill_process(_pid: u32) -> Result<bool> {
    msg_bail_anyhow!(Message::ProcessTerminationNotSupported);
}
