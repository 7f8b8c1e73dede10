#[cfg(test)]
mod tests {
    use restwatch::libs::daemon::PID_FILE;
    use restwatch::libs::data_storage::{APP_NAME, VENDOR_NAME};
    use restwatch::libs::settings::Settings;
    use std::path::{Path, PathBuf};
    use std::process::{Command, Output};
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    const BIN: &str = env!("CARGO_BIN_EXE_restwatch");

    /// Test context for daemon tests. The binary runs with its own HOME, so the
    /// tests do not touch the process environment.
    struct DaemonTestContext {
        temp_dir: TempDir,
    }

    impl DaemonTestContext {
        fn home(&self) -> &Path {
            self.temp_dir.path()
        }

        fn run(&self, args: &[&str]) -> Output {
            Command::new(BIN)
                .args(args)
                .env("HOME", self.home())
                .env("LOCALAPPDATA", self.home())
                .env_remove("RESTWATCH_DEBUG")
                .env_remove("RUST_LOG")
                .output()
                .expect("Failed to run restwatch")
        }

        fn data_file(&self, name: &str) -> PathBuf {
            // Mirrors DataStorage for the binary's HOME.
            let base = match std::env::consts::OS {
                "windows" => self.home().to_path_buf(),
                "macos" => self.home().join("Library/Application Support"),
                _ => self.home().join(".local/share"),
            };
            base.join(VENDOR_NAME).join(APP_NAME).join(name)
        }
    }

    impl TestContext for DaemonTestContext {
        fn setup() -> Self {
            DaemonTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }

        fn teardown(self) {
            let _ = self.run(&["watch", "--stop"]);
        }
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_stop_when_not_running(ctx: &mut DaemonTestContext) {
        let output = ctx.run(&["watch", "--stop"]);
        assert!(output.status.success(), "{:?}", String::from_utf8_lossy(&output.stderr));
        assert!(stdout(&output).contains("Watcher is not running."));
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_status_when_not_running(ctx: &mut DaemonTestContext) {
        let output = ctx.run(&["status"]);
        assert!(output.status.success());
        assert!(stdout(&output).contains("Watcher is not running."));
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_stop_with_stale_pid_file(ctx: &mut DaemonTestContext) {
        // Make sure the data directory exists before planting the PID file.
        assert!(ctx.run(&["config", "show"]).status.success());
        let pid_path = ctx.data_file(PID_FILE);
        std::fs::write(&pid_path, "garbage").unwrap();

        let output = ctx.run(&["watch", "--stop"]);
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid PID file content"));
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_stop_refuses_group_pids(ctx: &mut DaemonTestContext) {
        assert!(ctx.run(&["config", "show"]).status.success());
        let pid_path = ctx.data_file(PID_FILE);

        for content in ["0", "4294967295", "-1"] {
            std::fs::write(&pid_path, content).unwrap();
            let output = ctx.run(&["watch", "--stop"]);
            assert!(!output.status.success(), "PID {} should be rejected", content);
            assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid PID file content"));
        }
        std::fs::remove_file(&pid_path).unwrap();
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_config_set_and_show(ctx: &mut DaemonTestContext) {
        let output = ctx.run(&["config", "set", "--work-duration", "25", "--end-time", "18:00"]);
        assert!(output.status.success(), "{:?}", String::from_utf8_lossy(&output.stderr));

        let content = std::fs::read_to_string(ctx.data_file("settings.json")).unwrap();
        let settings: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(settings.work_duration_minutes, 25);
        assert_eq!(Settings::format_time(settings.work_end), "18:00");

        let output = ctx.run(&["config", "show"]);
        assert!(stdout(&output).contains("18:00"));

        let output = ctx.run(&["config", "set", "--idle-time", "5"]);
        assert!(!output.status.success());
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_config_set_without_flags_writes_nothing(ctx: &mut DaemonTestContext) {
        let output = ctx.run(&["config", "set"]);
        assert!(output.status.success());
        assert!(stdout(&output).contains("No changes given"));
        assert!(!stdout(&output).contains("Settings saved"));
        assert!(!ctx.data_file("settings.json").exists());
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_watch_lifecycle(ctx: &mut DaemonTestContext) {
        let pid_path = ctx.data_file(PID_FILE);

        // Returns right away: the detached watcher does not hold on to our pipes.
        let output = ctx.run(&["watch"]);
        assert!(output.status.success(), "Failed to start watcher: {:?}", String::from_utf8_lossy(&output.stderr));
        assert!(stdout(&output).contains("Watcher started in the background"));
        thread::sleep(Duration::from_millis(2500));

        let first_pid = std::fs::read_to_string(&pid_path).expect("PID file should exist after starting watch");
        assert!(ctx.data_file("status.json").exists(), "Watcher should report its status");

        // A second start replaces the first watcher.
        assert!(ctx.run(&["watch"]).status.success());
        thread::sleep(Duration::from_millis(1000));
        let second_pid = std::fs::read_to_string(&pid_path).expect("PID file should exist after restart");
        assert_ne!(first_pid.trim(), second_pid.trim());

        let output = ctx.run(&["watch", "--stop"]);
        assert!(output.status.success());
        thread::sleep(Duration::from_millis(500));
        assert!(!pid_path.exists(), "PID file should be removed after stopping");
        assert!(!ctx.data_file("status.json").exists());
    }
}
