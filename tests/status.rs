#[cfg(test)]
mod tests {
    use chrono::{Duration as ChronoDuration, Local, NaiveTime};
    use parking_lot::{Mutex, MutexGuard};
    use restwatch::libs::clock::{ClockState, WorkClock};
    use restwatch::libs::settings::Settings;
    use restwatch::libs::status::StatusSnapshot;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct StatusTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for StatusTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            StatusTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    fn working_clock(ticks: u64) -> WorkClock {
        let mut clock = WorkClock::new(Settings {
            work_start: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            work_end: NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
            ..Default::default()
        });
        for _ in 0..ticks {
            clock.tick(NaiveTime::from_hms_opt(11, 0, 0).unwrap(), Duration::ZERO);
        }
        clock
    }

    #[test_context(StatusTestContext)]
    #[test]
    fn test_no_snapshot_before_first_write(_ctx: &mut StatusTestContext) {
        assert_eq!(StatusSnapshot::read().unwrap(), None);
        StatusSnapshot::clear().unwrap();
    }

    #[test_context(StatusTestContext)]
    #[test]
    fn test_write_then_read(_ctx: &mut StatusTestContext) {
        let now = Local::now();
        let snapshot = StatusSnapshot::capture(&working_clock(150), now);
        assert_eq!(snapshot.state, ClockState::Active);
        assert_eq!(snapshot.status_line, "Working (2 min)");
        assert_eq!(snapshot.pid, std::process::id());

        snapshot.write().unwrap();
        let stored = StatusSnapshot::read().unwrap().unwrap();
        assert_eq!(stored.work_seconds, 150);
        assert_eq!(stored.repeat_seconds, 0);
        assert!(!stored.reminded);
        assert_eq!(stored.status_line, snapshot.status_line);
        assert_eq!(stored.updated_at.timestamp(), now.timestamp());

        StatusSnapshot::clear().unwrap();
        assert_eq!(StatusSnapshot::read().unwrap(), None);
    }

    #[test_context(StatusTestContext)]
    #[test]
    fn test_snapshot_age(_ctx: &mut StatusTestContext) {
        let written = Local::now();
        let snapshot = StatusSnapshot::capture(&working_clock(1), written);
        assert_eq!(snapshot.age_secs(written + ChronoDuration::seconds(42)), 42);
    }
}
