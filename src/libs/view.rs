use super::settings::Settings;
use super::status::StatusSnapshot;
use chrono::Local;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn settings(settings: &Settings) {
        let mut table = Table::new();

        table.add_row(row!["SETTING", "VALUE"]);
        table.add_row(row!["work_duration (min)", settings.work_duration_minutes]);
        table.add_row(row!["repeat_interval (min)", settings.repeat_interval_minutes]);
        table.add_row(row!["idle_time (s)", settings.idle_threshold_seconds]);
        table.add_row(row!["start_time", Settings::format_time(settings.work_start)]);
        table.add_row(row!["end_time", Settings::format_time(settings.work_end)]);
        table.add_row(row!["autostart", settings.autostart_enabled]);
        table.printstd();
    }

    pub fn status(status: &StatusSnapshot) {
        let mut table = Table::new();

        table.add_row(row!["STATUS", "STATE", "WORK", "SINCE REMINDER", "PID", "UPDATED"]);
        table.add_row(row![
            status.status_line,
            format!("{:?}", status.state),
            format_seconds(status.work_seconds),
            format_seconds(status.repeat_seconds),
            status.pid,
            format!("{}s ago", status.age_secs(Local::now()).max(0))
        ]);
        table.printstd();
    }
}

/// Formats a second count as `HH:MM:SS`.
pub fn format_seconds(seconds: u64) -> String {
    format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "00:00:00");
        assert_eq!(format_seconds(2700), "00:45:00");
        assert_eq!(format_seconds(3723), "01:02:03");
    }
}
