/// Every user-facing message in the application.
///
/// Text lives in `display.rs`; call sites only pick a variant and pass the
/// dynamic parts.
#[derive(Debug, Clone)]
pub enum Message {
    // === SETTINGS MESSAGES ===
    SettingsSaved,
    SettingsDeleted,
    SettingsFileNotFound,
    SettingsLoadFailed(String),
    SettingsUsingDefaults,
    SettingsReloaded,
    SettingsNothingToChange,
    SettingsWizardHeader,

    // === PROMPTS ===
    PromptWorkDuration,
    PromptRepeatInterval,
    PromptIdleThreshold,
    PromptWorkStart,
    PromptWorkEnd,
    PromptAutostart,

    // === WORK CLOCK STATUS ===
    StatusOutOfHours,
    StatusResting,
    StatusWorking(u64),                // whole minutes worked
    StatusBreakSuggested(i64),         // minutes until the next reminder
    ClockStateChanged(String, String), // from, to
    StatusNotAvailable,

    // === ALERT MESSAGES ===
    AlertTitleFirst,
    AlertBodyFirst,
    AlertTitleRepeat,
    AlertBodyRepeat,
    ConsoleAlert(String, String), // title, body
    AlertDispatched { repeat: bool, displays: usize },
    NotificationShowFailed(String, String), // display, error
    NotificationNotShown,

    // === ACTIVITY MESSAGES ===
    ActivityListenerFailed(String),

    // === MONITOR MESSAGES ===
    MonitorStarted {
        work_duration: u64,
        repeat_interval: u64,
        idle_threshold: u64,
        work_start: String,
        work_end: String,
    },
    MonitorExitedNormally,
    MonitorShuttingDown,
    MonitorError(String),

    // === WATCHER / DAEMON MESSAGES ===
    WatcherStarted(u32),
    WatcherStopped(u32),
    WatcherNotRunning,
    WatcherNotRunningPidNotFound,
    WatcherStartingForeground,
    WatcherStoppingExisting(String),
    WatcherFailedToStopExisting(String),
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String),
    WatcherSignalHandlingNotSupported,
    InvalidPidFileContent,
    FailedToGetCurrentExecutable(String),
    DaemonModeNotSupported,
    FailedToOpenProcess(u32),
    FailedToTerminateProcess(u32),
    ProcessTerminationNotSupported,
}
