use log::{Level, LevelFilter, Log, Metadata, Record};

/// Component-tagged logging to the browser console
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(Level::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(Level::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(Level::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(Level::Error, component, message);
    }

    fn log(level: Level, component: &str, message: &str) {
        let line = format!("[{}] {}", component, message);

        match level {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }
}

/// Routes `log` facade records (e.g. from the shared crate) through [`Logger`]
struct ConsoleLog;

static CONSOLE_LOG: ConsoleLog = ConsoleLog;

impl Log for ConsoleLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        Logger::log(record.level(), record.target(), &record.args().to_string());
    }

    fn flush(&self) {}
}

/// Install the console logger. Later calls are ignored.
pub fn init(level: LevelFilter) {
    if log::set_logger(&CONSOLE_LOG).is_ok() {
        log::set_max_level(level);
    }
}
