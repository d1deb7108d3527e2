use crate::library::logger::interface::Logger;
use chrono::Utc;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn tag(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: chrono::FixedOffset,
}

impl LoggerConsole {
    pub fn new(timezone: chrono::FixedOffset) -> Self {
        Self {
            namespace: None,
            timezone,
        }
    }

    fn format_line(&self, level: Level, message: &str) -> String {
        let utc_now = Utc::now();
        let local_time = utc_now.with_timezone(&self.timezone);
        let formatted = local_time.format("%Y-%m-%d %H:%M:%S%.3f");
        match &self.namespace {
            Some(namespace) => format!(
                "[{}] {} {}: {}",
                formatted,
                level.tag(),
                namespace,
                message
            ),
            None => format!("[{}] {} {}", formatted, level.tag(), message),
        }
    }

    fn write(&self, level: Level, message: &str) {
        let line = self.format_line(level, message);
        // stdout is shared with the console display
        if level == Level::Info {
            println!("{}", line);
        } else {
            eprintln!("{}", line);
        }
    }
}

impl Logger for LoggerConsole {
    fn info(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.write(Level::Info, message);
        Ok(())
    }

    fn warn(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.write(Level::Warn, message);
        Ok(())
    }

    fn error(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.write(Level::Error, message);
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerConsole {
            namespace: Some(new_namespace),
            timezone: self.timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_are_joined() {
        let logger = LoggerConsole {
            namespace: Some("waste_sorter".to_string()),
            timezone: chrono::FixedOffset::east_opt(0).unwrap(),
        };

        let line = logger.format_line(Level::Warn, "camera fallback");

        assert!(line.contains("WARN waste_sorter: camera fallback"));
    }

    #[test]
    fn test_without_namespace() {
        let logger = LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap());

        let line = logger.format_line(Level::Info, "ready");

        assert!(line.ends_with("INFO ready"));
    }
}
