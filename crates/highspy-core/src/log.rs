//! Bridge from HiGHS log categories to `tracing`.

use tracing::Level;

use crate::enums::HighsLogType;

impl HighsLogType {
    /// Tracing level used for messages of this category.
    pub fn level(self) -> Level {
        match self {
            HighsLogType::Info => Level::INFO,
            HighsLogType::Detailed => Level::DEBUG,
            HighsLogType::Verbose => Level::TRACE,
            HighsLogType::Warning => Level::WARN,
            HighsLogType::Error => Level::ERROR,
        }
    }
}

/// Emit `message` at the level matching `log_type`.
pub fn highs_log(log_type: HighsLogType, operation: &str, message: &str) {
    let level = log_type.level();
    if level == Level::ERROR {
        tracing::error!(component = "highs", operation = operation, "{}", message);
    } else if level == Level::WARN {
        tracing::warn!(component = "highs", operation = operation, "{}", message);
    } else if level == Level::INFO {
        tracing::info!(component = "highs", operation = operation, "{}", message);
    } else if level == Level::DEBUG {
        tracing::debug!(component = "highs", operation = operation, "{}", message);
    } else {
        tracing::trace!(component = "highs", operation = operation, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_levels() {
        assert_eq!(HighsLogType::Info.level(), Level::INFO);
        assert_eq!(HighsLogType::Verbose.level(), Level::TRACE);
        assert_eq!(HighsLogType::Error.level(), Level::ERROR);
    }

    #[test]
    fn test_messages_use_category_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            highs_log(HighsLogType::Warning, "run", "model is infeasible");
            highs_log(HighsLogType::Detailed, "run", "model status optimal");
            highs_log(HighsLogType::Verbose, "run", "hidden below debug");
        });

        let out = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let line = |needle: &str| out.lines().find(|l| l.contains(needle)).map(str::to_string);
        assert!(line("model is infeasible").is_some_and(|l| l.contains("WARN")));
        assert!(line("model status optimal").is_some_and(|l| l.contains("DEBUG")));
        assert!(line("hidden below debug").is_none());
    }
}
