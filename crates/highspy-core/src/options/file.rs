//! Options files: one `name = value` per line, `#` starts a comment.

use std::fs;
use std::path::Path;

use tracing::info;

use super::{HighsOptions, OPTION_SPECS};
use crate::error::HighsError;

impl HighsOptions {
    /// Apply every assignment in `text`. Either all lines apply or none do.
    pub fn parse_str(&mut self, text: &str) -> Result<(), HighsError> {
        let mut updated = self.clone();
        for (number, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let Some((name, value)) = line.split_once('=') else {
                return Err(HighsError::OptionFile {
                    line: number + 1,
                    reason: format!("expected \"name = value\", got \"{}\"", line),
                });
            };
            updated
                .set_from_str(name.trim(), value)
                .map_err(|err| HighsError::OptionFile {
                    line: number + 1,
                    reason: err.to_string(),
                })?;
        }
        *self = updated;
        Ok(())
    }

    /// Read and apply an options file.
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> Result<(), HighsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| HighsError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        self.parse_str(&text)?;
        info!(
            component = "options",
            operation = "read_file",
            status = "ok",
            path = %path.display(),
            "Options file applied"
        );
        Ok(())
    }

    /// Render options, each preceded by a comment with its type, range and
    /// default.
    pub fn to_file_string(&self, only_non_default: bool) -> String {
        let mut out = String::new();
        for (spec, value) in OPTION_SPECS.iter().zip(&self.values) {
            if only_non_default && spec.default_value() == *value {
                continue;
            }
            out.push_str(&format!("# {}\n", spec.description));
            out.push_str(&format!("# {}\n", spec.describe()));
            out.push_str(&format!("{} = {}\n\n", spec.name, value));
        }
        out
    }

    pub fn write_file(
        &self,
        path: impl AsRef<Path>,
        only_non_default: bool,
    ) -> Result<(), HighsError> {
        let path = path.as_ref();
        fs::write(path, self.to_file_string(only_non_default)).map_err(|err| HighsError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::OptionValue;
    use super::*;

    #[test]
    fn test_parse_with_comments_and_blank_lines() {
        let mut options = HighsOptions::new();
        options
            .parse_str("# settings\n\npresolve = off\ntime_limit = 30 # seconds\n")
            .unwrap();
        assert_eq!(
            options.get("presolve"),
            Ok(&OptionValue::String("off".to_string()))
        );
        assert_eq!(options.get("time_limit"), Ok(&OptionValue::Double(30.0)));
    }

    #[test]
    fn test_parse_is_atomic() {
        let mut options = HighsOptions::new();
        let err = options
            .parse_str("presolve = off\nthreads = many\n")
            .unwrap_err();
        assert_eq!(err.code(), "OPTION_FILE_PARSE");
        assert!(err.to_string().contains("line 2"));
        assert_eq!(options, HighsOptions::new());

        assert!(options.parse_str("presolve off").is_err());
    }

    #[test]
    fn test_written_file_reads_back() {
        let mut options = HighsOptions::new();
        options.set("mip_rel_gap", 1e-3).unwrap();
        options.set("log_to_console", false).unwrap();
        options.set("solver", "ipm").unwrap();

        let text = options.to_file_string(true);
        assert!(text.contains("mip_rel_gap = 0.001"));
        assert!(!text.contains("presolve ="));

        let mut reread = HighsOptions::new();
        reread.parse_str(&text).unwrap();
        assert_eq!(reread, options);

        let mut full = HighsOptions::new();
        full.parse_str(&options.to_file_string(false)).unwrap();
        assert_eq!(full, options);
    }

    #[test]
    fn test_file_round_trip_on_disk() {
        let path = std::env::temp_dir().join(format!("highspy-options-{}.txt", std::process::id()));
        let mut options = HighsOptions::new();
        options.set("random_seed", 7).unwrap();
        options.write_file(&path, true).unwrap();

        let mut reread = HighsOptions::new();
        reread.read_file(&path).unwrap();
        assert_eq!(reread.get("random_seed"), Ok(&OptionValue::Int(7)));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let err = HighsOptions::new()
            .read_file("/nonexistent/highspy/options.txt")
            .unwrap_err();
        assert_eq!(err.code(), "IO_FAILED");
    }
}
