/// Football Updates: Logger
/// JSONL event stream, one file per UTC day

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub struct EventLogger {
    log_dir: PathBuf,
}

impl EventLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        let dir = log_dir.into();
        fs::create_dir_all(&dir).ok();
        Self { log_dir: dir }
    }

    pub fn log<T: Serialize>(&self, event: &T) -> Result<()> {
        let date  = Utc::now().format("%Y-%m-%d").to_string();
        let path  = self.log_dir.join(format!("{date}.jsonl"));
        let line  = serde_json::to_string(event)?;
        let mut f = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(f, "{line}")?;
        Ok(())
    }
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

// ── Event types ──────────────────────────────────────────────────────────────

/// One line per finished update cycle.
#[derive(Serialize, Debug)]
pub struct CycleEvent {
    pub ts:         String,
    pub event:      &'static str,   // "UPDATE_CYCLE"
    pub outcome:    String,         // "NO_MATCHES" | "FETCH_FAILED" | "DISPATCHED" | "DISPATCH_FAILED" | "SKIPPED"
    pub matches:    usize,          // records in the fetched batch
    pub dispatched: usize,          // successful sends
    pub error:      Option<String>,
}

#[derive(Serialize, Debug)]
pub struct DispatchEvent {
    pub ts:      String,
    pub event:   &'static str,      // "TELEX_DISPATCH"
    pub message: String,
    pub score:   String,
    pub ok:      bool,
    pub error:   Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("football-updates-logger-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn log_appends_one_json_line_per_event() {
        let dir = scratch_dir("append");
        let logger = EventLogger::new(&dir);

        for score in ["1-0", "2-0"] {
            logger.log(&DispatchEvent {
                ts:      now_iso(),
                event:   "TELEX_DISPATCH",
                message: "Match: Arsenal vs Chelsea:".to_string(),
                score:   score.to_string(),
                ok:      true,
                error:   None,
            }).unwrap();
        }

        let date = Utc::now().format("%Y-%m-%d").to_string();
        let contents = fs::read_to_string(dir.join(format!("{date}.jsonl"))).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "TELEX_DISPATCH");
        assert_eq!(first["score"], "1-0");
        assert!(first["error"].is_null());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn new_creates_missing_directory() {
        let dir = scratch_dir("create").join("nested");
        let _logger = EventLogger::new(&dir);
        assert!(dir.is_dir());
        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }
}
