//! Transcript recorder implementation
//!
//! Records one run's execution metadata for debugging. Directory results are
//! never cached or persisted as data; this is a diagnostic record only.

use crate::error::{Result, TranscriptError};
use crate::transcript::TranscriptEntry;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

/// Records the exchanges and tool activity of a run
pub struct TranscriptRecorder {
    entries: RwLock<Vec<TranscriptEntry>>,
    file_path: Option<PathBuf>,
    auto_save: bool,
}

impl TranscriptRecorder {
    /// Create a new in-memory transcript recorder
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            file_path: None,
            auto_save: false,
        }
    }

    /// Create a transcript recorder that saves to a file after each entry
    pub fn with_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            file_path: Some(path.as_ref().to_path_buf()),
            auto_save: true,
        }
    }

    /// Record a transcript entry
    pub async fn record(&self, entry: TranscriptEntry) -> Result<()> {
        {
            let mut entries = self.entries.write().await;
            entries.push(entry);
        }

        if self.auto_save {
            self.save().await?;
        }

        Ok(())
    }

    /// Get all recorded entries
    pub async fn entries(&self) -> Vec<TranscriptEntry> {
        self.entries.read().await.clone()
    }

    /// Get the number of recorded entries
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Save the transcript to file
    pub async fn save(&self) -> Result<()> {
        if let Some(path) = &self.file_path {
            let entries = self.entries.read().await.clone();
            let json = serde_json::to_string_pretty(&entries).map_err(|e| {
                TranscriptError::RecordingFailed {
                    message: format!("Failed to serialize transcript: {}", e),
                }
            })?;

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }

            fs::write(path, json).await?;
        }

        Ok(())
    }

    /// Get the file path if set
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

impl Default for TranscriptRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolCall;
    use serde_json::json;

    #[tokio::test]
    async fn records_entries_in_order() {
        let recorder = TranscriptRecorder::new();

        recorder
            .record(TranscriptEntry::run_start(
                "who is the supervisor of the employee named David?".to_string(),
                json!({}),
            ))
            .await
            .unwrap();
        recorder
            .record(TranscriptEntry::tool_invocation(
                ToolCall::new("get_employee_id", json!({"employee_name": "David"})),
                1,
            ))
            .await
            .unwrap();

        assert_eq!(recorder.entry_count().await, 2);
        let entries = recorder.entries().await;
        assert!(matches!(
            entries[0].kind,
            crate::transcript::EntryKind::RunStart { .. }
        ));
    }

    #[tokio::test]
    async fn saves_entries_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs").join("transcript.json");
        let recorder = TranscriptRecorder::with_file(&path);

        recorder
            .record(TranscriptEntry::run_complete(
                true,
                "The supervisor for the given employee is Jessica".to_string(),
                2,
                10,
            ))
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let parsed: Vec<TranscriptEntry> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 1);
    }
}
