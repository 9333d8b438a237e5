use std::path::Path;

use tokio::fs;
use tracing::warn;

use crate::{
    error::{Result, SmashcutError},
    parser::parse_srt,
    types::{ParsedTranscript, TimeSegment},
};

/// Reject anything that is not named `*.srt` (case-insensitive).
pub fn validate_srt_name(file_name: &str) -> Result<()> {
    if file_name.to_lowercase().ends_with(".srt") {
        Ok(())
    } else {
        Err(SmashcutError::InvalidFileType {
            file_name: file_name.to_string(),
        })
    }
}

/// Validate, read and parse a subtitle file from disk.
///
/// The name check runs before the file is touched.
pub async fn load_srt_file(path: &Path) -> Result<ParsedTranscript> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    validate_srt_name(&file_name)?;

    let content = fs::read_to_string(path)
        .await
        .map_err(|source| SmashcutError::ReadFailed {
            file_name: file_name.clone(),
            source,
        })?;

    parse_srt(&content, &file_name)
}

#[derive(Debug, Clone, Default)]
pub enum ParseStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Ready(ParsedTranscript),
}

/// Holds at most one live transcript. Each load replaces the previous one.
#[derive(Debug, Default)]
pub struct TranscriptSession {
    status: ParseStatus,
}

impl TranscriptSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &ParseStatus {
        &self.status
    }

    pub fn transcript(&self) -> Option<&ParsedTranscript> {
        match &self.status {
            ParseStatus::Ready(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ParseStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ParseStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Drop the current transcript and mark a read as in flight.
    pub fn begin_load(&mut self) {
        self.status = ParseStatus::Loading;
    }

    /// Record the outcome of a read started with [`TranscriptSession::begin_load`].
    pub fn finish_load(&mut self, result: Result<ParsedTranscript>) -> &ParseStatus {
        self.status = match result {
            Ok(transcript) => ParseStatus::Ready(transcript),
            Err(e) => {
                warn!(error = %e, "subtitle load failed");
                ParseStatus::Failed(e.to_string())
            }
        };
        &self.status
    }

    /// Load a file, dropping whatever was loaded before.
    pub async fn load(&mut self, path: &Path) -> &ParseStatus {
        self.begin_load();
        let result = load_srt_file(path).await;
        self.finish_load(result)
    }

    pub fn clear(&mut self) {
        self.status = ParseStatus::Idle;
    }

    /// Flattened transcript, or an empty string when nothing is loaded.
    pub fn transcript_text(&self) -> String {
        self.transcript()
            .map(ParsedTranscript::flatten_to_transcript)
            .unwrap_or_default()
    }

    pub fn segments(&self, interval_minutes: f64) -> Result<Vec<TimeSegment<'_>>> {
        match self.transcript() {
            Some(t) => t.segment_by_interval(interval_minutes),
            None => Ok(Vec::new()),
        }
    }
}
