use serde::{Deserialize, Serialize};

/// One parsed subtitle cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    /// Ordinal declared in the file. Not guaranteed unique or monotonic.
    pub sequence_index: i64,
    /// `HH:MM:SS,mmm`
    pub start_time: String,
    /// `HH:MM:SS,mmm`
    pub end_time: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
}

impl SubtitleEntry {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Result of parsing one subtitle file. Entries are sorted by start time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTranscript {
    pub entries: Vec<SubtitleEntry>,
    pub total_duration_seconds: f64,
    pub word_count: usize,
    pub source_name: String,
}

/// A fixed-duration bucket of cues, see [`ParsedTranscript::segment_by_interval`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSegment<'a> {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
    pub entries: Vec<&'a SubtitleEntry>,
}
