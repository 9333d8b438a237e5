use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::{
    error::{Result, SmashcutError},
    timestamp::parse_timestamp,
    types::{ParsedTranscript, SubtitleEntry},
};

static BLOCK_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("block separator pattern is valid"));

static TIMING_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2}[,.]\d{3})")
        .expect("timing line pattern is valid")
});

/// Why a block was left out of the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    TooFewLines,
    BadIndex,
    BadTimingLine,
}

/// Parse SRT content into a sorted list of entries.
///
/// Malformed blocks are skipped; an empty result is not an error here.
pub fn parse_entries(content: &str) -> Vec<SubtitleEntry> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

    let mut entries = Vec::new();
    for (block_no, block) in BLOCK_SEPARATOR_RE.split(&normalized).enumerate() {
        match parse_block(block) {
            Ok(entry) => entries.push(entry),
            Err(reason) => debug!(block = block_no, ?reason, "skipping subtitle block"),
        }
    }

    // Vec::sort_by is stable: equal start times keep file order.
    entries.sort_by(|a, b| a.start_seconds.total_cmp(&b.start_seconds));
    entries
}

fn parse_block(block: &str) -> std::result::Result<SubtitleEntry, Rejection> {
    let lines: Vec<&str> = block.trim().split('\n').collect();
    if lines.len() < 3 {
        return Err(Rejection::TooFewLines);
    }

    let sequence_index = lines[0]
        .trim()
        .parse::<i64>()
        .map_err(|_| Rejection::BadIndex)?;

    let caps = TIMING_LINE_RE
        .captures(lines[1])
        .ok_or(Rejection::BadTimingLine)?;
    let start_time = canonical_timestamp(&caps[1]);
    let end_time = canonical_timestamp(&caps[2]);

    let text = lines[2..].join("\n").trim().to_string();

    Ok(SubtitleEntry {
        sequence_index,
        start_seconds: parse_timestamp(&start_time),
        end_seconds: parse_timestamp(&end_time),
        start_time,
        end_time,
        text,
    })
}

fn canonical_timestamp(raw: &str) -> String {
    raw.replace('.', ",")
}

/// Parse a whole subtitle file into a [`ParsedTranscript`].
///
/// Fails only when no block survives validation.
pub fn parse_srt(content: &str, source_name: &str) -> Result<ParsedTranscript> {
    let entries = parse_entries(content);
    if entries.is_empty() {
        return Err(SmashcutError::NoEntries {
            file_name: source_name.to_string(),
        });
    }

    let transcript = ParsedTranscript::from_entries(entries, source_name);
    info!(
        source = source_name,
        entries = transcript.entries.len(),
        words = transcript.word_count,
        duration_seconds = transcript.total_duration_seconds,
        "parsed subtitle file"
    );
    Ok(transcript)
}
