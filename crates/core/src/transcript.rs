use crate::types::{ParsedTranscript, SubtitleEntry};

impl ParsedTranscript {
    /// Build a transcript from entries already sorted by start time.
    pub fn from_entries(entries: Vec<SubtitleEntry>, source_name: &str) -> Self {
        let total_duration_seconds = entries.last().map(|e| e.end_seconds).unwrap_or(0.0);
        let word_count = entries.iter().map(SubtitleEntry::word_count).sum();

        Self {
            entries,
            total_duration_seconds,
            word_count,
            source_name: source_name.to_string(),
        }
    }

    /// One `[start - end] text` line per entry, joined with newlines.
    ///
    /// This is the transcript body handed to the analysis prompt as-is.
    pub fn flatten_to_transcript(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("[{} - {}] {}", e.start_time, e.end_time, e.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_srt;

    fn entry(start: f64, end: f64, text: &str) -> SubtitleEntry {
        SubtitleEntry {
            sequence_index: 1,
            start_time: crate::format_timestamp(start),
            end_time: crate::format_timestamp(end),
            start_seconds: start,
            end_seconds: end,
            text: text.to_string(),
        }
    }

    #[test]
    fn counts_whitespace_delimited_words() {
        let transcript = ParsedTranscript::from_entries(
            vec![entry(0.0, 1.0, "Hello world"), entry(1.0, 2.0, "Foo")],
            "a.srt",
        );
        assert_eq!(transcript.word_count, 3);
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        let transcript =
            ParsedTranscript::from_entries(vec![entry(0.0, 1.0, "  a\n\tb   c ")], "a.srt");
        assert_eq!(transcript.word_count, 3);
    }

    #[test]
    fn duration_is_end_of_last_entry() {
        let transcript = ParsedTranscript::from_entries(
            vec![entry(0.0, 100.0, "long"), entry(5.0, 6.0, "short")],
            "a.srt",
        );
        assert_eq!(transcript.total_duration_seconds, 6.0);
    }

    #[test]
    fn empty_entries_give_zero_duration() {
        let transcript = ParsedTranscript::from_entries(Vec::new(), "a.srt");
        assert_eq!(transcript.total_duration_seconds, 0.0);
        assert_eq!(transcript.flatten_to_transcript(), "");
        assert!(transcript.is_empty());
    }

    #[test]
    fn end_to_end_flattening() {
        let input = "1\n00:00:01,000 --> 00:00:03,000\nHello world\n\n2\n00:00:05,000 --> 00:00:07,500\nFoo bar baz";
        let transcript = parse_srt(input, "clip.srt").unwrap();

        assert_eq!(transcript.entries.len(), 2);
        assert_eq!(transcript.total_duration_seconds, 7.5);
        assert_eq!(transcript.word_count, 5);
        assert_eq!(transcript.source_name, "clip.srt");
        assert_eq!(
            transcript.flatten_to_transcript(),
            "[00:00:01,000 - 00:00:03,000] Hello world\n[00:00:05,000 - 00:00:07,500] Foo bar baz"
        );
    }
}
