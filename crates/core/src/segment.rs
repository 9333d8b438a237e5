use crate::{
    error::{Result, SmashcutError},
    types::{ParsedTranscript, SubtitleEntry, TimeSegment},
};

pub const DEFAULT_INTERVAL_MINUTES: f64 = 5.0;

impl ParsedTranscript {
    /// Group entries into fixed-size buckets by start time.
    ///
    /// An entry lands in the bucket starting at
    /// `floor(start / interval) * interval`. A new bucket opens whenever that
    /// boundary changes, so empty intervals produce no segment. The last
    /// segment ends at the transcript duration instead of an interval boundary.
    pub fn segment_by_interval(&self, interval_minutes: f64) -> Result<Vec<TimeSegment<'_>>> {
        if !interval_minutes.is_finite() || interval_minutes <= 0.0 {
            return Err(SmashcutError::InvalidInterval {
                minutes: interval_minutes,
            });
        }
        let interval_seconds = interval_minutes * 60.0;

        let mut segments = Vec::new();
        let mut current: Option<(f64, Vec<&SubtitleEntry>)> = None;

        for entry in &self.entries {
            let bucket_start = (entry.start_seconds / interval_seconds).floor() * interval_seconds;

            if let Some((start, members)) = current.as_mut() {
                if *start == bucket_start {
                    members.push(entry);
                    continue;
                }
            }

            if let Some((start, members)) = current.take() {
                segments.push(build_segment(start, start + interval_seconds, members));
            }
            current = Some((bucket_start, vec![entry]));
        }

        if let Some((start, members)) = current {
            segments.push(build_segment(start, self.total_duration_seconds, members));
        }

        Ok(segments)
    }
}

fn build_segment(start: f64, end: f64, entries: Vec<&SubtitleEntry>) -> TimeSegment<'_> {
    let text = entries
        .iter()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    TimeSegment {
        start_seconds: start,
        end_seconds: end,
        text,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_timestamp;

    fn transcript(starts: &[f64]) -> ParsedTranscript {
        let entries = starts
            .iter()
            .enumerate()
            .map(|(i, &start)| SubtitleEntry {
                sequence_index: i as i64 + 1,
                start_time: format_timestamp(start),
                end_time: format_timestamp(start + 2.0),
                start_seconds: start,
                end_seconds: start + 2.0,
                text: format!("line {}", i + 1),
            })
            .collect();
        ParsedTranscript::from_entries(entries, "test.srt")
    }

    #[test]
    fn groups_by_five_minute_boundary() {
        let t = transcript(&[10.0, 290.0, 305.0]);
        let segments = t.segment_by_interval(DEFAULT_INTERVAL_MINUTES).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start_seconds, 0.0);
        assert_eq!(segments[0].end_seconds, 300.0);
        assert_eq!(segments[0].entries.len(), 2);
        assert_eq!(segments[0].text, "line 1 line 2");
        assert_eq!(segments[1].start_seconds, 300.0);
        assert_eq!(segments[1].entries.len(), 1);
    }

    #[test]
    fn last_segment_ends_at_total_duration() {
        let t = transcript(&[10.0, 305.0]);
        let segments = t.segment_by_interval(5.0).unwrap();
        assert_eq!(segments.last().unwrap().end_seconds, 307.0);
    }

    #[test]
    fn gaps_do_not_produce_empty_segments() {
        let t = transcript(&[0.0, 1000.0]);
        let segments = t.segment_by_interval(1.0).unwrap();
        let starts: Vec<f64> = segments.iter().map(|s| s.start_seconds).collect();
        assert_eq!(starts, vec![0.0, 960.0]);
    }

    #[test]
    fn every_entry_lands_in_exactly_one_segment() {
        let t = transcript(&[0.0, 59.9, 60.0, 61.0, 125.0, 179.0, 180.0]);
        let segments = t.segment_by_interval(1.0).unwrap();
        let total: usize = segments.iter().map(|s| s.entries.len()).sum();
        assert_eq!(total, t.entries.len());
        assert_eq!(segments.len(), 4);
    }

    #[test]
    fn fractional_interval_is_allowed() {
        let t = transcript(&[0.0, 20.0, 40.0]);
        let segments = t.segment_by_interval(0.5).unwrap();
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn rejects_non_positive_interval() {
        let t = transcript(&[0.0]);
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                t.segment_by_interval(bad),
                Err(SmashcutError::InvalidInterval { .. })
            ));
        }
    }

    #[test]
    fn empty_transcript_has_no_segments() {
        let t = ParsedTranscript::from_entries(Vec::new(), "empty.srt");
        assert!(t.segment_by_interval(5.0).unwrap().is_empty());
    }
}
