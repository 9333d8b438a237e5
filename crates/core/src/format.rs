use crate::{
    analysis::{AnalysisOutcome, AnalysisResult, VideoAnalysis},
    timestamp::format_timestamp,
    types::{ParsedTranscript, TimeSegment},
};

/// Format seconds as `1h 2m 3s` or `2m 3s`
pub fn format_duration_long(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else {
        format!("{}m {}s", minutes, secs)
    }
}

/// Format seconds as `1h 2m` or `2m`
pub fn format_duration_short(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (hours, minutes) = (total / 3600, (total % 3600) / 60);
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

pub fn format_transcript_summary(transcript: &ParsedTranscript) -> String {
    format!(
        "{}: {} entries, {}, {} words",
        transcript.source_name,
        transcript.entries.len(),
        format_duration_long(transcript.total_duration_seconds),
        transcript.word_count
    )
}

pub fn format_segments(segments: &[TimeSegment<'_>]) -> String {
    let mut output = String::new();
    for segment in segments {
        output.push_str(&format!(
            "## [{} - {}] {} entries\n\n",
            format_timestamp(segment.start_seconds),
            format_timestamp(segment.end_seconds),
            segment.entries.len()
        ));
        output.push_str(&segment.text);
        output.push_str("\n\n");
    }
    output
}

/// Format an analysis result as human-readable markdown
pub fn format_analysis_readable(result: &AnalysisResult) -> String {
    let mut output = match &result.outcome {
        AnalysisOutcome::Structured(analysis) => format_video_analysis(analysis),
        AnalysisOutcome::Raw(text) => format!("{}\n", text.trim()),
    };

    if !result.citations.is_empty() {
        output.push_str("\n## Sources\n\n");
        for citation in &result.citations {
            output.push_str(&format!("• {} ({})\n", citation.title, citation.url));
        }
    }

    output
}

fn format_video_analysis(analysis: &VideoAnalysis) -> String {
    let mut output = String::new();

    output.push_str("## Summary\n\n");
    output.push_str(&analysis.summary);
    output.push_str("\n\n");

    output.push_str(&format!(
        "**Condensed length:** {} | **Segments:** {} | **Selected:** {}\n\n",
        analysis.estimated_condensed_duration,
        analysis.recommended_segments.len(),
        format_duration_long(analysis.selected_seconds())
    ));

    output.push_str("## Recommended Segments\n\n");
    for (i, segment) in analysis.recommended_segments.iter().enumerate() {
        output.push_str(&format!(
            "{}. [{}–{}] {:?} ({}/10)\n   {}\n",
            i + 1,
            segment.start_time,
            segment.end_time,
            segment.category,
            segment.importance_score,
            segment.reason
        ));
        if let Some(excerpt) = &segment.transcript_excerpt {
            output.push_str(&format!("   > {}\n", excerpt));
        }
    }
    output.push('\n');

    if !analysis.themes.is_empty() {
        output.push_str("## Themes\n\n");
        for theme in &analysis.themes {
            output.push_str(&format!("• {}\n", theme));
        }
        output.push('\n');
    }

    if let Some(notes) = &analysis.editing_notes {
        output.push_str("## Editing Notes\n\n");
        output.push_str(notes);
        output.push('\n');
    }

    output
}
