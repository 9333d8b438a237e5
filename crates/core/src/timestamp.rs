use std::sync::LazyLock;

use regex::Regex;

/// `HH:MM:SS,mmm` or `HH:MM:SS.mmm`, matched anywhere in the input.
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2})[,.](\d{3})").expect("timestamp pattern is valid")
});

/// Parse an SRT timestamp into seconds since the start of the file.
///
/// Unparseable input yields `0.0` instead of an error, so a malformed timestamp
/// sorts as if it were at the very beginning. Use [`try_parse_timestamp`] when
/// the two cases need telling apart.
pub fn parse_timestamp(text: &str) -> f64 {
    try_parse_timestamp(text).unwrap_or(0.0)
}

pub fn try_parse_timestamp(text: &str) -> Option<f64> {
    let caps = TIMESTAMP_RE.captures(text)?;
    let field = |i: usize| caps[i].parse::<u32>().ok().map(f64::from);

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let millis = field(4)?;

    Some(hours * 3600.0 + minutes * 60.0 + seconds + millis / 1000.0)
}

/// Parse a looser clock time such as `1:02:03`, `02:03` or `00:01:02.5`,
/// as found in model answers.
pub fn parse_clock_time(text: &str) -> Option<f64> {
    let text = text.trim().replace(',', ".");
    let mut parts = text.rsplit(':');

    let seconds: f64 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next().map_or(Ok(0), str::parse::<u32>).ok()?;
    let hours: u32 = parts.next().map_or(Ok(0), str::parse::<u32>).ok()?;
    if parts.next().is_some() || !(0.0..60.0).contains(&seconds) {
        return None;
    }

    Some(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
}

/// Format seconds as an `HH:MM:SS,mmm` timestamp.
///
/// Works on whole milliseconds so `1.001` does not drift to `,000`.
/// Negative and non-finite input clamps to zero.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, ms)
}
