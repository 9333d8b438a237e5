use std::time::Duration;

use console::{StyledObject, style};
use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let whole = d.as_secs();
        format!("{}m {}s", whole / 60, whole % 60)
    }
}

pub fn check() -> StyledObject<&'static str> {
    style("✓").green().bold()
}

pub fn banner() {
    println!(
        "\n{}  {}\n",
        style("smashcut").cyan().bold(),
        style("Video Cliff Notes").dim()
    );
}

pub fn rule() {
    println!("{}", style("─".repeat(60)).dim());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_under_a_minute_keeps_tenths() {
        assert_eq!(format_elapsed(Duration::from_millis(4_240)), "4.2s");
    }

    #[test]
    fn elapsed_minutes_truncate_seconds() {
        assert_eq!(format_elapsed(Duration::from_millis(119_600)), "1m 59s");
        assert_eq!(format_elapsed(Duration::from_secs(120)), "2m 0s");
        assert_eq!(format_elapsed(Duration::from_secs(3_725)), "62m 5s");
    }
}
