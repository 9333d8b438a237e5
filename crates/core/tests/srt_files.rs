// Integration tests for loading subtitle files from disk.

use std::path::PathBuf;

use anyhow::Result;
use smashcut_core::{ParseStatus, SmashcutError, TranscriptSession, load_srt_file};
use tempfile::TempDir;

const TWO_CUES: &str = "\
1
00:00:01,000 --> 00:00:03,000
Hello world

2
00:00:05,000 --> 00:00:07,500
Foo bar baz
";

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> Result<PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}

#[tokio::test]
async fn test_load_well_formed_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "episode.srt", TWO_CUES.as_bytes())?;

    let transcript = load_srt_file(&path).await?;

    assert_eq!(transcript.entries.len(), 2);
    assert_eq!(transcript.total_duration_seconds, 7.5);
    assert_eq!(transcript.word_count, 5);
    assert_eq!(transcript.source_name, "episode.srt");
    assert_eq!(
        transcript.flatten_to_transcript(),
        "[00:00:01,000 - 00:00:03,000] Hello world\n[00:00:05,000 - 00:00:07,500] Foo bar baz"
    );

    Ok(())
}

#[tokio::test]
async fn test_windows_line_endings_and_malformed_blocks() -> Result<()> {
    let dir = TempDir::new()?;
    let content = "\
1
00:00:01,000 --> 00:00:02,000
one

2
00:00:03,000 --> 00:00:04,000

3
00:00:05,000 --> 00:00:06,000
three

nope
00:00:07,000 --> 00:00:08,000
bad index
"
    .replace('\n', "\r\n");
    let path = write_file(&dir, "Movie.SRT", content.as_bytes())?;

    let transcript = load_srt_file(&path).await?;

    let texts: Vec<&str> = transcript.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "three"]);
    assert_eq!(transcript.total_duration_seconds, 6.0);

    Ok(())
}

#[tokio::test]
async fn test_byte_order_mark_keeps_first_cue() -> Result<()> {
    let dir = TempDir::new()?;
    let one_cue = "\u{feff}1\n00:00:01,000 --> 00:00:03,000\nHello world\n";
    let path = write_file(&dir, "bom.srt", one_cue.as_bytes())?;

    let transcript = load_srt_file(&path).await?;

    assert_eq!(transcript.entries.len(), 1);
    assert_eq!(transcript.entries[0].sequence_index, 1);
    assert_eq!(transcript.entries[0].text, "Hello world");

    Ok(())
}

#[tokio::test]
async fn test_file_without_valid_blocks_fails() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "empty.srt", b"this is not\nreally\n\na subtitle file")?;

    let err = load_srt_file(&path).await.unwrap_err();
    assert!(matches!(err, SmashcutError::NoEntries { .. }));

    Ok(())
}

#[tokio::test]
async fn test_txt_file_rejected_regardless_of_content() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "movie.txt", TWO_CUES.as_bytes())?;

    let err = load_srt_file(&path).await.unwrap_err();
    assert_eq!(err.to_string(), "Please upload a valid SRT file");

    Ok(())
}

#[tokio::test]
async fn test_invalid_utf8_is_a_read_failure() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_file(&dir, "binary.srt", &[0xff, 0xfe, 0x00, 0x80])?;

    let err = load_srt_file(&path).await.unwrap_err();
    assert!(matches!(err, SmashcutError::ReadFailed { .. }));

    Ok(())
}

#[tokio::test]
async fn test_session_replaces_and_clears() -> Result<()> {
    let dir = TempDir::new()?;
    let good = write_file(&dir, "good.srt", TWO_CUES.as_bytes())?;
    let bad = write_file(&dir, "bad.srt", b"nothing here")?;

    let mut session = TranscriptSession::new();

    session.load(&good).await;
    assert!(matches!(session.status(), ParseStatus::Ready(_)));
    assert_eq!(session.segments(5.0)?.len(), 1);
    assert!(session.transcript_text().starts_with("[00:00:01,000"));

    // A failed load drops the previous transcript.
    session.load(&bad).await;
    assert!(session.transcript().is_none());
    assert_eq!(
        session.error(),
        Some("No valid subtitle entries found in the file")
    );

    session.load(&good).await;
    assert!(session.transcript().is_some());
    session.clear();
    assert!(session.transcript().is_none());
    assert!(session.error().is_none());

    Ok(())
}
