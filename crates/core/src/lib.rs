//! SmashCut Core Library
//!
//! Parses SRT subtitle files into a sorted, queryable transcript, derives
//! flattened and interval-segmented views of it, and asks an LLM which parts
//! of the video belong in a condensed cut.

pub mod analysis;
pub mod error;
pub mod format;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod provider;
pub mod segment;
pub mod settings;
pub mod timestamp;
pub mod transcript;
pub mod types;
pub mod upload;
pub mod youtube;

// Re-export commonly used items at crate root
pub use analysis::{
    AnalysisOptions, AnalysisOutcome, AnalysisResult, PromptContext, VideoAnalysis,
    build_default_user_prompt, build_user_prompt, request_analysis,
};
pub use error::{Result, SmashcutError};
pub use format::{
    format_analysis_readable, format_duration_long, format_duration_short, format_segments,
    format_transcript_summary,
};
pub use models::{ModelInfo, filter_models, list_models};
pub use parser::{parse_entries, parse_srt};
pub use prompts::DEFAULT_SYSTEM_PROMPT;
pub use provider::{OpenRouterClient, resolve_api_key};
pub use segment::DEFAULT_INTERVAL_MINUTES;
pub use settings::{FileStore, KeyValueStore, MemoryStore, Settings, WebSearchEngine};
pub use timestamp::{format_timestamp, parse_timestamp};
pub use types::{ParsedTranscript, SubtitleEntry, TimeSegment};
pub use upload::{ParseStatus, TranscriptSession, load_srt_file, validate_srt_name};
pub use youtube::{VideoInfo, extract_video_id, fetch_video};
