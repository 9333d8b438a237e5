use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::{
    error::{Result, SmashcutError},
    format::format_duration_short,
    prompts::{ANALYSIS_USER_PROMPT_TEMPLATE, video_analysis_schema},
    provider::{ChatResponse, OpenRouterClient, UrlCitation, Usage},
    settings::{Settings, WebSearchEngine},
    timestamp::parse_clock_time,
    types::ParsedTranscript,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentCategory {
    Narrative,
    Emotional,
    Action,
    Dialogue,
    Visual,
    Humor,
    Climax,
    Introduction,
    Conclusion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedSegment {
    pub start_time: String,
    pub end_time: String,
    pub importance_score: f64,
    pub category: SegmentCategory,
    pub reason: String,
    pub transcript_excerpt: Option<String>,
}

impl RecommendedSegment {
    /// Length in seconds, if both timestamps are readable and ordered.
    pub fn duration_seconds(&self) -> Option<f64> {
        let start = parse_clock_time(&self.start_time)?;
        let end = parse_clock_time(&self.end_time)?;
        (end >= start).then_some(end - start)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalysis {
    pub summary: String,
    pub total_segments_analyzed: Option<f64>,
    pub recommended_segments: Vec<RecommendedSegment>,
    pub themes: Vec<String>,
    pub estimated_condensed_duration: String,
    pub editing_notes: Option<String>,
}

impl VideoAnalysis {
    /// Sum of the readable recommended segment lengths.
    pub fn selected_seconds(&self) -> f64 {
        self.recommended_segments
            .iter()
            .filter_map(RecommendedSegment::duration_seconds)
            .sum()
    }
}

/// What the model answered: the schema record, or plain text when the
/// answer was not requested or not valid as structured output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum AnalysisOutcome {
    Structured(VideoAnalysis),
    Raw(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub model: String,
    pub outcome: AnalysisOutcome,
    pub citations: Vec<UrlCitation>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub model: String,
    pub web_search: bool,
    pub web_search_engine: WebSearchEngine,
    pub web_search_max_results: u32,
    pub structured_output: bool,
}

impl AnalysisOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let model = settings
            .selected_model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .ok_or(SmashcutError::MissingModel)?;

        Ok(Self {
            model,
            web_search: settings.enable_web_search,
            web_search_engine: settings.web_search_engine,
            web_search_max_results: settings.web_search_max_results,
            structured_output: settings.enable_structured_outputs,
        })
    }
}

/// Values substituted into the user prompt template.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub video_title: Option<&'a str>,
    pub video_duration: Option<&'a str>,
    pub target_minutes: u32,
    pub transcript: &'a ParsedTranscript,
}

pub fn build_user_prompt(template: &str, ctx: &PromptContext<'_>) -> String {
    let title = ctx
        .video_title
        .filter(|t| !t.is_empty())
        .or(Some(ctx.transcript.source_name.as_str()).filter(|n| !n.is_empty()))
        .unwrap_or("Unknown Video");

    let duration = if ctx.transcript.is_empty() {
        ctx.video_duration.unwrap_or("Unknown").to_string()
    } else {
        format_duration_short(ctx.transcript.total_duration_seconds)
    };

    template
        .replacen("{{videoTitle}}", title, 1)
        .replacen("{{videoDuration}}", &duration, 1)
        .replacen(
            "{{targetDuration}}",
            &format!("{} minutes", ctx.target_minutes),
            1,
        )
        .replacen("{{transcript}}", &ctx.transcript.flatten_to_transcript(), 1)
}

pub fn build_default_user_prompt(ctx: &PromptContext<'_>) -> String {
    build_user_prompt(ANALYSIS_USER_PROMPT_TEMPLATE, ctx)
}

pub fn build_request_body(system_prompt: &str, user_prompt: &str, options: &AnalysisOptions) -> Value {
    let mut model = options.model.clone();
    let mut body = json!({
        "messages": [
            {"role": "system", "content": system_prompt},
            {"role": "user", "content": user_prompt},
        ],
        "temperature": 0.7,
        "max_tokens": 4096,
    });

    if options.web_search {
        match options.web_search_engine {
            WebSearchEngine::Auto => model.push_str(":online"),
            engine => {
                body["plugins"] = json!([{
                    "id": "web",
                    "engine": engine.name(),
                    "max_results": options.web_search_max_results,
                }]);
            }
        }
    }

    if options.structured_output {
        body["response_format"] = json!({
            "type": "json_schema",
            "json_schema": video_analysis_schema(),
        });
    }

    body["model"] = Value::String(model);
    body
}

pub fn interpret_response(response: ChatResponse, structured_output: bool) -> AnalysisResult {
    let message = response.choices.into_iter().next().map(|c| c.message);
    let (content, annotations) = match message {
        Some(m) => (m.content.unwrap_or_default(), m.annotations),
        None => (String::new(), Vec::new()),
    };

    let citations = annotations
        .into_iter()
        .filter(|a| a.kind == "url_citation")
        .filter_map(|a| a.url_citation)
        .collect();

    let outcome = if structured_output && !content.is_empty() {
        match serde_json::from_str::<VideoAnalysis>(&content) {
            Ok(analysis) => AnalysisOutcome::Structured(analysis),
            Err(e) => {
                warn!(error = %e, "structured output did not match schema, showing raw text");
                AnalysisOutcome::Raw(content)
            }
        }
    } else {
        AnalysisOutcome::Raw(content)
    };

    AnalysisResult {
        model: response.model,
        outcome,
        citations,
        usage: response.usage,
    }
}

pub async fn request_analysis(
    client: &OpenRouterClient,
    system_prompt: &str,
    user_prompt: &str,
    options: &AnalysisOptions,
) -> Result<AnalysisResult> {
    let body = build_request_body(system_prompt, user_prompt, options);
    let response = client.chat(&body).await?;
    Ok(interpret_response(response, options.structured_output))
}
