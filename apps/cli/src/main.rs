use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

use smashcut_core::{
    AnalysisOptions, AnalysisOutcome, DEFAULT_INTERVAL_MINUTES, DEFAULT_SYSTEM_PROMPT, FileStore,
    OpenRouterClient, PromptContext, Settings, VideoInfo, WebSearchEngine,
    build_default_user_prompt, fetch_video, filter_models, format_analysis_readable,
    format_segments, format_transcript_summary, list_models, load_srt_file, request_analysis,
    settings::default_store_path, youtube::ACCESS_TOKEN_ENV,
};

use crate::ui::{banner, check, create_spinner, format_elapsed, rule};

mod ui;

/// CLI wrapper for WebSearchEngine (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliSearchEngine {
    Auto,
    Native,
    Exa,
}

impl From<CliSearchEngine> for WebSearchEngine {
    fn from(cli: CliSearchEngine) -> Self {
        match cli {
            CliSearchEngine::Auto => WebSearchEngine::Auto,
            CliSearchEngine::Native => WebSearchEngine::Native,
            CliSearchEngine::Exa => WebSearchEngine::Exa,
        }
    }
}

#[derive(Parser)]
#[command(name = "smashcut")]
#[command(about = "Turn a subtitle file into AI-picked cliff notes for a long video")]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a subtitle file and print its statistics
    Inspect {
        /// Path to an .srt file
        file: PathBuf,

        /// Print the flattened transcript
        #[arg(short, long)]
        transcript: bool,

        /// Print the transcript grouped into fixed time buckets
        #[arg(short, long)]
        segments: bool,

        /// Bucket length in minutes
        #[arg(short, long, default_value_t = DEFAULT_INTERVAL_MINUTES)]
        interval: f64,
    },

    /// Ask the model which parts of the video belong in a condensed cut
    Analyze {
        /// Path to an .srt file
        file: PathBuf,

        /// YouTube link for the same video, used for the title
        #[arg(long)]
        video: Option<String>,

        /// YouTube Data API access token
        #[arg(long, env = ACCESS_TOKEN_ENV, hide_env_values = true)]
        access_token: Option<String>,

        /// Model id, overrides the saved selection
        #[arg(short, long)]
        model: Option<String>,

        /// Target length of the condensed video in minutes
        #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=120))]
        target: u32,

        /// Enable web search for this run
        #[arg(long)]
        web_search: bool,

        /// Ask for free text instead of the structured schema
        #[arg(long)]
        no_structured: bool,

        /// Read the system prompt from a file
        #[arg(long)]
        system_prompt: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List models available to the configured API key
    Models {
        /// Only show models whose id or name contains this term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show title, duration and channel of a YouTube video
    Video {
        url: String,

        /// YouTube Data API access token
        #[arg(long, env = ACCESS_TOKEN_ENV, hide_env_values = true)]
        access_token: Option<String>,
    },

    /// Read or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current settings
    Show,
    /// Save the OpenRouter API key
    SetKey { key: String },
    /// Save the default model id
    SetModel { model: String },
    /// Turn web search on or off and pick the engine
    WebSearch {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        enabled: bool,
        #[arg(long)]
        engine: Option<CliSearchEngine>,
        #[arg(long)]
        max_results: Option<u32>,
    },
    /// Turn structured outputs on or off
    Structured {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        enabled: bool,
    },
    /// Forget all saved settings
    Reset,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings_path = cli.settings.clone().unwrap_or_else(default_store_path);
    let mut store = FileStore::open(&settings_path)
        .with_context(|| format!("Failed to open settings at {}", settings_path.display()))?;

    let outcome = run(cli.command, &mut store).await;
    store.close()?;

    if let Err(e) = outcome {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Command, store: &mut FileStore) -> Result<()> {
    match command {
        Command::Inspect {
            file,
            transcript,
            segments,
            interval,
        } => inspect(&file, transcript, segments, interval).await,
        Command::Analyze {
            file,
            video,
            access_token,
            model,
            target,
            web_search,
            no_structured,
            system_prompt,
            json,
        } => {
            let mut settings = Settings::load(&*store);
            if model.is_some() {
                settings.selected_model = model;
            }
            settings.enable_web_search |= web_search;
            settings.enable_structured_outputs &= !no_structured;

            let system_prompt = match system_prompt {
                Some(path) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => DEFAULT_SYSTEM_PROMPT.to_string(),
            };

            analyze(AnalyzeArgs {
                file: &file,
                video: video.as_deref(),
                access_token: access_token.as_deref(),
                target,
                system_prompt: &system_prompt,
                json,
                settings: &settings,
            })
            .await
        }
        Command::Models { search } => models(&Settings::load(&*store), search.as_deref()).await,
        Command::Video { url, access_token } => {
            let video = fetch_video(access_token.as_deref(), &url).await?;
            print_video(&video);
            Ok(())
        }
        Command::Config { action } => config(action, store),
    }
}

async fn inspect(file: &Path, transcript: bool, segments: bool, interval: f64) -> Result<()> {
    let parsed = load_srt_file(file).await?;
    println!("{} {}", check(), format_transcript_summary(&parsed));

    if transcript {
        rule();
        println!("{}", parsed.flatten_to_transcript());
    }

    if segments {
        let buckets = parsed.segment_by_interval(interval)?;
        rule();
        print!("{}", format_segments(&buckets));
    }

    Ok(())
}

struct AnalyzeArgs<'a> {
    file: &'a Path,
    video: Option<&'a str>,
    access_token: Option<&'a str>,
    target: u32,
    system_prompt: &'a str,
    json: bool,
    settings: &'a Settings,
}

async fn analyze(args: AnalyzeArgs<'_>) -> Result<()> {
    // Validate credentials and model before doing any work
    let client = OpenRouterClient::from_settings(args.settings)?;
    let options = AnalysisOptions::from_settings(args.settings)?;

    if !args.json {
        banner();
    }
    let total_start = Instant::now();

    let transcript = load_srt_file(args.file).await?;
    if !args.json {
        println!("{} Parsed {}", check(), format_transcript_summary(&transcript));
    }

    // Missing video metadata only downgrades the prompt title
    let video = match args.video {
        Some(url) => match fetch_video(args.access_token, url).await {
            Ok(video) => Some(video),
            Err(e) => {
                tracing::warn!(error = %e, "continuing without video metadata");
                if !args.json {
                    println!("{} {}", style("!").yellow().bold(), style(e).dim());
                }
                None
            }
        },
        None => None,
    };
    if let (Some(video), false) = (&video, args.json) {
        println!("{} Video: {}", check(), style(&video.title).yellow());
    }

    let user_prompt = build_default_user_prompt(&PromptContext {
        video_title: video.as_ref().map(|v| v.title.as_str()),
        video_duration: video.as_ref().map(|v| v.duration.as_str()),
        target_minutes: args.target,
        transcript: &transcript,
    });

    let step_start = Instant::now();
    let spinner = (!args.json).then(|| create_spinner(&format!("Analyzing with {}...", options.model)));
    let result = request_analysis(&client, args.system_prompt, &user_prompt, &options).await;
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }
    let result = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let kind = match result.outcome {
        AnalysisOutcome::Structured(_) => "structured",
        AnalysisOutcome::Raw(_) => "free text",
    };
    println!(
        "{} Analysis ready ({}, {}) {}",
        check(),
        result.model,
        kind,
        style(format!("[{}]", format_elapsed(step_start.elapsed()))).dim()
    );
    if let Some(usage) = result.usage {
        println!(
            "{} {} prompt + {} completion tokens",
            style("·").dim(),
            usage.prompt_tokens,
            usage.completion_tokens
        );
    }
    println!(
        "\n{} {}\n",
        style("Total time:").dim(),
        style(format_elapsed(total_start.elapsed())).cyan().bold()
    );
    rule();

    println!("{}", format_analysis_readable(&result));
    Ok(())
}

async fn models(settings: &Settings, search: Option<&str>) -> Result<()> {
    let client = OpenRouterClient::from_settings(settings)?;

    let spinner = create_spinner("Fetching models...");
    let all = list_models(&client).await;
    spinner.finish_and_clear();
    let all = all?;

    let shown = filter_models(&all, search.unwrap_or(""));
    for model in &shown {
        let marker = if settings.selected_model.as_deref() == Some(model.id.as_str()) {
            check()
        } else {
            style(" ").dim()
        };
        let context = model
            .context_length
            .map(|c| format!("{}k ctx", c / 1000))
            .unwrap_or_default();
        println!(
            "{} {}  {}  {}",
            marker,
            style(&model.id).cyan(),
            model.name,
            style(context).dim()
        );
    }
    println!("\n{} of {} models", shown.len(), all.len());
    Ok(())
}

fn print_video(video: &VideoInfo) {
    println!("{}", style(&video.title).bold());
    println!("{} {}", style("Channel:").dim(), video.channel_title);
    println!("{} {}", style("Duration:").dim(), video.duration);
    println!("{} {}", style("Published:").dim(), video.published_at);
    if !video.thumbnail_url.is_empty() {
        println!("{} {}", style("Thumbnail:").dim(), video.thumbnail_url);
    }
}

fn config(action: ConfigAction, store: &mut FileStore) -> Result<()> {
    let mut settings = Settings::load(&*store);

    match action {
        ConfigAction::Show => {
            let masked = match settings.api_key.len() {
                0 => "(not set)".to_string(),
                n if n <= 8 => "********".to_string(),
                _ => format!("{}…", settings.api_key.chars().take(8).collect::<String>()),
            };
            println!("{} {}", style("Settings:").dim(), store.path().display());
            println!("api key:            {}", masked);
            println!(
                "model:              {}",
                settings.selected_model.as_deref().unwrap_or("(not set)")
            );
            println!(
                "web search:         {} ({}, max {} results)",
                settings.enable_web_search,
                settings.web_search_engine.name(),
                settings.web_search_max_results
            );
            println!("structured outputs: {}", settings.enable_structured_outputs);
            return Ok(());
        }
        ConfigAction::SetKey { key } => settings.api_key = key,
        ConfigAction::SetModel { model } => settings.selected_model = Some(model),
        ConfigAction::WebSearch {
            enabled,
            engine,
            max_results,
        } => {
            settings.enable_web_search = enabled;
            if let Some(engine) = engine {
                settings.web_search_engine = engine.into();
            }
            if let Some(max_results) = max_results {
                settings.web_search_max_results = max_results;
            }
        }
        ConfigAction::Structured { enabled } => settings.enable_structured_outputs = enabled,
        ConfigAction::Reset => {
            Settings::reset(store);
            println!("{} Settings cleared", check());
            return Ok(());
        }
    }

    settings.save(store)?;
    println!("{} Settings saved", check());
    Ok(())
}
