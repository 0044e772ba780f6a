use clap::{Parser, Subcommand, ValueEnum};
use lifetea::{ClassifiedPost, LifeTeaConfig, config};
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

const DEFAULT_CONFIG: &str = "lifetea.toml";

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing_subscriber::filter::LevelFilter::ERROR,
            LogLevel::Warn => tracing_subscriber::filter::LevelFilter::WARN,
            LogLevel::Info => tracing_subscriber::filter::LevelFilter::INFO,
            LogLevel::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
            LogLevel::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
        }
    }
}

/// `lifetea` — classify stories and summarise moods
#[derive(Parser, Debug)]
#[command(name = "lifetea", version, about = "Emotion tools for LifeTea stories")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(long, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect the emotion of one or more stories (reads stdin when none given)
    Classify { texts: Vec<String> },
    /// Summarise a JSON array of exported posts
    Mood {
        /// File containing the posts
        #[arg(long)]
        posts: PathBuf,
        /// Restrict the trend, vibe and stats to this author
        #[arg(long)]
        author: Option<String>,
    },
}

#[derive(Serialize)]
struct Classified<'a> {
    text: &'a str,
    emotion: lifetea::Emotion,
}

async fn load_config(path: Option<PathBuf>) -> anyhow::Result<LifeTeaConfig> {
    let cfg = match path {
        Some(path) => config::load(path).await?,
        None if tokio::fs::try_exists(DEFAULT_CONFIG).await.unwrap_or(false) => {
            config::load(DEFAULT_CONFIG).await?
        }
        None => {
            debug!("no config file, using defaults");
            LifeTeaConfig::default()
        }
    };
    Ok(cfg.with_env())
}

async fn classify(cfg: &LifeTeaConfig, mut texts: Vec<String>) -> anyhow::Result<()> {
    if texts.is_empty() {
        let mut input = String::new();
        tokio::io::stdin().read_to_string(&mut input).await?;
        texts.push(input.trim().to_string());
    }
    let classifier = cfg.classifier()?;
    let emotions = classifier.classify_all(&texts).await;
    let out: Vec<Classified> = texts
        .iter()
        .zip(emotions)
        .map(|(text, emotion)| Classified { text, emotion })
        .collect();
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

async fn summarise(
    cfg: &LifeTeaConfig,
    posts: PathBuf,
    author: Option<String>,
) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(&posts).await?;
    let posts: Vec<ClassifiedPost> = serde_json::from_str(&text)?;
    info!(count = posts.len(), "loaded posts");

    let report = cfg.aggregator()?.report(&posts, author.as_deref());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::from(cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let cfg = load_config(cli.config).await?;
    match cli.command {
        Command::Classify { texts } => classify(&cfg, texts).await,
        Command::Mood { posts, author } => summarise(&cfg, posts, author).await,
    }
}
