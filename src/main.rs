use std::borrow::Cow;
use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use crossterm::tty::IsTty;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use unicode_width::UnicodeWidthStr;

use jlpt_trend::config::{Config, ConfigStore, FileConfigStore};
use jlpt_trend::input::{validate_user_id, EntryLog};
use jlpt_trend::render::{terminal::preview_inline, PngRenderer};
use jlpt_trend::scoring::{SentenceScorer, TokenScore};
use jlpt_trend::tokenizer::TokenizerKind;
use jlpt_trend::util::format_score;
use jlpt_trend::{
    compute_sentence_score, generate_report, TrendArtifactNamer, TrendContext, VocabularyError,
    VocabularyIndex,
};

/// JLPT vocabulary difficulty of sentences and per-user difficulty trends
#[derive(Parser, Debug)]
#[clap(
    version,
    about,
    long_about = "Scores the lexical difficulty of Japanese sentences against JLPT vocabulary tiers (N5=1 .. N1=5) and charts how a user's sentence difficulty develops over their log."
)]
pub struct Cli {
    /// config file to use instead of the platform default
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// vocabulary json replacing the built-in JLPT table
    #[clap(long, global = true)]
    vocabulary: Option<PathBuf>,

    /// how sentences are split into words
    #[clap(long, value_enum, global = true)]
    tokenizer: Option<TokenizerKind>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// score a single sentence
    Score {
        sentence: String,

        /// list every token with its tier
        #[clap(long)]
        explain: bool,
    },
    /// render difficulty trend charts from a csv sentence log
    Trend(TrendArgs),
    /// show or write the configuration
    Config {
        #[clap(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug)]
struct TrendArgs {
    /// csv log with sequence_index and text columns, and optionally user_id
    #[clap(short, long)]
    input: PathBuf,

    /// user to chart; a log without a user_id column is taken as this user's
    #[clap(short, long, required_unless_present = "all", conflicts_with = "all")]
    user: Option<String>,

    /// chart every user in the log
    #[clap(long)]
    all: bool,

    /// directory for the charts
    #[clap(short, long)]
    output_dir: Option<PathBuf>,

    /// also write a json summary next to each chart
    #[clap(long)]
    summary: bool,

    /// draw each chart in the terminal as well
    #[clap(long)]
    preview: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ConfigAction {
    /// print the effective configuration
    Show,
    /// write the effective configuration to the config file
    Init,
}

impl Cli {
    /// Command line flags take precedence over the config file
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(path) = &self.vocabulary {
            config.vocabulary_path = Some(path.clone());
        }
        if let Some(tokenizer) = self.tokenizer {
            config.tokenizer = tokenizer;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let config = cli.apply_overrides(store.load());

    match &cli.command {
        Command::Score { sentence, explain } => run_score(&config, sentence, *explain),
        Command::Trend(args) => run_trend(&config, args),
        Command::Config { action } => run_config(&store, &config, *action),
    }
}

fn load_vocabulary(config: &Config) -> Result<Cow<'static, VocabularyIndex>, VocabularyError> {
    match &config.vocabulary_path {
        Some(path) => {
            let vocabulary = VocabularyIndex::from_path(path)?;
            info!(
                name = vocabulary.name(),
                words = vocabulary.len(),
                "loaded custom vocabulary"
            );
            Ok(Cow::Owned(vocabulary))
        }
        None => Ok(Cow::Borrowed(VocabularyIndex::builtin())),
    }
}

fn run_score(config: &Config, sentence: &str, explain: bool) -> Result<(), Box<dyn Error>> {
    let vocabulary = load_vocabulary(config)?;
    let tokenizer = config.tokenizer.build(&vocabulary);

    if explain {
        let tokens = tokenizer.tokenize(sentence);
        print_explanation(&SentenceScorer::new(&vocabulary).explain(&tokens));
    }

    let score = compute_sentence_score(sentence, &*tokenizer, &vocabulary);
    println!("{}", format_score(score));
    Ok(())
}

fn print_explanation(tokens: &[TokenScore]) {
    let width = tokens
        .iter()
        .map(|t| UnicodeWidthStr::width(t.token.as_str()))
        .max()
        .unwrap_or(0);

    for token in tokens {
        let pad = width - UnicodeWidthStr::width(token.token.as_str());
        let tier = token.tier.map_or("-".to_string(), |t| t.to_string());
        let score = token.score().map_or("-".to_string(), |s| s.to_string());
        println!("{}{}  {:<2}  {}", token.token, " ".repeat(pad), tier, score);
    }
}

fn run_trend(config: &Config, args: &TrendArgs) -> Result<(), Box<dyn Error>> {
    let vocabulary = load_vocabulary(config)?;
    let tokenizer = config.tokenizer.build(&vocabulary);
    let renderer = PngRenderer::new(config.chart_width, config.chart_height);
    let ctx = TrendContext {
        vocabulary: &vocabulary,
        tokenizer: &*tokenizer,
        renderer: &renderer,
        namer: TrendArtifactNamer::new(args.output_dir.as_ref().unwrap_or(&config.output_dir)),
        write_summary: args.summary || config.write_summary,
    };

    let log = EntryLog::from_path(&args.input)?;
    let batches = match &args.user {
        Some(user) => vec![(user.clone(), log.entries_for(user))],
        None => log.by_user()?,
    };

    // Reject the whole run before any chart is written
    for (user_id, _) in &batches {
        validate_user_id(user_id)?;
    }

    let preview = args.preview && io::stdout().is_tty();
    if args.preview && !preview {
        warn!("stdout is not a terminal, skipping chart preview");
    }

    for (user_id, entries) in batches {
        if entries.is_empty() {
            warn!(user_id = %user_id, "no entries for user");
        }
        let report = generate_report(&user_id, &entries, &ctx)?;
        if preview {
            preview_inline(&report.trend)?;
        }
        println!("{}", report.chart_path.display());
        if let Some(summary_path) = &report.summary_path {
            println!("{}", summary_path.display());
        }
    }

    Ok(())
}

fn run_config(
    store: &FileConfigStore,
    config: &Config,
    action: ConfigAction,
) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigAction::Show => {
            println!("# {}", store.path().display());
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigAction::Init => {
            store.save(config)?;
            println!("{}", store.path().display());
        }
    }
    Ok(())
}
