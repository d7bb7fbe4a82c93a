// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pdfaudio::app_config::{self, Config, SynthesisProvider};
use pdfaudio::language_utils::{resolve_or_default, LanguageCatalog, LanguageChoice};
use pdfaudio::{Controller, ErrorKind, PipelineError, PipelineResult, PipelineStage};

/// CLI Wrapper for SynthesisProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSynthesisProvider {
    Google,
    Mock,
}

impl From<CliSynthesisProvider> for SynthesisProvider {
    fn from(cli_provider: CliSynthesisProvider) -> Self {
        match cli_provider {
            CliSynthesisProvider::Google => SynthesisProvider::Google,
            CliSynthesisProvider::Mock => SynthesisProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prompt for documents and languages until 'q' (default command)
    Interactive {
        /// Do not play the audio after writing it
        #[arg(long)]
        no_playback: bool,
    },

    /// Convert a single document
    Convert(ConvertArgs),

    /// List the supported languages
    Languages,

    /// Generate shell completions for pdfaudio
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// PDF document to read aloud
    #[arg(value_name = "PDF_PATH")]
    input_path: String,

    /// Language code (e.g., 'es', 'en', 'zh-CN'); defaults to the configured language
    #[arg(short, long)]
    language: Option<String>,

    /// Use the default language instead of failing on an unknown code
    #[arg(long)]
    fallback_default: bool,

    /// Do not play the audio after writing it
    #[arg(long)]
    no_playback: bool,
}

/// pdfaudio - PDF documents read aloud
///
/// Extracts the text of a PDF document, saves it together with word and
/// character statistics, and turns it into spoken audio.
#[derive(Parser, Debug)]
#[command(name = "pdfaudio")]
#[command(version)]
#[command(about = "Turn PDF documents into spoken audio")]
#[command(long_about = "pdfaudio extracts the text of a PDF document, saves it with statistics and synthesizes speech from it.

EXAMPLES:
    pdfaudio                                   # Interactive mode
    pdfaudio convert report.pdf                # Convert using the default language
    pdfaudio convert report.pdf -l fr          # Convert to French speech
    pdfaudio convert report.pdf -l xx --fallback-default
    pdfaudio --provider mock convert a.pdf     # Offline dry run with placeholder audio
    pdfaudio languages                         # List supported languages
    pdfaudio completions bash > pdfaudio.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

OUTPUT:
    processed_texts/texto_<timestamp>_<lang>.txt
    processed_audio/audio_<timestamp>_<lang>.mp3")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Directory for processed text files
    #[arg(long, global = true)]
    text_dir: Option<PathBuf>,

    /// Directory for audio files
    #[arg(long, global = true)]
    audio_dir: Option<PathBuf>,

    /// Speech synthesis provider to use
    #[arg(short, long, value_enum, global = true)]
    provider: Option<CliSynthesisProvider>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::decoration_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is lowered or raised once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match &cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "pdfaudio", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Languages) => {
            print_languages();
            Ok(())
        }
        Some(Commands::Convert(args)) => {
            let config = load_config(&cli)?;
            run_convert(&config, args).await
        }
        Some(Commands::Interactive { no_playback }) => {
            let config = load_config(&cli)?;
            run_interactive(&config, *no_playback).await
        }
        None => {
            let config = load_config(&cli)?;
            run_interactive(&config, false).await
        }
    }
}

/// Load the configuration file and apply command line overrides
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(provider) = &options.provider {
        config.synthesis.provider = provider.clone().into();
    }
    if let Some(text_dir) = &options.text_dir {
        config.output.text_dir = text_dir.clone();
    }
    if let Some(audio_dir) = &options.audio_dir {
        config.output.audio_dir = audio_dir.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    // Just update the max level without reinitializing the logger
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

fn print_languages() {
    println!("\nAvailable languages:");
    for entry in LanguageCatalog::entries() {
        println!("- {}", entry.listing_line());
    }
}

async fn run_convert(config: &Config, args: &ConvertArgs) -> Result<()> {
    let language_code = if args.fallback_default {
        let choice = resolve_or_default(args.language.as_deref(), &config.default_language)
            .ok_or_else(|| anyhow!("Default language '{}' is not supported", config.default_language))?;
        announce_choice(&choice);
        choice.entry().code.to_string()
    } else {
        args.language
            .clone()
            .unwrap_or_else(|| config.default_language.clone())
    };

    let spinner = SpinnerSlot::default();
    let controller = Controller::with_config(config, !args.no_playback)?
        .with_observer(spinner.observer());

    spinner.start();
    let outcome = controller.process(&args.input_path, &language_code).await;
    spinner.finish();

    match outcome {
        Ok(result) => {
            print_success(&result);
            Ok(())
        }
        Err(e) => {
            print_failure(&e);
            Err(e.into())
        }
    }
}

async fn run_interactive(config: &Config, no_playback: bool) -> Result<()> {
    let spinner = SpinnerSlot::default();
    let controller = Controller::with_config(config, !no_playback)?
        .with_observer(spinner.observer());

    loop {
        println!("\n=== PDF to Audio ===");
        let Some(path) = prompt("\nEnter the path of the PDF file (or 'q' to quit): ")? else {
            break;
        };
        if path.eq_ignore_ascii_case("q") {
            println!("Goodbye!");
            break;
        }

        print_languages();
        let prompt_text = format!("\nSelect the language code (default '{}'): ", config.default_language);
        let language = prompt(&prompt_text)?.unwrap_or_default();

        let choice = resolve_or_default(Some(&language), &config.default_language)
            .ok_or_else(|| anyhow!("Default language '{}' is not supported", config.default_language))?;
        announce_choice(&choice);

        spinner.start();
        let outcome = controller.process(&path, choice.entry().code).await;
        spinner.finish();

        match outcome {
            Ok(result) => print_success(&result),
            Err(e) => print_failure(&e),
        }
    }

    Ok(())
}

/// Print `message` and read one trimmed line; `None` at end of input
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    std::io::stdout().flush()?;

    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from standard input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn announce_choice(choice: &LanguageChoice) {
    if let LanguageChoice::Substituted { requested, entry } = choice {
        warn!(
            "Language '{}' is not valid. Using {} ({}) instead.",
            requested, entry.display_name, entry.code
        );
    }
}

fn print_success(result: &PipelineResult) {
    println!("\n=== Completed successfully ===");
    println!("Text file saved to: {}", result.text_file_path.display());
    println!("Audio file saved to: {}", result.audio_file_path.display());
    println!("\n{}", result.stats);
}

fn print_failure(error: &PipelineError) {
    println!("\nError: {}", error);
    match error.kind() {
        ErrorKind::InvalidInput => println!("Please check that the file path is correct."),
        ErrorKind::CorruptDocument | ErrorKind::EmptyContent => {
            println!("Please make sure the file is a valid PDF that is not damaged or protected.")
        }
        ErrorKind::UnsupportedLanguage => {
            println!("Run 'pdfaudio languages' to list the supported language codes.")
        }
        ErrorKind::Synthesis => println!("Please check your network connection and try again."),
        ErrorKind::Persistence => println!("Please check that the output directories are writable."),
    }
    if let Some(text_file) = &error.text_file {
        println!("The processed text was kept at: {}", text_file.display());
    }
}

/// Spinner shared between the controller's stage observer and the caller
#[derive(Clone, Default)]
struct SpinnerSlot {
    current: Arc<Mutex<Option<ProgressBar>>>,
}

impl SpinnerSlot {
    fn start(&self) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(100));
        *self.current.lock() = Some(spinner);
    }

    fn finish(&self) {
        if let Some(spinner) = self.current.lock().take() {
            spinner.finish_and_clear();
        }
    }

    fn observer(&self) -> impl Fn(PipelineStage) + Send + Sync + 'static {
        let slot = self.clone();
        move |stage: PipelineStage| {
            if let Some(spinner) = slot.current.lock().as_ref() {
                spinner.set_message(capitalize(stage.activity()));
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
