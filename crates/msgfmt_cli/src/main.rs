use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use msgfmt_core::{Block, Config, ListKind};

#[derive(Parser)]
#[command(name = "msgfmt")]
#[command(version, about = "Format model-generated chat text into display markup")]
struct Cli {
    /// Input text file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How to treat the input
    #[arg(short, long, value_enum, default_value_t = Mode::Bot)]
    mode: Mode,

    /// TOML config with repair dictionary and completion keywords
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print "complete" or "incomplete" instead of formatting
    #[arg(long)]
    check_complete: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Finalized bot message
    Bot,
    /// Bot message that is still streaming
    Stream,
    /// Message typed by the user
    User,
    /// Whitespace and word repair only
    Normalize,
    /// Dump parsed blocks
    Blocks,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Config(#[from] msgfmt_core::ConfigError),
}

fn main() -> ExitCode {
    // warn by default; RUST_LOG=debug for pipeline details
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init()
        .ok();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::compiled_default().clone(),
    };

    let text = read_input(cli.input.as_deref())?;
    log::debug!("read {} bytes, mode {:?}", text.len(), cli.mode);

    let result = if cli.check_complete {
        let status = if msgfmt_core::is_complete_with_config(&text, &config) {
            "complete"
        } else {
            "incomplete"
        };
        status.to_string()
    } else {
        render(&text, cli.mode, &config)
    };

    match &cli.output {
        Some(path) => fs::write(path, result).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?,
        None => println!("{}", result),
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(CliError::Stdin)?;
            Ok(text)
        }
    }
}

fn render(text: &str, mode: Mode, config: &Config) -> String {
    match mode {
        Mode::Bot => msgfmt_core::format_message_with_config(text, config),
        Mode::Stream => msgfmt_core::format_streaming_chunk_with_config(text, config),
        Mode::User => msgfmt_core::format_user_message(text),
        Mode::Normalize => msgfmt_core::normalize_with_config(text, config),
        Mode::Blocks => {
            let prepared = msgfmt_core::escape(&msgfmt_core::normalize_with_config(text, config));
            msgfmt_core::parse_blocks(&prepared)
                .iter()
                .map(describe_block)
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

fn describe_block(block: &Block) -> String {
    match block {
        Block::Header { level, text } => format!("H{} {}", level, text),
        Block::Paragraph { text } => format!("P  {}", text),
        Block::List(list) => {
            let kind = match list.kind {
                ListKind::Bullet => "bullet",
                ListKind::Ordered(style) => style.as_str(),
            };
            let mut out = format!("L  {} ({} items)", kind, list.items.len());
            for item in &list.items {
                out.push_str("\n   - ");
                out.push_str(item);
            }
            out
        }
    }
}
