//! `sozluk` command line client.
//!
//! Runs one operation against the dictionary service and prints the result
//! as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sozluk::{Dictionary, LookupOptions, SozlukConfig, SubDictionary};

#[derive(Parser)]
#[command(name = "sozluk", version, about = "Aggregating Turkish dictionary client")]
struct Cli {
    /// YAML configuration file; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Full aggregated lookup
    Lookup {
        term: String,
        /// Comma-separated sub-dictionaries (gts,atasozu,derleme,terim,bati,kilavuz,etms)
        #[arg(short, long, value_delimiter = ',')]
        sources: Vec<SubDictionary>,
        /// Also fetch pronunciation audio
        #[arg(short, long)]
        pronunciation: bool,
    },
    /// Spell-check every word of a text
    Spell { text: Vec<String> },
    /// Proverbs and idioms containing a term
    Proverbs { term: String },
    /// Words resembling a term
    Similar {
        term: String,
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Words starting with a letter, paged
    Letter {
        letter: String,
        #[arg(long, default_value = "1")]
        page: usize,
        #[arg(long, default_value = "20")]
        page_size: usize,
    },
    /// Wildcard search: `?` one char, `*` any run, `,N` exact length
    Wildcard { pattern: String },
    /// Word of the day
    Daily,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SozlukConfig> {
    let mut config = match path {
        Some(path) => SozlukConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SozlukConfig::default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    init_tracing(&config.log_level, cli.json_logs);

    let dictionary = Dictionary::new(&config)?;

    match cli.command {
        Command::Lookup {
            term,
            sources,
            pronunciation,
        } => {
            let options = LookupOptions::default()
                .with_sources(sources)
                .with_pronunciation(pronunciation);
            print_json(&*dictionary.lookup(&term, &options).await?)
        }
        Command::Spell { text } => print_json(&dictionary.spell_check(&text.join(" ")).await?),
        Command::Proverbs { term } => print_json(&dictionary.find_proverbs(&term).await?),
        Command::Similar { term, limit } => {
            print_json(&dictionary.similar_words(&term, limit).await?)
        }
        Command::Letter {
            letter,
            page,
            page_size,
        } => print_json(&dictionary.words_by_letter(&letter, page, page_size).await?),
        Command::Wildcard { pattern } => print_json(&dictionary.wildcard_search(&pattern).await?),
        Command::Daily => print_json(&dictionary.daily_word().await?),
    }
}
