use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use console::style;
use tldw_core::{
    ActionOutcome, ChunkerConfig, OllamaClient, OllamaConfig, Session, YoutubeCaptions,
    chunker::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE},
    llm::ollama::{DEFAULT_HOST, DEFAULT_MODEL},
};

use crate::frontend::TerminalFrontend;

mod frontend;
mod logging;
mod shell;

#[derive(Parser)]
#[command(name = "tldw")]
#[command(about = "Fetch YouTube caption transcripts and summarize them with a local LLM")]
struct Cli {
    /// Ollama server address
    #[arg(long, global = true, env = "OLLAMA_HOST", default_value = DEFAULT_HOST)]
    ollama_host: String,

    /// Model used for summaries
    #[arg(short, long, global = true, env = "TLDW_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Preferred caption language, repeat for fallbacks (e.g. -l en -l de)
    #[arg(short = 'l', long = "lang", global = true, default_values_t = vec!["en".to_string()])]
    languages: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and print the transcript
    Transcript {
        /// Video URL
        url: String,

        /// Print every caption line with its [MM:SS] start
        #[arg(long)]
        timestamps: bool,
    },
    /// Fetch the transcript and summarize it chunk by chunk
    Summarize {
        /// Video URL
        url: String,

        #[command(flatten)]
        chunking: ChunkArgs,
    },
    /// Interactive session, transcripts stay cached until you quit
    Shell {
        #[arg(long)]
        timestamps: bool,

        #[command(flatten)]
        chunking: ChunkArgs,
    },
}

#[derive(Args)]
struct ChunkArgs {
    /// Maximum characters per chunk sent to the model
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Characters shared between consecutive chunks
    #[arg(long, default_value_t = DEFAULT_CHUNK_OVERLAP)]
    chunk_overlap: usize,
}

impl From<ChunkArgs> for ChunkerConfig {
    fn from(args: ChunkArgs) -> Self {
        ChunkerConfig {
            chunk_size: args.chunk_size,
            chunk_overlap: args.chunk_overlap,
        }
    }
}

fn succeeded(outcome: &ActionOutcome) -> bool {
    matches!(
        outcome,
        ActionOutcome::Transcript(_) | ActionOutcome::Summary { .. }
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init();

    let model = OllamaClient::new(OllamaConfig {
        host: cli.ollama_host,
        model: cli.model,
    });
    tracing::debug!(host = %model.config().host, model = %model.config().model, "Using Ollama");

    let session = Session::new(YoutubeCaptions::new(), model).with_languages(cli.languages);

    println!(
        "\n{}  {}\n",
        style("tldw").cyan().bold(),
        style("YouTube Summarizer").dim()
    );

    let outcome = match cli.command {
        Command::Transcript { url, timestamps } => {
            let mut session = session;
            let mut ui = TerminalFrontend::new(timestamps);
            session.fetch_action(&url, &mut ui).await
        }
        Command::Summarize { url, chunking } => {
            let mut session = session.with_chunking(chunking.into())?;
            let mut ui = TerminalFrontend::new(false);
            session.summarize_action(&url, &mut ui).await
        }
        Command::Shell {
            timestamps,
            chunking,
        } => {
            let session = session.with_chunking(chunking.into())?;
            return shell::run(session, timestamps).await;
        }
    };

    if !succeeded(&outcome) {
        std::process::exit(1);
    }

    Ok(())
}
