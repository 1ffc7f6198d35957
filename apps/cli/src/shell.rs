use std::io::Write;

use anyhow::Result;
use console::style;
use tldw_core::{CaptionsProvider, Frontend, LanguageModel, Session};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::frontend::TerminalFrontend;

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Transcript(&'a str),
    Summarize(&'a str),
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> ShellCommand<'_> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map(|(command, rest)| (command, rest.trim()))
        .unwrap_or((line, ""));

    match command {
        "" => ShellCommand::Empty,
        "t" | "transcript" => ShellCommand::Transcript(rest),
        "s" | "summarize" => ShellCommand::Summarize(rest),
        "clear" => ShellCommand::Clear,
        "h" | "help" | "?" => ShellCommand::Help,
        "q" | "quit" | "exit" => ShellCommand::Quit,
        other => ShellCommand::Unknown(other),
    }
}

fn print_help() {
    println!(
        "{}\n  {}  fetch and show the transcript\n  {}   summarize the video\n  {}              forget cached transcripts\n  {}               leave\n",
        style("Commands:").bold(),
        style("transcript <url>  (t)").cyan(),
        style("summarize <url>  (s)").cyan(),
        style("clear").cyan(),
        style("quit  (q)").cyan(),
    );
}

/// One interactive session. Transcripts stay cached until `clear` or exit.
pub async fn run<C, M>(mut session: Session<C, M>, timestamps: bool) -> Result<()>
where
    C: CaptionsProvider,
    M: LanguageModel,
{
    let mut ui = TerminalFrontend::new(timestamps);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();
    loop {
        print!("{} ", style("tldw>").cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_command(&line) {
            ShellCommand::Transcript(url) => {
                session.fetch_action(url, &mut ui).await;
            }
            ShellCommand::Summarize(url) => {
                session.summarize_action(url, &mut ui).await;
            }
            ShellCommand::Clear => {
                session.end();
                println!("{} Cache cleared", style("✓").green().bold());
            }
            ShellCommand::Help => print_help(),
            ShellCommand::Quit => break,
            ShellCommand::Empty => {}
            ShellCommand::Unknown(command) => {
                ui.error(&format!("Unknown command `{command}`, try `help`"));
            }
        }
    }

    session.end();
    Ok(())
}
