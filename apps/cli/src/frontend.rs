use std::time::{Duration, Instant};

use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tldw_core::{
    Frontend, Progress, Transcript, format_transcript_with_timestamps, transcript_minutes,
};

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} chunks ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb
}

/// Renders actions to the terminal: spinners while blocked, a progress bar
/// while summarizing, transcript and summary as plain text blocks.
pub struct TerminalFrontend {
    timestamps: bool,
    multi: MultiProgress,
    spinner: Option<(ProgressBar, String, Instant)>,
    bar: Option<ProgressBar>,
}

impl TerminalFrontend {
    pub fn new(timestamps: bool) -> Self {
        Self {
            timestamps,
            multi: MultiProgress::new(),
            spinner: None,
            bar: None,
        }
    }

    fn section(&self, title: &str) {
        self.multi.suspend(|| {
            println!("\n{}", style(title).magenta().bold());
            println!("{}", style("─".repeat(60)).dim());
        });
    }
}

impl Frontend for TerminalFrontend {
    fn busy(&mut self, message: &str) {
        self.idle();
        let spinner = self.multi.add(create_spinner(message));
        self.spinner = Some((spinner, message.trim_end_matches('.').to_string(), Instant::now()));
    }

    fn idle(&mut self) {
        if let Some((spinner, message, started)) = self.spinner.take() {
            spinner.finish_with_message(format!(
                "{} {} {}",
                style("✓").green().bold(),
                message,
                style(format!("[{}]", format_duration(started.elapsed()))).dim()
            ));
        }
    }

    fn transcript(&mut self, transcript: &Transcript) {
        self.section("Transcript");
        let body = if self.timestamps {
            format_transcript_with_timestamps(transcript)
        } else {
            transcript.text()
        };

        self.multi.suspend(|| {
            println!(
                "{} {:.1} min, {} {}\n",
                style(&transcript.video_id).cyan(),
                transcript_minutes(transcript),
                style(&transcript.language).yellow(),
                style(format!("({} captions)", transcript.segments.len())).dim()
            );
            println!("{}", body);
        });
    }

    fn summary(&mut self, summary: &str) {
        self.section("Summary");
        self.multi.suspend(|| println!("{}\n", summary));
    }

    fn error(&mut self, message: &str) {
        self.multi
            .suspend(|| eprintln!("{} {}", style("Error:").red().bold(), message));
    }

    fn progress(&mut self, progress: Progress) {
        let bar = self
            .bar
            .get_or_insert_with(|| self.multi.add(create_progress_bar(progress.total)));
        bar.set_position(progress.completed as u64);

        if progress.fraction() >= 1.0 {
            if let Some(bar) = self.bar.take() {
                bar.finish_and_clear();
            }
        }
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        self.idle();
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
