//! Ask command handler.
//!
//! Runs one question through the same pipeline the server uses.

use agrigenius_core::config::AppConfig;
use agrigenius_pipeline::build_pipeline;
use anyhow::Context;
use clap::Args;

/// Ask an agriculture question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question, in any supported language
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Language to answer in when the question gives nothing to detect
    #[arg(short, long)]
    pub language: Option<String>,

    /// Print the answer envelope as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print which source produced the answer
    #[arg(long)]
    pub show_source: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        let question = self.question.join(" ");
        tracing::debug!(chars = question.chars().count(), "Ask command");

        let pipeline = build_pipeline(config)
            .await
            .context("Failed to start the assistant")?;
        let resolution = pipeline.resolve(&question, self.language.as_deref()).await;

        if self.json {
            let body = serde_json::to_string_pretty(&resolution.envelope)?;
            println!("{}", body);
        } else {
            println!("{}", resolution.answer());
            if self.show_source {
                eprintln!(
                    "\n[source: {}, language: {}]",
                    resolution.source, resolution.envelope.detected_language
                );
            }
        }
        Ok(())
    }
}
