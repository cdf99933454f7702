// CLI module for askcat

use clap::Parser;

/// askcat - ask a configured AI provider about a piece of text
#[derive(Parser, Debug)]
#[command(name = "askcat", version, about, long_about = None)]
pub struct Args {
    /// The text to ask about
    pub prompt: String,

    /// Provider id to use instead of the configured active provider
    #[arg(long)]
    pub provider: Option<String>,
}
