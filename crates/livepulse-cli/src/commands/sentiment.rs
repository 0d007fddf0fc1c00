use std::time::Duration;

use clap::Subcommand;
use livepulse_core::{Config, SentimentClient};

#[derive(Subcommand)]
pub enum SentimentAction {
    /// Fetch the current sentiment multipliers (neutral if unconfigured)
    Fetch {
        /// Print the payload as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: SentimentAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SentimentAction::Fetch { json } => fetch(json),
    }
}

fn fetch(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let client = SentimentClient::with_timeout(
        config.sentiment.endpoint,
        Duration::from_secs(config.sentiment.timeout_secs),
    );
    let runtime = tokio::runtime::Runtime::new()?;
    let bias = runtime.block_on(client.fetch_or_neutral());

    if json {
        println!("{}", serde_json::to_string_pretty(&bias)?);
        return Ok(());
    }

    println!("anxiety multiplier:  {:.2}", bias.ai_anxiety_multiplier);
    println!("interest multiplier: {:.2}", bias.training_interest_multiplier);
    println!("context: {}", bias.news_context);
    Ok(())
}
