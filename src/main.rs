use anyhow::{Context, Result};
use meetupai::{MeetupAiConfig, OpenAiBackend, PipelineOrchestrator, PlacesApiClient};
use std::io::{self, Write};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let config = MeetupAiConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);

    println!("## Welcome to the Meetup Coordination Crew");
    println!("-------------------------------");
    println!("📋 The system will analyze your group's poll responses and find suitable venues!");
    println!();

    let location = prompt_location()?;

    let places = PlacesApiClient::new(&config.places)?;
    let backend = OpenAiBackend::new(&config.backend)?;
    let orchestrator = PipelineOrchestrator::new(&places, &backend, &config);

    match orchestrator.run(&location, config.defaults.group_size).await {
        Ok(result) => {
            println!("\n\n{}", result.render());
            Ok(())
        }
        Err(err) => {
            error!("Pipeline failed: {err}");
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    }
}

fn init_tracing(config: &MeetupAiConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn prompt_location() -> Result<String> {
    println!("What location/area should we search for venues? (e.g., 'Brunswick, VIC, Australia')");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read location input")?;

    Ok(line.trim().to_string())
}
