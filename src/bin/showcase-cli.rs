use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "showcase-cli")]
#[command(about = "Query a running showcase backend", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Liveness check
    Health,
    /// Status, version and uptime
    Details,
    /// Probe each dependency
    Dependencies,
    /// Details with live dependency results
    Report,
    /// List directory users
    Users,
    /// Generate sample chart data
    Chart {
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
}

impl Commands {
    fn path(&self) -> String {
        match self {
            Commands::Health => "/health".to_string(),
            Commands::Details => "/health/details".to_string(),
            Commands::Dependencies => "/health/dependencies".to_string(),
            Commands::Report => "/health/report".to_string(),
            Commands::Users => "/api/users".to_string(),
            Commands::Chart { count } => format!("/api/chart?count={}", count),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path());
    let res = client.get(url).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
