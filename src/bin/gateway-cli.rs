use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Management CLI for the budget gateway", long_about = None)]
struct Cli {
    /// Gateway base URL.
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway liveness
    Health,
    /// Create a link session token
    LinkToken,
    /// Exchange a public token for an access grant
    Exchange {
        /// One-time public token from the link flow
        public_token: String,
    },
    /// Fetch normalized transactions
    Transactions {
        /// Access grant obtained from `exchange`
        access_token: String,
        /// Range start (YYYY-MM-DD); defaults to 730 days back
        #[arg(long)]
        start_date: Option<String>,
        /// Range end (YYYY-MM-DD); defaults to today
        #[arg(long)]
        end_date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", cli.url)).send().await?,
        Commands::LinkToken => {
            client
                .post(format!("{}/create_link_token", cli.url))
                .send()
                .await?
        }
        Commands::Exchange { public_token } => {
            client
                .post(format!("{}/exchange_token", cli.url))
                .json(&serde_json::json!({ "public_token": public_token }))
                .send()
                .await?
        }
        Commands::Transactions {
            access_token,
            start_date,
            end_date,
        } => {
            let mut query = vec![("access_token", access_token)];
            if let Some(start) = start_date {
                query.push(("start_date", start));
            }
            if let Some(end) = end_date {
                query.push(("end_date", end));
            }
            client
                .get(format!("{}/get_transactions", cli.url))
                .query(&query)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
