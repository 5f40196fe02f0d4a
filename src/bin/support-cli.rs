use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "support-cli")]
#[command(about = "Command line client for the support box API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "SUPPORT_BOX_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Service and RPC health
    Health,
    /// Show the portfolio profile
    Profile,
    /// List supported networks
    Networks,
    /// Show the donor wallet balance
    Balance,
    /// Estimate the USD value of an amount
    Quote { amount: String },
    /// Donate an amount of the native token
    Donate {
        amount: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Check a submitted donation
    Status { tx_hash: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{base}/health")).send().await?,
        Commands::Profile => client.get(format!("{base}/api/v1/profile")).send().await?,
        Commands::Networks => client.get(format!("{base}/api/v1/networks")).send().await?,
        Commands::Balance => client.get(format!("{base}/api/v1/balance")).send().await?,
        Commands::Quote { amount } => {
            client
                .post(format!("{base}/api/v1/quote"))
                .json(&json!({ "amount": amount }))
                .send()
                .await?
        }
        Commands::Donate { amount, yes } => return donate(&client, base, &amount, yes).await,
        Commands::Status { tx_hash } => {
            client
                .get(format!("{base}/api/v1/donations/{tx_hash}"))
                .send()
                .await?
        }
    };

    print_response(res).await?;
    Ok(())
}

/// Ask for a confirmation prompt first unless `--yes` was given.
async fn donate(
    client: &reqwest::Client,
    base: &str,
    amount: &str,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("{base}/api/v1/donations");
    let res = client
        .post(&url)
        .json(&json!({ "amount": amount, "confirmed": yes }))
        .send()
        .await?;
    let body = print_response(res).await?;

    let needs_confirmation =
        body.as_ref().and_then(|b| b["status"].as_str()) == Some("confirmation_required");
    if needs_confirmation && confirm()? {
        let res = client
            .post(&url)
            .json(&json!({ "amount": amount, "confirmed": true }))
            .send()
            .await?;
        print_response(res).await?;
    }
    Ok(())
}

fn confirm() -> std::io::Result<bool> {
    use std::io::Write;

    print!("Proceed? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Print the body; returns it when the request succeeded.
async fn print_response(res: reqwest::Response) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let json: Option<Value> = serde_json::from_str(&text).ok();

    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        match json.as_ref().and_then(|v| v["error"].as_str()) {
            Some(error) => eprintln!("{}", error),
            None => eprintln!("Response: {}", text),
        }
        return Ok(None);
    }

    match &json {
        Some(v) => println!("{}", serde_json::to_string_pretty(v)?),
        None => println!("{}", text),
    }
    Ok(json)
}
