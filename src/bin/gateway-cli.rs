use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Smoke-test client for a running Zone01 gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway liveness
    Health,
    /// Sign in and print the JWT
    Signin {
        #[arg(short, long)]
        identity: String,
        #[arg(short, long, env = "ZONE01_PASSWORD")]
        password: String,
    },
    /// Run a GraphQL query with a previously obtained JWT
    Query {
        #[arg(short, long, env = "ZONE01_TOKEN")]
        token: String,
        /// GraphQL document, e.g. '{ user { id login } }'
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/healthz", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Signin { identity, password } => {
            let res = client
                .post(format!("{}/auth/signin", cli.url))
                .json(&json!({ "identity": identity, "password": password }))
                .send()
                .await?;
            if !res.status().is_success() {
                return report_failure(res).await;
            }
            let body: Value = res.json().await?;
            let token = body
                .get("token")
                .and_then(Value::as_str)
                .ok_or("gateway response carried no token")?;
            println!("{}", token);
        }
        Commands::Query { token, query } => {
            let mut headers = HeaderMap::new();
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
            let res = client
                .post(format!("{}/graphql", cli.url))
                .headers(headers)
                .json(&json!({ "query": query }))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if !res.status().is_success() {
        return report_failure(res).await;
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Print the failed response body and turn the status into an error, so the
/// process exits non-zero.
async fn report_failure(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if let Ok(text) = res.text().await {
        eprintln!("Response: {}", text);
    }
    Err(format!("gateway returned status {}", status).into())
}
