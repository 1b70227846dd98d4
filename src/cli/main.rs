use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use reqwest::{Client, RequestBuilder};
use serde_json::json;

#[derive(Parser)]
#[command(name = "facet-search-cli")]
#[command(about = "Facet Search CLI", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    endpoint: String,

    /// User id forwarded as X-User-Id
    #[arg(short, long, env = "FACET_SEARCH_USER", default_value = "anonymous")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List filters available for an item category
    Filters {
        #[arg(short = 't', long, default_value = "All")]
        items_type: String,
    },

    /// Search items
    Search {
        #[arg(short = 't', long)]
        items_type: Option<String>,

        #[arg(short = 'q', long)]
        text: Option<String>,

        /// `[-]Field`, e.g. `-CreationDate`
        #[arg(short, long, allow_hyphen_values = true)]
        order_by: Option<String>,

        /// Filter as `Name=value`; repeatable
        #[arg(short, long = "filter", value_name = "NAME=VALUE")]
        filters: Vec<String>,
    },

    /// List selectable values of a filter
    Values {
        #[arg(value_name = "FILTER")]
        name: String,

        #[arg(short = 'k', long, default_value = "")]
        value_kind: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Autocomplete a prefix
    Suggest {
        #[arg(value_name = "PREFIX")]
        prefix: String,
    },

    /// Check server health
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let authed = |request: RequestBuilder| request.header("X-User-Id", cli.user.as_str());

    let request = match &cli.command {
        Commands::Filters { items_type } => authed(
            client
                .get(format!("{}/v1/search/filters", cli.endpoint))
                .query(&[("itemsType", items_type)]),
        ),

        Commands::Search {
            items_type,
            text,
            order_by,
            filters,
        } => {
            let mut body_filters = Vec::with_capacity(filters.len());
            for filter in filters {
                let (name, value) = filter
                    .split_once('=')
                    .ok_or_else(|| anyhow!("filter '{}' is not NAME=VALUE", filter))?;
                body_filters.push(json!({ "name": name, "value": value }));
            }

            authed(
                client
                    .post(format!("{}/v1/search", cli.endpoint))
                    .json(&json!({
                        "itemCategory": items_type,
                        "searchText": text,
                        "orderBy": order_by,
                        "filters": body_filters,
                    })),
            )
        }

        Commands::Values {
            name,
            value_kind,
            description,
        } => authed(
            client
                .post(format!("{}/v1/search/select-values", cli.endpoint))
                .json(&json!({
                    "name": name,
                    "valueKind": value_kind,
                    "description": description,
                })),
        ),

        Commands::Suggest { prefix } => authed(
            client
                .get(format!("{}/v1/search/autocomplete", cli.endpoint))
                .query(&[("q", prefix)]),
        ),

        Commands::Health => client.get(format!("{}/health", cli.endpoint)),
    };

    let response = request
        .send()
        .await
        .with_context(|| format!("failed to reach {}", cli.endpoint))?;
    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .context("server returned a non-JSON body")?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    if !status.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
