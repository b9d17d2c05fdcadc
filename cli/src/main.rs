use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status} for {path}: {message}")]
    ServerError { status: u16, path: String, message: String },
    #[error("invalid sort key `{0}`; expected column or column:desc")]
    InvalidSort(String),
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "partsdash-cli", about = "Parts sales dashboard API CLI")]
struct Cli {
    #[arg(long, env = "PARTSDASH_URL", default_value = "http://localhost:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    /// Section cards and the sales series for one range.
    Dashboard {
        #[arg(long, default_value = "90d")]
        range: String,
    },
    /// Training curves and model cards.
    Models(SelectionArgs),
    /// History and forecast band for one product.
    Predict(SelectionArgs),
    /// One page of the parts table.
    Inventory(InventoryArgs),
    Chat {
        message: String,
    },
}

#[derive(Args, Debug)]
struct SelectionArgs {
    #[arg(long)]
    product: Option<String>,
    #[arg(long)]
    model: Option<String>,
}

#[derive(Args, Debug, Default)]
struct InventoryArgs {
    #[arg(long)]
    producto: Option<String>,
    #[arg(long)]
    serie: Option<String>,
    #[arg(long)]
    status: Option<String>,
    /// Repeatable; `column` or `column:desc`, highest priority first.
    #[arg(long = "sort")]
    sort: Vec<String>,
    #[arg(long)]
    page_size: Option<usize>,
    /// Zero-based page index.
    #[arg(long)]
    page: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let base_url = cli.base_url.trim_end_matches('/').to_owned();
    let client = reqwest::Client::new();

    match cli.command {
        Command::Ping => run_ping(&client, &base_url).await,
        Command::Dashboard { range } => {
            let query = [("range", range.as_str())];
            let json = api_get(&client, &base_url, "/api/dashboard", &query).await?;
            print_json(&json)
        }
        Command::Models(selection) => {
            let json = api_get(&client, &base_url, "/api/models", &selection_query(&selection)).await?;
            print_json(&json)
        }
        Command::Predict(selection) => {
            let json = api_get(&client, &base_url, "/api/predict", &selection_query(&selection)).await?;
            print_json(&json)
        }
        Command::Inventory(args) => run_inventory(&client, &base_url, &args).await,
        Command::Chat { message } => {
            let body = json!({ "message": message });
            let json = api_request(&client, &base_url, reqwest::Method::POST, "/api/chat", Some(body)).await?;
            let reply = json.get("reply").and_then(Value::as_str).ok_or(CliError::MissingField("reply"))?;
            println!("{reply}");
            Ok(())
        }
    }
}

async fn run_ping(client: &reqwest::Client, base_url: &str) -> Result<(), CliError> {
    let response = client.get(format!("{base_url}/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            path: "/healthz".to_owned(),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

/// Opens a table session with the requested state, prints it, then closes it.
async fn run_inventory(client: &reqwest::Client, base_url: &str, args: &InventoryArgs) -> Result<(), CliError> {
    let body = json!({ "commands": inventory_commands(args)? });
    let view = api_request(client, base_url, reqwest::Method::POST, "/api/inventory/tables", Some(body)).await?;
    print_json(&view)?;

    let id = view.get("id").and_then(Value::as_str).ok_or(CliError::MissingField("id"))?;
    let path = format!("/api/inventory/tables/{id}");
    api_request(client, base_url, reqwest::Method::DELETE, &path, None).await?;
    Ok(())
}

fn inventory_commands(args: &InventoryArgs) -> Result<Vec<Value>, CliError> {
    let mut commands = Vec::new();
    for (column, value) in [("producto", &args.producto), ("numeroSerie", &args.serie), ("status", &args.status)] {
        if let Some(value) = value {
            commands.push(json!({ "op": "set_filter", "column": column, "value": value }));
        }
    }
    if !args.sort.is_empty() {
        let sorting = args.sort.iter().map(|raw| parse_sort_key(raw)).collect::<Result<Vec<_>, _>>()?;
        commands.push(json!({ "op": "set_sorting", "sorting": sorting }));
    }
    if let Some(size) = args.page_size {
        commands.push(json!({ "op": "set_page_size", "size": size }));
    }
    if let Some(index) = args.page {
        commands.push(json!({ "op": "set_page_index", "index": index }));
    }
    Ok(commands)
}

fn parse_sort_key(raw: &str) -> Result<Value, CliError> {
    let (column, desc) = match raw.split_once(':') {
        None => (raw, false),
        Some((column, "desc")) => (column, true),
        Some((column, "asc")) => (column, false),
        Some(_) => return Err(CliError::InvalidSort(raw.to_owned())),
    };
    if column.is_empty() {
        return Err(CliError::InvalidSort(raw.to_owned()));
    }
    Ok(json!({ "column": column, "desc": desc }))
}

/// Query pairs for the flags that were given; reqwest encodes the values.
fn selection_query(selection: &SelectionArgs) -> Vec<(&'static str, &str)> {
    [("product", &selection.product), ("model", &selection.model)]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
        .collect()
}

async fn api_get(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Value, CliError> {
    let request = client.get(format!("{base_url}{path}")).query(query);
    send_json(request, path).await
}

async fn api_request(
    client: &reqwest::Client,
    base_url: &str,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let url = format!("{base_url}{path}");
    let request = client.request(method, &url);
    let request = if let Some(json) = body { request.json(&json) } else { request };
    send_json(request, path).await
}

async fn send_json(request: reqwest::RequestBuilder, path: &str) -> Result<Value, CliError> {
    let response = request.send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            path: path.to_owned(),
            message: value.to_string(),
        });
    }
    Ok(value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
