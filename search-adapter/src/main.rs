use std::process;

use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use tracing::{error, info};

use search_adapter::{logging, AppError, Dependencies};
use search_adapter_repository::SearchBuilder;
use search_adapter_shared::IndexName;

#[derive(Parser)]
#[command(name = "search-adapter")]
#[command(about = "Operator commands against the configured search service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an index
    CreateIndex {
        name: String,

        /// Index settings as a JSON object
        #[arg(long)]
        options: Option<String>,
    },
    /// Delete an index and its documents
    DeleteIndex { name: String },
    /// Delete every document in an index
    Flush { index: String },
    /// Run a multi_match search and print the raw response
    Search {
        index: String,
        query: String,

        /// Field to search; repeat for several (default: id)
        #[arg(long = "field")]
        fields: Vec<String>,

        /// 1-based page number; enables pagination
        #[arg(long)]
        page: Option<u32>,

        /// Hits per page when paginating
        #[arg(long, default_value = "20")]
        per_page: u32,
    },
}

fn parse_options(raw: Option<&str>) -> Result<Map<String, Value>, AppError> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };

    match serde_json::from_str(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::config("--options must be a JSON object")),
    }
}

async fn run(cli: Cli) -> Result<Value, AppError> {
    let deps = Dependencies::new()?;
    let adapter = deps.adapter()?;

    match cli.command {
        Commands::CreateIndex { name, options } => {
            let options = parse_options(options.as_deref())?;
            adapter.create_index(&IndexName::new(name.as_str()), options).await?;
            Ok(json!({ "created": name }))
        }
        Commands::DeleteIndex { name } => {
            adapter.delete_index(&IndexName::new(name.as_str())).await?;
            Ok(json!({ "deleted": name }))
        }
        Commands::Flush { index } => {
            adapter.flush(&IndexName::new(index.as_str())).await?;
            Ok(json!({ "flushed": index }))
        }
        Commands::Search {
            index,
            query,
            fields,
            page,
            per_page,
        } => {
            let mut builder = SearchBuilder::new(index, query);
            if !fields.is_empty() {
                builder = builder.fields(fields);
            }

            let response = match page {
                Some(page) => adapter.paginate(&builder, per_page, page).await?,
                None => adapter.search(&builder).await?,
            };
            info!(
                total = adapter.total_count(&response),
                hits = response.raw_hits().len(),
                "Search finished"
            );
            Ok(response.into_value())
        }
    }
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!(error = %e, "Failed to render output");
                process::exit(1);
            }
        },
        Err(e) => {
            error!(error = %e, "Command failed");
            process::exit(1);
        }
    }
}
