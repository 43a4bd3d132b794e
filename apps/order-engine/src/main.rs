//! Order Engine Binary
//!
//! Wires the order lifecycle core from configuration and serves commands
//! read as JSON lines from stdin, writing one JSON result line per command
//! to stdout.
//!
//! # Usage
//!
//! ```bash
//! echo '{"op":"create","context":{"userId":"u1"},"request":{"userId":"u1","type":"buy","items":[{"productId":"p1","quantity":1}]}}' \
//!   | cargo run --bin order-engine
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_ENGINE_CONFIG`: Path to the YAML config file (default: built-in defaults)
//! - `RUST_LOG`: Log filter, overrides `logging.level`

use anyhow::Context;
use order_engine::application::dto::{CreateOrderRequest, ListOrdersOptions, UpdateOrderStatusRequest};
use order_engine::config::{Config, LogFormat, LoggingConfig, load_config};
use order_engine::infrastructure::catalog::StaticProductCatalog;
use order_engine::infrastructure::events::TracingEventPublisher;
use order_engine::infrastructure::pricing::FlatPricingCalculator;
use order_engine::{
    InMemoryContainer, InMemoryOrderRepository, OrderLifecycleError, OrderLifecycleService,
    RequestContext,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

/// One command line on stdin.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Command {
    Create {
        context: RequestContext,
        request: CreateOrderRequest,
    },
    Get {
        context: RequestContext,
        #[serde(rename = "orderId")]
        order_id: String,
    },
    List {
        context: RequestContext,
        #[serde(default, rename = "userId")]
        user_id: Option<String>,
        #[serde(default)]
        options: ListOrdersOptions,
    },
    UpdateStatus {
        context: RequestContext,
        #[serde(flatten)]
        request: UpdateOrderStatusRequest,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("ORDER_ENGINE_CONFIG") {
        Ok(path) => load_config(Some(&path)).with_context(|| format!("loading {path}"))?,
        Err(_) => Config::default(),
    };

    init_tracing(&config.logging);

    tracing::info!(
        default_currency = %config.orders.default_currency,
        transition_policy = ?config.orders.transition_policy,
        products = config.catalog.products.len(),
        "Starting order engine"
    );

    let container = InMemoryContainer::from_config(&config);
    let service = container.order_lifecycle_service();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let output = match serde_json::from_str::<Command>(&line) {
            Ok(command) => execute(&service, command).await,
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable command");
                json!({ "error": { "kind": "bad_request", "message": e.to_string() } })
            }
        };

        stdout.write_all(output.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!(orders = container.order_repo().len(), "Input closed, shutting down");
    Ok(())
}

type Service = OrderLifecycleService<
    InMemoryOrderRepository,
    StaticProductCatalog,
    FlatPricingCalculator,
    TracingEventPublisher,
>;

async fn execute(service: &Service, command: Command) -> Value {
    match command {
        Command::Create { context, request } => {
            render(service.create_order(&context, request).await)
        }
        Command::Get { context, order_id } => {
            render(service.get_order_by_id(&context, &order_id).await)
        }
        Command::List {
            context,
            user_id,
            options,
        } => render(
            service
                .list_orders_by_user(&context, user_id.as_deref(), options)
                .await,
        ),
        Command::UpdateStatus { context, request } => render(
            service
                .update_order_status(&context, &request.order_id, &request.status)
                .await,
        ),
    }
}

fn render<T: Serialize>(result: Result<T, OrderLifecycleError>) -> Value {
    let error = match result {
        Ok(value) => match serde_json::to_value(value) {
            Ok(value) => return json!({ "ok": value }),
            Err(e) => json!({ "kind": "serialization", "message": e.to_string() }),
        },
        Err(e) => json!({ "kind": e.kind(), "message": e.to_string() }),
    };
    json!({ "error": error })
}

/// Initialize tracing; `RUST_LOG` overrides the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so stdout carries only results.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
