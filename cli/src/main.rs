//! CLI entrypoint for waypost
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use waypost_application::ports::llm_gateway::GatewayReply;
use waypost_application::{AssistSession, AssistantGateway, ToolExecutor, ToolSchemaPort};
use waypost_domain::ToolCall;
use waypost_infrastructure::{
    ConfigLoader, FileConfig, JsonSchemaToolConverter, MemoryAssetStore, RetryingGateway,
    ScriptedGateway,
};

#[derive(Parser)]
#[command(name = "waypost", version, about = "Road and vehicle asset inventory assistant")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Explicit config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip config files and use built-in defaults
    #[arg(long, global = true)]
    no_config: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tool catalogue as JSON Schema
    Tools,
    /// Run a find_asset selector against the demo inventory
    Find {
        /// Selection strategy: id, name, nameContains, qrTagId, search
        #[arg(long, default_value = "search")]
        by: String,
        /// Selector value (empty search matches everything)
        #[arg(long, default_value = "")]
        value: String,
        /// Restrict to one asset type: Road or Vehicle
        #[arg(long = "type")]
        asset_type: Option<String>,
        /// Maximum number of results to accept
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Run a scripted end-to-end assistant conversation
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        match ConfigLoader::load(cli.config.as_ref()) {
            Ok(config) => config,
            Err(e) => bail!("failed to load configuration: {e}"),
        }
    };
    info!("starting waypost");

    match cli.command {
        Command::Tools => print_tools(),
        Command::Find {
            by,
            value,
            asset_type,
            limit,
        } => run_find(&config, &by, &value, asset_type.as_deref(), limit).await?,
        Command::Demo => run_demo(&config).await?,
    }

    Ok(())
}

fn print_tools() {
    let executor = ToolExecutor::new(Arc::new(MemoryAssetStore::new()));
    let schemas = JsonSchemaToolConverter.catalogue_schema(executor.catalogue());
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Array(schemas))
            .unwrap_or_else(|_| "[]".to_string())
    );
}

async fn seeded_store(config: &FileConfig) -> Result<Arc<MemoryAssetStore>> {
    let store = Arc::new(MemoryAssetStore::new());
    if config.store.seed_demo_data {
        if let Err(e) = store.seed_demo_data().await {
            bail!("failed to seed demo data: {e}");
        }
    }
    Ok(store)
}

async fn run_find(
    config: &FileConfig,
    by: &str,
    value: &str,
    asset_type: Option<&str>,
    limit: Option<u64>,
) -> Result<()> {
    let store = seeded_store(config).await?;
    let executor = ToolExecutor::new(store);

    let mut arguments = json!({"by": by, "value": value});
    if let Some(t) = asset_type {
        arguments["type"] = json!(t);
    }
    if let Some(n) = limit {
        arguments["limit"] = json!(n);
    }
    let call = ToolCall {
        name: "find_asset".to_string(),
        arguments: arguments.as_object().cloned().unwrap_or_default(),
    };

    let outcome = executor.execute(&call).await;
    println!("{}", outcome.message);
    if let Some(data) = outcome.data {
        println!(
            "{}",
            serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
        );
    }
    if !outcome.success {
        bail!("find failed");
    }
    Ok(())
}

/// A canned conversation exercising the whole loop: draft accumulation,
/// proposal and confirmation, an ambiguous update, and disambiguation by id.
async fn run_demo(config: &FileConfig) -> Result<()> {
    let store = seeded_store(config).await?;
    let executor = Arc::new(ToolExecutor::new(store.clone()));

    let scripted = ScriptedGateway::new();
    scripted.push_reply(GatewayReply::default().with_tool_call(demo_call(
        "create_road",
        json!({"name": "Elm Street", "condition": "good"}),
    )));
    scripted.push_reply(GatewayReply::default().with_tool_call(demo_call(
        "create_road",
        json!({"surfaceType": "blacktop", "trafficVolume": "heavy"}),
    )));
    scripted.push_reply(
        GatewayReply::from_text("Marking Main Street as poor.").with_tool_call(demo_call(
            "update_road_by",
            json!({"by": "nameContains", "value": "Main Street", "fields": {"condition": "poor"}}),
        )),
    );
    let gateway: Arc<dyn AssistantGateway> = Arc::new(RetryingGateway::new(scripted));

    let mut session = AssistSession::new(gateway, executor.clone(), &JsonSchemaToolConverter)
        .with_max_history_turns(config.assistant.max_history_turns);
    if !config.assistant.system_prompt.is_empty() {
        session = session.with_system_prompt(config.assistant.system_prompt.clone());
    }

    let turns = [
        "Add Elm Street, it's in good shape",
        "It's blacktop with heavy traffic",
        "Mark Main Street as poor",
    ];
    for utterance in turns {
        println!("> {utterance}");
        let reply = session.submit(utterance).await?;
        for line in &reply.messages {
            println!("  {line}");
        }
        if let Some(proposal) = reply.proposal {
            println!("  [proposal] {}", proposal.summary);
            let outcome = session.confirm().await?;
            println!("  [{}] {}", if outcome.success { "ok" } else { "failed" }, outcome.message);

            // An ambiguous mutation returns its candidates; pick one by id.
            if let Some(candidates) = outcome.data.filter(|_| !outcome.success) {
                let candidates = candidates.as_array().cloned().unwrap_or_default();
                for c in &candidates {
                    println!("    candidate: {} ({})", c["name"], c["id"]);
                }
                if let Some(id) = candidates.first().and_then(|c| c["id"].as_str()) {
                    println!("> Use the first one ({id})");
                    let fixed = executor
                        .execute(&demo_call(
                            "update_road_by",
                            json!({"by": "id", "value": id, "fields": {"condition": "poor"}}),
                        ))
                        .await;
                    println!(
                        "  [{}] {}",
                        if fixed.success { "ok" } else { "failed" },
                        fixed.message
                    );
                }
            }
        }
        println!();
    }

    Ok(())
}

fn demo_call(name: &str, arguments: serde_json::Value) -> ToolCall {
    ToolCall {
        name: name.to_string(),
        arguments: arguments.as_object().cloned().unwrap_or_default(),
    }
}
