//! Scripted demo for the todo application.
//!
//! Runs a short session against the store and prints the list after each
//! step, along with what ended up in the shadow title index.
//!
//! ```bash
//! # In-memory storage
//! cargo run --bin todomvc
//!
//! # Persist across runs
//! TODOMVC_STORAGE_PATH=./todos.json RUST_LOG=debug cargo run --bin todomvc
//! ```

use todomvc::{Filter, TodoAction, TodoConfig, TodoState, TodoStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = TodoConfig::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
    todomvc_runtime::metrics::describe_metrics();

    println!("=== TodoMVC ===\n");

    let storage = todomvc::open_storage(&config)?;
    let store = todomvc::build_store(&config, storage);

    let restored = store.state(TodoState::len).await;
    if restored > 0 {
        println!("Restored {restored} todos from storage");
    }

    println!("Adding todos...");
    for title in ["buy some cheese", "feed the cat", "book a doctors appointment"] {
        store.send(TodoAction::add(title)).await?;
    }
    print_list(&store, Filter::All).await;
    print_shadow(&store);

    println!("\nCompleting 'feed the cat'...");
    let id = store
        .state(|s| {
            s.todos
                .iter()
                .find(|t| t.title == "feed the cat")
                .map(|t| t.id.clone())
        })
        .await;
    if let Some(id) = id {
        store.send(TodoAction::toggle(id)).await?;
    }
    print_list(&store, Filter::Active).await;
    print_list(&store, Filter::Completed).await;

    println!("\nDispatching raw actions...");
    todomvc::dispatch_json(
        &store,
        r#"{"type":"ADD_ITEM","payload":{"title":"walk the dog"}}"#,
    )
    .await?;
    if let Err(err) = todomvc::dispatch_json(&store, r#"{"type":"ARCHIVE_ITEM"}"#).await {
        println!("  rejected: {err}");
    }
    print_list(&store, Filter::All).await;
    print_shadow(&store);

    println!("\nClearing completed...");
    store.send(TodoAction::RemoveCompletedItems).await?;
    print_list(&store, Filter::All).await;
    print_shadow(&store);

    store.shutdown();
    println!("\n=== Demo Complete ===");
    Ok(())
}

async fn print_list(store: &TodoStore, filter: Filter) {
    let state = store.state(Clone::clone).await;
    println!("\n{} ({})", filter.route(), state.counter_text());
    for todo in state.visible(filter) {
        let status = if todo.completed { "✓" } else { " " };
        println!("  [{status}] {} ({})", todo.title, todo.id);
    }
}

fn print_shadow(store: &TodoStore) {
    let entries = store.environment().shadow.entries();
    println!("Shadow index: {} entries", entries.len());
    for (timestamp, title) in entries {
        println!("  {timestamp} → {title}");
    }
}
