//! Todo demo binary
//!
//! Reads `add <text>`, `toggle <id>`, `filter <all|active|completed>` and
//! `quit` from stdin. Every dispatch re-renders the visible list and footer.

use anyhow::Context;
use std::io::{self, BufRead};
use std::rc::Rc;
use todo::{Command, TodoAction, TodoApp, TodoIdGenerator, view};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unistore_runtime::{Store, StoreConfig};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=debug,unistore_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    unistore_runtime::metrics::describe_metrics();

    let store = Rc::new(Store::with_config(
        TodoApp,
        None,
        StoreConfig::default().with_label("todo"),
    ));

    // Render on every change
    let view_store = Rc::downgrade(&store);
    let _render = store.subscribe(move || {
        if let Some(store) = view_store.upgrade() {
            println!("{}", view::render(&store.get_state()));
        }
    });

    // Log every change as JSON
    let log_store = Rc::downgrade(&store);
    let _log = store.subscribe(move || {
        if let Some(store) = log_store.upgrade() {
            match serde_json::to_string(&*store.get_state()) {
                Ok(json) => tracing::info!(state = %json, "updated"),
                Err(error) => tracing::warn!(%error, "Failed to serialize state"),
            }
        }
    });

    println!("{}", view::render(&store.get_state()));

    let mut ids = TodoIdGenerator::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let action = match line.parse::<Command>() {
            Ok(Command::Add(text)) => TodoAction::add(&mut ids, text),
            Ok(Command::Toggle(id)) => TodoAction::ToggleTodo { id },
            Ok(Command::Filter(filter)) => TodoAction::SetVisibilityFilter { filter },
            Ok(Command::Quit) => break,
            Err(error) => {
                eprintln!("{error}");
                continue;
            }
        };
        store.dispatch(action)?;
    }

    Ok(())
}
