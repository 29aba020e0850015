//! Counter demo binary
//!
//! Reads `+`, `-` and `quit` from stdin and re-renders after every dispatch.

use anyhow::Context;
use counter::{Command, CounterReducer, render};
use std::io::{self, BufRead};
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unistore_runtime::{Store, StoreConfig};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter=debug,unistore_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    unistore_runtime::metrics::describe_metrics();

    let store = Rc::new(Store::with_config(
        CounterReducer,
        None,
        StoreConfig::default().with_label("counter"),
    ));
    tracing::info!(count = *store.get_state(), "Initial state");

    // Render on every change
    let view = Rc::downgrade(&store);
    let _render = store.subscribe(move || {
        if let Some(store) = view.upgrade() {
            println!("{}", render(*store.get_state()));
        }
    });

    // Log every change
    let log = Rc::downgrade(&store);
    let _log = store.subscribe(move || {
        if let Some(store) = log.upgrade() {
            tracing::info!(count = *store.get_state(), "updated");
        }
    });

    println!("{}", render(*store.get_state()));

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        match line.parse::<Command>() {
            Ok(Command::Dispatch(action)) => store.dispatch(action)?,
            Ok(Command::Quit) => break,
            Err(error) => eprintln!("{error}"),
        }
    }

    Ok(())
}
