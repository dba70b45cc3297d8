//! # chirp
//!
//! Terminal front-end: every line read from stdin is handed to the command
//! interpreter, and every store event is printed as it happens.

use std::sync::Arc;

use anyhow::Context;
use chirp_client::{init_tracing, AppState, ClientConfig};
use chirp_shared::constants::APP_NAME;
use chirp_shared::{Message, MessageStatus};
use chirp_store::StoreEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting {} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::from_env();
    info!(?config, "Loaded configuration");

    let state = AppState::new(config).context("failed to open settings")?;

    // Observers run under whichever task mutated the store; hand events to a
    // dedicated printer task instead.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<StoreEvent>();
    state.store.subscribe(Arc::new(move |event: &StoreEvent| {
        let _ = event_tx.send(event.clone());
    }));
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            render(&event);
        }
    });

    let mut nick_changes = state.identity.subscribe();
    let nick_watcher = tokio::spawn(async move {
        while let Ok(nickname) = nick_changes.recv().await {
            info!(%nickname, "identity changed");
        }
    });

    println!(
        "{APP_NAME}: you are {}. Type /help for commands.",
        state.identity.get()
    );

    let interpreter = state.interpreter();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        // A rejected nickname or empty send is reported, not fatal.
        if let Err(e) = interpreter.submit(&line).await {
            eprintln!("! {e}");
        }
    }

    info!("stdin closed, shutting down");
    printer.abort();
    nick_watcher.abort();
    Ok(())
}

fn render(event: &StoreEvent) {
    match event {
        StoreEvent::MessageAppended(message) => println!("{}", format_message(message)),
        StoreEvent::StatusChanged {
            status: MessageStatus::Failed,
            message,
            ..
        } => println!("! failed to send: {}", message.content),
        StoreEvent::StatusChanged { .. } | StoreEvent::Evicted(_) => {}
        StoreEvent::Cleared => println!("-- history cleared --"),
    }
}

fn format_message(message: &Message) -> String {
    let time = message.created_at.format("%H:%M:%S");
    match &message.recipient {
        Some(recipient) if message.is_own_message => {
            format!("[{time}] -> {recipient}: {}", message.content)
        }
        Some(_) => format!("[{time}] <- {}: {}", message.sender, message.content),
        None => format!("[{time}] <{}> {}", message.sender, message.content),
    }
}
