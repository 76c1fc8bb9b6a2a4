//! XaTube stream chat server.
//!
//! Per-stream WebSocket fan-out: validates the stream key against the
//! directory, then rebroadcasts every chat message to the whole room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chat-server -- --stream-key abc123
//! cargo run --bin chat-server -- --host 0.0.0.0 --port 3000 --stream-key abc123
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;

use xatube_chat_server::{
    domain::StreamKey,
    infrastructure::{ChatHub, InMemoryStreamDirectory},
    ui::Server,
    usecase::{DisconnectChatUseCase, JoinStreamChatUseCase, RelayChatMessageUseCase},
};
use xatube_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "chat-server")]
#[command(about = "Live stream chat fan-out server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Stream key to register in the stream directory at startup
    /// (repeatable). Stands in for the platform's channel table.
    #[arg(long = "stream-key")]
    stream_keys: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. StreamDirectory
    // 2. ChatHub (over the shared room registry)
    // 3. UseCases
    // 4. Server

    let directory = Arc::new(InMemoryStreamDirectory::with_keys(
        args.stream_keys.into_iter().map(StreamKey::new),
    ));

    let rooms = Arc::new(Mutex::new(HashMap::new()));
    let hub = Arc::new(ChatHub::new(rooms));

    let join_chat_usecase = Arc::new(JoinStreamChatUseCase::new(directory.clone(), hub.clone()));
    let disconnect_chat_usecase = Arc::new(DisconnectChatUseCase::new(hub.clone()));
    let relay_chat_message_usecase = Arc::new(RelayChatMessageUseCase::new(
        hub.clone(),
        Arc::new(SystemClock),
    ));

    let server = Server::new(
        join_chat_usecase,
        disconnect_chat_usecase,
        relay_chat_message_usecase,
        hub,
        directory,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
