//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    infrastructure::{ChatHub, InMemoryStreamDirectory},
    usecase::{DisconnectChatUseCase, JoinStreamChatUseCase, RelayChatMessageUseCase},
};

use super::{
    handler::{
        http::{get_chat_rooms, health_check, rtmp_publish, rtmp_unpublish},
        websocket::stream_chat_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Stream chat server
///
/// Encapsulates the wired use cases and exposes the router for embedding
/// (integration tests bind it to an ephemeral port) plus a `run` method for
/// the binary.
pub struct Server {
    join_chat_usecase: Arc<JoinStreamChatUseCase>,
    disconnect_chat_usecase: Arc<DisconnectChatUseCase>,
    relay_chat_message_usecase: Arc<RelayChatMessageUseCase>,
    hub: Arc<ChatHub>,
    directory: Arc<InMemoryStreamDirectory>,
}

impl Server {
    pub fn new(
        join_chat_usecase: Arc<JoinStreamChatUseCase>,
        disconnect_chat_usecase: Arc<DisconnectChatUseCase>,
        relay_chat_message_usecase: Arc<RelayChatMessageUseCase>,
        hub: Arc<ChatHub>,
        directory: Arc<InMemoryStreamDirectory>,
    ) -> Self {
        Self {
            join_chat_usecase,
            disconnect_chat_usecase,
            relay_chat_message_usecase,
            hub,
            directory,
        }
    }

    /// Build the axum router with all routes and shared state.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            join_chat_usecase: self.join_chat_usecase,
            disconnect_chat_usecase: self.disconnect_chat_usecase,
            relay_chat_message_usecase: self.relay_chat_message_usecase,
            hub: self.hub,
            directory: self.directory,
        });

        Router::new()
            // WebSocket chat endpoint
            .route("/api/streams/ws/{stream_key}/chat", get(stream_chat_handler))
            // RTMP hooks from nginx-rtmp
            .route("/api/rtmp/publish", post(rtmp_publish))
            .route("/api/rtmp/unpublish", post(rtmp_unpublish))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/debug/rooms", get(get_chat_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the stream chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Stream chat server listening on {}", listener.local_addr()?);
        tracing::info!(
            "Connect to: ws://{}/api/streams/ws/{{stream_key}}/chat",
            bind_addr
        );
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
