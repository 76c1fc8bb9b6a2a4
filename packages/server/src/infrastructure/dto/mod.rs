//! Data transfer objects for the chat wire protocol and HTTP endpoints.

mod conversion;
pub mod http;
pub mod websocket;
