//! XaTube live stream chat service.
//!
//! Per-stream WebSocket fan-out: clients join a chat room keyed by the
//! stream key of a live channel, and every message a client sends is
//! validated, stamped and rebroadcast to all current members of that room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
