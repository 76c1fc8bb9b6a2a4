//! Infrastructure layer: concrete implementations behind the domain
//! interfaces, plus the wire DTOs.

pub mod directory;
pub mod dto;
pub mod hub;

pub use directory::InMemoryStreamDirectory;
pub use hub::{ChatHub, RoomRegistry};
