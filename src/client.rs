//! Client entry point: the four provider operations plus the moderation gate.
//!
//! Operations are split into submodules under `src/client/`, each adding an
//! `impl CompatClient` block.

pub mod builder;
pub mod chat;
pub mod core;
mod images;
mod models;
mod moderation;

pub use builder::CompatClientBuilder;
pub use chat::ChatGenerateRequest;
pub use core::CompatClient;
