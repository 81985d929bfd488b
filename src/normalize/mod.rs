//! Normalization of provider responses into the canonical types.
//!
//! Each function takes the raw JSON returned by the transport, validates it
//! against its wire shape and applies the per-dialect rules.

pub mod chat;
pub mod images;
pub mod models;

pub use chat::normalize_chat;
pub use images::normalize_images;
pub use models::{dedupe_by_id, normalize_models};
