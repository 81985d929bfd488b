//! Per-dialect model tables: raw provider records to [`ModelDescriptor`](crate::types::ModelDescriptor),
//! plus the family comparators used when sorting listings.
//!
//! These are pure functions; listing orchestration lives in
//! [`normalize::models`](crate::normalize::models).

pub mod local;
pub mod mistral;
pub mod openai;
pub mod openrouter;
pub mod togetherai;
