//! Canonical types exposed by the adapter.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`message`] | Chat history, model selection and the normalized chat result |
//! | [`tool`] | Function-calling definitions |
//! | [`image`] | Image generation request and output |
//! | [`model`] | Model descriptors returned by listing |
//! | [`moderation`] | Moderation response and gate verdict |

pub mod image;
pub mod message;
pub mod model;
pub mod moderation;
pub mod tool;

pub use image::{GeneratedImage, ImageModel, ImageQuality, ImageRequest, ImageSize, ImageStyle};
pub use message::{ChatGenerateOutput, ChatHistoryEntry, ChatModel, MessageFinishReason, MessageRole};
pub use model::{ModelDescriptor, ModelInterface};
pub use moderation::{ModerationResponse, ModerationResult, ModerationVerdict};
pub use tool::{FunctionParameters, FunctionSpec, PropertySpec, PropertyType};
