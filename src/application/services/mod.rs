//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod document;
mod translation;

pub use document::{DocumentService, LoadedDocument};
pub use translation::TranslationService;
