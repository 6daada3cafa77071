//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod dom;
pub mod error;
pub mod error_ext;
pub mod export;
pub mod services;

pub use dom::{create_element, no_attrs, Child, Children};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use export::{node_to_json, DocumentSpec};
