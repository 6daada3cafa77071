//! doctree: document tree node model
//!
//! - `domain`: attributes, nodes and the arena-backed [`DocumentTree`](domain::DocumentTree)
//!   with parent-relative navigation and paths
//! - `application`: element construction, JSON import/export, translation lookup
//! - `infrastructure`: filesystem boundary and service container
//! - `config`, `cli`: settings and the `doctree` binary

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
