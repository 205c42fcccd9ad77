//! # Gitattrs Architecture
//!
//! Gitattrs ships `.gitattributes` templates and the tooling around them:
//! emitting a template into a project, linting an attributes file, comparing
//! it with a template, and explaining which attributes a path ends up with.
//!
//! Git itself does the actual line-ending normalization. This crate only
//! produces and reads its configuration.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, sets up logging        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, resolves the template name    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - init, check, status, explain, list, show, config         │
//! │  - Operates on Rust types, returns `CmdResult`              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - AttributesStore trait                                    │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Underneath sit the text-level modules: [`parse`] turns a file into a
//! lossless [`parse::Document`], [`matcher`] resolves attributes for a path,
//! [`lint`] collects problems, and [`templates`] holds the embedded files.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Attribute`, `PatternRule`, `Line`
//! - [`parse`]: Line grammar and byte-exact documents
//! - [`matcher`]: Glob matching and last-match-wins resolution
//! - [`lint`]: Diagnostics for `check`
//! - [`templates`]: Built-in templates
//! - [`config`]: User configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod lint;
pub mod matcher;
pub mod model;
pub mod parse;
pub mod store;
pub mod templates;
