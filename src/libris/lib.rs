//! # Libris Architecture
//!
//! Libris is a **UI-agnostic personal book catalogue**. The CLI in this crate is one
//! client of the library; nothing below the API layer knows it exists.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves id prefixes to stored ids                       │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + Views (views.rs)           │
//! │  - Business rules and derived projections                   │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - BookStore: in-memory collection mirrored to one blob     │
//! │  - BlobStore trait: FsBlobStore (production),               │
//! │    MemBlobStore (testing)                                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence model
//!
//! The whole collection is one JSON array under a single key. Every mutation
//! rewrites the array; the in-memory copy only changes once the write has
//! succeeded, so a failed write leaves both sides as they were. See
//! [`store`] for the details.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; the binary decides where they end up
//! (see [`logging`]).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`views`]: Search, filters, grouping, sampling and statistics
//! - [`store`]: Blob storage abstraction and the book collection
//! - [`model`]: Core data types (`Book`, `BookStatus`, `Genre`)
//! - [`config`]: Configuration management
//! - [`logging`]: Subscriber setup for binaries
//! - [`error`]: Error types
//! - `cli`: Argument parsing and rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod views;
