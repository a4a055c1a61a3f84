//! # Tango Architecture
//!
//! Tango is a **UI-agnostic vocabulary flashcard library**: words with a
//! reading and a meaning, self-rated review tiers, named study lists, a daily
//! study card, and a markdown table format for moving a collection between
//! devices. The `tango` binary is one client of it.
//!
//! ## The Layers
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
//! │  - Normalizes inputs (indexes → ids, list names → ids)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Word store, list store, daily card, import/export        │
//! │  - Operates on the repository, returns Rust types           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository + Gateway (repository.rs, store/)               │
//! │  - Load on open, save the touched document on every change  │
//! │  - FileGateway (production), MemGateway (testing)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two modules sit beside the layers as pure functions: [`daily`] ranks the
//! collection for the daily card and [`table`] encodes and decodes the
//! markdown export format.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through the `log` facade; the binary decides
//! where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): Thorough unit tests against `MemGateway`.
//! 2. **Pure modules** (`daily`, `table`, `index`): Table-driven unit tests.
//! 3. **API** (`api.rs`): Dispatch tests, selectors and list names in, ids out.
//! 4. **CLI** (`tests/`): End-to-end runs of the binary in a temp data dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each area
//! - [`repository`]: The in-memory aggregate and its save points
//! - [`store`]: Persistence gateway trait and implementations
//! - [`model`]: Core data types (`WordEntry`, `VocabularyList`, `DailySelection`)
//! - [`daily`]: Daily card selection
//! - [`table`]: Markdown table codec
//! - [`index`]: Display indexing (1, 2-4, #id notation)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod daily;
pub mod error;
pub mod index;
pub mod model;
pub mod repository;
pub mod store;
pub mod table;
