//! # Parent Hub Architecture
//!
//! Parent Hub is a **UI-agnostic directory library** for licensed Ohio childcare
//! programs. It loads a static snapshot of program records, filters it by a set
//! of independent facets, and derives the list, map markers and summary a
//! results page shows. The `parent-hub` binary is one client of it.
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
//! │  - Thin facade over commands, applies configuration         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - browse, cities, facets, show, config                     │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Filtering Core                                             │
//! │  - criteria.rs: the filter request value                    │
//! │  - filter.rs: pure engine, criteria + rows → positions      │
//! │  - host.rs: state, debounced text, views, worker ordering   │
//! │  - worker.rs: off-thread engine over channels               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait                                          │
//! │  - FileStore (JSON snapshot), InMemoryStore (testing)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust values and returns regular Rust
//! types. It never writes to stdout/stderr and never exits the process. Logging
//! goes through the `log` facade; the binary decides where it ends up.
//!
//! ## Testing Strategy
//!
//! 1. **Core and commands**: unit tests next to the code, with fixture records
//!    from [`model::fixtures`] and an [`store::memory::InMemoryStore`].
//! 2. **Engine properties**: `proptest` suites under `tests/`.
//! 3. **Binary**: `assert_cmd` runs against a temporary snapshot and config home.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per user-facing operation
//! - [`criteria`]: Filter request value and facets
//! - [`filter`]: The filter engine
//! - [`host`]: Filter host state and derived views
//! - [`worker`]: Background filter worker and its message protocol
//! - [`debounce`]: Quiet-period buffering for typed text
//! - [`facets`]: Facet option lists and the city index
//! - [`links`]: Slugs, detail URLs, display names
//! - [`model`]: Program records, markers, constants
//! - [`store`]: Snapshot sources
//! - [`config`]: Configuration management
//! - [`init`]: Config directory and snapshot resolution
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod criteria;
pub mod debounce;
pub mod error;
pub mod facets;
pub mod filter;
pub mod host;
pub mod init;
pub mod links;
pub mod model;
pub mod store;
pub mod worker;
