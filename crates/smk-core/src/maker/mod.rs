//! # Session maker — spreadsheet ↔ SecureCRT XML / RDM JSON
//!
//! Three representations of one inventory:
//! - **Tables** — column-oriented rows (sessions, credentials, firewalls, hosts)
//! - **SecureCRT tree** — nested `<key name=…>` folders with templated leaves
//! - **RDM connection list** — flat typed objects linked by ids and paths
//!
//! Architecture:
//! - `types` — sheet kinds and schemas, session and connection types, sheet traits
//! - `error` — maker error type and non-fatal build warnings
//! - `settings` — YAML configuration (sheet names, headers, templates, defaults)
//! - `columns` — header ↔ semantic key normalization and column materialization
//! - `table` — the tabular session store
//! - `defaults` — layered default merging and path normalization
//! - `xml_tree` — generic XML element tree with quick-xml parse/write
//! - `scrt` — SecureCRT tree builder, duplicate-folder merge and walker
//! - `rdm` — RDM connection list arena and builders
//! - `document` — whole-file XML/JSON output
//! - `service` — `ScrtSessionMaker` / `RdmSessionMaker` façades

pub mod types;
pub mod error;
pub mod settings;
pub mod columns;
pub mod table;
pub mod defaults;
pub mod xml_tree;
pub mod scrt;
pub mod rdm;
pub mod document;
pub mod service;

// Re-exports
pub use types::*;
pub use error::{BuildWarning, MakerError, MakerResult};
pub use settings::Settings;
pub use table::Table;
pub use xml_tree::XmlNode;
pub use rdm::ConnectionList;
pub use service::{RdmSessionMaker, ScrtSessionMaker};
