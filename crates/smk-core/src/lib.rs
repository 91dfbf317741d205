//! # smk-core
//!
//! Mapping engine between a spreadsheet inventory of remote-access sessions
//! and two connection-manager formats: a SecureCRT-style XML session tree
//! and a Devolutions RDM-style JSON connection list.
//!
//! The spreadsheet itself is reached through the [`maker::SheetSource`] and
//! [`maker::SheetSink`] traits; `smk-excel` provides the xlsx backend.

pub mod maker;
