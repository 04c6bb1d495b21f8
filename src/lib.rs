//! opps-merge: merge Salesforce opportunity exports with Tubular channel metrics
//!
//! The merge engine ([`merge::merge_tables`]) is a pure function over
//! in-memory [`domain::Table`]s; [`csvio`] and [`cli`] wrap it for files and
//! the command line.

pub mod cli;
pub mod config;
pub mod csvio;
pub mod domain;
pub mod error;
pub mod merge;
pub mod render;
pub mod utils;

pub use domain::{MergeProvenance, MergedTable, Table};
pub use error::MergeError;
pub use merge::{merge_tables, parse_header_mapping, HeaderMapping};
