#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

//! Field-level validation and normalization for loosely typed records.
//!
//! Validators borrow a record through [`record::RecordAccess`], judge one
//! field and, depending on [`options::ValidationOptions`], write a
//! normalized value and annotations back. Date, string and number families
//! share that protocol; [`rules`] binds them to fields declaratively.

pub mod config;
pub mod dates;
pub mod frontmatter;
pub mod numbers;
pub mod options;
pub mod record;
pub mod rules;
pub mod strings;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
