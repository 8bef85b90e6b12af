//! This crate contains all configuration-relevant code, including
//! the full configuration structure as well as methods needed to load
//! and validate it.
//!
//! Your starting point should probably be [`Configuration::load_from_default_path`].
//!
//! # Internals
//! The configuration is first deserialized into an unvalidated ("unresolved")
//! structure, in which every table and field has a default. Resolving it
//! applies the environment overrides (see [`EnvironmentOverrides`]) and
//! validates the result, producing a [`Configuration`].

#![allow(rustdoc::private_intra_doc_links)]

mod environment;
mod error;
mod structure;
mod traits;
mod utilities;

pub use environment::*;
pub use error::*;
pub use structure::*;
