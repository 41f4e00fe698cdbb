//! Core types and utilities for specdex
//!
//! This crate contains the raw payload shapes, the normalized document
//! model, and the text routines shared across all other crates.

mod constants;
mod document;
mod env;
mod raw;
mod text;

pub use constants::*;
pub use document::*;
pub use env::*;
pub use raw::*;
pub use text::*;
