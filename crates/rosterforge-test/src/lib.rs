//! Shared test fixtures for RosterForge crates.
//!
//! This crate provides problem inputs and a deterministic optimizer for
//! testing. It depends only on `rosterforge-core` so that the solver and
//! scheduling crates can use it as a dev-dependency.
//!
//! - [`input`] - problem inputs and `start` payloads
//! - [`stub`] - a lifecycle-counting stub optimizer
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! rosterforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use rosterforge_test::input::week_input;
//! use rosterforge_test::stub::StubOptimizer;
//! ```

pub mod input;
pub mod stub;

pub use input::{
    date, empty_resources_input, input, inverted_window_input, month_input, start_message,
    week_input,
};
pub use stub::{LifecycleCounts, RoundHook, StubOptimizer};
