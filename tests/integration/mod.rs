//! Integration tests for shakha
//!
//! These tests drive the full pipeline (flat block, tree, transforms,
//! writers) on randomly generated morphologies with a fixed seed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration -- --nocapture
//! RUST_LOG=debug cargo test --test integration round_trip
//! ```

mod common;
mod round_trip;
mod transforms;
mod writers;
