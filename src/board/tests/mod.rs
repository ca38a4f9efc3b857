//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move generator leaf counts
//! - `draw.rs` - Draw detection (50-move, repetition, insufficient material)
//! - `make_move.rs` - Copy-make move application
//! - `edge_cases.rs` - Special positions and edge cases
//! - `proptest.rs` - Property-based tests
//! - `search.rs` - Search behaviour

mod proptest;
