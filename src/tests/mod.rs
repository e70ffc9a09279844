//! Tests for crate-level types.

mod status;
