//! Shared filesystem helpers for pipeline steps.

pub mod fs;
