//! Integration test crate for imageprep.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the imageprep crates to verify they work together.

#[cfg(test)]
mod pipeline;

#[cfg(test)]
mod animation;
