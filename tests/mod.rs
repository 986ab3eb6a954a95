//! Test suite for the blog API
//!
//! Integration tests drive the full router over an in-memory store.

pub mod common;
pub mod integration;
pub mod property;
