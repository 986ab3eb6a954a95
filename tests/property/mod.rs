//! Property-based tests

mod pagination_proptest;
mod result_proptest;
mod validation_proptest;
