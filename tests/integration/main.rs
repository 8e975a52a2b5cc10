//! Integration tests for the fetch pipeline
//!
//! These tests use wiremock to create mock HTTP servers and run whole batches
//! against a file store in a temporary directory.

mod common;
mod fetch_tests;
