//! Integration test entry point
//!
//! Each submodule exercises the pipeline end-to-end against wiremock servers
//! and tempfile-backed stores.

mod pipeline_tests;
