//! Integration tests for termreel.

mod cli_test;
mod helpers;
mod session_test;
