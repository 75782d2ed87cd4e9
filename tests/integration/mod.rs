//! Integration tests for cargo-gate
//!
//! Each test drives the built binary against throwaway git repositories.

mod helpers;

mod test_changelog;
mod test_complete;
mod test_release;
mod test_validate;
