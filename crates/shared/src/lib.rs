//! Shared utilities for the Surveil backend.
//!
//! User authentication itself lives in an external identity service; this crate
//! only carries the session-token plumbing the API needs to recognize callers.

pub mod jwt;
