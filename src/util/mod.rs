//! Shared utilities (byte and hex formatting).

pub mod hex;
