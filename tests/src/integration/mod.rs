//! Cross-crate integration flows

pub mod header_validation;
