//! # Quantum-Chain Header Validation Test Suite
//!
//! Unified test crate for the header validation workspace.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── header_validation_benchmarks.rs   # criterion benchmarks
//! └── src/
//!     └── integration/                      # cross-crate flows
//!         └── header_validation.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # Integration flows only
//! cargo test -p qc-tests integration::
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

pub mod integration;
