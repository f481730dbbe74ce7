//! # Integration Scenarios
//!
//! Write path and read path across shared-crypto, ml-01, and ml-02.

#[cfg(test)]
pub mod fixtures;

mod protocol;
mod search;
mod tamper;
