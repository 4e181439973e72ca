//! Domain models for the calculator.
//!
//! This module contains the value types used throughout the crate:
//! - [`Network`] - IPv4 CIDR block, always stored at its base address
//! - [`NetworkResult`] - Everything computed for one network
//! - [`ValidationError`] - Why an input was rejected

mod error;
mod ipv4;
mod report;

// Re-export public types
pub use error::{ValidationError, USER_ERROR_MESSAGE};
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, num_hosts, parse_address, parse_prefix,
    HostRange, Network, MAX_LENGTH,
};
pub use report::{host_or_na, NetworkResult};
