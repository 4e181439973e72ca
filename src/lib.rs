//! IPv4 network calculator.
//!
//! Given an address and a prefix length, computes the network and broadcast
//! addresses, the usable host range and the equally sized subnets of the
//! network. Every operation is a pure function of its inputs; front ends
//! render the returned values.
//!
//! - [`models`] - Value types and bitwise helpers
//! - [`processing`] - [`compute_network`] and [`enumerate_subnets`]
//! - [`output`] - Text, CSV and JSON rendering
//! - [`config`] - Display and input settings

pub mod config;
pub mod models;
pub mod output;
pub mod processing;

use config::Settings;
use models::{parse_address, parse_prefix, NetworkResult, ValidationError};
use processing::SubnetPage;

pub use processing::{compute_network, enumerate_subnets};

/// A calculation as shown by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub result: NetworkResult,
    pub subnets: SubnetPage,
}

/// Run one calculation the way the form does it.
///
/// The prefix must lie in the front end's range (`settings.prefix_range()`).
/// Subnets are split at `subnet_prefix`, or at the network's own prefix when
/// not given, and cut down by the display limit.
pub fn calculate(
    address_text: &str,
    prefix_text: &str,
    subnet_prefix: Option<u8>,
    settings: &Settings,
) -> Result<Calculation, ValidationError> {
    // address errors come first, as in compute_network
    parse_address(address_text)?;
    let prefix = parse_prefix(prefix_text)?;
    if !settings.prefix_range().contains(&prefix) {
        log::warn!(
            "Prefix /{prefix} outside accepted range /{}-/{}",
            settings.min_prefix,
            settings.max_prefix
        );
        return Err(ValidationError::PrefixOutOfRange(prefix_text.trim().to_string()));
    }

    let result = compute_network(address_text, prefix_text)?;
    let new_prefix = subnet_prefix.unwrap_or(result.network.prefix());
    let subnets = processing::paginate_subnets(result.network, new_prefix, settings)?;
    log::info!(
        "Calculated {} with {} subnet(s) of /{new_prefix}",
        result.network,
        subnets.total
    );

    Ok(Calculation { result, subnets })
}
