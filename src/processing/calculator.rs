//! Network calculation from raw form input.

use crate::models::{parse_address, parse_prefix, Network, NetworkResult, ValidationError};

/// Compute the network described by an address and a prefix.
///
/// Host bits in `address_text` are accepted and dropped, so `192.168.0.5` with
/// `/24` yields `192.168.0.0/24`.
///
/// # Arguments
/// * `address_text` - Dotted-quad address, surrounding whitespace allowed
/// * `prefix_text` - Prefix length as `/N` (or plain `N`), N in 0-32
///
/// # Examples
/// ```
/// use calcuip::compute_network;
/// let result = compute_network("192.168.0.5", "/24").unwrap();
/// assert_eq!(result.network_address.to_string(), "192.168.0.0");
/// assert_eq!(result.host_count, 254);
/// ```
pub fn compute_network(
    address_text: &str,
    prefix_text: &str,
) -> Result<NetworkResult, ValidationError> {
    log::debug!("compute_network({address_text:?}, {prefix_text:?})");

    let addr = parse_address(address_text)?;
    let prefix = parse_prefix(prefix_text)?;
    let network = Network::new(addr, prefix)?;
    if network.network_address() != addr {
        log::debug!("Host bits dropped: {addr} -> {network}");
    }

    Ok(NetworkResult::from_network(network))
}
