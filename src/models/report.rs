//! Result of a single network calculation.

use super::Network;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Everything shown to the user about one network.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkResult {
    /// The computed block, e.g. `192.168.0.0/24`.
    pub network: Network,
    /// Base address of the block.
    pub network_address: Ipv4Addr,
    /// Last address of the block.
    pub broadcast_address: Ipv4Addr,
    /// Subnet mask in dotted-quad form.
    pub netmask: Ipv4Addr,
    /// Inverse of the netmask.
    pub wildcard: Ipv4Addr,
    /// Addresses in the block, network and broadcast included.
    pub total_addresses: u64,
    /// Usable hosts (0 for /31 and /32).
    pub host_count: u64,
    /// First usable host, `None` when there are no usable hosts.
    pub first_host: Option<Ipv4Addr>,
    /// Last usable host, `None` when there are no usable hosts.
    pub last_host: Option<Ipv4Addr>,
}

impl NetworkResult {
    pub fn from_network(network: Network) -> NetworkResult {
        let hosts = network.host_range();
        NetworkResult {
            network,
            network_address: network.network_address(),
            broadcast_address: network.broadcast_address(),
            netmask: network.netmask(),
            wildcard: network.wildcard(),
            total_addresses: network.size(),
            host_count: network.num_hosts(),
            first_host: hosts.map(|h| h.first),
            last_host: hosts.map(|h| h.last),
        }
    }
}

/// Render an optional host, using `N/A` when not applicable.
pub fn host_or_na(host: Option<Ipv4Addr>) -> String {
    host.map(|h| h.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
