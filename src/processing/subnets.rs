//! Splitting a network into equally sized subnets.
//!
//! The full partition can hold up to 2^32 blocks, so besides
//! [`enumerate_subnets`] this module offers counting, indexing and paging that
//! never materialize more than what is shown.

use crate::config::Settings;
use crate::models::{Network, ValidationError, MAX_LENGTH};

/// One displayed slice of a subnet partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetPage {
    /// Prefix of every subnet in the partition.
    pub new_prefix: u8,
    /// Number of subnets in the whole partition.
    pub total: u64,
    /// Position of the first shown subnet within the partition.
    pub offset: u64,
    /// The shown subnets, in ascending order.
    pub subnets: Vec<Network>,
    /// Set when the display limit cut the list down to a preview.
    pub truncated: bool,
}

impl SubnetPage {
    /// Subnets after the shown ones that were left out.
    pub fn hidden(&self) -> u64 {
        self.total
            .saturating_sub(self.offset)
            .saturating_sub(self.subnets.len() as u64)
    }
}

fn check_new_prefix(network: Network, new_prefix: u8) -> Result<(), ValidationError> {
    if new_prefix < network.prefix() || new_prefix > MAX_LENGTH {
        return Err(ValidationError::InvalidSubnetPrefix {
            prefix: network.prefix(),
            new_prefix,
        });
    }
    Ok(())
}

/// Number of `/new_prefix` subnets in `network`.
pub fn subnet_count(network: Network, new_prefix: u8) -> Result<u64, ValidationError> {
    check_new_prefix(network, new_prefix)?;
    Ok(1u64 << (new_prefix - network.prefix()))
}

/// The subnet at `index` in the partition, `None` past the end.
pub fn nth_subnet(
    network: Network,
    new_prefix: u8,
    index: u64,
) -> Result<Option<Network>, ValidationError> {
    check_new_prefix(network, new_prefix)?;
    Ok(network.subnet_at(new_prefix, index))
}

/// Iterate the partition in ascending order. The iterator can be cloned to restart.
pub fn iter_subnets(
    network: Network,
    new_prefix: u8,
) -> Result<impl Iterator<Item = Network> + Clone, ValidationError> {
    let count = subnet_count(network, new_prefix)?;
    Ok((0..count).map_while(move |i| network.subnet_at(new_prefix, i)))
}

/// Split `network` into consecutive `/new_prefix` subnets covering it exactly.
///
/// With `new_prefix == network.prefix()` the result is `[network]`.
///
/// # Examples
/// ```
/// use calcuip::{enumerate_subnets, models::Network};
/// let net = Network::from_cidr("10.0.0.0/24").unwrap();
/// let subnets = enumerate_subnets(net, 26).unwrap();
/// assert_eq!(subnets.len(), 4);
/// assert_eq!(subnets[3].to_string(), "10.0.0.192/26");
/// ```
pub fn enumerate_subnets(
    network: Network,
    new_prefix: u8,
) -> Result<Vec<Network>, ValidationError> {
    let subnets: Vec<Network> = iter_subnets(network, new_prefix)?.collect();
    log::debug!(
        "enumerate_subnets({network}, /{new_prefix}) -> {} subnets",
        subnets.len()
    );
    Ok(subnets)
}

/// Apply the display policy: above `settings.display_limit` subnets only the
/// first `settings.preview_count` are returned, otherwise all of them.
pub fn paginate_subnets(
    network: Network,
    new_prefix: u8,
    settings: &Settings,
) -> Result<SubnetPage, ValidationError> {
    let total = subnet_count(network, new_prefix)?;
    // a preview at least as long as the list hides nothing
    let truncated = total > settings.display_limit && settings.preview_count < total;
    let shown = if truncated {
        log::warn!(
            "Too many subnets ({total}) for {network} split into /{new_prefix}, showing the first {}",
            settings.preview_count
        );
        settings.preview_count
    } else {
        total
    };

    Ok(SubnetPage {
        new_prefix,
        total,
        offset: 0,
        subnets: iter_subnets(network, new_prefix)?
            .take(usize::try_from(shown).unwrap_or(usize::MAX))
            .collect(),
        truncated,
    })
}

/// Return page `page` (0-based) of `page_size` subnets.
///
/// A page past the end is returned empty.
pub fn page_subnets(
    network: Network,
    new_prefix: u8,
    page: u64,
    page_size: u64,
) -> Result<SubnetPage, ValidationError> {
    let total = subnet_count(network, new_prefix)?;
    let offset = page.saturating_mul(page_size).min(total);
    let end = offset.saturating_add(page_size).min(total);
    let subnets = (offset..end)
        .map_while(|i| network.subnet_at(new_prefix, i))
        .collect();

    Ok(SubnetPage {
        new_prefix,
        total,
        offset,
        subnets,
        truncated: false,
    })
}
