//! CSV output of a subnet partition.

use crate::models::host_or_na;
use crate::processing::SubnetPage;
use itertools::Itertools;

use super::terminal::format_field;

/// Header row matching [`csv_row`].
pub fn csv_header() -> String {
    [
        format_field("cnt", 6),
        format_field("subnet_cidr", 20),
        format_field("broadcast", 17),
        format_field("first_host", 17),
        format_field("last_host", 17),
        format_field("hosts", 12),
    ]
    .iter()
    .join(",")
}

/// One CSV row per shown subnet; `cnt` is the 1-based position in the whole partition.
pub fn csv_rows(page: &SubnetPage) -> Vec<String> {
    log::info!(
        "# CSV rows for {} of {} subnets (/{})",
        page.subnets.len(),
        page.total,
        page.new_prefix
    );
    page.subnets
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let hosts = s.host_range();
            csv_row(
                page.offset + i as u64 + 1,
                &s.to_string(),
                &s.broadcast_address().to_string(),
                &host_or_na(hosts.map(|h| h.first)),
                &host_or_na(hosts.map(|h| h.last)),
                s.num_hosts(),
            )
        })
        .collect()
}

fn csv_row(
    j: u64,
    subnet_cidr: &str,
    broadcast: &str,
    first_host: &str,
    last_host: &str,
    hosts: u64,
) -> String {
    format!(
        r#"{j},{subnet_cidr},{broadcast},{first_host},{last_host},{hosts}"#,
        j = format_field(j, 6),
        subnet_cidr = format_field(subnet_cidr, 20),
        broadcast = format_field(broadcast, 17),
        first_host = format_field(first_host, 17),
        last_host = format_field(last_host, 17),
        hosts = format_field(hosts, 12),
    )
}
