//! Terminal output.
//!
//! Plain summary text, the subnet list lines and the coloured report built
//! from them.

use crate::models::{host_or_na, NetworkResult};
use crate::processing::SubnetPage;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// The copyable summary of a calculation, one field per line.
pub fn summary_text(result: &NetworkResult) -> String {
    format!(
        "Network: {network}\nBroadcast: {broadcast}\nTotal hosts: {hosts}\nFirst host: {first}\nLast host: {last}\n",
        network = result.network_address,
        broadcast = result.broadcast_address,
        hosts = result.host_count,
        first = host_or_na(result.first_host),
        last = host_or_na(result.last_host),
    )
}

/// Lines describing the shown part of a subnet partition.
pub fn subnet_list_lines(page: &SubnetPage) -> Vec<String> {
    let mut lines = Vec::with_capacity(page.subnets.len() + 3);
    if page.truncated {
        lines.push(format!(
            "Too many subnets ({}) were generated. Showing only the first {}.",
            page.total,
            page.subnets.len()
        ));
    }
    lines.push(format!("Subnets (/{}):", page.new_prefix));
    for s in &page.subnets {
        lines.push(format!("{} - {}", s.network_address(), s.broadcast_address()));
    }
    let hidden = page.hidden();
    if hidden > 0 {
        lines.push(format!("... and {hidden} more hidden subnets."));
    }
    lines
}

/// Full coloured report: network details followed by the subnet list.
pub fn render_report(result: &NetworkResult, page: &SubnetPage) -> String {
    let label = |s: &str| s.bright_black();
    let mut out = String::new();

    let rows = [
        ("Network", result.network.to_string()),
        ("Address", result.network_address.to_string()),
        ("Broadcast", result.broadcast_address.to_string()),
        ("Netmask", result.netmask.to_string()),
        ("Wildcard", result.wildcard.to_string()),
        ("Total hosts", result.host_count.to_string()),
        ("First host", host_or_na(result.first_host)),
        ("Last host", host_or_na(result.last_host)),
    ];
    for (name, value) in rows {
        out.push_str(&format!(
            "{:<12} {}\n",
            label(&format!("{name}:")),
            value.blue().bold()
        ));
    }
    out.push('\n');

    for line in subnet_list_lines(page) {
        if line.starts_with("Too many") {
            out.push_str(&format!("{}\n", line.yellow()));
        } else if line.starts_with("Subnets") {
            out.push_str(&format!("{}\n", line.bold()));
        } else if line.starts_with("...") {
            out.push_str(&format!("{}\n", line.italic()));
        } else {
            out.push_str(&format!("  {line}\n"));
        }
    }
    out
}
