//! JSON report.

use crate::models::{Network, NetworkResult};
use crate::processing::SubnetPage;
use serde::Serialize;
use std::error::Error;

#[derive(Serialize, Debug)]
struct SubnetsReport<'a> {
    new_prefix: u8,
    total: u64,
    offset: u64,
    truncated: bool,
    hidden: u64,
    subnets: &'a [Network],
}

#[derive(Serialize, Debug)]
struct Report<'a> {
    #[serde(flatten)]
    result: &'a NetworkResult,
    subnets: SubnetsReport<'a>,
}

/// Serialize a calculation and its subnet page as pretty JSON.
pub fn render_json(result: &NetworkResult, page: &SubnetPage) -> Result<String, Box<dyn Error>> {
    let report = Report {
        result,
        subnets: SubnetsReport {
            new_prefix: page.new_prefix,
            total: page.total,
            offset: page.offset,
            truncated: page.truncated,
            hidden: page.hidden(),
            subnets: &page.subnets,
        },
    };
    let json =
        serde_json::to_string_pretty(&report).map_err(|e| format!("Error serializing JSON: {e}"))?;
    Ok(json)
}
