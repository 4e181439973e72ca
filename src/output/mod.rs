//! Output formatting for calculation results.
//!
//! This module handles rendering a calculation for the user:
//! - [`terminal`] - Summary text, subnet list and coloured report
//! - [`csv`] - CSV listing of subnets
//! - [`json`] - JSON report

mod csv;
mod json;
mod terminal;

pub use csv::{csv_header, csv_rows};
pub use json::render_json;
pub use terminal::{format_field, render_report, subnet_list_lines, summary_text};
