//! Calculation logic.
//!
//! This module contains the operations front ends call:
//! - [`calculator`] - Network computation from address and prefix text
//! - [`subnets`] - Partitioning a network into equally sized subnets

mod calculator;
mod subnets;

// Re-export public functions
pub use calculator::compute_network;
pub use subnets::{
    enumerate_subnets, iter_subnets, nth_subnet, page_subnets, paginate_subnets, subnet_count,
    SubnetPage,
};
