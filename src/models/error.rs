//! Validation errors for address and prefix input.

use thiserror::Error;

/// Message shown to the user for any failed calculation.
pub const USER_ERROR_MESSAGE: &str = "Error! Try changing the IP or the mask.";

/// Reasons a calculation request can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The address text was blank.
    #[error("enter a valid IP address")]
    EmptyInput,
    /// The address text is not four decimal octets in 0-255.
    #[error("malformed IPv4 address: {0:?}")]
    MalformedAddress(String),
    /// The prefix text is not `/N` with N in the accepted range.
    #[error("prefix out of range: {0:?}")]
    PrefixOutOfRange(String),
    /// A subnet split was requested with a prefix shorter than the network's own, or beyond /32.
    #[error("cannot split /{prefix} into /{new_prefix} subnets")]
    InvalidSubnetPrefix { prefix: u8, new_prefix: u8 },
}

impl ValidationError {
    /// The single coarse message front ends display instead of the detailed reason.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "Enter a valid IP address!",
            _ => USER_ERROR_MESSAGE,
        }
    }
}
