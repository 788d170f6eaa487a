//! Types shared between the Ad-lib client core and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
