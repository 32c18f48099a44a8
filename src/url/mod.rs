//! URL handling module for Frame-Tally
//!
//! This module builds listing API page URLs, expands detail page templates,
//! and recovers movie identifiers from detail page URLs.

mod identifier;
mod template;

pub use identifier::recover_identifier;
pub use template::{expand_template, listing_url};
