//! Movie data model
//!
//! Identifiers shared by the listing API and the media catalog, and the
//! decoded form of listing API pages.

mod identifier;
mod listing;

pub use identifier::{IdentifierSet, MovieIdentifier};
pub use listing::{AlternateIds, ListingPage, MovieEntry};
