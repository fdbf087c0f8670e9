//! List URL handling
//!
//! Turns a free-form list URL into a [`ListIdentity`] and builds the feed and
//! page endpoints for it. Nothing in this module touches the network.

mod identity;
mod normalize;

pub use identity::{parse_list_url, validate_list_url, ListIdentity};
pub use normalize::normalize_input;
