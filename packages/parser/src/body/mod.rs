//! Hierarchical body extraction.
//!
//! Turns the operative text of a law or decree into the
//! title → chapter → article tree, inferring from header lines how many of
//! those levels the document actually uses.

mod articles;
mod headers;
mod strategy;

pub use articles::{extract_articles, truncate_trailing_matter};
pub use headers::{find_headers, partition, Header, Section};
pub use strategy::{BodyStrategy, DecreeStrategy, LawStrategy};
