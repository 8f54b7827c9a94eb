//! Price Resolver Module
//!
//! Resolves unit and extended prices for priced lines against a price
//! list, with a per-session cache of successful lookups.

mod resolver;

pub use resolver::*;
