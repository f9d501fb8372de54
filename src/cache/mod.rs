//! Lore cache - time-windowed memoization of rendered display lines.
//!
//! ## Architecture
//!
//! - [`LoreCache`] - concurrent key→entry store with TTL and a size cap
//! - [`LoreKey`] - the derived key a rendered lore variant is memoized under
//! - [`Clock`] - injected millisecond clock ([`SystemClock`] in production,
//!   [`ManualClock`] in tests)
//!
//! Expiry is lazy: a stale entry is dropped when a lookup touches it, or
//! during the sweep that runs when an insert pushes the store past its size
//! cap. There is no background timer.

mod clock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{LoreCache, LoreKey};
