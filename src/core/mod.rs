//! Core data types for sequence probing.
//!
//! - [`Term`]: a single integer term, kept exactly regardless of size
//! - [`Query`]: the non-empty sequence being probed
//! - [`ANumber`]: a validated catalog identifier (`A` + 6 digits)
//! - [`Hit`] and [`Alignment`]: one candidate match and where it aligns

pub mod hit;
pub mod term;
pub mod types;

pub use hit::{Alignment, Hit};
pub use term::Term;
pub use types::{ANumber, Query};
