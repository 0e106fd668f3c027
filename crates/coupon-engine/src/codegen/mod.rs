//! Process-unique coupon code generation.
//!
//! Codes are sampled from a 26-symbol alphabet: the ten ASCII digits plus
//! sixteen Hangul syllables. The first symbol is always a syllable, so no
//! code can be mistaken for a plain number.

mod alphabet;
mod error;
mod generator;

pub use alphabet::*;
pub use error::*;
pub use generator::*;
