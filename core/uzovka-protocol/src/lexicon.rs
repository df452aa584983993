use rkyv::{Archive, Deserialize, Serialize};

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One row of the keyword table: a dialect phrase of one or more lowercase
/// words mapping to a single host-language keyword.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LexiconEntry {
    pub phrase: Vec<String>,
    pub replacement: String,
}

/// The externally supplied keyword-mapping data. Loaded once per invocation
/// and read-only for the lifetime of a translation. Declaration order of
/// `entries` is significant: it breaks ties between phrases of equal word
/// length (first declared wins).
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub entries: Vec<LexiconEntry>,
    /// Single words excluded from substitution regardless of context
    /// (they collide with common identifier usage).
    pub ambiguous: Vec<String>,
}
