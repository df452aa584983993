#![no_std] // Critical for WASM compatibility

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod diagnostic;
pub mod flags;
pub mod lexicon;
pub mod token;

// Re-export core types for convenience
pub use diagnostic::{Diagnostic, Severity};
pub use flags::RewriteFlags;
pub use lexicon::{Lexicon, LexiconEntry};
pub use token::{Position, Token, TokenKind};
