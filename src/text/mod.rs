//! Layer 0: Text Core
//!
//! Plain text positions and edit commands with no knowledge of musical
//! notation. Every analysis pass reads the document through this layer.
//!
//! ## Modules
//!
//! - `buffer`: `SourceText`, a read-only index over the document (char/byte
//!   offsets, line table)
//! - `cursor`: spans and the text replacement command sent back to the host

pub mod buffer;
pub mod cursor;

// Re-exports for convenience
pub use buffer::SourceText;
pub use cursor::{TextReplacement, TextSpan};
