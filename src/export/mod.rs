//! Deck encoders.
//!
//! The plain-text decklist is always available; the structured JSON document
//! needs the `serialization` feature.

pub mod plain_text;
#[cfg(feature = "serialization")]
pub mod structured;

pub use plain_text::{DecklistError, export_plain_text, parse_plain_text};
#[cfg(feature = "serialization")]
pub use structured::{ExportedEntry, StructuredExport, export_structured};
