//! `show bgp all summary` CLI transcript decoding.
//!
//! The parser is a single pass over lines driven by three states: scanning
//! for a VRF/address family header, reading the address family metadata
//! block, and reading the fixed ten-column neighbor table. A blank line
//! after the table closes the address family and emits its summary; a
//! header for a different VRF also emits the summary in progress.
//!
//! Line patterns live in `layout`, line classification and row splitting
//! in `reader`. Malformed rows are skipped; only an input yielding no
//! summary at all is an error.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::TextError;
pub use parser::summaries_from_text;
