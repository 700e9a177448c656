//! Errors raised at the edges of the rules resolver
//!
//! Resolution and classification are total and never fail. Only the helpers
//! that look at raw lump data can reject their input.

use thiserror::Error;

/// Errors produced while sizing on-disk map records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapFormatError {
    #[error("{lump} lump is {len} bytes, not a multiple of the {record_size}-byte record")]
    MisalignedLump {
        lump: &'static str,
        len: usize,
        record_size: usize,
    },

    #[error("{lump} lump is empty")]
    EmptyLump { lump: &'static str },
}
