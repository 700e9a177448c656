//! On-disk record sizes for THINGS and LINEDEFS lumps
//!
//! The loader owns the byte layout; the map format only says how many bytes
//! make up one record.

use serde::{Deserialize, Serialize};

use crate::error::MapFormatError;

/// Byte sizes of one thing and one linedef record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordLayout {
    pub thing_size: usize,
    pub linedef_size: usize,
}

impl RecordLayout {
    /// x, y, angle, type, options
    pub const DOOM_THING_SIZE: usize = 10;
    /// v1, v2, flags, special, tag, sidenum[2]
    pub const DOOM_LINEDEF_SIZE: usize = 14;
    /// tid, x, y, height, angle, type, options, special, args[5]
    pub const HEXEN_THING_SIZE: usize = 20;
    /// v1, v2, flags, special, args[5], sidenum[2]
    pub const HEXEN_LINEDEF_SIZE: usize = 16;

    pub const DOOM: Self = Self {
        thing_size: Self::DOOM_THING_SIZE,
        linedef_size: Self::DOOM_LINEDEF_SIZE,
    };

    pub const HEXEN: Self = Self {
        thing_size: Self::HEXEN_THING_SIZE,
        linedef_size: Self::HEXEN_LINEDEF_SIZE,
    };

    /// Number of things in a THINGS lump of `len` bytes.
    ///
    /// A level without things is valid.
    pub fn thing_count(&self, len: usize) -> Result<usize, MapFormatError> {
        count_records("THINGS", len, self.thing_size)
    }

    /// Number of linedefs in a LINEDEFS lump of `len` bytes.
    pub fn linedef_count(&self, len: usize) -> Result<usize, MapFormatError> {
        if len == 0 {
            return Err(MapFormatError::EmptyLump { lump: "LINEDEFS" });
        }
        count_records("LINEDEFS", len, self.linedef_size)
    }
}

fn count_records(lump: &'static str, len: usize, record_size: usize) -> Result<usize, MapFormatError> {
    if !len.is_multiple_of(record_size) {
        return Err(MapFormatError::MisalignedLump {
            lump,
            len,
            record_size,
        });
    }
    Ok(len / record_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doom_counts() {
        assert_eq!(RecordLayout::DOOM.thing_count(100).unwrap(), 10);
        assert_eq!(RecordLayout::DOOM.linedef_count(140).unwrap(), 10);
        assert_eq!(RecordLayout::DOOM.thing_count(0).unwrap(), 0);
    }

    #[test]
    fn test_hexen_counts() {
        assert_eq!(RecordLayout::HEXEN.thing_count(200).unwrap(), 10);
        assert_eq!(RecordLayout::HEXEN.linedef_count(160).unwrap(), 10);
    }

    #[test]
    fn test_doom_lump_read_as_hexen_is_rejected() {
        let err = RecordLayout::HEXEN.linedef_count(14 * 3).unwrap_err();
        assert_eq!(
            err,
            MapFormatError::MisalignedLump {
                lump: "LINEDEFS",
                len: 42,
                record_size: 16,
            }
        );
        assert_eq!(
            err.to_string(),
            "LINEDEFS lump is 42 bytes, not a multiple of the 16-byte record"
        );
    }

    #[test]
    fn test_empty_linedefs_rejected() {
        assert_eq!(
            RecordLayout::DOOM.linedef_count(0),
            Err(MapFormatError::EmptyLump { lump: "LINEDEFS" })
        );
    }
}
