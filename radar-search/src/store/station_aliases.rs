//! Station aliases: `(U16 aliasIdx, U16 canonicalNameIdx)` records (§6).
//! Not consulted by the router or extractor (§9) — kept as a typed view
//! for symmetry with the rest of the store, since a future fuzzy stop-name
//! index (out of scope, §1) would read it directly off the mapped buffer.

use super::records::{BoundsError, RecordView};

const RECORD_SIZE: usize = 4;
const ALIAS_IDX_OFFSET: usize = 0;
const CANONICAL_IDX_OFFSET: usize = 2;

pub struct StationAliases<'a> {
    records: RecordView<'a>,
}

impl<'a> StationAliases<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<StationAliases<'a>, BoundsError> {
        Ok(StationAliases {
            records: RecordView::new(bytes, RECORD_SIZE)?,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn alias_name_index(&self, index: usize) -> Result<u16, BoundsError> {
        self.records.field_u16(index, ALIAS_IDX_OFFSET)
    }

    pub fn canonical_name_index(&self, index: usize) -> Result<u16, BoundsError> {
        self.records.field_u16(index, CANONICAL_IDX_OFFSET)
    }
}
