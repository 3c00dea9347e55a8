//! Stations: `(U16 nameIdx, S32 lonE⁶⁴⁰, S32 latE⁶⁴⁰)` records (§6).
//! Coordinates are passed through as the raw fixed-point encoding; this
//! store does not interpret them further (§2 Non-goals).

use super::records::{BoundsError, RecordView};
use super::strings::{StringIndexOutOfRange, StringTable};

const RECORD_SIZE: usize = 10;
const NAME_IDX_OFFSET: usize = 0;
const LON_OFFSET: usize = 2;
const LAT_OFFSET: usize = 6;

/// Degrees per unit of the `S32` fixed-point coordinate encoding, i.e. the
/// conversion is `value as f64 * DEGREES_PER_UNIT`.
pub const DEGREES_PER_UNIT: f64 = 360.0 / 4_294_967_296.0; // 360 / 2^32

pub struct Stations<'a> {
    records: RecordView<'a>,
}

impl<'a> Stations<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Stations<'a>, BoundsError> {
        Ok(Stations {
            records: RecordView::new(bytes, RECORD_SIZE)?,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn name<'s>(
        &self,
        strings: &'s StringTable,
        station_id: u32,
    ) -> Result<&'s str, StoreError> {
        let idx = self.records.field_u16(station_id as usize, NAME_IDX_OFFSET)?;
        Ok(strings.get(idx as u32)?)
    }

    /// Raw fixed-point longitude; multiply by [`DEGREES_PER_UNIT`] for degrees.
    pub fn longitude_raw(&self, station_id: u32) -> Result<i32, BoundsError> {
        self.records.field_i32(station_id as usize, LON_OFFSET)
    }

    /// Raw fixed-point latitude; multiply by [`DEGREES_PER_UNIT`] for degrees.
    pub fn latitude_raw(&self, station_id: u32) -> Result<i32, BoundsError> {
        self.records.field_i32(station_id as usize, LAT_OFFSET)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    Bounds(BoundsError),
    String(StringIndexOutOfRange),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Bounds(e) => e.fmt(f),
            StoreError::String(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<BoundsError> for StoreError {
    fn from(e: BoundsError) -> Self {
        StoreError::Bounds(e)
    }
}

impl From<StringIndexOutOfRange> for StoreError {
    fn from(e: StringIndexOutOfRange) -> Self {
        StoreError::String(e)
    }
}
