//! Platforms: `(U16 nameIdx, U16 stationId)` records (§6). A platform
//! belongs to exactly one station (invariant: `stationId < stations.len()`,
//! enforced by the caller that resolves a platform id to a station id, see
//! [`super::stop_id`]).

use super::records::{BoundsError, RecordView};
use super::strings::{StringIndexOutOfRange, StringTable};

const RECORD_SIZE: usize = 4;
const NAME_IDX_OFFSET: usize = 0;
const STATION_ID_OFFSET: usize = 2;

pub struct Platforms<'a> {
    records: RecordView<'a>,
}

impl<'a> Platforms<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Platforms<'a>, BoundsError> {
        Ok(Platforms {
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
        platform_index: u32,
    ) -> Result<&'s str, PlatformError> {
        let idx = self
            .records
            .field_u16(platform_index as usize, NAME_IDX_OFFSET)?;
        Ok(strings.get(idx as u32)?)
    }

    pub fn station_id(&self, platform_index: u32) -> Result<u32, BoundsError> {
        self.records
            .field_u16(platform_index as usize, STATION_ID_OFFSET)
            .map(u32::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    Bounds(BoundsError),
    String(StringIndexOutOfRange),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::Bounds(e) => e.fmt(f),
            PlatformError::String(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<BoundsError> for PlatformError {
    fn from(e: BoundsError) -> Self {
        PlatformError::Bounds(e)
    }
}

impl From<StringIndexOutOfRange> for PlatformError {
    fn from(e: StringIndexOutOfRange) -> Self {
        PlatformError::String(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_name_and_station() {
        let strings = StringTable::from_latin1_bytes(b"Gleis 1\n");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u16.to_be_bytes());
        bytes.extend_from_slice(&4u16.to_be_bytes());
        let platforms = Platforms::new(&bytes).unwrap();
        assert_eq!(platforms.name(&strings, 0).unwrap(), "Gleis 1");
        assert_eq!(platforms.station_id(0).unwrap(), 4);
    }
}
