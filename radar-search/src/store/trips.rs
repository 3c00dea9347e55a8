//! Trips (day-scoped): `(U16 routeId, U16 destinationNameIdx)` records
//! (§6). Loaded fresh for whichever date the [`super::day_cache::DayCache`]
//! currently serves.

use super::records::{BoundsError, RecordView};
use super::strings::{StringIndexOutOfRange, StringTable};

const RECORD_SIZE: usize = 4;
const ROUTE_ID_OFFSET: usize = 0;
const DESTINATION_NAME_IDX_OFFSET: usize = 2;

#[derive(Clone, Copy)]
pub struct Trips<'a> {
    records: RecordView<'a>,
}

impl<'a> Trips<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Trips<'a>, BoundsError> {
        Ok(Trips {
            records: RecordView::new(bytes, RECORD_SIZE)?,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn route_id(&self, trip_id: u32) -> Result<u32, BoundsError> {
        self.records
            .field_u16(trip_id as usize, ROUTE_ID_OFFSET)
            .map(u32::from)
    }

    pub fn destination<'s>(
        &self,
        strings: &'s StringTable,
        trip_id: u32,
    ) -> Result<&'s str, TripError> {
        let idx = self
            .records
            .field_u16(trip_id as usize, DESTINATION_NAME_IDX_OFFSET)?;
        Ok(strings.get(idx as u32)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripError {
    Bounds(BoundsError),
    String(StringIndexOutOfRange),
}

impl std::fmt::Display for TripError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripError::Bounds(e) => e.fmt(f),
            TripError::String(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for TripError {}

impl From<BoundsError> for TripError {
    fn from(e: BoundsError) -> Self {
        TripError::Bounds(e)
    }
}

impl From<StringIndexOutOfRange> for TripError {
    fn from(e: StringIndexOutOfRange) -> Self {
        TripError::String(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_route_and_destination() {
        let strings = StringTable::from_latin1_bytes(b"Ostbahnhof\n");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&9u16.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes());
        let trips = Trips::new(&bytes).unwrap();
        assert_eq!(trips.route_id(0).unwrap(), 9);
        assert_eq!(trips.destination(&strings, 0).unwrap(), "Ostbahnhof");
    }
}
