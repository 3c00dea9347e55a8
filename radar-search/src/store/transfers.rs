//! Transfers: `(U16 depStationId, U16 arrStationId, U8 minutes)` records
//! (§6), globally sorted by `arrStationId` so all transfers arriving at a
//! station form a contiguous range — see [`super::transfer_index`].

use super::records::{BoundsError, RecordView};

const RECORD_SIZE: usize = 5;
const DEP_STATION_OFFSET: usize = 0;
const ARR_STATION_OFFSET: usize = 2;
const MINUTES_OFFSET: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferFields {
    pub dep_station_id: u32,
    pub arr_station_id: u32,
    pub minutes: u8,
}

pub struct Transfers<'a> {
    records: RecordView<'a>,
}

impl<'a> Transfers<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Transfers<'a>, BoundsError> {
        Ok(Transfers {
            records: RecordView::new(bytes, RECORD_SIZE)?,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<TransferFields, BoundsError> {
        Ok(TransferFields {
            dep_station_id: u32::from(self.records.field_u16(index, DEP_STATION_OFFSET)?),
            arr_station_id: u32::from(self.records.field_u16(index, ARR_STATION_OFFSET)?),
            minutes: self.records.field_u8(index, MINUTES_OFFSET)?,
        })
    }

    pub fn arr_station_id(&self, index: usize) -> Result<u32, BoundsError> {
        self.records
            .field_u16(index, ARR_STATION_OFFSET)
            .map(u32::from)
    }
}
