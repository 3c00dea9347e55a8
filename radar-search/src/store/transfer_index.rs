//! Precomputed `arrivingAt[stationId] -> packedRange` index over the
//! globally arrStationId-sorted transfer table (§4.2), built once in a
//! single pass at store construction time.

use std::fmt;

use crate::packed::PackedRange;

use super::records::BoundsError;
use super::transfers::Transfers;

pub struct TransferIndex {
    /// One packed range per station, empty for stations with no incoming
    /// transfers (§9: explicitly an empty range, not an error).
    ranges: Vec<PackedRange>,
}

/// No transfer exists between the given stations (§7: lookup-absence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoSuchTransfer {
    pub dep_station_id: u32,
    pub arr_station_id: u32,
}

impl fmt::Display for NoSuchTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no transfer from station {} to station {}",
            self.dep_station_id, self.arr_station_id
        )
    }
}

impl std::error::Error for NoSuchTransfer {}

impl TransferIndex {
    /// A single arrival station's incoming transfers never span more than
    /// 255 entries (the range's length is packed into 8 bits, §4.1); a
    /// network violating that bound widens `PackedRange` rather than being
    /// silently truncated here.
    pub fn build(transfers: &Transfers, station_count: usize) -> Result<TransferIndex, BoundsError> {
        let mut ranges = vec![PackedRange::empty(); station_count];
        let mut i = 0;
        while i < transfers.len() {
            let station = transfers.arr_station_id(i)? as usize;
            let start = i;
            while i < transfers.len() && transfers.arr_station_id(i)? as usize == station {
                i += 1;
            }
            ranges[station] = PackedRange::pack(start as u32, i as u32)
                .expect("more than 255 transfers into one station");
        }
        Ok(TransferIndex { ranges })
    }

    pub fn arriving_at(&self, station_id: u32) -> PackedRange {
        self.ranges
            .get(station_id as usize)
            .copied()
            .unwrap_or_else(PackedRange::empty)
    }

    /// Linearly scans the transfers arriving at `arr_station_id` for one
    /// departing from `dep_station_id` and returns its walk time.
    ///
    /// # Errors
    /// Fails if no such transfer exists.
    pub fn minutes_between(
        &self,
        transfers: &Transfers,
        dep_station_id: u32,
        arr_station_id: u32,
    ) -> Result<u8, NoSuchTransfer> {
        let range = self.arriving_at(arr_station_id);
        for i in range.as_range() {
            let t = transfers.get(i).expect("index within a built range is always valid");
            if t.dep_station_id == dep_station_id {
                return Ok(t.minutes);
            }
        }
        Err(NoSuchTransfer {
            dep_station_id,
            arr_station_id,
        })
    }
}
