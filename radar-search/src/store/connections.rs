//! Connections (day-scoped): `(U16 depStopId, U16 depMins, U16 arrStopId,
//! U16 arrMins, S32 tripPosPacked)` records in `connections.bin`, paired
//! with one `S32` per connection in `connections-succ.bin` giving the next
//! connection in the same trip (circular). Globally sorted by decreasing
//! `depMins` (§6) — the router relies on this ordering, and does not
//! re-validate it (§4.4 Failure modes).

use super::records::{BoundsError, RecordView};

const RECORD_SIZE: usize = 12;
const DEP_STOP_OFFSET: usize = 0;
const DEP_MINS_OFFSET: usize = 2;
const ARR_STOP_OFFSET: usize = 4;
const ARR_MINS_OFFSET: usize = 6;
const TRIP_POS_PACKED_OFFSET: usize = 8;

const SUCC_RECORD_SIZE: usize = 4;

#[derive(Clone, Copy)]
pub struct Connections<'a> {
    records: RecordView<'a>,
    succ: RecordView<'a>,
}

/// One connection's fields, unpacked for convenience at the router's call
/// sites (§4.4 step-by-step description works off these named fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionFields {
    pub dep_stop_id: u32,
    pub dep_mins: u32,
    pub arr_stop_id: u32,
    pub arr_mins: u32,
    pub trip_id: u32,
    pub trip_pos: u32,
}

impl<'a> Connections<'a> {
    /// `connections_bytes` and `succ_bytes` must describe the same number
    /// of connections.
    ///
    /// # Errors
    /// Fails if either buffer's length is not a multiple of its record
    /// size, or if the two tables don't agree on the connection count.
    pub fn new(
        connections_bytes: &'a [u8],
        succ_bytes: &'a [u8],
    ) -> Result<Connections<'a>, ConnectionsError> {
        let records = RecordView::new(connections_bytes, RECORD_SIZE)?;
        let succ = RecordView::new(succ_bytes, SUCC_RECORD_SIZE)?;
        if records.len() != succ.len() {
            return Err(ConnectionsError::MismatchedLength {
                connections: records.len(),
                succ: succ.len(),
            });
        }
        Ok(Connections { records, succ })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, connection_id: u32) -> Result<ConnectionFields, BoundsError> {
        let i = connection_id as usize;
        let dep_stop_id = u32::from(self.records.field_u16(i, DEP_STOP_OFFSET)?);
        let dep_mins = u32::from(self.records.field_u16(i, DEP_MINS_OFFSET)?);
        let arr_stop_id = u32::from(self.records.field_u16(i, ARR_STOP_OFFSET)?);
        let arr_mins = u32::from(self.records.field_u16(i, ARR_MINS_OFFSET)?);
        let packed = self.records.field_i32(i, TRIP_POS_PACKED_OFFSET)? as u32;
        Ok(ConnectionFields {
            dep_stop_id,
            dep_mins,
            arr_stop_id,
            arr_mins,
            trip_id: packed >> 8,
            trip_pos: packed & 0xff,
        })
    }

    /// The index of the following connection in the same trip; circular
    /// within the trip.
    pub fn next_connection_id(&self, connection_id: u32) -> Result<u32, BoundsError> {
        self.succ.field_u32(connection_id as usize, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionsError {
    Bounds(BoundsError),
    MismatchedLength { connections: usize, succ: usize },
}

impl std::fmt::Display for ConnectionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionsError::Bounds(e) => e.fmt(f),
            ConnectionsError::MismatchedLength { connections, succ } => write!(
                f,
                "connections.bin has {} records but connections-succ.bin has {}",
                connections, succ
            ),
        }
    }
}

impl std::error::Error for ConnectionsError {}

impl From<BoundsError> for ConnectionsError {
    fn from(e: BoundsError) -> Self {
        ConnectionsError::Bounds(e)
    }
}
