//! Routes: `(U16 nameIdx, U8 vehicleKind)` records (§6).

use super::records::{BoundsError, RecordView};
use super::strings::{StringIndexOutOfRange, StringTable};
use super::vehicle_kind::{UnknownVehicleKind, VehicleKind};

const RECORD_SIZE: usize = 3;
const NAME_IDX_OFFSET: usize = 0;
const VEHICLE_KIND_OFFSET: usize = 2;

pub struct Routes<'a> {
    records: RecordView<'a>,
}

impl<'a> Routes<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Routes<'a>, BoundsError> {
        Ok(Routes {
            records: RecordView::new(bytes, RECORD_SIZE)?,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn name<'s>(&self, strings: &'s StringTable, route_id: u32) -> Result<&'s str, RouteError> {
        let idx = self.records.field_u16(route_id as usize, NAME_IDX_OFFSET)?;
        Ok(strings.get(idx as u32)?)
    }

    pub fn vehicle_kind(&self, route_id: u32) -> Result<VehicleKind, RouteError> {
        let ordinal = self.records.field_u8(route_id as usize, VEHICLE_KIND_OFFSET)?;
        Ok(VehicleKind::from_ordinal(ordinal)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    Bounds(BoundsError),
    String(StringIndexOutOfRange),
    UnknownVehicleKind(UnknownVehicleKind),
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::Bounds(e) => e.fmt(f),
            RouteError::String(e) => e.fmt(f),
            RouteError::UnknownVehicleKind(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for RouteError {}

impl From<BoundsError> for RouteError {
    fn from(e: BoundsError) -> Self {
        RouteError::Bounds(e)
    }
}

impl From<StringIndexOutOfRange> for RouteError {
    fn from(e: StringIndexOutOfRange) -> Self {
        RouteError::String(e)
    }
}

impl From<UnknownVehicleKind> for RouteError {
    fn from(e: UnknownVehicleKind) -> Self {
        RouteError::UnknownVehicleKind(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_name_and_vehicle_kind() {
        let strings = StringTable::from_latin1_bytes(b"U2\n");
        let bytes = [0u8, 0, 1]; // nameIdx=0, vehicleKind=1 (Metro)
        let routes = Routes::new(&bytes).unwrap();
        assert_eq!(routes.name(&strings, 0).unwrap(), "U2");
        assert_eq!(routes.vehicle_kind(0).unwrap(), VehicleKind::Metro);
    }
}
