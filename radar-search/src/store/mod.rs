//! Typed, read-only views into memory-mapped timetable files (§4.2). The
//! store itself never touches a filesystem — it is handed already-mapped
//! byte slices by the I/O layer (the `backend` crate) and only does offset
//! arithmetic over them.

pub mod connections;
pub mod day_cache;
pub mod platforms;
pub mod records;
pub mod routes;
pub mod station_aliases;
pub mod stations;
pub mod stop_id;
pub mod strings;
pub mod transfer_index;
pub mod transfers;
pub mod trips;
pub mod vehicle_kind;

use std::cell::RefCell;
use std::fmt;

use chrono::NaiveDate;

use self::connections::{Connections, ConnectionsError};
use self::day_cache::DayCache;
use self::platforms::Platforms;
use self::records::BoundsError;
use self::routes::Routes;
use self::station_aliases::StationAliases;
use self::stations::Stations;
use self::stop_id::StopSpace;
use self::strings::StringTable;
use self::transfer_index::TransferIndex;
use self::transfers::Transfers;
use self::trips::Trips;

/// The immutable, process-lifetime static timetable (§3 Lifecycle): every
/// table that does not vary by date, plus a day-scoped cache for the one
/// that does.
pub struct Timetable<'a> {
    strings: StringTable,
    stations: Stations<'a>,
    station_aliases: StationAliases<'a>,
    platforms: Platforms<'a>,
    routes: Routes<'a>,
    transfers: Transfers<'a>,
    transfer_index: TransferIndex,
    stop_space: StopSpace,
    day: RefCell<Option<DayCache<'a>>>,
}

#[derive(Debug)]
pub enum TimetableBuildError {
    Bounds(BoundsError),
}

impl fmt::Display for TimetableBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimetableBuildError::Bounds(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for TimetableBuildError {}

impl From<BoundsError> for TimetableBuildError {
    fn from(e: BoundsError) -> Self {
        TimetableBuildError::Bounds(e)
    }
}

impl<'a> Timetable<'a> {
    /// Builds the static (date-independent) portion of the store from
    /// already mapped byte buffers.
    pub fn new(
        strings_bytes: &'a [u8],
        stations_bytes: &'a [u8],
        station_aliases_bytes: &'a [u8],
        platforms_bytes: &'a [u8],
        routes_bytes: &'a [u8],
        transfers_bytes: &'a [u8],
    ) -> Result<Timetable<'a>, TimetableBuildError> {
        let strings = StringTable::from_latin1_bytes(strings_bytes);
        let stations = Stations::new(stations_bytes)?;
        let station_aliases = StationAliases::new(station_aliases_bytes)?;
        let platforms = Platforms::new(platforms_bytes)?;
        let routes = Routes::new(routes_bytes)?;
        let transfers = Transfers::new(transfers_bytes)?;
        let transfer_index = TransferIndex::build(&transfers, stations.len())?;
        let stop_space = StopSpace::new(stations.len() as u32);

        Ok(Timetable {
            strings,
            stations,
            station_aliases,
            platforms,
            routes,
            transfers,
            transfer_index,
            stop_space,
            day: RefCell::new(None),
        })
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    pub fn stations(&self) -> &Stations<'a> {
        &self.stations
    }

    pub fn station_aliases(&self) -> &StationAliases<'a> {
        &self.station_aliases
    }

    pub fn platforms(&self) -> &Platforms<'a> {
        &self.platforms
    }

    pub fn routes(&self) -> &Routes<'a> {
        &self.routes
    }

    pub fn transfers(&self) -> &Transfers<'a> {
        &self.transfers
    }

    pub fn transfer_index(&self) -> &TransferIndex {
        &self.transfer_index
    }

    pub fn stop_space(&self) -> StopSpace {
        self.stop_space
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// The date the day cache currently holds, if any; lets the I/O layer
    /// skip re-mapping a day's files it has already loaded.
    pub fn cached_date(&self) -> Option<NaiveDate> {
        self.day.borrow().as_ref().map(DayCache::date)
    }

    /// Replaces the day cache if it isn't already serving `date`.
    pub fn ensure_day(
        &self,
        date: NaiveDate,
        trips_bytes: &'a [u8],
        connections_bytes: &'a [u8],
        connections_succ_bytes: &'a [u8],
    ) -> Result<(), ConnectionsError> {
        if self.day.borrow().as_ref().map_or(false, |d| d.is_for(date)) {
            return Ok(());
        }
        let trips = Trips::new(trips_bytes)?;
        let connections = Connections::new(connections_bytes, connections_succ_bytes)?;
        *self.day.borrow_mut() = Some(DayCache::new(date, trips, connections));
        Ok(())
    }

    /// Runs `f` with references to the currently cached day's trips and
    /// connections.
    ///
    /// # Panics
    /// Panics if no day has been loaded via [`Timetable::ensure_day`], or
    /// if the cached day does not match `date` — the router is expected to
    /// call `ensure_day` first.
    pub fn with_day<R>(&self, date: NaiveDate, f: impl FnOnce(&Trips<'a>, &Connections<'a>) -> R) -> R {
        let day = self.day.borrow();
        let day = day
            .as_ref()
            .filter(|d| d.is_for(date))
            .unwrap_or_else(|| panic!("no day cache loaded for {}", date));
        f(day.trips(), day.connections())
    }
}

#[cfg(test)]
pub mod test_fixture;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_from_empty_tables() {
        let t = Timetable::new(b"", &[], &[], &[], &[], &[]).unwrap();
        assert_eq!(t.station_count(), 0);
    }

    #[test]
    fn day_cache_swaps_on_date_change() {
        let t = Timetable::new(b"", &[], &[], &[], &[], &[]).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        t.ensure_day(d1, &[], &[], &[]).unwrap();
        assert_eq!(t.cached_date(), Some(d1));
        t.ensure_day(d2, &[], &[], &[]).unwrap();
        assert_eq!(t.cached_date(), Some(d2));
    }

    #[test]
    #[should_panic]
    fn with_day_panics_if_not_loaded() {
        let t = Timetable::new(b"", &[], &[], &[], &[], &[]).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        t.with_day(d1, |_, _| ());
    }
}
