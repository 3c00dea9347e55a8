//! A tiny in-memory timetable builder for exercising the store, router and
//! extractor against the oracle scenarios without touching a filesystem.
//! Not part of the public API — `#[cfg(test)]` only.

use std::collections::BTreeMap;

use super::connections::Connections;
use super::trips::Trips;
use super::vehicle_kind::VehicleKind;
use super::Timetable;

/// Accumulates stations, routes, trips, transfers and connections, then
/// [`TimetableFixtureBuilder::build`]s them into the same big-endian,
/// fixed-width byte layout the real on-disk tables use (§6).
#[derive(Default)]
pub struct TimetableFixtureBuilder {
    strings: Vec<String>,
    stations: Vec<u16>,
    platforms: Vec<(u16, u16)>,
    routes: Vec<(u16, u8)>,
    trips: Vec<(u16, u16)>,
    transfers: Vec<(u16, u16, u8)>,
    connections: Vec<(u16, u16, u16, u16, u32, u8)>,
}

impl TimetableFixtureBuilder {
    fn intern(&mut self, name: &str) -> u16 {
        self.strings.push(name.to_string());
        (self.strings.len() - 1) as u16
    }

    pub fn station(mut self, name: &str) -> Self {
        let idx = self.intern(name);
        self.stations.push(idx);
        self
    }

    pub fn platform(mut self, name: &str, station_id: u16) -> Self {
        let idx = self.intern(name);
        self.platforms.push((idx, station_id));
        self
    }

    pub fn route(mut self, name: &str, kind: VehicleKind) -> Self {
        let idx = self.intern(name);
        self.routes.push((idx, kind.as_ordinal()));
        self
    }

    pub fn trip(mut self, route_id: u16, destination: &str) -> Self {
        let idx = self.intern(destination);
        self.trips.push((route_id, idx));
        self
    }

    pub fn transfer(mut self, dep_station_id: u16, arr_station_id: u16, minutes: u8) -> Self {
        self.transfers
            .push((dep_station_id, arr_station_id, minutes));
        self
    }

    pub fn connection(
        mut self,
        dep_stop: u16,
        dep_mins: u16,
        arr_stop: u16,
        arr_mins: u16,
        trip_id: u32,
        trip_pos: u8,
    ) -> Self {
        self.connections
            .push((dep_stop, dep_mins, arr_stop, arr_mins, trip_id, trip_pos));
        self
    }

    pub fn build(mut self) -> TimetableFixture {
        // transfers.bin must be globally sorted by arrStationId (§6).
        self.transfers.sort_by_key(|t| t.1);

        let mut strings_bytes = String::new();
        for s in &self.strings {
            strings_bytes.push_str(s);
            strings_bytes.push('\n');
        }

        let mut stations_bytes = Vec::new();
        for &name_idx in &self.stations {
            stations_bytes.extend_from_slice(&name_idx.to_be_bytes());
            stations_bytes.extend_from_slice(&0i32.to_be_bytes());
            stations_bytes.extend_from_slice(&0i32.to_be_bytes());
        }

        let mut platforms_bytes = Vec::new();
        for &(name_idx, station_id) in &self.platforms {
            platforms_bytes.extend_from_slice(&name_idx.to_be_bytes());
            platforms_bytes.extend_from_slice(&station_id.to_be_bytes());
        }

        let mut routes_bytes = Vec::new();
        for &(name_idx, kind) in &self.routes {
            routes_bytes.extend_from_slice(&name_idx.to_be_bytes());
            routes_bytes.push(kind);
        }

        let mut trips_bytes = Vec::new();
        for &(route_id, dest_idx) in &self.trips {
            trips_bytes.extend_from_slice(&route_id.to_be_bytes());
            trips_bytes.extend_from_slice(&dest_idx.to_be_bytes());
        }

        let mut transfers_bytes = Vec::new();
        for &(dep, arr, minutes) in &self.transfers {
            transfers_bytes.extend_from_slice(&dep.to_be_bytes());
            transfers_bytes.extend_from_slice(&arr.to_be_bytes());
            transfers_bytes.push(minutes);
        }

        let mut connections_bytes = Vec::new();
        for &(dep_stop, dep_mins, arr_stop, arr_mins, trip_id, trip_pos) in &self.connections {
            connections_bytes.extend_from_slice(&dep_stop.to_be_bytes());
            connections_bytes.extend_from_slice(&dep_mins.to_be_bytes());
            connections_bytes.extend_from_slice(&arr_stop.to_be_bytes());
            connections_bytes.extend_from_slice(&arr_mins.to_be_bytes());
            let packed = (trip_id << 8) | trip_pos as u32;
            connections_bytes.extend_from_slice(&packed.to_be_bytes());
        }

        let mut by_trip: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for (i, &(.., trip_id, _)) in self.connections.iter().enumerate() {
            by_trip.entry(trip_id).or_default().push(i as u32);
        }
        let mut succ = vec![0u32; self.connections.len()];
        for indices in by_trip.values() {
            for (k, &idx) in indices.iter().enumerate() {
                succ[idx as usize] = indices[(k + 1) % indices.len()];
            }
        }
        let mut connections_succ_bytes = Vec::new();
        for s in succ {
            connections_succ_bytes.extend_from_slice(&s.to_be_bytes());
        }

        TimetableFixture {
            strings_bytes: strings_bytes.into_bytes(),
            stations_bytes,
            station_aliases_bytes: Vec::new(),
            platforms_bytes,
            routes_bytes,
            trips_bytes,
            transfers_bytes,
            connections_bytes,
            connections_succ_bytes,
        }
    }
}

/// The finished, encoded byte buffers. [`TimetableFixture::timetable`],
/// [`TimetableFixture::trips`] and [`TimetableFixture::connections`] build
/// typed views borrowing from `self`, the same way `backend` builds them
/// borrowing from its mapped files.
pub struct TimetableFixture {
    strings_bytes: Vec<u8>,
    stations_bytes: Vec<u8>,
    station_aliases_bytes: Vec<u8>,
    platforms_bytes: Vec<u8>,
    routes_bytes: Vec<u8>,
    trips_bytes: Vec<u8>,
    transfers_bytes: Vec<u8>,
    connections_bytes: Vec<u8>,
    connections_succ_bytes: Vec<u8>,
}

impl TimetableFixture {
    pub fn new() -> TimetableFixtureBuilder {
        TimetableFixtureBuilder::default()
    }

    pub fn timetable(&self) -> Timetable<'_> {
        Timetable::new(
            &self.strings_bytes,
            &self.stations_bytes,
            &self.station_aliases_bytes,
            &self.platforms_bytes,
            &self.routes_bytes,
            &self.transfers_bytes,
        )
        .unwrap()
    }

    pub fn trips(&self) -> Trips<'_> {
        Trips::new(&self.trips_bytes).unwrap()
    }

    pub fn connections(&self) -> Connections<'_> {
        Connections::new(&self.connections_bytes, &self.connections_succ_bytes).unwrap()
    }
}
