//! Backward connection-scan profile construction (§4.4). Connections are
//! read in the order the timetable stores them — decreasing departure
//! time — so every later action on a connection's arrival stop has
//! already been propagated by the time the connection itself is scanned.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

use crate::frontier::{Frontier, FrontierBuilder};
use crate::packed::PackError;
use crate::store::connections::Connections;
use crate::store::platforms::PlatformError;
use crate::store::records::BoundsError;
use crate::store::trips::Trips;
use crate::store::Timetable;

/// Packs `(connectionId, intermediateStopCount)` into a criteria tuple's
/// opaque payload: 24 high bits for the connection id, 8 low bits for the
/// count (§3).
fn pack_payload(connection_id: u32, intermediate_stops: u32) -> u32 {
    (connection_id << 8) | (intermediate_stops & 0xff)
}

/// Unpacks a payload produced by [`pack_payload`].
pub fn unpack_payload(payload: u32) -> (u32, u32) {
    (payload >> 8, payload & 0xff)
}

#[derive(Debug)]
pub enum RouterError {
    Bounds(BoundsError),
    Platform(PlatformError),
    Pack(PackError),
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::Bounds(e) => e.fmt(f),
            RouterError::Platform(e) => e.fmt(f),
            RouterError::Pack(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<BoundsError> for RouterError {
    fn from(e: BoundsError) -> Self {
        RouterError::Bounds(e)
    }
}

impl From<PlatformError> for RouterError {
    fn from(e: PlatformError) -> Self {
        RouterError::Platform(e)
    }
}

impl From<PackError> for RouterError {
    fn from(e: PackError) -> Self {
        RouterError::Pack(e)
    }
}

/// The result of a backward profile build: a Pareto frontier of
/// `(arrMinsAtDest, changes, depMinsFromS)` for every station `s`, plus
/// enough of the query to let the journey extractor walk it.
pub struct Profile<'a> {
    timetable: &'a Timetable<'a>,
    trips: Trips<'a>,
    connections: Connections<'a>,
    date: NaiveDate,
    arrival_station: u32,
    station_front: Vec<Frontier>,
}

impl<'a> Profile<'a> {
    /// Builds a profile for journeys arriving at `arrival_station` on
    /// `date`. `max_changes`, if given, caps the change count a boarding
    /// tuple may carry; connections that would exceed it are skipped.
    pub fn build(
        timetable: &'a Timetable<'a>,
        trips: Trips<'a>,
        connections: Connections<'a>,
        date: NaiveDate,
        arrival_station: u32,
        max_changes: Option<u32>,
    ) -> Result<Profile<'a>, RouterError> {
        let station_count = timetable.station_count();
        let stop_space = timetable.stop_space();
        let transfers = timetable.transfers();
        let transfer_index = timetable.transfer_index();

        let mut trip_front: HashMap<u32, FrontierBuilder> = HashMap::new();
        let mut station_front: Vec<FrontierBuilder> =
            (0..station_count).map(|_| FrontierBuilder::new()).collect();

        for i in 0..connections.len() {
            let c = connections.get(i as u32)?;

            let mut f = FrontierBuilder::new();

            // 1a. walk straight to the destination from arrStop's station.
            let arr_station = stop_space.station_id(c.arr_stop_id, timetable.platforms())?;
            let range = transfer_index.arriving_at(arrival_station).as_range();
            for j in range {
                let t = transfers.get(j)?;
                if t.dep_station_id == arr_station {
                    let payload = pack_payload(i as u32, 0);
                    f.add_packed(c.arr_mins as i32 + t.minutes as i32, 0, payload)?;
                }
            }

            // 1b. stay aboard the same trip past arrStop.
            if let Some(tf) = trip_front.get(&c.trip_id) {
                f.add_all(tf.as_slice())?;
            }

            // 1c. change at arrStop onto a later departure from that station.
            for &t in station_front[arr_station as usize].as_slice() {
                if t.dep()? >= c.arr_mins as i32 {
                    let ch = t.ch() + 1;
                    if max_changes.map_or(true, |limit| ch <= limit) {
                        let payload = pack_payload(i as u32, 0);
                        f.add_packed(t.arr(), ch, payload)?;
                    }
                }
            }

            if f.is_empty() {
                continue;
            }

            // 3. update the trip front.
            trip_front
                .entry(c.trip_id)
                .or_insert_with(FrontierBuilder::new)
                .add_all(f.as_slice())?;

            // 4. propagate to stations reachable from depStop by walking.
            let dep_station = stop_space.station_id(c.dep_stop_id, timetable.platforms())?;
            if !station_front[dep_station as usize].fully_dominates(f.as_slice(), c.dep_mins as i32)? {
                let range = transfer_index.arriving_at(dep_station).as_range();
                for j in range {
                    let tr = transfers.get(j)?;
                    let w = tr.minutes as i32;
                    let mut propagated = FrontierBuilder::new();
                    for &t in f.as_slice() {
                        let (prev_conn_id, _) = unpack_payload(t.payload());
                        let prev_trip_pos = connections.get(prev_conn_id)?.trip_pos;
                        let intermediate = prev_trip_pos.saturating_sub(c.trip_pos);
                        let new_payload = pack_payload(i as u32, intermediate);
                        let d = c.dep_mins as i32 - w;
                        let tuple = t.with_dep(d)?.with_payload(new_payload);
                        propagated.add(tuple)?;
                    }
                    station_front[tr.dep_station_id as usize].add_all(propagated.as_slice())?;
                }
            }
        }

        Ok(Profile {
            timetable,
            trips,
            connections,
            date,
            arrival_station,
            station_front: station_front.into_iter().map(FrontierBuilder::build).collect(),
        })
    }

    pub fn timetable(&self) -> &'a Timetable<'a> {
        self.timetable
    }

    pub fn trips(&self) -> &Trips<'a> {
        &self.trips
    }

    pub fn connections(&self) -> &Connections<'a> {
        &self.connections
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn arrival_station(&self) -> u32 {
        self.arrival_station
    }

    pub fn station_front(&self, station_id: u32) -> &Frontier {
        &self.station_front[station_id as usize]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::test_fixture::TimetableFixture;

    #[test]
    fn scenario_s4_direct_walk_only_journey_is_empty_with_no_connections() {
        // A, B with a 7 minute transfer A->B, no connections on the date.
        // The connection-scan loop never runs, so no station front is ever
        // populated (§9 open question: this implementation does not admit
        // zero-connection journeys).
        let fx = TimetableFixture::new()
            .station("A")
            .station("B")
            .transfer(0, 1, 7)
            .build();
        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let timetable = fx.timetable();
        let trips = Trips::new(&[]).unwrap();
        let connections = Connections::new(&[], &[]).unwrap();
        let profile = Profile::build(&timetable, trips, connections, date, 1, None).unwrap();
        assert!(profile.station_front(0).is_empty());
    }

    #[test]
    fn scenario_s5_single_leg_journey() {
        // boarding in place at A requires A's own 0-minute self-transfer,
        // same as B's, for step 4 to populate stationFront[A] (§9).
        let fx = TimetableFixture::new()
            .station("A")
            .station("B")
            .route("U1", crate::store::vehicle_kind::VehicleKind::Train)
            .trip(0, "B")
            .transfer(0, 0, 0)
            .transfer(1, 1, 0)
            .connection(0, 600, 1, 612, 0, 0)
            .build();
        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let timetable = fx.timetable();
        let profile = Profile::build(
            &timetable,
            fx.trips(),
            fx.connections(),
            date,
            1,
            None,
        )
        .unwrap();
        let front = profile.station_front(0);
        assert_eq!(front.size(), 1);
        let t = front.get(612, 0).unwrap();
        assert_eq!(t.dep().unwrap(), 600);
        let (conn_id, intermediate) = unpack_payload(t.payload());
        assert_eq!(conn_id, 0);
        assert_eq!(intermediate, 0);
    }
}
