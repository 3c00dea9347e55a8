//! Journey extraction (§4.5-4.6): walks a built [`Profile`] forward from a
//! departure station, turning the payload chain recorded by the router
//! into a concrete, human-meaningful sequence of [`Leg`]s.
//!
//! The router's tuples record *the latest permissible departure time*
//! from the station they sit in (needed for Pareto dominance on the
//! departure criterion); the extractor does not reuse that time for
//! intermediate foot legs. Once a traveler has physically arrived
//! somewhere, the walk to the next boarding starts immediately — the
//! slack between arrival and the next connection's departure is waiting
//! time, not part of the foot leg.

use std::fmt;

use crate::frontier::NoSuchTuple;
use crate::packed::{CriteriaTuple, PackError};
use crate::router::{unpack_payload, Profile};
use crate::store::connections::{ConnectionFields, Connections};
use crate::store::platforms::PlatformError;
use crate::store::records::BoundsError;
use crate::store::routes::{RouteError, Routes};
use crate::store::strings::StringTable;
use crate::store::transfer_index::NoSuchTransfer;
use crate::store::trips::{TripError, Trips};
use crate::store::vehicle_kind::VehicleKind;

/// A stop passed through without alighting, while riding a single
/// transport leg (§4.6): the vehicle arrives, dwells, and departs again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntermediateStop {
    pub stop_id: u32,
    pub arr_mins: i32,
    pub dep_mins: i32,
}

/// One leg of a journey: either riding a vehicle or walking (§4.6). Not
/// extensible — the source models exactly these two kinds, with the
/// intermediate stop nested inside `Transport` rather than a leg subtype.
#[derive(Debug, Clone)]
pub enum Leg<'a> {
    Transport {
        dep_stop: u32,
        dep_mins: i32,
        arr_stop: u32,
        arr_mins: i32,
        intermediate_stops: Vec<IntermediateStop>,
        vehicle_kind: VehicleKind,
        route_name: &'a str,
        destination: &'a str,
    },
    Foot {
        dep_stop: u32,
        dep_mins: i32,
        arr_stop: u32,
        arr_mins: i32,
    },
}

impl<'a> Leg<'a> {
    pub fn dep_stop(&self) -> u32 {
        match *self {
            Leg::Transport { dep_stop, .. } => dep_stop,
            Leg::Foot { dep_stop, .. } => dep_stop,
        }
    }

    pub fn arr_stop(&self) -> u32 {
        match *self {
            Leg::Transport { arr_stop, .. } => arr_stop,
            Leg::Foot { arr_stop, .. } => arr_stop,
        }
    }

    pub fn dep_mins(&self) -> i32 {
        match *self {
            Leg::Transport { dep_mins, .. } => dep_mins,
            Leg::Foot { dep_mins, .. } => dep_mins,
        }
    }

    pub fn arr_mins(&self) -> i32 {
        match *self {
            Leg::Transport { arr_mins, .. } => arr_mins,
            Leg::Foot { arr_mins, .. } => arr_mins,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Leg::Transport { .. })
    }

    /// A foot leg counts as a "transfer" rather than a plain walk iff its
    /// departure and arrival stations have the same name (§4.6) — this
    /// needs the caller's string table since a `Leg` only stores stop ids.
    pub fn is_transfer(&self, name_of_station: impl Fn(u32) -> Option<&'a str>) -> bool {
        match *self {
            Leg::Foot { dep_stop, arr_stop, .. } => {
                name_of_station(dep_stop) == name_of_station(arr_stop)
            }
            Leg::Transport { .. } => false,
        }
    }
}

/// An extracted leg, or the whole journey, violated one of §4.5/§4.6's
/// construction invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyError {
    EmptyJourney,
    ArrivalBeforeDeparture { dep_mins: i32, arr_mins: i32 },
    IntermediateDeparturePrecedesArrival { arr_mins: i32, dep_mins: i32 },
    SameKindConsecutiveLegs,
    DiscontinuousStop { prev_arr_stop: u32, next_dep_stop: u32 },
    OutOfOrderLegs { prev_arr_mins: i32, next_dep_mins: i32 },
}

impl fmt::Display for JourneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JourneyError::EmptyJourney => write!(f, "a journey must have at least one leg"),
            JourneyError::ArrivalBeforeDeparture { dep_mins, arr_mins } => write!(
                f,
                "leg arrives ({}) before it departs ({})",
                arr_mins, dep_mins
            ),
            JourneyError::IntermediateDeparturePrecedesArrival { arr_mins, dep_mins } => write!(
                f,
                "intermediate stop departs ({}) before it arrives ({})",
                dep_mins, arr_mins
            ),
            JourneyError::SameKindConsecutiveLegs => {
                write!(f, "consecutive legs must alternate transport and foot")
            }
            JourneyError::DiscontinuousStop {
                prev_arr_stop,
                next_dep_stop,
            } => write!(
                f,
                "leg departs from stop {} but the previous leg arrived at {}",
                next_dep_stop, prev_arr_stop
            ),
            JourneyError::OutOfOrderLegs {
                prev_arr_mins,
                next_dep_mins,
            } => write!(
                f,
                "leg departs at {} before the previous leg arrived at {}",
                next_dep_mins, prev_arr_mins
            ),
        }
    }
}

impl std::error::Error for JourneyError {}

/// An immutable, non-empty ordered sequence of legs (§4.6).
#[derive(Debug, Clone)]
pub struct Journey<'a> {
    legs: Vec<Leg<'a>>,
}

impl<'a> Journey<'a> {
    /// Validates and wraps `legs` as a Journey.
    ///
    /// # Errors
    /// Fails on any violation listed in §4.5's closing paragraph / §4.6:
    /// emptiness, a leg arriving before it departs, an intermediate stop
    /// departing before it arrives, two consecutive legs of the same
    /// kind, a departure stop that doesn't match the previous arrival
    /// stop, or a departure time earlier than the previous arrival.
    pub fn new(legs: Vec<Leg<'a>>) -> Result<Journey<'a>, JourneyError> {
        if legs.is_empty() {
            return Err(JourneyError::EmptyJourney);
        }
        for leg in &legs {
            if leg.arr_mins() < leg.dep_mins() {
                return Err(JourneyError::ArrivalBeforeDeparture {
                    dep_mins: leg.dep_mins(),
                    arr_mins: leg.arr_mins(),
                });
            }
            if let Leg::Transport {
                intermediate_stops, ..
            } = leg
            {
                for stop in intermediate_stops {
                    if stop.dep_mins < stop.arr_mins {
                        return Err(JourneyError::IntermediateDeparturePrecedesArrival {
                            arr_mins: stop.arr_mins,
                            dep_mins: stop.dep_mins,
                        });
                    }
                }
            }
        }
        for pair in legs.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.is_transport() == next.is_transport() {
                return Err(JourneyError::SameKindConsecutiveLegs);
            }
            if prev.arr_stop() != next.dep_stop() {
                return Err(JourneyError::DiscontinuousStop {
                    prev_arr_stop: prev.arr_stop(),
                    next_dep_stop: next.dep_stop(),
                });
            }
            if next.dep_mins() < prev.arr_mins() {
                return Err(JourneyError::OutOfOrderLegs {
                    prev_arr_mins: prev.arr_mins(),
                    next_dep_mins: next.dep_mins(),
                });
            }
        }
        Ok(Journey { legs })
    }

    pub fn legs(&self) -> &[Leg<'a>] {
        &self.legs
    }

    pub fn depart_mins(&self) -> i32 {
        self.legs[0].dep_mins()
    }

    pub fn arrive_mins(&self) -> i32 {
        self.legs[self.legs.len() - 1].arr_mins()
    }

    pub fn change_count(&self) -> usize {
        self.legs
            .iter()
            .filter(|l| matches!(l, Leg::Transport { .. }))
            .count()
            .saturating_sub(1)
    }
}

#[derive(Debug)]
pub enum ExtractError {
    Bounds(BoundsError),
    Platform(PlatformError),
    Route(RouteError),
    Trip(TripError),
    Pack(PackError),
    NoSuchTuple(NoSuchTuple),
    NoSuchTransfer(NoSuchTransfer),
    Journey(JourneyError),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Bounds(e) => e.fmt(f),
            ExtractError::Platform(e) => e.fmt(f),
            ExtractError::Route(e) => e.fmt(f),
            ExtractError::Trip(e) => e.fmt(f),
            ExtractError::Pack(e) => e.fmt(f),
            ExtractError::NoSuchTuple(e) => e.fmt(f),
            ExtractError::NoSuchTransfer(e) => e.fmt(f),
            ExtractError::Journey(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<BoundsError> for ExtractError {
    fn from(e: BoundsError) -> Self {
        ExtractError::Bounds(e)
    }
}
impl From<PlatformError> for ExtractError {
    fn from(e: PlatformError) -> Self {
        ExtractError::Platform(e)
    }
}
impl From<RouteError> for ExtractError {
    fn from(e: RouteError) -> Self {
        ExtractError::Route(e)
    }
}
impl From<TripError> for ExtractError {
    fn from(e: TripError) -> Self {
        ExtractError::Trip(e)
    }
}
impl From<PackError> for ExtractError {
    fn from(e: PackError) -> Self {
        ExtractError::Pack(e)
    }
}
impl From<NoSuchTuple> for ExtractError {
    fn from(e: NoSuchTuple) -> Self {
        ExtractError::NoSuchTuple(e)
    }
}
impl From<NoSuchTransfer> for ExtractError {
    fn from(e: NoSuchTransfer) -> Self {
        ExtractError::NoSuchTransfer(e)
    }
}
impl From<JourneyError> for ExtractError {
    fn from(e: JourneyError) -> Self {
        ExtractError::Journey(e)
    }
}

/// Extracts every journey starting at `dep_station`, sorted by
/// `(depTime, arrTime)` (§4.5). One [`Journey`] is produced per tuple in
/// `profile.station_front(dep_station)`.
pub fn extract_journeys<'a>(
    profile: &Profile<'a>,
    dep_station: u32,
) -> Result<Vec<Journey<'a>>, ExtractError> {
    let front = profile.station_front(dep_station);
    let mut journeys = Vec::with_capacity(front.size());
    for &t0 in front.as_slice() {
        journeys.push(extract_one(profile, dep_station, t0)?);
    }
    journeys.sort_by_key(|j| (j.depart_mins(), j.arrive_mins()));
    Ok(journeys)
}

/// Reconstructs a single [`Journey`] from one frontier tuple at
/// `dep_station` (§4.5 steps 1-4).
fn extract_one<'a>(
    profile: &Profile<'a>,
    dep_station: u32,
    t0: CriteriaTuple,
) -> Result<Journey<'a>, ExtractError> {
    let timetable = profile.timetable();
    let connections = profile.connections();
    let trips = profile.trips();
    let platforms = timetable.platforms();
    let routes = timetable.routes();
    let strings = timetable.strings();
    let stop_space = timetable.stop_space();
    let transfers = timetable.transfers();
    let transfer_index = timetable.transfer_index();

    let mut legs: Vec<Leg<'a>> = Vec::new();
    let mut current_stop = dep_station;
    let mut current_arr_mins = t0.dep()?;
    let mut remaining_changes = t0.ch();
    let want_arr = t0.arr();
    let mut t = t0;
    let mut first = true;

    loop {
        let (conn_id, n_intermediate) = unpack_payload(t.payload());
        let c0 = connections.get(conn_id)?;
        let conn_dep_station = stop_space.station_id(c0.dep_stop_id, platforms)?;
        let current_station = stop_space.station_id(current_stop, platforms)?;

        let needs_foot_leg = if first {
            conn_dep_station != dep_station
        } else {
            true
        };

        if needs_foot_leg {
            let dep_mins = if first { t.dep()? } else { current_arr_mins };
            let walk = transfer_index.minutes_between(transfers, current_station, conn_dep_station)?;
            let arr_mins = dep_mins + i32::from(walk);
            legs.push(Leg::Foot {
                dep_stop: current_stop,
                dep_mins,
                arr_stop: c0.dep_stop_id,
                arr_mins,
            });
        }

        let (leg, arr_stop, arr_mins) = build_transport_leg(connections, trips, routes, strings, conn_id, c0, n_intermediate)?;
        legs.push(leg);
        current_stop = arr_stop;
        current_arr_mins = arr_mins;
        first = false;

        if remaining_changes == 0 {
            break;
        }
        remaining_changes -= 1;

        let next_station = stop_space.station_id(current_stop, platforms)?;
        let next_front = profile.station_front(next_station);
        t = next_front.get(want_arr, remaining_changes)?;
    }

    let final_station = stop_space.station_id(current_stop, platforms)?;
    if final_station != profile.arrival_station() {
        let walk = transfer_index.minutes_between(transfers, final_station, profile.arrival_station())?;
        legs.push(Leg::Foot {
            dep_stop: current_stop,
            dep_mins: current_arr_mins,
            arr_stop: profile.arrival_station(),
            arr_mins: current_arr_mins + i32::from(walk),
        });
    }

    Ok(Journey::new(legs)?)
}

/// Walks forward from `conn_id` through `next_connection_id` exactly
/// `n_intermediate` times, building the Transport leg and returning its
/// alighting stop and time (§4.5 step 3).
fn build_transport_leg<'a>(
    connections: &Connections<'a>,
    trips: &Trips<'a>,
    routes: &Routes<'a>,
    strings: &'a StringTable,
    conn_id: u32,
    c0: ConnectionFields,
    n_intermediate: u32,
) -> Result<(Leg<'a>, u32, i32), ExtractError> {
    let route_id = trips.route_id(c0.trip_id)?;
    let vehicle_kind = routes.vehicle_kind(route_id)?;
    let route_name = routes.name(strings, route_id)?;
    let destination = trips.destination(strings, c0.trip_id)?;

    let mut intermediate_stops = Vec::with_capacity(n_intermediate as usize);
    let mut cur_id = conn_id;
    let mut cur = c0;
    for _ in 0..n_intermediate {
        let next_id = connections.next_connection_id(cur_id)?;
        let next = connections.get(next_id)?;
        intermediate_stops.push(IntermediateStop {
            stop_id: cur.arr_stop_id,
            arr_mins: cur.arr_mins as i32,
            dep_mins: next.dep_mins as i32,
        });
        cur_id = next_id;
        cur = next;
    }

    let leg = Leg::Transport {
        dep_stop: c0.dep_stop_id,
        dep_mins: c0.dep_mins as i32,
        arr_stop: cur.arr_stop_id,
        arr_mins: cur.arr_mins as i32,
        intermediate_stops,
        vehicle_kind,
        route_name,
        destination,
    };
    Ok((leg, cur.arr_stop_id, cur.arr_mins as i32))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::router::Profile;
    use crate::store::test_fixture::TimetableFixture;
    use crate::store::vehicle_kind::VehicleKind;
    use chrono::NaiveDate;

    #[test]
    fn scenario_s5_single_leg_journey() {
        let fx = TimetableFixture::new()
            .station("A")
            .station("B")
            .route("U1", VehicleKind::Train)
            .trip(0, "B")
            .transfer(0, 0, 0)
            .transfer(1, 1, 0)
            .connection(0, 600, 1, 612, 0, 0)
            .build();
        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let timetable = fx.timetable();
        let profile = Profile::build(&timetable, fx.trips(), fx.connections(), date, 1, None).unwrap();
        let journeys = extract_journeys(&profile, 0).unwrap();
        assert_eq!(journeys.len(), 1);
        let j = &journeys[0];
        assert_eq!(j.legs().len(), 1);
        match &j.legs()[0] {
            Leg::Transport {
                dep_stop,
                dep_mins,
                arr_stop,
                arr_mins,
                intermediate_stops,
                ..
            } => {
                assert_eq!(*dep_stop, 0);
                assert_eq!(*dep_mins, 600);
                assert_eq!(*arr_stop, 1);
                assert_eq!(*arr_mins, 612);
                assert!(intermediate_stops.is_empty());
            }
            _ => panic!("expected a transport leg"),
        }
        assert_eq!(j.change_count(), 0);
    }

    #[test]
    fn scenario_s6_two_leg_journey_with_required_transfer() {
        // A -> H1 (dep 600 arr 610), walk H1 -> H2 (2 min), H2 -> B (dep 615 arr 625)
        let fx = TimetableFixture::new()
            .station("A")
            .station("H1")
            .station("H2")
            .station("B")
            .route("U1", VehicleKind::Train)
            .route("U2", VehicleKind::Train)
            .trip(0, "H1")
            .trip(1, "B")
            .transfer(0, 0, 0)
            .transfer(1, 2, 2)
            .transfer(3, 3, 0)
            .connection(2, 615, 3, 625, 1, 0)
            .connection(0, 600, 1, 610, 0, 0)
            .build();
        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let timetable = fx.timetable();
        let profile = Profile::build(&timetable, fx.trips(), fx.connections(), date, 3, None).unwrap();
        let journeys = extract_journeys(&profile, 0).unwrap();
        assert_eq!(journeys.len(), 1);
        let j = &journeys[0];
        assert_eq!(j.legs().len(), 3);
        assert!(j.legs()[0].is_transport());
        assert!(!j.legs()[1].is_transport());
        assert!(j.legs()[2].is_transport());

        match &j.legs()[1] {
            Leg::Foot {
                dep_stop,
                dep_mins,
                arr_stop,
                arr_mins,
            } => {
                assert_eq!(*dep_stop, 1);
                assert_eq!(*dep_mins, 610);
                assert_eq!(*arr_stop, 2);
                assert_eq!(*arr_mins, 612);
            }
            _ => panic!("expected a foot leg"),
        }
        assert_eq!(j.change_count(), 1);
        assert_eq!(j.depart_mins(), 600);
        assert_eq!(j.arrive_mins(), 625);
    }

    #[test]
    fn journey_rejects_consecutive_transport_legs() {
        let legs = vec![
            Leg::Transport {
                dep_stop: 0,
                dep_mins: 0,
                arr_stop: 1,
                arr_mins: 10,
                intermediate_stops: vec![],
                vehicle_kind: VehicleKind::Bus,
                route_name: "X",
                destination: "Y",
            },
            Leg::Transport {
                dep_stop: 1,
                dep_mins: 10,
                arr_stop: 2,
                arr_mins: 20,
                intermediate_stops: vec![],
                vehicle_kind: VehicleKind::Bus,
                route_name: "X",
                destination: "Y",
            },
        ];
        assert!(Journey::new(legs).is_err());
    }

    #[test]
    fn journey_rejects_discontinuous_stops() {
        let legs = vec![
            Leg::Transport {
                dep_stop: 0,
                dep_mins: 0,
                arr_stop: 1,
                arr_mins: 10,
                intermediate_stops: vec![],
                vehicle_kind: VehicleKind::Bus,
                route_name: "X",
                destination: "Y",
            },
            Leg::Foot {
                dep_stop: 5,
                dep_mins: 10,
                arr_stop: 6,
                arr_mins: 12,
            },
        ];
        assert!(Journey::new(legs).is_err());
    }

    #[test]
    fn journey_rejects_empty() {
        assert!(Journey::<'static>::new(vec![]).is_err());
    }
}
