//! The day-scoped cache (§4.2): holds exactly one `(date, trips,
//! connections)` triple, replaced wholesale when a different date is
//! requested. Single-threaded, no locks (§5).

use chrono::NaiveDate;

use super::connections::Connections;
use super::trips::Trips;

pub struct DayCache<'a> {
    date: NaiveDate,
    trips: Trips<'a>,
    connections: Connections<'a>,
}

impl<'a> DayCache<'a> {
    pub fn new(date: NaiveDate, trips: Trips<'a>, connections: Connections<'a>) -> DayCache<'a> {
        DayCache {
            date,
            trips,
            connections,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn trips(&self) -> &Trips<'a> {
        &self.trips
    }

    pub fn connections(&self) -> &Connections<'a> {
        &self.connections
    }

    pub fn is_for(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}
