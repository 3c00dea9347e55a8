//! The single stop-id namespace partitioned by `|stations|` (§3): ids
//! below the threshold are stations, ids at or above it are platforms,
//! offset by the threshold.

use super::platforms::{PlatformError, Platforms};
use super::strings::StringTable;

/// Resolves stop ids against a fixed station count.
#[derive(Debug, Clone, Copy)]
pub struct StopSpace {
    station_count: u32,
}

impl StopSpace {
    pub fn new(station_count: u32) -> StopSpace {
        StopSpace { station_count }
    }

    pub fn is_station(self, stop_id: u32) -> bool {
        stop_id < self.station_count
    }

    pub fn is_platform(self, stop_id: u32) -> bool {
        !self.is_station(stop_id)
    }

    /// The platform table index for a platform stop id; `None` if
    /// `stop_id` is a station.
    pub fn platform_index(self, stop_id: u32) -> Option<u32> {
        if self.is_station(stop_id) {
            None
        } else {
            Some(stop_id - self.station_count)
        }
    }

    /// `stationId(stopId)` from §3: the stop itself if it is a station,
    /// otherwise the station its platform belongs to.
    pub fn station_id(self, stop_id: u32, platforms: &Platforms) -> Result<u32, PlatformError> {
        match self.platform_index(stop_id) {
            None => Ok(stop_id),
            Some(platform_index) => platforms.station_id(platform_index).map_err(Into::into),
        }
    }

    /// `platformName(stopId)` from §3: the platform's own name if
    /// `stop_id` is a platform, `None` if it's a station.
    pub fn platform_name<'s>(
        self,
        stop_id: u32,
        platforms: &Platforms,
        strings: &'s StringTable,
    ) -> Result<Option<&'s str>, PlatformError> {
        match self.platform_index(stop_id) {
            None => Ok(None),
            Some(platform_index) => platforms.name(strings, platform_index).map(Some),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn platform_bytes(name_idx: u16, station_id: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&name_idx.to_be_bytes());
        bytes.extend_from_slice(&station_id.to_be_bytes());
        bytes
    }

    #[test]
    fn station_ids_are_below_threshold() {
        let space = StopSpace::new(10);
        assert!(space.is_station(0));
        assert!(space.is_station(9));
        assert!(!space.is_station(10));
    }

    #[test]
    fn station_id_resolves_through_platform() {
        let space = StopSpace::new(5);
        let platforms = Platforms::new(&platform_bytes(0, 3)).unwrap();
        // stop id 5 is the first platform (index 0), which belongs to station 3
        assert_eq!(space.station_id(5, &platforms).unwrap(), 3);
        assert_eq!(space.station_id(2, &platforms).unwrap(), 2);
    }

    #[test]
    fn platform_name_absent_for_stations() {
        let space = StopSpace::new(5);
        let strings = StringTable::from_latin1_bytes(b"Gleis 3\n");
        let platforms = Platforms::new(&platform_bytes(0, 3)).unwrap();
        assert_eq!(space.platform_name(2, &platforms, &strings).unwrap(), None);
        assert_eq!(
            space.platform_name(5, &platforms, &strings).unwrap(),
            Some("Gleis 3")
        );
    }
}
