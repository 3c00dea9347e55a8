//! The fixed seven-value vehicle kind enum. Persisted as a single `u8`
//! ordinal per §6/§9 — the wire contract is the ordinal, not a reflected
//! name, so no `strum`-style derive is used here.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VehicleKind {
    Tram = 0,
    Metro = 1,
    Train = 2,
    Bus = 3,
    Ferry = 4,
    AerialLift = 5,
    Funicular = 6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownVehicleKind(pub u8);

impl fmt::Display for UnknownVehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown vehicle kind ordinal {}", self.0)
    }
}

impl std::error::Error for UnknownVehicleKind {}

impl VehicleKind {
    pub fn from_ordinal(ordinal: u8) -> Result<VehicleKind, UnknownVehicleKind> {
        match ordinal {
            0 => Ok(VehicleKind::Tram),
            1 => Ok(VehicleKind::Metro),
            2 => Ok(VehicleKind::Train),
            3 => Ok(VehicleKind::Bus),
            4 => Ok(VehicleKind::Ferry),
            5 => Ok(VehicleKind::AerialLift),
            6 => Ok(VehicleKind::Funicular),
            other => Err(UnknownVehicleKind(other)),
        }
    }

    pub fn as_ordinal(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_every_ordinal() {
        for ordinal in 0..=6u8 {
            let kind = VehicleKind::from_ordinal(ordinal).unwrap();
            assert_eq!(kind.as_ordinal(), ordinal);
        }
    }

    #[test]
    fn rejects_unknown_ordinal() {
        assert!(VehicleKind::from_ordinal(7).is_err());
    }
}
