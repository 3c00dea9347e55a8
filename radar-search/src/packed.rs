//! Bit-packed primitive codecs used throughout the timetable store and the
//! router's inner loop: a `(start, length)` range packed into one `u32`,
//! and a 4-tuple `(arrival, changes, payload, departure)` packed into one
//! `u64` so the Pareto frontier can be kept as a flat array of words with
//! no heap allocation per entry.

use std::fmt;

/// Lower bound (inclusive) on arrival/departure minutes representable by a
/// [`CriteriaTuple`]: four hours before midnight, to give the journey
/// extractor room to represent departures on the previous service day.
pub const TIME_ORIGIN: i32 = -240;

/// Highest representable arrival offset from [`TIME_ORIGIN`] (12 bits).
const MAX_ARR_OFFSET: i32 = 3119;

/// Highest representable departure offset from [`TIME_ORIGIN`]: the
/// complement field only needs `complement >= 1` to stay distinguishable
/// from "no departure time" (complement `0`), so departure's dynamic range
/// runs wider than arrival's — up to `DEP_COMPLEMENT - 1`, not 3119 (§8.2
/// requires the round-trip law to hold for `d` up to `TIME_ORIGIN + 3119`).
const MAX_DEP_OFFSET: i32 = (DEP_COMPLEMENT - 1) as i32;

/// The complement base for the departure field; `0` in that field means
/// "no departure time present", so offsets are stored as `COMPLEMENT -
/// offset` and `0` is never produced by a real departure time.
const DEP_COMPLEMENT: u32 = 4095;

const MAX_CHANGES: u32 = 127;

/// A `(start, endExclusive)` range packed into a single `u32`: 24 high
/// bits for `start`, 8 low bits for `length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedRange(u32);

/// A value was out of the domain a packed codec can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackError {
    RangeStartOutOfBounds,
    RangeTooLong,
    ArrivalOutOfBounds,
    DepartureOutOfBounds,
    ChangesOutOfBounds,
    ChangesSaturated,
    DepartureMissing,
    DepartureMismatch,
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackError::RangeStartOutOfBounds => write!(f, "range start does not fit in 24 bits"),
            PackError::RangeTooLong => write!(f, "range length does not fit in 8 bits"),
            PackError::ArrivalOutOfBounds => write!(f, "arrival minutes out of representable range"),
            PackError::DepartureOutOfBounds => {
                write!(f, "departure minutes out of representable range")
            }
            PackError::ChangesOutOfBounds => write!(f, "change count out of representable range"),
            PackError::ChangesSaturated => write!(f, "change count already at its maximum"),
            PackError::DepartureMissing => write!(f, "tuple has no departure time"),
            PackError::DepartureMismatch => {
                write!(f, "dominance check requires both tuples to agree on departure presence")
            }
        }
    }
}

impl std::error::Error for PackError {}

impl PackedRange {
    /// Packs `[start, end)` into one word.
    ///
    /// # Errors
    /// Fails if `start` doesn't fit in 24 bits or `end - start` doesn't fit
    /// in 8 bits (or `end < start`).
    pub fn pack(start: u32, end: u32) -> Result<PackedRange, PackError> {
        if start >= 1 << 24 {
            return Err(PackError::RangeStartOutOfBounds);
        }
        let length = end.checked_sub(start).ok_or(PackError::RangeTooLong)?;
        if length > 255 {
            return Err(PackError::RangeTooLong);
        }
        Ok(PackedRange((start << 8) | length))
    }

    pub fn start(self) -> u32 {
        self.0 >> 8
    }

    pub fn length(self) -> u32 {
        self.0 & 0xff
    }

    pub fn end(self) -> u32 {
        self.start() + self.length()
    }

    pub fn is_empty(self) -> bool {
        self.length() == 0
    }

    /// An explicit empty range, used where a lookup has no entries (§9: the
    /// behaviour for a transfer-index miss is an empty range, not an error).
    pub fn empty() -> PackedRange {
        PackedRange(0)
    }

    pub fn as_range(self) -> std::ops::Range<usize> {
        self.start() as usize..self.end() as usize
    }
}

/// A Pareto criteria tuple: arrival time, change count, an opaque 32-bit
/// payload, and an optional departure time, packed into one `u64` so that
/// lexicographic ordering on the word aligns with Pareto dominance (lower
/// arrival wins, lower change count wins, *later* departure wins because
/// it is stored as a complement).
///
/// Bit layout, low to high: `payload[0..32) | changes[32..39) |
/// arrival[39..51) | departure-complement[51..64)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CriteriaTuple(u64);

impl CriteriaTuple {
    /// Packs a tuple with no departure time set.
    pub fn pack(arr: i32, ch: u32, payload: u32) -> Result<CriteriaTuple, PackError> {
        let arr_bits = encode_arr(arr)?;
        if ch > MAX_CHANGES {
            return Err(PackError::ChangesOutOfBounds);
        }
        Ok(CriteriaTuple(
            payload as u64 | (u64::from(ch) << 32) | (u64::from(arr_bits) << 39),
        ))
    }

    pub fn has_dep(self) -> bool {
        (self.0 >> 51) != 0
    }

    pub fn arr(self) -> i32 {
        let bits = ((self.0 >> 39) & 0xfff) as i32;
        bits + TIME_ORIGIN
    }

    pub fn ch(self) -> u32 {
        ((self.0 >> 32) & 0x7f) as u32
    }

    pub fn payload(self) -> u32 {
        self.0 as u32
    }

    /// Departure time in minutes since local midnight.
    ///
    /// # Errors
    /// Fails if this tuple has no departure time recorded.
    pub fn dep(self) -> Result<i32, PackError> {
        let complement = (self.0 >> 51) & 0xfff;
        if complement == 0 {
            return Err(PackError::DepartureMissing);
        }
        let offset = DEP_COMPLEMENT as i64 - complement as i64;
        Ok(offset as i32 + TIME_ORIGIN)
    }

    /// Returns a copy with the departure time set.
    pub fn with_dep(self, dep: i32) -> Result<CriteriaTuple, PackError> {
        let complement = encode_dep_complement(dep)?;
        let without_dep = self.0 & !(0xfffu64 << 51);
        Ok(CriteriaTuple(without_dep | (u64::from(complement) << 51)))
    }

    /// Returns a copy with the departure time cleared.
    pub fn without_dep(self) -> CriteriaTuple {
        CriteriaTuple(self.0 & !(0xfffu64 << 51))
    }

    /// Returns a copy with the change count incremented by one.
    ///
    /// # Errors
    /// Fails if the change count is already at its maximum (127).
    pub fn with_additional_change(self) -> Result<CriteriaTuple, PackError> {
        let ch = self.ch();
        if ch >= MAX_CHANGES {
            return Err(PackError::ChangesSaturated);
        }
        let cleared = self.0 & !(0x7fu64 << 32);
        Ok(CriteriaTuple(cleared | (u64::from(ch + 1) << 32)))
    }

    /// Returns a copy with the payload replaced.
    pub fn with_payload(self, payload: u32) -> CriteriaTuple {
        CriteriaTuple((self.0 & !0xffff_ffffu64) | u64::from(payload))
    }

    /// True iff `self` is at least as good as `other` on every criterion:
    /// arrival no later, changes no more, and (when both have a departure
    /// time) departure no earlier.
    ///
    /// # Errors
    /// Fails if the two tuples disagree on whether a departure time is
    /// present — comparing them would not be meaningful.
    pub fn dominates_or_equal(self, other: CriteriaTuple) -> Result<bool, PackError> {
        if self.has_dep() != other.has_dep() {
            return Err(PackError::DepartureMismatch);
        }
        let base = self.arr() <= other.arr() && self.ch() <= other.ch();
        if !self.has_dep() {
            return Ok(base);
        }
        Ok(base && self.dep()? >= other.dep()?)
    }

    /// The raw 64-bit word, for use as a frontier's internal storage key.
    pub fn into_bits(self) -> u64 {
        self.0
    }

    pub fn from_bits(bits: u64) -> CriteriaTuple {
        CriteriaTuple(bits)
    }
}

fn encode_arr(arr: i32) -> Result<u32, PackError> {
    let offset = arr - TIME_ORIGIN;
    if offset < 0 || offset > MAX_ARR_OFFSET {
        return Err(PackError::ArrivalOutOfBounds);
    }
    Ok(offset as u32)
}

fn encode_dep_complement(dep: i32) -> Result<u32, PackError> {
    let offset = dep - TIME_ORIGIN;
    if offset < 0 || offset > MAX_DEP_OFFSET {
        return Err(PackError::DepartureOutOfBounds);
    }
    let complement = DEP_COMPLEMENT - offset as u32;
    // complement == 0 is reserved to mean "no departure time"; the highest
    // valid offset (MAX_DEP_OFFSET == DEP_COMPLEMENT - 1) maps to complement
    // 1, so 0 is never produced by a real in-range departure.
    debug_assert_ne!(complement, 0);
    Ok(complement)
}
