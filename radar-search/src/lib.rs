//! Core journey-planning library: a memory-mapped timetable store (§3-4.2),
//! Pareto-frontier algebra (§4.1), a backward connection-scan router (§4.4)
//! and a journey extractor (§4.5-4.6). No I/O and no GUI code lives here —
//! callers hand in already-mapped byte slices and get back typed views.

pub mod frontier;
pub mod journey;
pub mod packed;
pub mod router;
pub mod store;
