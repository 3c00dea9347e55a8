//! Thin I/O layer: memory-maps an on-disk timetable directory (§6) and
//! hands the mapped byte slices to `radar_search::store::Timetable`. No
//! ingestion, no parsing beyond what the store itself does.

pub mod timetable_dir;
