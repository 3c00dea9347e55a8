//! Minimal command-line consumer of the core library: builds a profile for
//! one `(date, arrival station)` pair and prints every journey extracted
//! from a departure station, earliest first. The core defines no CLI or
//! wire protocol of its own; this binary is just one way to drive it.

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;

use backend::timetable_dir::{DayFiles, TimetableDir};
use radar_search::journey::{extract_journeys, Leg};
use radar_search::router::Profile;

struct Args {
    data_dir: PathBuf,
    from: u32,
    to: u32,
    date: NaiveDate,
    after: Option<i32>,
}

fn usage() -> ! {
    eprintln!(
        "usage: search --data-dir <dir> --from <stationId> --to <stationId> --date <YYYY-MM-DD> [--time <HH:MM>]"
    );
    process::exit(2);
}

fn parse_time(s: &str) -> Option<i32> {
    let (h, m) = s.split_once(':')?;
    Some(h.parse::<i32>().ok()? * 60 + m.parse::<i32>().ok()?)
}

fn parse_args() -> Args {
    let mut data_dir = None;
    let mut from = None;
    let mut to = None;
    let mut date = None;
    let mut after = None;

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = || args.next().unwrap_or_else(|| usage());
        match flag.as_str() {
            "--data-dir" => data_dir = Some(PathBuf::from(value())),
            "--from" => from = Some(value().parse().unwrap_or_else(|_| usage())),
            "--to" => to = Some(value().parse().unwrap_or_else(|_| usage())),
            "--date" => {
                let v = value();
                date = Some(NaiveDate::parse_from_str(&v, "%Y-%m-%d").unwrap_or_else(|_| usage()))
            }
            "--time" => after = Some(parse_time(&value()).unwrap_or_else(|| usage())),
            _ => usage(),
        }
    }

    Args {
        data_dir: data_dir.unwrap_or_else(|| usage()),
        from: from.unwrap_or_else(|| usage()),
        to: to.unwrap_or_else(|| usage()),
        date: date.unwrap_or_else(|| usage()),
        after,
    }
}

fn fmt_mins(mins: i32) -> String {
    format!("{:02}:{:02}", mins.div_euclid(60), mins.rem_euclid(60))
}

fn main() {
    let args = parse_args();

    let timetable_dir = TimetableDir::open(&args.data_dir).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });
    let timetable = timetable_dir.build_timetable().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });
    let day = DayFiles::open(&args.data_dir, args.date).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });
    day.load_into(&timetable).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    let (trips, connections) = timetable.with_day(args.date, |trips, connections| (*trips, *connections));
    let profile = Profile::build(&timetable, trips, connections, args.date, args.to, None).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    let journeys = extract_journeys(&profile, args.from).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    let mut printed = 0;
    for journey in &journeys {
        if let Some(after) = args.after {
            if journey.depart_mins() < after {
                continue;
            }
        }
        println!(
            "{} -> {} ({} change{})",
            fmt_mins(journey.depart_mins()),
            fmt_mins(journey.arrive_mins()),
            journey.change_count(),
            if journey.change_count() == 1 { "" } else { "s" }
        );
        for leg in journey.legs() {
            match leg {
                Leg::Transport {
                    dep_stop,
                    dep_mins,
                    arr_stop,
                    route_name,
                    destination,
                    vehicle_kind,
                    ..
                } => println!(
                    "  {} {} -> {}: {} ({:?} to {})",
                    fmt_mins(*dep_mins),
                    dep_stop,
                    arr_stop,
                    route_name,
                    vehicle_kind,
                    destination
                ),
                Leg::Foot {
                    dep_stop,
                    dep_mins,
                    arr_stop,
                    arr_mins,
                } => println!(
                    "  {} {} -> {}: walk ({} min)",
                    fmt_mins(*dep_mins),
                    dep_stop,
                    arr_stop,
                    arr_mins - dep_mins
                ),
            }
        }
        printed += 1;
    }

    if printed == 0 {
        eprintln!("no journeys found");
        process::exit(1);
    }
}
