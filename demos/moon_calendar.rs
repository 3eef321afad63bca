// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use almanac::{calc_moon_day, GeoCoordinate, MoonPhaseCalculator};
use chrono::{Datelike, Utc};

fn main() -> almanac::Result<()> {
    let zone = chrono_tz::Asia::Tokyo;
    let location = GeoCoordinate::new(35.6762, 139.6503)?;
    let phases = MoonPhaseCalculator::new();
    let today = Utc::now().with_timezone(&zone).date_naive();

    println!("Primary phases of {}", today.year());
    for event in phases.year_events(today.year(), zone).iter() {
        println!("  {:?}  {}", event.phase, event.instant.format("%Y-%m-%d %H:%M %Z"));
    }

    println!();
    for date in today.iter_days().take(7) {
        let moon = calc_moon_day(&phases, &location, date, zone)?;
        let fmt = |t: Option<chrono::DateTime<chrono_tz::Tz>>| {
            t.map_or_else(|| "--:--".to_owned(), |t| t.format("%H:%M").to_string())
        };
        println!(
            "{date}  rise {}  set {}  {:?} {:>3}%",
            fmt(moon.day.rise),
            fmt(moon.day.set),
            moon.phase,
            moon.illumination_percent
        );
    }
    Ok(())
}
