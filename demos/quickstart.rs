// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use almanac::{calc_day, calc_position, calc_sun_day, Body, GeoCoordinate, JulianDate, SunEvent};
use chrono::Utc;

fn main() -> almanac::Result<()> {
    let zone = chrono_tz::Europe::Madrid;
    let location = GeoCoordinate::new(40.4168, -3.7038)?;
    let now = Utc::now();
    let today = now.with_timezone(&zone).date_naive();

    println!("JD: {}", JulianDate::from_utc(now));
    for body in Body::ALL {
        let p = calc_position(body, &location, now);
        println!(
            "{body:>8}: az {:7.2}°  el {:6.2}°",
            p.azimuth.value(),
            p.elevation.value()
        );
    }

    let sun = calc_sun_day(&location, today, zone, &SunEvent::ALL)?;
    println!("sunrise      {:?}", sun.day.rise);
    println!("solar noon   {:?}", sun.day.transit);
    println!("sunset       {:?}", sun.day.set);
    println!("daylight     {:.2} h", sun.day.uptime_hours);
    if let Some(civil) = &sun.civil {
        println!("civil        {:?} .. {:?}", civil.dawn, civil.dusk);
    }
    if let Some(golden) = &sun.golden_hour {
        println!(
            "golden hour  until {:?}, from {:?}",
            golden.golden_hour_end(),
            golden.golden_hour_start()
        );
    }

    let mars = calc_day(Body::Mars, &location, today, zone, true)?;
    println!(
        "Mars: {:?}, up {:.1} h, transit {:?}",
        mars.rise_set_type, mars.uptime_hours, mars.transit
    );
    Ok(())
}
