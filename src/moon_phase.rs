// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar phases.
//!
//! The instants of the four primary phases come from the mean-lunation
//! polynomial in the lunation number `k` (lunations since the new moon of
//! 1900 January 0) plus the periodic correction series of Meeus'
//! *Astronomical Formulae for Calculators*. The continuous phase at any
//! instant is interpolated linearly between the surrounding primary phases.
//!
//! A year of phase events is kept in a single-slot [`PhaseCache`], replaced
//! whenever another `(year, zone)` pair is asked for.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::day_window::hours_between;
use crate::error::{Error, Result};
use crate::instant::Time;
use crate::math::{cos_deg, sin_deg};
use crate::scales::JD;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_68;

/// Mean synodic month in milliseconds, used when a bracketing phase is
/// missing.
const SYNODIC_MONTH_MS: i64 = 637_860_715;

/// Upper bound on lunations scanned for one year.
const MAX_LUNATIONS: usize = 30;

/// The four primary phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PrimaryPhase {
    New,
    FirstQuarter,
    Full,
    LastQuarter,
}

impl PrimaryPhase {
    pub const ALL: [PrimaryPhase; 4] = [
        PrimaryPhase::New,
        PrimaryPhase::FirstQuarter,
        PrimaryPhase::Full,
        PrimaryPhase::LastQuarter,
    ];

    /// Position in the cycle: 0, 0.25, 0.5 or 0.75.
    pub const fn fraction(self) -> f64 {
        match self {
            PrimaryPhase::New => 0.0,
            PrimaryPhase::FirstQuarter => 0.25,
            PrimaryPhase::Full => 0.5,
            PrimaryPhase::LastQuarter => 0.75,
        }
    }
}

/// Eight-way phase category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoonPhase {
    New,
    EveningCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    MorningCrescent,
}

impl MoonPhase {
    /// Category of a phase fraction. Each primary phase owns a window of
    /// ±1/16 cycle around its fraction; the intermediate phases fill the gaps.
    pub fn from_fraction(fraction: f64) -> Self {
        const ORDER: [MoonPhase; 8] = [
            MoonPhase::New,
            MoonPhase::EveningCrescent,
            MoonPhase::FirstQuarter,
            MoonPhase::WaxingGibbous,
            MoonPhase::Full,
            MoonPhase::WaningGibbous,
            MoonPhase::LastQuarter,
            MoonPhase::MorningCrescent,
        ];
        let f = fraction.rem_euclid(1.0);
        let index = ((f * 8.0 + 0.5).floor() as usize) % 8;
        ORDER[index]
    }

    /// Category of a phase fraction on a day with no primary phase event:
    /// always one of the four intermediate phases.
    pub fn between_events(fraction: f64) -> Self {
        match fraction.rem_euclid(1.0) {
            f if f < 0.25 => MoonPhase::EveningCrescent,
            f if f < 0.5 => MoonPhase::WaxingGibbous,
            f if f < 0.75 => MoonPhase::WaningGibbous,
            _ => MoonPhase::MorningCrescent,
        }
    }

    /// True for New, FirstQuarter, Full and LastQuarter.
    pub fn is_primary(self) -> bool {
        matches!(
            self,
            MoonPhase::New | MoonPhase::FirstQuarter | MoonPhase::Full | MoonPhase::LastQuarter
        )
    }
}

impl From<PrimaryPhase> for MoonPhase {
    fn from(phase: PrimaryPhase) -> Self {
        match phase {
            PrimaryPhase::New => MoonPhase::New,
            PrimaryPhase::FirstQuarter => MoonPhase::FirstQuarter,
            PrimaryPhase::Full => MoonPhase::Full,
            PrimaryPhase::LastQuarter => MoonPhase::LastQuarter,
        }
    }
}

/// A primary phase and when it happens.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PhaseEvent {
    pub phase: PrimaryPhase,
    pub instant: DateTime<Tz>,
}

/// Julian Date of `phase` in lunation `k`.
pub fn true_phase(k: f64, phase: PrimaryPhase) -> Time<JD> {
    let k = k + phase.fraction();
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;

    let mean = 2_415_020.759_33 + SYNODIC_MONTH_DAYS * k + 0.000_117_8 * t2
        - 0.000_000_155 * t3
        + 0.000_33 * sin_deg(166.56 + 132.87 * t - 0.009_173 * t2);
    // Sun's mean anomaly, Moon's mean anomaly, Moon's argument of latitude.
    let m = 359.2242 + 29.105_356_08 * k - 0.000_033_3 * t2 - 0.000_003_47 * t3;
    let mp = 306.0253 + 385.816_918_06 * k + 0.010_730_6 * t2 + 0.000_012_36 * t3;
    let f = 21.2964 + 390.670_506_46 * k - 0.001_652_8 * t2 - 0.000_002_39 * t3;

    let correction = match phase {
        PrimaryPhase::New | PrimaryPhase::Full => {
            (0.1734 - 0.000_393 * t) * sin_deg(m) + 0.0021 * sin_deg(2.0 * m)
                - 0.4068 * sin_deg(mp)
                + 0.0161 * sin_deg(2.0 * mp)
                - 0.0004 * sin_deg(3.0 * mp)
                + 0.0104 * sin_deg(2.0 * f)
                - 0.0051 * sin_deg(m + mp)
                - 0.0074 * sin_deg(m - mp)
                + 0.0004 * sin_deg(2.0 * f + m)
                - 0.0004 * sin_deg(2.0 * f - m)
                - 0.0006 * sin_deg(2.0 * f + mp)
                + 0.0010 * sin_deg(2.0 * f - mp)
                + 0.0005 * sin_deg(m + 2.0 * mp)
        }
        PrimaryPhase::FirstQuarter | PrimaryPhase::LastQuarter => {
            let quarter = (0.1721 - 0.0004 * t) * sin_deg(m) + 0.0021 * sin_deg(2.0 * m)
                - 0.6280 * sin_deg(mp)
                + 0.0089 * sin_deg(2.0 * mp)
                - 0.0004 * sin_deg(3.0 * mp)
                + 0.0079 * sin_deg(2.0 * f)
                - 0.0119 * sin_deg(m + mp)
                - 0.0047 * sin_deg(m - mp)
                + 0.0003 * sin_deg(2.0 * f + m)
                - 0.0004 * sin_deg(2.0 * f - m)
                - 0.0006 * sin_deg(2.0 * f + mp)
                + 0.0021 * sin_deg(2.0 * f - mp)
                + 0.0003 * sin_deg(m + 2.0 * mp)
                + 0.0004 * sin_deg(m - 2.0 * mp)
                - 0.0003 * sin_deg(2.0 * m + mp);
            let offset = 0.0028 - 0.0004 * cos_deg(m) + 0.0003 * cos_deg(mp);
            if phase == PrimaryPhase::FirstQuarter {
                quarter + offset
            } else {
                quarter - offset
            }
        }
    };

    Time::new(mean + correction)
}

/// Percentage of the disk lit at a phase fraction.
pub fn illuminated_percent(fraction: f64) -> u8 {
    let lit = (1.0 - (std::f64::consts::TAU * fraction).cos()) / 2.0;
    (100.0 * lit).round().clamp(0.0, 100.0) as u8
}

#[derive(Debug)]
struct CachedYear {
    year: i32,
    zone: Tz,
    events: Arc<[PhaseEvent]>,
}

/// Single-slot memo of one year's phase events.
#[derive(Debug, Default)]
pub struct PhaseCache {
    slot: Mutex<Option<CachedYear>>,
}

impl PhaseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached events, if they are for this `(year, zone)`.
    pub fn get(&self, year: i32, zone: Tz) -> Option<Arc<[PhaseEvent]>> {
        self.slot
            .lock()
            .as_ref()
            .filter(|c| c.year == year && c.zone == zone)
            .map(|c| Arc::clone(&c.events))
    }

    /// Replace the slot.
    pub fn put(&self, year: i32, zone: Tz, events: Arc<[PhaseEvent]>) {
        *self.slot.lock() = Some(CachedYear { year, zone, events });
    }

    pub fn clear(&self) {
        *self.slot.lock() = None;
    }
}

/// Phase events and continuous phase, memoized per year.
#[derive(Debug, Default)]
pub struct MoonPhaseCalculator {
    cache: PhaseCache,
}

impl MoonPhaseCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: PhaseCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &PhaseCache {
        &self.cache
    }

    /// Every primary phase whose local date in `zone` falls in `year`, in
    /// chronological order.
    pub fn year_events(&self, year: i32, zone: Tz) -> Arc<[PhaseEvent]> {
        if let Some(events) = self.cache.get(year, zone) {
            trace!(year, zone = zone.name(), "phase cache hit");
            return events;
        }
        trace!(year, zone = zone.name(), "phase cache miss");
        let events: Arc<[PhaseEvent]> = compute_year_events(year, zone).into();
        debug!(year, zone = zone.name(), count = events.len(), "phase events computed");
        self.cache.put(year, zone, Arc::clone(&events));
        events
    }

    /// Continuous phase fraction in [0, 1) at `instant`.
    ///
    /// Returns `None` only when no phase event near `instant` can be
    /// represented as a date.
    pub fn phase_fraction_at(&self, instant: DateTime<Tz>) -> Option<f64> {
        let zone = instant.timezone();
        let year = instant.year();
        let events = self.year_events(year, zone);

        let prev = events
            .iter()
            .rev()
            .find(|e| e.instant <= instant)
            .copied()
            .or_else(|| self.year_events(year - 1, zone).last().copied());
        let next = events
            .iter()
            .find(|e| e.instant > instant)
            .copied()
            .or_else(|| self.year_events(year + 1, zone).first().copied());

        let synodic = Duration::milliseconds(SYNODIC_MONTH_MS);
        let (prev, next) = match (prev, next) {
            (Some(p), Some(n)) => (p, n),
            (Some(p), None) => (p, PhaseEvent { instant: p.instant + synodic, ..p }),
            (None, Some(n)) => (PhaseEvent { instant: n.instant - synodic, ..n }, n),
            (None, None) => return None,
        };

        let mut delta = (next.phase.fraction() - prev.phase.fraction()).rem_euclid(1.0);
        if delta == 0.0 {
            delta = 1.0;
        }
        let progress = hours_between(prev.instant, instant) / hours_between(prev.instant, next.instant);
        let fraction = (prev.phase.fraction() + delta * progress).rem_euclid(1.0);
        Some(if fraction >= 1.0 { 0.0 } else { fraction })
    }

    /// Phase fraction at local noon of `date`.
    pub fn noon_phase(&self, date: NaiveDate, zone: Tz) -> Result<f64> {
        let noon = date.and_time(NaiveTime::MIN) + Duration::hours(12);
        let instant = zone
            .from_local_datetime(&noon)
            .earliest()
            .ok_or_else(|| Error::NonexistentLocalTime {
                date,
                zone: zone.name().to_string(),
            })?;
        self.phase_fraction_at(instant)
            .ok_or(Error::DateOutOfRange(date))
    }

    /// The primary phase whose local date in `zone` is `date`, if any.
    pub fn phase_event_on(&self, date: NaiveDate, zone: Tz) -> Option<PhaseEvent> {
        self.year_events(date.year(), zone)
            .iter()
            .find(|e| e.instant.date_naive() == date)
            .copied()
    }
}

fn compute_year_events(year: i32, zone: Tz) -> Vec<PhaseEvent> {
    let mut k = (f64::from(year - 1900) * 12.3685).floor() - 4.0;
    let mut events = Vec::with_capacity(4 * 14);

    for _ in 0..MAX_LUNATIONS {
        let mut past_year = 0;
        for phase in PrimaryPhase::ALL {
            let Some(utc) = true_phase(k, phase).to_utc() else {
                continue;
            };
            let instant = utc.with_timezone(&zone);
            match instant.year().cmp(&year) {
                std::cmp::Ordering::Equal => events.push(PhaseEvent { phase, instant }),
                std::cmp::Ordering::Greater => past_year += 1,
                std::cmp::Ordering::Less => {}
            }
        }
        if past_year == PrimaryPhase::ALL.len() {
            break;
        }
        k += 1.0;
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn minutes_apart(a: DateTime<Tz>, b: DateTime<Utc>) -> i64 {
        (a.with_timezone(&Utc) - b).num_minutes().abs()
    }

    #[test]
    fn published_phases_2024() {
        let calc = MoonPhaseCalculator::new();
        let events = calc.year_events(2024, chrono_tz::UTC);
        let find = |phase: PrimaryPhase, near: DateTime<Utc>| {
            events
                .iter()
                .filter(|e| e.phase == phase)
                .map(|e| minutes_apart(e.instant, near))
                .min()
                .unwrap()
        };
        assert!(find(PrimaryPhase::Full, utc(2024, 1, 25, 17, 54)) < 10);
        assert!(find(PrimaryPhase::New, utc(2024, 4, 8, 18, 21)) < 10);
        assert!(find(PrimaryPhase::FirstQuarter, utc(2024, 6, 14, 5, 18)) < 10);
        assert!(find(PrimaryPhase::LastQuarter, utc(2024, 10, 24, 8, 3)) < 10);
    }

    #[test]
    fn year_events_are_ordered_and_cycle() {
        let calc = MoonPhaseCalculator::new();
        let zone = chrono_tz::America::Los_Angeles;
        let events = calc.year_events(2025, zone);
        assert!(events.windows(2).all(|w| w[0].instant < w[1].instant));
        assert!(events.iter().all(|e| e.instant.year() == 2025));
        for pair in events.windows(2) {
            let expected = (pair[0].phase.fraction() + 0.25).rem_euclid(1.0);
            assert_eq!(pair[1].phase.fraction(), expected);
        }
        for phase in PrimaryPhase::ALL {
            let n = events.iter().filter(|e| e.phase == phase).count();
            assert!((12..=13).contains(&n), "{phase:?}: {n}");
        }
    }

    #[test]
    fn cache_holds_one_year() {
        let calc = MoonPhaseCalculator::new();
        let zone = chrono_tz::Europe::Berlin;
        let first = calc.year_events(2024, zone);
        let again = calc.year_events(2024, zone);
        assert!(Arc::ptr_eq(&first, &again));

        calc.year_events(2023, zone);
        assert!(calc.cache().get(2024, zone).is_none());
        assert!(calc.cache().get(2023, zone).is_some());
        assert!(calc.cache().get(2023, chrono_tz::UTC).is_none());

        calc.cache().clear();
        assert!(calc.cache().get(2023, zone).is_none());
    }

    #[test]
    fn fraction_at_full_moon_is_half() {
        let calc = MoonPhaseCalculator::new();
        let instant = utc(2024, 1, 25, 17, 54).with_timezone(&chrono_tz::UTC);
        let f = calc.phase_fraction_at(instant).unwrap();
        assert!((f - 0.5).abs() < 0.005, "fraction {f}");
        assert_eq!(illuminated_percent(f), 100);
    }

    #[test]
    fn noon_phase_across_year_boundaries() {
        let calc = MoonPhaseCalculator::new();
        let zone = chrono_tz::Asia::Kolkata;
        for (y, m, d) in [(2024, 1, 1), (2024, 12, 31), (2025, 1, 1)] {
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            let f = calc.noon_phase(date, zone).unwrap();
            assert!((0.0..1.0).contains(&f), "{date}: {f}");
        }
        // Consecutive days advance by about 1/29.5 of a cycle.
        let a = calc.noon_phase(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(), zone).unwrap();
        let b = calc.noon_phase(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), zone).unwrap();
        let step = (b - a).rem_euclid(1.0);
        assert!((step - 1.0 / SYNODIC_MONTH_DAYS).abs() < 0.01, "step {step}");
    }

    #[test]
    fn phase_event_lookup() {
        let calc = MoonPhaseCalculator::new();
        let date = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let event = calc.phase_event_on(date, chrono_tz::UTC).unwrap();
        assert_eq!(event.phase, PrimaryPhase::Full);
        let quiet = NaiveDate::from_ymd_opt(2024, 1, 27).unwrap();
        assert!(calc.phase_event_on(quiet, chrono_tz::UTC).is_none());
    }

    #[test]
    fn illumination_curve() {
        assert_eq!(illuminated_percent(0.0), 0);
        assert_eq!(illuminated_percent(0.25), 50);
        assert_eq!(illuminated_percent(0.5), 100);
        assert_eq!(illuminated_percent(0.75), 50);
        let waxing: Vec<u8> = (0..=50).map(|i| illuminated_percent(i as f64 / 100.0)).collect();
        assert!(waxing.windows(2).all(|w| w[0] <= w[1]));
        let waning: Vec<u8> = (50..=100).map(|i| illuminated_percent(i as f64 / 100.0)).collect();
        assert!(waning.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn eight_way_windows() {
        assert_eq!(MoonPhase::from_fraction(0.0), MoonPhase::New);
        assert_eq!(MoonPhase::from_fraction(0.97), MoonPhase::New);
        assert_eq!(MoonPhase::from_fraction(0.1), MoonPhase::EveningCrescent);
        assert_eq!(MoonPhase::from_fraction(0.26), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::from_fraction(0.4), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::from_fraction(0.5), MoonPhase::Full);
        assert_eq!(MoonPhase::from_fraction(0.6), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::from_fraction(0.75), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::from_fraction(0.85), MoonPhase::MorningCrescent);
        for phase in PrimaryPhase::ALL {
            assert_eq!(MoonPhase::from_fraction(phase.fraction()), MoonPhase::from(phase));
        }
    }

    #[test]
    fn days_between_events_are_intermediate() {
        assert_eq!(MoonPhase::between_events(0.02), MoonPhase::EveningCrescent);
        assert_eq!(MoonPhase::between_events(0.26), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::between_events(0.49), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::between_events(0.51), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::between_events(0.75), MoonPhase::MorningCrescent);
        assert_eq!(MoonPhase::between_events(0.99), MoonPhase::MorningCrescent);
        for i in 0..100 {
            assert!(!MoonPhase::between_events(f64::from(i) / 100.0).is_primary());
        }
        for phase in PrimaryPhase::ALL {
            assert!(MoonPhase::from(phase).is_primary());
        }
    }

    #[test]
    fn calculator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MoonPhaseCalculator>();
        assert_send_sync::<PhaseCache>();
    }
}
