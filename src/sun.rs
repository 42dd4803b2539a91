use chrono::{Datelike, NaiveDate};

use crate::{darcsin, darctan2, dcos, dsin, fix_angle, fix_hour};

/* position of the sun relevant to prayer times */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Angle of the sun north (+) or south (-) of the celestial equator, degrees.
    pub declination: f64,
    /// Apparent minus mean solar time, minutes. Positive means the sun
    /// transits before 12:00 mean time.
    pub equation_of_time: f64,
}

impl SolarPosition {
    /// Solar position at noon UT of `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        Self::at(julian_date(date) + 0.5)
    }

    /// Solar position at julian day `jd`, using the low precision
    /// formulas of the U.S. Naval Observatory almanac (good to ~0.01° in
    /// declination and a few seconds in the equation of time for
    /// 1800-2200).
    pub fn at(jd: f64) -> Self {
        let d = jd - 2451545.0;
        let g = fix_angle(357.529 + 0.98560028 * d);
        let q = fix_angle(280.459 + 0.98564736 * d);
        let l = fix_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2. * g));

        let e = 23.439 - 0.00000036 * d;

        let declination = darcsin(dsin(e) * dsin(l));
        let ra = fix_hour(darctan2(dcos(e) * dsin(l), dcos(l)) / 15.0);

        // q/15 and ra can sit on opposite sides of 0h
        let mut eq_t = q / 15.0 - ra;
        eq_t -= 24.0 * (eq_t / 24.0).round();

        Self {
            declination,
            equation_of_time: eq_t * 60.0,
        }
    }

    /// Equation of time in hours.
    pub(crate) fn equation_of_time_hours(&self) -> f64 {
        self.equation_of_time / 60.0
    }
}

/// Julian day at 0h UT of a proleptic Gregorian date.
pub fn julian_date(date: NaiveDate) -> f64 {
    let mut year = date.year();
    let mut month = date.month() as i32;
    if month <= 2 {
        year -= 1;
        month += 12;
    }

    let a = (year as f64 / 100.).floor();
    let b = 2. - a + (a / 4.).floor();

    (365.25 * (year + 4716) as f64).floor()
        + (30.6001 * (month + 1) as f64).floor()
        + date.day() as f64
        + b
        - 1524.5
}
