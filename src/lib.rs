/*-------------------------- In the name of God ----------------------------*\

    prayer_times (rust)
    Islamic prayer times calculator library
    Based on libprayertimes 1.0 Cpp library
    Based on PrayTimes 1.1 JavaScript library

----------------------------- Copyright Block --------------------------------

Copyright (C) 2007-2010 PrayTimes.org

Developed By: Nbiba Bedis <bedis at nbiba at gmail dot com>
Based on Cpp Code By: Mohammad Ebrahim Mohammadi Panah <ebrahim at mohammadi dot ir>
Based on a JavaScript Code By: Hamid Zarrabi-Zadeh

License: GNU GPL v3.0

TERMS OF USE:
    Permission is granted to use this code, with or
    without modification, in any website or application
    provided that credit is given to the original work
    with a link back to PrayTimes.org.

This program is distributed in the hope that it will
be useful, but WITHOUT ANY WARRANTY.

PLEASE DO NOT REMOVE THIS COPYRIGHT BLOCK.

------------------------------------------------------------------------------

User's Manual:
http://praytimes.org/manual

Calculating Formulas:
http://praytimes.org/calculation

\*--------------------------------------------------------------------------*/

//! Islamic prayer times and Qibla direction.
//!
//! ```
//! use chrono::NaiveDate;
//! use miqat::{bearing_and_distance, GeoCoordinate, PrayerTimes};
//!
//! let mecca = GeoCoordinate::new(21.4225, 39.8262)?;
//! let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let times = PrayerTimes::default().compute(date, mecca, 3.0)?;
//! assert!(times.fajr < times.isha);
//!
//! let qibla = bearing_and_distance(GeoCoordinate::new(40.7128, -74.0060)?);
//! assert!((58.0..60.0).contains(&qibla.bearing_degrees));
//! # Ok::<(), miqat::Error>(())
//! ```
//!
//! Everything here is a pure function of its arguments; nothing is cached
//! and no I/O is performed.

use std::f64::consts::PI;

pub mod easy;
mod error;
mod geo;
pub mod method;
mod next;
pub mod qibla;
pub mod report;
pub mod sun;
mod times;

pub use error::{Error, Result};
pub use geo::GeoCoordinate;
pub use method::{AsrMadhhab, CalculationMethod, HighLatitudeRule, MethodParams, MinutesOrAngle};
pub use next::{next_prayer, NextPrayerInfo};
pub use qibla::{bearing_and_distance, QiblaResult, KAABA};
pub use sun::SolarPosition;
pub use times::{
    compute_daily_times, utc_offset, DailyPrayerTimes, Prayer, PrayerTimes,
    DEFAULT_DHUHR_MINUTES, SUNRISE_ANGLE,
};

/* ---------------------- Trigonometric Functions ----------------------- */

/* degree sin */
fn dsin(d: f64) -> f64 {
    deg2rad(d).sin()
}

/* degree cos */
fn dcos(d: f64) -> f64 {
    deg2rad(d).cos()
}

/* degree tan */
fn dtan(d: f64) -> f64 {
    deg2rad(d).tan()
}

/* degree arcsin */
fn darcsin(x: f64) -> f64 {
    rad2deg(x.asin())
}

/* degree arccos */
fn darccos(x: f64) -> f64 {
    rad2deg(x.acos())
}

/* degree arctan2 */
fn darctan2(y: f64, x: f64) -> f64 {
    rad2deg(y.atan2(x))
}

/* degree arccot */
fn darccot(x: f64) -> f64 {
    rad2deg((1.0 / x).atan())
}

/* degree to radian */
fn deg2rad(d: f64) -> f64 {
    d * PI / 180.0
}

/* radian to degree */
fn rad2deg(r: f64) -> f64 {
    r * 180.0 / PI
}

/* range reduce angle in degrees to [0, 360) */
fn fix_angle(a: f64) -> f64 {
    fix(a, 360.0)
}

/* range reduce hours to [0, 24) */
fn fix_hour(a: f64) -> f64 {
    fix(a, 24.0)
}

fn fix(a: f64, b: f64) -> f64 {
    let a = a.rem_euclid(b);
    // rem_euclid rounds tiny negatives up to b itself
    if a >= b {
        0.0
    } else {
        a
    }
}
