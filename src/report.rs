//! JSON documents for HTTP or command line consumers.
//!
//! Field names follow the camelCase shape of the prayer-times API:
//! `{date, location, method, asr, highLat, times: {...}, nextPrayer: {...}}`.
//! Timestamps are ISO-8601 with the location's UTC offset.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use nanoserde::{DeJson, SerJson};

use crate::easy::countdown;
use crate::{DailyPrayerTimes, GeoCoordinate, NextPrayerInfo, PrayerTimes, QiblaResult};

pub fn iso8601(time: &DateTime<FixedOffset>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, PartialEq, SerJson, DeJson)]
pub struct PrayerReport {
    pub date: String,
    pub location: LocationReport,
    pub method: String,
    pub asr: String,
    #[nserde(rename = "highLat")]
    pub high_lat: String,
    pub times: TimesReport,
    /// Absent when the report is for a day other than today.
    #[nserde(rename = "nextPrayer")]
    pub next_prayer: Option<NextPrayerReport>,
}

#[derive(Debug, Clone, PartialEq, SerJson, DeJson)]
pub struct LocationReport {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: f64,
}

#[derive(Debug, Clone, PartialEq, SerJson, DeJson)]
pub struct TimesReport {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

#[derive(Debug, Clone, PartialEq, SerJson, DeJson)]
pub struct NextPrayerReport {
    pub name: String,
    pub time: String,
    #[nserde(rename = "remainingSeconds")]
    pub remaining_seconds: u64,
    pub remaining: String,
}

#[derive(Debug, Clone, PartialEq, SerJson, DeJson)]
pub struct QiblaReport {
    pub latitude: f64,
    pub longitude: f64,
    #[nserde(rename = "bearingDegrees")]
    pub bearing_degrees: f64,
    #[nserde(rename = "distanceKm")]
    pub distance_km: f64,
    pub compass: String,
    #[nserde(rename = "arrowRotation")]
    pub arrow_rotation: Option<f64>,
}

impl PrayerReport {
    pub fn new(
        calculator: &PrayerTimes,
        coordinate: GeoCoordinate,
        timezone: f64,
        times: &DailyPrayerTimes,
        next: Option<&NextPrayerInfo>,
    ) -> Self {
        Self {
            date: times.date.format("%Y-%m-%d").to_string(),
            location: LocationReport {
                latitude: coordinate.latitude(),
                longitude: coordinate.longitude(),
                timezone,
            },
            method: calculator.method().to_string(),
            asr: calculator.asr_madhhab().to_string(),
            high_lat: calculator.high_lat_rule().to_string(),
            times: TimesReport::from(times),
            next_prayer: next.map(NextPrayerReport::from),
        }
    }
}

impl From<&DailyPrayerTimes> for TimesReport {
    fn from(times: &DailyPrayerTimes) -> Self {
        Self {
            fajr: iso8601(&times.fajr),
            sunrise: iso8601(&times.sunrise),
            dhuhr: iso8601(&times.dhuhr),
            asr: iso8601(&times.asr),
            maghrib: iso8601(&times.maghrib),
            isha: iso8601(&times.isha),
        }
    }
}

impl From<&NextPrayerInfo> for NextPrayerReport {
    fn from(next: &NextPrayerInfo) -> Self {
        Self {
            name: next.name().to_owned(),
            time: iso8601(&next.time),
            remaining_seconds: next.remaining_seconds,
            remaining: countdown(next.remaining_seconds),
        }
    }
}

impl QiblaReport {
    pub fn new(observer: GeoCoordinate, qibla: &QiblaResult, heading: Option<f64>) -> Self {
        Self {
            latitude: observer.latitude(),
            longitude: observer.longitude(),
            bearing_degrees: qibla.bearing_degrees,
            distance_km: qibla.distance_km,
            compass: qibla.compass_point().to_owned(),
            arrow_rotation: heading.map(|heading| qibla.arrow_rotation(heading)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn iso8601_keeps_the_offset() {
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let time = offset.with_ymd_and_hms(2024, 3, 1, 4, 58, 7).unwrap();
        assert_eq!(iso8601(&time), "2024-03-01T04:58:07+05:30");
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            iso8601(&utc.with_ymd_and_hms(2024, 3, 1, 4, 58, 7).unwrap()),
            "2024-03-01T04:58:07Z"
        );
    }

    #[test]
    fn camel_case_keys() {
        let calculator = PrayerTimes::default();
        let coordinate = GeoCoordinate::new(21.4225, 39.8262).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let times = calculator.compute(date, coordinate, 3.0).unwrap();
        let next = NextPrayerInfo::new(crate::Prayer::Asr, times.asr, times.dhuhr);
        let json =
            PrayerReport::new(&calculator, coordinate, 3.0, &times, Some(&next)).serialize_json();

        assert!(json.contains("\"highLat\":\"MiddleOfNight\""), "{json}");
        assert!(json.contains("\"nextPrayer\":{"), "{json}");
        assert!(json.contains("\"name\":\"Asr\""), "{json}");
        assert!(json.contains("\"date\":\"2024-06-15\""), "{json}");
        assert!(json.contains("\"fajr\":\"2024-06-15T04:13"), "{json}");
    }

    #[test]
    fn other_days_carry_no_next_prayer() {
        let calculator = PrayerTimes::default();
        let coordinate = GeoCoordinate::new(21.4225, 39.8262).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let times = calculator.compute(date, coordinate, 3.0).unwrap();
        let report = PrayerReport::new(&calculator, coordinate, 3.0, &times, None);
        assert_eq!(report.next_prayer, None);

        let parsed = PrayerReport::deserialize_json(&report.serialize_json()).unwrap();
        assert_eq!(parsed.next_prayer, None);
        assert_eq!(parsed.times, report.times);
    }

    #[test]
    fn qibla_report_round_trips() {
        let observer = GeoCoordinate::new(51.5074, -0.1278).unwrap();
        let qibla = crate::bearing_and_distance(observer);
        let report = QiblaReport::new(observer, &qibla, Some(90.0));
        assert_eq!(report.compass, "ESE");

        let json = report.serialize_json();
        assert!(json.contains("\"bearingDegrees\":"), "{json}");
        let parsed = QiblaReport::deserialize_json(&json).unwrap();
        assert_eq!(parsed.compass, report.compass);
        assert!((parsed.bearing_degrees - report.bearing_degrees).abs() < 1e-9);
        assert!((parsed.distance_km - report.distance_km).abs() < 1e-9);
        let rotation = parsed.arrow_rotation.unwrap();
        assert!((rotation - 28.99).abs() < 0.05, "{rotation}");
    }
}
