use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike};

use crate::{DailyPrayerTimes, GeoCoordinate, PrayerTimes, Result};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/* round to the nearest minute, half a minute rounds up */
fn nearest_minute(time: &DateTime<FixedOffset>) -> (u32, u32) {
    let time = *time + Duration::seconds(30);
    (time.hour(), time.minute())
}

/* 24h clock time, e.g. "05:37" */
pub fn time24(time: &DateTime<FixedOffset>) -> String {
    let (hours, minutes) = nearest_minute(time);
    format!("{:02}:{:02}", hours, minutes)
}

/* 12h clock time, e.g. "5:37 PM" */
pub fn time12(time: &DateTime<FixedOffset>) -> String {
    let (hours, minutes) = nearest_minute(time);
    let suffix = if hours >= 12 { "PM" } else { "AM" };
    let hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hours, minutes, suffix)
}

/* countdown as HH:MM:SS */
pub fn countdown(remaining_seconds: u64) -> String {
    let hours = remaining_seconds / 3600;
    let minutes = remaining_seconds % 3600 / 60;
    let seconds = remaining_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/* 16-wind compass point nearest to a bearing */
pub fn compass_point(bearing_degrees: f64) -> &'static str {
    let index = (crate::fix_angle(bearing_degrees) / 22.5).round() as usize % 16;
    COMPASS_POINTS[index]
}

impl PrayerTimes {
    pub fn compute_easy24(
        &self,
        date: NaiveDate,
        coordinate: GeoCoordinate,
        timezone: f64,
    ) -> Result<EasyTimes24> {
        let times = self.compute(date, coordinate, timezone)?;
        Ok(EasyTimes24::from(&times))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct EasyTimes24 {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl From<&DailyPrayerTimes> for EasyTimes24 {
    fn from(times: &DailyPrayerTimes) -> Self {
        EasyTimes24 {
            fajr: time24(&times.fajr),
            sunrise: time24(&times.sunrise),
            dhuhr: time24(&times.dhuhr),
            asr: time24(&times.asr),
            maghrib: time24(&times.maghrib),
            isha: time24(&times.isha),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AsrMadhhab, CalculationMethod, HighLatitudeRule};
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, h, m, s)
            .unwrap()
    }

    #[test]
    fn test_easy() {
        let pt = PrayerTimes::new(
            CalculationMethod::MuslimWorldLeague,
            AsrMadhhab::default(),
            HighLatitudeRule::default(),
            0.0,
        );
        let times = pt
            .compute_easy24(
                NaiveDate::from_ymd_opt(2022, 11, 27).unwrap(),
                GeoCoordinate::new(36., 10.).unwrap(),
                1.,
            )
            .unwrap();
        assert_eq!(
            times,
            EasyTimes24 {
                fajr: "05:38".into(),
                sunrise: "07:08".into(),
                dhuhr: "12:08".into(),
                asr: "14:48".into(),
                maghrib: "17:07".into(),
                isha: "18:32".into(),
            }
        );
    }

    #[test]
    fn clock_strings() {
        assert_eq!(time24(&at(5, 37, 29)), "05:37");
        assert_eq!(time24(&at(5, 37, 30)), "05:38");
        assert_eq!(time24(&at(23, 59, 45)), "00:00");
        assert_eq!(time12(&at(0, 5, 0)), "12:05 AM");
        assert_eq!(time12(&at(12, 30, 0)), "12:30 PM");
        assert_eq!(time12(&at(18, 4, 10)), "6:04 PM");
    }

    #[test]
    fn countdowns() {
        assert_eq!(countdown(0), "00:00:00");
        assert_eq!(countdown(3599), "00:59:59");
        assert_eq!(countdown(32100), "08:55:00");
    }

    #[test]
    fn compass_points() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(11.2), "N");
        assert_eq!(compass_point(11.3), "NNE");
        assert_eq!(compass_point(58.48), "ENE");
        assert_eq!(compass_point(295.15), "WNW");
        assert_eq!(compass_point(355.0), "N");
    }
}
