use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use tracing::{debug, trace};

use crate::method::{AsrMadhhab, CalculationMethod, HighLatitudeRule, MinutesOrAngle};
use crate::sun::{julian_date, SolarPosition};
use crate::{darccos, darccot, dcos, dsin, dtan, Error, GeoCoordinate, Result};

/// Sun depression at sunrise and sunset: refraction plus the solar semi-diameter.
pub const SUNRISE_ANGLE: f64 = 0.833;

/// Minutes added to the astronomical transit for Dhuhr by default.
pub const DEFAULT_DHUHR_MINUTES: f64 = 1.0;

/// The six daily reference times, in the order they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Sunrise marks the end of Fajr and is not itself a prayer.
    pub fn is_prayer(&self) -> bool {
        *self != Prayer::Sunrise
    }

    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Prayer times of one calendar day at one place, in that place's UTC offset.
///
/// Isha (and with some high latitude rules Fajr) may fall on the
/// neighbouring calendar day; `date` is always the day they were computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyPrayerTimes {
    pub date: NaiveDate,
    pub fajr: DateTime<FixedOffset>,
    pub sunrise: DateTime<FixedOffset>,
    pub dhuhr: DateTime<FixedOffset>,
    pub asr: DateTime<FixedOffset>,
    pub maghrib: DateTime<FixedOffset>,
    pub isha: DateTime<FixedOffset>,
}

impl DailyPrayerTimes {
    pub fn get(&self, prayer: Prayer) -> DateTime<FixedOffset> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, DateTime<FixedOffset>)> + '_ {
        Prayer::ALL.into_iter().map(move |prayer| (prayer, self.get(prayer)))
    }

    /// `fajr < sunrise < dhuhr < asr < maghrib < isha`
    pub fn is_ordered(&self) -> bool {
        let times: Vec<_> = self.iter().map(|(_, time)| time).collect();
        times.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// Prayer time calculator.
///
/// Holds only the choice of method, madhhab and high latitude rule, so one
/// value can be shared across threads and reused for any date and place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrayerTimes {
    method: CalculationMethod,         // calculation method
    asr_madhhab: AsrMadhhab,           // juristic method for Asr
    high_lat_rule: HighLatitudeRule,   // adjusting method for higher latitudes
    dhuhr_minutes: f64,                // minutes after mid-day for Dhuhr
}

impl Default for PrayerTimes {
    fn default() -> Self {
        Self::new(
            CalculationMethod::default(),
            AsrMadhhab::default(),
            HighLatitudeRule::default(),
            DEFAULT_DHUHR_MINUTES,
        )
    }
}

impl PrayerTimes {
    pub fn new(
        method: CalculationMethod,
        asr_madhhab: AsrMadhhab,
        high_lat_rule: HighLatitudeRule,
        dhuhr_minutes: f64,
    ) -> Self {
        Self {
            method,
            asr_madhhab,
            high_lat_rule,
            dhuhr_minutes,
        }
    }

    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    pub fn asr_madhhab(&self) -> AsrMadhhab {
        self.asr_madhhab
    }

    pub fn high_lat_rule(&self) -> HighLatitudeRule {
        self.high_lat_rule
    }

    /// Prayer times for `date` at `coordinate`, expressed in the fixed UTC
    /// offset `timezone` (hours, fractional offsets allowed).
    ///
    /// Fails with [`Error::NoHourAngleSolution`] when the sun never reaches
    /// the altitude a time is defined by and the high latitude rule cannot
    /// stand in: always for sunrise, sunset and Asr, and for Fajr, Isha and
    /// angle based Maghrib when the rule is [`HighLatitudeRule::None`].
    pub fn compute(
        &self,
        date: NaiveDate,
        coordinate: GeoCoordinate,
        timezone: f64,
    ) -> Result<DailyPrayerTimes> {
        let offset = utc_offset(timezone)?;
        let day = Day {
            date,
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
            timezone,
            julian_date: julian_date(date) - coordinate.longitude() / (15. * 24.),
        };
        trace!(%date, %coordinate, timezone, method = %self.method, "computing day");

        let raw = self.compute_times(&day);
        let hours = self.adjust_times(&day, raw)?;

        let midnight = date
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| offset.from_local_datetime(&midnight).single())
            .ok_or_else(|| invalid_date(date))?;
        let at = |hours: f64| midnight + Duration::seconds((hours * 3600.0).round() as i64);

        let times = DailyPrayerTimes {
            date,
            fajr: at(hours.fajr),
            sunrise: at(hours.sunrise),
            dhuhr: at(hours.dhuhr),
            asr: at(hours.asr),
            maghrib: at(hours.maghrib),
            isha: at(hours.isha),
        };
        if !times.is_ordered() {
            return Err(Error::UnorderedTimes { date });
        }
        Ok(times)
    }

    /* ---------------------- Compute Prayer Times ----------------------- */

    /* compute prayer times from the default guesses, in hours of solar time */
    fn compute_times(&self, day: &Day) -> RawTimes {
        let params = self.method.params();
        RawTimes {
            fajr: day.sun_angle_time(params.fajr_angle, 5.0, Direction::Ccw),
            sunrise: day.sun_angle_time(SUNRISE_ANGLE, 6.0, Direction::Ccw),
            dhuhr: day.mid_day(12.0),
            asr: day.asr_time(self.asr_madhhab.shadow_factor(), 13.0),
            sunset: day.sun_angle_time(SUNRISE_ANGLE, 18.0, Direction::Cw),
            maghrib: params
                .maghrib
                .angle()
                .and_then(|angle| day.sun_angle_time(angle, 18.0, Direction::Cw)),
            isha: params
                .isha
                .angle()
                .and_then(|angle| day.sun_angle_time(angle, 18.0, Direction::Cw)),
        }
    }

    /* shift to local clock time and resolve missing or implausible times */
    fn adjust_times(&self, day: &Day, raw: RawTimes) -> Result<Hours> {
        let params = self.method.params();
        let shift = day.timezone - day.longitude / 15.0;
        let missing = |prayer| Error::NoHourAngleSolution {
            prayer,
            date: day.date,
        };

        let sunrise = raw.sunrise.ok_or_else(|| missing(Prayer::Sunrise))? + shift;
        let sunset = raw.sunset.ok_or_else(|| missing(Prayer::Maghrib))? + shift;
        let asr = raw.asr.ok_or_else(|| missing(Prayer::Asr))? + shift;
        let dhuhr = raw.dhuhr + shift + self.dhuhr_minutes / 60.0;
        let mut fajr = raw.fajr.map(|t| t + shift);
        let mut maghrib = raw.maghrib.map(|t| t + shift);
        let mut isha = raw.isha.map(|t| t + shift);

        if self.high_lat_rule != HighLatitudeRule::None {
            let night = 24.0 - (sunset - sunrise); // sunset to sunrise
            fajr = self.adjust_high_lat_time(
                Prayer::Fajr,
                fajr,
                sunrise,
                params.fajr_angle,
                night,
                Direction::Ccw,
            );
            if let MinutesOrAngle::Angle(angle) = params.isha {
                isha = self.adjust_high_lat_time(
                    Prayer::Isha,
                    isha,
                    sunset,
                    angle,
                    night,
                    Direction::Cw,
                );
            }
            if let MinutesOrAngle::Angle(angle) = params.maghrib {
                maghrib = self.adjust_high_lat_time(
                    Prayer::Maghrib,
                    maghrib,
                    sunset,
                    angle,
                    night,
                    Direction::Cw,
                );
            }
        }

        if let MinutesOrAngle::Minutes(minutes) = params.maghrib {
            maghrib = Some(sunset + minutes / 60.0);
        }
        let maghrib = maghrib.ok_or_else(|| missing(Prayer::Maghrib))?;
        if let MinutesOrAngle::Minutes(minutes) = params.isha {
            isha = Some(maghrib + minutes / 60.0);
        }

        Ok(Hours {
            fajr: fajr.ok_or_else(|| missing(Prayer::Fajr))?,
            sunrise,
            dhuhr,
            asr,
            maghrib,
            isha: isha.ok_or_else(|| missing(Prayer::Isha))?,
        })
    }

    /* keep `time` within the rule's portion of the night measured from `base` */
    fn adjust_high_lat_time(
        &self,
        prayer: Prayer,
        time: Option<f64>,
        base: f64,
        angle: f64,
        night: f64,
        direction: Direction,
    ) -> Option<f64> {
        let portion = self.high_lat_rule.night_portion(angle)? * night;
        let diff = time.map(|t| match direction {
            Direction::Ccw => base - t,
            Direction::Cw => t - base,
        });
        match diff {
            Some(diff) if diff <= portion => time,
            _ => {
                debug!(
                    %prayer,
                    rule = %self.high_lat_rule,
                    solved = time.is_some(),
                    "applying high latitude adjustment"
                );
                Some(match direction {
                    Direction::Ccw => base - portion,
                    Direction::Cw => base + portion,
                })
            }
        }
    }
}

/// Same as [`PrayerTimes::compute`] with a one-off calculator.
pub fn compute_daily_times(
    date: NaiveDate,
    coordinate: GeoCoordinate,
    timezone: f64,
    method: CalculationMethod,
    asr_madhhab: AsrMadhhab,
    high_lat_rule: HighLatitudeRule,
) -> Result<DailyPrayerTimes> {
    PrayerTimes::new(method, asr_madhhab, high_lat_rule, DEFAULT_DHUHR_MINUTES)
        .compute(date, coordinate, timezone)
}

/// Converts an offset in hours to a [`FixedOffset`], rounded to the second.
pub fn utc_offset(timezone: f64) -> Result<FixedOffset> {
    if !timezone.is_finite() {
        return Err(Error::InvalidTimezone(timezone));
    }
    FixedOffset::east_opt((timezone * 3600.0).round() as i32)
        .ok_or(Error::InvalidTimezone(timezone))
}

fn invalid_date(date: NaiveDate) -> Error {
    use chrono::Datelike;
    Error::InvalidDate {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Ccw, // before mid-day
    Cw,  // after mid-day
}

struct Day {
    date: NaiveDate,
    latitude: f64,
    longitude: f64,
    timezone: f64,
    julian_date: f64,
}

impl Day {
    fn sun(&self, hour: f64) -> SolarPosition {
        SolarPosition::at(self.julian_date + hour / 24.0)
    }

    /* compute mid-day (Dhuhr, Zawal) time */
    fn mid_day(&self, hour: f64) -> f64 {
        12.0 - self.sun(hour).equation_of_time_hours()
    }

    /* hours from mid-day until the sun stands at `altitude` */
    fn hour_angle(&self, altitude: f64, declination: f64) -> Option<f64> {
        let cos_h = (dsin(altitude) - dsin(declination) * dsin(self.latitude))
            / (dcos(declination) * dcos(self.latitude));
        (cos_h.is_finite() && (-1.0..=1.0).contains(&cos_h)).then(|| darccos(cos_h) / 15.0)
    }

    /* compute the time the sun is `angle` degrees below the horizon */
    fn sun_angle_time(&self, angle: f64, hour: f64, direction: Direction) -> Option<f64> {
        self.altitude_time(-angle, hour, direction)
    }

    fn altitude_time(&self, altitude: f64, hour: f64, direction: Direction) -> Option<f64> {
        let declination = self.sun(hour).declination;
        let t = self.hour_angle(altitude, declination)?;
        let noon = self.mid_day(hour);
        Some(match direction {
            Direction::Ccw => noon - t,
            Direction::Cw => noon + t,
        })
    }

    /* compute the time of Asr; standard: factor=1, Hanafi: factor=2 */
    fn asr_time(&self, factor: f64, hour: f64) -> Option<f64> {
        let declination = self.sun(hour).declination;
        let altitude = darccot(factor + dtan((self.latitude - declination).abs()));
        if altitude <= 0.0 {
            return None;
        }
        self.altitude_time(altitude, hour, Direction::Cw)
    }
}

struct RawTimes {
    fajr: Option<f64>,
    sunrise: Option<f64>,
    dhuhr: f64,
    asr: Option<f64>,
    sunset: Option<f64>,
    maghrib: Option<f64>,
    isha: Option<f64>,
}

/* hours after local midnight of the computed date */
struct Hours {
    fajr: f64,
    sunrise: f64,
    dhuhr: f64,
    asr: f64,
    maghrib: f64,
    isha: f64,
}
