use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::{utc_offset, DailyPrayerTimes, Error, GeoCoordinate, Prayer, PrayerTimes, Result};

/// The upcoming prayer as seen from some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPrayerInfo {
    pub prayer: Prayer,
    pub time: DateTime<FixedOffset>,
    /// Whole seconds until `time`, never negative.
    pub remaining_seconds: u64,
}

impl NextPrayerInfo {
    pub fn new(prayer: Prayer, time: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> Self {
        let remaining_seconds = (time - now).num_seconds().max(0) as u64;
        Self {
            prayer,
            time,
            remaining_seconds,
        }
    }

    pub fn name(&self) -> &'static str {
        self.prayer.name()
    }
}

impl DailyPrayerTimes {
    /// The first of Fajr, Dhuhr, Asr, Maghrib and Isha strictly after `now`.
    /// `None` once Isha has started.
    pub fn next_prayer_today(&self, now: DateTime<FixedOffset>) -> Option<NextPrayerInfo> {
        self.iter()
            .filter(|(prayer, _)| prayer.is_prayer())
            .find(|&(_, time)| time > now)
            .map(|(prayer, time)| NextPrayerInfo::new(prayer, time, now))
    }
}

/// Next prayer after `now`.
///
/// Once Isha of `times.date` has begun the answer is Fajr of the following
/// day, which `tomorrow` is asked to compute; it receives `times.date + 1`.
pub fn next_prayer<F>(
    times: &DailyPrayerTimes,
    now: DateTime<FixedOffset>,
    tomorrow: F,
) -> Result<NextPrayerInfo>
where
    F: FnOnce(NaiveDate) -> Result<DailyPrayerTimes>,
{
    if let Some(next) = times.next_prayer_today(now) {
        return Ok(next);
    }
    let date = times.date.succ_opt().ok_or(Error::NoFollowingDay(times.date))?;
    let tomorrow = tomorrow(date)?;
    Ok(NextPrayerInfo::new(Prayer::Fajr, tomorrow.fajr, now))
}

impl PrayerTimes {
    /// Next prayer after `now` at `coordinate`, with "today" being the
    /// calendar date of `now` in the `timezone` offset.
    ///
    /// Before today's Fajr the previous day is consulted as well, since its
    /// Isha may fall after local midnight in summer at high latitudes.
    pub fn next_prayer(
        &self,
        coordinate: GeoCoordinate,
        timezone: f64,
        now: DateTime<FixedOffset>,
    ) -> Result<NextPrayerInfo> {
        let now = now.with_timezone(&utc_offset(timezone)?);
        let date = now.date_naive();
        let today = self.compute(date, coordinate, timezone)?;

        if now < today.fajr {
            // a previous day that cannot be computed has nothing pending
            let pending = date
                .pred_opt()
                .and_then(|yesterday| self.compute(yesterday, coordinate, timezone).ok())
                .and_then(|yesterday| yesterday.next_prayer_today(now))
                .filter(|next| next.time < today.fajr);
            if let Some(next) = pending {
                return Ok(next);
            }
        }
        next_prayer(&today, now, |date| self.compute(date, coordinate, timezone))
    }
}
