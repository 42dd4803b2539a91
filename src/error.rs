use chrono::NaiveDate;
use thiserror::Error;

use crate::Prayer;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("timezone offset {0}h is not a valid UTC offset")]
    InvalidTimezone(f64),
    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("no calendar day follows {0}")]
    NoFollowingDay(NaiveDate),

    /// The sun never reaches the altitude that defines `prayer` on `date`,
    /// and the configured high latitude rule could not stand in for it.
    #[error("{prayer} cannot be determined on {date} at this latitude")]
    NoHourAngleSolution { prayer: Prayer, date: NaiveDate },
    #[error("prayer times for {date} are out of order")]
    UnorderedTimes { date: NaiveDate },

    #[error("unknown calculation method `{0}`")]
    UnknownMethod(String),
    #[error("unknown asr madhhab `{0}`")]
    UnknownMadhhab(String),
    #[error("unknown high latitude rule `{0}`")]
    UnknownHighLatitudeRule(String),
}
