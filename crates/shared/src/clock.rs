use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CLOCK_TIME_RE: Regex = Regex::new(r"^([01]?\d|2[0-3]):([0-5]\d)$").unwrap();
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid time of day: {0:?}")]
pub struct InvalidClockTime(pub String);

/// Wall-clock time of day, minute precision.
///
/// Appointment times arrive from the booking API as `HH:MM` strings and are
/// parsed exactly once, at the boundary. Everything past that point works
/// with this type, so a malformed time can never reach the planning grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, InvalidClockTime> {
        if hour > 23 || minute > 59 {
            return Err(InvalidClockTime(format!("{hour:02}:{minute:02}")));
        }

        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl FromStr for ClockTime {
    type Err = InvalidClockTime;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let captures = CLOCK_TIME_RE
            .captures(value)
            .ok_or_else(|| InvalidClockTime(value.to_owned()))?;

        // Both groups are all-digit by construction of the regex
        let hour = captures[1].parse().unwrap();
        let minute = captures[2].parse().unwrap();

        Ok(Self { hour, minute })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
