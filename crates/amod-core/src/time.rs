//! Wall-clock times of day.
//!
//! Route and plan files carry departure times as `HH:MM:SS` (or the short
//! `HH:MM` form).  `ClockTime` stores whole seconds since midnight so
//! arithmetic is exact; adding a duration wraps past midnight the way a time
//! of day does, rather than rolling into a day counter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

const SECS_PER_DAY: u32 = 86_400;

/// Seconds since midnight, always `< 86_400`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build from components.  Fails if any component is out of range.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> CoreResult<Self> {
        if hours >= 24 || minutes >= 60 || seconds >= 60 {
            return Err(CoreError::Parse(format!(
                "clock time {hours:02}:{minutes:02}:{seconds:02} out of range"
            )));
        }
        Ok(ClockTime(hours * 3_600 + minutes * 60 + seconds))
    }

    #[inline]
    pub fn secs_since_midnight(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn hms(self) -> (u32, u32, u32) {
        (self.0 / 3_600, (self.0 % 3_600) / 60, self.0 % 60)
    }

    /// Time of day `secs` later, wrapping past midnight.
    #[inline]
    pub fn wrapping_add_secs(self, secs: u64) -> ClockTime {
        let wrapped = (self.0 as u64 + secs) % SECS_PER_DAY as u64;
        ClockTime(wrapped as u32)
    }
}

/// Parse a duration written as `HH:MM:SS` or `HH:MM` into seconds.
///
/// Hours are not capped at 24 so multi-day durations survive; minutes and
/// seconds must be `< 60`.
pub fn parse_duration_secs(s: &str) -> CoreResult<u64> {
    let (h, m, sec) = split_hms(s)?;
    Ok(h as u64 * 3_600 + m as u64 * 60 + sec as u64)
}

fn split_hms(s: &str) -> CoreResult<(u32, u32, u32)> {
    let trimmed = s.trim();
    let parts: Vec<&str> = trimmed.split(':').collect();
    let field = |p: &str| {
        p.parse::<u32>()
            .map_err(|_| CoreError::Parse(format!("invalid time {trimmed:?}: expected HH:MM[:SS]")))
    };
    let (h, m, sec) = match parts.as_slice() {
        [h, m] => (field(h)?, field(m)?, 0),
        [h, m, sec] => (field(h)?, field(m)?, field(sec)?),
        _ => {
            return Err(CoreError::Parse(format!(
                "invalid time {trimmed:?}: expected HH:MM[:SS]"
            )));
        }
    };
    if m >= 60 || sec >= 60 {
        return Err(CoreError::Parse(format!("invalid time {trimmed:?}: field out of range")));
    }
    Ok((h, m, sec))
}

impl FromStr for ClockTime {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let (h, m, sec) = split_hms(s)?;
        ClockTime::from_hms(h, m, sec)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = CoreError;
    fn try_from(s: String) -> CoreResult<Self> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> String {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}
