//! Timestamp formatting in the system time zone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Time of day only, as shown by the autosave indicator.
pub struct LocalTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(TimeZone::system()).strftime("%H:%M:%S")
        )
    }
}
