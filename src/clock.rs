//! Build timestamp capture.

use chrono::{Local, Utc};

/// ISO-8601 with microsecond precision and no offset suffix. Consumers of
/// the generated file parse the timestamps in this shape.
pub const ISO_MICROSECONDS: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Source of the two build timestamps embedded in the output. Injectable
/// so generation can be tested against fixed values.
pub trait BuildClock {
    /// Local wall-clock time at generation.
    fn build_date_local(&self) -> String;

    /// UTC time at generation.
    fn build_date_utc(&self) -> String;
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl BuildClock for SystemClock {
    fn build_date_local(&self) -> String {
        Local::now().format(ISO_MICROSECONDS).to_string()
    }

    fn build_date_utc(&self) -> String {
        Utc::now().format(ISO_MICROSECONDS).to_string()
    }
}
