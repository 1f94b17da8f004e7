use std::fmt;

/// Wall-clock time of day broken into fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WallTime {
    /// Hour of the day, `0..=23`.
    pub hour:   u32,
    /// Minute of the hour, `0..=59`.
    pub minute: u32,
    /// Second of the minute, `0..=59`.
    pub second: u32,
}

impl WallTime {
    pub const MIDNIGHT: Self = Self::new(0, 0, 0);

    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Source of the current wall time.
///
/// Zones are identified by IANA names such as `Europe/Paris`. `None` selects
/// the system zone.
pub trait ClockSource: Send + Sync {
    /// Current wall time in `zone`, or in the system zone when `zone` is
    /// `None` or unknown.
    fn now(&self, zone: Option<&str>) -> WallTime;

    /// Resolve `id` to its canonical zone name, or `None` if the source does
    /// not recognise it.
    fn resolve_zone(&self, id: &str) -> Option<String>;
}
