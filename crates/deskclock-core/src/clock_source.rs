use std::{collections::HashMap, sync::Mutex};

use chrono::{Local, Timelike, Utc};
use chrono_tz::Tz;
use deskclock_proto::ports::clock::{ClockSource, WallTime};
use log::error;

/// Clock source backed by the operating system clock.
///
/// The system zone comes from [`chrono::Local`]; named zones are resolved
/// against the IANA database bundled with `chrono-tz`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClockSource;

impl SystemClockSource {
    pub fn new() -> Self {
        Self
    }
}

fn wall_time<T: Timelike>(time: &T) -> WallTime {
    WallTime::new(time.hour(), time.minute(), time.second())
}

impl ClockSource for SystemClockSource {
    fn now(&self, zone: Option<&str>) -> WallTime {
        match zone.and_then(|id| id.parse::<Tz>().ok()) {
            Some(tz) => wall_time(&Utc::now().with_timezone(&tz)),
            None => wall_time(&Local::now()),
        }
    }

    fn resolve_zone(&self, id: &str) -> Option<String> {
        id.parse::<Tz>().ok().map(|tz| tz.name().to_owned())
    }
}

/// Manually driven clock source.
///
/// Reports a fixed system-zone time that callers move with
/// [`set`](FixedClockSource::set). Extra zones are registered with a whole-hour
/// offset from the system zone.
#[derive(Debug, Default)]
pub struct FixedClockSource {
    time:  Mutex<WallTime>,
    zones: HashMap<String, i32>,
}

impl FixedClockSource {
    pub fn new(time: WallTime) -> Self {
        Self {
            time:  Mutex::new(time),
            zones: HashMap::new(),
        }
    }

    /// Register `id` as a known zone `offset_hours` away from the system zone.
    pub fn with_zone(mut self, id: impl Into<String>, offset_hours: i32) -> Self {
        self.zones.insert(id.into(), offset_hours);
        self
    }

    pub fn set(&self, time: WallTime) {
        match self.time.lock() {
            Ok(mut guard) => *guard = time,
            Err(err) => error!("fixed clock state poisoned: {err}"),
        }
    }

    fn base(&self) -> WallTime {
        match self.time.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl ClockSource for FixedClockSource {
    fn now(&self, zone: Option<&str>) -> WallTime {
        let base = self.base();
        let offset = zone
            .and_then(|id| self.zones.get(id).copied())
            .unwrap_or(0);
        let hour = (base.hour as i32 + offset).rem_euclid(24) as u32;

        WallTime { hour, ..base }
    }

    fn resolve_zone(&self, id: &str) -> Option<String> {
        self.zones.contains_key(id).then(|| id.to_owned())
    }
}
