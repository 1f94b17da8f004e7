use deskclock_proto::ports::clock::WallTime;

/// Rotation of each hand in degrees, clockwise from twelve o'clock.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandAngles {
    pub hour:   f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    /// Angles for `time`.
    ///
    /// The minute hand advances with the seconds and the hour hand with the
    /// minutes, so both sweep continuously rather than jumping.
    pub fn from_wall_time(time: WallTime) -> Self {
        let seconds = time.second as f32;
        let minutes = time.minute as f32 + seconds / 60.0;
        let hours = (time.hour % 12) as f32 + minutes / 60.0;

        Self {
            hour:   hours / 12.0 * 360.0,
            minute: minutes / 60.0 * 360.0,
            second: seconds / 60.0 * 360.0,
        }
    }

    /// Like [`from_wall_time`](Self::from_wall_time) but keeps the second
    /// angle of `self` untouched when `with_seconds` is false.
    pub fn recompute(self, time: WallTime, with_seconds: bool) -> Self {
        let next = Self::from_wall_time(time);

        if with_seconds {
            next
        } else {
            Self {
                second: self.second,
                ..next
            }
        }
    }
}
