//! Digit model of the countdown timer display.

use std::time::Duration;

/// Value shown in one digit cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Digit {
    /// The cell is not shown at all.
    Hidden,
    /// The cell shows a dash.
    Placeholder,
    Value(u8),
}

/// Typeface of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DigitFace {
    /// Face the layout was created with.
    #[default]
    Regular,
    /// Thin face used for the lowest displayed unit and for dashes.
    Thin,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DigitColor {
    #[default]
    White,
    Gray,
}

/// Render state of one text cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigitCell {
    pub text:    String,
    pub visible: bool,
    pub face:    DigitFace,
    pub color:   DigitColor,
}

impl Default for DigitCell {
    fn default() -> Self {
        Self {
            text:    String::new(),
            visible: true,
            face:    DigitFace::Regular,
            color:   DigitColor::White,
        }
    }
}

impl DigitCell {
    fn show(&mut self, text: String, color: DigitColor) {
        self.text = text;
        self.color = color;
    }
}

/// Digits passed to [`TimerDisplay::set_time`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerDigits {
    pub hours_tens:   Digit,
    pub hours_ones:   Digit,
    pub minutes_tens: Digit,
    pub minutes_ones: Digit,
    pub seconds:      u8,
}

impl TimerDigits {
    /// Digits for a remaining duration, rounded down to whole seconds.
    ///
    /// The hours tens cell is hidden below ten hours. Hours above 99 keep
    /// only their last two digits.
    pub fn from_duration(remaining: Duration) -> Self {
        let total = remaining.as_secs();
        let hours = (total / 3600) % 100;
        let minutes = (total / 60) % 60;
        let seconds = (total % 60) as u8;

        let hours_tens = if hours >= 10 {
            Digit::Value((hours / 10) as u8)
        } else {
            Digit::Hidden
        };

        Self {
            hours_tens,
            hours_ones: Digit::Value((hours % 10) as u8),
            minutes_tens: Digit::Value((minutes / 10) as u8),
            minutes_ones: Digit::Value((minutes % 10) as u8),
            seconds,
        }
    }

    /// Dashes in every cell, as shown while a timer is being entered.
    pub fn placeholder() -> Self {
        Self {
            hours_tens:   Digit::Placeholder,
            hours_ones:   Digit::Placeholder,
            minutes_tens: Digit::Placeholder,
            minutes_ones: Digit::Placeholder,
            seconds:      0,
        }
    }
}

/// Which cells a timer layout contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerLayout {
    pub hours_tens:   bool,
    pub hours_ones:   bool,
    pub minutes_tens: bool,
    pub minutes_ones: bool,
    pub seconds:      bool,
}

impl Default for TimerLayout {
    fn default() -> Self {
        Self {
            hours_tens:   true,
            hours_ones:   true,
            minutes_tens: true,
            minutes_ones: true,
            seconds:      true,
        }
    }
}

/// Text cells of a timer display.
///
/// Cells missing from the layout stay `None` and are skipped by
/// [`set_time`](TimerDisplay::set_time).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimerDisplay {
    pub hours_tens:   Option<DigitCell>,
    pub hours_ones:   Option<DigitCell>,
    pub minutes_tens: Option<DigitCell>,
    pub minutes_ones: Option<DigitCell>,
    pub seconds:      Option<DigitCell>,
}

impl TimerDisplay {
    /// Build the cells for `layout`.
    ///
    /// The lowest displayed unit uses the thin face: the seconds cell when
    /// present, otherwise both minutes cells.
    pub fn new(layout: TimerLayout) -> Self {
        let cell = |present: bool| present.then(DigitCell::default);

        let mut display = Self {
            hours_tens:   cell(layout.hours_tens),
            hours_ones:   cell(layout.hours_ones),
            minutes_tens: cell(layout.minutes_tens),
            minutes_ones: cell(layout.minutes_ones),
            seconds:      cell(layout.seconds),
        };

        match &mut display.seconds {
            Some(seconds) => seconds.face = DigitFace::Thin,
            None => {
                for minutes in [&mut display.minutes_tens, &mut display.minutes_ones]
                    .into_iter()
                    .flatten()
                {
                    minutes.face = DigitFace::Thin;
                }
            }
        }

        display
    }

    pub fn set_time(&mut self, digits: TimerDigits) {
        if let Some(cell) = &mut self.hours_tens {
            match digits.hours_tens {
                Digit::Hidden => cell.visible = false,
                digit => {
                    set_hours_cell(cell, digit);
                    cell.visible = true;
                }
            }
        }

        if let Some(cell) = &mut self.hours_ones {
            set_hours_cell(cell, digits.hours_ones);
        }

        if let Some(cell) = &mut self.minutes_tens {
            set_minutes_cell(cell, digits.minutes_tens);
        }

        if let Some(cell) = &mut self.minutes_ones {
            set_minutes_cell(cell, digits.minutes_ones);
        }

        if let Some(cell) = &mut self.seconds {
            cell.text = format!("{:02}", digits.seconds);
        }
    }

    /// Concatenated text of the visible cells.
    pub fn text(&self) -> String {
        [
            &self.hours_tens,
            &self.hours_ones,
            &self.minutes_tens,
            &self.minutes_ones,
            &self.seconds,
        ]
        .into_iter()
        .flatten()
        .filter(|cell| cell.visible)
        .map(|cell| cell.text.as_str())
        .collect()
    }
}

// Hour cells switch face: dashes are thin, digits use the layout face.
fn set_hours_cell(cell: &mut DigitCell, digit: Digit) {
    match digit {
        Digit::Value(value) => {
            cell.show(value.to_string(), DigitColor::White);
            cell.face = DigitFace::Regular;
        }
        Digit::Placeholder | Digit::Hidden => {
            cell.show("-".to_owned(), DigitColor::Gray);
            cell.face = DigitFace::Thin;
        }
    }
}

fn set_minutes_cell(cell: &mut DigitCell, digit: Digit) {
    match digit {
        Digit::Value(value) => cell.show(value.to_string(), DigitColor::White),
        Digit::Placeholder | Digit::Hidden => cell.show("-".to_owned(), DigitColor::Gray),
    }
}
