use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

pub const DEFAULT_HOUR: u32 = 7;
pub const DEFAULT_MINUTE: u32 = 0;
pub const DEFAULT_DISPLAY: &str = "07:00 AM";

pub const HOUR_RANGE: (u32, u32) = (1, 12);
pub const MINUTE_RANGE: (u32, u32) = (0, 59);

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Meridiem {
    #[default]
    Am,
    Pm,
}

impl Meridiem {
    pub fn from_is_pm(is_pm: bool) -> Self {
        if is_pm { Meridiem::Pm } else { Meridiem::Am }
    }

    pub fn label(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseTimeError {
    #[error("expected HH:MM AM|PM, got '{0}'")]
    Pattern(String),
    #[error("hour {0} is outside 1-12")]
    HourOutOfRange(u32),
    #[error("minute {0} is outside 0-59")]
    MinuteOutOfRange(u32),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TimeState {
    hour: u32,
    minute: u32,
    meridiem: Meridiem,
    display: String,
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new(DEFAULT_HOUR, DEFAULT_MINUTE, Meridiem::Am)
    }
}

impl TimeState {
    pub fn new(hour: u32, minute: u32, meridiem: Meridiem) -> Self {
        let mut state = Self {
            hour: hour.clamp(HOUR_RANGE.0, HOUR_RANGE.1),
            minute: minute.clamp(MINUTE_RANGE.0, MINUTE_RANGE.1),
            meridiem,
            display: String::new(),
        };
        state.refresh_display();
        state
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    pub fn is_pm(&self) -> bool {
        self.meridiem == Meridiem::Pm
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn hour_text(&self) -> String {
        format!("{:02}", self.hour)
    }

    pub fn minute_text(&self) -> String {
        format!("{:02}", self.minute)
    }

    pub fn set_hour(&mut self, hour: u32) {
        self.hour = hour.clamp(HOUR_RANGE.0, HOUR_RANGE.1);
        self.refresh_display();
    }

    pub fn set_meridiem(&mut self, meridiem: Meridiem) {
        self.meridiem = meridiem;
        self.refresh_display();
    }

    /// Applies the text of the hour field: integer prefix, zero when there
    /// is none, then clamped into 1-12.
    pub fn commit_hour_text(&mut self, text: &str) {
        self.hour = clamp_edit(parse_edit_integer(text), HOUR_RANGE);
        self.refresh_display();
    }

    pub fn commit_minute_text(&mut self, text: &str) {
        self.minute = clamp_edit(parse_edit_integer(text), MINUTE_RANGE);
        self.refresh_display();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Lenient parse used by the widget: on a pattern mismatch the current
    /// state is kept. Returns whether the input was accepted.
    pub fn apply_str(&mut self, input: &str) -> bool {
        match input.parse::<TimeState>() {
            Ok(parsed) => {
                *self = parsed;
                true
            }
            Err(err) => {
                log::debug!("keeping {} after rejected input: {err}", self.display);
                false
            }
        }
    }

    pub fn parse_or_default(input: Option<&str>) -> Self {
        let mut state = Self::default();
        if let Some(text) = input {
            state.apply_str(text);
        }
        state
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let hour24 = match (self.hour, self.is_pm()) {
            (12, false) => 0,
            (12, true) => 12,
            (hour, false) => hour,
            (hour, true) => hour + 12,
        };
        NaiveTime::from_hms_opt(hour24, self.minute, 0)
    }

    fn refresh_display(&mut self) {
        self.display = format!("{:02}:{:02} {}", self.hour, self.minute, self.meridiem);
    }
}

impl Display for TimeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl From<NaiveTime> for TimeState {
    fn from(time: NaiveTime) -> Self {
        let (is_pm, hour12) = time.hour12();
        Self::new(hour12, time.minute(), Meridiem::from_is_pm(is_pm))
    }
}

impl FromStr for TimeState {
    type Err = ParseTimeError;

    /// Accepts `H:MM` or `HH:MM`, one optional whitespace character, then
    /// `AM` or `PM`. A zero hour falls back to 7.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let pattern = || ParseTimeError::Pattern(input.to_string());

        let (hour_text, rest) = input.split_once(':').ok_or_else(pattern)?;
        if hour_text.is_empty()
            || hour_text.len() > 2
            || !hour_text.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(pattern());
        }

        let rest_bytes = rest.as_bytes();
        if rest_bytes.len() < 2 || !rest_bytes[..2].iter().all(u8::is_ascii_digit) {
            return Err(pattern());
        }
        let (minute_text, tail) = rest.split_at(2);

        let meridiem_text = match tail.chars().next() {
            Some(c) if c.is_whitespace() => &tail[c.len_utf8()..],
            _ => tail,
        };
        let meridiem = match meridiem_text {
            "AM" => Meridiem::Am,
            "PM" => Meridiem::Pm,
            _ => return Err(pattern()),
        };

        let hour: u32 = hour_text.parse().map_err(|_| pattern())?;
        let minute: u32 = minute_text.parse().map_err(|_| pattern())?;
        let hour = if hour == 0 { DEFAULT_HOUR } else { hour };
        if hour > HOUR_RANGE.1 {
            return Err(ParseTimeError::HourOutOfRange(hour));
        }
        if minute > MINUTE_RANGE.1 {
            return Err(ParseTimeError::MinuteOutOfRange(minute));
        }

        Ok(Self::new(hour, minute, meridiem))
    }
}

/// Integer prefix of `text`: leading whitespace, an optional sign, then
/// digits. Anything without digits reads as zero.
fn parse_edit_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }
    if negative { -value } else { value }
}

fn clamp_edit(value: i64, (min, max): (u32, u32)) -> u32 {
    value.clamp(i64::from(min), i64::from(max)) as u32
}
