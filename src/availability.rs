//! # Availability Windows
//!
//! A reservable product (typically a `Cancha`) declares one recurring weekly window,
//! from a start weekday and time to an end weekday and time. Windows may wrap across
//! the end of the week: Friday 10:00 to Monday 22:00 covers Friday from 10:00,
//! all of Saturday and Sunday, and Monday until 22:00.
//!
//! Weekdays are ISO numbers, 1 (Monday) to 7 (Sunday).

use chrono::{Datelike, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    #[error("invalid weekday: {0}")]
    InvalidDay(String),
    #[error("invalid time of day: {0}")]
    InvalidTime(String),
    #[error("expected `start_day,start_time,end_day,end_time`, got {0:?}")]
    Malformed(String),
}

/// Recurring weekly window during which a product can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub start_day: u8,
    pub start_time: NaiveTime,
    pub end_day: u8,
    pub end_time: NaiveTime,
}

impl AvailabilityWindow {
    pub fn new(
        start_day: u8,
        start_time: NaiveTime,
        end_day: u8,
        end_time: NaiveTime,
    ) -> Result<Self, AvailabilityError> {
        for day in [start_day, end_day] {
            if !(1..=7).contains(&day) {
                return Err(AvailabilityError::InvalidDay(day.to_string()));
            }
        }
        Ok(Self {
            start_day,
            start_time,
            end_day,
            end_time,
        })
    }

    pub fn contains(&self, candidate: NaiveDateTime) -> bool {
        is_within_range(
            self.start_day,
            self.end_day,
            self.start_time,
            self.end_time,
            candidate,
        )
    }
}

/// Whether `candidate` falls inside the weekly window.
///
/// The start day only bounds from below and the end day only from above, unless
/// they are the same day. Days strictly between them are fully open, and when
/// `range_start_day > range_end_day` the range wraps past Sunday.
pub fn is_within_range(
    range_start_day: u8,
    range_end_day: u8,
    start_time: NaiveTime,
    end_time: NaiveTime,
    candidate: NaiveDateTime,
) -> bool {
    let day = candidate.weekday().number_from_monday() as u8;
    let time = candidate.time();

    if day == range_start_day && day != range_end_day {
        start_time <= time
    } else if day == range_end_day && day != range_start_day {
        time <= end_time
    } else if day == range_start_day && day == range_end_day {
        start_time <= time && time <= end_time
    } else if range_start_day < day && day < range_end_day {
        true
    } else if range_start_day > range_end_day {
        day > range_start_day || day < range_end_day
    } else {
        false
    }
}

/// Human-readable reservation line stored on the request.
pub fn reservation_info(at: NaiveDateTime) -> String {
    format!(
        "Solicitud de reserva para el día {}, a las {} hrs",
        at.format("%d/%m/%Y"),
        at.format("%H:%M")
    )
}

fn parse_day(raw: &str) -> Result<u8, AvailabilityError> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u8>() {
        return if (1..=7).contains(&n) {
            Ok(n)
        } else {
            Err(AvailabilityError::InvalidDay(raw.to_string()))
        };
    }
    DAY_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(raw))
        .map(|i| i as u8 + 1)
        .ok_or_else(|| AvailabilityError::InvalidDay(raw.to_string()))
}

fn parse_time(raw: &str) -> Result<NaiveTime, AvailabilityError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| AvailabilityError::InvalidTime(raw.to_string()))
}

/// Parses `"Friday,10:00,Monday,22:00"`. Days may also be given as ISO numbers.
impl FromStr for AvailabilityWindow {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let [start_day, start_time, end_day, end_time] = parts.as_slice() else {
            return Err(AvailabilityError::Malformed(s.to_string()));
        };
        Self::new(
            parse_day(start_day)?,
            parse_time(start_time)?,
            parse_day(end_day)?,
            parse_time(end_time)?,
        )
    }
}

impl Display for AvailabilityWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = |day: u8| DAY_NAMES.get(usize::from(day).wrapping_sub(1)).copied().unwrap_or("?");
        write!(
            f,
            "{},{},{},{}",
            name(self.start_day),
            self.start_time.format("%H:%M"),
            name(self.end_day),
            self.end_time.format("%H:%M")
        )
    }
}
