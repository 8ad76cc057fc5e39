// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Stay periods and booking records.
//!
//! A [`StayPeriod`] is a half-open `[check_in, check_out)` range of calendar
//! dates. The check-out day is not a night of the stay, so a booking ending
//! on the 8th and another starting on the 8th do not collide.
//!
//! # Example
//!
//! ```
//! use hotel_booking_rs::{StayPeriod, parse_date};
//!
//! let a = StayPeriod::new(parse_date("07/07/2026").unwrap(), parse_date("09/07/2026").unwrap());
//! let b = StayPeriod::new(parse_date("09/07/2026").unwrap(), parse_date("10/07/2026").unwrap());
//! assert_eq!(a.nights(), 2);
//! assert!(!a.overlaps(&b));
//! ```

use crate::error::DateParseError;
use crate::room::Room;
use crate::user::User;
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Date format used for input and reports.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `dd/MM/yyyy` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|e| DateParseError {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Formats a date as `dd/MM/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Half-open range of nights between check-in and check-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StayPeriod {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayPeriod {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Whole days from check-in to check-out. Negative when the dates are reversed.
    pub fn nights(&self) -> i64 {
        self.check_out.signed_duration_since(self.check_in).num_days()
    }

    /// A period with no nights in it.
    pub fn is_empty(&self) -> bool {
        self.check_in >= self.check_out
    }

    /// Returns `true` if both periods share at least one night.
    ///
    /// Empty periods contain no nights and overlap nothing.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        !(self.check_out <= other.check_in || self.check_in >= other.check_out)
    }
}

/// An accepted booking.
///
/// Room and user are value snapshots taken when the booking was committed.
/// Later edits to the live catalog entries do not reach them. The user
/// snapshot carries the balance after the stay was charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Booking {
    pub room: Room,
    pub user: User,
    pub period: StayPeriod,
    pub total_price: i64,
}

impl Booking {
    pub fn new(room: Room, user: User, period: StayPeriod, total_price: i64) -> Self {
        Self {
            room,
            user,
            period,
            total_price,
        }
    }

    pub fn nights(&self) -> i64 {
        self.period.nights()
    }
}

/// Flattened so bookings can be written as CSV rows.
impl Serialize for Booking {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Booking", 8)?;
        state.serialize_field("user", &self.user.id)?;
        state.serialize_field("room", &self.room.room_number)?;
        state.serialize_field("type", &self.room.room_type)?;
        state.serialize_field("check_in", &format_date(self.period.check_in))?;
        state.serialize_field("check_out", &format_date(self.period.check_out))?;
        state.serialize_field("nights", &self.nights())?;
        state.serialize_field("total", &self.total_price)?;
        state.serialize_field("balance_after", &self.user.balance)?;
        state.end()
    }
}
