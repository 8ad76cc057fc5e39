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

//! Error types for catalog maintenance and booking validation.

use crate::base::{RoomNumber, UserId};
use thiserror::Error;

/// Booking validation errors.
///
/// Variants are listed in the order the validator checks them; the first
/// failing check is the one reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Check-in falls after check-out
    #[error("check-in date must be before check-out date")]
    InvalidDateRange,

    /// No user registered under this ID
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// No room registered under this number
    #[error("room {0} not found")]
    RoomNotFound(RoomNumber),

    /// Requested stay shares at least one night with an existing booking
    #[error("room {0} already booked in this period")]
    RoomOverlap(RoomNumber),

    /// Stay covers zero (or fewer) nights
    #[error("invalid number of nights: {0}")]
    InvalidNightCount(i64),

    /// Stay costs more than the user can pay
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: i64, available: i64 },

    /// nights x price does not fit in an i64
    #[error("total price overflows")]
    PriceOverflow,

    /// Paying the total would push the balance past i64::MAX (negative prices)
    #[error("balance overflows after charging {0}")]
    BalanceOverflow(i64),
}

/// Catalog maintenance errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// New user would start with a negative balance
    #[error("user {0} cannot be registered with negative balance {1}")]
    NegativeBalance(UserId, i64),
}

/// A room type name other than STANDARD, JUNIOR or SUITE.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown room type '{input}' (expected STANDARD, JUNIOR or SUITE)")]
pub struct RoomTypeParseError {
    pub input: String,
}

/// A date string that is not in `dd/MM/yyyy` form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date '{input}' (expected dd/MM/yyyy): {reason}")]
pub struct DateParseError {
    pub input: String,
    pub reason: String,
}
