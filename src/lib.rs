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

//! # Hotel Booking
//!
//! This library provides an in-memory hotel room booking engine: it keeps
//! catalogs of rooms and users and books rooms for users across date ranges,
//! charging each stay against the user's balance.
//!
//! ## Core Components
//!
//! - [`Engine`]: Owns the catalogs and ledger, validates and commits bookings
//! - [`Catalog`]: Rooms and users keyed by number and ID
//! - [`BookingLedger`]: Append-only record of accepted bookings
//! - [`StayPeriod`]: Half-open check-in/check-out date range
//! - [`BookingError`]: Reasons a booking is rejected
//!
//! ## Example
//!
//! ```
//! use hotel_booking_rs::{Engine, RoomNumber, RoomType, UserId, parse_date};
//!
//! let engine = Engine::new();
//! engine.upsert_room(RoomNumber(1), RoomType::Standard, 1000);
//! engine.register_user(UserId(1), 5000).unwrap();
//!
//! let booking = engine
//!     .book_room(
//!         UserId(1),
//!         RoomNumber(1),
//!         parse_date("07/07/2026").unwrap(),
//!         parse_date("08/07/2026").unwrap(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(booking.total_price, 1000);
//! assert_eq!(engine.user(UserId(1)).unwrap().balance, 4000);
//! ```
//!
//! ## Thread Safety
//!
//! The engine serializes every operation on a single lock, so concurrent
//! bookings of the same room never both succeed.

mod base;
pub mod booking;
pub mod catalog;
mod engine;
pub mod error;
pub mod ledger;
pub mod report;
pub mod room;
pub mod user;

pub use base::{RoomNumber, UserId};
pub use booking::{Booking, DATE_FORMAT, StayPeriod, format_date, parse_date};
pub use catalog::Catalog;
pub use engine::{Engine, EngineSnapshot};
pub use error::{BookingError, CatalogError, DateParseError, RoomTypeParseError};
pub use ledger::BookingLedger;
pub use room::{Room, RoomType};
pub use user::User;
