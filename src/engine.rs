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

//! Booking engine.
//!
//! The [`Engine`] owns the room and user catalogs and the booking ledger. It
//! registers rooms and users and validates booking requests against them.
//!
//! # Booking Validation
//!
//! Checks run in a fixed order and the first failure is returned:
//!
//! 1. Check-in must not fall after check-out.
//! 2. The user must exist.
//! 3. The room must exist.
//! 4. The stay must not share a night with another booking of the room.
//! 5. The stay must cover at least one night.
//! 6. The user's balance must cover `nights * price_per_night`.
//!
//! Nothing is mutated until every check has passed.
//!
//! # Thread Safety
//!
//! All state sits behind a single [`parking_lot::Mutex`]. A booking holds the
//! lock from the first check to the commit, so two callers racing for the
//! same room and dates cannot both succeed.

use crate::base::{RoomNumber, UserId};
use crate::booking::{Booking, StayPeriod};
use crate::catalog::Catalog;
use crate::error::{BookingError, CatalogError};
use crate::ledger::BookingLedger;
use crate::room::{Room, RoomType};
use crate::user::User;
use chrono::NaiveDate;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct EngineState {
    catalog: Catalog,
    ledger: BookingLedger,
}

impl EngineState {
    /// Runs every booking check without touching state.
    ///
    /// Returns the room to snapshot and the total price.
    fn validate(
        &self,
        user_id: UserId,
        room_number: RoomNumber,
        period: StayPeriod,
    ) -> Result<(Room, i64), BookingError> {
        if period.check_in > period.check_out {
            return Err(BookingError::InvalidDateRange);
        }

        let user = self
            .catalog
            .user(user_id)
            .ok_or(BookingError::UserNotFound(user_id))?;
        let room = self
            .catalog
            .room(room_number)
            .ok_or(BookingError::RoomNotFound(room_number))?;

        if self
            .ledger
            .for_room(room_number)
            .any(|existing| period.overlaps(&existing.period))
        {
            return Err(BookingError::RoomOverlap(room_number));
        }

        let nights = period.nights();
        if nights <= 0 {
            return Err(BookingError::InvalidNightCount(nights));
        }

        let total_price = nights
            .checked_mul(room.price_per_night)
            .ok_or(BookingError::PriceOverflow)?;
        if !user.can_afford(total_price) {
            return Err(BookingError::InsufficientBalance {
                required: total_price,
                available: user.balance,
            });
        }
        // Negative prices credit the user, which can overflow near i64::MAX.
        user
            .balance_after(total_price)
            .ok_or(BookingError::BalanceOverflow(total_price))?;

        Ok((*room, total_price))
    }

    /// Charges the user and records the booking.
    fn commit(
        &mut self,
        user_id: UserId,
        room: Room,
        period: StayPeriod,
        total_price: i64,
    ) -> Result<Booking, BookingError> {
        let user = self
            .catalog
            .user_mut(user_id)
            .ok_or(BookingError::UserNotFound(user_id))?;
        user
            .charge(total_price)
            .ok_or(BookingError::BalanceOverflow(total_price))?;

        // Snapshot after the charge so it records the balance left over.
        let booking = Booking::new(room, *user, period, total_price);
        self.ledger.push(booking);
        Ok(booking)
    }
}

/// Point-in-time copy of everything the engine holds.
///
/// Collections are in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub rooms: Vec<Room>,
    pub users: Vec<User>,
    pub bookings: Vec<Booking>,
}

/// Booking engine managing rooms, users and the booking ledger.
///
/// # Invariants
///
/// - Room numbers and user IDs are unique.
/// - No two bookings of the same room share a night.
/// - A user's balance never drops below zero.
/// - Each successful booking debits its total exactly once.
/// - Bookings are never modified or removed.
#[derive(Debug, Default)]
pub struct Engine {
    state: Mutex<EngineState>,
}

impl Engine {
    /// Creates an engine with no rooms, users or bookings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room, or updates type and price of an existing one.
    ///
    /// Existing bookings keep the room as it was when they were made.
    /// Returns `true` when a new room was added.
    pub fn upsert_room(&self, room_number: RoomNumber, room_type: RoomType, price: i64) -> bool {
        let created = self.state.lock().catalog.upsert_room(room_number, room_type, price);
        debug!(
            room = %room_number,
            room_type = %room_type,
            price,
            created,
            "room registered"
        );
        created
    }

    /// Adds a user unless the ID is already registered.
    ///
    /// Re-registering an existing user changes nothing, not even the balance.
    /// Returns `Ok(true)` when a new user was added.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NegativeBalance`] - New user with a balance below zero.
    pub fn register_user(&self, user_id: UserId, balance: i64) -> Result<bool, CatalogError> {
        let created = self.state.lock().catalog.register_user(user_id, balance)?;
        debug!(user = %user_id, balance, created, "user registered");
        Ok(created)
    }

    /// Books `room_number` for `user_id` from `check_in` to `check_out`.
    ///
    /// Check-out is exclusive. On success the user is charged
    /// `nights * price_per_night` and the booking is appended to the ledger.
    /// On failure nothing changes.
    ///
    /// # Errors
    ///
    /// - [`BookingError::InvalidDateRange`] - Check-in after check-out.
    /// - [`BookingError::UserNotFound`] - Unknown user.
    /// - [`BookingError::RoomNotFound`] - Unknown room.
    /// - [`BookingError::RoomOverlap`] - Room already booked for one of the nights.
    /// - [`BookingError::InvalidNightCount`] - Zero-night stay.
    /// - [`BookingError::PriceOverflow`] - Total does not fit in an `i64`.
    /// - [`BookingError::InsufficientBalance`] - Balance below the total.
    /// - [`BookingError::BalanceOverflow`] - Crediting a negative total overflows the balance.
    pub fn book_room(
        &self,
        user_id: UserId,
        room_number: RoomNumber,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Booking, BookingError> {
        let period = StayPeriod::new(check_in, check_out);

        let result = {
            let mut state = self.state.lock();
            state
                .validate(user_id, room_number, period)
                .and_then(|(room, total)| state.commit(user_id, room, period, total))
        };

        match &result {
            Ok(booking) => info!(
                user = %user_id,
                room = %room_number,
                total = booking.total_price,
                "booking successful for user {user_id} in room {room_number}"
            ),
            Err(e) => warn!(
                user = %user_id,
                room = %room_number,
                "booking failed for user {user_id} in room {room_number}: {e}"
            ),
        }
        result
    }

    pub fn room(&self, room_number: RoomNumber) -> Option<Room> {
        self.state.lock().catalog.room(room_number).copied()
    }

    pub fn user(&self, user_id: UserId) -> Option<User> {
        self.state.lock().catalog.user(user_id).copied()
    }

    /// Rooms in registration order.
    pub fn rooms(&self) -> Vec<Room> {
        self.state.lock().catalog.rooms().to_vec()
    }

    /// Users in registration order.
    pub fn users(&self) -> Vec<User> {
        self.state.lock().catalog.users().to_vec()
    }

    /// Bookings in commit order.
    pub fn bookings(&self) -> Vec<Booking> {
        self.state.lock().ledger.as_slice().to_vec()
    }

    pub fn booking_count(&self) -> usize {
        self.state.lock().ledger.len()
    }

    /// Copies rooms, users and bookings under one lock.
    pub fn snapshot(&self) -> EngineSnapshot {
        let state = self.state.lock();
        EngineSnapshot {
            rooms: state.catalog.rooms().to_vec(),
            users: state.catalog.users().to_vec(),
            bookings: state.ledger.as_slice().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::parse_date;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn seeded() -> EngineState {
        let mut state = EngineState::default();
        state.catalog.upsert_room(RoomNumber(1), RoomType::Standard, 1000);
        state.catalog.register_user(UserId(1), 5000).unwrap();
        state
    }

    // === EngineState Internal Tests ===
    // validate() must never mutate; these poke it directly.

    #[test]
    fn validate_reports_first_failing_check() {
        let state = seeded();
        // Reversed dates and unknown user: the date check wins.
        let period = StayPeriod::new(date("08/07/2026"), date("07/07/2026"));
        assert_eq!(
            state.validate(UserId(9), RoomNumber(9), period),
            Err(BookingError::InvalidDateRange)
        );

        // Unknown user and room: the user check wins.
        let period = StayPeriod::new(date("07/07/2026"), date("08/07/2026"));
        assert_eq!(
            state.validate(UserId(9), RoomNumber(9), period),
            Err(BookingError::UserNotFound(UserId(9)))
        );
    }

    #[test]
    fn validate_prices_the_stay() {
        let state = seeded();
        let period = StayPeriod::new(date("07/07/2026"), date("10/07/2026"));
        let (room, total) = state.validate(UserId(1), RoomNumber(1), period).unwrap();
        assert_eq!(room.room_number, RoomNumber(1));
        assert_eq!(total, 3000);
        assert_eq!(state.catalog.user(UserId(1)).unwrap().balance, 5000);
        assert!(state.ledger.is_empty());
    }

    #[test]
    fn validate_detects_price_overflow() {
        let mut state = seeded();
        state.catalog.upsert_room(RoomNumber(2), RoomType::Suite, i64::MAX);
        let period = StayPeriod::new(date("07/07/2026"), date("09/07/2026"));
        assert_eq!(
            state.validate(UserId(1), RoomNumber(2), period),
            Err(BookingError::PriceOverflow)
        );
    }

    #[test]
    fn negative_price_credit_cannot_overflow_balance() {
        let mut state = EngineState::default();
        state.catalog.upsert_room(RoomNumber(1), RoomType::Standard, -1);
        state.catalog.register_user(UserId(1), i64::MAX).unwrap();
        let period = StayPeriod::new(date("07/07/2026"), date("08/07/2026"));

        assert_eq!(
            state.validate(UserId(1), RoomNumber(1), period),
            Err(BookingError::BalanceOverflow(-1))
        );
    }

    #[test]
    fn engine_rejects_overflowing_credit_without_mutation() {
        let engine = Engine::new();
        engine.upsert_room(RoomNumber(1), RoomType::Standard, -1);
        engine.register_user(UserId(1), i64::MAX).unwrap();

        let result = engine.book_room(UserId(1), RoomNumber(1), date("07/07/2026"), date("08/07/2026"));
        assert_eq!(result, Err(BookingError::BalanceOverflow(-1)));
        assert_eq!(engine.user(UserId(1)).unwrap().balance, i64::MAX);
        assert_eq!(engine.booking_count(), 0);
    }

    #[test]
    fn negative_price_credits_user() {
        let engine = Engine::new();
        engine.upsert_room(RoomNumber(1), RoomType::Standard, -100);
        engine.register_user(UserId(1), 0).unwrap();

        let booking = engine
            .book_room(UserId(1), RoomNumber(1), date("07/07/2026"), date("09/07/2026"))
            .unwrap();
        assert_eq!(booking.total_price, -200);
        assert_eq!(engine.user(UserId(1)).unwrap().balance, 200);
    }

    #[test]
    fn commit_snapshots_balance_after_charge() {
        let mut state = seeded();
        let period = StayPeriod::new(date("07/07/2026"), date("08/07/2026"));
        let (room, total) = state.validate(UserId(1), RoomNumber(1), period).unwrap();
        let booking = state.commit(UserId(1), room, period, total).unwrap();

        assert_eq!(booking.user.balance, 4000);
        assert_eq!(state.catalog.user(UserId(1)).unwrap().balance, 4000);
        assert_eq!(state.ledger.len(), 1);
    }
}
