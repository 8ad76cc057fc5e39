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

//! Append-only booking ledger.
//!
//! Keeps accepted bookings in commit order, plus a per-room index so the
//! availability check only walks bookings for the room being requested.

use crate::base::RoomNumber;
use crate::booking::Booking;
use std::collections::HashMap;

/// Accepted bookings. Entries are never modified or removed.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
    /// Ledger positions per room.
    by_room: HashMap<RoomNumber, Vec<usize>>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, booking: Booking) {
        self.by_room
            .entry(booking.room.room_number)
            .or_default()
            .push(self.bookings.len());
        self.bookings.push(booking);
    }

    /// Bookings made for `room_number`, oldest first.
    pub fn for_room(&self, room_number: RoomNumber) -> impl Iterator<Item = &Booking> {
        self.by_room
            .get(&room_number)
            .into_iter()
            .flatten()
            .map(|&idx| &self.bookings[idx])
    }

    /// All bookings in commit order.
    pub fn as_slice(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
