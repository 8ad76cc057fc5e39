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

//! Human-readable and CSV reports.
//!
//! Every report lists entries newest-first: the most recently registered room
//! or user, or the most recently committed booking, comes first.
//!
//! # Text Format
//!
//! ```text
//! Rooms:
//! Room 3 - SUITE - 3000
//! Room 1 - STANDARD - 1000
//!
//! Bookings:
//! User 1 booked Room 1 (STANDARD) from 07/07/2026 to 08/07/2026 Total: 1000
//! ```

use crate::booking::format_date;
use crate::engine::Engine;
use csv::Writer;
use serde::Serialize;
use std::io::{self, Write};

/// Writes the rooms and bookings sections.
///
/// Bookings show the room type captured when the booking was made, not the
/// room's current type.
pub fn write_summary<W: Write>(engine: &Engine, mut writer: W) -> io::Result<()> {
    let snapshot = engine.snapshot();

    writeln!(writer, "Rooms:")?;
    for room in snapshot.rooms.iter().rev() {
        writeln!(
            writer,
            "Room {} - {} - {}",
            room.room_number, room.room_type, room.price_per_night
        )?;
    }

    writeln!(writer, "\nBookings:")?;
    for booking in snapshot.bookings.iter().rev() {
        writeln!(
            writer,
            "User {} booked Room {} ({}) from {} to {} Total: {}",
            booking.user.id,
            booking.room.room_number,
            booking.room.room_type,
            format_date(booking.period.check_in),
            format_date(booking.period.check_out),
            booking.total_price
        )?;
    }
    Ok(())
}

/// Writes the users section with current balances.
pub fn write_users<W: Write>(engine: &Engine, mut writer: W) -> io::Result<()> {
    writeln!(writer, "Users:")?;
    for user in engine.users().iter().rev() {
        writeln!(writer, "User {} - Balance: {}", user.id, user.balance)?;
    }
    Ok(())
}

fn write_csv<W: Write, T: Serialize>(records: &[T], writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    for record in records.iter().rev() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes rooms as CSV.
///
/// Columns: `room, type, price`
pub fn write_rooms_csv<W: Write>(engine: &Engine, writer: W) -> Result<(), csv::Error> {
    write_csv(&engine.rooms(), writer)
}

/// Writes users as CSV.
///
/// Columns: `user, balance`
pub fn write_users_csv<W: Write>(engine: &Engine, writer: W) -> Result<(), csv::Error> {
    write_csv(&engine.users(), writer)
}

/// Writes bookings as CSV.
///
/// Columns: `user, room, type, check_in, check_out, nights, total, balance_after`
pub fn write_bookings_csv<W: Write>(engine: &Engine, writer: W) -> Result<(), csv::Error> {
    write_csv(&engine.bookings(), writer)
}
