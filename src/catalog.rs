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

//! Room and user catalogs.
//!
//! Entries live in insertion order so reports can walk them newest-first,
//! with a hash index on the key for lookups.

use crate::base::{RoomNumber, UserId};
use crate::error::CatalogError;
use crate::room::{Room, RoomType};
use crate::user::User;
use std::collections::HashMap;

/// Rooms and users keyed by number and ID.
#[derive(Debug, Default)]
pub struct Catalog {
    rooms: Vec<Room>,
    room_index: HashMap<RoomNumber, usize>,
    users: Vec<User>,
    user_index: HashMap<UserId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a room, or overwrites type and price of an existing one.
    ///
    /// Returns `true` when a new room was added.
    pub fn upsert_room(&mut self, room_number: RoomNumber, room_type: RoomType, price: i64) -> bool {
        match self.room_index.get(&room_number) {
            Some(&idx) => {
                let room = &mut self.rooms[idx];
                room.room_type = room_type;
                room.price_per_night = price;
                false
            }
            None => {
                self.room_index.insert(room_number, self.rooms.len());
                self.rooms.push(Room::new(room_number, room_type, price));
                true
            }
        }
    }

    /// Adds a user unless one with this ID already exists.
    ///
    /// An existing user is left untouched, balance included. Returns `Ok(true)`
    /// when a new user was added.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NegativeBalance`] if a new user would start below zero.
    pub fn register_user(&mut self, user_id: UserId, balance: i64) -> Result<bool, CatalogError> {
        if self.user_index.contains_key(&user_id) {
            return Ok(false);
        }
        if balance < 0 {
            return Err(CatalogError::NegativeBalance(user_id, balance));
        }
        self.user_index.insert(user_id, self.users.len());
        self.users.push(User::new(user_id, balance));
        Ok(true)
    }

    pub fn room(&self, room_number: RoomNumber) -> Option<&Room> {
        self.room_index.get(&room_number).map(|&idx| &self.rooms[idx])
    }

    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.user_index.get(&user_id).map(|&idx| &self.users[idx])
    }

    pub(crate) fn user_mut(&mut self, user_id: UserId) -> Option<&mut User> {
        let idx = *self.user_index.get(&user_id)?;
        Some(&mut self.users[idx])
    }

    /// Rooms in insertion order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Users in insertion order.
    pub fn users(&self) -> &[User] {
        &self.users
    }
}
