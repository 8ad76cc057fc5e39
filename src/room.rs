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

//! Rooms and room types.

use crate::base::RoomNumber;
use crate::error::RoomTypeParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Standard,
    Junior,
    Suite,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Standard => "STANDARD",
            RoomType::Junior => "JUNIOR",
            RoomType::Suite => "SUITE",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = RoomTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STANDARD" => Ok(RoomType::Standard),
            "JUNIOR" => Ok(RoomType::Junior),
            "SUITE" => Ok(RoomType::Suite),
            _ => Err(RoomTypeParseError {
                input: s.to_string(),
            }),
        }
    }
}

/// A bookable room.
///
/// Prices are whole currency units per night and are not validated; a zero
/// or negative price is stored as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "room")]
    pub room_number: RoomNumber,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(rename = "price")]
    pub price_per_night: i64,
}

impl Room {
    pub fn new(room_number: RoomNumber, room_type: RoomType, price_per_night: i64) -> Self {
        Self {
            room_number,
            room_type,
            price_per_night,
        }
    }
}
