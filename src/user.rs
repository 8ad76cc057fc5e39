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

//! Users and their balances.

use crate::base::UserId;
use serde::{Deserialize, Serialize};

/// A user able to pay for bookings.
///
/// The balance never drops below zero: the engine only debits after checking
/// that the balance covers the charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user")]
    pub id: UserId,
    pub balance: i64,
}

impl User {
    pub fn new(id: UserId, balance: i64) -> Self {
        Self { id, balance }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= 0,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
    }

    /// Returns `true` if the balance covers `amount`.
    pub fn can_afford(&self, amount: i64) -> bool {
        self.balance >= amount
    }

    /// Balance left after paying `amount`, or `None` if it does not fit in an `i64`.
    pub fn balance_after(&self, amount: i64) -> Option<i64> {
        self.balance.checked_sub(amount)
    }

    /// Debits `amount`. Callers check [`User::can_afford`] first.
    ///
    /// Returns the new balance, or `None` (balance untouched) on overflow.
    pub(crate) fn charge(&mut self, amount: i64) -> Option<i64> {
        self.balance = self.balance_after(amount)?;
        self.assert_invariants();
        Some(self.balance)
    }
}
