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

//! Concurrent access tests.
//!
//! Several threads hammer one engine at once. The engine's lock must keep the
//! check-then-commit sequence atomic: a room and night is sold at most once
//! and no balance is charged twice or driven negative.
//!
//! parking_lot's `deadlock_detection` feature is on for tests, so a watcher
//! thread flags any lock cycle.

use chrono::{Days, NaiveDate};
use hotel_booking_rs::{BookingError, Engine, RoomNumber, RoomType, UserId};
use parking_lot::deadlock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

// === Deadlock Detection ===

struct DeadlockWatch {
    running: Arc<AtomicBool>,
    detected: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

fn start_deadlock_detector() -> DeadlockWatch {
    let running = Arc::new(AtomicBool::new(true));
    let detected = Arc::new(AtomicBool::new(false));
    let (running_clone, detected_clone) = (running.clone(), detected.clone());

    let handle = thread::spawn(move || {
        while running_clone.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(50));
            let deadlocks = deadlock::check_deadlock();
            if !deadlocks.is_empty() {
                eprintln!("\n=== DEADLOCK DETECTED ===");
                for (i, threads) in deadlocks.iter().enumerate() {
                    eprintln!("\nDeadlock #{}", i + 1);
                    for t in threads {
                        eprintln!("Thread ID: {:?}", t.thread_id());
                        eprintln!("Backtrace:\n{:#?}", t.backtrace());
                    }
                }
                detected_clone.store(true, Ordering::SeqCst);
                return;
            }
        }
    });

    DeadlockWatch {
        running,
        detected,
        handle,
    }
}

fn stop_deadlock_detector(watch: DeadlockWatch) {
    watch.running.store(false, Ordering::SeqCst);
    watch.handle.join().unwrap();
    assert!(
        !watch.detected.load(Ordering::SeqCst),
        "Deadlock detected! See output above for details."
    );
}

// === Helpers ===

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 1).unwrap() + Days::new(offset)
}

// === Tests ===

#[test]
fn racing_for_same_room_and_dates_sells_once() {
    let watch = start_deadlock_detector();
    let engine = Arc::new(Engine::new());
    engine.upsert_room(RoomNumber(1), RoomType::Suite, 3000);
    for id in 1..=16 {
        engine.register_user(UserId(id), 10_000).unwrap();
    }

    let successes = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (1..=16)
        .map(|id| {
            let engine = Arc::clone(&engine);
            let successes = Arc::clone(&successes);
            thread::spawn(move || {
                match engine.book_room(UserId(id), RoomNumber(1), day(6), day(8)) {
                    Ok(_) => {
                        successes.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => assert_eq!(e, BookingError::RoomOverlap(RoomNumber(1))),
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(successes.load(Ordering::SeqCst), 1);
    assert_eq!(engine.booking_count(), 1);
    let charged = engine
        .users()
        .iter()
        .filter(|u| u.balance == 4_000)
        .count();
    assert_eq!(charged, 1);

    stop_deadlock_detector(watch);
}

#[test]
fn one_user_spending_from_many_threads_never_overdraws() {
    let watch = start_deadlock_detector();
    let engine = Arc::new(Engine::new());
    for room in 1..=20 {
        engine.upsert_room(RoomNumber(room), RoomType::Standard, 1000);
    }
    // Enough for exactly 7 one-night stays.
    engine.register_user(UserId(1), 7_000).unwrap();

    let handles: Vec<_> = (1..=20)
        .map(|room| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let _ = engine.book_room(UserId(1), RoomNumber(room), day(0), day(1));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.booking_count(), 7);
    assert_eq!(engine.user(UserId(1)).unwrap().balance, 0);

    stop_deadlock_detector(watch);
}

#[test]
fn reads_and_upserts_during_bookings() {
    let watch = start_deadlock_detector();
    let engine = Arc::new(Engine::new());
    for room in 1..=4 {
        engine.upsert_room(RoomNumber(room), RoomType::Junior, 100);
    }
    for id in 1..=4 {
        engine.register_user(UserId(id), 1_000_000).unwrap();
    }

    let mut handles = Vec::new();
    for id in 1..=4u32 {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            for night in 0..50u64 {
                let _ = engine.book_room(UserId(id), RoomNumber(id), day(night), day(night + 1));
            }
        }));
    }
    {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            for i in 0..200 {
                let _ = engine.snapshot();
                engine.upsert_room(RoomNumber(1 + i % 4), RoomType::Junior, 100);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.booking_count(), 200);
    assert_eq!(engine.rooms().len(), 4);

    stop_deadlock_detector(watch);
}
