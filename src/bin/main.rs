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

use clap::{Parser, ValueEnum};
use csv::{ReaderBuilder, Trim};
use hotel_booking_rs::{Engine, RoomNumber, RoomType, UserId, parse_date, report};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};

/// Hotel Booking - Replay booking command CSV files
///
/// Reads room, user and booking commands from a CSV file, applies them in
/// order and prints the resulting rooms, bookings and users to stdout.
/// Without a file, replays a built-in demo scenario.
#[derive(Parser, Debug)]
#[command(name = "hotel-booking")]
#[command(about = "An in-memory hotel room booking engine", long_about = None)]
struct Args {
    /// Path to CSV file with commands
    ///
    /// Expected format: type,user,room,room_type,amount,check_in,check_out
    /// Example: cargo run -- commands.csv > report.txt
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
}

/// Three rooms, two users, a handful of booking attempts, then room 1 re-priced.
const DEMO_SCRIPT: &str = "\
type,user,room,room_type,amount,check_in,check_out
room,,1,STANDARD,1000,,
room,,2,JUNIOR,2000,,
room,,3,SUITE,3000,,
user,1,,,5000,,
user,2,,,10000,,
book,1,2,,,30/06/2026,07/07/2026
book,1,2,,,07/07/2026,30/06/2026
book,1,1,,,07/07/2026,08/07/2026
book,2,1,,,07/07/2026,09/07/2026
book,2,3,,,07/07/2026,08/07/2026
room,,1,SUITE,10000,,
";

fn main() {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let result = match &args.input {
        Some(path) => {
            let file = match File::open(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Error opening file '{}': {}", path.display(), e);
                    process::exit(1);
                }
            };
            info!("Replaying commands from {}", path.display());
            process_commands(BufReader::new(file))
        }
        None => {
            info!("No input file given, replaying demo scenario");
            process_commands(DEMO_SCRIPT.as_bytes())
        }
    };

    let engine = match result {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error processing commands: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_report(&engine, args.format, io::stdout().lock()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `type, user, room, room_type, amount, check_in, check_out`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "type")]
    command: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    user: Option<u32>,
    #[serde(deserialize_with = "csv::invalid_option")]
    room: Option<u32>,
    room_type: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    amount: Option<i64>,
    check_in: Option<String>,
    check_out: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Room {
        room: RoomNumber,
        room_type: RoomType,
        price: i64,
    },
    User {
        user: UserId,
        balance: i64,
    },
    Book {
        user: UserId,
        room: RoomNumber,
        check_in: chrono::NaiveDate,
        check_out: chrono::NaiveDate,
    },
}

impl CsvRecord {
    /// Converts a CSV record into a command.
    ///
    /// Returns `None` for unknown command types, missing required fields or
    /// unparseable room types and dates.
    fn into_command(self) -> Option<Command> {
        match self.command.to_lowercase().as_str() {
            "room" => Some(Command::Room {
                room: RoomNumber(self.room?),
                room_type: self.room_type?.parse().ok()?,
                price: self.amount?,
            }),
            "user" => Some(Command::User {
                user: UserId(self.user?),
                balance: self.amount?,
            }),
            "book" => Some(Command::Book {
                user: UserId(self.user?),
                room: RoomNumber(self.room?),
                check_in: parse_date(&self.check_in?).ok()?,
                check_out: parse_date(&self.check_out?).ok()?,
            }),
            _ => None,
        }
    }
}

fn apply(engine: &Engine, command: Command) {
    match command {
        Command::Room {
            room,
            room_type,
            price,
        } => {
            engine.upsert_room(room, room_type, price);
        }
        Command::User { user, balance } => {
            if let Err(e) = engine.register_user(user, balance) {
                warn!("Skipping user {}: {}", user, e);
            }
        }
        Command::Book {
            user,
            room,
            check_in,
            check_out,
        } => {
            // Outcome is logged by the engine; a rejected booking does not stop the replay.
            let _ = engine.book_room(user, room, check_in, check_out);
        }
    }
}

/// Replays commands from a CSV reader against a fresh engine.
///
/// Rows are applied in file order. Malformed rows and rejected commands are
/// logged and skipped.
///
/// # CSV Format
///
/// Expected columns: `type, user, room, room_type, amount, check_in, check_out`
/// - `room`: needs `room`, `room_type`, `amount` (price per night)
/// - `user`: needs `user`, `amount` (opening balance)
/// - `book`: needs `user`, `room`, `check_in`, `check_out` (`dd/MM/yyyy`)
///
/// # Example
///
/// ```csv
/// type,user,room,room_type,amount,check_in,check_out
/// room,,1,STANDARD,1000,,
/// user,1,,,5000,,
/// book,1,1,,,07/07/2026,08/07/2026
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the header is unreadable.
pub fn process_commands<R: Read>(reader: R) -> Result<Engine, csv::Error> {
    let engine = Engine::new();

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for (line, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        match result {
            Ok(record) => {
                let Some(command) = record.into_command() else {
                    warn!("Skipping invalid command on row {}", line + 1);
                    continue;
                };
                apply(&engine, command);
            }
            Err(e) => {
                warn!("Skipping malformed row: {}", e);
            }
        }
    }

    Ok(engine)
}

/// Writes the report in the requested format.
fn write_report<W: Write>(engine: &Engine, format: OutputFormat, writer: W) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(engine, writer),
        OutputFormat::Csv => write_csv(engine, writer).map_err(io::Error::from),
    }
}

/// Writes the text reports, the rooms/bookings summary then the users.
fn write_text<W: Write>(engine: &Engine, mut writer: W) -> io::Result<()> {
    writeln!(writer, "\n------------------- Print All -------------------")?;
    report::write_summary(engine, &mut writer)?;
    writeln!(writer, "\n------------------- Print All Users -------------------")?;
    report::write_users(engine, &mut writer)?;
    writer.flush()
}

/// Writes rooms, bookings and users as three CSV blocks separated by blank lines.
fn write_csv<W: Write>(engine: &Engine, mut writer: W) -> Result<(), csv::Error> {
    report::write_rooms_csv(engine, &mut writer)?;
    writeln!(writer)?;
    report::write_bookings_csv(engine, &mut writer)?;
    writeln!(writer)?;
    report::write_users_csv(engine, &mut writer)?;
    Ok(())
}
