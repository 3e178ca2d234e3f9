// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! seatlock-cli - Interactive booking front-end
//!
//! Drives one in-process `BookingService` through a numbered menu. The
//! catalog is seeded at startup from `--seed <file>` (JSON) or from the
//! built-in sample program.
//!
//! # Usage
//!
//! ```bash
//! # Sample catalog, info logging
//! seatlock-cli
//!
//! # Custom catalog and verbose engine logs
//! seatlock-cli --seed catalog.json --log-level debug
//! ```

#![allow(clippy::uninlined_format_args)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use seatlock::BookingService;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;

use config::SeedConfig;

/// Interactive front-end for the seatlock reservation engine
#[derive(Parser, Debug)]
#[command(name = "seatlock-cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed file (JSON: movies, theaters, links)
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Start with an empty catalog instead of the sample program
    #[arg(long, conflicts_with = "seed")]
    empty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let service = BookingService::new();
    if !args.empty {
        let seed = match args.seed {
            Some(path) => {
                info!("loading seed from {:?}", path);
                SeedConfig::from_file(&path)?
            }
            None => SeedConfig::default(),
        };
        let linked = seed.apply(&service);
        info!(
            movies = seed.movies.len(),
            theaters = seed.theaters.len(),
            linked,
            "catalog seeded"
        );
    }

    println!("=================================");
    println!("seatlock - Movie Booking System");
    println!("=================================");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu();
        let Some(choice) = read_trimmed(&mut lines) else {
            break;
        };

        match choice.as_str() {
            "1" => view_all_movies(&service),
            "2" => view_theaters(&service, &mut lines),
            "3" => view_available_seats(&service, &mut lines),
            "4" => book_seats(&service, &mut lines),
            "5" => view_booking(&service, &mut lines),
            "6" => view_occupancy(&service, &mut lines),
            "7" => {
                println!("\nThank you for using the booking system!");
                break;
            }
            "" => {}
            _ => println!("\nInvalid choice. Please try again."),
        }
    }

    Ok(())
}

fn print_menu() {
    println!("\n--- Main Menu ---");
    println!("1. View all movies");
    println!("2. Select movie and view theaters");
    println!("3. View available seats");
    println!("4. Book seats");
    println!("5. View booking details");
    println!("6. View occupancy statistics");
    println!("7. Exit");
    print!("\nEnter choice: ");
    let _ = io::stdout().flush();
}

/// Next input line, trimmed. None on EOF or read error.
fn read_trimmed(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    match lines.next() {
        Some(Ok(line)) => Some(line.trim().to_string()),
        _ => None,
    }
}

/// Prompt for an unsigned integer; None on EOF or unparseable input.
fn prompt_u32(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> Option<u32> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let line = read_trimmed(lines)?;
    match line.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            println!("Not a number: {:?}", line);
            None
        }
    }
}

fn prompt_u64(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> Option<u64> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let line = read_trimmed(lines)?;
    match line.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            println!("Not a number: {:?}", line);
            None
        }
    }
}

fn view_all_movies(service: &BookingService) {
    println!("\n--- All Movies ---");
    for movie in service.all_movies() {
        println!("ID: {} | Title: {}", movie.id, movie.title);
    }
}

fn view_theaters(
    service: &BookingService,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) {
    let Some(movie_id) = prompt_u32(lines, "\nEnter Movie ID: ") else {
        return;
    };
    let Some(movie) = service.get_movie(movie_id) else {
        println!("Movie not found!");
        return;
    };

    println!("\nMovie: {}", movie.title);
    let theaters = service.theaters_for(movie_id);
    if theaters.is_empty() {
        println!("No theaters showing this movie.");
        return;
    }

    println!("\n--- Theaters ---");
    for theater in theaters {
        println!("ID: {} | Name: {}", theater.id, theater.name);
    }
}

fn view_available_seats(
    service: &BookingService,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) {
    let Some(movie_id) = prompt_u32(lines, "\nEnter Movie ID: ") else {
        return;
    };
    let Some(theater_id) = prompt_u32(lines, "Enter Theater ID: ") else {
        return;
    };

    let seats = service.available_seats(movie_id, theater_id);
    println!("\n--- Available Seats ---");
    println!("Total available: {} seats", seats.len());
    if seats.is_empty() {
        println!("No seats available!");
    } else {
        println!("Seats: {}", seats.join(", "));
    }
}

fn book_seats(
    service: &BookingService,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) {
    let Some(movie_id) = prompt_u32(lines, "\nEnter Movie ID: ") else {
        return;
    };
    let Some(theater_id) = prompt_u32(lines, "Enter Theater ID: ") else {
        return;
    };

    print!("Enter seat IDs (comma-separated, e.g. a1,a2,a3): ");
    let _ = io::stdout().flush();
    let Some(input) = read_trimmed(lines) else {
        return;
    };

    let seats: Vec<&str> = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    match service.reserve(movie_id, theater_id, &seats) {
        Ok(booking) => {
            println!("\n[OK] Booking successful!");
            println!("Booking ID: {}", booking.id);
            println!("Seats booked: {}", booking.seats.join(", "));
        }
        Err(e) => println!("\n[FAIL] Booking failed: {}", e),
    }
}

fn view_booking(
    service: &BookingService,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) {
    let Some(booking_id) = prompt_u64(lines, "\nEnter Booking ID: ") else {
        return;
    };
    let Some(booking) = service.get_booking(booking_id) else {
        println!("Booking not found!");
        return;
    };

    println!("\n--- Booking Details ---");
    println!("Booking ID: {}", booking.id);
    println!("Movie ID: {}", booking.movie_id);
    println!("Theater ID: {}", booking.theater_id);
    println!("Seats: {}", booking.seats.join(", "));
}

fn view_occupancy(
    service: &BookingService,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) {
    let Some(movie_id) = prompt_u32(lines, "\nEnter Movie ID: ") else {
        return;
    };
    let Some(theater_id) = prompt_u32(lines, "Enter Theater ID: ") else {
        return;
    };

    let available = service.available_count(movie_id, theater_id);
    let occupancy = service.occupancy_percent(movie_id, theater_id);

    println!("\n--- Statistics ---");
    println!("Available seats: {} / 20", available);
    println!("Occupied seats: {} / 20", 20 - available);
    println!("Occupancy: {:.1}%", occupancy);
}
