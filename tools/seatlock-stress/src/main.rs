// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! seatlock-stress - Contention stress tool
//!
//! Hammers one screening with many threads and verifies the engine's
//! guarantees hold under real scheduling: single winner per seat, no torn
//! multi-seat reservations, dense booking ids.

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

use clap::{Parser, Subcommand};
use seatlock::{BookingService, MAX_SEATS};

/// Seatlock contention stress tool
#[derive(Parser, Debug)]
#[command(name = "seatlock-stress")]
#[command(version = "0.1.0")]
#[command(about = "Stress the lock-free reservation path with many threads")]
struct Args {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// All threads race for one seat; exactly one must win
    Race {
        /// Number of racing threads
        #[arg(short = 'n', long, default_value = "1000")]
        threads: usize,

        /// Seat everyone fights over
        #[arg(short, long, default_value = "a1")]
        seat: String,

        /// Race iterations (fresh screening each round)
        #[arg(short, long, default_value = "10")]
        rounds: usize,
    },

    /// Thread i goes for seat (i mod 20) + 1; exactly twenty must win
    Rotate {
        /// Number of threads
        #[arg(short = 'n', long, default_value = "1000")]
        threads: usize,
    },

    /// Saturate a screening with random-ish batches, then verify rejection
    Fill {
        /// Number of booking threads
        #[arg(short = 'n', long, default_value = "100")]
        threads: usize,

        /// Seats per booking attempt
        #[arg(short, long, default_value = "2")]
        batch: usize,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match args.mode {
        Mode::Race {
            threads,
            seat,
            rounds,
        } => run_race(threads, &seat, rounds),
        Mode::Rotate { threads } => run_rotate(threads),
        Mode::Fill { threads, batch } => run_fill(threads, batch),
    }
}

fn seeded() -> Arc<BookingService> {
    let service = BookingService::new();
    service.add_movie(1, "Stress Movie");
    service.add_theater(1, "Stress Theater");
    assert!(service.link(1, 1));
    Arc::new(service)
}

fn run_race(threads: usize, seat: &str, rounds: usize) {
    println!("=== Race: {} threads, seat {}, {} rounds ===\n", threads, seat, rounds);

    for round in 1..=rounds {
        let service = seeded();
        let barrier = Arc::new(Barrier::new(threads));
        let attempts = Arc::new(AtomicU64::new(0));

        let start = Instant::now();
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let service = Arc::clone(&service);
                let barrier = Arc::clone(&barrier);
                let attempts = Arc::clone(&attempts);
                let seat = seat.to_string();
                thread::spawn(move || {
                    barrier.wait();
                    attempts.fetch_add(1, Ordering::Relaxed);
                    service.reserve(1, 1, &[seat.as_str()]).ok().map(|_| i)
                })
            })
            .collect();

        let winners: Vec<usize> = handles
            .into_iter()
            .filter_map(|h| h.join().expect("thread panicked"))
            .collect();
        let elapsed = start.elapsed();

        assert_eq!(winners.len(), 1, "round {}: expected exactly one winner", round);
        println!(
            "round {:2}: thread {:4} won, {} losers, {:.2?} total, {:.0} attempts/s",
            round,
            winners[0],
            threads - 1,
            elapsed,
            attempts.load(Ordering::Relaxed) as f64 / elapsed.as_secs_f64(),
        );
    }

    println!("\n[OK] every round produced exactly one winner");
}

fn run_rotate(threads: usize) {
    println!("=== Rotate: {} threads over {} seats ===\n", threads, MAX_SEATS);

    let service = seeded();
    let barrier = Arc::new(Barrier::new(threads));

    let start = Instant::now();
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            let seat = format!("a{}", (i as u32 % MAX_SEATS) + 1);
            thread::spawn(move || {
                barrier.wait();
                service.reserve(1, 1, &[seat.as_str()]).is_ok()
            })
        })
        .collect();

    let wins = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .filter(|&won| won)
        .count();
    let elapsed = start.elapsed();

    println!("winners: {} / {}", wins, threads);
    println!("available after: {}", service.available_count(1, 1));
    println!("bookings logged: {}", service.booking_count());
    println!(
        "elapsed: {:.2?} ({:.0} reservations/s attempted)",
        elapsed,
        threads as f64 / elapsed.as_secs_f64()
    );

    assert_eq!(wins, MAX_SEATS as usize);
    assert_eq!(service.available_count(1, 1), 0);
    println!("\n[OK] exactly {} winners, screening full", MAX_SEATS);
}

fn run_fill(threads: usize, batch: usize) {
    assert!(threads >= 1, "need at least one booking thread");
    assert!(
        (1..=MAX_SEATS as usize).contains(&batch),
        "batch must be 1..={}",
        MAX_SEATS
    );
    println!("=== Fill: {} threads, batches of {} ===\n", threads, batch);

    let service = seeded();
    let barrier = Arc::new(Barrier::new(threads));
    let successes = Arc::new(AtomicU64::new(0));
    let rejections = Arc::new(AtomicU64::new(0));

    let start = Instant::now();
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            let successes = Arc::clone(&successes);
            let rejections = Arc::clone(&rejections);
            // Deterministic overlapping batches: start at seat i, wrap around
            let seats: Vec<String> = (0..batch)
                .map(|k| format!("a{}", ((i + k) as u32 % MAX_SEATS) + 1))
                .collect();
            thread::spawn(move || {
                barrier.wait();
                if service.reserve(1, 1, &seats).is_ok() {
                    successes.fetch_add(1, Ordering::Relaxed);
                } else {
                    rejections.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().expect("thread panicked");
    }
    let elapsed = start.elapsed();

    let booked = MAX_SEATS - service.available_count(1, 1);
    println!("successes:  {}", successes.load(Ordering::Relaxed));
    println!("rejections: {}", rejections.load(Ordering::Relaxed));
    println!("seats booked: {} / {}", booked, MAX_SEATS);
    println!("elapsed: {:.2?}", elapsed);

    // Seats acquired must exactly match batch accounting
    assert_eq!(
        u64::from(booked),
        successes.load(Ordering::Relaxed) * batch as u64,
        "no torn batches"
    );

    // The screening can never over-fill, so a final full-batch try fails
    let all: Vec<String> = (1..=MAX_SEATS).map(|n| format!("a{}", n)).collect();
    assert!(service.reserve(1, 1, &all).is_err());
    println!("\n[OK] batch accounting exact, no torn reservations");
}
