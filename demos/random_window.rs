//! Demonstration of moving sums over random data.
//!
//! This example shows how to:
//! 1. Compute a moving sum over a fresh copy of the data
//! 2. Sum a field of structured records
//! 3. Reuse the input buffer for the output
//!
//! Run with: cargo run --example random_window

use rand::Rng;

use msum::{moving_sum, moving_sum_by, windowed_sum, ReturnMode};

struct Reading {
    sensor: usize,
    value: f64,
}

fn main() {
    println!("msum - Random Window Demo");
    println!("=========================");
    println!();

    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..50).map(|_| rng.gen::<f64>() * 100.0).collect();

    // Compute the moving sum
    let sums = match moving_sum(&data, 8) {
        Ok(sums) => sums,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };
    println!("{} values, window 8 -> {} sums", data.len(), sums.len());
    for sum in &sums {
        println!("{sum:.3}");
    }
    println!();

    // Sum a field of each record
    let readings: Vec<Reading> = (0..10)
        .map(|i| Reading {
            sensor: i % 3,
            value: rng.gen_range(0.0..10.0),
        })
        .collect();
    match moving_sum_by(&readings, 4, |r| r.value) {
        Ok(sums) => {
            let sensors: Vec<usize> = readings.iter().map(|r| r.sensor).collect();
            println!("Sensors: {sensors:?}");
            println!("Reading sums (window 4): {sums:.2?}");
        }
        Err(e) => eprintln!("Error: {e}"),
    }
    println!();

    // Overwrite the input buffer
    let mut counts: Vec<u32> = (0..12).map(|_| rng.gen_range(0..10)).collect();
    println!("Counts: {counts:?}");
    match windowed_sum(&mut counts, 3, ReturnMode::InPlace) {
        Ok(sums) => println!("In-place sums (window 3, aliased: {}): {:?}", sums.is_aliased(), &*sums),
        Err(e) => eprintln!("Error: {e}"),
    }
    println!("Buffer now holds {} values", counts.len());
}
