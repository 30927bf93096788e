//! Random pulse shower across the whole bank.
//!
//! Strikes random outputs with random velocities for ten seconds, then lets
//! every envelope play out. The bank renders as a row of intensity digits.

use std::io::{Write, stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use glowworm::{ControlFunction, Driver, MemorySink, SystemClock};
use rand::Rng;

const CHANNELS: usize = 16;
const LEDS: usize = 16;

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = rand::thread_rng();
    let mut driver =
        Driver::<CHANNELS, LEDS, _, _>::new(SystemClock::new(), MemorySink::<LEDS>::new());

    driver.control_change(0, ControlFunction::Attack.control_number(), 55);
    driver.control_change(0, ControlFunction::Decay.control_number(), 75);
    driver.control_change(0, ControlFunction::Sustain.control_number(), 30);
    driver.control_change(0, ControlFunction::Release.control_number(), 85);

    let mut out = stdout();
    let started = Instant::now();
    let shower = Duration::from_secs(10);
    let mut next_strike = Duration::ZERO;

    while started.elapsed() < shower || driver.rig().any_enabled() {
        if started.elapsed() < shower && started.elapsed() >= next_strike {
            let pitch = rng.gen_range(0..LEDS as u8);
            let velocity = rng.gen_range(32..=127);
            driver.note_on(0, pitch, velocity);
            next_strike = started.elapsed() + Duration::from_millis(rng.gen_range(100..600));
        }

        if driver.step() == 0 {
            thread::sleep(Duration::from_millis(5));
        }

        let cells: String = driver
            .sink()
            .frame()
            .iter()
            .map(|&b| char::from_digit(u32::from(b) / 32, 10).unwrap_or('#'))
            .collect();
        write!(out, "\r[{cells}]")?;
        out.flush()?;
    }
    println!();

    Ok(())
}
