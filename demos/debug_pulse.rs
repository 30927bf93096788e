//! Scripted single-pulse demo.
//!
//! Replays a fixed debug exchange: one full-velocity strike on output 0,
//! then the control changes that shape channel 0. The driver runs the
//! envelope to completion while a brightness bar renders per pass.
//!
//! Run with `RUST_LOG=debug` to see the stage transitions.

use std::io::{Write, stdout};

use anyhow::Result;
use glowworm::{ControlFunction, Driver, MemorySink, SystemClock};

const CHANNELS: usize = 16;
const LEDS: usize = 16;

fn main() -> Result<()> {
    env_logger::init();

    let mut driver =
        Driver::<CHANNELS, LEDS, _, _>::new(SystemClock::new(), MemorySink::<LEDS>::new());

    driver.note_on(0, 0, 127);
    driver.control_change(0, ControlFunction::Attack.control_number(), 70);
    driver.control_change(0, ControlFunction::Decay.control_number(), 90);
    driver.control_change(0, ControlFunction::Sustain.control_number(), 50);
    driver.control_change(0, ControlFunction::Release.control_number(), 100);
    driver.control_change(0, ControlFunction::JitterRate.control_number(), 0);
    driver.control_change(0, ControlFunction::JitterIntensity.control_number(), 0);
    driver.control_change(0, ControlFunction::BrightnessFloor.control_number(), 0);

    let mut out = stdout();
    while driver.rig().any_enabled() {
        driver.step();
        let brightness = driver.sink().get(0).unwrap_or(0);
        let bar = "#".repeat(usize::from(brightness) / 4);
        write!(out, "\r{brightness:3} |{bar:<64}|")?;
        out.flush()?;
    }
    println!();

    Ok(())
}
