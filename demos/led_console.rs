//! Interactive LED bank demo.
//!
//! Keys 1-8 strike outputs 0-7 at full velocity; releasing a key sends the
//! note-off. The bank renders as a row of blocks whose colour tracks each
//! slot's brightness. Press Q or ESC to quit.
//!
//! Key release detection needs the kitty keyboard protocol, so run this in
//! a terminal that supports keyboard enhancement flags.

use std::io::{Write, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{Color, ResetColor, SetForegroundColor},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use glowworm::{ControlFunction, Driver, MemorySink, SystemClock};

const CHANNELS: usize = 16;
const LEDS: usize = 8;

fn key_to_pitch(code: KeyCode) -> Option<u8> {
    match code {
        KeyCode::Char(c @ '1'..='8') => Some(c as u8 - b'1'),
        _ => None,
    }
}

fn draw(frame: &[u8; LEDS]) -> Result<()> {
    let mut out = stdout();
    out.execute(cursor::MoveTo(0, 2))?;
    for &brightness in frame {
        out.execute(SetForegroundColor(Color::Rgb {
            r: brightness,
            g: brightness,
            b: 0,
        }))?;
        write!(out, " ██ ")?;
    }
    out.execute(ResetColor)?;
    out.flush()?;
    Ok(())
}

fn run(driver: &mut Driver<CHANNELS, LEDS, SystemClock, MemorySink<LEDS>>) -> Result<()> {
    loop {
        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                match (code, kind) {
                    (KeyCode::Char('q') | KeyCode::Esc, KeyEventKind::Press) => return Ok(()),
                    (code, KeyEventKind::Press) => {
                        if let Some(pitch) = key_to_pitch(code) {
                            driver.note_on(0, pitch, 127);
                        }
                    }
                    (code, KeyEventKind::Release) => {
                        if let Some(pitch) = key_to_pitch(code) {
                            driver.note_off(0, pitch, 0);
                        }
                    }
                    _ => {}
                }
            }
        }

        driver.step();
        draw(driver.sink().frame())?;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut driver =
        Driver::<CHANNELS, LEDS, _, _>::new(SystemClock::new(), MemorySink::<LEDS>::new())
            .with_pacing(Duration::ZERO);

    // A plucky default shape on channel 0.
    driver.control_change(0, ControlFunction::Attack.control_number(), 40);
    driver.control_change(0, ControlFunction::Decay.control_number(), 80);
    driver.control_change(0, ControlFunction::Sustain.control_number(), 40);
    driver.control_change(0, ControlFunction::Release.control_number(), 90);

    enable_raw_mode()?;
    let mut out = stdout();
    out.execute(EnterAlternateScreen)?;
    out.execute(PushKeyboardEnhancementFlags(
        KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
    ))?;
    out.execute(cursor::Hide)?;
    out.execute(cursor::MoveTo(0, 0))?;
    write!(out, "1-8 strike a light, Q quits")?;
    out.flush()?;

    let result = run(&mut driver);

    stdout().execute(PopKeyboardEnhancementFlags)?;
    stdout().execute(cursor::Show)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;

    result
}
