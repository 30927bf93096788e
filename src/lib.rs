//! Glowworm - ADSR brightness envelopes for addressable lights.
//!
//! This library animates a bank of independently addressable LED outputs
//! whose brightness follows an ADSR (Attack/Decay/Sustain/Release) envelope.
//! Envelopes are triggered by MIDI-style note-on/note-off events, peak
//! brightness comes from note velocity, and the envelope shape is configured
//! per channel through control-change messages.
//!
//! The crate is deliberately narrow: message transport, physical LED output
//! and host scheduling all live behind small traits ([`Clock`],
//! [`BrightnessSink`]) or plain event values ([`MidiEvent`]), so the same
//! engine runs against real hardware, a terminal visualisation, or a
//! scripted test timeline.
//!
//! # Examples
//!
//! ```
//! use glowworm::{ControlFunction, Driver, ManualClock, MemorySink};
//! use std::time::Duration;
//!
//! let mut driver = Driver::<16, 16, _, _>::new(ManualClock::new(), MemorySink::<16>::new())
//!     .with_pacing(Duration::ZERO);
//!
//! // Shape channel 0: slow attack, medium decay, half sustain, long release.
//! driver.control_change(0, ControlFunction::Attack.control_number(), 70);
//! driver.control_change(0, ControlFunction::Decay.control_number(), 90);
//! driver.control_change(0, ControlFunction::Sustain.control_number(), 50);
//! driver.control_change(0, ControlFunction::Release.control_number(), 100);
//!
//! // Strike output 0 at full velocity and watch it brighten.
//! driver.note_on(0, 0, 127);
//! driver.clock().advance(100);
//! driver.step();
//! assert!(driver.sink().get(0).unwrap() > 0);
//! ```

pub mod clock;
pub mod driver;
pub mod envelope;
pub mod midi;
pub mod rig;
pub mod sink;

// Re-export commonly used types at the crate root
pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::Driver;
pub use envelope::{EnvelopeParams, EnvelopeStage, LightSlot};
pub use midi::{ControlFunction, MidiEvent, control_to_brightness, control_to_duration_ms};
pub use rig::LightRig;
pub use sink::{BrightnessSink, MemorySink};
