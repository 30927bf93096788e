//! Cooperative tick loop that animates a bank of lights.

use std::thread;
use std::time::Duration;

use crate::clock::Clock;
use crate::midi::MidiEvent;
use crate::rig::LightRig;
use crate::sink::BrightnessSink;

/// Single-threaded driver that owns a rig, a clock and a sink.
///
/// The driver repeatedly walks every slot in fixed index order, evaluates
/// each enabled slot exactly once per pass, and forwards the resulting
/// brightness to the sink. A small pacing delay after each evaluated slot
/// approximates real-time output cadence; correctness never depends on it,
/// because every evaluation reads the clock directly.
///
/// Slots publish a `next_action_ms` hint, but the driver re-evaluates every
/// enabled slot on every pass regardless; the hint is available to hosts
/// that want to schedule more lazily.
///
/// Events may arrive between passes at any time; a note-off redirects its
/// slot to the release stage no matter where the envelope currently is.
///
/// # Examples
///
/// ```
/// use glowworm::{Driver, ManualClock, MemorySink};
/// use std::time::Duration;
///
/// let mut driver = Driver::<16, 16, _, _>::new(ManualClock::new(), MemorySink::<16>::new())
///     .with_pacing(Duration::ZERO);
///
/// driver.note_on(0, 0, 127);
/// driver.clock().advance(5);
/// driver.step();
///
/// // Zeroed parameters run a degenerate envelope, but the slot is lit.
/// assert!(driver.rig().any_enabled());
/// ```
pub struct Driver<const CHANNELS: usize, const LEDS: usize, C, S>
where
    C: Clock,
    S: BrightnessSink,
{
    rig: LightRig<CHANNELS, LEDS>,
    clock: C,
    sink: S,
    pacing: Duration,
}

impl<const CHANNELS: usize, const LEDS: usize, C, S> Driver<CHANNELS, LEDS, C, S>
where
    C: Clock,
    S: BrightnessSink,
{
    /// Creates a driver with a fresh rig and the default 1 ms pacing delay.
    pub fn new(clock: C, sink: S) -> Self {
        Self {
            rig: LightRig::new(),
            clock,
            sink,
            pacing: Duration::from_millis(1),
        }
    }

    /// Sets the pacing delay inserted after each evaluated slot.
    ///
    /// `Duration::ZERO` disables pacing entirely, which is what simulations
    /// and tests usually want.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Strikes an output, stamped with the current clock time.
    pub fn note_on(&mut self, channel: u8, pitch: u8, velocity: u8) {
        let now_ms = self.clock.now_ms();
        self.rig.note_on(channel, pitch, velocity, now_ms);
    }

    /// Releases an output, stamped with the current clock time.
    pub fn note_off(&mut self, channel: u8, pitch: u8, velocity: u8) {
        let now_ms = self.clock.now_ms();
        self.rig.note_off(channel, pitch, velocity, now_ms);
    }

    /// Updates one channel parameter.
    pub fn control_change(&mut self, channel: u8, control: u8, value: u8) {
        self.rig.control_change(channel, control, value);
    }

    /// Routes one event, stamped with the current clock time.
    pub fn apply(&mut self, event: MidiEvent) {
        let now_ms = self.clock.now_ms();
        self.rig.apply(event, now_ms);
    }

    /// One pass over the bank.
    ///
    /// Each enabled slot is evaluated once with a fresh clock read, its
    /// brightness written to the sink, and the pacing delay applied. Returns
    /// the number of slots evaluated.
    pub fn step(&mut self) -> usize {
        let mut evaluated = 0;
        for index in 0..LEDS {
            let now_ms = self.clock.now_ms();
            if let Some(brightness) = self.rig.advance_slot(index, now_ms) {
                self.sink.write(index, brightness);
                evaluated += 1;
                if !self.pacing.is_zero() {
                    thread::sleep(self.pacing);
                }
            }
        }
        evaluated
    }

    /// Runs passes until no slot is animating.
    ///
    /// A completed envelope disables only its own slot; the loop keeps going
    /// while any other slot is still enabled.
    pub fn run_until_idle(&mut self) {
        while self.rig.any_enabled() {
            self.step();
        }
    }

    /// The owned rig.
    pub fn rig(&self) -> &LightRig<CHANNELS, LEDS> {
        &self.rig
    }

    /// Mutable access to the rig, for direct parameter configuration.
    pub fn rig_mut(&mut self) -> &mut LightRig<CHANNELS, LEDS> {
        &mut self.rig
    }

    /// The owned clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The owned sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
