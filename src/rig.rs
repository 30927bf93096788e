//! Fixed-capacity channel/slot context and event routing.

use log::trace;

use crate::envelope::{EnvelopeParams, LightSlot};
use crate::midi::{ControlFunction, MidiEvent};
use crate::sink::BrightnessSink;

/// The owning context for a bank of lights: one parameter set per channel,
/// one slot per addressable output.
///
/// Both tables are fixed-capacity arrays chosen at compile time, so the
/// per-evaluation path never allocates. Slots reference their channel by
/// index and the rig resolves that index on every evaluation, which is how
/// control changes reach envelopes already in flight.
///
/// Routing follows the event contract: out-of-range pitches and channels and
/// unknown control numbers are silent no-ops, indistinguishable from success.
///
/// # Examples
///
/// ```
/// use glowworm::{ControlFunction, LightRig, MemorySink};
///
/// let mut rig = LightRig::<16, 16>::new();
/// let mut sink = MemorySink::<16>::new();
///
/// // Shape channel 0, then strike output 3 at full velocity.
/// rig.control_change(0, ControlFunction::Attack.control_number(), 70);
/// rig.note_on(0, 3, 127, 0);
///
/// // One evaluation pass at t = 100 ms.
/// rig.tick(100, &mut sink);
/// assert!(sink.get(3).unwrap() > 0);
/// ```
pub struct LightRig<const CHANNELS: usize, const LEDS: usize> {
    channels: [EnvelopeParams; CHANNELS],
    slots: [LightSlot; LEDS],
}

impl<const CHANNELS: usize, const LEDS: usize> LightRig<CHANNELS, LEDS> {
    /// Creates a rig with all channels zeroed and all slots inert.
    pub fn new() -> Self {
        Self {
            channels: std::array::from_fn(|_| EnvelopeParams::default()),
            slots: std::array::from_fn(|_| LightSlot::default()),
        }
    }

    /// Strikes the slot for `pitch`, binding it to `channel`.
    ///
    /// The slot is fully reset even if it was already animating. Out-of-range
    /// pitch or channel leaves every slot untouched.
    pub fn note_on(&mut self, channel: u8, pitch: u8, velocity: u8, now_ms: u64) {
        let pitch = usize::from(pitch);
        let channel = usize::from(channel);
        if pitch >= LEDS || channel >= CHANNELS {
            trace!("note on ignored: pitch {pitch}, channel {channel}");
            return;
        }
        self.slots[pitch].trigger(channel, velocity, now_ms);
    }

    /// Releases the slot for `pitch`, from whatever stage it is in.
    ///
    /// The channel and velocity are accepted for interface symmetry but play
    /// no part in routing; the slot is addressed by pitch alone. Out-of-range
    /// pitch is a no-op.
    pub fn note_off(&mut self, _channel: u8, pitch: u8, _velocity: u8, now_ms: u64) {
        let pitch = usize::from(pitch);
        if pitch >= LEDS {
            trace!("note off ignored: pitch {pitch}");
            return;
        }
        self.slots[pitch].release(now_ms);
    }

    /// Applies a control-change to one channel's parameter set.
    ///
    /// Unknown control numbers and out-of-range channels are no-ops. Accepted
    /// updates are visible to every slot bound to the channel on its next
    /// evaluation, mid-stage, with no interpolation.
    pub fn control_change(&mut self, channel: u8, control: u8, value: u8) {
        let channel = usize::from(channel);
        if channel >= CHANNELS {
            trace!("control change ignored: channel {channel}");
            return;
        }
        let Some(function) = ControlFunction::from_control(control) else {
            trace!("control change ignored: control {control}");
            return;
        };
        self.channels[channel].apply_control(function, value);
    }

    /// Routes one event to the handler above.
    pub fn apply(&mut self, event: MidiEvent, now_ms: u64) {
        match event {
            MidiEvent::NoteOn {
                channel,
                pitch,
                velocity,
            } => self.note_on(channel, pitch, velocity, now_ms),
            MidiEvent::NoteOff {
                channel,
                pitch,
                velocity,
            } => self.note_off(channel, pitch, velocity, now_ms),
            MidiEvent::ControlChange {
                channel,
                control,
                value,
            } => self.control_change(channel, control, value),
        }
    }

    /// Evaluates one slot if it is enabled.
    ///
    /// Resolves the slot's bound channel to its current parameters and runs
    /// one engine step. Returns the output brightness, or `None` if the slot
    /// is disabled or the index is out of range.
    pub fn advance_slot(&mut self, index: usize, now_ms: u64) -> Option<u8> {
        let slot = self.slots.get_mut(index)?;
        if !slot.is_enabled() {
            return None;
        }
        let params = &self.channels[slot.channel()];
        Some(slot.advance(params, now_ms))
    }

    /// One pass over the whole bank: every enabled slot is evaluated exactly
    /// once, in index order, and its brightness forwarded to the sink.
    ///
    /// Returns the number of slots evaluated.
    pub fn tick(&mut self, now_ms: u64, sink: &mut impl BrightnessSink) -> usize {
        let mut evaluated = 0;
        for index in 0..LEDS {
            if let Some(brightness) = self.advance_slot(index, now_ms) {
                sink.write(index, brightness);
                evaluated += 1;
            }
        }
        evaluated
    }

    /// Whether any slot is still animating.
    pub fn any_enabled(&self) -> bool {
        self.slots.iter().any(LightSlot::is_enabled)
    }

    /// Number of slots currently animating.
    pub fn enabled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_enabled()).count()
    }

    /// Read access to one slot's runtime state.
    pub fn slot(&self, index: usize) -> Option<&LightSlot> {
        self.slots.get(index)
    }

    /// Read access to one channel's parameters.
    pub fn params(&self, channel: usize) -> Option<&EnvelopeParams> {
        self.channels.get(channel)
    }

    /// Write access to one channel's parameters, for hosts that configure
    /// envelopes directly instead of through control-change events.
    pub fn params_mut(&mut self, channel: usize) -> Option<&mut EnvelopeParams> {
        self.channels.get_mut(channel)
    }
}

impl<const CHANNELS: usize, const LEDS: usize> Default for LightRig<CHANNELS, LEDS> {
    fn default() -> Self {
        Self::new()
    }
}
