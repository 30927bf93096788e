//! MIDI-style control events and 7-bit value mappings.
//!
//! Everything upstream of the envelope engine speaks in 7-bit values
//! (0–127): note velocities and control-change payloads. This module defines
//! the event surface and the two deterministic mappings that convert those
//! values into brightness levels and envelope durations.

/// An inbound control event.
///
/// Events are fire-and-forget: they carry no reply channel and routing a
/// malformed event (out-of-range pitch or channel, unknown control number)
/// is a silent no-op.
///
/// # Examples
///
/// ```
/// use glowworm::MidiEvent;
///
/// let strike = MidiEvent::NoteOn {
///     channel: 0,
///     pitch: 3,
///     velocity: 127,
/// };
/// assert_eq!(
///     strike,
///     MidiEvent::NoteOn { channel: 0, pitch: 3, velocity: 127 }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    /// Strike an output: resets its slot and starts the attack stage.
    NoteOn { channel: u8, pitch: u8, velocity: u8 },
    /// Release an output. The velocity is carried but unused.
    NoteOff { channel: u8, pitch: u8, velocity: u8 },
    /// Update one field of a channel's envelope parameters.
    ControlChange { channel: u8, control: u8, value: u8 },
}

/// Recognised control-change selectors.
///
/// Each selector targets exactly one field of a channel's
/// [`EnvelopeParams`](crate::EnvelopeParams). Control numbers outside the
/// recognised set do not construct a selector and the event is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFunction {
    /// Attack duration (control 0, duration mapping).
    Attack,
    /// Decay duration (control 1, duration mapping).
    Decay,
    /// Sustain brightness (control 2, brightness mapping).
    Sustain,
    /// Release duration (control 3, duration mapping).
    Release,
    /// Reserved jitter rate (control 4, stored verbatim).
    JitterRate,
    /// Reserved jitter intensity (control 5, stored verbatim).
    JitterIntensity,
    /// Minimum released brightness (control 6, brightness mapping).
    BrightnessFloor,
}

impl ControlFunction {
    /// Maps a raw control number to a selector.
    ///
    /// Returns `None` for unrecognised numbers, which callers treat as a
    /// no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use glowworm::ControlFunction;
    ///
    /// assert_eq!(ControlFunction::from_control(0), Some(ControlFunction::Attack));
    /// assert_eq!(ControlFunction::from_control(6), Some(ControlFunction::BrightnessFloor));
    /// assert_eq!(ControlFunction::from_control(64), None);
    /// ```
    pub fn from_control(control: u8) -> Option<Self> {
        match control {
            0 => Some(ControlFunction::Attack),
            1 => Some(ControlFunction::Decay),
            2 => Some(ControlFunction::Sustain),
            3 => Some(ControlFunction::Release),
            4 => Some(ControlFunction::JitterRate),
            5 => Some(ControlFunction::JitterIntensity),
            6 => Some(ControlFunction::BrightnessFloor),
            _ => None,
        }
    }

    /// The raw control number this selector answers to.
    ///
    /// # Examples
    ///
    /// ```
    /// use glowworm::ControlFunction;
    ///
    /// assert_eq!(ControlFunction::Release.control_number(), 3);
    /// assert_eq!(
    ///     ControlFunction::from_control(ControlFunction::Decay.control_number()),
    ///     Some(ControlFunction::Decay)
    /// );
    /// ```
    pub fn control_number(self) -> u8 {
        match self {
            ControlFunction::Attack => 0,
            ControlFunction::Decay => 1,
            ControlFunction::Sustain => 2,
            ControlFunction::Release => 3,
            ControlFunction::JitterRate => 4,
            ControlFunction::JitterIntensity => 5,
            ControlFunction::BrightnessFloor => 6,
        }
    }
}

/// Converts a 7-bit control value to an envelope duration in milliseconds.
///
/// The mapping is `5·e^(value / 15) − 1`: roughly exponential, so the lower
/// half of the control range covers short, percussive times while the upper
/// half stretches into multi-second fades. Value 0 maps to 4 ms, not zero.
///
/// # Examples
///
/// ```
/// use glowworm::control_to_duration_ms;
///
/// assert_eq!(control_to_duration_ms(0), 4.0);
/// assert!(control_to_duration_ms(100) > control_to_duration_ms(99));
/// ```
pub fn control_to_duration_ms(value: u8) -> f64 {
    5.0 * (f64::from(value) / 15.0).exp() - 1.0
}

/// Converts a 7-bit control value to a brightness level.
///
/// The mapping is `(value + 1)·2 − 2`, i.e. `2·value`: an even integer in
/// `[0, 254]`. Full velocity lands at 254, one step below the top of the
/// 0–255 output range.
///
/// # Examples
///
/// ```
/// use glowworm::control_to_brightness;
///
/// assert_eq!(control_to_brightness(0), 0);
/// assert_eq!(control_to_brightness(64), 128);
/// assert_eq!(control_to_brightness(127), 254);
/// ```
pub fn control_to_brightness(value: u8) -> u8 {
    ((u16::from(value) + 1) * 2 - 2) as u8
}
