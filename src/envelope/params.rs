//! Per-channel envelope parameters, updated by control-change events.

use log::debug;

use crate::midi::{ControlFunction, control_to_brightness, control_to_duration_ms};

/// Envelope shape shared by every slot triggered on one channel.
///
/// All fields default to zero, so a slot struck before any control-change
/// arrives runs a degenerate envelope whose stages complete instantly.
/// Updates apply to in-flight slots immediately, mid-stage, with no
/// interpolation; a visible discontinuity is acceptable.
///
/// # Examples
///
/// ```
/// use glowworm::{ControlFunction, EnvelopeParams};
///
/// let mut params = EnvelopeParams::default();
/// params.apply_control(ControlFunction::Attack, 70);
/// params.apply_control(ControlFunction::Sustain, 25);
///
/// assert!(params.attack_ms > 500.0);
/// assert_eq!(params.sustain_level, 50);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvelopeParams {
    /// Minimum released brightness.
    pub brightness_floor: u8,
    /// Attack duration in milliseconds.
    pub attack_ms: f64,
    /// Decay duration in milliseconds.
    pub decay_ms: f64,
    /// Brightness held at the sustain stage.
    pub sustain_level: u8,
    /// Release duration in milliseconds.
    pub release_ms: f64,
    /// Reserved modulation rate, stored verbatim (0–127).
    pub jitter_rate: u8,
    /// Reserved modulation intensity, stored verbatim (0–127).
    pub jitter_intensity: u8,
}

impl EnvelopeParams {
    /// Applies one control-change value to the field the selector targets.
    ///
    /// Durations go through the exponential duration mapping, brightness
    /// fields through the linear brightness mapping, and the reserved jitter
    /// fields are stored as-is.
    pub fn apply_control(&mut self, function: ControlFunction, value: u8) {
        match function {
            ControlFunction::Attack => {
                self.attack_ms = control_to_duration_ms(value);
                debug!("attack: {:.0} ms", self.attack_ms);
            }
            ControlFunction::Decay => {
                self.decay_ms = control_to_duration_ms(value);
                debug!("decay: {:.0} ms", self.decay_ms);
            }
            ControlFunction::Sustain => {
                self.sustain_level = control_to_brightness(value);
                debug!("sustain: {} br", self.sustain_level);
            }
            ControlFunction::Release => {
                self.release_ms = control_to_duration_ms(value);
                debug!("release: {:.0} ms", self.release_ms);
            }
            ControlFunction::JitterRate => {
                self.jitter_rate = value;
                debug!("jitter rate: {}", self.jitter_rate);
            }
            ControlFunction::JitterIntensity => {
                self.jitter_intensity = value;
                debug!("jitter intensity: {}", self.jitter_intensity);
            }
            ControlFunction::BrightnessFloor => {
                self.brightness_floor = control_to_brightness(value);
                debug!("brightness floor: {} br", self.brightness_floor);
            }
        }
    }
}
