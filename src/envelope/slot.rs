//! Per-output runtime envelope state and the stage state machine.

use log::debug;

use super::params::EnvelopeParams;
use crate::midi::control_to_brightness;

/// Stage of a light slot's brightness envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Ramping from zero up to the velocity-derived roof.
    Attack,
    /// Ramping from the roof down to the channel's sustain level.
    Decay,
    /// Transient hand-off stage: the slot releases itself on its next
    /// evaluation rather than holding.
    Sustain,
    /// Ramping from the sustain level down to the brightness floor.
    Release,
    /// Envelope finished; the slot deactivates on its next evaluation.
    Done,
}

/// Runtime envelope state for one addressable output.
///
/// A slot is inert until a note-on strikes it, then advances through the
/// envelope stages on each evaluation until it reaches [`EnvelopeStage::Done`]
/// and deactivates. The slot does not own its envelope shape: it carries the
/// index of the channel that struck it, and the caller resolves that index to
/// an [`EnvelopeParams`] on every evaluation, so mid-flight control changes
/// are picked up immediately.
///
/// # Examples
///
/// ```
/// use glowworm::{EnvelopeParams, EnvelopeStage, LightSlot};
///
/// let params = EnvelopeParams {
///     attack_ms: 100.0,
///     sustain_level: 120,
///     ..EnvelopeParams::default()
/// };
///
/// let mut slot = LightSlot::default();
/// slot.trigger(0, 127, 0);
/// assert_eq!(slot.stage(), EnvelopeStage::Attack);
///
/// // Halfway through the attack the brightness is around half the roof.
/// let brightness = slot.advance(&params, 50);
/// assert!(brightness > 100 && brightness < 160);
///
/// // Past the attack duration the slot moves on to decay.
/// slot.advance(&params, 101);
/// assert_eq!(slot.stage(), EnvelopeStage::Decay);
/// ```
#[derive(Debug, Clone)]
pub struct LightSlot {
    enabled: bool,
    note_on_at: u64,
    note_off_at: u64,
    brightness_roof: u8,
    level: f64,
    stage: EnvelopeStage,
    next_action_ms: u64,
    channel: usize,
}

impl Default for LightSlot {
    fn default() -> Self {
        Self {
            enabled: false,
            note_on_at: 0,
            note_off_at: 0,
            brightness_roof: 0,
            level: 0.0,
            stage: EnvelopeStage::Done,
            next_action_ms: 0,
            channel: 0,
        }
    }
}

impl LightSlot {
    /// Strikes the slot: full reset, then attack from zero.
    ///
    /// Any in-flight envelope state is discarded; a re-trigger never carries
    /// brightness over from the previous note. The peak brightness for this
    /// note comes from the velocity through the brightness mapping, and the
    /// slot binds to `channel` for the rest of its lifetime.
    pub fn trigger(&mut self, channel: usize, velocity: u8, now_ms: u64) {
        *self = Self::default();
        self.enabled = true;
        self.brightness_roof = control_to_brightness(velocity);
        self.stage = EnvelopeStage::Attack;
        self.channel = channel;
        self.note_on_at = now_ms;
    }

    /// Forces the slot into the release stage, from any stage.
    ///
    /// The hint drops to 1 ms so the next pass re-evaluates immediately.
    pub fn release(&mut self, now_ms: u64) {
        self.stage = EnvelopeStage::Release;
        self.note_off_at = now_ms;
        self.next_action_ms = 1;
        debug!("stage -> release");
    }

    /// Runs one evaluation step against the bound channel's parameters.
    ///
    /// Dispatches on the current stage, updates the brightness level and the
    /// re-evaluation hint, and performs at most one stage transition. Returns
    /// the brightness for this evaluation.
    pub fn advance(&mut self, params: &EnvelopeParams, now_ms: u64) -> u8 {
        match self.stage {
            EnvelopeStage::Attack => self.advance_attack(params, now_ms),
            EnvelopeStage::Decay => self.advance_decay(params, now_ms),
            // Sustain never holds: the slot releases itself.
            EnvelopeStage::Sustain => self.release(now_ms),
            EnvelopeStage::Release => self.advance_release(params, now_ms),
            EnvelopeStage::Done => self.enabled = false,
        }
        self.brightness()
    }

    fn advance_attack(&mut self, params: &EnvelopeParams, now_ms: u64) {
        // The 1 ms epsilon keeps the very first evaluation off zero elapsed
        // time, so every pass covers at least one brightness step.
        let elapsed = now_ms.saturating_sub(self.note_on_at) as f64 + 1.0;
        let roof = f64::from(self.brightness_roof);

        if params.attack_ms <= 0.0 || self.brightness_roof == 0 {
            // Degenerate attack completes instantly at the roof.
            self.level = roof;
            self.enter_decay(params);
            return;
        }

        // Milliseconds per brightness step.
        let slice = params.attack_ms / roof;
        self.level = (elapsed / slice).min(roof);

        if elapsed > params.attack_ms {
            self.enter_decay(params);
        } else {
            self.next_action_ms = slice as u64;
        }
    }

    fn enter_decay(&mut self, params: &EnvelopeParams) {
        self.stage = EnvelopeStage::Decay;
        self.next_action_ms = 0;
        debug!(
            "stage -> decay ({:.0} ms toward {} br)",
            params.decay_ms, params.sustain_level
        );
    }

    fn advance_decay(&mut self, params: &EnvelopeParams, now_ms: u64) {
        let elapsed = now_ms as f64 - (self.note_on_at as f64 + params.attack_ms);
        let roof = f64::from(self.brightness_roof);
        let sustain = f64::from(params.sustain_level);
        let span = roof - sustain;

        if params.decay_ms <= 0.0 || span <= 0.0 {
            // Degenerate decay completes instantly at the sustain level.
            self.level = sustain;
            self.enter_sustain();
            return;
        }

        let slice = params.decay_ms / span;
        self.level = (roof - elapsed / slice).max(sustain);

        // Decay-relative elapsed time is measured against the attack+decay
        // total, so the level sits clamped at sustain for an extra attack_ms
        // before the stage formally flips.
        if elapsed > params.attack_ms + params.decay_ms {
            self.enter_sustain();
        } else {
            self.next_action_ms = slice as u64;
        }
    }

    fn enter_sustain(&mut self) {
        self.stage = EnvelopeStage::Sustain;
        self.next_action_ms = 0;
        debug!("stage -> sustain");
    }

    fn advance_release(&mut self, params: &EnvelopeParams, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.note_off_at) as f64 + 1.0;
        // Release always ramps down from the sustain level, whatever the
        // level was when the note-off arrived.
        let sustain = f64::from(params.sustain_level);
        let floor = f64::from(params.brightness_floor);
        let span = sustain - floor;

        if params.release_ms <= 0.0 || span <= 0.0 {
            // Degenerate release completes instantly at the floor.
            self.level = floor;
            self.finish();
            return;
        }

        let slice = params.release_ms / span;
        self.level = (sustain - elapsed / slice).max(floor);

        if elapsed > params.release_ms {
            self.finish();
        } else {
            self.next_action_ms = slice as u64;
        }
    }

    fn finish(&mut self) {
        self.stage = EnvelopeStage::Done;
        self.next_action_ms = 0;
        debug!("envelope done");
    }

    /// Whether the slot is animating. Disabled slots are skipped entirely.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current envelope stage.
    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Output brightness: the current level clamped to `[0, 255]`.
    pub fn brightness(&self) -> u8 {
        self.level.clamp(0.0, 255.0) as u8
    }

    /// Peak brightness for the current note, derived from its velocity.
    pub fn brightness_roof(&self) -> u8 {
        self.brightness_roof
    }

    /// Advisory hint: minimum milliseconds before this slot needs another
    /// evaluation. Drivers may ignore it and re-evaluate every pass.
    pub fn next_action_ms(&self) -> u64 {
        self.next_action_ms
    }

    /// Index of the channel whose parameters shape this slot's envelope.
    pub fn channel(&self) -> usize {
        self.channel
    }
}
