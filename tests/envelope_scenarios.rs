//! End-to-end envelope scenarios driven through the public event surface.

use std::time::Duration;

use glowworm::{
    ControlFunction, Driver, EnvelopeStage, LightRig, ManualClock, MemorySink,
    control_to_duration_ms,
};

const CHANNELS: usize = 16;
const LEDS: usize = 16;

#[test]
fn full_velocity_strike_reaches_decay_past_the_attack() {
    let mut rig = LightRig::<CHANNELS, LEDS>::new();

    rig.note_on(0, 0, 127, 0);
    rig.control_change(0, ControlFunction::Attack.control_number(), 70);

    let slot = rig.slot(0).unwrap();
    assert_eq!(slot.brightness_roof(), 254);
    assert_eq!(slot.stage(), EnvelopeStage::Attack);

    // Still attacking well inside the configured duration.
    let attack_ms = control_to_duration_ms(70);
    rig.advance_slot(0, 200);
    assert_eq!(rig.slot(0).unwrap().stage(), EnvelopeStage::Attack);

    // One evaluation past the attack duration flips the stage.
    rig.advance_slot(0, attack_ms as u64 + 2);
    assert_eq!(rig.slot(0).unwrap().stage(), EnvelopeStage::Decay);
}

#[test]
fn attack_brightness_rises_monotonically() {
    let mut rig = LightRig::<CHANNELS, LEDS>::new();
    rig.control_change(0, ControlFunction::Attack.control_number(), 70);
    rig.note_on(0, 5, 127, 0);

    let mut previous = 0;
    for now in (10u64..500).step_by(35) {
        let brightness = rig.advance_slot(5, now).unwrap();
        assert!(brightness >= previous);
        previous = brightness;
    }
    assert!(previous > 0);
}

#[test]
fn release_midpoint_and_completion() {
    let mut rig = LightRig::<CHANNELS, LEDS>::new();
    {
        let params = rig.params_mut(0).unwrap();
        params.sustain_level = 50;
        params.brightness_floor = 0;
        params.release_ms = 100.0;
    }

    rig.note_on(0, 0, 127, 0);
    rig.note_off(0, 0, 0, 0);
    assert_eq!(rig.slot(0).unwrap().stage(), EnvelopeStage::Release);

    // Halfway through the release the level sits near the midpoint.
    let brightness = rig.advance_slot(0, 50).unwrap();
    assert!((24..=25).contains(&brightness));

    // Past the release duration the slot is done and dark.
    let brightness = rig.advance_slot(0, 101).unwrap();
    assert_eq!(brightness, 0);
    assert_eq!(rig.slot(0).unwrap().stage(), EnvelopeStage::Done);

    // The next evaluation deactivates it; after that it is skipped.
    rig.advance_slot(0, 102);
    assert!(!rig.slot(0).unwrap().is_enabled());
    assert_eq!(rig.advance_slot(0, 103), None);
}

#[test]
fn note_off_interrupts_any_stage() {
    let mut rig = LightRig::<CHANNELS, LEDS>::new();
    rig.control_change(0, ControlFunction::Attack.control_number(), 100);
    rig.control_change(0, ControlFunction::Decay.control_number(), 100);

    // Interrupt from attack.
    rig.note_on(0, 0, 127, 0);
    rig.advance_slot(0, 10);
    assert_eq!(rig.slot(0).unwrap().stage(), EnvelopeStage::Attack);
    rig.note_off(0, 0, 0, 20);
    assert_eq!(rig.slot(0).unwrap().stage(), EnvelopeStage::Release);

    // Interrupt from decay.
    let attack_ms = control_to_duration_ms(100) as u64;
    rig.note_on(0, 1, 127, 0);
    rig.advance_slot(1, attack_ms + 2);
    assert_eq!(rig.slot(1).unwrap().stage(), EnvelopeStage::Decay);
    rig.note_off(0, 1, 0, attack_ms + 10);
    assert_eq!(rig.slot(1).unwrap().stage(), EnvelopeStage::Release);
}

#[test]
fn retrigger_discards_the_running_envelope() {
    let mut rig = LightRig::<CHANNELS, LEDS>::new();
    rig.control_change(0, ControlFunction::Attack.control_number(), 100);

    rig.note_on(0, 0, 127, 0);
    rig.advance_slot(0, 2_000);
    assert!(rig.slot(0).unwrap().brightness() > 0);

    // The second strike starts over from dark with a fresh roof.
    rig.note_on(0, 0, 32, 3_000);
    let slot = rig.slot(0).unwrap();
    assert_eq!(slot.stage(), EnvelopeStage::Attack);
    assert_eq!(slot.brightness(), 0);
    assert_eq!(slot.brightness_roof(), 64);
}

#[test]
fn sustain_hands_off_to_release_without_a_note_off() {
    let mut rig = LightRig::<CHANNELS, LEDS>::new();
    {
        let params = rig.params_mut(0).unwrap();
        params.sustain_level = 100;
        params.release_ms = 50.0;
    }

    // Zero attack and decay collapse straight through to sustain.
    rig.note_on(0, 0, 127, 0);
    rig.advance_slot(0, 0);
    rig.advance_slot(0, 0);
    assert_eq!(rig.slot(0).unwrap().stage(), EnvelopeStage::Sustain);

    // No note-off is ever sent, yet the next evaluation begins the release.
    rig.advance_slot(0, 10);
    assert_eq!(rig.slot(0).unwrap().stage(), EnvelopeStage::Release);

    rig.advance_slot(0, 70);
    assert_eq!(rig.slot(0).unwrap().stage(), EnvelopeStage::Done);
}

#[test]
fn parameter_changes_land_mid_envelope() {
    let mut rig = LightRig::<CHANNELS, LEDS>::new();
    rig.control_change(0, ControlFunction::Attack.control_number(), 127);
    rig.note_on(0, 0, 127, 0);

    rig.advance_slot(0, 5_000);
    assert_eq!(rig.slot(0).unwrap().stage(), EnvelopeStage::Attack);

    // Collapsing the attack mid-flight flips the slot on its next evaluation.
    rig.control_change(0, ControlFunction::Attack.control_number(), 0);
    rig.advance_slot(0, 5_010);
    assert_eq!(rig.slot(0).unwrap().stage(), EnvelopeStage::Decay);
}

#[test]
fn driver_outlives_the_first_completed_envelope() {
    let mut driver =
        Driver::<CHANNELS, LEDS, _, _>::new(ManualClock::new(), MemorySink::<LEDS>::new())
            .with_pacing(Duration::ZERO);

    // Channel 1 carries a long release; channel 0 stays degenerate.
    {
        let params = driver.rig_mut().params_mut(1).unwrap();
        params.sustain_level = 128;
        params.release_ms = 1_000.0;
    }

    driver.note_on(0, 0, 127);
    driver.note_on(1, 7, 127);

    // A few passes drain the degenerate slot completely.
    for _ in 0..6 {
        driver.step();
    }
    assert!(!driver.rig().slot(0).unwrap().is_enabled());
    assert!(driver.rig().slot(7).unwrap().is_enabled());

    // The long envelope keeps running until its own release finishes.
    driver.clock().advance(2_000);
    driver.run_until_idle();
    assert!(!driver.rig().any_enabled());
    assert_eq!(driver.sink().get(7), Some(0));
}

#[test]
fn untouched_channels_run_degenerate_envelopes() {
    let mut driver =
        Driver::<CHANNELS, LEDS, _, _>::new(ManualClock::new(), MemorySink::<LEDS>::new())
            .with_pacing(Duration::ZERO);

    // No control-change ever arrives: the envelope collapses through all
    // four stages without producing a single out-of-range value.
    driver.note_on(3, 9, 127);
    driver.run_until_idle();

    assert!(!driver.rig().any_enabled());
    assert_eq!(driver.sink().get(9), Some(0));
}

#[test]
fn out_of_range_events_touch_nothing() {
    let mut rig = LightRig::<4, 4>::new();

    rig.note_on(0, 11, 127, 0);
    rig.note_on(9, 0, 127, 0);
    rig.note_off(0, 11, 0, 0);
    rig.control_change(7, 0, 127);
    rig.control_change(0, 99, 127);

    assert!(!rig.any_enabled());
    assert_eq!(rig.enabled_count(), 0);
    for channel in 0..4 {
        let params = rig.params(channel).unwrap();
        assert_eq!(params.attack_ms, 0.0);
        assert_eq!(params.sustain_level, 0);
    }
}
