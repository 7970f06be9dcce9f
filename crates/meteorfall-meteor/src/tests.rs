use meteorfall_core::config::GameConfig;
use meteorfall_core::constants::*;
use meteorfall_core::enums::{MeteorPhase, NeutralizeKind};
use meteorfall_core::types::{EasingCurve, Position};

use crate::agent::{MeteorAgent, MeteorEvent, MeteorSettings, SpeedProfile};
use crate::animation::{duration_for, TerminalAnimation};

const SPAWN: Position = Position::new(15.0, 5.0, 0.0);

fn flight_agent(flight_secs: f64) -> MeteorAgent {
    MeteorAgent::new(MeteorSettings {
        speed: SpeedProfile::FlightTime(flight_secs),
        ..Default::default()
    })
}

/// Advance until the agent emits an event or `max_ticks` pass.
fn run_until_event(agent: &mut MeteorAgent, max_ticks: usize) -> Option<(usize, MeteorEvent)> {
    for tick in 0..max_ticks {
        if let Some(event) = agent.advance(DT) {
            return Some((tick, event));
        }
    }
    None
}

// ---- Launch ----

#[test]
fn test_new_agent_is_parked() {
    let agent = MeteorAgent::default();
    let state = agent.state();
    assert_eq!(state.phase, MeteorPhase::Idle);
    assert_eq!(state.position, METEOR_PARKING_POSITION);
    assert!(!state.visible);
    assert_eq!(state.progress, 0.0);
}

#[test]
fn test_launch_from_idle() {
    let mut agent = flight_agent(10.0);
    assert!(agent.launch(SPAWN, 1));
    let state = agent.state();
    assert_eq!(state.phase, MeteorPhase::Moving);
    assert_eq!(state.start_position, SPAWN);
    assert_eq!(state.position, SPAWN);
    assert_eq!(state.target_position, PLANET_CENTER);
    assert_eq!(state.progress, 0.0);
    assert!(state.visible);
    assert!((state.speed - SPAWN.length() / 10.0).abs() < 1e-12);
}

#[test]
fn test_launch_while_moving_rejected() {
    let mut agent = flight_agent(10.0);
    assert!(agent.launch(SPAWN, 1));
    agent.advance(1.0);
    let before = agent.state().clone();

    assert!(!agent.launch(Position::new(-15.0, 5.0, 0.0), 2));
    assert_eq!(*agent.state(), before, "rejected launch must not change state");
}

#[test]
fn test_launch_while_neutralized_rejected() {
    let mut agent = flight_agent(10.0);
    agent.launch(SPAWN, 1);
    agent.deflect();
    assert!(!agent.launch(SPAWN, 2));
    assert_eq!(agent.phase(), MeteorPhase::Neutralized);
}

#[test]
fn test_scale_escalates_with_wave() {
    let settings = MeteorSettings::default();
    let cap = METEOR_MAX_PLANET_RATIO * PLANET_EXTENT;
    assert_eq!(settings.scale_for_wave(1), METEOR_BASE_SCALE);
    assert!((settings.scale_for_wave(2) - METEOR_BASE_SCALE * 1.3).abs() < 1e-12);
    assert_eq!(settings.scale_for_wave(3), cap);
    assert_eq!(settings.scale_for_wave(12), cap);
}

#[test]
fn test_scale_capped_by_small_planet() {
    let settings = MeteorSettings {
        planet_extent: 1.0,
        ..Default::default()
    };
    assert_eq!(settings.scale_for_wave(1), 0.9);
    assert_eq!(settings.scale_for_wave(2), 0.9);
}

#[test]
fn test_launch_applies_wave_scale() {
    let mut agent = MeteorAgent::default();
    agent.launch(SPAWN, 2);
    assert!((agent.state().scale_factor - 1.3).abs() < 1e-12);
    agent.reset();
    assert_eq!(agent.state().scale_factor, METEOR_BASE_SCALE);
}

// ---- Flight ----

#[test]
fn test_progress_monotonic_and_bounded() {
    let mut agent = flight_agent(2.0);
    agent.launch(SPAWN, 1);
    let mut last = 0.0;
    for _ in 0..200 {
        agent.advance(DT);
        let state = agent.state();
        if state.phase != MeteorPhase::Moving && state.phase != MeteorPhase::Impacting {
            break;
        }
        assert!((0.0..=1.0).contains(&state.progress));
        assert!(state.progress >= last);
        if state.phase == MeteorPhase::Moving {
            assert!(state.progress < 1.0, "moving meteor must not linger at 1");
        }
        last = state.progress;
    }
}

#[test]
fn test_negative_and_nan_dt_do_not_move_backwards() {
    let mut agent = flight_agent(2.0);
    agent.launch(SPAWN, 1);
    agent.advance(0.5);
    let progress = agent.state().progress;
    agent.advance(-10.0);
    assert_eq!(agent.state().progress, progress);
    agent.advance(f64::NAN);
    assert_eq!(agent.state().progress, progress);
}

#[test]
fn test_reaches_target_at_flight_time() {
    let mut agent = flight_agent(1.0);
    agent.launch(SPAWN, 1);
    let (tick, event) = run_until_event(&mut agent, 100).unwrap();
    assert_eq!(event, MeteorEvent::ReachedTarget);
    // 1 second at 30 Hz, allowing one tick of float slack.
    assert!((TICK_RATE as usize - 2..=TICK_RATE as usize).contains(&tick), "tick {tick}");
    assert_eq!(agent.phase(), MeteorPhase::Impacting);
    assert_eq!(agent.state().position, PLANET_CENTER);
    assert_eq!(agent.state().progress, 1.0);
}

#[test]
fn test_impacting_parks_next_tick() {
    let mut agent = flight_agent(0.5);
    agent.launch(SPAWN, 1);
    run_until_event(&mut agent, 100).unwrap();
    assert_eq!(agent.advance(DT), Some(MeteorEvent::Parked));
    assert_eq!(agent.phase(), MeteorPhase::Idle);
    assert_eq!(agent.state().position, METEOR_PARKING_POSITION);
}

#[test]
fn test_fixed_speed_profile() {
    let mut agent = MeteorAgent::new(MeteorSettings {
        speed: SpeedProfile::Fixed(3.0),
        ..Default::default()
    });
    let spawn = Position::new(0.0, 6.0, 0.0);
    agent.launch(spawn, 1);
    agent.advance(1.0);
    assert!((agent.state().progress - 0.5).abs() < 1e-12);
    assert!((agent.state().position - Position::new(0.0, 3.0, 0.0)).length() < 1e-12);
}

#[test]
fn test_easing_shapes_position_not_progress() {
    let mut agent = MeteorAgent::new(MeteorSettings {
        speed: SpeedProfile::Fixed(3.0),
        easing: EasingCurve::EaseIn,
        ..Default::default()
    });
    agent.launch(Position::new(0.0, 6.0, 0.0), 1);
    agent.advance(1.0);
    let state = agent.state();
    assert!((state.progress - 0.5).abs() < 1e-12);
    // EaseIn(0.5) = 0.25 of the way.
    assert!((state.position.y - 4.5).abs() < 1e-12);
}

#[test]
fn test_zero_length_journey_impacts_immediately() {
    let mut agent = flight_agent(5.0);
    agent.launch(PLANET_CENTER, 1);
    assert_eq!(agent.advance(DT), Some(MeteorEvent::ReachedTarget));
}

#[test]
fn test_settings_from_config() {
    let mut config = GameConfig::default();
    let settings = MeteorSettings::from_config(&config);
    assert_eq!(settings.speed, SpeedProfile::FlightTime(WAVE_DURATION_SECS));

    config.meteor.speed = Some(4.0);
    config.planet.extent = 8.0;
    let settings = MeteorSettings::from_config(&config);
    assert_eq!(settings.speed, SpeedProfile::Fixed(4.0));
    assert_eq!(settings.planet_extent, 8.0);
}

// ---- Defense commands ----

#[test]
fn test_each_command_neutralizes_then_parks() {
    let kinds = [
        NeutralizeKind::Destroy,
        NeutralizeKind::Deflect,
        NeutralizeKind::Divert,
        NeutralizeKind::PassThrough,
    ];
    for kind in kinds {
        let mut agent = flight_agent(10.0);
        agent.launch(SPAWN, 1);
        agent.advance(1.0);

        assert_eq!(agent.neutralize(kind), Some(MeteorEvent::Neutralized(kind)));
        assert_eq!(agent.phase(), MeteorPhase::Neutralized);

        let ticks = (duration_for(kind) * TICK_RATE as f64).ceil() as usize + 2;
        let (_, event) = run_until_event(&mut agent, ticks).unwrap();
        assert_eq!(event, MeteorEvent::Parked, "{kind:?}");
        assert_eq!(agent.phase(), MeteorPhase::Idle);
        assert_eq!(agent.state().scale_factor, METEOR_BASE_SCALE);
        assert!(agent.state().animation.is_none());
    }
}

#[test]
fn test_command_helpers_map_to_kinds() {
    let mut agent = flight_agent(10.0);
    agent.launch(SPAWN, 1);
    assert_eq!(
        agent.destroy(),
        Some(MeteorEvent::Neutralized(NeutralizeKind::Destroy))
    );
    agent.reset();
    agent.launch(SPAWN, 1);
    assert_eq!(
        agent.divert(),
        Some(MeteorEvent::Neutralized(NeutralizeKind::Divert))
    );
    agent.reset();
    agent.launch(SPAWN, 1);
    assert_eq!(
        agent.pass_through(),
        Some(MeteorEvent::Neutralized(NeutralizeKind::PassThrough))
    );
}

#[test]
fn test_commands_ignored_when_idle() {
    let mut agent = MeteorAgent::default();
    assert_eq!(agent.destroy(), None);
    assert_eq!(agent.deflect(), None);
    assert_eq!(agent.divert(), None);
    assert_eq!(agent.pass_through(), None);
    assert_eq!(agent.phase(), MeteorPhase::Idle);
}

#[test]
fn test_second_command_ignored_while_neutralized() {
    let mut agent = flight_agent(10.0);
    agent.launch(SPAWN, 1);
    agent.deflect();
    let before = agent.state().clone();
    assert_eq!(agent.destroy(), None);
    assert_eq!(*agent.state(), before);
}

#[test]
fn test_commands_ignored_when_impacting() {
    let mut agent = flight_agent(0.2);
    agent.launch(SPAWN, 1);
    run_until_event(&mut agent, 100).unwrap();
    assert_eq!(agent.phase(), MeteorPhase::Impacting);
    assert_eq!(agent.deflect(), None);
    assert_eq!(agent.phase(), MeteorPhase::Impacting);
}

#[test]
fn test_destroy_hides_meteor() {
    let mut agent = flight_agent(10.0);
    agent.launch(SPAWN, 1);
    agent.destroy();
    assert!(!agent.state().visible);
}

#[test]
fn test_reset_cancels_animation() {
    let mut agent = flight_agent(10.0);
    agent.launch(SPAWN, 3);
    agent.divert();
    agent.advance(DT);
    agent.reset();
    let state = agent.state();
    assert_eq!(state.phase, MeteorPhase::Idle);
    assert!(state.animation.is_none());
    assert_eq!(state.scale_factor, METEOR_BASE_SCALE);
    assert_eq!(agent.advance(DT), None, "no stale animation after reset");
}

#[test]
fn test_last_chance_marks_inbound_meteor_once() {
    let mut agent = flight_agent(10.0);
    assert!(!agent.mark_last_chance(), "nothing inbound while idle");

    agent.launch(SPAWN, 1);
    assert!(agent.mark_last_chance());
    assert!(agent.state().last_chance_used);
    assert!(!agent.mark_last_chance());
    assert_eq!(agent.state().phase, MeteorPhase::Moving);

    // The next journey starts unmarked.
    agent.reset();
    assert!(!agent.state().last_chance_used);
    agent.launch(SPAWN, 2);
    assert!(!agent.state().last_chance_used);
    assert!(agent.mark_last_chance());
}

// ---- Animations ----

#[test]
fn test_deflect_heads_back_out() {
    let origin = Position::new(7.5, 2.5, 0.0);
    let anim = TerminalAnimation::begin(
        NeutralizeKind::Deflect,
        origin,
        SPAWN,
        PLANET_CENTER,
        1.0,
    );
    let expected = SPAWN.normalize() * DEFLECT_DISTANCE;
    assert!((anim.destination - expected).length() < 1e-12);
}

#[test]
fn test_pass_through_exits_far_side() {
    let anim = TerminalAnimation::begin(
        NeutralizeKind::PassThrough,
        Position::new(3.0, 1.0, 0.0),
        SPAWN,
        PLANET_CENTER,
        1.0,
    );
    assert_eq!(anim.destination, -SPAWN);
}

#[test]
fn test_divert_shrinks_to_nothing() {
    let mut anim = TerminalAnimation::begin(
        NeutralizeKind::Divert,
        SPAWN,
        SPAWN,
        PLANET_CENTER,
        2.0,
    );
    assert_eq!(anim.frame().scale, 2.0);
    assert!(anim.step(DIVERT_ANIMATION_SECS));
    let frame = anim.frame();
    assert!(frame.scale.abs() < 1e-12);
    assert!((frame.position - (SPAWN + Position::new(0.0, 0.0, DIVERT_SPIRAL_DEPTH))).length() < 1e-9);
}

#[test]
fn test_animation_durations_in_range() {
    for kind in [
        NeutralizeKind::Destroy,
        NeutralizeKind::Deflect,
        NeutralizeKind::Divert,
        NeutralizeKind::PassThrough,
    ] {
        let secs = duration_for(kind);
        assert!((0.6..=2.0).contains(&secs), "{kind:?}: {secs}");
    }
}
