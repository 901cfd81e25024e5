//! Movement domain: unit tests for the player state machine, jump rules and grapple swing.

use bevy::prelude::Vec2;

use super::context::{PhysicsQueries, PresentationSink, Tick};
use super::grapple::GrappleState;
use super::locomotion::{JumpType, ceiling_nudge, classify_jump, generic_position_update};
use super::state::{PlayerState, PlayerStateMachine};
use super::{Ability, AnimationState, CeilingSensors, MovementInput, MovementTuning, PlayerBody, Tint};

const EPSILON: f32 = 1e-3;
const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct FakePhysics {
    floor: bool,
    wall: bool,
    ceiling: bool,
    sensors: CeilingSensors,
}

impl PhysicsQueries for FakePhysics {
    fn is_on_floor(&self) -> bool {
        self.floor
    }

    fn is_on_wall(&self) -> bool {
        self.wall
    }

    fn is_on_ceiling(&self) -> bool {
        self.ceiling
    }

    fn ceiling_sensors(&self) -> CeilingSensors {
        self.sensors
    }
}

#[derive(Default)]
struct RecordingSink {
    animations: Vec<AnimationState>,
    dash_particles: bool,
    tint: Tint,
}

impl PresentationSink for RecordingSink {
    fn play_animation(&mut self, animation: AnimationState) {
        self.animations.push(animation);
    }

    fn set_dash_particles(&mut self, emitting: bool) {
        self.dash_particles = emitting;
    }

    fn set_tint(&mut self, tint: Tint) {
        self.tint = tint;
    }
}

/// A player standing on the floor at the origin.
struct Harness {
    body: PlayerBody,
    machine: PlayerStateMachine,
    physics: FakePhysics,
    sink: RecordingSink,
    tuning: MovementTuning,
}

impl Harness {
    fn new(abilities: &[Ability]) -> Self {
        let tuning = MovementTuning::default();
        let mut body = PlayerBody::new(&tuning, Vec2::ZERO);
        for ability in abilities {
            body.unlock(*ability);
        }
        Self {
            body,
            machine: PlayerStateMachine::default(),
            physics: FakePhysics {
                floor: true,
                ..Default::default()
            },
            sink: RecordingSink::default(),
            tuning,
        }
    }

    fn step(&mut self, input: &MovementInput, dt: f32) -> bool {
        let mut tick = Tick {
            body: &mut self.body,
            input,
            physics: &self.physics,
            sink: &mut self.sink,
            tuning: &self.tuning,
            dt,
        };
        self.machine.step(&mut tick)
    }

    fn state(&self) -> &PlayerState {
        self.machine.state()
    }

    /// Leaves the floor and settles into Fall.
    fn start_falling(&mut self) {
        self.physics.floor = false;
        self.step(&MovementInput::neutral(), 0.01);
        assert_eq!(*self.state(), PlayerState::Fall);
    }
}

fn pressing(direction: Vec2) -> MovementInput {
    MovementInput {
        direction,
        ..Default::default()
    }
}

fn dash_toward(direction: Vec2) -> MovementInput {
    MovementInput {
        direction,
        dash_pressed: true,
        ..Default::default()
    }
}

fn jump_press() -> MovementInput {
    MovementInput {
        jump_pressed: true,
        jump_held: true,
        ..Default::default()
    }
}

fn jump_hold() -> MovementInput {
    MovementInput {
        jump_held: true,
        ..Default::default()
    }
}

fn crouch(pressed: bool) -> MovementInput {
    MovementInput {
        crouch_pressed: pressed,
        crouch_held: true,
        ..Default::default()
    }
}

fn grapple_hold() -> MovementInput {
    MovementInput {
        grapple_held: true,
        ..Default::default()
    }
}

// -----------------------------------------------------------------------------
// Tuning
// -----------------------------------------------------------------------------

#[test]
fn test_jump_constants_follow_arc_formulas() {
    let tuning = MovementTuning::default();
    let gravity = tuning.jump_height / (2.0 * tuning.time_in_air * tuning.time_in_air);
    assert!((tuning.gravity() - gravity).abs() < EPSILON);
    assert!((tuning.jump_speed() - (2.0 * tuning.jump_height * gravity).sqrt()).abs() < EPSILON);
}

#[test]
fn test_full_jump_peaks_after_twice_time_in_air() {
    let tuning = MovementTuning::default();
    let apex_time = tuning.jump_speed() / tuning.gravity();
    assert!((apex_time - 2.0 * tuning.time_in_air).abs() < EPSILON);
    let apex_height = tuning.jump_speed() * apex_time - 0.5 * tuning.gravity() * apex_time * apex_time;
    assert!((apex_height - tuning.jump_height).abs() < 0.01);
}

// -----------------------------------------------------------------------------
// Grounded states
// -----------------------------------------------------------------------------

#[test]
fn test_idle_stays_idle_without_input() {
    let mut harness = Harness::new(&[]);
    assert!(!harness.step(&MovementInput::neutral(), DT));
    assert_eq!(*harness.state(), PlayerState::Idle);
    assert_eq!(harness.sink.animations.last(), Some(&AnimationState::Idle));
}

#[test]
fn test_horizontal_input_starts_running() {
    let mut harness = Harness::new(&[]);
    assert!(harness.step(&pressing(Vec2::new(-1.0, 0.0)), DT));
    assert_eq!(*harness.state(), PlayerState::Run);
    assert_eq!(harness.body.velocity.x, -harness.tuning.run_speed);
    assert_eq!(harness.body.facing, crate::math::XDirection::Left);
}

#[test]
fn test_run_friction_reaches_exact_zero_then_idles() {
    let mut harness = Harness::new(&[]);
    harness.step(&pressing(Vec2::X), DT);
    assert_eq!(*harness.state(), PlayerState::Run);

    let mut idled = false;
    for _ in 0..60 {
        harness.step(&MovementInput::neutral(), DT);
        if *harness.state() == PlayerState::Idle {
            idled = true;
            break;
        }
        assert!(harness.body.velocity.x > 0.0);
    }
    assert!(idled);
    assert_eq!(harness.body.velocity.x, 0.0);
}

#[test]
fn test_walking_off_a_ledge_falls() {
    let mut harness = Harness::new(&[]);
    harness.physics.floor = false;
    assert!(harness.step(&MovementInput::neutral(), DT));
    assert_eq!(*harness.state(), PlayerState::Fall);
    assert!(harness.body.velocity.y < 0.0);
}

#[test]
fn test_transitions_report_exactly_when_state_changes() {
    let mut harness = Harness::new(&[Ability::Dash]);
    let script = [
        MovementInput::neutral(),
        pressing(Vec2::X),
        pressing(Vec2::X),
        dash_toward(Vec2::X),
        MovementInput::neutral(),
        jump_press(),
    ];
    for input in &script {
        let before = harness.state().to_string();
        let changed = harness.step(input, DT);
        assert_eq!(changed, before != harness.state().to_string());
    }
}

// -----------------------------------------------------------------------------
// Jumping
// -----------------------------------------------------------------------------

#[test]
fn test_normal_jump_from_floor() {
    let mut harness = Harness::new(&[]);
    assert!(harness.step(&jump_press(), DT));

    match harness.state() {
        PlayerState::Jump(jump) => assert_eq!(jump.jump_type, JumpType::Normal),
        other => panic!("expected Jump, got {other}"),
    }
    assert!((harness.body.velocity.y - harness.tuning.jump_speed()).abs() < EPSILON);
    assert!(harness.body.coyote_time_expired);
}

#[test]
fn test_jump_turns_into_fall_after_apex() {
    let mut harness = Harness::new(&[]);
    harness.step(&jump_press(), DT);
    harness.physics.floor = false;

    let mut fell = false;
    for _ in 0..240 {
        harness.step(&jump_hold(), DT);
        if *harness.state() == PlayerState::Fall {
            fell = true;
            break;
        }
        assert!(harness.body.velocity.y >= 0.0);
    }
    assert!(fell);
    assert!(harness.body.velocity.y < 0.0);
}

#[test]
fn test_coyote_jump_inside_buffer_gets_bonus() {
    let mut harness = Harness::new(&[]);
    harness.start_falling();
    harness.step(&MovementInput::neutral(), 0.05);
    assert!(!harness.body.coyote_time_expired);

    let before = harness.body.velocity.y;
    let dt = 0.02;
    assert!(harness.step(&jump_press(), dt));

    match harness.state() {
        PlayerState::Jump(jump) => assert_eq!(jump.jump_type, JumpType::CoyoteTime),
        other => panic!("expected Jump, got {other}"),
    }
    let tuning = &harness.tuning;
    let after_gravity = before - tuning.gravity() * tuning.apex_gravity_scale * dt;
    let expected = after_gravity + tuning.jump_speed() + 0.07 * tuning.coyote_bonus_per_second;
    assert!((harness.body.velocity.y - expected).abs() < 1e-2);
}

#[test]
fn test_jump_after_coyote_buffer_is_refused() {
    let mut harness = Harness::new(&[]);
    harness.start_falling();
    for _ in 0..3 {
        harness.step(&MovementInput::neutral(), 0.05);
    }
    assert!(harness.body.coyote_time_expired);

    let classified = classify_jump(
        &harness.body,
        &jump_press(),
        &harness.physics,
        &harness.tuning,
        false,
    );
    assert_eq!(classified, JumpType::None);
    assert!(!harness.step(&jump_press(), DT));
    assert_eq!(*harness.state(), PlayerState::Fall);
}

#[test]
fn test_stale_held_jump_is_not_a_coyote_jump() {
    let tuning = MovementTuning::default();
    let mut body = PlayerBody::new(&tuning, Vec2::ZERO);
    body.coyote_time_elapsed = 0.05;
    body.jump_held_time = 0.3;
    let physics = FakePhysics::default();

    assert_eq!(
        classify_jump(&body, &jump_hold(), &physics, &tuning, false),
        JumpType::None
    );
}

#[test]
fn test_early_jump_press_fires_on_landing() {
    let mut harness = Harness::new(&[]);
    harness.start_falling();
    for _ in 0..3 {
        harness.step(&MovementInput::neutral(), 0.05);
    }
    harness.step(&jump_press(), 0.05);
    assert_eq!(*harness.state(), PlayerState::Fall);

    harness.physics.floor = true;
    assert!(harness.step(&jump_hold(), 0.05));
    match harness.state() {
        PlayerState::Jump(jump) => assert_eq!(jump.jump_type, JumpType::Normal),
        other => panic!("expected Jump, got {other}"),
    }
}

#[test]
fn test_airborne_input_holds_horizontal_speed_and_turns() {
    let tuning = MovementTuning::default();
    let mut body = PlayerBody::new(&tuning, Vec2::ZERO);
    body.velocity = Vec2::new(40.0, 0.0);
    let physics = FakePhysics::default();
    let mut sink = RecordingSink::default();

    let right = pressing(Vec2::X);
    let mut tick = Tick {
        body: &mut body,
        input: &right,
        physics: &physics,
        sink: &mut sink,
        tuning: &tuning,
        dt: DT,
    };
    generic_position_update(&mut tick);
    assert_eq!(body.velocity.x, 40.0);
    assert_eq!(body.facing, crate::math::XDirection::Right);

    let left = pressing(Vec2::NEG_X);
    let mut tick = Tick {
        body: &mut body,
        input: &left,
        physics: &physics,
        sink: &mut sink,
        tuning: &tuning,
        dt: DT,
    };
    generic_position_update(&mut tick);
    assert_eq!(body.velocity.x, 40.0);
    assert_eq!(body.facing, crate::math::XDirection::Left);
}

#[test]
fn test_airborne_input_from_standstill_runs() {
    let tuning = MovementTuning::default();
    let mut body = PlayerBody::new(&tuning, Vec2::ZERO);
    let physics = FakePhysics::default();
    let mut sink = RecordingSink::default();
    let left = pressing(Vec2::NEG_X);

    let mut tick = Tick {
        body: &mut body,
        input: &left,
        physics: &physics,
        sink: &mut sink,
        tuning: &tuning,
        dt: DT,
    };
    generic_position_update(&mut tick);
    assert_eq!(body.velocity.x, -tuning.run_speed);
}

#[test]
fn test_apex_gravity_is_reduced() {
    let tuning = MovementTuning::default();
    let physics = FakePhysics::default();
    let mut sink = RecordingSink::default();
    let input = MovementInput::neutral();

    let mut fast = PlayerBody::new(&tuning, Vec2::ZERO);
    fast.velocity.y = 200.0;
    let mut slow = PlayerBody::new(&tuning, Vec2::ZERO);
    slow.velocity.y = 10.0;

    for body in [&mut fast, &mut slow] {
        let mut tick = Tick {
            body,
            input: &input,
            physics: &physics,
            sink: &mut sink,
            tuning: &tuning,
            dt: DT,
        };
        generic_position_update(&mut tick);
    }

    let fast_drop = 200.0 - fast.velocity.y;
    let slow_drop = 10.0 - slow.velocity.y;
    assert!((slow_drop - fast_drop * tuning.apex_gravity_scale).abs() < EPSILON);
}

#[test]
fn test_ceiling_nudge_slides_off_clipped_corner() {
    let tuning = MovementTuning::default();
    let mut body = PlayerBody::new(&tuning, Vec2::ZERO);
    body.velocity = Vec2::new(0.0, 100.0);
    let mut physics = FakePhysics {
        ceiling: true,
        sensors: CeilingSensors {
            left_outer: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut sink = RecordingSink::default();
    let input = MovementInput::neutral();
    let cached = Vec2::new(10.0, 300.0);

    let mut tick = Tick {
        body: &mut body,
        input: &input,
        physics: &physics,
        sink: &mut sink,
        tuning: &tuning,
        dt: DT,
    };
    assert!(ceiling_nudge(&mut tick, cached));
    assert_eq!(body.position.x, tuning.ceiling_nudge_distance);
    assert_eq!(body.velocity, cached);

    physics.sensors.left_inner = true;
    let mut tick = Tick {
        body: &mut body,
        input: &input,
        physics: &physics,
        sink: &mut sink,
        tuning: &tuning,
        dt: DT,
    };
    assert!(!ceiling_nudge(&mut tick, cached));
    assert_eq!(body.position.x, tuning.ceiling_nudge_distance);
}

#[test]
fn test_no_ceiling_nudge_without_ceiling_contact() {
    let tuning = MovementTuning::default();
    let mut body = PlayerBody::new(&tuning, Vec2::ZERO);
    body.velocity = Vec2::new(0.0, 100.0);
    let physics = FakePhysics {
        sensors: CeilingSensors {
            right_outer: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut sink = RecordingSink::default();
    let input = MovementInput::neutral();

    let mut tick = Tick {
        body: &mut body,
        input: &input,
        physics: &physics,
        sink: &mut sink,
        tuning: &tuning,
        dt: DT,
    };
    assert!(!ceiling_nudge(&mut tick, Vec2::new(10.0, 300.0)));
    assert_eq!(body.position.x, 0.0);
    assert_eq!(body.velocity, Vec2::new(0.0, 100.0));
}

#[test]
fn test_ceiling_sensor_mirror_nudges_left() {
    let sensors = CeilingSensors {
        right_outer: true,
        ..Default::default()
    };
    assert_eq!(sensors.nudge_direction(), Some(-1.0));
    assert_eq!(CeilingSensors::default().nudge_direction(), None);
}

// -----------------------------------------------------------------------------
// Dashing
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_dash_runs_full_duration_then_idles() {
    let mut harness = Harness::new(&[Ability::Dash]);
    assert!(harness.step(&dash_toward(Vec2::X), DT));

    match harness.state() {
        PlayerState::Dash(dash) => assert!(dash.direction().distance(Vec2::X) < EPSILON),
        other => panic!("expected Dash, got {other}"),
    }
    assert_eq!(harness.body.dashes_available, 0);

    let dash_speed = harness.tuning.dash_speed;
    let mut exited = false;
    for _ in 0..30 {
        harness.step(&MovementInput::neutral(), DT);
        if let PlayerState::Dash(dash) = harness.state() {
            assert!(dash.elapsed < harness.tuning.dash_duration);
            assert!((harness.body.velocity.length() - dash_speed).abs() < EPSILON);
            assert!(harness.body.velocity.normalize().distance(Vec2::X) < EPSILON);
            assert!(harness.sink.dash_particles);
        } else {
            exited = true;
            break;
        }
    }

    assert!(exited);
    assert_eq!(*harness.state(), PlayerState::Idle);
    assert_eq!(harness.body.velocity.x, harness.tuning.run_speed);
    assert!(!harness.sink.dash_particles);
}

#[test]
fn test_dash_without_input_follows_facing() {
    let mut harness = Harness::new(&[Ability::Dash]);
    harness.body.facing = crate::math::XDirection::Left;
    harness.step(&dash_toward(Vec2::ZERO), DT);

    match harness.state() {
        PlayerState::Dash(dash) => assert!(dash.direction().distance(Vec2::NEG_X) < EPSILON),
        other => panic!("expected Dash, got {other}"),
    }
}

#[test]
fn test_dash_exit_clamps_vertical_speed() {
    let mut harness = Harness::new(&[Ability::Dash]);
    harness.start_falling();
    harness.step(&dash_toward(Vec2::Y), DT);
    assert!(harness.state().is_dash());

    for _ in 0..30 {
        harness.step(&MovementInput::neutral(), DT);
        if !harness.state().is_dash() {
            break;
        }
    }
    assert_eq!(*harness.state(), PlayerState::Fall);
    assert!(harness.body.velocity.y <= harness.tuning.dash_exit_vertical_max);
}

#[test]
fn test_dash_charges_are_spent_and_refilled_on_landing() {
    let mut harness = Harness::new(&[Ability::Dash, Ability::DoubleDash]);
    assert_eq!(harness.body.max_dashes, 2);
    harness.start_falling();

    for expected_left in [1, 0] {
        harness.step(&dash_toward(Vec2::X), DT);
        assert!(harness.state().is_dash());
        assert_eq!(harness.body.dashes_available, expected_left);
        for _ in 0..30 {
            harness.step(&MovementInput::neutral(), DT);
            assert!(harness.body.dashes_available <= harness.body.max_dashes);
            if !harness.state().is_dash() {
                break;
            }
        }
        assert_eq!(*harness.state(), PlayerState::Fall);
    }

    assert!(!harness.step(&dash_toward(Vec2::X), DT));
    assert_eq!(harness.body.dashes_available, 0);

    harness.physics.floor = true;
    harness.step(&MovementInput::neutral(), DT);
    assert_eq!(harness.body.dashes_available, harness.body.max_dashes);
}

#[test]
fn test_dash_requires_the_ability() {
    let mut harness = Harness::new(&[]);
    harness.step(&dash_toward(Vec2::X), DT);
    assert!(!harness.state().is_dash());
}

#[test]
fn test_jumping_out_of_a_dash_boosts() {
    let mut harness = Harness::new(&[Ability::Dash]);
    harness.step(&dash_toward(Vec2::X), DT);
    assert!(harness.step(&jump_press(), DT));

    match harness.state() {
        PlayerState::Jump(jump) => assert_eq!(jump.jump_type, JumpType::BoostJump),
        other => panic!("expected Jump, got {other}"),
    }
    let tuning = &harness.tuning;
    assert!(
        (harness.body.velocity.x - tuning.run_speed * tuning.boost_jump_horizontal_scale).abs()
            < EPSILON
    );
    assert!(
        (harness.body.velocity.y - tuning.jump_speed() * tuning.boost_jump_vertical_scale).abs()
            < EPSILON
    );
}

// -----------------------------------------------------------------------------
// Charging and super jump
// -----------------------------------------------------------------------------

#[test]
fn test_full_charge_releases_into_super_jump() {
    let mut harness = Harness::new(&[Ability::SuperJump]);
    assert!(harness.step(&crouch(true), DT));
    assert!(matches!(harness.state(), PlayerState::Charge(_)));
    assert_eq!(harness.body.velocity, Vec2::ZERO);

    for _ in 0..4 {
        harness.step(&crouch(false), 0.125);
    }
    assert!(harness.body.can_super_jump);
    assert_eq!(harness.sink.tint, Tint::Charged);

    assert!(harness.step(&MovementInput::neutral(), DT));
    assert_eq!(*harness.state(), PlayerState::SuperJump);
    assert_eq!(harness.sink.tint, Tint::Normal);

    harness.physics.floor = false;
    harness.step(&MovementInput::neutral(), DT);
    assert_eq!(
        harness.body.velocity,
        Vec2::new(0.0, harness.tuning.super_jump_speed)
    );

    assert!(harness.step(&crouch(true), DT));
    assert_eq!(*harness.state(), PlayerState::Idle);
    assert!(!harness.body.can_super_jump);
}

#[test]
fn test_short_charge_returns_to_idle() {
    let mut harness = Harness::new(&[Ability::SuperJump]);
    harness.step(&crouch(true), DT);
    harness.step(&crouch(false), 0.25);
    assert!(!harness.body.can_super_jump);

    assert!(harness.step(&MovementInput::neutral(), DT));
    assert_eq!(*harness.state(), PlayerState::Idle);
}

#[test]
fn test_super_jump_stops_at_ceiling() {
    let mut harness = Harness::new(&[Ability::SuperJump]);
    harness.step(&crouch(true), DT);
    for _ in 0..4 {
        harness.step(&crouch(false), 0.125);
    }
    harness.step(&MovementInput::neutral(), DT);
    assert_eq!(*harness.state(), PlayerState::SuperJump);

    harness.physics.floor = false;
    harness.physics.ceiling = true;
    assert!(harness.step(&MovementInput::neutral(), DT));
    assert_eq!(*harness.state(), PlayerState::Fall);
    assert_eq!(harness.body.velocity.y, 0.0);
}

// -----------------------------------------------------------------------------
// Grapple
// -----------------------------------------------------------------------------

#[test]
fn test_grapple_from_rest_hangs_still() {
    let mut harness = Harness::new(&[Ability::Grapple]);
    harness.physics.floor = false;
    harness.body.grapple_anchor = Some(Vec2::new(0.0, 100.0));

    assert!(harness.step(&grapple_hold(), DT));
    match harness.state() {
        PlayerState::Grapple(grapple) => {
            assert!((grapple.length - 100.0).abs() < EPSILON);
            assert_eq!(grapple.angular_velocity, 0.0);
        }
        other => panic!("expected Grapple, got {other}"),
    }

    for _ in 0..120 {
        assert!(!harness.step(&grapple_hold(), DT));
    }
    match harness.state() {
        PlayerState::Grapple(grapple) => assert_eq!(grapple.angular_velocity, 0.0),
        other => panic!("expected Grapple, got {other}"),
    }
    assert!(harness.body.position.distance(Vec2::ZERO) < EPSILON);
    assert_eq!(harness.body.velocity, Vec2::ZERO);
}

#[test]
fn test_pendulum_swings_through_bottom_with_bounded_amplitude() {
    let anchor = Vec2::new(0.0, 100.0);
    let start_angle: f32 = 0.3;
    let position = anchor + 100.0 * Vec2::new(start_angle.sin(), -start_angle.cos());
    let mut grapple = GrappleState::from_body(anchor, position, Vec2::ZERO)
        .unwrap_or_else(|| panic!("rope too short"));
    assert!((grapple.angle - start_angle).abs() < EPSILON);

    let gravity = MovementTuning::default().gravity();
    let mut crossed = false;
    for _ in 0..480 {
        grapple.integrate(gravity, 1.0 / 240.0);
        assert!(grapple.angle.abs() <= start_angle * 1.1);
        assert!((grapple.bob_position().distance(anchor) - 100.0).abs() < EPSILON);
        crossed |= grapple.angle < 0.0;
    }
    assert!(crossed);
}

#[test]
fn test_grapple_entry_velocity_becomes_swing() {
    let anchor = Vec2::new(0.0, 100.0);
    let grapple = GrappleState::from_body(anchor, Vec2::ZERO, Vec2::new(50.0, 0.0))
        .unwrap_or_else(|| panic!("rope too short"));
    assert!((grapple.angular_velocity - 0.5).abs() < EPSILON);
    assert!(grapple.exit_velocity().distance(Vec2::new(50.0, 0.0)) < EPSILON);
}

#[test]
fn test_releasing_grapple_keeps_swing_velocity() {
    let mut harness = Harness::new(&[Ability::Grapple]);
    harness.physics.floor = false;
    harness.body.grapple_anchor = Some(Vec2::new(0.0, 100.0));
    harness.body.velocity = Vec2::new(100.0, 0.0);
    harness.step(&grapple_hold(), DT);
    harness.step(&grapple_hold(), DT);

    let PlayerState::Grapple(grapple) = harness.state().clone() else {
        panic!("expected Grapple");
    };
    assert!(harness.step(&MovementInput::neutral(), DT));
    assert_eq!(*harness.state(), PlayerState::Fall);
    assert!(harness.body.velocity.distance(grapple.exit_velocity()) < EPSILON);
    assert!(harness.body.velocity.x > 0.0);
    assert_eq!(harness.body.grapple_anchor, None);
}

#[test]
fn test_touching_a_wall_cancels_grapple() {
    let mut harness = Harness::new(&[Ability::Grapple]);
    harness.physics.floor = false;
    harness.body.grapple_anchor = Some(Vec2::new(0.0, 100.0));
    harness.step(&grapple_hold(), DT);

    harness.physics.wall = true;
    assert!(harness.step(&grapple_hold(), DT));
    assert_eq!(*harness.state(), PlayerState::Idle);
    assert_eq!(harness.body.velocity, Vec2::ZERO);
    assert_eq!(harness.body.grapple_anchor, None);
}

#[test]
fn test_grapple_from_the_ground_swings_until_it_lands_again() {
    let mut harness = Harness::new(&[Ability::Grapple]);
    harness.body.grapple_anchor = Some(Vec2::new(60.0, 100.0));

    assert!(harness.step(&grapple_hold(), DT));
    assert!(matches!(harness.state(), PlayerState::Grapple(_)));
    for _ in 0..3 {
        assert!(!harness.step(&grapple_hold(), DT));
    }
    assert!(matches!(harness.state(), PlayerState::Grapple(_)));
    assert!(harness.body.position.x > 0.0);

    harness.physics.floor = false;
    assert!(!harness.step(&grapple_hold(), DT));
    assert!(matches!(harness.state(), PlayerState::Grapple(_)));

    harness.physics.floor = true;
    assert!(harness.step(&grapple_hold(), DT));
    assert_eq!(*harness.state(), PlayerState::Idle);
    assert_eq!(harness.body.grapple_anchor, None);
}

#[test]
fn test_rope_too_short_refuses_grapple() {
    assert!(GrappleState::from_body(Vec2::ZERO, Vec2::new(0.5, 0.0), Vec2::ZERO).is_none());
}

// -----------------------------------------------------------------------------
// Body bookkeeping
// -----------------------------------------------------------------------------

#[test]
fn test_double_dash_unlock_raises_and_refills() {
    let tuning = MovementTuning::default();
    let mut body = PlayerBody::new(&tuning, Vec2::ZERO);
    body.unlock(Ability::Dash);
    body.spend_dash();
    assert!(!body.can_dash());

    body.unlock(Ability::DoubleDash);
    assert_eq!(body.max_dashes, 2);
    assert_eq!(body.dashes_available, 2);

    body.spend_dash();
    body.spend_dash();
    body.spend_dash();
    assert_eq!(body.dashes_available, 0);
}

#[test]
fn test_animation_names() {
    assert_eq!(AnimationState::Idle.name(), "idle");
    assert_eq!(AnimationState::Run.name(), "run");
    assert_eq!(AnimationState::Jump.name(), "jump");
    assert_eq!(AnimationState::Fall.name(), "fall");
}
