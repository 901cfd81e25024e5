//! Math domain: unit tests for signs, directions and angle helpers.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::Vec2;

use super::{
    Angle, Sign, XDirection, decay_toward_zero, move_toward, shrink_toward_zero, with_sign,
};

const EPSILON: f32 = 1e-5;

#[test]
fn test_sign_of_and_unit() {
    assert_eq!(Sign::of(3.0), Sign::Positive);
    assert_eq!(Sign::of(-0.5), Sign::Negative);
    assert_eq!(Sign::of(0.0), Sign::None);
    assert_eq!(Sign::Positive.opposite(), Sign::Negative);
    assert_eq!(Sign::None.opposite(), Sign::None);
    assert_eq!(with_sign(-7.0, Sign::Positive), 7.0);
    assert_eq!(with_sign(7.0, Sign::Negative), -7.0);
    assert_eq!(with_sign(7.0, Sign::None), 0.0);
}

#[test]
fn test_x_direction_helpers() {
    assert_eq!(XDirection::from_x(0.2), Some(XDirection::Right));
    assert_eq!(XDirection::from_x(-1.0), Some(XDirection::Left));
    assert_eq!(XDirection::from_x(0.0), None);
    assert_eq!(
        XDirection::toward(Vec2::new(10.0, 0.0), Vec2::new(-4.0, 50.0)),
        XDirection::Left
    );
    assert_eq!(XDirection::Left.opposite(), XDirection::Right);
    assert_eq!(XDirection::Left.unit_vector(), Vec2::new(-1.0, 0.0));
}

#[test]
fn test_move_toward_never_overshoots() {
    assert_eq!(move_toward(10.0, 0.0, 4.0), 6.0);
    assert_eq!(move_toward(3.0, 0.0, 4.0), 0.0);
    assert_eq!(move_toward(-3.0, 0.0, 1.0), -2.0);
}

#[test]
fn test_decay_snaps_to_zero_below_threshold() {
    let v = decay_toward_zero(100.0, 10.0, 0.1, 1.0);
    assert!(v > 0.0 && v < 100.0);
    assert_eq!(decay_toward_zero(1.2, 10.0, 0.1, 1.0), 0.0);
}

#[test]
fn test_shrink_toward_zero_keeps_direction() {
    let v = shrink_toward_zero(Vec2::new(30.0, 40.0), 25.0);
    assert!((v.length() - 25.0).abs() < EPSILON);
    assert!(v.x > 0.0 && v.y > 0.0);
    assert_eq!(shrink_toward_zero(Vec2::new(3.0, 4.0), 10.0), Vec2::ZERO);
}

#[test]
fn test_angle_wraps_into_half_open_range() {
    assert!((Angle::from_radians(3.0 * PI).radians() - PI).abs() < EPSILON);
    assert!((Angle::from_radians(-FRAC_PI_2 - 2.0 * PI).radians() + FRAC_PI_2).abs() < EPSILON);
}

#[test]
fn test_angle_smallest_rotation_crosses_the_seam() {
    let a = Angle::from_radians(PI - 0.1);
    let b = Angle::from_radians(-PI + 0.1);
    assert!((a.smallest_angle_to(b).radians() - 0.2).abs() < 1e-4);
    assert!((b.smallest_angle_to(a).radians() + 0.2).abs() < 1e-4);
}

#[test]
fn test_angle_lerp_moves_partway() {
    let from = Angle::from_radians(0.0);
    let to = Angle::from_radians(FRAC_PI_2);
    assert!((from.lerp(to, 0.5).radians() - FRAC_PI_2 / 2.0).abs() < EPSILON);
    assert!((from.lerp(to, 5.0).radians() - FRAC_PI_2).abs() < EPSILON);
}

#[test]
fn test_angle_between_points() {
    let angle = Angle::between(Vec2::ZERO, Vec2::new(0.0, 10.0));
    assert!((angle.radians() - FRAC_PI_2).abs() < EPSILON);
    assert!((angle.unit_vector() - Vec2::Y).length() < EPSILON);
}
