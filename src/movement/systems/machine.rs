//! Movement domain: drives the player state machine from the ECS.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{HitManager, HitStatus, KnockbackCarry, strip_knockback};
use crate::movement::context::Tick;
use crate::movement::{
    ContactState, MovementInput, MovementTuning, Player, PlayerBody, PlayerPresentation,
    PlayerStateMachine,
};

/// One state machine tick per frame.
///
/// The physics step has already resolved last frame's velocity, so the body
/// starts from the resolved velocity minus the knockback it carried. The new
/// velocity handed back to physics is the state's velocity plus the current
/// knockback from the player's [`HitManager`].
pub(crate) fn step_player(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<
        (
            &mut Transform,
            &mut LinearVelocity,
            &mut PlayerBody,
            &mut PlayerStateMachine,
            &ContactState,
            &mut PlayerPresentation,
            &mut HitManager,
            &HitStatus,
            &mut KnockbackCarry,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let Ok((
        mut transform,
        mut velocity,
        mut body,
        mut machine,
        contacts,
        mut presentation,
        mut hit,
        status,
        mut carry,
    )) = query.single_mut()
    else {
        return;
    };

    let start = transform.translation.truncate();
    body.position = start;
    body.velocity = strip_knockback(
        velocity.0,
        carry.0,
        contacts.on_wall,
        contacts.on_floor || contacts.on_ceiling,
    );

    let input = if status.stunned {
        MovementInput::neutral()
    } else {
        input.clone()
    };

    let mut tick = Tick {
        body: &mut *body,
        input: &input,
        physics: contacts,
        sink: &mut *presentation,
        tuning: &tuning,
        dt,
    };
    machine.step(&mut tick);
    hit.set_invulnerability_override(machine.state().is_dash());

    if body.position != start {
        transform.translation.x = body.position.x;
        transform.translation.y = body.position.y;
    }
    carry.0 = hit.knockback();
    velocity.0 = body.velocity + carry.0;
}
