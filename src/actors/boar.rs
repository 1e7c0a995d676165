//! Patrolling enemy that charges when it spots the player.

use crate::actors::body::{Body, Facing};
use crate::core::{Countdown, Decision};
use crate::machine::{StateContext, StateOwner};
use crate::state_enum;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

pub const MAX_SPEED: f32 = 230.0;
pub const ACCELERATION: f32 = MAX_SPEED / 0.1;

/// Seconds of idling before the boar starts walking.
pub const IDLE_PATIENCE: f64 = 2.0;

/// Seconds the boar keeps charging after losing sight of the player.
pub const CALM_DOWN_TIME: f64 = 2.5;

state_enum! {
    pub enum BoarState {
        Idle,
        Run,
        Walk,
    }
}

/// Probe results the host writes before every tick.
///
/// `*_ahead` probes point the way the boar faces and `*_behind` the other
/// way; turning around swaps them so decisions made later in the same tick
/// see the new direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoarSenses {
    pub wall_ahead: bool,
    pub wall_behind: bool,
    pub floor_ahead: bool,
    pub floor_behind: bool,
    pub player_in_sight: bool,
}

impl Default for BoarSenses {
    /// Open, flat ground with nobody around.
    fn default() -> Self {
        Self {
            wall_ahead: false,
            wall_behind: false,
            floor_ahead: true,
            floor_behind: true,
            player_in_sight: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Boar {
    senses: BoarSenses,
    facing: Facing,
    body: Body,
    calm_down: Countdown,
    animation: &'static str,
}

impl Default for Boar {
    fn default() -> Self {
        Self::new()
    }
}

impl Boar {
    pub fn new() -> Self {
        Self::with_body(Body::default())
    }

    pub fn with_body(body: Body) -> Self {
        Self {
            senses: BoarSenses::default(),
            facing: Facing::Left,
            body,
            calm_down: Countdown::new(CALM_DOWN_TIME),
            animation: "",
        }
    }

    pub fn sense(&mut self, senses: BoarSenses) {
        self.senses = senses;
    }

    pub fn senses(&self) -> &BoarSenses {
        &self.senses
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Accept the velocity left over after the host resolved collisions.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.body.velocity = velocity;
    }

    /// Animation the host should be playing.
    pub fn animation(&self) -> &'static str {
        self.animation
    }

    pub fn calm_down(&self) -> &Countdown {
        &self.calm_down
    }

    fn turn_around(&mut self) {
        self.facing = self.facing.flipped();
        let s = &mut self.senses;
        std::mem::swap(&mut s.wall_ahead, &mut s.wall_behind);
        std::mem::swap(&mut s.floor_ahead, &mut s.floor_behind);
        trace!(facing = ?self.facing, "boar turned around");
    }

    fn blocked(&self) -> bool {
        self.senses.wall_ahead || !self.senses.floor_ahead
    }

    fn advance_body(&mut self, speed: f32, delta: f64) {
        let target = speed * self.facing.sign();
        self.body.accelerate(target, ACCELERATION, 1.0, delta);
    }
}

impl StateOwner for Boar {
    type State = BoarState;

    fn transition_into(
        &mut self,
        _from: Option<BoarState>,
        to: BoarState,
        _ctx: &StateContext<BoarState>,
    ) {
        match to {
            BoarState::Idle => {
                self.animation = "idle";
                if self.senses.wall_ahead {
                    self.turn_around();
                }
            }
            BoarState::Walk => {
                self.animation = "walk";
                if !self.senses.floor_ahead {
                    self.turn_around();
                }
            }
            BoarState::Run => {
                self.animation = "run";
            }
        }
    }

    fn next_state(&self, ctx: &StateContext<BoarState>) -> Decision<BoarState> {
        let sees_player = self.senses.player_in_sight;

        match ctx.current {
            BoarState::Idle => Decision::goto_if(sees_player, BoarState::Run)
                .or_else(|| Decision::goto_if(ctx.elapsed_exceeds(IDLE_PATIENCE), BoarState::Walk)),
            BoarState::Walk => Decision::goto_if(sees_player, BoarState::Run)
                .or_else(|| Decision::goto_if(self.blocked(), BoarState::Idle)),
            BoarState::Run => Decision::goto_if(
                !sees_player && self.calm_down.is_stopped(),
                BoarState::Walk,
            ),
        }
    }

    fn tick_behavior(&mut self, ctx: &StateContext<BoarState>, delta: f64) {
        match ctx.current {
            BoarState::Idle => self.advance_body(0.0, delta),
            BoarState::Walk => self.advance_body(MAX_SPEED / 3.0, delta),
            BoarState::Run => {
                if self.blocked() {
                    self.turn_around();
                }
                self.advance_body(MAX_SPEED, delta);
                if self.senses.player_in_sight {
                    self.calm_down.start();
                }
            }
        }
        self.calm_down.tick(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::StateMachine;

    fn activated() -> (Boar, StateMachine<BoarState>) {
        let mut boar = Boar::new();
        let mut machine = StateMachine::builder().label("boar").build().unwrap();
        machine.activate(&mut boar).unwrap();
        (boar, machine)
    }

    #[test]
    fn idles_then_walks_after_patience() {
        let (mut boar, mut machine) = activated();
        assert_eq!(boar.animation(), "idle");

        for expected_elapsed in [0.0, 1.0, 2.0] {
            assert_eq!(machine.elapsed(), expected_elapsed);
            let outcome = machine.advance(&mut boar, 1.0).unwrap();
            assert!(!outcome.changed());
        }

        assert_eq!(machine.elapsed(), 3.0);
        let outcome = machine.advance(&mut boar, 1.0).unwrap();
        assert_eq!(outcome.state, BoarState::Walk);
        assert_eq!(outcome.transitions, 1);
        assert_eq!(boar.animation(), "walk");
    }

    #[test]
    fn charges_on_sight_and_calms_down() {
        let (mut boar, mut machine) = activated();

        boar.sense(BoarSenses {
            player_in_sight: true,
            ..BoarSenses::default()
        });
        machine.advance(&mut boar, 0.5).unwrap();
        assert_eq!(machine.current(), Some(BoarState::Run));
        assert!(boar.calm_down().is_running());
        assert!(boar.velocity().x < 0.0);

        boar.sense(BoarSenses::default());
        machine.advance(&mut boar, 1.0).unwrap();
        assert_eq!(machine.current(), Some(BoarState::Run));

        machine.advance(&mut boar, 1.0).unwrap();
        assert_eq!(machine.current(), Some(BoarState::Run));

        // Calm-down (2.5 s) ran out during the previous tick.
        machine.advance(&mut boar, 1.0).unwrap();
        assert_eq!(machine.current(), Some(BoarState::Walk));
    }

    #[test]
    fn walking_into_wall_turns_idle_and_around() {
        let (mut boar, mut machine) = StateMachine::builder()
            .initial(BoarState::Walk)
            .build()
            .map(|m| (Boar::new(), m))
            .unwrap();
        machine.activate(&mut boar).unwrap();
        assert_eq!(boar.facing(), Facing::Left);

        boar.sense(BoarSenses {
            wall_ahead: true,
            ..BoarSenses::default()
        });
        let outcome = machine.advance(&mut boar, 0.1).unwrap();

        assert_eq!(outcome.state, BoarState::Idle);
        assert_eq!(boar.facing(), Facing::Right);
        assert!(!boar.senses().wall_ahead);
        assert!(boar.senses().wall_behind);
    }

    #[test]
    fn ledge_at_walk_start_turns_around() {
        let (mut boar, mut machine) = activated();
        boar.sense(BoarSenses {
            floor_ahead: false,
            ..BoarSenses::default()
        });

        for _ in 0..4 {
            machine.advance(&mut boar, 1.0).unwrap();
        }

        // Turned on entering Walk, so the fresh probe sees floor and it keeps walking.
        assert_eq!(machine.current(), Some(BoarState::Walk));
        assert_eq!(boar.facing(), Facing::Right);
        assert!(boar.velocity().x > 0.0);
    }

    #[test]
    fn running_turns_at_walls() {
        let (mut boar, mut machine) = activated();
        boar.sense(BoarSenses {
            player_in_sight: true,
            wall_ahead: true,
            ..BoarSenses::default()
        });

        machine.advance(&mut boar, 0.1).unwrap();

        assert_eq!(machine.current(), Some(BoarState::Run));
        assert_eq!(boar.facing(), Facing::Right);
    }
}
