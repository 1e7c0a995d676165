//! Platformer player: running, buffered and coyote-time jumps, wall slides.

use crate::actors::body::{is_zero_approx, Body, Facing};
use crate::core::{Countdown, Decision};
use crate::machine::{StateContext, StateOwner};
use crate::state_enum;
use glam::Vec2;
use serde::{Deserialize, Serialize};

pub const RUN_SPEED: f32 = 200.0;
pub const JUMP_VELOCITY: f32 = -300.0;
pub const FLOOR_ACCELERATION: f32 = RUN_SPEED / 0.2;
pub const AIR_ACCELERATION: f32 = RUN_SPEED / 0.1;
pub const WALL_JUMP_VELOCITY: Vec2 = Vec2::new(500.0, -300.0);

/// Seconds after leaving the ground during which a jump is still allowed.
pub const COYOTE_TIME: f64 = 0.1;

/// Seconds a jump press stays buffered.
pub const JUMP_BUFFER_TIME: f64 = 0.1;

/// Seconds a wall jump holds its launch velocity before steering resumes.
pub const WALL_JUMP_LOCK: f64 = 0.1;

state_enum! {
    pub enum PlayerState {
        NonGroundIdle,
        Idle,
        Running,
        Jump,
        Fall,
        Landing,
        WallSliding,
        WallJump,
    }
}

impl PlayerState {
    pub fn is_grounded(self) -> bool {
        matches!(self, Self::Idle | Self::Running | Self::Landing)
    }
}

/// World and input state the host writes before every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSenses {
    pub on_floor: bool,
    pub on_wall: bool,
    /// Horizontal component of the touched wall's normal
    pub wall_normal_x: f32,
    pub hand_on_wall: bool,
    pub foot_on_wall: bool,
    /// Horizontal input in [-1, 1]
    pub move_axis: f32,
    /// The current animation has not finished yet
    pub animation_playing: bool,
}

#[derive(Clone, Debug)]
pub struct Player {
    senses: PlayerSenses,
    body: Body,
    facing: Facing,
    coyote: Countdown,
    jump_request: Countdown,
    animation: &'static str,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self::with_body(Body::default())
    }

    pub fn with_body(body: Body) -> Self {
        Self {
            senses: PlayerSenses::default(),
            body,
            facing: Facing::Right,
            coyote: Countdown::new(COYOTE_TIME),
            jump_request: Countdown::new(JUMP_BUFFER_TIME),
            animation: "",
        }
    }

    pub fn sense(&mut self, senses: PlayerSenses) {
        self.senses = senses;
    }

    pub fn senses(&self) -> &PlayerSenses {
        &self.senses
    }

    /// Jump pressed: buffer the request briefly.
    pub fn press_jump(&mut self) {
        self.jump_request.start();
    }

    /// Jump released: drop the request and cut a rising jump short.
    pub fn release_jump(&mut self) {
        self.jump_request.stop();
        let cap = JUMP_VELOCITY / 2.0;
        if self.body.velocity.y < cap {
            self.body.velocity.y = cap;
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Accept the velocity left over after the host resolved collisions.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.body.velocity = velocity;
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn animation(&self) -> &'static str {
        self.animation
    }

    pub fn coyote(&self) -> &Countdown {
        &self.coyote
    }

    pub fn jump_request(&self) -> &Countdown {
        &self.jump_request
    }

    fn can_jump(&self) -> bool {
        self.senses.on_floor || self.coyote.is_running()
    }

    fn can_wall_slide(&self) -> bool {
        self.senses.on_wall && self.senses.hand_on_wall && self.senses.foot_on_wall
    }

    fn is_still(&self) -> bool {
        is_zero_approx(self.senses.move_axis) && is_zero_approx(self.body.velocity.x)
    }

    fn acceleration(&self) -> f32 {
        if self.senses.on_floor {
            FLOOR_ACCELERATION
        } else {
            AIR_ACCELERATION
        }
    }

    /// Steer with the input axis.
    fn steer(&mut self, gravity_scale: f32, delta: f64) {
        let axis = self.senses.move_axis;
        let acceleration = self.acceleration();
        self.body
            .accelerate(axis * RUN_SPEED, acceleration, gravity_scale, delta);
        if let Some(facing) = Facing::from_axis(axis) {
            self.facing = facing;
        }
    }

    /// Brake to a horizontal stop.
    fn stand(&mut self, gravity_scale: f32, delta: f64) {
        let acceleration = self.acceleration();
        self.body.accelerate(0.0, acceleration, gravity_scale, delta);
    }

    /// No gravity on the tick a jump launches.
    fn launch_gravity_scale(ctx: &StateContext<PlayerState>) -> f32 {
        if ctx.just_entered() {
            0.0
        } else {
            1.0
        }
    }
}

impl StateOwner for Player {
    type State = PlayerState;

    fn transition_into(
        &mut self,
        from: Option<PlayerState>,
        to: PlayerState,
        _ctx: &StateContext<PlayerState>,
    ) {
        let was_grounded = from.is_some_and(PlayerState::is_grounded);
        if !was_grounded && to.is_grounded() {
            self.coyote.stop();
        }

        match to {
            PlayerState::Idle | PlayerState::NonGroundIdle => self.animation = "idle",
            PlayerState::Running => self.animation = "running",
            PlayerState::Jump => {
                self.animation = "jump";
                self.body.velocity.y = JUMP_VELOCITY;
                self.coyote.stop();
                self.jump_request.stop();
            }
            PlayerState::Fall => {
                self.animation = "fall";
                if was_grounded {
                    self.coyote.start();
                }
            }
            PlayerState::Landing => self.animation = "landing",
            PlayerState::WallSliding => self.animation = "wall_sliding",
            PlayerState::WallJump => {
                self.animation = "jump";
                self.body.velocity = Vec2::new(
                    WALL_JUMP_VELOCITY.x * self.senses.wall_normal_x,
                    WALL_JUMP_VELOCITY.y,
                );
                self.jump_request.stop();
            }
        }
    }

    fn next_state(&self, ctx: &StateContext<PlayerState>) -> Decision<PlayerState> {
        use PlayerState::*;

        let on_floor = self.senses.on_floor;

        if self.can_jump() && self.jump_request.is_running() {
            return Decision::Goto(Jump);
        }
        if ctx.current.is_grounded() && !on_floor {
            return Decision::Goto(Fall);
        }

        let still = self.is_still();
        let rising = self.body.velocity.y < 0.0;

        match ctx.current {
            NonGroundIdle => Decision::Goto(if on_floor { Idle } else { Fall }),
            Idle => Decision::goto_if(!still, Running),
            Running => Decision::goto_if(still, Idle),
            Jump => Decision::goto_if(!rising, Fall),
            Fall => {
                if on_floor {
                    Decision::Goto(if still { Landing } else { Running })
                } else {
                    Decision::goto_if(self.can_wall_slide(), WallSliding)
                }
            }
            Landing => Decision::goto_if(!self.senses.animation_playing, Idle),
            WallSliding => Decision::goto_if(self.jump_request.is_running(), WallJump)
                .or_else(|| Decision::goto_if(on_floor, Idle))
                .or_else(|| Decision::goto_if(!self.senses.on_wall, Fall)),
            WallJump => {
                Decision::goto_if(self.can_wall_slide() && !ctx.just_entered(), WallSliding)
                    .or_else(|| Decision::goto_if(!rising, Fall))
            }
        }
    }

    fn tick_behavior(&mut self, ctx: &StateContext<PlayerState>, delta: f64) {
        match ctx.current {
            PlayerState::Idle
            | PlayerState::NonGroundIdle
            | PlayerState::Running
            | PlayerState::Fall => self.steer(1.0, delta),
            PlayerState::Jump => self.steer(Self::launch_gravity_scale(ctx), delta),
            PlayerState::Landing => self.stand(1.0, delta),
            PlayerState::WallSliding => {
                self.steer(1.0 / 3.0, delta);
                if let Some(facing) = Facing::from_axis(self.senses.wall_normal_x) {
                    self.facing = facing;
                }
            }
            PlayerState::WallJump => {
                if ctx.elapsed < WALL_JUMP_LOCK {
                    self.stand(Self::launch_gravity_scale(ctx), delta);
                } else {
                    self.steer(1.0, delta);
                }
            }
        }

        self.coyote.tick(delta);
        self.jump_request.tick(delta);
    }
}
