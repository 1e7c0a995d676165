//! End-to-end scenarios driving the bundled actors through the host layer.

use tickstate::actors::boar::IDLE_PATIENCE;
use tickstate::actors::player::JUMP_VELOCITY;
use tickstate::actors::{Boar, BoarSenses, BoarState, Player, PlayerSenses, PlayerState};
use tickstate::builder::SchedulerConfig;
use tickstate::core::{Decision, State};
use tickstate::host::{Actor, Scheduler};
use tickstate::machine::{MachineError, StateContext, StateMachine, StateOwner};

/// Records callbacks and follows a fixed A -> B script.
#[derive(Default)]
struct Recorder {
    entered: Vec<(Option<BoarState>, BoarState)>,
    ticked: Vec<(BoarState, f64, f64)>,
    asked: std::cell::Cell<usize>,
}

impl StateOwner for Recorder {
    type State = BoarState;

    fn transition_into(&mut self, from: Option<BoarState>, to: BoarState, _: &StateContext<BoarState>) {
        self.entered.push((from, to));
    }

    fn next_state(&self, ctx: &StateContext<BoarState>) -> Decision<BoarState> {
        self.asked.set(self.asked.get() + 1);
        Decision::goto_if(ctx.current == BoarState::Idle, BoarState::Walk)
    }

    fn tick_behavior(&mut self, ctx: &StateContext<BoarState>, delta: f64) {
        self.ticked.push((ctx.current, ctx.elapsed, delta));
    }
}

#[test]
fn activation_enters_first_declared_state() {
    let mut owner = Recorder::default();
    let mut machine = StateMachine::<BoarState>::try_new().unwrap();

    machine.activate(&mut owner).unwrap();

    assert_eq!(machine.current(), BoarState::first());
    assert_eq!(owner.entered, vec![(None, BoarState::Idle)]);
    assert_eq!(owner.asked.get(), 0);
}

#[test]
fn advancing_dormant_machine_is_a_fault() {
    let mut owner = Recorder::default();
    let mut machine = StateMachine::<BoarState>::builder()
        .label("dormant")
        .build()
        .unwrap();

    let err = machine.advance(&mut owner, 0.1).unwrap_err();
    assert_eq!(
        err,
        MachineError::NotActivated {
            label: "dormant".to_string()
        }
    );
    assert_eq!(err.to_string(), "Machine 'dormant' advanced before activate()");
}

#[test]
fn single_tick_cascade_resets_elapsed() {
    let mut owner = Recorder::default();
    let mut machine = StateMachine::<BoarState>::try_new().unwrap();
    machine.activate(&mut owner).unwrap();

    let outcome = machine.advance(&mut owner, 0.2).unwrap();

    assert_eq!(outcome.transitions, 1);
    assert_eq!(owner.entered[1], (Some(BoarState::Idle), BoarState::Walk));
    assert_eq!(owner.ticked, vec![(BoarState::Walk, 0.0, 0.2)]);
    assert_eq!(owner.asked.get(), 2);
    assert_eq!(machine.elapsed(), 0.2);
}

#[test]
fn boar_walks_once_idle_exceeds_patience() {
    let mut boar = Actor::with_label(Boar::new(), "boar").unwrap();
    boar.activate().unwrap();
    boar.owner_mut().sense(BoarSenses::default());

    let mut elapsed_before = Vec::new();
    let mut states_after = Vec::new();
    for _ in 0..4 {
        elapsed_before.push(boar.machine().elapsed());
        states_after.push(boar.advance(1.0).unwrap().state);
    }

    assert_eq!(elapsed_before, vec![0.0, 1.0, 2.0, 3.0]);
    assert!(elapsed_before[3] > IDLE_PATIENCE);
    assert_eq!(
        states_after,
        vec![BoarState::Idle, BoarState::Idle, BoarState::Idle, BoarState::Walk]
    );
    assert_eq!(boar.machine().history().len(), 2);
}

#[test]
fn falling_player_lands_or_jumps() {
    let floor = PlayerSenses {
        on_floor: true,
        animation_playing: true,
        ..PlayerSenses::default()
    };

    // Landing: on floor, nothing buffered.
    let machine = StateMachine::builder()
        .initial(PlayerState::Fall)
        .build()
        .unwrap();
    let mut landing = Actor::new(Player::new(), machine);
    landing.activate().unwrap();
    landing.owner_mut().sense(floor);
    assert_eq!(landing.advance(1.0 / 60.0).unwrap().state, PlayerState::Landing);

    // Jump: buffered press while able to jump wins over landing.
    let machine = StateMachine::builder()
        .initial(PlayerState::Fall)
        .build()
        .unwrap();
    let mut jumping = Actor::new(Player::new(), machine);
    jumping.activate().unwrap();
    jumping.owner_mut().sense(floor);
    jumping.owner_mut().press_jump();

    let outcome = jumping.advance(1.0 / 60.0).unwrap();
    assert_eq!(outcome.state, PlayerState::Jump);
    assert_eq!(outcome.transitions, 1);
    assert_eq!(jumping.owner().velocity().y, JUMP_VELOCITY);
}

#[test]
fn scheduler_drives_mixed_actors() {
    let mut scheduler = Scheduler::new(SchedulerConfig {
        fixed_delta: 0.5,
        max_steps_per_frame: 16,
    })
    .unwrap();

    let boar = scheduler
        .spawn(Actor::with_label(Boar::new(), "boar").unwrap())
        .unwrap();
    let player = scheduler
        .spawn(Actor::with_label(Player::new(), "player").unwrap())
        .unwrap();

    scheduler
        .actor_mut::<Player>(player)
        .unwrap()
        .owner_mut()
        .sense(PlayerSenses {
            on_floor: true,
            ..PlayerSenses::default()
        });

    // Six half-second ticks: the boar has idled 2.5 s before the sixth.
    assert_eq!(scheduler.frame(3.0), 6);

    let boar = scheduler.actor::<Boar>(boar).unwrap();
    assert_eq!(boar.state(), Some(BoarState::Walk));
    assert_eq!(boar.owner().animation(), "walk");

    let player = scheduler.actor::<Player>(player).unwrap();
    assert_eq!(player.state(), Some(PlayerState::Idle));
}
