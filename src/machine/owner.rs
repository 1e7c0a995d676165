//! The contract a drivable entity implements.

use crate::core::{Decision, State};
use crate::machine::context::StateContext;

/// An entity whose behavior is sequenced by a
/// [`StateMachine`](crate::machine::StateMachine).
///
/// The machine only ever calls these three methods. Decision logic lives in
/// [`next_state`](Self::next_state), one-off effects of entering a state in
/// [`transition_into`](Self::transition_into), and steady-state work in
/// [`tick_behavior`](Self::tick_behavior).
///
/// # Example
///
/// ```rust
/// use tickstate::core::Decision;
/// use tickstate::machine::{StateContext, StateMachine, StateOwner};
/// use tickstate::state_enum;
///
/// state_enum! {
///     enum Lamp { Off, On }
/// }
///
/// #[derive(Default)]
/// struct Switch {
///     pressed: bool,
///     flips: usize,
/// }
///
/// impl StateOwner for Switch {
///     type State = Lamp;
///
///     fn transition_into(&mut self, _from: Option<Lamp>, _to: Lamp, _ctx: &StateContext<Lamp>) {
///         self.flips += 1;
///     }
///
///     fn next_state(&self, ctx: &StateContext<Lamp>) -> Decision<Lamp> {
///         match ctx.current {
///             Lamp::Off => Decision::goto_if(self.pressed, Lamp::On),
///             Lamp::On => Decision::Keep,
///         }
///     }
///
///     fn tick_behavior(&mut self, _ctx: &StateContext<Lamp>, _delta: f64) {}
/// }
///
/// let mut switch = Switch::default();
/// let mut machine = StateMachine::<Lamp>::try_new().unwrap();
/// machine.activate(&mut switch).unwrap();
///
/// switch.pressed = true;
/// machine.advance(&mut switch, 1.0 / 60.0).unwrap();
/// assert_eq!(machine.current(), Some(Lamp::On));
/// assert_eq!(switch.flips, 2);
/// ```
pub trait StateOwner {
    type State: State;

    /// Apply the effects of entering `to`.
    ///
    /// Called exactly once per transition, before `to` becomes the recorded
    /// state; `ctx` still describes the state being left. `from` is `None`
    /// for the activation transition, where nothing is being left and `ctx`
    /// already shows the initial state with zero elapsed time. Must not
    /// request further transitions;
    /// follow-ups surface through the next [`next_state`](Self::next_state)
    /// call.
    fn transition_into(
        &mut self,
        from: Option<Self::State>,
        to: Self::State,
        ctx: &StateContext<Self::State>,
    );

    /// Decide whether to stay in `ctx.current` or move elsewhere.
    ///
    /// Evaluated at least once per tick and again after every transition.
    fn next_state(&self, ctx: &StateContext<Self::State>) -> Decision<Self::State>;

    /// Steady-state work for the settled state.
    ///
    /// Called exactly once per tick after resolution. `ctx.elapsed` does not
    /// yet include `delta`.
    fn tick_behavior(&mut self, ctx: &StateContext<Self::State>, delta: f64);
}
