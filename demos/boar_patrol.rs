//! Boar Patrol
//!
//! This example drives a single enemy through a scripted patrol.
//!
//! Key concepts:
//! - Host writes probe results before every tick
//! - Idle -> Walk after a time-in-state threshold
//! - Same-tick cascades when the player shows up
//! - Transition logging through `tracing`
//!
//! Run with: RUST_LOG=debug cargo run --example boar_patrol

use tickstate::actors::{Boar, BoarSenses};
use tickstate::host::Actor;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Boar Patrol ===\n");

    let mut boar = Actor::with_label(Boar::new(), "boar").expect("boar machine builds");
    boar.activate().expect("fresh machine activates");

    let dt = 0.25;
    for tick in 0..40 {
        let senses = BoarSenses {
            // A wall appears ahead a few seconds in, the player later on.
            wall_ahead: (14..16).contains(&tick),
            player_in_sight: (24..28).contains(&tick),
            ..BoarSenses::default()
        };
        boar.owner_mut().sense(senses);

        let outcome = boar.advance(dt).expect("active machine advances");
        if outcome.changed() {
            println!(
                "  tick {:>2}: {:<4} facing {:?}, vx {:>7.1}",
                tick,
                outcome.state,
                boar.owner().facing(),
                boar.owner().velocity().x
            );
        }
    }

    println!("\nPath: {:?}", boar.machine().history().get_path());

    println!("\n=== Example Complete ===");
}
