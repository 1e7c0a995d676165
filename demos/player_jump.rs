//! Player Jump
//!
//! This example walks a player off a ledge and jumps during coyote time.
//!
//! Key concepts:
//! - Buffered jump input with highest precedence
//! - Coyote time started by the Fall transition
//! - A toy host loop that resolves the floor collision
//! - Scheduler-driven fixed timestep
//!
//! Run with: RUST_LOG=debug cargo run --example player_jump

use tickstate::actors::{Player, PlayerSenses};
use tickstate::builder::SchedulerConfig;
use tickstate::host::{Actor, Scheduler};
use tracing_subscriber::EnvFilter;

const LEDGE_X: f32 = 40.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Player Jump ===\n");

    let mut scheduler = Scheduler::new(SchedulerConfig::default()).expect("default config is valid");
    let player = Actor::with_label(Player::new(), "player").expect("player machine builds");
    let id = scheduler.spawn(player).expect("fresh machine activates");

    let dt = scheduler.fixed_delta() as f32;
    let (mut x, mut y) = (0.0_f32, 0.0_f32);

    for tick in 0..90 {
        let Some(actor) = scheduler.actor_mut::<Player>(id) else {
            break;
        };
        let player = actor.owner_mut();

        // Toy physics: integrate, then clamp onto the floor left of the ledge.
        let mut velocity = player.velocity();
        x += velocity.x * dt;
        y += velocity.y * dt;
        let on_floor = x < LEDGE_X && y >= 0.0;
        if on_floor {
            y = 0.0;
            velocity.y = velocity.y.min(0.0);
        }
        player.set_velocity(velocity);

        player.sense(PlayerSenses {
            on_floor,
            move_axis: 1.0,
            ..PlayerSenses::default()
        });
        if x >= LEDGE_X && tick % 2 == 0 && player.jump_request().is_stopped() && y < 5.0 {
            player.press_jump();
        }

        let before = actor.state();
        scheduler.step();

        let Some(actor) = scheduler.actor::<Player>(id) else {
            break;
        };
        if actor.state() != before {
            println!(
                "  tick {:>2}: {:?} -> {:?} at x {:>5.1}, y {:>6.1}",
                tick,
                before,
                actor.state(),
                x,
                y
            );
        }
    }

    println!("\n=== Example Complete ===");
}
