mod config;

use std::time::Duration;

use config::SimConfig;
use mc_rs_living::game_world::{GameEvent, GameWorld};
use mc_rs_living::level::FlatLevel;
use tracing::{debug, error, info, trace, warn};

/// Running totals printed when the simulation stops.
#[derive(Debug, Default)]
struct Stats {
    spawned: usize,
    died: usize,
    drops: usize,
    player_hits: usize,
}

impl Stats {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::MobSpawned {
                runtime_id,
                mob_type,
                position,
                ..
            } => {
                self.spawned += 1;
                info!(runtime_id, %mob_type, ?position, "mob spawned");
            }
            GameEvent::MobMoved {
                runtime_id,
                position,
                ..
            } => trace!(runtime_id, ?position, "mob moved"),
            GameEvent::EntityEvent { runtime_id, event } => {
                debug!(runtime_id, ?event, "entity event")
            }
            GameEvent::MobDied { runtime_id, .. } => {
                self.died += 1;
                info!(runtime_id, "mob died");
            }
            GameEvent::ItemDropped { position, item } => {
                self.drops += 1;
                debug!(item = %item.item, count = item.count, ?position, "item dropped");
            }
            GameEvent::EntityRemoved { unique_id } => debug!(unique_id, "entity removed"),
            GameEvent::MobAttackPlayer {
                mob_runtime_id,
                damage,
                ..
            } => {
                self.player_hits += 1;
                info!(mob_runtime_id, damage, "player hit");
            }
        }
    }
}

/// Restore mobs saved by a previous run, one JSON document per line.
/// Returns how many were restored.
fn restore_mobs(game: &mut GameWorld, path: &str) -> usize {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            debug!(path, %e, "no saved mobs");
            return 0;
        }
    };
    let mut restored = 0;
    for line in contents.lines().filter(|l| !l.trim().is_empty()) {
        match game.load_mob(line) {
            Ok(_) => restored += 1,
            Err(e) => warn!(%e, "skipping saved mob"),
        }
    }
    restored
}

fn save_mobs(game: &mut GameWorld, path: &str) {
    let mut lines = Vec::new();
    for mob in game.all_mobs() {
        match game.save_mob(mob.runtime_id) {
            Ok(doc) => lines.push(doc),
            Err(e) => error!(runtime_id = mob.runtime_id, %e, "failed to save mob"),
        }
    }
    let count = lines.len();
    match std::fs::write(path, lines.join("\n")) {
        Ok(()) => info!(path, count, "mobs saved"),
        Err(e) => error!(path, %e, "failed to write saved mobs"),
    }
}

#[tokio::main]
async fn main() {
    let config = match SimConfig::load("sim.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load sim.toml: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "MC-RS living simulation v{} (difficulty: {:?}, AI: {}, floor: {})",
        env!("CARGO_PKG_VERSION"),
        config.world.difficulty,
        config.world.ai_enabled,
        config.world.floor_y
    );

    let level = FlatLevel::with_floor(config.world.floor_y);
    let mut game = GameWorld::with_level(1, Box::new(level));
    game.set_settings(config.world.settings());
    let mut stats = Stats::default();

    let restored = match &config.simulation.save_file {
        Some(path) => restore_mobs(&mut game, path),
        None => 0,
    };
    if restored > 0 {
        info!(restored, "resumed saved mobs");
    } else {
        for entry in &config.spawn {
            if let Err(e) = game.spawn_mob(&entry.mob, entry.position()) {
                warn!(mob = %entry.mob, %e, "spawn skipped");
            }
        }
    }

    let player = config.player.as_ref().map(|p| {
        let unique_id = game.allocate_entity_id();
        game.spawn_player(unique_id, unique_id as u64, p.position());
        info!(unique_id, position = ?p.position(), "player joined");
        unique_id
    });

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

    // Handle Ctrl+C
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let mut tick_interval =
        tokio::time::interval(Duration::from_millis(config.simulation.tick_millis.max(1)));
    let mut player_dead = false;
    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                game.tick();
                for event in game.drain_events() {
                    stats.record(&event);
                }

                if let Some(unique_id) = player {
                    let health = game.player_health(unique_id).unwrap_or(0.0);
                    if health <= 0.0 && !player_dead {
                        player_dead = true;
                        info!(unique_id, tick = game.current_tick(), "player died");
                    }
                }

                let ticks = config.simulation.ticks;
                if ticks > 0 && game.current_tick() >= ticks {
                    break;
                }
            }
            Ok(()) = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    if let Some(path) = &config.simulation.save_file {
        save_mobs(&mut game, path);
    }

    info!(
        ticks = game.current_tick(),
        spawned = stats.spawned,
        died = stats.died,
        drops = stats.drops,
        player_hits = stats.player_hits,
        alive = game.all_mobs().len(),
        "Simulation finished."
    );
}
