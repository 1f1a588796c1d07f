//! ECS game world: bevy_ecs World, entity management, the living tick and the event bus.
//!
//! Mobs carry a [`LivingEntity`] plus plain mirror components (position,
//! rotation, velocity, health, grounding, burning) that queries and the
//! network layer read. Entities are ticked strictly one at a time: the
//! living component is taken out of the ECS, ticked against a [`WorldView`],
//! and put back before the next entity starts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use bevy_ecs::prelude::*;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::block::{Block, BlockPos};
use crate::components::*;
use crate::error::LivingError;
use crate::event::{
    DamageCause, DamageEvent, Damager, DeathEvent, EntityEventKind, ItemDrop, LivingListener,
    RegainHealthEvent, RegainReason,
};
use crate::level::{FlatLevel, Level};
use crate::living::LivingEntity;
use crate::mob_registry::MobRegistry;
use crate::world::{LivingWorld, TickContext, WorldSettings};

/// Horizontal and vertical push a mob's melee swing gives a player.
const MOB_MELEE_KNOCKBACK: f32 = 0.4;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Outgoing events queued by ECS operations for the network layer to send.
#[derive(Resource, Default)]
pub struct OutgoingEvents {
    pub events: Vec<GameEvent>,
}

/// Global tick counter (incremented every 50 ms).
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

/// Thread-safe entity ID allocator (shared by mobs and players).
#[derive(Resource)]
pub struct EntityIdAllocator {
    next: AtomicI64,
}

impl EntityIdAllocator {
    pub fn new(start: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
        }
    }

    /// Allocate the next unique entity ID.
    pub fn allocate(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Current value (next ID that will be allocated).
    pub fn current(&self) -> i64 {
        self.next.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Game events (ECS → network layer)
// ---------------------------------------------------------------------------

/// Snapshot of a mob for sending to new players.
#[derive(Debug, Clone)]
pub struct MobSnapshot {
    pub unique_id: i64,
    pub runtime_id: u64,
    pub mob_type: String,
    pub position: Position,
    pub rotation: Rotation,
    pub health: f32,
    pub max_health: f32,
}

/// Events produced by the game world, consumed by the network layer.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new mob was spawned: broadcast AddActor to all players.
    MobSpawned {
        runtime_id: u64,
        unique_id: i64,
        mob_type: String,
        position: Position,
        health: f32,
        max_health: f32,
    },
    /// A mob moved or turned: broadcast MoveActorAbsolute.
    MobMoved {
        runtime_id: u64,
        position: Position,
        rotation: Rotation,
        on_ground: bool,
    },
    /// Hurt, death or respawn animation.
    EntityEvent {
        runtime_id: u64,
        event: EntityEventKind,
    },
    /// A mob died: broadcast RemoveEntity once the animation played.
    MobDied { runtime_id: u64, unique_id: i64 },
    /// An item stack was dropped into the world.
    ItemDropped { position: Position, item: ItemDrop },
    /// An entity was removed (despawn).
    EntityRemoved { unique_id: i64 },
    /// A mob hit a player (melee).
    MobAttackPlayer {
        mob_runtime_id: u64,
        target_runtime_id: u64,
        damage: f32,
        knockback: Velocity,
    },
}

// ---------------------------------------------------------------------------
// World view handed to living entities
// ---------------------------------------------------------------------------

/// What a ticking entity may know about another entity.
#[derive(Debug, Clone, Copy)]
struct Tracked {
    runtime_id: u64,
    position: Position,
    alive: bool,
    player: bool,
    on_fire: bool,
}

/// [`LivingWorld`] backed by the level, the listeners and a per-tick snapshot
/// of every entity. Side effects are collected as [`GameEvent`]s.
struct WorldView<'a> {
    level: &'a mut dyn Level,
    listeners: &'a mut [Box<dyn LivingListener>],
    tracked: &'a HashMap<Entity, Tracked>,
    events: &'a mut Vec<GameEvent>,
}

impl LivingWorld for WorldView<'_> {
    fn block_at(&self, pos: BlockPos) -> Result<Block, LivingError> {
        self.level.block_at(pos)
    }

    fn entity_alive(&self, entity: Entity) -> bool {
        self.tracked.get(&entity).is_some_and(|t| t.alive)
    }

    fn entity_position(&self, entity: Entity) -> Option<Position> {
        self.tracked.get(&entity).map(|t| t.position)
    }

    fn nearest_player(&self, from: Position, range: f32) -> Option<(Entity, Position)> {
        self.tracked
            .iter()
            .filter(|(_, t)| t.player && t.alive)
            .map(|(e, t)| (*e, t.position, from.distance_xz(&t.position)))
            .filter(|(_, _, dist)| *dist <= range)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(e, pos, _)| (e, pos))
    }

    fn drop_item(&mut self, position: Position, item: ItemDrop) {
        self.level.drop_item(position, item.clone());
        self.events.push(GameEvent::ItemDropped { position, item });
    }

    fn broadcast(&mut self, runtime_id: u64, event: EntityEventKind) {
        self.events.push(GameEvent::EntityEvent { runtime_id, event });
    }

    fn call_damage(&mut self, event: &mut DamageEvent) {
        for listener in self.listeners.iter_mut() {
            listener.on_damage(event);
        }
    }

    fn call_regain_health(&mut self, event: &mut RegainHealthEvent) {
        for listener in self.listeners.iter_mut() {
            listener.on_regain_health(event);
        }
    }

    fn call_death(&mut self, event: &mut DeathEvent) {
        for listener in self.listeners.iter_mut() {
            listener.on_death(event);
        }
    }
}

// ---------------------------------------------------------------------------
// GameWorld
// ---------------------------------------------------------------------------

/// The ECS game world.
pub struct GameWorld {
    pub world: World,
    pub mob_registry: MobRegistry,
    level: Box<dyn Level>,
    listeners: Vec<Box<dyn LivingListener>>,
}

impl GameWorld {
    /// Create a game world on the default flat level.
    pub fn new(starting_entity_id: i64) -> Self {
        Self::with_level(starting_entity_id, Box::new(FlatLevel::new()))
    }

    pub fn with_level(starting_entity_id: i64, level: Box<dyn Level>) -> Self {
        let mut world = World::new();
        world.insert_resource(OutgoingEvents::default());
        world.insert_resource(TickCounter::default());
        world.insert_resource(EntityIdAllocator::new(starting_entity_id));
        world.insert_resource(WorldSettings::default());

        Self {
            world,
            mob_registry: MobRegistry::new(),
            level,
            listeners: Vec::new(),
        }
    }

    pub fn set_settings(&mut self, settings: WorldSettings) {
        self.world.insert_resource(settings);
    }

    pub fn settings(&self) -> WorldSettings {
        *self.world.resource::<WorldSettings>()
    }

    /// Register a listener that sees every damage, heal and death event.
    pub fn add_listener(&mut self, listener: Box<dyn LivingListener>) {
        self.listeners.push(listener);
    }

    /// Run one game tick: every living entity in turn, then dead cleanup.
    pub fn tick(&mut self) {
        let current_tick = {
            let mut counter = self.world.resource_mut::<TickCounter>();
            counter.0 += 1;
            counter.0
        };
        let ctx = TickContext::new(current_tick, self.world.resource::<WorldSettings>());
        system_living_tick(
            &mut self.world,
            self.level.as_mut(),
            &mut self.listeners,
            &ctx,
        );
        system_cleanup_dead(&mut self.world);
    }

    /// Drain all pending outgoing events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.world.resource_mut::<OutgoingEvents>().events)
    }

    /// Return the current tick count.
    pub fn current_tick(&self) -> u64 {
        self.world.resource::<TickCounter>().0
    }

    /// Allocate an entity ID (for players or mobs).
    pub fn allocate_entity_id(&self) -> i64 {
        self.world.resource::<EntityIdAllocator>().allocate()
    }

    /// Spawn a mob at full health. Returns `(unique_id, runtime_id)`.
    pub fn spawn_mob(&mut self, type_id: &str, position: Position) -> Result<(i64, u64), LivingError> {
        self.spawn_mob_with(type_id, position, |_| {})
    }

    /// Spawn a mob from a document written by [`GameWorld::save_mob`].
    /// A document with no health left is refused.
    pub fn load_mob(&mut self, saved: &str) -> Result<(i64, u64), LivingError> {
        let mut tag: Map<String, Value> = serde_json::from_str(saved)?;
        let type_id = tag
            .get("identifier")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| LivingError::UnknownMobType(String::new()))?;
        self.spawn_mob_with(&type_id, Position::default(), |living| {
            living.load_saved(&mut tag);
        })
    }

    fn spawn_mob_with(
        &mut self,
        type_id: &str,
        position: Position,
        init: impl FnOnce(&mut LivingEntity),
    ) -> Result<(i64, u64), LivingError> {
        let def = self
            .mob_registry
            .get(type_id)
            .ok_or_else(|| LivingError::UnknownMobType(type_id.to_string()))?;
        let unique_id = self.world.resource::<EntityIdAllocator>().allocate();
        let runtime_id = unique_id as u64;

        let mut living = LivingEntity::from_definition(runtime_id, def, position);
        init(&mut living);
        if !living.is_alive() {
            return Err(LivingError::DeadOnLoad(type_id.to_string()));
        }
        let position = living.position();
        let health = living.health();
        let max_health = living.max_health();

        let entity = self
            .world
            .spawn((
                EntityId {
                    unique_id,
                    runtime_id,
                },
                Mob,
                MobType(type_id.to_string()),
            ))
            .id();
        mirror(&mut self.world, entity, &living);
        self.world.entity_mut(entity).insert(living);

        self.push_events([GameEvent::MobSpawned {
            runtime_id,
            unique_id,
            mob_type: type_id.to_string(),
            position,
            health,
            max_health,
        }]);
        debug!(type_id, runtime_id, "mob spawned");
        Ok((unique_id, runtime_id))
    }

    /// Serialize a mob's persistent state.
    pub fn save_mob(&mut self, runtime_id: u64) -> Result<String, LivingError> {
        let entity = self.find_mob_entity(runtime_id)?;
        let mut tag = Map::new();
        if let Some(mob_type) = self.world.get::<MobType>(entity) {
            tag.insert("identifier".into(), Value::String(mob_type.0.clone()));
        }
        let living = self
            .world
            .get::<LivingEntity>(entity)
            .ok_or(LivingError::EntityNotFound(runtime_id))?;
        living.save_to(&mut tag);
        Ok(serde_json::to_string(&Value::Object(tag))?)
    }

    /// Deal environmental or plugin damage to a mob. Returns the remaining
    /// health, or `None` when the hit was cancelled.
    pub fn damage_mob(
        &mut self,
        runtime_id: u64,
        cause: DamageCause,
        amount: f32,
    ) -> Result<Option<f32>, LivingError> {
        let mut event = DamageEvent::new(cause, amount);
        self.apply_to_mob(runtime_id, &mut event)
    }

    /// A player's melee hit on a mob, with knockback away from the player.
    pub fn player_attack_mob(
        &mut self,
        player_unique_id: i64,
        mob_runtime_id: u64,
        damage: f32,
    ) -> Result<Option<f32>, LivingError> {
        let (entity, position, on_fire) = {
            let mut query = self
                .world
                .query_filtered::<(Entity, &EntityId, &Position, Option<&Burning>), With<Player>>();
            query
                .iter(&self.world)
                .find(|(_, eid, _, _)| eid.unique_id == player_unique_id)
                .map(|(e, _, pos, burning)| (e, *pos, burning.is_some_and(|b| b.0)))
                .ok_or(LivingError::EntityNotFound(player_unique_id as u64))?
        };
        let damager = Damager {
            entity,
            position,
            on_fire,
            child: None,
        };
        let mut event = DamageEvent::by_entity(damager, DamageCause::EntityAttack, damage);
        self.apply_to_mob(mob_runtime_id, &mut event)
    }

    fn apply_to_mob(
        &mut self,
        runtime_id: u64,
        event: &mut DamageEvent,
    ) -> Result<Option<f32>, LivingError> {
        let entity = self.find_mob_entity(runtime_id)?;
        let ctx = self.tick_context();
        let health = self.with_living(entity, |living, view| {
            living.apply_damage(event, &ctx, view);
            living.health()
        })?;
        Ok((!event.is_cancelled()).then_some(health))
    }

    /// Heal a mob. Returns the new health.
    pub fn heal_mob(&mut self, runtime_id: u64, amount: f32) -> Result<f32, LivingError> {
        let entity = self.find_mob_entity(runtime_id)?;
        self.with_living(entity, |living, view| {
            let mut event = RegainHealthEvent::new(amount, RegainReason::Magic);
            living.heal(&mut event, view);
            living.health()
        })
    }

    pub fn kill_mob(&mut self, runtime_id: u64) -> Result<(), LivingError> {
        let entity = self.find_mob_entity(runtime_id)?;
        self.with_living(entity, |living, view| living.kill(view))
    }

    pub fn set_mob_on_fire(&mut self, runtime_id: u64, seconds: u32) -> Result<(), LivingError> {
        let entity = self.find_mob_entity(runtime_id)?;
        self.with_living(entity, |living, _| living.set_on_fire(seconds))
    }

    /// Check if a runtime_id belongs to a mob in the ECS.
    pub fn is_mob(&mut self, runtime_id: u64) -> bool {
        self.find_mob_entity(runtime_id).is_ok()
    }

    /// Remove a mob by runtime_id. Returns `true` if found and removed.
    pub fn remove_mob(&mut self, runtime_id: u64) -> bool {
        let Ok(entity) = self.find_mob_entity(runtime_id) else {
            return false;
        };
        let unique_id = self
            .world
            .get::<EntityId>(entity)
            .map(|e| e.unique_id)
            .unwrap_or(0);
        self.push_events([GameEvent::EntityRemoved { unique_id }]);
        self.world.despawn(entity);
        true
    }

    /// Get snapshots of all alive mobs (for sending to new players).
    pub fn all_mobs(&mut self) -> Vec<MobSnapshot> {
        let mut query = self.world.query_filtered::<(
            &EntityId,
            &Position,
            &Rotation,
            &Health,
            &MobType,
        ), (With<Mob>, Without<Dead>)>();
        query
            .iter(&self.world)
            .map(|(eid, pos, rot, health, mob_type)| MobSnapshot {
                unique_id: eid.unique_id,
                runtime_id: eid.runtime_id,
                mob_type: mob_type.0.clone(),
                position: *pos,
                rotation: *rot,
                health: health.current,
                max_health: health.max,
            })
            .collect()
    }

    /// Spawn an ECS mirror entity for a player.
    pub fn spawn_player(&mut self, unique_id: i64, runtime_id: u64, position: Position) {
        self.world.spawn((
            EntityId {
                unique_id,
                runtime_id,
            },
            position,
            Health {
                current: 20.0,
                max: 20.0,
            },
            Burning(false),
            Player,
        ));
    }

    /// Update the ECS mirror position for a player.
    pub fn update_player_position(&mut self, unique_id: i64, position: Position) {
        let mut query = self
            .world
            .query_filtered::<(&EntityId, &mut Position), With<Player>>();
        for (eid, mut pos) in query.iter_mut(&mut self.world) {
            if eid.unique_id == unique_id {
                *pos = position;
                return;
            }
        }
    }

    /// Player health as tracked by the ECS mirror.
    pub fn player_health(&mut self, unique_id: i64) -> Option<f32> {
        let mut query = self
            .world
            .query_filtered::<(&EntityId, &Health), With<Player>>();
        query
            .iter(&self.world)
            .find(|(eid, _)| eid.unique_id == unique_id)
            .map(|(_, health)| health.current)
    }

    /// Despawn the ECS mirror entity for a player by unique_id.
    pub fn despawn_player(&mut self, unique_id: i64) {
        let mut query = self
            .world
            .query_filtered::<(Entity, &EntityId), With<Player>>();
        let found = query
            .iter(&self.world)
            .find(|(_, eid)| eid.unique_id == unique_id)
            .map(|(entity, _)| entity);
        if let Some(entity) = found {
            self.world.despawn(entity);
        }
    }

    fn tick_context(&self) -> TickContext {
        TickContext::new(self.current_tick(), self.world.resource::<WorldSettings>())
    }

    fn push_events(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        self.world
            .resource_mut::<OutgoingEvents>()
            .events
            .extend(events);
    }

    /// Run `f` on one mob's living component outside the tick.
    fn with_living<R>(
        &mut self,
        entity: Entity,
        f: impl FnOnce(&mut LivingEntity, &mut WorldView<'_>) -> R,
    ) -> Result<R, LivingError> {
        let mut tracked = snapshot_entities(&mut self.world);
        run_living(
            &mut self.world,
            self.level.as_mut(),
            &mut self.listeners,
            &mut tracked,
            entity,
            f,
        )
    }

    /// Find a mob entity by runtime_id.
    fn find_mob_entity(&mut self, runtime_id: u64) -> Result<Entity, LivingError> {
        let mut query = self
            .world
            .query_filtered::<(Entity, &EntityId), With<Mob>>();
        query
            .iter(&self.world)
            .find(|(_, eid)| eid.runtime_id == runtime_id)
            .map(|(entity, _)| entity)
            .ok_or(LivingError::EntityNotFound(runtime_id))
    }
}

// ---------------------------------------------------------------------------
// Systems (manual, called by GameWorld::tick)
// ---------------------------------------------------------------------------

/// Tick every living mob in turn and resolve the melee swings it asked for.
fn system_living_tick(
    world: &mut World,
    level: &mut dyn Level,
    listeners: &mut [Box<dyn LivingListener>],
    ctx: &TickContext,
) {
    let mut tracked = snapshot_entities(world);
    let mobs: Vec<Entity> = world
        .query_filtered::<Entity, (With<LivingEntity>, Without<Dead>)>()
        .iter(world)
        .collect();

    for entity in mobs {
        let outcome = run_living(world, level, listeners, &mut tracked, entity, |living, view| {
            let before = (living.position(), living.rotation());
            let result = living.base_tick(1, ctx, view);
            let moved = before != (living.position(), living.rotation());
            (result, moved, living.take_melee_requests())
        });
        let (result, moved, swings) = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(?entity, %err, "living entity missing");
                continue;
            }
        };

        let Some(attacker) = tracked.get(&entity).copied() else {
            continue;
        };
        if let Err(err) = result {
            error!(runtime_id = attacker.runtime_id, %err, "entity tick aborted");
        }
        if moved {
            let on_ground = world.get::<OnGround>(entity).is_some_and(|g| g.0);
            let rotation = world.get::<Rotation>(entity).copied().unwrap_or_default();
            push(world, GameEvent::MobMoved {
                runtime_id: attacker.runtime_id,
                position: attacker.position,
                rotation,
                on_ground,
            });
        }
        if !attacker.alive {
            continue;
        }

        for swing in swings {
            let Some(target) = tracked.get(&swing.target).copied() else {
                continue;
            };
            if !target.alive {
                continue;
            }
            if target.player {
                hit_player(world, &mut tracked, &attacker, swing.target, &target, swing.damage);
                continue;
            }
            let damager = Damager {
                entity,
                position: attacker.position,
                on_fire: attacker.on_fire,
                child: None,
            };
            let hit = run_living(world, level, listeners, &mut tracked, swing.target, |living, view| {
                let mut event = DamageEvent::by_entity(damager, DamageCause::EntityAttack, swing.damage);
                living.apply_damage(&mut event, ctx, view);
            });
            if let Err(err) = hit {
                error!(runtime_id = target.runtime_id, %err, "melee target vanished");
            }
        }
    }
}

/// A mob's swing at a player: the player's mirror health drops and the
/// network layer is told to apply the hit client-side.
fn hit_player(
    world: &mut World,
    tracked: &mut HashMap<Entity, Tracked>,
    attacker: &Tracked,
    player: Entity,
    target: &Tracked,
    damage: f32,
) {
    let dx = target.position.x - attacker.position.x;
    let dz = target.position.z - attacker.position.z;
    let len = (dx * dx + dz * dz).sqrt();
    let knockback = if len > 0.0 {
        Velocity::new(
            dx / len * MOB_MELEE_KNOCKBACK,
            MOB_MELEE_KNOCKBACK,
            dz / len * MOB_MELEE_KNOCKBACK,
        )
    } else {
        Velocity::new(0.0, MOB_MELEE_KNOCKBACK, 0.0)
    };

    if let Some(mut health) = world.get_mut::<Health>(player) {
        health.current = (health.current - damage).max(0.0);
        if let Some(t) = tracked.get_mut(&player) {
            t.alive = health.current > 0.0;
        }
    }
    push(world, GameEvent::MobAttackPlayer {
        mob_runtime_id: attacker.runtime_id,
        target_runtime_id: target.runtime_id,
        damage,
        knockback,
    });
}

/// Remove dead entities after their death events have been emitted.
fn system_cleanup_dead(world: &mut World) {
    let dead_entities: Vec<Entity> = world
        .query_filtered::<Entity, With<Dead>>()
        .iter(world)
        .collect();
    for entity in dead_entities {
        world.despawn(entity);
    }
}

fn push(world: &mut World, event: GameEvent) {
    world.resource_mut::<OutgoingEvents>().events.push(event);
}

/// What every entity looks like right now, for liveness and position checks.
fn snapshot_entities(world: &mut World) -> HashMap<Entity, Tracked> {
    let mut query = world.query::<(
        Entity,
        &EntityId,
        &Position,
        Option<&Health>,
        Option<&Burning>,
        Has<Player>,
        Has<Dead>,
    )>();
    query
        .iter(world)
        .map(|(entity, eid, pos, health, burning, player, dead)| {
            let tracked = Tracked {
                runtime_id: eid.runtime_id,
                position: *pos,
                alive: !dead && health.map_or(true, |h| h.current > 0.0),
                player,
                on_fire: burning.is_some_and(|b| b.0),
            };
            (entity, tracked)
        })
        .collect()
}

/// Take the living component out of `entity`, run `f` against a world view,
/// put it back and refresh the mirrors, the snapshot and the event queue.
fn run_living<R>(
    world: &mut World,
    level: &mut dyn Level,
    listeners: &mut [Box<dyn LivingListener>],
    tracked: &mut HashMap<Entity, Tracked>,
    entity: Entity,
    f: impl FnOnce(&mut LivingEntity, &mut WorldView<'_>) -> R,
) -> Result<R, LivingError> {
    let runtime_id = world
        .get::<EntityId>(entity)
        .map(|e| e.runtime_id)
        .unwrap_or_default();
    if world.get::<LivingEntity>(entity).is_none() {
        return Err(LivingError::EntityNotFound(runtime_id));
    }
    let mut living = world
        .entity_mut(entity)
        .take::<LivingEntity>()
        .ok_or(LivingError::EntityNotFound(runtime_id))?;

    let mut events = Vec::new();
    let result = {
        let mut view = WorldView {
            level,
            listeners,
            tracked,
            events: &mut events,
        };
        f(&mut living, &mut view)
    };

    tracked.insert(
        entity,
        Tracked {
            runtime_id,
            position: living.position(),
            alive: living.is_alive(),
            player: false,
            on_fire: living.is_on_fire(),
        },
    );
    let died = !living.is_alive() && world.get::<Dead>(entity).is_none();
    mirror(world, entity, &living);
    world.entity_mut(entity).insert(living);

    if died {
        let unique_id = world
            .get::<EntityId>(entity)
            .map(|e| e.unique_id)
            .unwrap_or_default();
        world.entity_mut(entity).insert(Dead);
        events.push(GameEvent::MobDied {
            runtime_id,
            unique_id,
        });
        debug!(runtime_id, "mob died");
    }
    world.resource_mut::<OutgoingEvents>().events.extend(events);
    Ok(result)
}

/// Copy living state onto the plain components other systems query.
fn mirror(world: &mut World, entity: Entity, living: &LivingEntity) {
    world.entity_mut(entity).insert((
        living.position(),
        living.rotation(),
        living.velocity(),
        Health {
            current: living.health(),
            max: living.max_health(),
        },
        OnGround(living.on_ground()),
        Burning(living.is_on_fire()),
    ));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
