//! Headless platformer demo
//!
//! Builds a single screen with a player, patrolling enemies and coins, feeds
//! the player a scripted pad sequence, and runs the fixed-timestep loop for a
//! bounded number of frames. Pass a TOML or RON engine config path as the
//! first argument to override the defaults.

mod components;
mod systems;

use components::{CoinComponent, GravityComponent, PatrolComponent};
use rand::Rng;
use retro_engine::foundation::logging;
use retro_engine::prelude::*;
use retro_engine::ConfigError;
use systems::{GravitySystem, PatrolSystem};

const LEVEL_WIDTH: f32 = 256.0;
const FLOOR_Y: f32 = 208.0;
const DEFAULT_FRAMES: u64 = 600;

const LAYER_PLAYER: u32 = 1 << 0;
const LAYER_ENEMY: u32 = 1 << 1;
const LAYER_PICKUP: u32 = 1 << 2;

/// Demo game state
struct PlatformerDemo {
    pad: PadState,
    player: Option<EntityId>,
    elapsed: f32,
    score: u32,
    hits_taken: u32,
    particles_spawned: u32,
}

impl PlatformerDemo {
    fn new() -> Self {
        Self {
            pad: PadState::new(),
            player: None,
            elapsed: 0.0,
            score: 0,
            hits_taken: 0,
            particles_spawned: 0,
        }
    }

    /// Scripted input: run right, hop every second, turn back after six
    fn drive_pad(&self) {
        let mut held = if self.elapsed < 6.0 {
            PadButtons::RIGHT
        } else {
            PadButtons::LEFT
        };
        if self.elapsed.fract() < 0.1 {
            held |= PadButtons::A;
        }
        self.pad.set(held);
    }

    fn spawn_dust(&mut self, world: &mut EntityManager, x: f32, y: f32) {
        let mut rng = rand::thread_rng();
        for _ in 0..3 {
            world
                .create_entity(Some("particle"))
                .add_component(TransformFactory::sprite(x, y, 0.5))
                .add_component(VelocityFactory::planar(
                    rng.gen_range(-40.0..40.0),
                    rng.gen_range(-60.0..-10.0),
                ))
                .add_component(SpriteFactory::tile(0x40))
                .add_component(LifetimeComponent::new(rng.gen_range(0.2..0.6)));
            self.particles_spawned += 1;
        }
    }

    /// Coins and touched enemies for this tick, read from the player's contacts
    fn player_contacts(&self, world: &EntityManager) -> (Vec<EntityId>, Vec<EntityId>) {
        let Some(state) = self
            .player
            .and_then(|id| world.get_entity(id))
            .and_then(|player| player.get_component::<CollisionStateComponent>())
        else {
            return (Vec::new(), Vec::new());
        };

        let mut coins = Vec::new();
        let mut enemies = Vec::new();
        for &other in &state.collision_entered {
            match world.get_entity(other) {
                Some(entity) if entity.has_component::<CoinComponent>() => coins.push(other),
                Some(entity) if entity.has_tag("enemy") => enemies.push(other),
                _ => {}
            }
        }
        (coins, enemies)
    }
}

impl Application for PlatformerDemo {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Building level...");
        let world = engine.world_mut();

        let player = world
            .create_entity(Some("player"))
            .add_component(TransformFactory::sprite(16.0, FLOOR_Y, 1.0))
            .add_component(VelocityComponent::default())
            .add_component(InputProfileFactory::platformer(72.0, 260.0))
            .add_component(GravityComponent::default())
            .add_component(
                CollisionBoxComponent::new(12.0, 16.0)
                    .with_offset(2.0, 0.0)
                    .with_layers(LAYER_PLAYER, LAYER_ENEMY | LAYER_PICKUP),
            )
            .add_component(HealthComponent::new(3))
            .add_component(SpriteFactory::tile(0x01))
            .add_component(AnimationFactory::looping(4, 0.1))
            .id();
        self.player = Some(player);

        for (index, home_x) in [96.0, 176.0].into_iter().enumerate() {
            world
                .create_entity(Some("enemy"))
                .add_component(TransformFactory::sprite(home_x, FLOOR_Y, 1.0))
                .add_component(VelocityComponent::default())
                .add_component(PatrolComponent::new(home_x, 24.0 + 8.0 * index as f32, 30.0))
                .add_component(
                    CollisionBoxComponent::new(16.0, 16.0).with_layers(LAYER_ENEMY, LAYER_PLAYER),
                )
                .add_component(SpriteFactory::tile(0x20))
                .add_component(AnimationFactory::looping(2, 0.25));
        }

        for x in (40..232).step_by(32) {
            world
                .create_entity(Some("coin"))
                .add_component(TransformFactory::sprite(x as f32, FLOOR_Y - 24.0, 1.0))
                .add_component(CoinComponent { value: 100 })
                .add_component(
                    CollisionBoxComponent::new(8.0, 8.0)
                        .with_layers(LAYER_PICKUP, LAYER_PLAYER)
                        .as_trigger(),
                )
                .add_component(SpriteFactory::tile(0x30));
        }

        world.add_system(Box::new(InputSystem::new(self.pad.clone())));
        world.add_system(Box::new(PatrolSystem::new()));
        world.add_system(Box::new(GravitySystem::new()));
        world.add_system(Box::new(MovementSystem::new()));
        world.add_system(Box::new(CollisionSystem::new()));
        world.add_system(Box::new(HealthSystem::new()));
        world.add_system(Box::new(AnimationSystem::new()));
        world.add_system(Box::new(LifetimeSystem::new()));

        log::info!(
            "Level ready: {} entities, systems {:?}",
            world.entity_count(),
            world.systems().system_names()
        );
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        self.elapsed += delta_time;
        self.drive_pad();

        let world = engine.world_mut();

        // Contacts were recorded by the previous tick's collision pass.
        let (coins, enemies) = self.player_contacts(world);
        for coin in coins {
            let value = world
                .get_entity(coin)
                .and_then(|entity| entity.get_component::<CoinComponent>())
                .map_or(0, |found| found.value);
            if world.destroy_entity(coin) {
                self.score += value;
                log::debug!("Picked up coin {} (score {})", coin, self.score);
            }
        }

        let player = self.player.ok_or_else(|| AppError::GameLogic("player was never spawned".into()))?;
        if !enemies.is_empty() {
            if let Some(health) = world
                .get_entity_mut(player)
                .and_then(|entity| entity.get_component_mut::<HealthComponent>())
            {
                self.hits_taken = self
                    .hits_taken
                    .saturating_add(health.damage(contact_damage(enemies.len())));
                log::info!("Player hit, {} hit points left", health.current);
            }
        }

        let Some(entity) = world.get_entity_mut(player) else {
            return Err(AppError::GameLogic(format!("player {} vanished", player)));
        };
        if !entity.is_active() {
            log::info!("Player is out of health, ending run");
            engine.quit();
            return Ok(());
        }

        let mut landed_at = None;
        if let Some(transform) = entity.get_component_mut::<TransformComponent>() {
            transform.position.x = nalgebra::clamp(transform.position.x, 0.0, LEVEL_WIDTH - 16.0);
            if self.pad.held().contains(PadButtons::A) && transform.position.y >= FLOOR_Y {
                landed_at = Some((transform.position.x, transform.position.y + 16.0));
            }
        }
        if let Some((x, y)) = landed_at {
            self.spawn_dust(world, x, y);
        }

        let expired: Vec<EntityId> = world
            .entities_by_tag("particle")
            .filter(|entity| !entity.is_active())
            .map(Entity::id)
            .collect();
        for id in expired {
            world.destroy_entity(id);
        }

        Ok(())
    }

    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let frame = engine.frame_count() + 1;
        if frame % 60 != 0 {
            return Ok(());
        }

        let world = engine.world();
        let position = self
            .player
            .and_then(|id| world.get_entity(id))
            .and_then(|entity| entity.get_component::<TransformComponent>())
            .map(|transform| transform.position);
        log::info!(
            "Frame {}: {} entities ({} active), player at {:?}, score {}",
            frame,
            world.entity_count(),
            world.active_entity_count(),
            position.map(|p| (p.x, p.y)),
            self.score
        );
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Run finished after {} frames: score {}, hits taken {}, {} particles spawned",
            engine.frame_count(),
            self.score,
            self.hits_taken,
            self.particles_spawned
        );
        engine.world_mut().clear();
    }
}

/// Damage for touching `contacts` enemies in one tick, one point each
fn contact_damage(contacts: usize) -> u32 {
    u32::try_from(contacts).unwrap_or(u32::MAX)
}

fn load_config() -> Result<EngineConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(path),
        None => Ok(EngineConfig {
            max_frames: Some(DEFAULT_FRAMES),
            ..Default::default()
        }),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init_with_filter(&config.logging.filter);

    log::info!("Starting platformer demo at {} Hz", config.game_loop.target_fps);

    let mut app = PlatformerDemo::new();
    Engine::run(config, &mut app)?;

    log::info!("Platformer demo exited cleanly");
    Ok(())
}
