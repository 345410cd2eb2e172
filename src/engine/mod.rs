use crate::ai;
use crate::constants::VULNERABLE_COLOR;
use crate::entity::MobileEntity;
use crate::grid::GridMap;
use crate::types::{
    CellKind, ConfigError, Direction, EntityView, RuntimeEvent, SimConfig, Snapshot,
};

mod collision_system;
mod movement_system;
mod pellet_system;

#[derive(Clone, Debug)]
pub struct GameSimulation {
    pub config: SimConfig,

    grid: GridMap,
    player: MobileEntity,
    adversaries: Vec<MobileEntity>,
    events: Vec<RuntimeEvent>,

    score: i32,
    lives: i32,
    running: bool,
    ended: bool,
    power_active: bool,
    power_ticks_remaining: u32,
    tick_counter: u64,
}

impl GameSimulation {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        if config.tile_size <= 0 {
            return Err(ConfigError::NonPositiveTileSize {
                tile_size: config.tile_size,
            });
        }
        for speed in [config.player_speed, config.adversary_speed] {
            if speed <= 0 {
                return Err(ConfigError::NonPositiveSpeed { speed });
            }
            if config.tile_size % speed != 0 {
                return Err(ConfigError::SpeedNotDividingTile {
                    speed,
                    tile_size: config.tile_size,
                });
            }
        }
        if config.initial_lives <= 0 {
            return Err(ConfigError::NonPositiveLives {
                lives: config.initial_lives,
            });
        }
        if config.power_mode_ticks == 0 {
            return Err(ConfigError::ZeroPowerDuration);
        }

        let grid = GridMap::from_layout(
            &config.layout,
            config.pellet_score,
            config.power_pellet_score,
        )?;
        for spawn in std::iter::once(&config.player).chain(config.adversaries.iter()) {
            if !grid.is_walkable(spawn.row, spawn.col) {
                return Err(ConfigError::BlockedSpawn {
                    row: spawn.row,
                    col: spawn.col,
                });
            }
        }

        let player = MobileEntity::new(
            config.player.row,
            config.player.col,
            config.tile_size,
            config.player_speed,
            config.player.color.clone(),
        );
        let adversaries = config
            .adversaries
            .iter()
            .map(|spawn| {
                MobileEntity::new(
                    spawn.row,
                    spawn.col,
                    config.tile_size,
                    config.adversary_speed,
                    spawn.color.clone(),
                )
            })
            .collect();

        let lives = config.initial_lives;
        Ok(Self {
            config,
            grid,
            player,
            adversaries,
            events: Vec::new(),
            score: 0,
            lives,
            running: true,
            ended: false,
            power_active: false,
            power_ticks_remaining: 0,
            tick_counter: 0,
        })
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_counter
    }

    pub fn power_active(&self) -> bool {
        self.power_active
    }

    pub fn power_ticks_remaining(&self) -> u32 {
        self.power_ticks_remaining
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn player(&self) -> &MobileEntity {
        &self.player
    }

    pub fn adversaries(&self) -> &[MobileEntity] {
        &self.adversaries
    }

    /// Last write wins; the entity reads the intent at its next tile
    /// alignment. Accepted while paused so a queued turn survives a resume.
    pub fn set_player_intent(&mut self, dir: Direction) {
        self.player.set_pending_dir(dir);
    }

    /// Restarts a simulation paused by a life loss. Ended games stay ended.
    pub fn resume(&mut self) {
        if !self.ended {
            self.running = true;
        }
    }

    pub fn tick(&mut self) {
        if !self.running || self.ended {
            return;
        }
        self.tick_counter += 1;

        self.advance_player();
        self.resolve_consumption();
        self.advance_power_timer();
        self.advance_adversaries();
        if !self.ended {
            self.resolve_collisions();
        }
    }

    pub fn build_snapshot(&mut self, include_events: bool) -> Snapshot {
        let mut entities = Vec::with_capacity(1 + self.adversaries.len());
        entities.push(EntityView {
            x: self.player.pos().x,
            y: self.player.pos().y,
            dir: self.player.dir(),
            color: self.player.base_color().to_string(),
            is_player: true,
        });
        for adversary in &self.adversaries {
            let color = if self.power_active {
                VULNERABLE_COLOR.to_string()
            } else {
                adversary.base_color().to_string()
            };
            entities.push(EntityView {
                x: adversary.pos().x,
                y: adversary.pos().y,
                dir: adversary.dir(),
                color,
                is_player: false,
            });
        }

        let snapshot = Snapshot {
            tick: self.tick_counter,
            score: self.score,
            lives: self.lives,
            running: self.running,
            ended: self.ended,
            power_active: self.power_active,
            power_ticks_remaining: self.power_ticks_remaining,
            pellets_remaining: self.grid.pellets_remaining(),
            entities,
            grid: self.grid.render_rows(),
            events: if include_events {
                self.events.clone()
            } else {
                Vec::new()
            },
        };
        if include_events {
            self.events.clear();
        }
        snapshot
    }
}
