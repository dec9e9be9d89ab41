//! Entity sources - anything that yields entity positions once per tick
//!
//! The random walk stands in for a detection/tracking pipeline. Aggregation
//! and alerting only ever see `Detection`s, so a real tracker can replace it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::{EntityId, Vec2};
use crate::simulation::entity::{FrameSize, SimEntity};

/// One entity position observed at a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: EntityId,
    pub position: Vec2,
}

/// Produces the entity set for each tick
pub trait EntitySource {
    /// Advance one tick and return every entity's position
    fn next_tick(&mut self) -> Vec<Detection>;

    /// The frame was resized
    fn resize(&mut self, _frame: FrameSize) {}
}

/// Random-walking entities with reflective walls
pub struct RandomWalkSource {
    entities: Vec<SimEntity>,
    frame: FrameSize,
    speed: f32,
    seed: u64,
}

impl RandomWalkSource {
    /// Spawn `config.entity_count` entities at uniform random positions
    pub fn new(config: &SimulationConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let frame = FrameSize::new(config.frame_width, config.frame_height);

        let entities = (0..config.entity_count)
            .map(|_| spawn_entity(frame, &mut rng))
            .collect();

        tracing::debug!(seed, count = config.entity_count, "random walk spawned");

        Self {
            entities,
            frame,
            speed: config.speed,
            seed,
        }
    }

    /// Seed the entities were spawned from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn entities(&self) -> &[SimEntity] {
        &self.entities
    }

    pub fn frame(&self) -> FrameSize {
        self.frame
    }
}

fn spawn_entity(frame: FrameSize, rng: &mut ChaCha8Rng) -> SimEntity {
    let position = Vec2::new(
        rng.gen_range(0.0..=frame.width),
        rng.gen_range(0.0..=frame.height),
    );
    let velocity = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
    SimEntity::new(position, velocity)
}

impl EntitySource for RandomWalkSource {
    fn next_tick(&mut self) -> Vec<Detection> {
        for entity in &mut self.entities {
            entity.step(self.frame, self.speed);
        }
        self.entities
            .iter()
            .map(|e| Detection {
                id: e.id,
                position: e.position,
            })
            .collect()
    }

    fn resize(&mut self, frame: FrameSize) {
        self.frame = frame;
        for entity in &mut self.entities {
            entity.position = frame.clamp(entity.position);
        }
    }
}

/// Plays back recorded detection frames; holds the last frame once exhausted
pub struct ReplaySource {
    frames: Vec<Vec<Detection>>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(frames: Vec<Vec<Detection>>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// A single frame of fixed positions, repeated forever
    pub fn fixed(positions: &[Vec2]) -> Self {
        let frame = positions
            .iter()
            .map(|&position| Detection {
                id: EntityId::new(),
                position,
            })
            .collect();
        Self::new(vec![frame])
    }
}

impl EntitySource for ReplaySource {
    fn next_tick(&mut self) -> Vec<Detection> {
        if self.frames.is_empty() {
            return Vec::new();
        }
        let idx = self.cursor.min(self.frames.len() - 1);
        self.cursor = self.cursor.saturating_add(1);
        self.frames[idx].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed: Some(seed),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_spawn_within_frame() {
        let source = RandomWalkSource::new(&seeded(42));
        assert_eq!(source.entities().len(), 14);
        for entity in source.entities() {
            assert!((0.0..=640.0).contains(&entity.position.x));
            assert!((0.0..=360.0).contains(&entity.position.y));
            assert!((-1.0..=1.0).contains(&entity.velocity.x));
            assert!((-1.0..=1.0).contains(&entity.velocity.y));
        }
    }

    #[test]
    fn test_same_seed_same_positions() {
        let a = RandomWalkSource::new(&seeded(7));
        let b = RandomWalkSource::new(&seeded(7));
        let pa: Vec<_> = a.entities().iter().map(|e| e.position).collect();
        let pb: Vec<_> = b.entities().iter().map(|e| e.position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_stays_in_frame_over_many_ticks() {
        let mut source = RandomWalkSource::new(&seeded(3));
        for _ in 0..2000 {
            for d in source.next_tick() {
                assert!((0.0..=640.0).contains(&d.position.x));
                assert!((0.0..=360.0).contains(&d.position.y));
            }
        }
    }

    #[test]
    fn test_resize_clamps_entities() {
        let mut source = RandomWalkSource::new(&seeded(11));
        source.resize(FrameSize::new(100.0, 50.0));
        for entity in source.entities() {
            assert!(entity.position.x <= 100.0);
            assert!(entity.position.y <= 50.0);
        }
        for d in source.next_tick() {
            assert!(d.position.x <= 100.0);
            assert!(d.position.y <= 50.0);
        }
    }

    #[test]
    fn test_replay_holds_last_frame() {
        let first = vec![Detection {
            id: EntityId::new(),
            position: Vec2::new(1.0, 1.0),
        }];
        let second = vec![Detection {
            id: EntityId::new(),
            position: Vec2::new(2.0, 2.0),
        }];
        let mut source = ReplaySource::new(vec![first.clone(), second.clone()]);
        assert_eq!(source.next_tick(), first);
        assert_eq!(source.next_tick(), second);
        assert_eq!(source.next_tick(), second);
    }

    #[test]
    fn test_empty_replay_yields_nothing() {
        let mut source = ReplaySource::new(Vec::new());
        assert!(source.next_tick().is_empty());
    }
}
