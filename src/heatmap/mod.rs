//! Heat map of recent entity positions
//!
//! Each tick every detection deposits a radial blob of heat, strongest at
//! the entity and fading linearly to zero at `heat_radius`. The whole map
//! decays once per tick so old positions fade out.

pub mod grid;

pub use grid::Grid;

use crate::core::config::SimulationConfig;
use crate::core::types::Vec2;
use crate::simulation::entity::FrameSize;
use crate::simulation::source::Detection;

pub struct HeatMap {
    grid: Grid<f32>,
    radius: f32,
    intensity: f32,
    decay: f32,
}

impl HeatMap {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            grid: Grid::covering(config.frame_width, config.frame_height, config.heat_cell_size),
            radius: config.heat_radius,
            intensity: config.heat_intensity,
            decay: config.heat_decay,
        }
    }

    /// Decay existing heat, then deposit this tick's detections
    pub fn update(&mut self, detections: &[Detection]) {
        for cell in self.grid.cells_mut() {
            *cell *= self.decay;
        }
        for detection in detections {
            self.deposit(detection.position);
        }
    }

    fn deposit(&mut self, pos: Vec2) {
        if self.radius <= 0.0 {
            return;
        }

        let cell_size = self.grid.cell_size;
        let reach = (self.radius / cell_size).ceil() as i64;
        let (cx, cy) = self.grid.cell_of(pos);

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let x = cx as i64 + dx;
                let y = cy as i64 + dy;
                if x < 0 || y < 0 {
                    continue;
                }
                let (x, y) = (x as usize, y as usize);
                let center = self.grid.center_of(x, y);
                let distance = center.distance(&pos);
                if distance >= self.radius {
                    continue;
                }
                let heat = self.intensity * (1.0 - distance / self.radius);
                if let Some(cell) = self.grid.cell_mut(x, y) {
                    *cell += heat;
                }
            }
        }
    }

    /// Heat at a frame position
    pub fn sample(&self, pos: Vec2) -> f32 {
        *self.grid.at(pos)
    }

    pub fn max(&self) -> f32 {
        self.grid.cells().iter().copied().fold(0.0, f32::max)
    }

    pub fn grid(&self) -> &Grid<f32> {
        &self.grid
    }

    /// Rebuild the grid for a new frame size; accumulated heat is dropped
    pub fn resize(&mut self, frame: FrameSize) {
        self.grid = Grid::covering(frame.width, frame.height, self.grid.cell_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EntityId;

    fn detection(x: f32, y: f32) -> Detection {
        Detection {
            id: EntityId::new(),
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_heat_is_local() {
        let mut heat = HeatMap::new(&SimulationConfig::default());
        heat.update(&[detection(100.0, 100.0)]);

        assert!(heat.sample(Vec2::new(100.0, 100.0)) > 0.0);
        assert_eq!(heat.sample(Vec2::new(500.0, 300.0)), 0.0);
        assert!(heat.max() <= 0.5);
    }

    #[test]
    fn test_heat_decays_without_entities() {
        let mut heat = HeatMap::new(&SimulationConfig::default());
        heat.update(&[detection(100.0, 100.0)]);
        let before = heat.sample(Vec2::new(100.0, 100.0));

        heat.update(&[]);
        let after = heat.sample(Vec2::new(100.0, 100.0));
        assert!((after - before * 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_resize_covers_new_frame() {
        let mut heat = HeatMap::new(&SimulationConfig::default());
        heat.resize(FrameSize::new(80.0, 40.0));
        assert_eq!(heat.grid().cols, 10);
        assert_eq!(heat.grid().rows, 5);
    }
}
