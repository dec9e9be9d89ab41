pub mod entity;
pub mod live;
pub mod output;
pub mod source;
pub mod tick;

pub use entity::{FrameSize, SimEntity};
pub use live::run_live;
pub use output::{RunStats, RunSummary, ZoneSummary};
pub use source::{Detection, EntitySource, RandomWalkSource, ReplaySource};
pub use tick::{Simulation, TickReport};
