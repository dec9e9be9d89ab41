//! Live loop - runs ticks on a fixed-period timer until stopped

use std::future::Future;

use tokio::time::MissedTickBehavior;

use crate::core::types::Tick;
use crate::settings::Settings;
use crate::simulation::source::EntitySource;
use crate::simulation::tick::{Simulation, TickReport};
use crate::zones::Zone;

/// Tick every `tick_interval` until `shutdown` resolves or `max_ticks` have run.
///
/// Shutdown is checked before each tick; a tick in progress always runs to
/// completion. Returns the number of ticks run by this call.
pub async fn run_live<E, F, S>(
    sim: &mut Simulation<E>,
    zones: &[Zone],
    settings: &Settings,
    max_ticks: Option<u64>,
    shutdown: S,
    mut on_tick: F,
) -> Tick
where
    E: EntitySource,
    F: FnMut(&TickReport),
    S: Future<Output = ()>,
{
    let mut interval = tokio::time::interval(sim.config().tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    tracing::info!(
        interval_ms = sim.config().tick_interval_ms,
        zones = zones.len(),
        "live loop started"
    );

    let mut ran: Tick = 0;
    loop {
        if max_ticks.is_some_and(|max| ran >= max) {
            break;
        }

        tokio::select! {
            biased;

            _ = &mut shutdown => {
                tracing::info!(ticks = ran, "live loop stopped");
                break;
            }
            _ = interval.tick() => {
                let report = sim.run_tick(zones, settings);
                for alert in &report.alerts {
                    tracing::warn!(
                        zone = %alert.name,
                        count = alert.count,
                        threshold = alert.threshold,
                        "occupancy over threshold"
                    );
                }
                on_tick(&report);
                ran += 1;
            }
        }
    }

    ran
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;

    fn fast_sim() -> Simulation<crate::simulation::source::RandomWalkSource> {
        Simulation::random_walk(SimulationConfig {
            tick_interval_ms: 1,
            seed: Some(5),
            ..SimulationConfig::default()
        })
    }

    #[tokio::test]
    async fn test_stops_after_max_ticks() {
        let mut sim = fast_sim();
        let mut seen = Vec::new();

        let ran = run_live(
            &mut sim,
            &[],
            &Settings::default(),
            Some(5),
            std::future::pending(),
            |report| seen.push(report.tick),
        )
        .await;

        assert_eq!(ran, 5);
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(sim.current_tick, 5);
    }

    #[tokio::test]
    async fn test_stops_on_shutdown() {
        let mut sim = fast_sim();
        let ran = run_live(
            &mut sim,
            &[],
            &Settings::default(),
            None,
            async {},
            |_| {},
        )
        .await;

        assert_eq!(ran, 0);
        assert_eq!(sim.current_tick, 0);
    }
}
