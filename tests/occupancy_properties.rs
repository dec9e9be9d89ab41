//! Property tests for geometry, counting, alerts and motion

use proptest::prelude::*;

use people_counter::alerts::evaluate_alerts;
use people_counter::core::types::{EntityId, Rect, Vec2, ZoneId};
use people_counter::occupancy::{count_occupancy, TotalHistory};
use people_counter::simulation::{Detection, FrameSize, SimEntity};
use people_counter::storage::MemoryStore;
use people_counter::zones::{load_zones, Zone, ZoneStore};

fn coord() -> impl Strategy<Value = f32> {
    (-1000i32..1000).prop_map(|v| v as f32 / 2.0)
}

fn zone(rect: Rect) -> Zone {
    Zone {
        id: ZoneId::new(),
        name: "z".into(),
        color: "#ef4444".into(),
        rect,
    }
}

proptest! {
    #[test]
    fn normalized_rect_anchors_min_corner(x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord()) {
        let rect = Rect::from_corners(Vec2::new(x1, y1), Vec2::new(x2, y2));
        prop_assert!(rect.w >= 0.0);
        prop_assert!(rect.h >= 0.0);
        prop_assert_eq!(rect.x, x1.min(x2));
        prop_assert_eq!(rect.y, y1.min(y2));
    }

    #[test]
    fn corners_are_always_inside(x in coord(), y in coord(), w in 0i32..500, h in 0i32..500) {
        let rect = Rect::new(x, y, w as f32, h as f32);
        let z = zone(rect);
        let corners = [
            Vec2::new(rect.x, rect.y),
            Vec2::new(rect.x + rect.w, rect.y),
            Vec2::new(rect.x, rect.y + rect.h),
            Vec2::new(rect.x + rect.w, rect.y + rect.h),
        ];
        let detections: Vec<_> = corners
            .iter()
            .map(|&position| Detection { id: EntityId::new(), position })
            .collect();
        let counts = count_occupancy(std::slice::from_ref(&z), &detections, usize::MAX);
        prop_assert_eq!(counts.get(&z.id), 4);
    }

    #[test]
    fn save_then_load_is_identity(rects in prop::collection::vec((coord(), coord(), coord(), coord()), 0..8)) {
        let mut zones = ZoneStore::open(MemoryStore::new());
        for (x, y, w, h) in rects {
            zones.add_zone(Rect::new(x, y, w, h));
        }
        zones.save().unwrap();
        let loaded = load_zones(zones.backend());
        prop_assert_eq!(loaded.as_slice(), zones.zones());
    }

    #[test]
    fn alert_iff_strictly_over(count in 0usize..20, threshold in 1i64..20) {
        let z = zone(Rect::new(0.0, 0.0, 10.0, 10.0));
        let detections: Vec<_> = (0..count)
            .map(|_| Detection { id: EntityId::new(), position: Vec2::new(5.0, 5.0) })
            .collect();
        let zones = vec![z];
        let counts = count_occupancy(&zones, &detections, usize::MAX);
        let alerts = evaluate_alerts(&zones, &counts, threshold);
        prop_assert_eq!(alerts.len() == 1, count as i64 > threshold);
    }

    #[test]
    fn right_wall_reflects_and_clamps(x in 600i32..=640, vx in 1i32..=10) {
        let frame = FrameSize::new(640.0, 360.0);
        let vx = vx as f32 / 10.0;
        let mut entity = SimEntity::new(Vec2::new(x as f32, 100.0), Vec2::new(vx, 0.0));
        let projected = entity.position.x + vx * 3.0;

        entity.step(frame, 3.0);

        if projected > 640.0 {
            prop_assert_eq!(entity.velocity.x, -vx);
            prop_assert_eq!(entity.position.x, 640.0);
        } else {
            prop_assert_eq!(entity.velocity.x, vx);
        }
        prop_assert!(entity.position.x <= 640.0);
    }

    #[test]
    fn history_keeps_most_recent(n in 0usize..200) {
        let mut history = TotalHistory::new(60);
        for total in 0..n {
            history.record(total);
        }
        prop_assert_eq!(history.len(), n.min(60));
        if n > 0 {
            let first = history.iter().next().map(|s| s.total);
            prop_assert_eq!(first, Some(n.saturating_sub(60)));
        }
    }
}
