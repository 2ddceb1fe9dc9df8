use super::Jitter;
use crate::config::LayoutConfig;
use crate::graph::GraphModel;
use crate::types::{Position, PositionMap};
use std::f64::consts::PI;

/// Ring slot of one node, before jitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSlot {
    pub ring: usize,
    pub radius: f64,
    pub angle: f64,
}

/// Slots for `count` nodes: rings of at most `ring_capacity`, innermost first.
pub fn ring_slots(count: usize, config: &LayoutConfig) -> Vec<RingSlot> {
    let c = &config.circular;
    let capacity = c.ring_capacity.max(1);

    (0..count)
        .map(|i| {
            let ring = i / capacity;
            let ring_size = (count - ring * capacity).min(capacity);
            let slot = i % capacity;
            RingSlot {
                ring,
                radius: c.base_radius + ring as f64 * c.ring_increment,
                angle: 2.0 * PI * slot as f64 / ring_size as f64,
            }
        })
        .collect()
}

pub(super) fn layout(
    model: &GraphModel,
    focus: Option<&str>,
    config: &LayoutConfig,
    jitter: &mut Jitter,
) -> PositionMap {
    let c = &config.circular;
    let (cx, cy) = (config.width / 2.0, config.height / 2.0);
    let mut positions = PositionMap::with_capacity(model.node_count());

    let focus = focus.filter(|id| model.contains(id));
    if let Some(f) = focus {
        positions.insert(f.to_string(), Position::new(f, cx, cy));
    }

    let others: Vec<&str> = model
        .nodes()
        .iter()
        .map(|node| node.id.as_str())
        .filter(|id| Some(*id) != focus)
        .collect();

    for (id, slot) in others.iter().zip(ring_slots(others.len(), config)) {
        let angle = slot.angle + jitter.offset(c.angle_jitter);
        let radius = slot.radius + jitter.offset(c.radius_jitter);
        positions.insert(
            id.to_string(),
            Position::new(*id, cx + radius * angle.cos(), cy + radius * angle.sin()),
        );
    }

    positions
}
