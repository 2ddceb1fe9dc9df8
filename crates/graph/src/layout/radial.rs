use crate::config::LayoutConfig;
use crate::graph::GraphModel;
use crate::relation::RelationIndex;
use crate::types::{Position, PositionMap};
use std::collections::HashSet;
use std::f64::consts::PI;

/// Arc for sources of links into the focus
pub const UPSTREAM_ARC: (f64, f64) = (PI, 1.8 * PI);

/// Arc for targets of links out of the focus
pub const DOWNSTREAM_ARC: (f64, f64) = (0.0, 0.8 * PI);

/// Single pass over direct relations, no iterative simulation.
pub(super) fn layout(
    model: &GraphModel,
    index: &RelationIndex,
    focus: Option<&str>,
    config: &LayoutConfig,
) -> PositionMap {
    let r = &config.radial;
    let (cx, cy) = (config.width / 2.0, config.height / 2.0);
    let mut positions = PositionMap::with_capacity(model.node_count());
    let mut placed: HashSet<&str> = HashSet::new();

    let place = |id: &str, radius: f64, angle: f64, positions: &mut PositionMap| {
        positions.insert(
            id.to_string(),
            Position::new(id, cx + radius * angle.cos(), cy + radius * angle.sin()),
        );
    };

    if let Some(f) = focus.filter(|id| model.contains(id)) {
        placed.insert(f);
        positions.insert(f.to_string(), Position::new(f, cx, cy));

        let upstream: Vec<&str> = index
            .sources_of(f)
            .into_iter()
            .filter(|id| placed.insert(*id))
            .collect();
        for (id, angle) in upstream.iter().zip(arc_angles(upstream.len(), UPSTREAM_ARC)) {
            place(*id, r.inner_radius, angle, &mut positions);
        }

        let downstream: Vec<&str> = index
            .targets_of(f)
            .into_iter()
            .filter(|id| placed.insert(*id))
            .collect();
        for (id, angle) in downstream.iter().zip(arc_angles(downstream.len(), DOWNSTREAM_ARC)) {
            place(*id, r.inner_radius, angle, &mut positions);
        }
    }

    let rest: Vec<&str> = model
        .nodes()
        .iter()
        .map(|node| node.id.as_str())
        .filter(|id| !placed.contains(id))
        .collect();
    for (i, id) in rest.iter().enumerate() {
        let angle = 2.0 * PI * i as f64 / rest.len() as f64;
        place(*id, r.outer_radius, angle, &mut positions);
    }

    positions
}

/// `count` angles evenly inside `(start, end)`, endpoints excluded.
pub fn arc_angles(count: usize, (start, end): (f64, f64)) -> Vec<f64> {
    (0..count)
        .map(|i| start + (end - start) * (i as f64 + 1.0) / (count as f64 + 1.0))
        .collect()
}
