//! Bottom-up corridor carving between sibling subtrees.

use log::debug;

use crate::types::{Pos, Rect};

use super::config::GeneratorConfig;
use super::grid::Grid;
use super::partition::PartitionTree;
use super::rooms::carve_rect;
use super::seed::MapRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hallway {
    pub from: Pos,
    pub to: Pos,
    pub horizontal_first: bool,
}

/// Connects the two children of every internal node, deepest nodes first.
/// A child subtree without any room is skipped.
pub(super) fn create_hallways(
    tree: &PartitionTree,
    grid: &mut Grid,
    config: &GeneratorConfig,
    rng: &mut MapRng,
) -> Vec<Hallway> {
    let mut hallways = Vec::new();
    for id in tree.post_order() {
        let Some((left, right)) = tree.node(id).children else {
            continue;
        };
        let (Some(from), Some(to)) =
            (tree.representative_point(left), tree.representative_point(right))
        else {
            debug!("roomless subtree under {:?}: connection skipped", tree.node(id).bounds);
            continue;
        };

        let hallway = Hallway { from, to, horizontal_first: rng.coin() };
        carve_hallway(grid, &hallway, config.hallway_floor_width());
        hallways.push(hallway);
    }
    hallways
}

/// Carves a straight corridor when the endpoints share a row or column,
/// otherwise an L through the corner picked by `horizontal_first`.
pub(super) fn carve_hallway(grid: &mut Grid, hallway: &Hallway, floor_width: i32) {
    let half = (floor_width - 1) / 2;
    let Hallway { from, to, horizontal_first } = *hallway;

    if from.y == to.y || from.x == to.x {
        carve_rect(grid, segment(from, to, half));
        return;
    }

    let corner =
        if horizontal_first { Pos { y: from.y, x: to.x } } else { Pos { y: to.y, x: from.x } };
    carve_rect(grid, segment(from, corner, half));
    carve_rect(grid, segment(corner, to, half));
}

/// Floor rectangle of an axis-aligned run, widened by `half` on every side so
/// consecutive runs share their corner square.
fn segment(a: Pos, b: Pos, half: i32) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y)).expanded(half)
}
