//! Room placement inside true leaves and the shared rectangle carving scheme.

use log::debug;

use crate::types::{Rect, TileKind};

use super::config::GeneratorConfig;
use super::grid::Grid;
use super::partition::{NodeId, PartitionTree};
use super::seed::MapRng;

/// Gives every true leaf one room where the leaf allows it. Returns the rooms
/// in leaf order.
pub(super) fn create_rooms(
    tree: &mut PartitionTree,
    grid: &mut Grid,
    config: &GeneratorConfig,
    rng: &mut MapRng,
) -> Vec<Rect> {
    let mut rooms = Vec::new();
    for id in tree.post_order() {
        if let Some(room) = create_room(tree, id, grid, config, rng) {
            rooms.push(room);
        }
    }
    rooms
}

fn create_room(
    tree: &mut PartitionTree,
    id: NodeId,
    grid: &mut Grid,
    config: &GeneratorConfig,
    rng: &mut MapRng,
) -> Option<Rect> {
    let node = tree.node(id);
    if !node.is_leaf() || node.room.is_some() {
        return None;
    }
    let leaf = node.bounds;
    let Some(room) = place_room(leaf, config, rng) else {
        debug!("degenerate region {leaf:?}: no room after {} tries", config.place_tries);
        return None;
    };
    carve_rect(grid, room);
    tree.node_mut(id).room = Some(room);
    Some(room)
}

/// Draws a room strictly inside `leaf`, leaving one tile on every side for its wall ring.
fn place_room(leaf: Rect, config: &GeneratorConfig, rng: &mut MapRng) -> Option<Rect> {
    let max_width = leaf.width() - 2;
    let max_height = leaf.height() - 2;
    if max_width < config.min_room_size || max_height < config.min_room_size {
        return None;
    }

    for _ in 0..config.place_tries {
        let width = rng.range_inclusive(config.min_room_size, max_width);
        let height = rng.range_inclusive(config.min_room_size, max_height);
        let ratio = f64::from(width.min(height)) / f64::from(width.max(height));
        if ratio < config.room_ratio {
            continue;
        }

        let x1 = rng.range_inclusive(leaf.x1 + 1, leaf.x2 - width);
        let y1 = rng.range_inclusive(leaf.y1 + 1, leaf.y2 - height);
        return Some(Rect::new(x1, y1, x1 + width - 1, y1 + height - 1));
    }
    None
}

/// Writes FLOOR over `floor` and WALL on the ring around it wherever the grid
/// is still EMPTY. FLOOR never lands on the grid's border.
pub(super) fn carve_rect(grid: &mut Grid, floor: Rect) {
    let Some(interior) = grid.interior() else {
        return;
    };
    let Some(floor) = floor.clipped(&interior) else {
        return;
    };
    for pos in floor.positions() {
        grid.set_pos(pos, TileKind::Floor);
    }
    for pos in floor.ring() {
        if grid.tile_at(pos) == Some(TileKind::Empty) {
            grid.set_pos(pos, TileKind::Wall);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placed_rooms_keep_a_margin_inside_their_leaf() {
        let config = GeneratorConfig::default();
        let mut rng = MapRng::from_seed(42);
        let leaf = Rect::new(10, 4, 24, 15);
        for _ in 0..200 {
            if let Some(room) = place_room(leaf, &config, &mut rng) {
                assert!(leaf.expanded(-1).contains_rect(&room), "{room:?} escapes {leaf:?}");
                assert!(room.width() >= config.min_room_size);
                assert!(room.height() >= config.min_room_size);
                let ratio = f64::from(room.width().min(room.height()))
                    / f64::from(room.width().max(room.height()));
                assert!(ratio >= config.room_ratio);
            }
        }
    }

    #[test]
    fn minimum_leaf_always_fits_a_minimum_room() {
        let config = GeneratorConfig::default();
        let mut rng = MapRng::from_seed(0);
        let room = place_room(Rect::new(0, 0, 5, 5), &config, &mut rng);
        assert_eq!(room, Some(Rect::new(1, 1, 4, 4)));
    }

    #[test]
    fn leaf_smaller_than_a_room_is_left_roomless() {
        let config = GeneratorConfig::default();
        let mut rng = MapRng::from_seed(0);
        assert_eq!(place_room(Rect::new(0, 0, 4, 20), &config, &mut rng), None);
    }

    #[test]
    fn carved_room_is_ringed_by_exactly_one_wall_layer() {
        let mut grid = Grid::new(10, 8);
        let room = Rect::new(2, 2, 6, 4);
        carve_rect(&mut grid, room);

        assert_eq!(grid.count(TileKind::Floor) as i64, room.area());
        assert_eq!(grid.count(TileKind::Wall) as i64, room.expanded(1).area() - room.area());
        assert_eq!(grid.get(1, 1), TileKind::Wall);
        assert_eq!(grid.get(0, 0), TileKind::Empty);
    }

    #[test]
    fn carving_never_puts_floor_on_the_border() {
        let mut grid = Grid::new(6, 6);
        carve_rect(&mut grid, Rect::new(-3, 2, 9, 3));
        for x in 0..6 {
            assert_ne!(grid.get(x, 0), TileKind::Floor);
            assert_ne!(grid.get(x, 5), TileKind::Floor);
        }
        assert_ne!(grid.get(0, 2), TileKind::Floor);
        assert_ne!(grid.get(5, 3), TileKind::Floor);
        assert_eq!(grid.get(1, 2), TileKind::Floor);
    }

    #[test]
    fn walls_do_not_overwrite_existing_floor() {
        let mut grid = Grid::new(12, 6);
        carve_rect(&mut grid, Rect::new(1, 1, 4, 4));
        carve_rect(&mut grid, Rect::new(6, 1, 9, 4));
        carve_rect(&mut grid, Rect::new(4, 2, 6, 2));
        assert_eq!(grid.get(5, 2), TileKind::Floor);
        assert_eq!(grid.get(5, 1), TileKind::Wall);
    }
}
