//! Binary space partition tree over grid regions.
//!
//! Nodes live in a slot map and refer to their children by key. A node is
//! either a true leaf (no children) or an internal node with exactly two
//! children whose regions tile the parent's region.

use log::debug;
use slotmap::{SlotMap, new_key_type};

use crate::types::{Pos, Rect};

use super::config::GeneratorConfig;
use super::seed::MapRng;

new_key_type! {
    pub struct NodeId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitAxis {
    /// Split line runs top to bottom; children sit left and right.
    Vertical,
    /// Split line runs left to right; children sit above and below.
    Horizontal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionNode {
    pub bounds: Rect,
    pub children: Option<(NodeId, NodeId)>,
    pub room: Option<Rect>,
}

impl PartitionNode {
    fn leaf(bounds: Rect) -> Self {
        Self { bounds, children: None, room: None }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct PartitionTree {
    nodes: SlotMap<NodeId, PartitionNode>,
    root: NodeId,
}

impl PartitionTree {
    pub fn new(bounds: Rect) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(PartitionNode::leaf(bounds));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &PartitionNode {
        &self.nodes[id]
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut PartitionNode {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &PartitionNode)> {
        self.nodes.iter()
    }

    /// True leaves in left-to-right tree order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.post_order().into_iter().filter(|&id| self.nodes[id].is_leaf()).collect()
    }

    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0_usize)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some((left, right)) = self.nodes[id].children {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }
        deepest
    }

    /// Children before parents, left subtree before right subtree.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, false)];
        while let Some((id, expanded)) = stack.pop() {
            match self.nodes[id].children {
                Some((left, right)) if !expanded => {
                    stack.push((id, true));
                    stack.push((right, false));
                    stack.push((left, false));
                }
                _ => order.push(id),
            }
        }
        order
    }

    /// Splits one true leaf in two. Internal nodes and regions too small along
    /// the chosen axis are left untouched; returns whether a split happened.
    pub fn split(&mut self, id: NodeId, config: &GeneratorConfig, rng: &mut MapRng) -> bool {
        let node = &self.nodes[id];
        if !node.is_leaf() {
            return false;
        }
        let bounds = node.bounds;
        let axis = choose_axis(bounds, config.split_ratio_threshold, rng);
        let Some((low, high)) = split_range(bounds, axis, config.min_container_size) else {
            debug!("degenerate region {bounds:?}: too small to split {axis:?}");
            return false;
        };

        let at = rng.range_inclusive(low, high);
        let (left_bounds, right_bounds) = split_bounds(bounds, axis, at);
        let left = self.nodes.insert(PartitionNode::leaf(left_bounds));
        let right = self.nodes.insert(PartitionNode::leaf(right_bounds));
        self.nodes[id].children = Some((left, right));
        true
    }

    /// One splitting pass: every leaf present at the start gets one split attempt.
    pub fn split_leaves(&mut self, config: &GeneratorConfig, rng: &mut MapRng) -> usize {
        self.leaves().into_iter().filter(|&id| self.split(id, config, rng)).count()
    }

    /// Point a hallway should aim for when connecting this subtree: its own
    /// room's centre for a leaf, otherwise the left child's point, falling
    /// back to the right child's when the left subtree holds no room.
    pub fn representative_point(&self, id: NodeId) -> Option<Pos> {
        let mut current = id;
        loop {
            let node = &self.nodes[current];
            match node.children {
                None => return node.room.map(Rect::center),
                Some((left, right)) => {
                    if let Some(point) = self.representative_point(left) {
                        return Some(point);
                    }
                    current = right;
                }
            }
        }
    }
}

fn choose_axis(bounds: Rect, threshold: f64, rng: &mut MapRng) -> SplitAxis {
    let width = f64::from(bounds.x2 - bounds.x1);
    let height = f64::from(bounds.y2 - bounds.y1);
    if height > 0.0 && width / height >= threshold {
        SplitAxis::Vertical
    } else if width > 0.0 && height / width >= threshold {
        SplitAxis::Horizontal
    } else if height == 0.0 && width > 0.0 {
        SplitAxis::Vertical
    } else if width == 0.0 && height > 0.0 {
        SplitAxis::Horizontal
    } else if rng.coin() {
        SplitAxis::Vertical
    } else {
        SplitAxis::Horizontal
    }
}

/// Valid split coordinates: the coordinate opens the second child, and both
/// children keep at least `min_size` tiles along the axis.
fn split_range(bounds: Rect, axis: SplitAxis, min_size: i32) -> Option<(i32, i32)> {
    let (start, end) = match axis {
        SplitAxis::Vertical => (bounds.x1, bounds.x2),
        SplitAxis::Horizontal => (bounds.y1, bounds.y2),
    };
    let low = start + min_size;
    let high = end + 1 - min_size;
    (low <= high).then_some((low, high))
}

fn split_bounds(bounds: Rect, axis: SplitAxis, at: i32) -> (Rect, Rect) {
    match axis {
        SplitAxis::Vertical => (
            Rect::new(bounds.x1, bounds.y1, at - 1, bounds.y2),
            Rect::new(at, bounds.y1, bounds.x2, bounds.y2),
        ),
        SplitAxis::Horizontal => (
            Rect::new(bounds.x1, bounds.y1, bounds.x2, at - 1),
            Rect::new(bounds.x1, at, bounds.x2, bounds.y2),
        ),
    }
}
