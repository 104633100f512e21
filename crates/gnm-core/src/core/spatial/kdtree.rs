use crate::core::utils::geometry::squared_distance;
use nalgebra::Point3;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use thiserror::Error;

const DIMENSIONS: usize = 3;

/// Traversal used by [`KdTree::nearest_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Visits the near child first and the far child whenever the split plane
    /// lies within the query radius. Finds every point within the radius.
    #[default]
    Exhaustive,
    /// Visits exactly one child per internal node plus the node's own point.
    /// Cheaper, but points across a split plane from the query can be missed.
    DescentOnly,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpatialIndexError {
    #[error("Tree is empty")]
    Empty,
    #[error("Left child of node {node} lies above its parent on axis {axis}")]
    LeftChildAbove { node: usize, axis: usize },
    #[error("Right child of node {node} lies below its parent on axis {axis}")]
    RightChildBelow { node: usize, axis: usize },
}

/// A point returned by a radius query.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor {
    pub index: usize,       // Index into the point slice the tree was built over
    pub distance_sq: f64,   // Squared distance to the query point
}

impl PartialEq for Neighbor {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Neighbor {}

impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_sq
            .total_cmp(&other.distance_sq)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    median: usize, // Position in `indices` holding this node's point
    left: Option<usize>,
    right: Option<usize>,
    parent: Option<usize>,
}

/// A balanced 3D k-d tree over a borrowed point slice.
#[derive(Debug, Clone)]
pub struct KdTree<'a> {
    points: &'a [Point3<f64>],
    indices: Vec<usize>,
    nodes: Vec<Node>,
    root: Option<usize>,
    max_depth: usize,
}

impl<'a> KdTree<'a> {
    pub fn build(points: &'a [Point3<f64>]) -> Self {
        let mut tree = Self {
            points,
            indices: (0..points.len()).collect(),
            nodes: Vec::with_capacity(points.len()),
            root: None,
            max_depth: 0,
        };
        tree.root = tree.build_node(0, points.len(), 0, None);
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Depth of `node`, found by walking parent links to the root.
    pub fn node_depth(&self, node: usize) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[node].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent].parent;
        }
        depth
    }

    /// Index of the point stored at `node`.
    pub fn node_point(&self, node: usize) -> usize {
        self.indices[self.nodes[node].median]
    }

    fn coord(&self, position: usize, axis: usize) -> f64 {
        self.points[self.indices[position]][axis]
    }

    fn build_node(
        &mut self,
        begin: usize,
        end: usize,
        depth: usize,
        parent: Option<usize>,
    ) -> Option<usize> {
        if begin >= end {
            return None;
        }
        self.max_depth = self.max_depth.max(depth);

        let median = begin + (end - begin) / 2;
        self.select(begin, end - 1, median, depth % DIMENSIONS);

        let node = self.nodes.len();
        self.nodes.push(Node {
            median,
            left: None,
            right: None,
            parent,
        });
        let left = self.build_node(begin, median, depth + 1, Some(node));
        let right = self.build_node(median + 1, end, depth + 1, Some(node));
        self.nodes[node].left = left;
        self.nodes[node].right = right;
        Some(node)
    }

    /// Quickselect over `indices[left..=right]` leaving the `k`-th smallest
    /// coordinate on `axis` at position `k`.
    fn select(&mut self, mut left: usize, mut right: usize, k: usize, axis: usize) {
        while right > left {
            let pivot = self.partition(left, right, left + (right - left) / 2, axis);
            match k.cmp(&pivot) {
                Ordering::Equal => break,
                Ordering::Less => right = pivot - 1,
                Ordering::Greater => left = pivot + 1,
            }
        }
    }

    fn partition(&mut self, left: usize, right: usize, pivot: usize, axis: usize) -> usize {
        let pivot_value = self.coord(pivot, axis);
        self.indices.swap(pivot, right);
        let mut store = left;
        for i in left..right {
            if self.coord(i, axis) < pivot_value {
                self.indices.swap(store, i);
                store += 1;
            }
        }
        self.indices.swap(right, store);
        store
    }

    /// All points within `max_distance_sq` of `query`, nearest first.
    pub fn nearest(&self, query: &Point3<f64>, max_distance_sq: f64) -> Vec<Neighbor> {
        self.nearest_with(query, max_distance_sq, SearchMode::Exhaustive)
    }

    pub fn nearest_with(
        &self,
        query: &Point3<f64>,
        max_distance_sq: f64,
        mode: SearchMode,
    ) -> Vec<Neighbor> {
        let mut found = BinaryHeap::new();
        if let Some(root) = self.root {
            self.search(root, 0, query, max_distance_sq, mode, &mut found);
        }
        found.into_sorted_vec()
    }

    fn search(
        &self,
        node: usize,
        depth: usize,
        query: &Point3<f64>,
        max_distance_sq: f64,
        mode: SearchMode,
        found: &mut BinaryHeap<Neighbor>,
    ) {
        let Node {
            median,
            left,
            right,
            ..
        } = self.nodes[node];
        let index = self.indices[median];
        let own = &self.points[index];
        let axis = depth % DIMENSIONS;
        let offset = query[axis] - own[axis];

        let (near, far) = if offset <= 0.0 {
            (left, right)
        } else {
            (right, left)
        };
        match (near, far) {
            (Some(near), far) => {
                self.search(near, depth + 1, query, max_distance_sq, mode, found);
                if let Some(far) = far {
                    if mode == SearchMode::Exhaustive && offset * offset <= max_distance_sq {
                        self.search(far, depth + 1, query, max_distance_sq, mode, found);
                    }
                }
            }
            (None, Some(only)) => {
                self.search(only, depth + 1, query, max_distance_sq, mode, found);
            }
            (None, None) => {}
        }

        let distance_sq = squared_distance(query, own);
        if distance_sq <= max_distance_sq {
            found.push(Neighbor { index, distance_sq });
        }
    }

    /// Re-checks the partition invariant from the root and returns the node count.
    pub fn validate(&self) -> Result<usize, SpatialIndexError> {
        let root = self.root.ok_or(SpatialIndexError::Empty)?;
        self.validate_node(root, 0)
    }

    fn validate_node(&self, node: usize, depth: usize) -> Result<usize, SpatialIndexError> {
        let axis = depth % DIMENSIONS;
        let split = self.coord(self.nodes[node].median, axis);
        let mut count = 1;
        if let Some(left) = self.nodes[node].left {
            if self.coord(self.nodes[left].median, axis) > split {
                return Err(SpatialIndexError::LeftChildAbove { node, axis });
            }
            count += self.validate_node(left, depth + 1)?;
        }
        if let Some(right) = self.nodes[node].right {
            if self.coord(self.nodes[right].median, axis) < split {
                return Err(SpatialIndexError::RightChildBelow { node, axis });
            }
            count += self.validate_node(right, depth + 1)?;
        }
        Ok(count)
    }
}
