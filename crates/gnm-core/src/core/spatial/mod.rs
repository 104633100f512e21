//! # Spatial Module
//!
//! Proximity queries over immutable 3D point sets.
//!
//! ## Overview
//!
//! [`kdtree::KdTree`] borrows the caller's coordinates and owns only a
//! permutation of point indices plus a flat node array. The split axis cycles
//! x, y, z with depth and every node holds the median point of its partition,
//! selected in place by quickselect.
//!
//! Radius queries return every point within a squared-distance threshold,
//! ordered by ascending distance. Two traversals are available through
//! [`kdtree::SearchMode`]: the exhaustive branch-and-bound search, and a
//! single-descent search that visits one child per node and can miss points
//! lying across a split plane.

pub mod kdtree;
