//! Grouping of grids into segments.
//!
//! A segment is the unit of one output image. Grids are bucketed by
//! `segment_id`; within a bucket they keep the order in which they were
//! loaded.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::Grid;

/// Grids partitioned by segment id, iterated in ascending id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segments {
    groups: BTreeMap<i64, Vec<Grid>>,
}

impl Segments {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Grids of one segment in load order.
    pub fn get(&self, segment_id: i64) -> Option<&[Grid]> {
        self.groups.get(&segment_id).map(Vec::as_slice)
    }

    pub fn segment_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.groups.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &[Grid])> + '_ {
        self.groups.iter().map(|(id, grids)| (*id, grids.as_slice()))
    }

    /// Total number of grids across all segments.
    pub fn grid_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Drop every segment whose id is not listed.
    pub fn retain_ids(&mut self, ids: &[i64]) {
        self.groups.retain(|id, _| ids.contains(id));
    }
}

impl IntoIterator for Segments {
    type Item = (i64, Vec<Grid>);
    type IntoIter = btree_map::IntoIter<i64, Vec<Grid>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Bucket grids by segment id, preserving load order inside each bucket.
pub fn group_by_segment(grids: impl IntoIterator<Item = Grid>) -> Segments {
    let mut groups: BTreeMap<i64, Vec<Grid>> = BTreeMap::new();
    for grid in grids {
        groups.entry(grid.segment_id).or_default().push(grid);
    }
    Segments { groups }
}
