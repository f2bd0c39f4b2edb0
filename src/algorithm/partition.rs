use std::ops::Range;

use crate::io::configuration::MAX_AGE;
use crate::io::error::{InconsistencyKind, LocalInconsistency};
use crate::spatial::Parcel;
use crate::spatial::parcel::Color;

/// Set of cell indices stored as contiguous ranges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Area {
    ranges: Vec<Range<usize>>,
    size: usize,
    eye: Option<usize>,
}

impl Area {
    /// Create an empty area
    pub const fn new() -> Self {
        Self {
            ranges: Vec::new(),
            size: 0,
            eye: None,
        }
    }

    /// Area covering every index below `len`
    pub fn full(len: usize) -> Self {
        let mut area = Self::new();
        area.insert(0..len);
        area
    }

    /// Add a range of indices; empty ranges are ignored
    pub fn insert(&mut self, range: Range<usize>) {
        if range.start < range.end {
            self.size += range.len();
            self.ranges.push(range);
        }
    }

    /// Number of indices covered
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether the area covers no index
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Designated maximum-age cell, if any
    pub const fn eye(&self) -> Option<usize> {
        self.eye
    }

    /// Designate the eye cell
    pub const fn set_eye(&mut self, index: usize) {
        self.eye = Some(index);
    }

    /// Stored ranges in insertion order
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Covered indices in range order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.ranges.iter().flat_map(Clone::clone)
    }

    /// Whether an index is covered
    pub fn contains(&self, index: usize) -> bool {
        self.ranges.iter().any(|range| range.contains(&index))
    }
}

/// Flood-fill colouriser with a reusable work buffer
///
/// Components are flood-filled along adjacency masks and never share a
/// live edge, so each one can be solved independently.
#[derive(Debug, Default)]
pub struct Partitioner {
    pending: Vec<usize>,
    checks: usize,
}

impl Partitioner {
    /// Create a partitioner
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            checks: 0,
        }
    }

    /// Number of colour checks performed
    pub const fn checks(&self) -> usize {
        self.checks
    }

    /// Collect the component containing `start` and mark it done
    ///
    /// `start` must be live and uncoloured.
    pub fn colorize(&mut self, parcel: &mut Parcel, start: usize) -> Area {
        let mut area = Area::new();
        let mut row_min = parcel.rows();
        let mut row_max = 0;
        let mut col_min = parcel.cols();
        let mut col_max = 0;

        self.pending.clear();
        if let Some(cell) = parcel.cell_mut(start) {
            cell.color = Color::Visiting;
            self.pending.push(start);
        }

        while let Some(index) = self.pending.pop() {
            let Some(cell) = parcel.cell(index).copied() else {
                continue;
            };
            if cell.age == MAX_AGE {
                area.set_eye(index);
            }

            let (row, col) = parcel.position(index);
            row_min = row_min.min(row);
            row_max = row_max.max(row + 1);
            col_min = col_min.min(col);
            col_max = col_max.max(col + 1);

            for dir in cell.neighbors() {
                let Some(next) = parcel.neighbor_index(index, dir) else {
                    continue;
                };
                if let Some(neighbor) = parcel.cell_mut(next) {
                    if neighbor.color == Color::Clear {
                        neighbor.color = Color::Visiting;
                        self.pending.push(next);
                    }
                }
            }
        }

        // Row-wise runs of the component inside its bounding box
        let cols = parcel.cols();
        for row in row_min..row_max {
            let mut run_start = None;
            for col in col_min..col_max {
                let index = row * cols + col;
                let visiting = parcel
                    .cell(index)
                    .is_some_and(|cell| cell.color == Color::Visiting);
                match (visiting, run_start) {
                    (true, None) => run_start = Some(index),
                    (false, Some(begin)) => {
                        area.insert(begin..index);
                        run_start = None;
                    }
                    _ => {}
                }
            }
            if let Some(begin) = run_start {
                area.insert(begin..row * cols + col_max);
            }
        }

        for index in area.iter() {
            if let Some(cell) = parcel.cell_mut(index) {
                cell.color = Color::Done;
            }
        }

        area
    }

    /// Split the live cells of `scope` into connected areas
    ///
    /// With `collect_all` every area is returned, otherwise only the smallest
    /// one (the first found on ties). An empty result means `scope` has no
    /// live cell left.
    ///
    /// # Errors
    ///
    /// Returns [`InconsistencyKind::EyelessArea`] if some component contains
    /// no maximum-age cell, which no build order can produce
    pub fn color_check(
        &mut self,
        parcel: &mut Parcel,
        scope: &Area,
        collect_all: bool,
    ) -> Result<Vec<Area>, LocalInconsistency> {
        self.checks += 1;

        for index in scope.iter() {
            if let Some(cell) = parcel.cell_mut(index) {
                cell.color = Color::Clear;
            }
        }

        let mut areas = Vec::new();
        let mut smallest: Option<Area> = None;

        for index in scope.iter() {
            let uncolored = parcel
                .cell(index)
                .is_some_and(|cell| cell.is_live() && cell.color == Color::Clear);
            if !uncolored {
                continue;
            }

            let component = self.colorize(parcel, index);
            if component.eye().is_none() {
                return Err(LocalInconsistency::new(
                    index,
                    InconsistencyKind::EyelessArea,
                ));
            }

            if collect_all {
                areas.push(component);
            } else if smallest
                .as_ref()
                .is_none_or(|best| component.size() < best.size())
            {
                smallest = Some(component);
            }
        }

        areas.extend(smallest);
        Ok(areas)
    }
}
