//! Seeded generators for solvable height maps

use clap::ValueEnum;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::algorithm::commands::Command;
use crate::io::error::{Result, invalid_parameter};
use crate::simulation::placement::simulate;
use crate::spatial::HeightMap;
use crate::spatial::heightmap::check_size;

/// Order in which the generator places buildings
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MapPattern {
    /// Left to right, top to bottom
    RowMajor,
    /// Even parity cells first, then odd parity cells
    Checkerboard,
    /// Uniformly shuffled
    Random,
}

/// A generated map together with the order that built it
#[derive(Clone, Debug)]
pub struct GeneratedMap {
    /// Resulting heights
    pub map: HeightMap,
    /// Order used to build it
    pub commands: Vec<Command>,
}

/// Seeded generator for reproducible maps
pub struct MapGenerator {
    rng: StdRng,
}

impl MapGenerator {
    /// Create a deterministic generator
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Placement order for the pattern over a full grid
    pub fn commands(&mut self, pattern: MapPattern, rows: usize, cols: usize) -> Vec<Command> {
        let cells = (0..rows).flat_map(|row| (0..cols).map(move |col| Command::new(row, col)));
        match pattern {
            MapPattern::RowMajor => cells.collect(),
            MapPattern::Checkerboard => {
                let (mut even, odd): (Vec<_>, Vec<_>) =
                    cells.partition(|command| (command.row + command.col) % 2 == 0);
                even.extend(odd);
                even
            }
            MapPattern::Random => {
                let mut commands: Vec<_> = cells.collect();
                commands.shuffle(&mut self.rng);
                commands
            }
        }
    }

    /// Build a map, keeping a random `fill_ratio` share of the cells
    ///
    /// Dropped cells become empty lots, which splits larger grids into
    /// several independent areas.
    ///
    /// # Errors
    ///
    /// Returns an error if `fill_ratio` is outside `0.0..=1.0`, or the grid is
    /// empty or larger than supported
    pub fn generate(
        &mut self,
        pattern: MapPattern,
        rows: usize,
        cols: usize,
        fill_ratio: f64,
    ) -> Result<GeneratedMap> {
        if !(0.0..=1.0).contains(&fill_ratio) {
            return Err(invalid_parameter(
                "fill_ratio",
                &fill_ratio,
                &"must be between 0 and 1",
            ));
        }
        check_size(rows, cols)?;

        let mut commands = self.commands(pattern, rows, cols);
        let total = commands.len();
        let keep = (fill_ratio * total as f64).round() as usize;
        if keep < total {
            let mut kept = vec![false; total];
            let mut indices: Vec<usize> = (0..total).collect();
            indices.shuffle(&mut self.rng);
            for &index in indices.iter().take(keep) {
                if let Some(flag) = kept.get_mut(index) {
                    *flag = true;
                }
            }
            commands.retain(|command| {
                kept.get(command.row * cols + command.col)
                    .copied()
                    .unwrap_or(false)
            });
        }

        let map = simulate(rows, cols, &commands)?;
        Ok(GeneratedMap { map, commands })
    }
}
