//! Placement rule: a new building starts at height 1 and raises each
//! occupied 4-neighbour by one, wrapping 4 back to 1

use ndarray::Array2;

use crate::algorithm::commands::Command;
use crate::io::error::{Result, SolveError};
use crate::spatial::HeightMap;

/// Raise an occupied lot by one level, wrapping after 4
pub const fn raise(height: &mut u8) {
    if *height != 0 {
        *height += 1;
        if *height == 5 {
            *height = 1;
        }
    }
}

/// Place one building
///
/// # Errors
///
/// Returns [`SolveError::InvalidCommand`] if the target is outside the grid
/// or already built on
pub fn apply_command(heights: &mut Array2<u8>, command: Command) -> Result<()> {
    let Command { row, col } = command;
    match heights.get_mut([row, col]) {
        None => {
            return Err(SolveError::InvalidCommand {
                row,
                col,
                reason: "position is outside the grid",
            });
        }
        Some(height) if *height != 0 => {
            return Err(SolveError::InvalidCommand {
                row,
                col,
                reason: "position is already built on",
            });
        }
        Some(height) => *height = 1,
    }

    let neighbors = [
        row.checked_sub(1).map(|up| [up, col]),
        Some([row + 1, col]),
        col.checked_sub(1).map(|left| [row, left]),
        Some([row, col + 1]),
    ];
    for position in neighbors.into_iter().flatten() {
        if let Some(height) = heights.get_mut(position) {
            raise(height);
        }
    }

    Ok(())
}

/// Replay commands on an empty `rows` x `cols` grid
///
/// # Errors
///
/// Returns an error if a command cannot be applied or the grid is empty
pub fn simulate(rows: usize, cols: usize, commands: &[Command]) -> Result<HeightMap> {
    let mut heights = Array2::zeros((rows, cols));
    for &command in commands {
        apply_command(&mut heights, command)?;
    }
    HeightMap::from_array(heights)
}

/// Check that replaying `commands` reproduces `map` up to the 5/6 aliases
///
/// # Errors
///
/// Returns [`SolveError::ReplayMismatch`] naming the first differing cell,
/// or the replay error if a command cannot be applied
pub fn verify_commands(map: &HeightMap, commands: &[Command]) -> Result<()> {
    let expected = map.normalized();
    let replayed = simulate(map.rows(), map.cols(), commands)?;

    let mismatch = expected
        .heights()
        .indexed_iter()
        .zip(replayed.heights().iter())
        .find(|((_, want), got)| want != got);

    match mismatch {
        Some((((row, col), &want), &got)) => Err(SolveError::ReplayMismatch {
            row,
            col,
            expected: want,
            found: got,
        }),
        None => Ok(()),
    }
}
