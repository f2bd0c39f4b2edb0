//! Text format for height maps and command lists
//!
//! A map starts with a `rows cols` header line followed by one line of
//! whitespace separated heights per row. Blank lines are ignored. Command
//! lists hold one `row col` pair per line.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::algorithm::commands::Command;
use crate::io::error::{Result, WithPath, parse_error};
use crate::spatial::HeightMap;
use crate::spatial::heightmap::check_size;

/// Parse a map from its text form
///
/// # Errors
///
/// Returns an error if the header is missing or malformed, the header
/// names more cells than supported, a row has the wrong number of values,
/// a value is not an integer, or the heights fail map validation
pub fn parse_map(text: &str) -> Result<HeightMap> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(number, line)| (number + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| parse_error(1, &"missing 'rows cols' header"))?;
    let dims = parse_numbers::<usize>(header_line, header)?;
    let [rows, cols] = dims[..] else {
        return Err(parse_error(
            header_line,
            &format!("header needs 2 values, found {}", dims.len()),
        ));
    };

    check_size(rows, cols)?;

    // Row storage is bounded by the text, not the header
    let mut grid = Vec::with_capacity(rows.min(text.lines().count()));
    for (number, line) in lines {
        if grid.len() == rows {
            return Err(parse_error(number, &"unexpected data after the last row"));
        }
        let values = parse_numbers::<i64>(number, line)?;
        if values.len() != cols {
            return Err(parse_error(
                number,
                &format!("expected {cols} values, found {}", values.len()),
            ));
        }
        grid.push(values);
    }

    if grid.len() != rows {
        return Err(parse_error(
            text.lines().count().max(1),
            &format!("expected {rows} rows, found {}", grid.len()),
        ));
    }

    HeightMap::from_rows(&grid)
}

fn parse_numbers<T>(line_number: usize, line: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<T>()
                .map_err(|error| parse_error(line_number, &format!("'{token}': {error}")))
        })
        .collect()
}

/// Render a map in its text form
pub fn format_map(map: &HeightMap) -> String {
    let mut text = format!("{} {}\n", map.rows(), map.cols());
    for row in map.heights().rows() {
        let line: Vec<String> = row.iter().map(ToString::to_string).collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

/// Render a command list, one `row col` pair per line
pub fn format_commands(commands: &[Command]) -> String {
    let mut text = String::with_capacity(commands.len() * 6);
    for command in commands {
        text.push_str(&command.to_string());
        text.push('\n');
    }
    text
}

/// Read and parse a map file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn read_map(path: &Path) -> Result<HeightMap> {
    let text = std::fs::read_to_string(path).with_path(path, "read")?;
    parse_map(&text)
}

/// Write a command list to a file
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn write_commands(path: &Path, commands: &[Command]) -> Result<()> {
    std::fs::write(path, format_commands(commands)).with_path(path, "write")
}
