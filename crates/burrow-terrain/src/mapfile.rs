//! Plain-text map format loader and writer.
//!
//! One character per tile, the first line is the top row of the world:
//! `#` solid, `=` platform, `.` or space passable. Every row must have the
//! same width. Blank lines at the end of the file are ignored.

use std::io::{self, Write};
use std::path::Path;

use burrow_core::constants::{MAP_CHAR_PASSABLE, MAP_CHAR_PLATFORM, MAP_CHAR_SOLID};
use burrow_core::types::TileKind;

use crate::grid::TileGrid;
use crate::query::TerrainQuery;

/// Load a TileGrid from a text map file.
pub fn load_map(path: &Path, tile_width: i32, tile_height: i32) -> io::Result<TileGrid> {
    let text = std::fs::read_to_string(path)?;
    parse_map(&text, tile_width, tile_height)
}

/// Parse a TileGrid from map text.
pub fn parse_map(text: &str, tile_width: i32, tile_height: i32) -> io::Result<TileGrid> {
    if tile_width <= 0 || tile_height <= 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("tile size must be positive, got {tile_width}x{tile_height}"),
        ));
    }

    let mut rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    if rows.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "map has no rows"));
    }

    let width = rows[0].chars().count();
    if width == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "map rows are empty",
        ));
    }
    let height = rows.len();
    let mut grid = TileGrid::new(width as i32, height as i32, tile_width, tile_height);

    for (line_no, row) in rows.iter().enumerate() {
        let row_width = row.chars().count();
        if row_width != width {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "line {}: row is {row_width} tiles wide, expected {width}",
                    line_no + 1
                ),
            ));
        }
        // The first line is the top row.
        let y = (height - 1 - line_no) as i32;
        for (x, c) in row.chars().enumerate() {
            let kind = match c {
                MAP_CHAR_SOLID => TileKind::Solid,
                MAP_CHAR_PLATFORM => TileKind::Platform,
                MAP_CHAR_PASSABLE | ' ' => TileKind::Passable,
                other => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("line {}: unknown tile character {other:?}", line_no + 1),
                    ))
                }
            };
            grid.set(x as i32, y, kind);
        }
    }

    Ok(grid)
}

/// Render a TileGrid as map text, top row first, one newline per row.
pub fn render_map(grid: &TileGrid) -> String {
    let w = grid.width_tiles();
    let h = grid.height_tiles();
    let mut out = String::with_capacity(((w + 1) * h) as usize);
    for y in (0..h).rev() {
        for x in 0..w {
            out.push(match grid.classify(x, y) {
                TileKind::Solid => MAP_CHAR_SOLID,
                TileKind::Platform => MAP_CHAR_PLATFORM,
                TileKind::Passable => MAP_CHAR_PASSABLE,
            });
        }
        out.push('\n');
    }
    out
}

/// Write a TileGrid to a text map file.
pub fn write_map(path: &Path, grid: &TileGrid) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(render_map(grid).as_bytes())?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
.....
..==.
#...#
#####
";

    #[test]
    fn test_parse_orients_first_line_as_top() {
        let grid = parse_map(SAMPLE, 16, 16).unwrap();
        assert_eq!(grid.width_tiles(), 5);
        assert_eq!(grid.height_tiles(), 4);
        assert_eq!(grid.classify(0, 0), TileKind::Solid);
        assert_eq!(grid.classify(1, 1), TileKind::Passable);
        assert_eq!(grid.classify(4, 1), TileKind::Solid);
        assert_eq!(grid.classify(2, 2), TileKind::Platform);
        assert_eq!(grid.classify(2, 3), TileKind::Passable);
    }

    #[test]
    fn test_render_round_trips() {
        let grid = parse_map(SAMPLE, 8, 8).unwrap();
        assert_eq!(render_map(&grid), SAMPLE);
    }

    #[test]
    fn test_spaces_and_crlf_are_accepted() {
        let grid = parse_map("#  #\r\n####\r\n\r\n", 16, 16).unwrap();
        assert_eq!(grid.height_tiles(), 2);
        assert_eq!(grid.classify(1, 1), TileKind::Passable);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = parse_map("###\n##\n", 16, 16).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_unknown_character_rejected() {
        let err = parse_map("#x#\n", 16, 16).unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_empty_map_rejected() {
        assert!(parse_map("\n\n", 16, 16).is_err());
        assert!(parse_map("###\n", 0, 16).is_err());
    }

    #[test]
    fn test_write_then_load() {
        let grid = parse_map(SAMPLE, 16, 16).unwrap();
        let path = std::env::temp_dir().join("burrow_mapfile_test.map");
        write_map(&path, &grid).unwrap();
        let loaded = load_map(&path, 16, 16).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(grid, loaded);
    }
}
