//! Level assembly
//!
//! Quiz levels come from a character grid; the platformer level is a fixed
//! list of platforms. Either way the result is a flat obstacle list, built
//! once, plus the body's spawn point.

use glam::{IVec2, Vec2};

use super::obstacle::Obstacle;
use super::rect::Rect;
use crate::consts::*;

/// The quiz map. `#` wall, `P` spawn, `1`-`9` question blocks.
pub const QUIZ_MAP: [&str; 12] = [
    "####################",
    "#P.................#",
    "#...####...........#",
    "#...#..1...........#",
    "#...#.......####...#",
    "#...........#..2...#",
    "#...........#......#",
    "#.....#######......#",
    "#.......3..........#",
    "#..................#",
    "#..................#",
    "####################",
];

/// Obstacles and spawn point for one level
#[derive(Debug, Clone)]
pub struct Level {
    /// In grid order (row-major) for parsed maps
    pub obstacles: Vec<Obstacle>,
    pub spawn: Vec2,
    /// World size in pixels
    pub size: IVec2,
}

/// Build a level from grid rows.
///
/// The body is centred in the spawn cell using integer offsets. Rows may have
/// different lengths; the widest decides the world width. Unknown characters
/// are empty space.
pub fn parse_grid<S: AsRef<str>>(rows: &[S], tile_size: i32, body_size: IVec2) -> Level {
    let mut obstacles = Vec::new();
    let mut spawn = None;
    let mut columns = 0;

    for (row_idx, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        columns = columns.max(row.chars().count() as i32);
        for (col_idx, cell) in row.chars().enumerate() {
            let x = col_idx as i32 * tile_size;
            let y = row_idx as i32 * tile_size;
            let bounds = Rect::new(x, y, tile_size, tile_size);

            match cell {
                '#' => obstacles.push(Obstacle::wall(bounds)),
                '1'..='9' => obstacles.push(Obstacle::quiz(bounds, cell.to_string())),
                'P' => {
                    if spawn.is_none() {
                        let offset = (IVec2::splat(tile_size) - body_size) / 2;
                        spawn = Some(Vec2::new((x + offset.x) as f32, (y + offset.y) as f32));
                    } else {
                        log::warn!("Extra spawn at row {row_idx}, col {col_idx} ignored");
                    }
                }
                _ => {}
            }
        }
    }

    let spawn = spawn.unwrap_or_else(|| {
        log::warn!("Level has no spawn cell, placing body at the origin");
        Vec2::ZERO
    });

    Level {
        obstacles,
        spawn,
        size: IVec2::new(columns * tile_size, rows.len() as i32 * tile_size),
    }
}

/// The tile-walking quiz level
pub fn quiz_level() -> Level {
    parse_grid(&QUIZ_MAP, TILE_SIZE, WALKER_SIZE)
}

/// The echo-bridge platformer level.
///
/// Two floor segments with a gap, a high ledge on the right, and a passable
/// echo bridge across the gap.
pub fn platformer_level(echo_range: f32) -> Level {
    let w = PLATFORMER_SCREEN.x;
    let h = PLATFORMER_SCREEN.y;
    let obstacles = vec![
        Obstacle::wall(Rect::new(0, h - 40, 300, 40)),
        Obstacle::wall(Rect::new(500, h - 40, 300, 40)),
        Obstacle::wall(Rect::new(600, 350, 150, 20)),
        Obstacle::echo_with_range(Rect::new(320, 450, 160, 20), echo_range),
    ];

    Level {
        obstacles,
        spawn: PLATFORMER_SPAWN,
        size: IVec2::new(w, h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleKind;

    #[test]
    fn test_quiz_level() {
        let level = quiz_level();
        assert_eq!(level.size, IVec2::new(800, 480));
        // Spawn cell (1, 1), 24 px body centred in 40 px tile
        assert_eq!(level.spawn, Vec2::new(48.0, 40.0));

        let tags: Vec<&str> = level.obstacles.iter().filter_map(|o| o.tag()).collect();
        assert_eq!(tags, vec!["1", "2", "3"]);

        let block = level
            .obstacles
            .iter()
            .find(|o| o.tag() == Some("2"))
            .unwrap();
        assert_eq!(block.bounds, Rect::new(600, 200, 40, 40));
        assert!(block.is_solid());
    }

    #[test]
    fn test_parse_symbols() {
        let rows = ["#P?", ".7#", "P.."];
        let level = parse_grid(&rows, 10, IVec2::new(6, 10));
        // First spawn wins
        assert_eq!(level.spawn, Vec2::new(12.0, 0.0));
        assert_eq!(level.obstacles.len(), 3);
        assert_eq!(level.obstacles[0].kind, ObstacleKind::Static);
        assert_eq!(level.obstacles[1].tag(), Some("7"));
        assert_eq!(level.obstacles[2].bounds, Rect::new(20, 10, 10, 10));
    }

    #[test]
    fn test_ragged_rows_and_missing_spawn() {
        let rows = vec!["##".to_string(), "#####".to_string()];
        let level = parse_grid(&rows, 40, WALKER_SIZE);
        assert_eq!(level.size, IVec2::new(200, 80));
        assert_eq!(level.spawn, Vec2::ZERO);
        assert_eq!(level.obstacles.len(), 7);
    }

    #[test]
    fn test_platformer_level() {
        let level = platformer_level(ECHO_INTERACTION_RANGE);
        assert_eq!(level.obstacles.len(), 4);
        assert_eq!(level.obstacles[0].bounds, Rect::new(0, 560, 300, 40));
        let echo = &level.obstacles[3];
        assert!(echo.is_toggleable());
        assert!(!echo.is_solid());
        assert_eq!(level.spawn, Vec2::new(100.0, 400.0));
    }
}
