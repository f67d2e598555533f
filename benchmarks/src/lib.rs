//! Shared helpers for waypoint benchmark suites.

use waypoint_harness::worlds::dungeon::DungeonProblem;

/// A named benchmark world.
pub struct Regime {
    pub name: &'static str,
    pub world: DungeonProblem,
}

fn grid_text(side: usize, is_wall: impl Fn(usize, usize) -> bool) -> String {
    let wall = "#".repeat(side + 2);
    let mut rows = vec![wall.clone()];
    for y in 0..side {
        let mut row = String::with_capacity(side + 2);
        row.push('#');
        for x in 0..side {
            row.push(if x == 0 && y == 0 {
                '@'
            } else if x == side - 1 && y == side - 1 {
                'E'
            } else if is_wall(x, y) {
                '#'
            } else {
                '.'
            });
        }
        row.push('#');
        rows.push(row);
    }
    rows.push(wall);
    rows.join("\n")
}

/// An open `side` x `side` floor ringed by walls, player and exit in
/// opposite corners.
#[must_use]
pub fn open_grid_text(side: usize) -> String {
    grid_text(side, |_, _| false)
}

/// Like [`open_grid_text`], with every odd column walled except for one gap
/// that alternates between the bottom and top rows. The last column stays
/// open.
#[must_use]
pub fn serpentine_text(side: usize) -> String {
    grid_text(side, |x, y| {
        if x % 2 == 0 || x + 1 == side {
            return false;
        }
        let gap = if (x / 2) % 2 == 0 { side - 1 } else { 0 };
        y != gap
    })
}

/// The benchmark regimes at `side`.
///
/// # Panics
///
/// Panics if a generated level fails to parse. Benchmark setup failures are
/// fatal.
#[must_use]
pub fn regimes(side: usize) -> Vec<Regime> {
    vec![
        Regime {
            name: "open",
            world: DungeonProblem::from_text(&open_grid_text(side)).expect("open grid parses"),
        },
        Regime {
            name: "serpentine",
            world: DungeonProblem::from_text(&serpentine_text(side)).expect("serpentine parses"),
        },
    ]
}
