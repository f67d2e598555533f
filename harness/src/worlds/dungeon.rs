//! Dungeon scavenger: collect every coin, then stand on the exit.
//!
//! Level text tiles:
//!
//! | Tile | Meaning |
//! |---|---|
//! | `#` | wall |
//! | `.` | floor |
//! | `$` | coin |
//! | `E` | exit |
//! | `@` | player start |
//!
//! Blank lines and surrounding whitespace are ignored. Every move costs 1.
//! Walking onto a coin picks it up.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Write;

use waypoint_kernel::{Problem, ProblemCache, ProblemError};

use crate::contract::{SearchWorld, WorldParseError};
use crate::geometry::{euclidean_distance, manhattan_distance, Direction, Point};

const WORLD_ID: &str = "dungeon";

/// Cache key of the precomputed maze distances used by [`strong_heuristic`].
pub const DISTANCE_TABLE_KEY: &str = "dungeon.distance_table";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DungeonState {
    pub player: Point,
    pub remaining_coins: BTreeSet<Point>,
}

#[derive(Debug)]
pub struct DungeonLayout {
    pub width: i32,
    pub height: i32,
    pub walkable: HashSet<Point>,
    pub exit: Point,
}

#[derive(Debug)]
pub struct DungeonProblem {
    layout: DungeonLayout,
    initial: DungeonState,
    input: String,
    cache: ProblemCache,
}

impl DungeonProblem {
    /// Parse a level.
    ///
    /// # Errors
    ///
    /// Returns [`WorldParseError`] when the level has no player, no exit,
    /// more than one of either, or an unknown tile.
    pub fn from_text(text: &str) -> Result<Self, WorldParseError> {
        let mut walkable = HashSet::new();
        let mut coins = BTreeSet::new();
        let mut player = None;
        let mut exit = None;
        let mut width = 0;
        let mut height = 0;

        for (y, line) in (0..).zip(text.lines().map(str::trim).filter(|l| !l.is_empty())) {
            height = y + 1;
            for (x, tile) in (0..).zip(line.chars()) {
                width = width.max(x + 1);
                let here = Point::new(x, y);
                let slot = match tile {
                    '#' => continue,
                    '.' => None,
                    '$' => {
                        coins.insert(here);
                        None
                    }
                    '@' => Some((&mut player, "player")),
                    'E' => Some((&mut exit, "exit")),
                    other => {
                        return Err(WorldParseError::new(
                            WORLD_ID,
                            format!("unknown tile {other:?} at {here}"),
                        ))
                    }
                };
                if let Some((slot, role)) = slot {
                    if slot.replace(here).is_some() {
                        return Err(WorldParseError::new(WORLD_ID, format!("more than one {role}")));
                    }
                }
                walkable.insert(here);
            }
        }

        let player = player.ok_or_else(|| WorldParseError::new(WORLD_ID, "no player"))?;
        let exit = exit.ok_or_else(|| WorldParseError::new(WORLD_ID, "no exit"))?;
        Ok(Self {
            layout: DungeonLayout {
                width,
                height,
                walkable,
                exit,
            },
            initial: DungeonState {
                player,
                remaining_coins: coins,
            },
            input: text.to_string(),
            cache: ProblemCache::new(),
        })
    }

    #[must_use]
    pub fn layout(&self) -> &DungeonLayout {
        &self.layout
    }

    /// The level as it looks in `state`.
    #[must_use]
    pub fn render(&self, state: &DungeonState) -> String {
        let mut out = String::new();
        for y in 0..self.layout.height {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..self.layout.width {
                let here = Point::new(x, y);
                let tile = if !self.layout.walkable.contains(&here) {
                    '#'
                } else if here == state.player {
                    '@'
                } else if here == self.layout.exit {
                    'E'
                } else if state.remaining_coins.contains(&here) {
                    '$'
                } else {
                    '.'
                };
                out.push(tile);
            }
        }
        out
    }
}

impl Problem for DungeonProblem {
    type State = DungeonState;
    type Action = Direction;

    fn initial_state(&self) -> DungeonState {
        self.initial.clone()
    }

    fn is_goal(&self, state: &DungeonState) -> bool {
        state.remaining_coins.is_empty() && state.player == self.layout.exit
    }

    fn actions(&self, state: &DungeonState) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.layout.walkable.contains(&state.player.step(*d)))
            .collect()
    }

    fn successor(&self, state: &DungeonState, action: &Direction) -> Result<DungeonState, ProblemError> {
        let player = state.player.step(*action);
        if !self.layout.walkable.contains(&player) {
            return Ok(state.clone());
        }
        let mut remaining_coins = state.remaining_coins.clone();
        remaining_coins.remove(&player);
        Ok(DungeonState {
            player,
            remaining_coins,
        })
    }

    fn cache(&self) -> &ProblemCache {
        &self.cache
    }
}

impl SearchWorld for DungeonProblem {
    fn world_id(&self) -> &str {
        WORLD_ID
    }

    fn world_input(&self) -> &str {
        &self.input
    }

    fn describe_state(&self, state: &DungeonState) -> String {
        let mut out = state.player.to_string();
        for coin in &state.remaining_coins {
            let _ = write!(out, " ${coin}");
        }
        out
    }

    fn describe_action(&self, action: &Direction) -> String {
        action.name().to_string()
    }
}

/// Straight-line distance from the player to the exit.
///
/// Consistent, but blind to coins, so searches using it explore widely.
#[must_use]
pub fn weak_heuristic(problem: &DungeonProblem, state: &DungeonState) -> f64 {
    euclidean_distance(state.player, problem.layout.exit)
}

/// Grid distance from the player to the exit, ignoring walls and coins.
#[must_use]
pub fn manhattan_heuristic(problem: &DungeonProblem, state: &DungeonState) -> f64 {
    f64::from(manhattan_distance(state.player, problem.layout.exit))
}

/// Maze (wall-aware) distances from the exit and from every initial coin to
/// each reachable floor tile.
#[derive(Debug, Default)]
pub struct DistanceTable {
    from: HashMap<Point, HashMap<Point, u32>>,
}

impl DistanceTable {
    fn build(layout: &DungeonLayout, sources: impl IntoIterator<Item = Point>) -> Self {
        let from = sources
            .into_iter()
            .map(|source| (source, flood(layout, source)))
            .collect();
        Self { from }
    }

    /// Walking distance between `source` (a coin or the exit) and `to`.
    /// `None` when unreachable or `source` is not in the table.
    #[must_use]
    pub fn distance(&self, source: Point, to: Point) -> Option<u32> {
        self.from.get(&source)?.get(&to).copied()
    }
}

fn flood(layout: &DungeonLayout, source: Point) -> HashMap<Point, u32> {
    let mut dist = HashMap::from([(source, 0)]);
    let mut queue = VecDeque::from([source]);
    while let Some(here) = queue.pop_front() {
        let d = dist[&here];
        for direction in Direction::ALL {
            let next = here.step(direction);
            if layout.walkable.contains(&next) && !dist.contains_key(&next) {
                dist.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

/// The longest "visit this coin, then leave" detour among remaining coins,
/// measured in maze distance; the maze distance to the exit when no coin is
/// left.
///
/// Every remaining coin must be visited before the exit, so each detour is a
/// lower bound on the remaining cost. The maze distances are computed once
/// per problem and kept in its cache under [`DISTANCE_TABLE_KEY`].
#[must_use]
pub fn strong_heuristic(problem: &DungeonProblem, state: &DungeonState) -> f64 {
    let layout = &problem.layout;
    let table = problem.cache().get_or_insert_with(DISTANCE_TABLE_KEY, || {
        let sources = problem
            .initial
            .remaining_coins
            .iter()
            .copied()
            .chain(std::iter::once(layout.exit));
        DistanceTable::build(layout, sources)
    });
    let table = match table {
        Ok(table) => table,
        Err(err) => {
            tracing::warn!(error = %err, "distance table unavailable, using manhattan distance");
            return manhattan_heuristic(problem, state);
        }
    };

    let leg = |source: Point, to: Point| table.distance(source, to).map_or(f64::INFINITY, f64::from);
    let exit = layout.exit;
    state
        .remaining_coins
        .iter()
        .map(|&coin| leg(coin, state.player) + leg(exit, coin))
        .fold(leg(exit, state.player), f64::max)
}
