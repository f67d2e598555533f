//! Parking: move every car into its own slot.
//!
//! Level text tiles: `#` wall, `.` floor, `A`–`J` car 0–9, `0`–`9` the slot
//! of car 0–9. A move shifts one car one tile onto free floor. Each move
//! costs 1, plus 100 when the car enters a slot that belongs to another car.

use std::collections::{BTreeMap, HashMap, HashSet};

use waypoint_kernel::{Problem, ProblemCache, ProblemError};

use crate::contract::{SearchWorld, WorldParseError};
use crate::geometry::{manhattan_distance, Direction, Point};

const WORLD_ID: &str = "parking";

/// Surcharge for entering a slot owned by another car.
pub const FOREIGN_SLOT_PENALTY: f64 = 100.0;

/// Car positions, indexed by car.
pub type ParkingState = Vec<Point>;

/// Move car `.0` one tile in direction `.1`.
pub type ParkingAction = (usize, Direction);

#[derive(Debug)]
pub struct ParkingProblem {
    passages: HashSet<Point>,
    cars: Vec<Point>,
    slots: HashMap<Point, usize>,
    input: String,
    cache: ProblemCache,
}

impl ParkingProblem {
    /// Parse a parking lot.
    ///
    /// # Errors
    ///
    /// Returns [`WorldParseError`] for unknown tiles, duplicate cars or
    /// slots, or car letters that do not run contiguously from `A`.
    pub fn from_text(text: &str) -> Result<Self, WorldParseError> {
        let mut passages = HashSet::new();
        let mut cars = BTreeMap::new();
        let mut slots = HashMap::new();
        let mut seen_slots = HashSet::new();

        for (y, line) in (0..).zip(text.lines().map(str::trim).filter(|l| !l.is_empty())) {
            for (x, tile) in (0..).zip(line.chars()) {
                let here = Point::new(x, y);
                match tile {
                    '#' => continue,
                    '.' => {}
                    'A'..='J' => {
                        let car = usize::from(tile as u8 - b'A');
                        if cars.insert(car, here).is_some() {
                            return Err(WorldParseError::new(WORLD_ID, format!("car {tile} appears twice")));
                        }
                    }
                    '0'..='9' => {
                        let car = usize::from(tile as u8 - b'0');
                        if !seen_slots.insert(car) {
                            return Err(WorldParseError::new(WORLD_ID, format!("slot {tile} appears twice")));
                        }
                        slots.insert(here, car);
                    }
                    other => {
                        return Err(WorldParseError::new(
                            WORLD_ID,
                            format!("unknown tile {other:?} at {here}"),
                        ))
                    }
                }
                passages.insert(here);
            }
        }

        if cars.keys().copied().ne(0..cars.len()) {
            return Err(WorldParseError::new(WORLD_ID, "car letters must run from A without gaps"));
        }
        Ok(Self {
            passages,
            cars: cars.into_values().collect(),
            slots,
            input: text.to_string(),
            cache: ProblemCache::new(),
        })
    }

    #[must_use]
    pub fn car_count(&self) -> usize {
        self.cars.len()
    }

    /// Where car `car` must end up, if the lot has a slot for it.
    #[must_use]
    pub fn slot_of(&self, car: usize) -> Option<Point> {
        self.slots
            .iter()
            .find_map(|(point, owner)| (*owner == car).then_some(*point))
    }
}

impl Problem for ParkingProblem {
    type State = ParkingState;
    type Action = ParkingAction;

    fn initial_state(&self) -> ParkingState {
        self.cars.clone()
    }

    fn is_goal(&self, state: &ParkingState) -> bool {
        state
            .iter()
            .enumerate()
            .all(|(car, position)| self.slots.get(position) == Some(&car))
    }

    fn actions(&self, state: &ParkingState) -> Vec<ParkingAction> {
        let mut actions = Vec::new();
        for (car, position) in state.iter().enumerate() {
            for direction in Direction::ALL {
                let next = position.step(direction);
                if self.passages.contains(&next) && !state.contains(&next) {
                    actions.push((car, direction));
                }
            }
        }
        actions
    }

    fn successor(&self, state: &ParkingState, action: &ParkingAction) -> Result<ParkingState, ProblemError> {
        let (car, direction) = *action;
        let mut next = state.clone();
        let position = next.get_mut(car).ok_or_else(|| ProblemError::Domain {
            detail: format!("no car {car}"),
        })?;
        *position = position.step(direction);
        Ok(next)
    }

    fn cost(&self, state: &ParkingState, action: &ParkingAction) -> f64 {
        let (car, direction) = *action;
        let target = state[car].step(direction);
        match self.slots.get(&target) {
            Some(owner) if *owner != car => 1.0 + FOREIGN_SLOT_PENALTY,
            _ => 1.0,
        }
    }

    fn cache(&self) -> &ProblemCache {
        &self.cache
    }
}

impl SearchWorld for ParkingProblem {
    fn world_id(&self) -> &str {
        WORLD_ID
    }

    fn world_input(&self) -> &str {
        &self.input
    }

    fn describe_state(&self, state: &ParkingState) -> String {
        state
            .iter()
            .enumerate()
            .map(|(car, p)| format!("{}{p}", car_letter(car)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn describe_action(&self, action: &ParkingAction) -> String {
        format!("{}{}", car_letter(action.0), action.1.name())
    }
}

fn car_letter(car: usize) -> char {
    u8::try_from(car)
        .ok()
        .and_then(|c| c.checked_add(b'A'))
        .map_or('?', char::from)
}

/// Sum over cars of the grid distance to their own slot.
///
/// Each move shifts one car by one tile at cost at least 1, so the sum is
/// admissible and consistent. Cars without a slot contribute nothing.
#[must_use]
pub fn parking_heuristic(problem: &ParkingProblem, state: &ParkingState) -> f64 {
    state
        .iter()
        .enumerate()
        .filter_map(|(car, position)| problem.slot_of(car).map(|slot| manhattan_distance(*position, slot)))
        .map(f64::from)
        .sum()
}
