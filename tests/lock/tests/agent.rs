//! Search agent lock tests.
//!
//! Proves:
//! 1. An agent walking a world reaches a goal with one search
//! 2. Following the agent costs exactly the planned path cost
//! 3. Moving the agent off its plan triggers exactly one new search

use lock_tests::fixtures::{DUNGEON_LEVEL, PARKING_LOT};
use waypoint_harness::geometry::Point;
use waypoint_harness::worlds::dungeon::{strong_heuristic, DungeonProblem};
use waypoint_harness::worlds::parking::{parking_heuristic, ParkingProblem};
use waypoint_kernel::Problem;
use waypoint_search::{run, Algorithm, Heuristic, SearchAgent, SearchPolicy};

/// Walk from the initial state until the agent has nothing left to do.
/// Returns the final state, the steps taken and their summed cost.
fn walk<P, H>(problem: &P, agent: &mut SearchAgent<P, H>) -> (P::State, usize, f64)
where
    P: Problem,
    H: Heuristic<P>,
{
    let mut state = problem.initial_state();
    let mut steps = 0;
    let mut cost = 0.0;
    while let Some(action) = agent.act(problem, &state).unwrap() {
        cost += problem.cost(&state, &action);
        state = problem.successor(&state, &action).unwrap();
        steps += 1;
        assert!(steps < 1_000, "agent is not converging");
    }
    (state, steps, cost)
}

#[test]
fn dungeon_agent_collects_everything_with_one_search() {
    let world = DungeonProblem::from_text(DUNGEON_LEVEL).unwrap();
    let policy = SearchPolicy::new(Algorithm::AStar);
    let planned = run(&policy, &world, world.initial_state(), &strong_heuristic).unwrap();

    let mut agent = SearchAgent::new(policy, strong_heuristic);
    let (end, steps, cost) = walk(&world, &mut agent);

    assert!(world.is_goal(&end));
    assert_eq!(agent.searches(), 1);
    assert_eq!(Some(steps), planned.solution.as_ref().map(Vec::len));
    assert_eq!(Some(cost), planned.path_cost);
    assert_eq!(agent.planned_states(), steps + 1);
}

#[test]
fn parking_agent_follows_an_optimal_plan() {
    let world = ParkingProblem::from_text(PARKING_LOT).unwrap();
    let mut agent = SearchAgent::new(SearchPolicy::new(Algorithm::UniformCost), parking_heuristic);
    let (end, steps, cost) = walk(&world, &mut agent);

    assert!(world.is_goal(&end));
    assert_eq!(steps, 8);
    assert_eq!(cost, 8.0);
    assert_eq!(agent.searches(), 1);
}

#[test]
fn dungeon_agent_replans_once_when_moved_off_plan() {
    let world = DungeonProblem::from_text(DUNGEON_LEVEL).unwrap();
    let mut agent = SearchAgent::new(SearchPolicy::new(Algorithm::AStar), strong_heuristic);
    let start = world.initial_state();
    assert!(agent.act(&world, &start).unwrap().is_some());
    assert_eq!(agent.searches(), 1);

    // Every optimal plan picks up a left-hand coin first, so standing at
    // the bottom of the middle corridor with all coins left is off plan.
    let mut detour = start.clone();
    detour.player = Point::new(5, 5);
    assert!(agent.act(&world, &detour).unwrap().is_some());
    assert_eq!(agent.searches(), 2);

    // Both plans stay remembered.
    assert!(agent.act(&world, &start).unwrap().is_some());
    let mut state = detour;
    while let Some(action) = agent.act(&world, &state).unwrap() {
        state = world.successor(&state, &action).unwrap();
    }
    assert!(world.is_goal(&state));
    assert_eq!(agent.searches(), 2);

    agent.reset();
    assert_eq!(agent.planned_states(), 0);
}
