//! Harness world lock tests.
//!
//! Proves, for each world built from the shared fixtures:
//! 1. Every algorithm solves it, and each plan replays to a goal
//! 2. Cost-optimal algorithms agree on the optimal cost
//! 3. A* with a consistent heuristic goal-tests no more states than uniform-cost
//! 4. Malformed world text is rejected with the world's id

use lock_tests::fixtures::{replay, DUNGEON_LEVEL, PARKING_LOT, ROUTING_GRAPH};
use waypoint_kernel::problem::Problem;
use waypoint_harness::contract::SearchWorld;
use waypoint_harness::worlds::dungeon::{manhattan_heuristic, strong_heuristic, DungeonProblem};
use waypoint_harness::worlds::graph_routing::{graph_routing_heuristic, GraphRoutingProblem};
use waypoint_harness::worlds::parking::{parking_heuristic, ParkingProblem, FOREIGN_SLOT_PENALTY};
use waypoint_search::{run, Algorithm, Heuristic, SearchPolicy, SearchResult};

fn solve_all<W, H>(world: &W, heuristic: &H) -> Vec<(Algorithm, SearchResult<W::Action>)>
where
    W: SearchWorld,
    H: Heuristic<W>,
{
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let result = run(&SearchPolicy::new(algorithm), world, world.initial_state(), heuristic).unwrap();
            let plan = result
                .solution
                .as_ref()
                .unwrap_or_else(|| panic!("{} unsolved under {algorithm}", world.world_id()));
            let (end, cost) = replay(world, world.initial_state(), plan).unwrap();
            assert!(world.is_goal(&end), "{algorithm} plan misses the goal");
            assert_eq!(Some(cost), result.path_cost, "{algorithm}");
            (algorithm, result)
        })
        .collect()
}

fn result_of<A>(results: &[(Algorithm, SearchResult<A>)], algorithm: Algorithm) -> &SearchResult<A> {
    results
        .iter()
        .find_map(|(a, r)| (*a == algorithm).then_some(r))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Graph routing
// ---------------------------------------------------------------------------

#[test]
fn routing_has_two_optimal_routes_of_cost_seven() {
    let world = GraphRoutingProblem::from_json(ROUTING_GRAPH).unwrap();
    let results = solve_all(&world, &graph_routing_heuristic);

    let ucs = result_of(&results, Algorithm::UniformCost);
    let astar = result_of(&results, Algorithm::AStar);
    assert_eq!(ucs.path_cost, Some(7.0));
    assert_eq!(astar.path_cost, Some(7.0));
    assert!(astar.stats.goal_tests <= ucs.stats.goal_tests);

    let pit = world.node_index("Pit").unwrap();
    for (algorithm, result) in &results {
        let plan = result.solution.as_ref().unwrap();
        assert_eq!(plan.len(), 2, "{algorithm}");
        assert!(!plan.contains(&pit), "{algorithm} routed through the pit");
        assert_eq!(plan.last(), Some(&world.goal()));
    }
}

#[test]
fn routing_names_plans_by_destination() {
    let world = GraphRoutingProblem::from_json(ROUTING_GRAPH).unwrap();
    let result = run(
        &SearchPolicy::new(Algorithm::BreadthFirst),
        &world,
        world.initial_state(),
        &graph_routing_heuristic,
    )
    .unwrap();
    // Adjacency is name-sorted, so East is generated before North.
    let names: Vec<String> = result
        .solution
        .unwrap()
        .iter()
        .map(|a| world.describe_action(a))
        .collect();
    assert_eq!(names, vec!["East", "Goal"]);
}

#[test]
fn routing_rejects_unknown_goal() {
    let err = GraphRoutingProblem::from_json(r#"{ "graph": { "A": {} }, "start": "A", "goal": "Z" }"#)
        .unwrap_err();
    assert_eq!(err.world, "graph_routing");
    assert!(err.detail.contains("\"Z\""), "{err}");
}

// ---------------------------------------------------------------------------
// Dungeon
// ---------------------------------------------------------------------------

#[test]
fn dungeon_collects_every_coin_optimally() {
    let world = DungeonProblem::from_text(DUNGEON_LEVEL).unwrap();
    let strong = solve_all(&world, &strong_heuristic);
    let ucs = result_of(&strong, Algorithm::UniformCost);
    let astar = result_of(&strong, Algorithm::AStar);
    let bfs = result_of(&strong, Algorithm::BreadthFirst);

    assert_eq!(astar.path_cost, ucs.path_cost);
    let bfs_len = bfs.solution.as_ref().map(|p| f64::from(u32::try_from(p.len()).unwrap()));
    assert_eq!(bfs_len, ucs.path_cost);
    assert!(astar.stats.goal_tests <= ucs.stats.goal_tests);

    let weaker = run(
        &SearchPolicy::new(Algorithm::AStar),
        &world,
        world.initial_state(),
        &manhattan_heuristic,
    )
    .unwrap();
    assert_eq!(weaker.path_cost, ucs.path_cost);
}

#[test]
fn dungeon_render_shows_collected_coins() {
    let world = DungeonProblem::from_text(DUNGEON_LEVEL).unwrap();
    let initial = world.initial_state();
    assert_eq!(world.render(&initial).matches('$').count(), 3);

    let mut collected = initial;
    collected.remaining_coins.clear();
    let rendered = world.render(&collected);
    assert_eq!(rendered.matches('$').count(), 0);
    assert_eq!(rendered.matches('@').count(), 1);
}

#[test]
fn dungeon_rejects_missing_exit() {
    let err = DungeonProblem::from_text("####\n#@.#\n####").unwrap_err();
    assert_eq!(err.world, "dungeon");
    assert!(err.detail.contains("exit"), "{err}");
}

// ---------------------------------------------------------------------------
// Parking
// ---------------------------------------------------------------------------

#[test]
fn parking_swaps_cars_without_penalty() {
    let world = ParkingProblem::from_text(PARKING_LOT).unwrap();
    let results = solve_all(&world, &parking_heuristic);
    let ucs = result_of(&results, Algorithm::UniformCost);
    let astar = result_of(&results, Algorithm::AStar);

    assert_eq!(ucs.path_cost, Some(8.0));
    assert_eq!(astar.path_cost, Some(8.0));
    assert!(ucs.path_cost.unwrap() < FOREIGN_SLOT_PENALTY);
    assert!(astar.stats.goal_tests <= ucs.stats.goal_tests);
}

#[test]
fn parking_rejects_duplicate_cars() {
    let err = ParkingProblem::from_text("#AA01#").unwrap_err();
    assert_eq!(err.world, "parking");
    assert!(err.detail.contains("twice"), "{err}");
}
