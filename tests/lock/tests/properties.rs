//! Search property lock tests.
//!
//! Proves, for every algorithm:
//! 1. A goal initial state yields the empty plan after exactly one goal test
//! 2. No state is goal-tested twice in one search
//! 3. A returned plan replays to a goal, and `path_cost` is its summed cost
//! 4. `solution.is_some()` iff the goal is reachable
//!
//! and, per algorithm:
//! 5. Breadth-first plans use the fewest actions
//! 6. Uniform-cost and A* plans are cheapest
//! 7. A* with Manhattan distance goal-tests no more states than breadth-first,
//!    on open grids and on a walled maze

use std::collections::HashSet;

use proptest::prelude::*;

use lock_tests::fixtures::{replay, walled_grid, WeightedGraph};
use waypoint_harness::recorder::GoalRecorder;
use waypoint_harness::worlds::dungeon::{manhattan_heuristic, DungeonProblem};
use waypoint_kernel::Problem;
use waypoint_search::{run, Algorithm, SearchPolicy, SearchResult, ZeroHeuristic};

fn run_all(graph: &WeightedGraph) -> Vec<(Algorithm, SearchResult<usize>)> {
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let result = run(
                &SearchPolicy::new(algorithm),
                graph,
                graph.initial_state(),
                &ZeroHeuristic,
            )
            .unwrap();
            (algorithm, result)
        })
        .collect()
}

/// Two walls with a single gap each; the only route zig-zags for 17 moves.
fn serpentine() -> DungeonProblem {
    let walls = [
        (3, 1),
        (3, 2),
        (3, 3),
        (3, 4),
        (5, 2),
        (5, 3),
        (5, 4),
        (5, 5),
    ];
    DungeonProblem::from_text(&walled_grid(6, 5, &walls)).unwrap()
}

// ---------------------------------------------------------------------------
// 1. Goal initial state
// ---------------------------------------------------------------------------

#[test]
fn goal_initial_state_gives_empty_plan() {
    let graph = WeightedGraph::new(2, &[(0, 1, 1.0)], 0, 0);
    for (algorithm, result) in run_all(&graph) {
        assert_eq!(result.solution, Some(vec![]), "{algorithm}");
        assert_eq!(result.path_cost, Some(0.0), "{algorithm}");
        assert_eq!(result.stats.goal_tests, 1, "{algorithm}");
        assert_eq!(result.stats.expansions, 0, "{algorithm}");
    }
}

// ---------------------------------------------------------------------------
// 2. No re-examination
// ---------------------------------------------------------------------------

#[test]
fn no_state_is_goal_tested_twice_on_a_grid() {
    let world = serpentine();
    for algorithm in Algorithm::ALL {
        let recorder = GoalRecorder::new(&world);
        let result = run(
            &SearchPolicy::new(algorithm),
            &recorder,
            recorder.initial_state(),
            &recorder.lift(&manhattan_heuristic),
        )
        .unwrap();
        let tested = recorder.into_tested();
        let distinct: HashSet<_> = tested.iter().collect();
        assert_eq!(distinct.len(), tested.len(), "{algorithm} re-tested a state");
        assert_eq!(tested.len() as u64, result.stats.goal_tests, "{algorithm}");
    }
}

// ---------------------------------------------------------------------------
// 3-7. Fixed scenarios
// ---------------------------------------------------------------------------

#[test]
fn shortcut_is_found_by_cost_ranked_searches() {
    let graph = WeightedGraph::shortcut();
    for (algorithm, result) in run_all(&graph) {
        match algorithm {
            // A -> C -> B: edge 1 out of A, edge 0 out of C.
            Algorithm::UniformCost | Algorithm::AStar => {
                assert_eq!(result.solution, Some(vec![1, 0]), "{algorithm}");
                assert_eq!(result.path_cost, Some(2.0), "{algorithm}");
            }
            Algorithm::BreadthFirst => {
                assert_eq!(result.solution, Some(vec![0]));
                assert_eq!(result.path_cost, Some(5.0));
            }
            Algorithm::DepthFirst | Algorithm::GreedyBestFirst => {
                assert!(result.is_solved(), "{algorithm}");
            }
        }
    }
}

#[test]
fn unreachable_goal_exhausts_every_algorithm() {
    let graph = WeightedGraph::new(3, &[(0, 1, 1.0), (1, 0, 1.0)], 0, 2);
    for (algorithm, result) in run_all(&graph) {
        assert_eq!(result.solution, None, "{algorithm}");
        assert_eq!(result.path_cost, None, "{algorithm}");
        assert_eq!(result.stats.expansions, 2, "{algorithm}");
    }
}

#[test]
fn open_grid_plans_are_shortest_and_astar_examines_less() {
    for (width, height) in [(5, 5), (8, 3), (2, 6)] {
        let world = DungeonProblem::from_text(&walled_grid(width, height, &[])).unwrap();
        let moves = width - 1 + height - 1;
        let solve = |algorithm| {
            run(
                &SearchPolicy::new(algorithm),
                &world,
                world.initial_state(),
                &manhattan_heuristic,
            )
            .unwrap()
        };
        let bfs = solve(Algorithm::BreadthFirst);
        let astar = solve(Algorithm::AStar);

        assert_eq!(bfs.solution.as_ref().map(Vec::len), Some(moves), "{width}x{height}");
        assert_eq!(astar.solution.as_ref().map(Vec::len), Some(moves), "{width}x{height}");
        assert_eq!(astar.path_cost, Some(f64::from(u32::try_from(moves).unwrap())));
        // The exit is the farthest cell, so breadth-first tests every cell.
        assert_eq!(bfs.stats.goal_tests, u64::try_from(width * height).unwrap());
        assert!(
            astar.stats.goal_tests <= bfs.stats.goal_tests,
            "{width}x{height}: A* tested {} states, BFS {}",
            astar.stats.goal_tests,
            bfs.stats.goal_tests
        );
    }
}

#[test]
fn grid_plans_are_shortest_and_astar_examines_less() {
    let world = serpentine();
    let bfs = run(
        &SearchPolicy::new(Algorithm::BreadthFirst),
        &world,
        world.initial_state(),
        &manhattan_heuristic,
    )
    .unwrap();
    let astar = run(
        &SearchPolicy::new(Algorithm::AStar),
        &world,
        world.initial_state(),
        &manhattan_heuristic,
    )
    .unwrap();

    assert_eq!(bfs.solution.as_ref().map(Vec::len), Some(17));
    assert_eq!(astar.solution.as_ref().map(Vec::len), Some(17));
    assert_eq!(astar.path_cost, Some(17.0));
    assert!(
        astar.stats.goal_tests <= bfs.stats.goal_tests,
        "A* tested {} states, BFS {}",
        astar.stats.goal_tests,
        bfs.stats.goal_tests
    );

    for (name, result) in [("bfs", &bfs), ("astar", &astar)] {
        let (end, cost) = replay(&world, world.initial_state(), result.solution.as_ref().unwrap()).unwrap();
        assert!(world.is_goal(&end), "{name} plan does not end on the exit");
        assert_eq!(Some(cost), result.path_cost, "{name}");
    }
}

// ---------------------------------------------------------------------------
// Random graphs against reference shortest paths
// ---------------------------------------------------------------------------

fn arb_graph() -> impl Strategy<Value = WeightedGraph> {
    (2usize..8).prop_flat_map(|nodes| {
        prop::collection::vec((0..nodes, 0..nodes, 1u8..10), 0..24).prop_map(move |edges| {
            let edges: Vec<(usize, usize, f64)> = edges
                .into_iter()
                .map(|(from, to, cost)| (from, to, f64::from(cost)))
                .collect();
            WeightedGraph::new(nodes, &edges, 0, nodes - 1)
        })
    })
}

proptest! {
    #[test]
    fn random_graphs_agree_with_reference(graph in arb_graph()) {
        let goal = graph.node_count() - 1;
        let cheapest = graph.cheapest_costs()[goal];
        let fewest = graph.fewest_hops()[goal];

        for (algorithm, result) in run_all(&graph) {
            prop_assert_eq!(result.is_solved(), cheapest.is_some(), "{}", algorithm);
            let Some(plan) = result.solution.as_ref() else { continue };

            let (end, cost) = replay(&graph, graph.initial_state(), plan).unwrap();
            prop_assert!(graph.is_goal(&end), "{} plan misses the goal", algorithm);
            prop_assert_eq!(Some(cost), result.path_cost, "{}", algorithm);

            match algorithm {
                Algorithm::BreadthFirst => prop_assert_eq!(Some(plan.len()), fewest),
                Algorithm::UniformCost | Algorithm::AStar => {
                    prop_assert_eq!(result.path_cost, cheapest, "{}", algorithm);
                }
                Algorithm::DepthFirst | Algorithm::GreedyBestFirst => {}
            }
        }
    }

    #[test]
    fn random_graphs_never_retest_a_state(graph in arb_graph()) {
        for algorithm in Algorithm::ALL {
            let recorder = GoalRecorder::new(&graph);
            run(
                &SearchPolicy::new(algorithm),
                &recorder,
                recorder.initial_state(),
                &ZeroHeuristic,
            )
            .unwrap();
            let tested = recorder.into_tested();
            let distinct: HashSet<_> = tested.iter().collect();
            prop_assert_eq!(distinct.len(), tested.len(), "{}", algorithm);
        }
    }
}
