//! Grid search used by chasing enemies.
//! This module exists so navigation rules stay independent of the AI that consumes them.
//! It does not own movement, collision or path following.

use std::collections::{BTreeMap, BTreeSet};

use crate::doors::DoorStates;
use crate::mapgen::{TileGrid, manhattan};
use crate::movement::is_passable;
use crate::types::Pos;

pub const DEFAULT_MAX_ITERATIONS: usize = 1_000;
/// Step costs scaled by 100 so the search stays in integers.
const CARDINAL_COST: u32 = 100;
const DIAGONAL_COST: u32 = 141;

const STEPS: [(i32, i32, u32); 8] = [
    (0, -1, CARDINAL_COST),
    (0, 1, CARDINAL_COST),
    (-1, 0, CARDINAL_COST),
    (1, 0, CARDINAL_COST),
    (-1, -1, DIAGONAL_COST),
    (1, -1, DIAGONAL_COST),
    (-1, 1, DIAGONAL_COST),
    (1, 1, DIAGONAL_COST),
];

/// Anything that can route an enemy across the level. An empty result means "no path".
pub trait Pathfinder {
    fn find_path(&self, start: Pos, goal: Pos, tiles: &TileGrid, doors: &DoorStates) -> Vec<Pos>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AStar {
    pub max_iterations: usize,
}

impl Default for AStar {
    fn default() -> Self {
        Self { max_iterations: DEFAULT_MAX_ITERATIONS }
    }
}

impl Pathfinder for AStar {
    fn find_path(&self, start: Pos, goal: Pos, tiles: &TileGrid, doors: &DoorStates) -> Vec<Pos> {
        astar_path(tiles, doors, start, goal, self.max_iterations)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// 8-directional A* without corner cutting. Tiles returned exclude `start`.
pub fn astar_path(
    tiles: &TileGrid,
    doors: &DoorStates,
    start: Pos,
    goal: Pos,
    max_iterations: usize,
) -> Vec<Pos> {
    let goal = if is_passable(tiles, doors, goal) {
        goal
    } else {
        match goal.orthogonal_neighbors().into_iter().find(|pos| is_passable(tiles, doors, *pos)) {
            Some(near) => near,
            None => return Vec::new(),
        }
    };
    if start == goal {
        return Vec::new();
    }

    let heuristic = |pos: Pos| manhattan(pos, goal) * CARDINAL_COST;
    let mut open_set = BTreeSet::new();
    let mut closed = BTreeSet::new();
    let mut g_score = BTreeMap::from([(start, 0_u32)]);
    let mut came_from = BTreeMap::new();
    let h = heuristic(start);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });

    let mut iterations = 0;
    while iterations < max_iterations {
        let Some(current) = open_set.pop_first() else {
            break;
        };
        let pos = Pos { y: current.y, x: current.x };
        if !closed.insert(pos) {
            continue;
        }
        iterations += 1;
        if pos == goal {
            return reconstruct_path(&came_from, start, goal);
        }

        let current_g = g_score.get(&pos).copied().unwrap_or(u32::MAX);
        for (dx, dy, cost) in STEPS {
            let next = pos.offset(dx, dy);
            if closed.contains(&next) || !is_passable(tiles, doors, next) {
                continue;
            }
            let cuts_corner = !is_passable(tiles, doors, pos.offset(dx, 0))
                || !is_passable(tiles, doors, pos.offset(0, dy));
            if dx != 0 && dy != 0 && cuts_corner {
                continue;
            }
            let tentative = current_g.saturating_add(cost);
            if tentative < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, pos);
                g_score.insert(next, tentative);
                let h = heuristic(next);
                open_set.insert(OpenNode { f: tentative + h, h, y: next.y, x: next.x });
            }
        }
    }
    Vec::new()
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut path = vec![goal];
    let mut pos = goal;
    while let Some(previous) = came_from.get(&pos).copied() {
        if previous == start {
            break;
        }
        path.push(previous);
        pos = previous;
    }
    path.reverse();
    path
}
