use std::{
    cmp::Ordering,
    collections::{BTreeMap, BinaryHeap, HashMap, HashSet, VecDeque},
    slice::Windows,
};

use crate::core::{
    battle::{state::State, MovePoints, UnitId},
    map::{self, dirs, Coords, Dir, SquareMap},
};

#[derive(Clone, Copy, Debug)]
pub struct Tile {
    cost: MovePoints,
    parent_dir: Option<Dir>,
}

impl Tile {
    pub fn parent(self) -> Option<Dir> {
        self.parent_dir
    }

    pub fn cost(self) -> MovePoints {
        self.cost
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            cost: MovePoints(0),
            parent_dir: None,
        }
    }
}

pub const MAX_COST: MovePoints = MovePoints(i32::max_value());

/// Cost of entering `pos` for the given unit. `IMPASSABLE` if it can't enter it at all.
pub fn tile_cost(state: &State, id: UnitId, pos: Coords) -> MovePoints {
    let class = state.unit(id).move_class();
    state.map().tile(pos).terrain().move_cost(class)
}

pub fn is_passable(state: &State, id: UnitId, pos: Coords) -> bool {
    let class = state.unit(id).move_class();
    state.map().tile(pos).terrain().is_passable(class)
}

/// A chain of adjacent tiles. The first one is the tile the walk starts from.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    tiles: Vec<Coords>,
}

impl Path {
    pub fn new(tiles: Vec<Coords>) -> Self {
        assert!(!tiles.is_empty());
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Coords] {
        &self.tiles
    }

    /// Every tile entered on the way, the origin excluded.
    pub fn traversed(&self) -> &[Coords] {
        &self.tiles[1..]
    }

    pub fn from(&self) -> Coords {
        self.tiles[0]
    }

    pub fn to(&self) -> Coords {
        self.tiles[self.tiles.len() - 1]
    }

    /// Number of tiles entered.
    pub fn len(&self) -> usize {
        self.tiles.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cost_for(&self, state: &State, id: UnitId) -> MovePoints {
        let mut cost = MovePoints(0);
        for step in self.steps() {
            cost.0 += tile_cost(state, id, step.to).0;
        }
        cost
    }

    pub fn steps(&self) -> Steps {
        Steps {
            windows: self.tiles.windows(2),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub from: Coords,
    pub to: Coords,
}

#[derive(Clone, Debug)]
pub struct Steps<'a> {
    windows: Windows<'a, Coords>,
}

impl<'a> Iterator for Steps<'a> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some([from, to]) = self.windows.next() {
            Some(Step {
                from: *from,
                to: *to,
            })
        } else {
            None
        }
    }
}

/// Destinations ordered by coordinates, each with the path leading to it.
pub type Destinations = BTreeMap<Coords, Path>;

/// Range-bounded breadth-first expansion. A tile is queued again
/// each time a strictly cheaper way to it is found.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    queue: VecDeque<Coords>,
    map: SquareMap<Tile>,
}

impl Pathfinder {
    pub fn new(map_size: map::Distance) -> Self {
        Self {
            queue: VecDeque::new(),
            map: SquareMap::new(map_size, Tile::default()),
        }
    }

    pub fn map(&self) -> &SquareMap<Tile> {
        &self.map
    }

    /// Enemies always block. Allies block too unless the rules allow passing through them.
    fn can_enter(state: &State, id: UnitId, pos: Coords) -> bool {
        if !is_passable(state, id, pos) {
            return false;
        }
        match state.map().tile(pos).unit() {
            None => true,
            Some(other) => {
                state.rules().pass_through_allies
                    && state.unit(other).player_id() == state.unit(id).player_id()
            }
        }
    }

    fn process_neighbor_pos(
        &mut self,
        state: &State,
        id: UnitId,
        original_pos: Coords,
        neighbor_pos: Coords,
    ) {
        let old_cost = self.map.tile(original_pos).cost;
        let tile_cost = tile_cost(state, id, neighbor_pos);
        let new_cost = MovePoints(old_cost.0 + tile_cost.0);
        if new_cost > state.unit(id).move_range() {
            return;
        }
        let tile = self.map.tile(neighbor_pos);
        if tile.cost > new_cost {
            let parent_dir = Dir::get_dir_from_to(neighbor_pos, original_pos);
            let updated_tile = Tile {
                cost: new_cost,
                parent_dir: Some(parent_dir),
            };
            self.map.set_tile(neighbor_pos, updated_tile);
            self.queue.push_back(neighbor_pos);
        }
    }

    fn clean_map(&mut self) {
        for pos in self.map.iter() {
            let tile = Tile {
                cost: MAX_COST,
                parent_dir: None,
            };
            self.map.set_tile(pos, tile);
        }
    }

    fn try_to_push_neighbors(&mut self, state: &State, id: UnitId, pos: Coords) {
        assert!(self.map.is_inboard(pos));
        for dir in dirs() {
            let neighbor_pos = Dir::get_neighbor_pos(pos, dir);
            if self.map.is_inboard(neighbor_pos) && Self::can_enter(state, id, neighbor_pos) {
                self.process_neighbor_pos(state, id, pos, neighbor_pos);
            }
        }
    }

    fn push_start_pos_to_queue(&mut self, start_pos: Coords) {
        let start_tile = Tile::default();
        self.map.set_tile(start_pos, start_tile);
        self.queue.push_back(start_pos);
    }

    pub fn fill_map(&mut self, state: &State, id: UnitId) {
        let unit_pos = state.unit(id).pos();
        assert!(self.queue.is_empty());
        self.clean_map();
        self.push_start_pos_to_queue(unit_pos);
        while let Some(pos) = self.queue.pop_front() {
            self.try_to_push_neighbors(state, id, pos);
        }
    }

    pub fn path(&self, destination: Coords) -> Option<Path> {
        if self.map.tile(destination).cost == MAX_COST {
            return None;
        }
        let mut path = vec![destination];
        let mut pos = destination;
        while self.map.tile(pos).cost != MovePoints(0) {
            assert!(self.map.is_inboard(pos));
            let parent_dir = self.map.tile(pos).parent()?;
            pos = Dir::get_neighbor_pos(pos, parent_dir);
            path.push(pos);
        }
        path.reverse();
        Some(Path::new(path))
    }
}

/// Every empty tile the unit can reach this turn, its own tile excluded.
pub fn reachable_destinations(state: &State, id: UnitId) -> Destinations {
    let mut pathfinder = Pathfinder::new(state.map().size());
    pathfinder.fill_map(state, id);
    let origin = state.unit(id).pos();
    let mut destinations = BTreeMap::new();
    for pos in pathfinder.map().iter() {
        if pos == origin || state.map().tile(pos).unit().is_some() {
            continue;
        }
        if let Some(path) = pathfinder.path(pos) {
            destinations.insert(pos, path);
        }
    }
    destinations
}

#[derive(Debug, Clone)]
struct PathNode {
    pos: Coords,

    /// Cost so far plus the straight line distance to the goal.
    f_cost: f32,

    /// Breaks ties in insertion order.
    order: u64,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search over terrain costs, ignoring other units and the move range.
///
/// Returns `None` if the target can't be reached by the unit's move class.
pub fn shortest_path(state: &State, id: UnitId, target: Coords) -> Option<Path> {
    let start = state.unit(id).pos();
    if !state.map().is_inboard(target) {
        return None;
    }
    let mut open_set = BinaryHeap::new();
    let mut evaluated: HashSet<Coords> = HashSet::new();
    let mut came_from: HashMap<Coords, Coords> = HashMap::new();
    let mut g_scores: HashMap<Coords, f32> = HashMap::new();
    let mut order = 0;
    g_scores.insert(start, 0.0);
    open_set.push(PathNode {
        pos: start,
        f_cost: map::distance(start, target),
        order,
    });
    while let Some(current) = open_set.pop() {
        if current.pos == target {
            return Some(reconstruct_path(&came_from, current.pos));
        }
        if !evaluated.insert(current.pos) {
            continue;
        }
        let current_g = g_scores[&current.pos];
        for neighbor in state.map().neighbors(current.pos) {
            if evaluated.contains(&neighbor) || !is_passable(state, id, neighbor) {
                continue;
            }
            let cost = tile_cost(state, id, neighbor);
            let tentative_g = current_g + cost.0 as f32;
            let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&f32::INFINITY);
            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.pos);
                g_scores.insert(neighbor, tentative_g);
                order += 1;
                open_set.push(PathNode {
                    pos: neighbor,
                    f_cost: tentative_g + map::distance(neighbor, target),
                    order,
                });
            }
        }
    }
    None
}

fn reconstruct_path(came_from: &HashMap<Coords, Coords>, mut current: Coords) -> Path {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    Path::new(path)
}
