use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(pub i32);

/// Position of a tile on a square grid.
///
/// `x` grows to the right, `y` grows down.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Coords {
    /// column
    pub x: i32,

    /// row
    pub y: i32,
}

impl Coords {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Straight-line distance. Used as an admissible heuristic by the path search.
pub fn distance(a: Coords, b: Coords) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dy = (a.y - b.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

pub fn manhattan_distance(a: Coords, b: Coords) -> Distance {
    Distance((a.x - b.x).abs() + (a.y - b.y).abs())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

const DIR_TO_POS_DIFF: [[i32; 2]; 4] = [[-1, 0], [1, 0], [0, -1], [0, 1]];

impl Dir {
    pub fn from_int(n: i32) -> Self {
        assert!((0..4).contains(&n));
        let dirs = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];
        dirs[n as usize]
    }

    pub fn to_int(self) -> i32 {
        match self {
            Dir::Left => 0,
            Dir::Right => 1,
            Dir::Up => 2,
            Dir::Down => 3,
        }
    }

    pub fn get_dir_from_to(from: Coords, to: Coords) -> Dir {
        assert_eq!(manhattan_distance(from, to), Distance(1));
        let diff = [to.x - from.x, to.y - from.y];
        for dir in dirs() {
            if diff == DIR_TO_POS_DIFF[dir.to_int() as usize] {
                return dir;
            }
        }
        panic!("impossible positions: {}, {}", from, to);
    }

    pub fn get_neighbor_pos(pos: Coords, dir: Dir) -> Coords {
        let diff = DIR_TO_POS_DIFF[dir.to_int() as usize];
        Coords {
            x: pos.x + diff[0],
            y: pos.y + diff[1],
        }
    }
}

#[derive(Clone, Debug)]
pub struct DirIter {
    index: i32,
}

/// Left, right, up, down. The order is used for tie-breaking by the searches.
pub fn dirs() -> DirIter {
    DirIter { index: 0 }
}

impl Iterator for DirIter {
    type Item = Dir;

    fn next(&mut self) -> Option<Dir> {
        let max = DIR_TO_POS_DIFF.len() as i32;
        let next_dir = if self.index >= max {
            None
        } else {
            Some(Dir::from_int(self.index))
        };
        self.index += 1;
        next_dir
    }
}

#[derive(Clone, Debug)]
pub struct SquareIter {
    cursor: Coords,
    size: Distance,
}

impl Iterator for SquareIter {
    type Item = Coords;

    fn next(&mut self) -> Option<Coords> {
        if self.cursor.x >= self.size.0 {
            return None;
        }
        let current = self.cursor;
        self.cursor.y += 1;
        if self.cursor.y >= self.size.0 {
            self.cursor.y = 0;
            self.cursor.x += 1;
        }
        Some(current)
    }
}

/// Fixed-size square matrix of cells.
///
/// ```text
/// (0, 0) (1, 0) (2, 0)
/// (0, 1) (1, 1) (2, 1)
/// (0, 2) (1, 2) (2, 2)
/// ```
#[derive(Debug, Clone)]
pub struct SquareMap<T: Clone + Debug> {
    tiles: Vec<T>,
    size: Distance,
}

impl<T: Clone + Debug> SquareMap<T> {
    pub fn new(size: Distance, tile: T) -> Self {
        assert!(size.0 > 0);
        let tiles_count = (size.0 * size.0) as usize;
        let tiles = vec![tile; tiles_count];
        Self { tiles, size }
    }

    pub fn size(&self) -> Distance {
        self.size
    }

    pub fn iter(&self) -> SquareIter {
        SquareIter {
            cursor: Coords::new(0, 0),
            size: self.size,
        }
    }

    pub fn is_inboard(&self, pos: Coords) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.size.0 && pos.y < self.size.0
    }

    /// Up to four in-bounds orthogonal neighbours: left, right, up, down.
    pub fn neighbors(&self, pos: Coords) -> Vec<Coords> {
        dirs()
            .map(|dir| Dir::get_neighbor_pos(pos, dir))
            .filter(|&neighbor| self.is_inboard(neighbor))
            .collect()
    }

    fn index(&self, pos: Coords) -> usize {
        (pos.x * self.size.0 + pos.y) as usize
    }

    pub fn tile(&self, pos: Coords) -> &T {
        assert!(self.is_inboard(pos), "{} is outside of the map", pos);
        &self.tiles[self.index(pos)]
    }

    pub fn tile_mut(&mut self, pos: Coords) -> &mut T {
        assert!(self.is_inboard(pos), "{} is outside of the map", pos);
        let index = self.index(pos);
        &mut self.tiles[index]
    }

    pub fn set_tile(&mut self, pos: Coords, tile: T) {
        *self.tile_mut(pos) = tile;
    }
}

/// Tile under a point given in the map's local space, where the top-left
/// corner of the `(0, 0)` tile is the origin.
pub fn point_to_coords(tile_size: f32, point: [f32; 2]) -> Coords {
    assert!(tile_size > 0.0);
    Coords {
        x: (point[0] / tile_size).floor() as i32,
        y: (point[1] / tile_size).floor() as i32,
    }
}

/// The center of a tile in the map's local space.
pub fn coords_to_point(tile_size: f32, pos: Coords) -> [f32; 2] {
    [
        (pos.x as f32 + 0.5) * tile_size,
        (pos.y as f32 + 0.5) * tile_size,
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{dirs, distance, point_to_coords, Coords, Dir, Distance, SquareMap};

    #[test]
    fn neighbors_order_is_left_right_up_down() {
        let map = SquareMap::new(Distance(3), 0);
        let expected = vec![
            Coords::new(0, 1),
            Coords::new(2, 1),
            Coords::new(1, 0),
            Coords::new(1, 2),
        ];
        assert_eq!(map.neighbors(Coords::new(1, 1)), expected);
    }

    #[test]
    fn neighbors_never_leave_the_map() {
        let map = SquareMap::new(Distance(10), 0);
        assert_eq!(
            map.neighbors(Coords::new(0, 0)),
            vec![Coords::new(1, 0), Coords::new(0, 1)]
        );
        assert_eq!(
            map.neighbors(Coords::new(9, 9)),
            vec![Coords::new(8, 9), Coords::new(9, 8)]
        );
        for pos in map.iter() {
            for neighbor in map.neighbors(pos) {
                assert!(map.is_inboard(neighbor));
            }
        }
    }

    #[test]
    fn iter_visits_every_tile_once() {
        let map = SquareMap::new(Distance(4), 0);
        let all: Vec<_> = map.iter().collect();
        assert_eq!(all.len(), 16);
        assert_eq!(all[0], Coords::new(0, 0));
        assert_eq!(all[15], Coords::new(3, 3));
    }

    #[test]
    fn dir_round_trip() {
        let origin = Coords::new(5, 5);
        for dir in dirs() {
            let neighbor = Dir::get_neighbor_pos(origin, dir);
            assert_eq!(Dir::get_dir_from_to(origin, neighbor), dir);
        }
    }

    #[test]
    fn euclidean_distance() {
        assert_eq!(distance(Coords::new(0, 0), Coords::new(3, 4)), 5.0);
    }

    #[test]
    fn point_lookup() {
        assert_eq!(point_to_coords(75.0, [10.0, 80.0]), Coords::new(0, 1));
        assert_eq!(point_to_coords(75.0, [-1.0, 0.0]), Coords::new(-1, 0));
    }
}
