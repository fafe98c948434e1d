//! Flat row-major grids for tiles and room ownership.

use crate::types::{Pos, RoomCell, RoomId, TileKind};

pub(crate) fn in_bounds(width: usize, height: usize, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

pub(crate) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

fn row_major(width: usize, height: usize) -> impl Iterator<Item = Pos> {
    (0..height).flat_map(move |y| (0..width).map(move |x| Pos { y: y as i32, x: x as i32 }))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize, fill: TileKind) -> Self {
        Self { width, height, tiles: vec![fill; width * height] }
    }

    /// Builds a grid from ASCII rows: `.` floor, `#` wall, `+` door, `c` corner, anything else
    /// empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut grid = Self::new(width, height, TileKind::Empty);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let tile = match ch {
                    '.' => TileKind::Floor,
                    '#' => TileKind::Wall,
                    '+' => TileKind::Door,
                    'c' => TileKind::Corner,
                    _ => TileKind::Empty,
                };
                grid.set_tile(Pos { y: y as i32, x: x as i32 }, tile);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        in_bounds(self.width, self.height, pos)
    }

    /// Out-of-bounds reads are `Empty`.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Empty;
        }
        self.tiles[self.index(pos)]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if self.in_bounds(pos) {
            let index = self.index(pos);
            self.tiles[index] = tile;
        }
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        row_major(self.width, self.height)
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomMap {
    width: usize,
    height: usize,
    cells: Vec<RoomCell>,
}

impl RoomMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![RoomCell::Void; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Out-of-bounds reads are `Void`.
    pub fn cell_at(&self, pos: Pos) -> RoomCell {
        if !in_bounds(self.width, self.height, pos) {
            return RoomCell::Void;
        }
        self.cells[(pos.y as usize) * self.width + (pos.x as usize)]
    }

    pub fn room_at(&self, pos: Pos) -> Option<RoomId> {
        self.cell_at(pos).room()
    }

    pub fn set_cell(&mut self, pos: Pos, cell: RoomCell) {
        if in_bounds(self.width, self.height, pos) {
            self.cells[(pos.y as usize) * self.width + (pos.x as usize)] = cell;
        }
    }

    pub fn cells(&self) -> &[RoomCell] {
        &self.cells
    }

    pub fn raw_rows(&self) -> Vec<Vec<i32>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|cell| cell.raw()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_empty_and_void() {
        let grid = TileGrid::new(3, 2, TileKind::Floor);
        let rooms = RoomMap::new(3, 2);
        for pos in [Pos { y: -1, x: 0 }, Pos { y: 0, x: 3 }, Pos { y: 2, x: 1 }] {
            assert_eq!(grid.tile_at(pos), TileKind::Empty);
            assert_eq!(rooms.cell_at(pos), RoomCell::Void);
        }
    }

    #[test]
    fn from_rows_parses_symbols() {
        let grid = TileGrid::from_rows(&["#+#", ".c "]);
        assert_eq!(grid.tile_at(Pos { y: 0, x: 1 }), TileKind::Door);
        assert_eq!(grid.tile_at(Pos { y: 1, x: 0 }), TileKind::Floor);
        assert_eq!(grid.tile_at(Pos { y: 1, x: 1 }), TileKind::Corner);
        assert_eq!(grid.tile_at(Pos { y: 1, x: 2 }), TileKind::Empty);
    }

    #[test]
    fn positions_are_row_major() {
        let grid = TileGrid::new(2, 2, TileKind::Wall);
        let order: Vec<Pos> = grid.positions().collect();
        assert_eq!(
            order,
            vec![Pos { y: 0, x: 0 }, Pos { y: 0, x: 1 }, Pos { y: 1, x: 0 }, Pos { y: 1, x: 1 }]
        );
    }

    #[test]
    fn raw_rows_use_integer_contract() {
        let mut rooms = RoomMap::new(2, 1);
        rooms.set_cell(Pos { y: 0, x: 0 }, RoomCell::Room(4));
        rooms.set_cell(Pos { y: 0, x: 1 }, RoomCell::Door);
        assert_eq!(rooms.raw_rows(), vec![vec![4, -2]]);
    }
}
