use crate::models::Position;

/// Flat per-tile scratch storage for traversals, indexed `y * width + x`.
#[derive(Debug, Clone)]
pub(crate) struct TileGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> TileGrid<T> {
    pub(crate) fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub(crate) fn get(&self, pos: Position) -> Option<&T> {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    pub(crate) fn set(&mut self, pos: Position, value: T) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = value;
        }
    }
}

impl TileGrid<bool> {
    /// Mark a tile; returns `true` only the first time an in-bounds tile is
    /// marked.
    pub(crate) fn insert(&mut self, pos: Position) -> bool {
        match self.index(pos) {
            Some(idx) if !self.cells[idx] => {
                self.cells[idx] = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_marks_once() {
        let mut seen = TileGrid::new(3, 2, false);
        assert!(seen.insert(Position::new(2, 1)));
        assert!(!seen.insert(Position::new(2, 1)));
        assert!(!seen.insert(Position::new(3, 0)));
        assert!(!seen.insert(Position::new(0, -1)));
        assert_eq!(seen.get(Position::new(2, 1)), Some(&true));
        assert_eq!(seen.get(Position::new(0, 0)), Some(&false));
    }
}
