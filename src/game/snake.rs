//! Snake entity: an ordered run of cells, head first

use std::collections::VecDeque;

use super::direction::Direction;
use super::location::Location;

/// The player's snake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Head cell
    head: Location,
    /// Body segments, newest (next to the head) at the front
    body: VecDeque<Location>,
    /// Cell given up by the last advance, reclaimed on growth
    vacated: Option<Location>,
}

impl Snake {
    /// A single-cell snake
    pub fn new(head: Location) -> Self {
        Self {
            head,
            body: VecDeque::new(),
            vacated: None,
        }
    }

    /// Build a snake from its cells, head first. Returns None for an empty list.
    pub fn from_cells(cells: impl IntoIterator<Item = Location>) -> Option<Self> {
        let mut cells = cells.into_iter();
        let head = cells.next()?;
        Some(Self {
            head,
            body: cells.collect(),
            vacated: None,
        })
    }

    pub fn head(&self) -> Location {
        self.head
    }

    pub fn body(&self) -> &VecDeque<Location> {
        &self.body
    }

    /// Number of cells including the head
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// All cells, head first
    pub fn cells(&self) -> impl Iterator<Item = Location> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Whether any cell of the snake sits on `loc`
    pub fn occupies(&self, loc: &Location) -> bool {
        self.head == *loc || self.body.contains(loc)
    }

    /// Move one step: every segment takes the cell of the one ahead of it,
    /// then the head moves by `direction`.
    pub fn advance(&mut self, direction: Direction, block: i32) {
        if self.body.is_empty() {
            self.vacated = Some(self.head);
        } else {
            self.body.push_front(self.head);
            self.vacated = self.body.pop_back();
        }
        self.head = self.head.adjacent(direction, block);
    }

    /// Lengthen by one cell by keeping the tail cell vacated by the last advance
    pub fn grow(&mut self) {
        if let Some(cell) = self.vacated.take() {
            self.body.push_back(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(x: i32, y: i32) -> Location {
        Location::new(x, y)
    }

    #[test]
    fn test_new_snake() {
        let snake = Snake::new(loc(125, 125));
        assert_eq!(snake.len(), 1);
        assert!(snake.body().is_empty());
        assert_eq!(snake.head(), loc(125, 125));
    }

    #[test]
    fn test_advance_head_only() {
        let mut snake = Snake::new(loc(125, 125));
        snake.advance(Direction::Right, 25);
        assert_eq!(snake.head(), loc(150, 125));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_advance_shifts_body_in_order() {
        let mut snake = Snake::from_cells([loc(100, 100), loc(75, 100), loc(50, 100)]).unwrap();
        snake.advance(Direction::Down, 25);

        let cells: Vec<_> = snake.cells().collect();
        assert_eq!(cells, vec![loc(100, 125), loc(100, 100), loc(75, 100)]);
    }

    #[test]
    fn test_grow_keeps_old_tail() {
        let mut snake = Snake::from_cells([loc(100, 100), loc(75, 100)]).unwrap();
        snake.advance(Direction::Right, 25);
        snake.grow();

        let cells: Vec<_> = snake.cells().collect();
        assert_eq!(cells, vec![loc(125, 100), loc(100, 100), loc(75, 100)]);
    }

    #[test]
    fn test_grow_from_single_cell() {
        let mut snake = Snake::new(loc(125, 125));
        snake.advance(Direction::Up, 25);
        snake.grow();

        let cells: Vec<_> = snake.cells().collect();
        assert_eq!(cells, vec![loc(125, 100), loc(125, 125)]);
    }

    #[test]
    fn test_grow_only_once_per_advance() {
        let mut snake = Snake::new(loc(0, 0));
        snake.advance(Direction::Right, 25);
        snake.grow();
        snake.grow();
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_occupies() {
        let snake = Snake::from_cells([loc(0, 0), loc(25, 0)]).unwrap();
        assert!(snake.occupies(&loc(0, 0)));
        assert!(snake.occupies(&loc(25, 0)));
        assert!(!snake.occupies(&loc(50, 0)));
    }

    #[test]
    fn test_from_cells_empty() {
        assert!(Snake::from_cells(Vec::new()).is_none());
    }
}
