use std::collections::{HashSet, VecDeque};

use super::types::Point;

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    pub fn spawn(at: Point) -> Self {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();
        body.push_back(at);
        body_set.insert(at);
        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("snake body is never empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.body_set.contains(&point)
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    // Tail is removed before the head lands: on a tail-follow move the head
    // occupies the cell the tail just vacated, and the occupancy index must
    // not lose it.
    pub fn advance(&mut self, new_head: Point) {
        let tail = self.body.pop_back().expect("snake body is never empty");
        self.body_set.remove(&tail);
        self.body.push_front(new_head);
        self.body_set.insert(new_head);
    }

    pub fn grow(&mut self, new_head: Point) {
        self.body.push_front(new_head);
        self.body_set.insert(new_head);
    }

    #[cfg(test)]
    pub(crate) fn from_cells(head_first: &[Point]) -> Self {
        let body: VecDeque<Point> = head_first.iter().copied().collect();
        let body_set: HashSet<Point> = head_first.iter().copied().collect();
        Self { body, body_set }
    }
}
