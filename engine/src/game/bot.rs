use std::collections::HashSet;

use super::engine::Snapshot;
use super::session_rng::SessionRng;
use super::types::{Direction, Point, RunState};

pub struct BotController;

impl BotController {
    // Greedy chooser for host-driven play: take the safe step closest to the
    // food, or any safe step when no food is on the grid. Returns None when
    // boxed in (the engine then keeps the current course into the collision).
    pub fn choose_direction(snapshot: &Snapshot, rng: &mut SessionRng) -> Option<Direction> {
        if snapshot.run_state != RunState::Running {
            return None;
        }

        let head = *snapshot.snake.first()?;
        let tail = *snapshot.snake.last()?;
        let occupied: HashSet<Point> = snapshot.snake.iter().copied().collect();

        let safe_steps: Vec<(Direction, Point)> = Direction::ALL
            .into_iter()
            .filter(|direction| !direction.is_opposite(&snapshot.direction))
            .filter_map(|direction| {
                let next = head.stepped(direction, snapshot.grid)?;
                // The tail cell vacates on the same tick, unless this step
                // would eat the food, which never sits on the snake.
                if occupied.contains(&next) && next != tail {
                    return None;
                }
                Some((direction, next))
            })
            .collect();

        if safe_steps.is_empty() {
            return None;
        }

        if let Some(food) = snapshot.food {
            return safe_steps
                .iter()
                .min_by_key(|(_, next)| manhattan_distance(*next, food))
                .map(|(direction, _)| *direction);
        }

        let index = rng.pick_index(safe_steps.len()).expect("safe steps are non-empty");
        Some(safe_steps[index].0)
    }
}

fn manhattan_distance(a: Point, b: Point) -> usize {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
