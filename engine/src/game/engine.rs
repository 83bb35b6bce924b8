use crate::log;

use super::session_rng::SessionRng;
use super::snake::Snake;
use super::types::{Direction, GameOverCause, GridSize, Point, RunState, TickEvent};

const SPAWN_POINT: Point = Point { x: 5, y: 5 };
const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: GridSize,
    pub snake: Vec<Point>,
    pub food: Option<Point>,
    pub score: u32,
    pub direction: Direction,
    pub run_state: RunState,
    pub game_over_cause: Option<GameOverCause>,
    pub event: TickEvent,
}

pub struct GameEngine {
    grid: GridSize,
    snake: Option<Snake>,
    food: Option<Point>,
    score: u32,
    direction: Direction,
    pending_direction: Option<Direction>,
    run_state: RunState,
    game_over_cause: Option<GameOverCause>,
    rng: SessionRng,
}

impl GameEngine {
    pub fn new(rng: SessionRng) -> Self {
        Self {
            grid: GridSize::new(0, 0),
            snake: None,
            food: None,
            score: 0,
            direction: INITIAL_DIRECTION,
            pending_direction: None,
            run_state: RunState::NotStarted,
            game_over_cause: None,
            rng,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    // Start or restart a game. A degenerate grid means the host surface is
    // not sized yet; the call is a no-op and the host retries later.
    pub fn start(&mut self, width: usize, height: usize) -> Snapshot {
        let grid = GridSize::new(width, height);
        if !grid.is_playable() {
            return self.snapshot();
        }

        let spawn = Point::new(
            SPAWN_POINT.x.min(grid.width - 1),
            SPAWN_POINT.y.min(grid.height - 1),
        );

        self.grid = grid;
        self.snake = Some(Snake::spawn(spawn));
        self.direction = INITIAL_DIRECTION;
        self.pending_direction = None;
        self.score = 0;
        self.game_over_cause = None;
        self.food = self.place_food();
        self.run_state = RunState::Running;
        log!("Game started on a {}x{} grid", width, height);
        self.snapshot()
    }

    // The latest intent between two ticks wins; reversing into the neck is
    // rejected against the direction of travel, not a pending intent.
    pub fn set_direction(&mut self, direction: Direction) -> Snapshot {
        if self.run_state == RunState::Running && !direction.is_opposite(&self.direction) {
            self.pending_direction = Some(direction);
        }
        self.snapshot()
    }

    pub fn pause(&mut self) -> Snapshot {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Paused;
        }
        self.snapshot()
    }

    pub fn resume(&mut self) -> Snapshot {
        if self.run_state == RunState::Paused {
            self.run_state = RunState::Running;
        }
        self.snapshot()
    }

    pub fn tick(&mut self) -> Snapshot {
        if self.run_state != RunState::Running {
            return self.snapshot();
        }

        if self.food.is_none() {
            self.food = self.place_food();
        }

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let snake = self.snake.as_ref().expect("running game has a snake");
        let head = snake.head();

        let Some(next_head) = head.stepped(self.direction, self.grid) else {
            return self.finish(GameOverCause::WallCollision);
        };

        let eats = self.food == Some(next_head);

        // Moving onto the tail cell is legal only because the tail vacates it
        // this same tick; an eating tick keeps the tail in place, so then the
        // full body counts.
        if snake.occupies(next_head) && (eats || next_head != snake.tail()) {
            return self.finish(GameOverCause::SelfCollision);
        }

        let snake = self.snake.as_mut().expect("running game has a snake");
        let event = if eats {
            snake.grow(next_head);
            self.score += 1;
            log!(
                "Ate food at ({}, {}). Score: {}",
                next_head.x,
                next_head.y,
                self.score
            );
            self.food = self.place_food();
            TickEvent::AteFood
        } else {
            snake.advance(next_head);
            TickEvent::None
        };

        self.snapshot_with(event)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_with(TickEvent::None)
    }

    fn finish(&mut self, cause: GameOverCause) -> Snapshot {
        self.run_state = RunState::GameOver;
        self.game_over_cause = Some(cause);
        self.pending_direction = None;
        log!("Game over ({:?}). Final score: {}", cause, self.score);
        self.snapshot_with(TickEvent::GameOver(cause))
    }

    fn place_food(&mut self) -> Option<Point> {
        let snake = self.snake.as_ref()?;
        let mut open_cells = Vec::with_capacity(self.grid.cell_count().saturating_sub(snake.len()));
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                let cell = Point::new(x, y);
                if !snake.occupies(cell) {
                    open_cells.push(cell);
                }
            }
        }
        let index = self.rng.pick_index(open_cells.len())?;
        Some(open_cells[index])
    }

    fn snapshot_with(&self, event: TickEvent) -> Snapshot {
        Snapshot {
            grid: self.grid,
            snake: self
                .snake
                .as_ref()
                .map(|snake| snake.cells().collect())
                .unwrap_or_default(),
            food: self.food,
            score: self.score,
            direction: self.direction,
            run_state: self.run_state,
            game_over_cause: self.game_over_cause,
            event,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Option<Point>) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, head_first: &[Point], direction: Direction) {
        self.snake = Some(Snake::from_cells(head_first));
        self.direction = direction;
        self.pending_direction = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn started(width: usize, height: usize) -> GameEngine {
        let mut engine = GameEngine::new(SessionRng::new(42));
        engine.start(width, height);
        engine
    }

    fn assert_invariants(snapshot: &Snapshot) {
        let unique: HashSet<Point> = snapshot.snake.iter().copied().collect();
        assert_eq!(unique.len(), snapshot.snake.len(), "snake has duplicate cells");
        if let Some(food) = snapshot.food {
            assert!(!snapshot.snake.contains(&food), "food overlaps the snake");
        }
    }

    #[test]
    fn test_new_engine_is_not_started() {
        let engine = GameEngine::new(SessionRng::new(42));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.run_state, RunState::NotStarted);
        assert!(snapshot.snake.is_empty());
        assert_eq!(snapshot.food, None);
        assert_eq!(snapshot.score, 0);
    }

    #[test]
    fn test_start_returns_initial_snapshot() {
        let mut engine = GameEngine::new(SessionRng::new(42));
        let snapshot = engine.start(10, 10);
        assert_eq!(snapshot.run_state, RunState::Running);
        assert_eq!(snapshot.snake, vec![Point::new(5, 5)]);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.direction, Direction::Right);
        assert!(snapshot.food.is_some());
        assert_invariants(&snapshot);
    }

    #[test]
    fn test_start_rejects_degenerate_grid() {
        let mut engine = GameEngine::new(SessionRng::new(42));
        let snapshot = engine.start(0, 10);
        assert_eq!(snapshot.run_state, RunState::NotStarted);
        assert!(snapshot.snake.is_empty());

        let snapshot = engine.start(10, 0);
        assert_eq!(snapshot.run_state, RunState::NotStarted);
    }

    #[test]
    fn test_start_clamps_spawn_into_bounds() {
        let snapshot = started(3, 3).snapshot();
        assert_eq!(snapshot.snake, vec![Point::new(2, 2)]);
    }

    #[test]
    fn test_start_places_only_open_cell() {
        // 2x1 grid: the snake spawns clamped to (1,0), leaving (0,0).
        let snapshot = started(2, 1).snapshot();
        assert_eq!(snapshot.snake, vec![Point::new(1, 0)]);
        assert_eq!(snapshot.food, Some(Point::new(0, 0)));
    }

    #[test]
    fn test_first_tick_moves_right() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(0, 0)));
        let snapshot = engine.tick();
        assert_eq!(snapshot.snake, vec![Point::new(6, 5)]);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.event, TickEvent::None);
        assert_eq!(snapshot.run_state, RunState::Running);
    }

    #[test]
    fn test_direction_applies_on_next_tick() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(0, 0)));
        engine.set_direction(Direction::Down);
        let snapshot = engine.tick();
        assert_eq!(snapshot.snake, vec![Point::new(5, 6)]);
    }

    #[test]
    fn test_opposite_direction_is_rejected() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(0, 0)));
        engine.set_direction(Direction::Left);
        let snapshot = engine.tick();
        // Intent discarded; still travelling Right.
        assert_eq!(snapshot.snake, vec![Point::new(6, 5)]);
        assert_eq!(snapshot.direction, Direction::Right);
    }

    #[test]
    fn test_latest_pending_direction_wins() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(0, 0)));
        engine.set_direction(Direction::Down);
        engine.set_direction(Direction::Up);
        let snapshot = engine.tick();
        assert_eq!(snapshot.snake, vec![Point::new(5, 4)]);
    }

    #[test]
    fn test_set_direction_before_start_is_noop() {
        let mut engine = GameEngine::new(SessionRng::new(42));
        engine.set_direction(Direction::Down);
        engine.start(10, 10);
        engine.set_food(Some(Point::new(0, 0)));
        let snapshot = engine.tick();
        assert_eq!(snapshot.snake, vec![Point::new(6, 5)]);
    }

    #[test]
    fn test_set_direction_while_paused_is_noop() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(0, 0)));
        engine.pause();
        engine.set_direction(Direction::Down);
        engine.resume();
        let snapshot = engine.tick();
        assert_eq!(snapshot.snake, vec![Point::new(6, 5)]);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(6, 5)));
        let snapshot = engine.tick();
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.snake, vec![Point::new(6, 5), Point::new(5, 5)]);
        assert_eq!(snapshot.event, TickEvent::AteFood);
        assert_ne!(snapshot.food, Some(Point::new(6, 5)));
        assert!(snapshot.food.is_some());
        assert_invariants(&snapshot);
    }

    #[test]
    fn test_length_constant_without_food() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(0, 9)));
        for _ in 0..3 {
            let snapshot = engine.tick();
            assert_eq!(snapshot.snake.len(), 1);
            assert_invariants(&snapshot);
        }
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(0, 0)));
        for _ in 0..4 {
            assert_eq!(engine.tick().run_state, RunState::Running);
        }
        // Head is at (9,5), the rightmost column; the next step leaves the grid.
        let snapshot = engine.tick();
        assert_eq!(snapshot.run_state, RunState::GameOver);
        assert_eq!(snapshot.event, TickEvent::GameOver(GameOverCause::WallCollision));
        assert_eq!(snapshot.game_over_cause, Some(GameOverCause::WallCollision));
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.snake, vec![Point::new(9, 5)]);
    }

    #[test]
    fn test_game_over_state_is_frozen_and_reported_once() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(0, 0)));
        for _ in 0..5 {
            engine.tick();
        }
        assert_eq!(engine.run_state(), RunState::GameOver);

        let frozen = engine.snapshot();
        let after_tick = engine.tick();
        assert_eq!(after_tick, frozen);
        assert_eq!(after_tick.event, TickEvent::None);

        let after_resume = engine.resume();
        assert_eq!(after_resume.run_state, RunState::GameOver);
        let after_turn = engine.set_direction(Direction::Down);
        assert_eq!(after_turn, frozen);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(0, 0)));
        engine.set_snake(
            &[
                Point::new(2, 2),
                Point::new(2, 3),
                Point::new(3, 3),
                Point::new(3, 2),
            ],
            Direction::Down,
        );
        let snapshot = engine.tick();
        assert_eq!(snapshot.run_state, RunState::GameOver);
        assert_eq!(snapshot.event, TickEvent::GameOver(GameOverCause::SelfCollision));
    }

    #[test]
    fn test_tail_follow_is_not_a_collision() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(9, 9)));
        // Closed 2x2 loop; the next head cell (1,1) is the current tail.
        engine.set_snake(
            &[
                Point::new(1, 0),
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
            ],
            Direction::Down,
        );
        let snapshot = engine.tick();
        assert_eq!(snapshot.run_state, RunState::Running);
        assert_eq!(snapshot.snake.len(), 4);
        assert_eq!(snapshot.snake[0], Point::new(1, 1));
        assert_invariants(&snapshot);
    }

    #[test]
    fn test_food_on_tail_cell_suppresses_tail_exception() {
        // An eating tick keeps the tail, so landing on it must be fatal even
        // though the same move would be legal on a non-eating tick.
        let mut engine = started(10, 10);
        engine.set_snake(
            &[
                Point::new(1, 0),
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
            ],
            Direction::Down,
        );
        engine.set_food(Some(Point::new(1, 1)));
        let snapshot = engine.tick();
        assert_eq!(snapshot.run_state, RunState::GameOver);
        assert_eq!(snapshot.event, TickEvent::GameOver(GameOverCause::SelfCollision));
        assert_eq!(snapshot.score, 0);
    }

    #[test]
    fn test_saturated_grid_leaves_food_absent() {
        let mut engine = started(3, 3);
        engine.set_snake(
            &[
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(1, 1),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2),
            ],
            Direction::Down,
        );
        engine.set_food(None);

        // No open cell: the tick proceeds, the eaten check is skipped, and
        // the move itself resolves as a plain collision.
        let snapshot = engine.tick();
        assert_eq!(snapshot.food, None);
        assert_eq!(snapshot.run_state, RunState::GameOver);
        assert_eq!(snapshot.score, 0);
    }

    #[test]
    fn test_pause_and_resume_do_not_change_state() {
        let mut engine = started(10, 10);
        let before = engine.snapshot();

        engine.pause();
        engine.pause();
        let paused = engine.snapshot();
        assert_eq!(paused.run_state, RunState::Paused);
        assert_eq!(paused.snake, before.snake);
        assert_eq!(paused.food, before.food);
        assert_eq!(paused.score, before.score);

        engine.resume();
        engine.resume();
        let resumed = engine.snapshot();
        assert_eq!(resumed.run_state, RunState::Running);
        assert_eq!(resumed.snake, before.snake);
        assert_eq!(resumed.food, before.food);
        assert_eq!(resumed.score, before.score);
    }

    #[test]
    fn test_tick_is_noop_while_paused() {
        let mut engine = started(10, 10);
        engine.pause();
        let before = engine.snapshot();
        let after = engine.tick();
        assert_eq!(after, before);
    }

    #[test]
    fn test_resume_requires_paused() {
        let mut engine = GameEngine::new(SessionRng::new(42));
        assert_eq!(engine.resume().run_state, RunState::NotStarted);
        engine.start(10, 10);
        assert_eq!(engine.resume().run_state, RunState::Running);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut engine = started(10, 10);
        engine.set_food(Some(Point::new(6, 5)));
        engine.tick();
        assert_eq!(engine.score(), 1);

        let snapshot = engine.start(10, 10);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.snake, vec![Point::new(5, 5)]);
        assert_eq!(snapshot.direction, Direction::Right);
        assert_eq!(snapshot.run_state, RunState::Running);
        assert_eq!(snapshot.game_over_cause, None);
        assert_invariants(&snapshot);
    }

    #[test]
    fn test_invariants_hold_through_looped_play() {
        let mut engine = started(8, 8);
        let schedule = [
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
        ];
        for turn in 0..200 {
            engine.set_direction(schedule[turn % schedule.len()]);
            let snapshot = engine.tick();
            assert_invariants(&snapshot);
            if snapshot.run_state == RunState::GameOver {
                break;
            }
        }
    }
}
