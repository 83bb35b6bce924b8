use crate::game::Direction;

pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 100.0;

// Turns raw pointer press/release pairs into directional intents. Screen
// coordinates: y grows downward, so a positive vertical delta swipes Down.
pub struct SwipeDecoder {
    threshold_px: f32,
    press_origin: Option<(f32, f32)>,
}

impl SwipeDecoder {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px,
            press_origin: None,
        }
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.press_origin = Some((x, y));
    }

    pub fn release(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (start_x, start_y) = self.press_origin.take()?;
        let delta_x = x - start_x;
        let delta_y = y - start_y;

        if delta_x.abs() <= self.threshold_px && delta_y.abs() <= self.threshold_px {
            return None;
        }

        if delta_x.abs() > delta_y.abs() {
            if delta_x > 0.0 {
                Some(Direction::Right)
            } else {
                Some(Direction::Left)
            }
        } else if delta_y > 0.0 {
            Some(Direction::Down)
        } else {
            Some(Direction::Up)
        }
    }
}

impl Default for SwipeDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD_PX)
    }
}
