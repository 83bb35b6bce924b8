mod swipe;

pub use swipe::{DEFAULT_SWIPE_THRESHOLD_PX, SwipeDecoder};
