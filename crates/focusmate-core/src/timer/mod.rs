mod pomodoro;
mod stopwatch;

pub use pomodoro::{
    parse_minutes, Phase, PomodoroCycle, BREAK_MINUTES_MAX, DEFAULT_BREAK_MINUTES,
    DEFAULT_WORK_MINUTES, WORK_MINUTES_MAX,
};
pub use stopwatch::Stopwatch;
