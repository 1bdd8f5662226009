mod input;
mod loop_runner;
mod metrics;
mod session;

pub use input::{KeyBindings, PlayerAction};
pub use loop_runner::{run_app, run_app_with_stats, AppError, LoopConfig};
pub use metrics::{LoopStatsSnapshot, StatsHandle};
pub use session::{InputSnapshot, Session, SessionCommand};
