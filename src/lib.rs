// Library exports for the light-cycle bot
// This allows the replay tool and the integration tests to use the core bot logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod evaluator;
pub mod game;
pub mod grid;
pub mod protocol;
pub mod replay;
pub mod search;
pub mod simple_profiler;
pub mod types;
