//! 识别模块：注册表分类与启发式级联

mod cascade;
mod classifier;
pub mod detector;
pub mod global;

pub use detector::UaDetector;
pub use global::{parse_user_agent, parse_user_agent_short};
