//! 规则模块：结果数据模型 + 静态识别规则表

pub mod model;
pub mod tables;

pub use model::{Component, DeviceType, UserAgent};
pub use tables::RuleSource;
