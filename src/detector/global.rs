//! 全局识别器入口：免构造的便捷解析函数

use once_cell::sync::Lazy;

use super::detector::UaDetector;
use crate::rule::model::UserAgent;

/// 全局默认识别器（首次调用时构建）
static GLOBAL_DETECTOR: Lazy<UaDetector> = Lazy::new(UaDetector::new);

/// 使用全局识别器解析 User-Agent
pub fn parse_user_agent(raw: &str) -> UserAgent {
    GLOBAL_DETECTOR.parse(raw)
}

/// 使用全局识别器解析并返回紧凑形式
pub fn parse_user_agent_short(raw: &str) -> String {
    GLOBAL_DETECTOR.parse_short(raw)
}
