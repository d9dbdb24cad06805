//! rsuaparser - Rust User-Agent解析与设备分类库

// 导出全局错误类型
pub use self::error::{RsuaError, RsuaResult};

// 导出配置模块
pub use self::config::{UaConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::model::{Component, DeviceType, UserAgent};

// 导出编译模块核心接口
pub use self::compiler::{
    CompiledRegistry, RegistryCompiler, shared_registry
};

// 导出识别模块核心接口（含免构造的简化接口）
pub use self::detector::{
    UaDetector,
    parse_user_agent,
    parse_user_agent_short,
};

// 导出一致性校验器
pub use self::checker::ConsistencyChecker;

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod extractor;
pub mod compiler;
pub mod detector;
pub mod checker;
pub mod ffi;
