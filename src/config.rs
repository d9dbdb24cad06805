//! 全局配置管理,存储所有可配置项

/// 全局配置
#[derive(Debug, Clone)]
pub struct UaConfig {
    // 输入最大长度（字节，0表示不截断）；默认不截断，长度限制由调用方按需设置
    pub max_ua_length: usize,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for UaConfig {
    fn default() -> Self {
        Self {
            max_ua_length: 0,
            verbose: false,
        }
    }
}

/// 配置管理器（单例）
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> UaConfig {
        UaConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: UaConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: UaConfig::default(),
        }
    }

    pub fn max_ua_length(mut self, max_ua_length: usize) -> Self {
        self.config.max_ua_length = max_ua_length;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> UaConfig {
        self.config
    }
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
