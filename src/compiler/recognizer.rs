//! 识别器模型：编译后的精确匹配条目与前缀规则
//! 前缀处理器为封闭枚举，按注册顺序首个命中者生效

use crate::extractor::UaToken;
use crate::rule::model::{DeviceType, UserAgent};

/// 条目语义类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoKind {
    Os,
    Browser,
    Device,
    Engine,
    Language,
    Skip,
}

/// 精确匹配条目（按上下文分别入字典）
#[derive(Debug, Clone, Copy)]
pub struct ExactEntry {
    pub kind: RecoKind,
    pub priority: u8,
    // 设备类型提示，仅在设备维度实际写入时生效
    pub device_type: Option<DeviceType>,
}

/// 前缀处理器类别（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixHandler {
    /// 前缀后文本为版本，重写名写入OS
    OsVersion,
    /// 前缀后文本为版本，重写名写入设备（附带设备类型提示）
    DeviceVersion,
    /// 前缀后文本为版本，重写名写入浏览器
    BrowserVersion,
    /// `rv:`旁路捕获，原样存入结果的 raw_rv
    RawRv,
    /// iOS系平台前缀：去平台前缀与"like mac os x"后缀，重写名缺省为ios
    IosPlatform,
    /// smart-tv字面前缀：仅消耗token的占位标记
    SmartTvMarker,
}

/// 前缀规则：字面前缀 + 处理器
#[derive(Debug, Clone)]
pub struct PrefixRule {
    pub prefix: &'static str,
    pub rewrite: &'static str,
    pub priority: u8,
    pub device_type: Option<DeviceType>,
    pub handler: PrefixHandler,
}

impl PrefixRule {
    /// 尝试应用规则：前缀不匹配返回false，命中后由处理器独占解释该token
    pub fn try_apply(&self, ua: &mut UserAgent, tok: &UaToken) -> bool {
        let Some(rest) = tok.name.strip_prefix(self.prefix) else {
            return false;
        };

        match self.handler {
            PrefixHandler::OsVersion => {
                ua.os.apply_recognized(self.rewrite, rest.trim(), self.priority);
            }
            PrefixHandler::BrowserVersion => {
                ua.browser
                    .apply_recognized(self.rewrite, rest.trim(), self.priority);
            }
            PrefixHandler::DeviceVersion => {
                if ua
                    .device
                    .apply_recognized(self.rewrite, rest.trim(), self.priority)
                {
                    if let Some(device_type) = self.device_type {
                        ua.device_type = device_type;
                    }
                }
            }
            PrefixHandler::RawRv => {
                ua.raw_rv = rest.trim().to_string();
            }
            PrefixHandler::IosPlatform => {
                let version = rest.strip_suffix("like mac os x").unwrap_or(rest).trim();
                let name = if self.rewrite.is_empty() {
                    "ios"
                } else {
                    self.rewrite
                };
                ua.os.apply_recognized(name, version, self.priority);
            }
            PrefixHandler::SmartTvMarker => {}
        }

        true
    }
}
