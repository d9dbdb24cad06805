//! 注册表编译器核心
//! 仅负责将静态规则表编译为可查找的识别注册表

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
#[cfg(feature = "logging")]
use tracing::debug;

use super::recognizer::{ExactEntry, PrefixHandler, PrefixRule, RecoKind};
use crate::rule::model::DeviceType;
use crate::rule::tables::{self, RuleSource};

/// 已知产品标识（首token兜底查找用）
#[derive(Debug, Clone, Copy)]
pub struct KnownProduct {
    pub device_type: DeviceType,
    pub device_name: &'static str,
}

/// 编译后的识别注册表
///
/// 构建一次后不可变，可在多线程间无锁共享读取。
#[derive(Debug)]
pub struct CompiledRegistry {
    // 精确匹配字典（按上下文分离）
    pub product_exact: HashMap<String, ExactEntry>,
    pub comment_exact: HashMap<String, ExactEntry>,
    // 有序前缀规则（按上下文分离，注册顺序即匹配顺序）
    pub product_prefix: Vec<PrefixRule>,
    pub comment_prefix: Vec<PrefixRule>,
    // 已知注释标记（标记 -> 规范化键名，空串表示以标记自身为键）
    pub known_tags: HashMap<String, String>,
    // 设备名规范化表
    pub canonical_devices: HashMap<String, String>,
    // 已知产品标识表
    pub known_products: HashMap<String, KnownProduct>,
}

/// 全局共享注册表（首次访问时编译）
static SHARED_REGISTRY: Lazy<Arc<CompiledRegistry>> =
    Lazy::new(|| Arc::new(RegistryCompiler::compile()));

/// 获取全局共享注册表
pub fn shared_registry() -> Arc<CompiledRegistry> {
    SHARED_REGISTRY.clone()
}

/// 注册表编译器
pub struct RegistryCompiler;

impl RegistryCompiler {
    /// 编译注册表
    pub fn compile() -> CompiledRegistry {
        let mut product_exact = HashMap::new();
        let mut comment_exact = HashMap::new();

        // 1. 编译精确匹配字典（按来源标志分入产品/注释上下文）
        let mut insert_exact =
            |name: &str, priority: u8, source: RuleSource, kind: RecoKind, hint: Option<DeviceType>| {
                let entry = ExactEntry {
                    kind,
                    priority,
                    device_type: hint,
                };
                if source.in_product() {
                    product_exact.insert(name.to_string(), entry);
                }
                if source.in_comment() {
                    comment_exact.insert(name.to_string(), entry);
                }
            };

        for (name, priority, source) in tables::OSES {
            insert_exact(name, *priority, *source, RecoKind::Os, None);
        }
        for (name, priority, source) in tables::BROWSERS {
            insert_exact(name, *priority, *source, RecoKind::Browser, None);
        }
        for (name, priority, source) in tables::ENGINES {
            insert_exact(name, *priority, *source, RecoKind::Engine, None);
        }
        for (name, priority, source, device_type) in tables::DEVICES {
            insert_exact(name, *priority, *source, RecoKind::Device, Some(*device_type));
        }
        for (name, priority, source) in tables::SKIPS {
            insert_exact(name, *priority, *source, RecoKind::Skip, None);
        }
        for code in tables::LANGUAGES {
            comment_exact.insert(
                code.to_string(),
                ExactEntry {
                    kind: RecoKind::Language,
                    priority: 0,
                    device_type: None,
                },
            );
        }

        // 2. 注册前缀规则（注册顺序即匹配顺序，不可调整）
        let mut product_prefix = Vec::new();
        let mut comment_prefix = Vec::new();
        let mut add_prefix = |source: RuleSource,
                              prefix: &'static str,
                              rewrite: &'static str,
                              priority: u8,
                              device_type: Option<DeviceType>,
                              handler: PrefixHandler| {
            let rule = PrefixRule {
                prefix,
                rewrite,
                priority,
                device_type,
                handler,
            };
            if source.in_comment() {
                comment_prefix.push(rule.clone());
            }
            if source.in_product() {
                product_prefix.push(rule);
            }
        };

        add_prefix(RuleSource::Comment, "windows nt ", "windows_nt", 1, None, PrefixHandler::OsVersion);
        add_prefix(RuleSource::Comment, "linux ", "linux", 1, None, PrefixHandler::OsVersion);
        add_prefix(RuleSource::Comment, "android ", "android", 2, None, PrefixHandler::OsVersion);
        add_prefix(RuleSource::Comment, "windows phone", "windows_phone", 1, None, PrefixHandler::OsVersion);
        add_prefix(RuleSource::Comment, "windows ", "windows", 1, None, PrefixHandler::OsVersion);
        add_prefix(RuleSource::Comment, "intel mac os x ", "macosx", 1, None, PrefixHandler::OsVersion);
        add_prefix(RuleSource::Comment, "cros ", "chromeos", 1, None, PrefixHandler::OsVersion);
        add_prefix(RuleSource::Comment, "tizen", "tizen", 2, None, PrefixHandler::OsVersion);

        add_prefix(RuleSource::Comment, "crkey ", "chromecast", 1, Some(DeviceType::SmartTv), PrefixHandler::DeviceVersion);
        add_prefix(RuleSource::Comment, "apple tv", "appletv", 1, Some(DeviceType::SmartTv), PrefixHandler::DeviceVersion);
        add_prefix(RuleSource::Comment, "playstation 4", "ps4", 1, Some(DeviceType::Console), PrefixHandler::DeviceVersion);
        add_prefix(RuleSource::Comment, "playstation 3", "ps3", 1, Some(DeviceType::Console), PrefixHandler::DeviceVersion);
        add_prefix(RuleSource::Product, "roku ", "roku", 2, Some(DeviceType::SmartTv), PrefixHandler::DeviceVersion);
        add_prefix(RuleSource::Product, "rokudvp-", "roku", 2, Some(DeviceType::SmartTv), PrefixHandler::DeviceVersion);
        add_prefix(RuleSource::Comment, "googletv ", "googletv", 2, Some(DeviceType::SmartTv), PrefixHandler::DeviceVersion);
        add_prefix(RuleSource::Comment, "iphone", "iphone", 2, Some(DeviceType::Phone), PrefixHandler::DeviceVersion);
        add_prefix(RuleSource::Comment, "ipod", "ipod", 2, Some(DeviceType::Phone), PrefixHandler::DeviceVersion);
        add_prefix(RuleSource::Comment, "ipad", "ipad", 2, Some(DeviceType::Tablet), PrefixHandler::DeviceVersion);
        add_prefix(RuleSource::Comment, "appletv", "appletv", 2, Some(DeviceType::Tablet), PrefixHandler::DeviceVersion);

        add_prefix(RuleSource::Comment, "msie ", "msie", 2, None, PrefixHandler::BrowserVersion);

        add_prefix(RuleSource::Comment, "rv:", "", 1, None, PrefixHandler::RawRv);

        add_prefix(RuleSource::Both, "smart-tv", "", 1, None, PrefixHandler::SmartTvMarker);
        add_prefix(RuleSource::Both, "smarttv", "", 1, None, PrefixHandler::SmartTvMarker);

        add_prefix(RuleSource::Comment, "cpu iphone os ", "", 1, None, PrefixHandler::IosPlatform);
        add_prefix(RuleSource::Comment, "cpu os ", "", 1, None, PrefixHandler::IosPlatform);
        add_prefix(RuleSource::Comment, "cpu ios ", "", 1, None, PrefixHandler::IosPlatform);
        add_prefix(RuleSource::Comment, "cpu tvos ", "tvos", 1, None, PrefixHandler::IosPlatform);
        add_prefix(RuleSource::Comment, "ios ", "", 1, None, PrefixHandler::IosPlatform);
        add_prefix(RuleSource::Comment, "tvos ", "tvos", 1, None, PrefixHandler::IosPlatform);

        // 3. 辅助查找表
        let known_tags = tables::KNOWN_TAGS
            .iter()
            .map(|(tag, canonical)| (tag.to_string(), canonical.to_string()))
            .collect();
        let canonical_devices = tables::CANONICAL_DEVICES
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        let known_products = tables::KNOWN_PRODUCTS
            .iter()
            .map(|(name, device_type, device_name)| {
                (
                    name.to_string(),
                    KnownProduct {
                        device_type: *device_type,
                        device_name,
                    },
                )
            })
            .collect();

        let registry = CompiledRegistry {
            product_exact,
            comment_exact,
            product_prefix,
            comment_prefix,
            known_tags,
            canonical_devices,
            known_products,
        };

        // 4. 输出编译统计
        #[cfg(feature = "logging")]
        debug!(
            "注册表编译完成：产品字典{}条、注释字典{}条、产品前缀{}条、注释前缀{}条",
            registry.product_exact.len(),
            registry.comment_exact.len(),
            registry.product_prefix.len(),
            registry.comment_prefix.len()
        );

        registry
    }
}
