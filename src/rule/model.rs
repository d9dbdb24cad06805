//! 识别结果数据模型定义
//! 仅存储解析结果数据，无任何识别逻辑，支持序列化

use std::collections::HashMap;
use std::fmt;
use serde::Serialize;

use crate::error::RsuaResult;

/// 设备类型（序号即 ShortName 线上契约的数值形式）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum DeviceType {
    #[default]
    Unknown = 0,
    Phone = 1,
    Tablet = 2,
    SmartTv = 3,
    SetTop = 4,
    Console = 5,
    Desktop = 6,
    Wearable = 7,
}

impl DeviceType {
    /// 序号形式（ShortName 中使用）
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ordinal())
    }
}

/// 单个识别维度（OS/浏览器/设备/引擎）
///
/// 写入规则（两条路径不对称，必须严格区分）：
/// - 注册表匹配走 [`Component::apply_recognized`]，仅当新优先级严格大于
///   当前优先级时才覆盖，同优先级先写入者生效；
/// - 启发式修正走 [`Component::force_assign`] 或直接字段赋值，无条件覆盖
///   但不改变优先级，后续更高优先级的注册表匹配仍可覆盖修正结果。
#[derive(Debug, Clone, Default, Serialize)]
pub struct Component {
    pub name: String,
    pub version: String,
    #[serde(skip)]
    priority: u8,
}

impl Component {
    /// 注册表匹配写入（优先级门控）
    ///
    /// 返回是否实际写入。严格大于才覆盖，相等保持现值。
    pub fn apply_recognized(&mut self, name: &str, version: &str, priority: u8) -> bool {
        if priority > self.priority {
            self.name = name.to_string();
            self.version = version.to_string();
            self.priority = priority;
            return true;
        }
        false
    }

    /// 启发式修正写入（无条件覆盖，优先级保持不变）
    pub fn force_assign(&mut self, name: impl Into<String>, version: impl Into<String>) {
        self.name = name.into();
        self.version = version.into();
    }

    /// 名称是否为空（未识别）
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// User-Agent 识别结果
///
/// 生命周期：单次解析调用内创建并填充，返回后不再变更。
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserAgent {
    pub device_type: DeviceType,
    pub os: Component,
    pub browser: Component,
    pub device: Component,
    pub engine: Component,
    pub language: String,
    // 未被消耗的注释标记（如 tablet/ctv/omi），值为伴随的版本串
    pub tags: HashMap<String, String>,
    pub mobile: bool,
    pub webview: bool,
    // mozilla 前导token携带的版本号
    pub mozilla_version: String,
    // rv: 前缀捕获的原始文本（windows 旧版浏览器回填用）
    pub raw_rv: String,
}

impl UserAgent {
    /// 紧凑序列化形式：`{设备类型序号};{设备名};{OS名};{浏览器名}`
    pub fn short_name(&self) -> String {
        format!(
            "{};{};{};{}",
            self.device_type.ordinal(),
            self.device.name,
            self.os.name,
            self.browser.name
        )
    }

    /// JSON 形式（完整结果）
    pub fn to_json(&self) -> RsuaResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ======== 为 UserAgent 实现 Display trait（输出 ShortName 形式） ========
impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_recognized_priority_gate() {
        // 测试场景：严格大于才覆盖，相等时先写入者生效
        let mut c = Component::default();
        assert!(c.apply_recognized("safari", "1.0", 1));
        assert!(!c.apply_recognized("mobile safari", "2.0", 1));
        assert_eq!(c.name, "safari");

        assert!(c.apply_recognized("chrome", "23.0", 2));
        assert_eq!(c.name, "chrome");
        assert!(!c.apply_recognized("safari", "537.11", 1));
        assert_eq!(c.name, "chrome");
    }

    #[test]
    fn test_force_assign_keeps_priority() {
        // 测试场景：强制赋值不更新优先级，后续注册表匹配仍可覆盖
        let mut c = Component::default();
        assert!(c.apply_recognized("roku", "9.0", 1));
        c.force_assign("appletv", "");
        assert_eq!(c.name, "appletv");

        // 优先级仍为1，同级写入被拒绝
        assert!(!c.apply_recognized("googletv", "", 1));
        assert_eq!(c.name, "appletv");

        // 更高优先级可覆盖强制赋值的结果
        assert!(c.apply_recognized("iphone", "11,8", 2));
        assert_eq!(c.name, "iphone");
    }

    #[test]
    fn test_short_name_empty_result() {
        // 测试场景：零值结果的 ShortName 固定为 "0;;;"
        let ua = UserAgent::default();
        assert_eq!(ua.short_name(), "0;;;");
        assert_eq!(ua.to_string(), "0;;;");
    }

    #[test]
    fn test_device_type_ordinals() {
        // 测试场景：设备类型序号即线上契约数值
        assert_eq!(DeviceType::Unknown.ordinal(), 0);
        assert_eq!(DeviceType::Phone.ordinal(), 1);
        assert_eq!(DeviceType::Tablet.ordinal(), 2);
        assert_eq!(DeviceType::SmartTv.ordinal(), 3);
        assert_eq!(DeviceType::SetTop.ordinal(), 4);
        assert_eq!(DeviceType::Console.ordinal(), 5);
        assert_eq!(DeviceType::Desktop.ordinal(), 6);
        assert_eq!(DeviceType::Wearable.ordinal(), 7);
    }

    #[test]
    fn test_to_json_contains_components() {
        // 测试场景：JSON 序列化包含核心字段
        let mut ua = UserAgent::default();
        ua.os.force_assign("android", "6.0");
        let json = ua.to_json().unwrap();
        assert!(json.contains("\"android\""));
        assert!(json.contains("\"device_type\""));
    }
}
