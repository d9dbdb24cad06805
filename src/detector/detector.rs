//! 识别器核心：规范化 → 切分 → 归并 → 分组 → 分类 → 级联修正

use std::sync::Arc;

#[cfg(feature = "logging")]
use tracing::debug;

use super::{cascade, classifier};
use crate::compiler::{CompiledRegistry, shared_registry};
use crate::config::UaConfig;
use crate::extractor::{grouper, lexer, merger};
use crate::rule::model::UserAgent;

/// User-Agent 识别器
///
/// 持有共享注册表与配置，可克隆后跨线程使用。
#[derive(Clone)]
pub struct UaDetector {
    registry: Arc<CompiledRegistry>,
    config: UaConfig,
}

impl UaDetector {
    /// 默认配置识别器（使用全局共享注册表）
    pub fn new() -> Self {
        Self::with_config(UaConfig::default())
    }

    /// 自定义配置识别器
    pub fn with_config(config: UaConfig) -> Self {
        Self {
            registry: shared_registry(),
            config,
        }
    }

    /// 指定注册表的识别器（测试或定制规则用）
    pub fn with_registry(registry: Arc<CompiledRegistry>, config: UaConfig) -> Self {
        Self { registry, config }
    }

    /// 输入规范化：统一小写、`+`还原为空格、超长截断
    fn normalize(&self, raw: &str) -> String {
        let mut ua = raw.to_lowercase().replace('+', " ");
        let max = self.config.max_ua_length;
        if max > 0 && ua.len() > max {
            // 截断点回退到字符边界
            let mut cut = max;
            while !ua.is_char_boundary(cut) {
                cut -= 1;
            }
            ua.truncate(cut);
        }
        ua
    }

    /// 解析 User-Agent 字符串
    ///
    /// 任何输入均返回结果，无法识别的维度保持空值。
    pub fn parse(&self, raw: &str) -> UserAgent {
        let normalized = self.normalize(raw);

        // 1. 切分
        let items = lexer::tokenize(&normalized);
        if items.is_empty() {
            return UserAgent::default();
        }

        // 2. 首token信号在归并前取得
        let first_tag = grouper::first_tag(&items);

        // 3. 归并与产品分组
        let products = grouper::group(merger::merge(items));
        if products.is_empty() {
            return UserAgent::default();
        }

        // 4. 注册表分类
        let mut ua = UserAgent::default();
        let mut state = classifier::classify(&self.registry, &mut ua, products, first_tag);

        // 5. 级联修正
        cascade::apply(&mut ua, &mut state, &self.registry);

        #[cfg(feature = "logging")]
        if self.config.verbose {
            debug!("解析完成：{}", ua.short_name());
        }

        ua
    }

    /// 解析并返回紧凑形式 `{设备类型};{设备};{OS};{浏览器}`
    pub fn parse_short(&self, raw: &str) -> String {
        self.parse(raw).short_name()
    }
}

impl Default for UaDetector {
    fn default() -> Self {
        Self::new()
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::rule::model::DeviceType;

    #[test]
    fn test_parse_desktop_chrome() {
        // 测试场景：桌面chrome，linux架构版本推断桌面
        let detector = UaDetector::new();
        let ua = detector.parse(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.11 (KHTML, like Gecko) Chrome/23.0.1271.64 Safari/537.11",
        );
        assert_eq!(ua.short_name(), "6;;linux;chrome");
        assert_eq!(ua.browser.version, "23.0.1271.64");
        assert_eq!(ua.engine.name, "applewebkit");
        assert_eq!(ua.mozilla_version, "5.0");
    }

    #[test]
    fn test_parse_desktop_msie() {
        // 测试场景：注释内msie前缀识别浏览器，windows推断桌面
        let detector = UaDetector::new();
        let ua =
            detector.parse("Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.1; Trident/6.0)");
        assert_eq!(ua.short_name(), "6;;windows_nt;msie");
        assert_eq!(ua.browser.version, "10.0");
        assert_eq!(ua.os.version, "6.1");
        assert_eq!(ua.engine.name, "trident");
    }

    #[test]
    fn test_parse_roku() {
        // 测试场景：设备产品token直接命中，注释内容不干扰
        let detector = UaDetector::new();
        let ua = detector.parse("Roku/DVP-9.10 (519.10E04111A)");
        assert_eq!(ua.short_name(), "3;roku;;");
        assert_eq!(ua.device.version, "dvp-9.10");
        assert_eq!(ua.device_type, DeviceType::SmartTv);
    }

    #[test]
    fn test_parse_android_phone() {
        // 测试场景：android设备名取自末个未匹配注释token并剥离build后缀
        let detector = UaDetector::new();
        let ua = detector.parse(
            "Mozilla/5.0 (Linux; Android 6.0.1; M4 SS4457 Build/MRA58K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.83 Mobile Safari/537.36",
        );
        assert_eq!(ua.short_name(), "1;m4 ss4457;android;chrome");
        assert_eq!(ua.os.version, "6.0.1");
        assert_eq!(ua.device.version, "mra58k");
    }

    #[test]
    fn test_parse_iphone_mobile_safari() {
        // 测试场景：iOS平台前缀、mobile标志与safari改名联动
        let detector = UaDetector::new();
        let ua = detector.parse(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 8_3 like Mac OS X) AppleWebKit/600.1.4 (KHTML, like Gecko) Version/8.0 Mobile/12F70 Safari/600.1.4",
        );
        assert_eq!(ua.short_name(), "1;iphone;ios;mobile safari");
        assert_eq!(ua.os.version, "8_3");
        assert!(ua.mobile);
    }

    #[test]
    fn test_parse_short_name_cases() {
        // 测试场景：典型输入的紧凑形式逐项核对
        let cases = [
            (
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.11 (KHTML, like Gecko) Chrome/23.0.1271.97 Safari/537.11",
                "6;;linux;chrome",
            ),
            (
                "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; rv:11.0) like Gecko",
                "6;;windows_nt;msie",
            ),
            ("Roku/DVP-9.0 (289.00E04144A)", "3;roku;;"),
            (
                "com.google.android.youtube/14.08.55(Linux; U; Android 6.0; es_US; M4 SS4457 Build/MRA58K) gzip,gzip(gfe)",
                "1;m4 ss4457;android;",
            ),
            (
                "com.google.ios.youtube/14.07.7 (iPhone11,8; U; CPU iOS 12_1_4 like Mac OS X; en_US)",
                "1;iphone;ios;",
            ),
        ];

        let detector = UaDetector::new();
        for (input, expected) in cases {
            assert_eq!(detector.parse_short(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_parse_empty_input() {
        // 测试场景：空输入与纯空白输入返回零值结果
        let detector = UaDetector::new();
        assert_eq!(detector.parse_short(""), "0;;;");
        assert_eq!(detector.parse_short("   "), "0;;;");
    }

    #[test]
    fn test_parse_plus_as_space() {
        // 测试场景：加号还原为空格后参与切分
        let detector = UaDetector::new();
        let ua = detector.parse("Mozilla/5.0+(Windows+NT+10.0)+Chrome/100.0.0.0");
        assert_eq!(ua.os.name, "windows_nt");
        assert_eq!(ua.os.version, "10.0");
        assert_eq!(ua.browser.name, "chrome");
    }

    #[test]
    fn test_parse_long_input_not_truncated_by_default() {
        // 测试场景：默认配置不限制输入长度，长前导内容之后的token仍参与识别
        let detector = UaDetector::new();
        let input = format!("{}Roku/DVP-9.0 (289.00E04144A)", " ".repeat(1100));
        assert_eq!(detector.parse_short(&input), "3;roku;;");
    }

    #[test]
    fn test_parse_truncation_respects_char_boundary() {
        // 测试场景：超长输入按字节上限截断且不切断多字节字符
        let config = ConfigManager::custom().max_ua_length(10).build();
        let detector = UaDetector::with_config(config);
        // 第10字节落在"界"字中间，应回退到边界
        let ua = detector.parse("mozilla 世界chrome/1.0");
        assert_eq!(ua.short_name(), "0;;;");
    }

    #[test]
    fn test_parse_deterministic() {
        // 测试场景：相同输入多次解析结果一致
        let detector = UaDetector::new();
        let input = "Mozilla/5.0 (Linux; Android 10; SM-G981B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/80.0.3987.162 Mobile Safari/537.36";
        let first = detector.parse_short(input);
        for _ in 0..3 {
            assert_eq!(detector.parse_short(input), first);
        }
    }

    #[test]
    fn test_parse_webview_android() {
        // 测试场景：android下wv标记置webview
        let detector = UaDetector::new();
        let ua = detector.parse(
            "Mozilla/5.0 (Linux; Android 10; K; wv) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/90.0.4430.210 Mobile Safari/537.36",
        );
        assert!(ua.webview);
        assert_eq!(ua.os.name, "android");
        assert_eq!(ua.device_type, DeviceType::Phone);
    }
}
