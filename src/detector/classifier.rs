//! 分类器：单次左到右遍历，依注册表填充识别结果
//! 未命中的token进入溢出列表，供级联启发式后续消费

#[cfg(feature = "logging")]
use tracing::debug;

use crate::compiler::{CompiledRegistry, RecoKind};
use crate::extractor::{ProductUnit, UaToken};
use crate::rule::model::UserAgent;

/// 匹配上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Product,
    Comment,
}

/// 分类遗留状态：溢出token与首token信号，供级联启发式使用
#[derive(Debug, Default)]
pub(crate) struct LeftoverState {
    pub first_tag: String,
    pub extra_products: Vec<UaToken>,
    pub extra_comments: Vec<UaToken>,
}

/// 精确匹配查找与按类别派发
fn try_exact(registry: &CompiledRegistry, ua: &mut UserAgent, tok: &UaToken, ctx: Context) -> bool {
    let dict = match ctx {
        Context::Product => &registry.product_exact,
        Context::Comment => &registry.comment_exact,
    };
    let Some(entry) = dict.get(&tok.name) else {
        return false;
    };

    match entry.kind {
        RecoKind::Browser => {
            ua.browser
                .apply_recognized(&tok.name, &tok.version, entry.priority);
        }
        RecoKind::Engine => {
            ua.engine
                .apply_recognized(&tok.name, &tok.version, entry.priority);
        }
        RecoKind::Os => {
            ua.os
                .apply_recognized(&tok.name, &tok.version, entry.priority);
        }
        RecoKind::Device => {
            if ua
                .device
                .apply_recognized(&tok.name, &tok.version, entry.priority)
            {
                if let Some(device_type) = entry.device_type {
                    ua.device_type = device_type;
                }
            }
        }
        RecoKind::Language => {
            ua.language = tok.name.clone();
        }
        // 已知无意义token：消耗但不产生写入
        RecoKind::Skip => {}
    }

    true
}

/// 顺序尝试前缀规则，首个命中者生效
fn try_prefix(rules: &[crate::compiler::PrefixRule], ua: &mut UserAgent, tok: &UaToken) -> bool {
    rules.iter().any(|rule| rule.try_apply(ua, tok))
}

/// 已知标记捕获：命中则存入tags（无规范键名时以标记自身为键）
fn try_known_tag(registry: &CompiledRegistry, ua: &mut UserAgent, tok: &UaToken) -> bool {
    let Some(canonical) = registry.known_tags.get(&tok.name) else {
        return false;
    };
    let key = if canonical.is_empty() {
        tok.name.clone()
    } else {
        canonical.clone()
    };
    ua.tags.insert(key, tok.version.clone());
    true
}

/// 分类主流程
///
/// 依次处理：首产品的前导token（产品上下文，mozilla仅记录版本）、
/// 首个非空注释块的全部token（注释上下文）、其余产品的前导token。
pub(crate) fn classify(
    registry: &CompiledRegistry,
    ua: &mut UserAgent,
    mut products: Vec<ProductUnit>,
    first_tag: String,
) -> LeftoverState {
    let mut state = LeftoverState {
        first_tag,
        ..LeftoverState::default()
    };

    // 空产品列表无事可做
    let Some(first) = products.first_mut() else {
        return state;
    };

    // 1. 首产品的前导token
    if let Some(tok) = first.leading.take() {
        if tok.name == "mozilla" {
            ua.mozilla_version = tok.version;
        } else if !try_exact(registry, ua, &tok, Context::Product) {
            try_prefix(&registry.product_prefix, ua, &tok);
        }
    }

    // 2. 仅取首个非空注释块
    let mut comment = None;
    for product in &mut products {
        if product.comment.is_some() {
            comment = product.comment.take();
            break;
        }
    }
    if let Some(block) = comment {
        for tok in block {
            if try_exact(registry, ua, &tok, Context::Comment) {
                continue;
            }
            if tok.name == "mobile" {
                ua.mobile = true;
                continue;
            }
            if tok.name == "wv" && ua.os.name == "android" {
                ua.webview = true;
                continue;
            }
            if try_known_tag(registry, ua, &tok) {
                continue;
            }
            if try_prefix(&registry.comment_prefix, ua, &tok) {
                continue;
            }
            state.extra_comments.push(tok);
        }
    }

    // 3. 其余产品的前导token（第二个产品起）
    for product in products.into_iter().skip(1) {
        let Some(tok) = product.leading else {
            continue;
        };
        if try_exact(registry, ua, &tok, Context::Product) {
            continue;
        }
        // mobile标记在此处不消耗token，继续走后备匹配
        if tok.name == "mobile" {
            ua.mobile = true;
        }
        if try_known_tag(registry, ua, &tok) {
            continue;
        }
        // 尾部产品的后备前缀匹配沿用注释上下文规则表
        if try_prefix(&registry.comment_prefix, ua, &tok) {
            continue;
        }
        state.extra_products.push(tok);
    }

    #[cfg(feature = "logging")]
    if !state.extra_comments.is_empty() || !state.extra_products.is_empty() {
        debug!(
            "未匹配token：注释{}个、产品{}个",
            state.extra_comments.len(),
            state.extra_products.len()
        );
    }

    state
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::shared_registry;
    use crate::extractor::{grouper, lexer, merger};
    use crate::rule::model::DeviceType;

    fn run(ua_str: &str) -> (UserAgent, LeftoverState) {
        let registry = shared_registry();
        let items = lexer::tokenize(ua_str);
        let first_tag = grouper::first_tag(&items);
        let products = grouper::group(merger::merge(items));
        let mut ua = UserAgent::default();
        let state = classify(&registry, &mut ua, products, first_tag);
        (ua, state)
    }

    #[test]
    fn test_classify_empty_products_returns_empty_state() {
        // 测试场景：空产品列表直接返回空遗留状态，结果保持零值
        let registry = shared_registry();
        let mut ua = UserAgent::default();
        let state = classify(&registry, &mut ua, Vec::new(), String::new());
        assert!(state.extra_products.is_empty());
        assert!(state.extra_comments.is_empty());
        assert_eq!(ua.short_name(), "0;;;");
    }

    #[test]
    fn test_classify_mozilla_version_captured() {
        // 测试场景：首产品为mozilla时仅记录版本，不参与识别
        let (ua, _) = run("mozilla/5.0 (x11; linux x86_64)");
        assert_eq!(ua.mozilla_version, "5.0");
        assert!(ua.browser.is_empty());
        assert_eq!(ua.os.name, "linux");
        assert_eq!(ua.os.version, "x86_64");
    }

    #[test]
    fn test_classify_only_first_nonempty_comment_used() {
        // 测试场景：仅首个非空注释块参与注释上下文识别
        let (ua, _) = run("mozilla/5.0 (x11; linux x86_64) applewebkit/537.11 (android 6.0)");
        // 第二个注释块中的android前缀规则不应生效
        assert_eq!(ua.os.name, "linux");
    }

    #[test]
    fn test_classify_webview_requires_android() {
        // 测试场景：wv标记仅在OS已识别为android时生效
        let (ua, _) = run("mozilla/5.0 (linux; android 10; wv)");
        assert!(ua.webview);

        let (ua, _) = run("mozilla/5.0 (x11; wv)");
        assert!(!ua.webview);
    }

    #[test]
    fn test_classify_mobile_flag_in_comment() {
        // 测试场景：注释中的mobile字面直接置标志并消耗
        let (ua, state) = run("mozilla/5.0 (linux; mobile)");
        assert!(ua.mobile);
        assert!(state.extra_comments.is_empty());
    }

    #[test]
    fn test_classify_known_tag_uses_canonical_key() {
        // 测试场景：ctv标记以规范键名smarttv入tags
        let (ua, _) = run("app/1.0 (linux; ctv/1.2)");
        assert_eq!(ua.tags.get("smarttv"), Some(&"1.2".to_string()));
        assert!(!ua.tags.contains_key("ctv"));
    }

    #[test]
    fn test_classify_leftovers_collected() {
        // 测试场景：未匹配token进入对应溢出列表，顺序保留
        let (_, state) = run("app/1.0 (linux; u; something else) unknowntoken/2.0");
        assert_eq!(state.extra_comments.len(), 1);
        assert_eq!(state.extra_comments[0].name, "something else");
        assert_eq!(state.extra_products.len(), 1);
        assert_eq!(state.extra_products[0].name, "unknowntoken");
    }

    #[test]
    fn test_classify_priority_arbitration_between_browsers() {
        // 测试场景：同为浏览器时高优先级者胜出，低优先级不回写
        let (ua, _) = run("mozilla/5.0 (x11) chrome/23.0 safari/537.11");
        assert_eq!(ua.browser.name, "chrome");
        assert_eq!(ua.browser.version, "23.0");
    }

    #[test]
    fn test_classify_device_hint_applied_on_write() {
        // 测试场景：设备精确命中时写入设备并应用类型提示
        let (ua, _) = run("roku/dvp-9.0 (289.00e04144a)");
        assert_eq!(ua.device.name, "roku");
        assert_eq!(ua.device_type, DeviceType::SmartTv);
    }

    #[test]
    fn test_classify_language_from_comment() {
        // 测试场景：语言代码写入结果language字段
        let (ua, _) = run("app/1.0 (linux; es_us)");
        assert_eq!(ua.language, "es_us");
    }
}
