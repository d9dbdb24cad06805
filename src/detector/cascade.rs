//! 启发式级联：分类完成后的有序修正规则
//! 步骤顺序即执行顺序，后续步骤可覆盖前序结果，不可重排

use super::classifier::LeftoverState;
use crate::compiler::CompiledRegistry;
use crate::rule::model::{DeviceType, UserAgent};

/// 级联步骤函数
type Step = fn(&mut UserAgent, &mut LeftoverState, &CompiledRegistry);

/// 步骤表（执行顺序固定）
const STEPS: &[Step] = &[
    os_keyed_corrections,
    tag_classification,
    embedded_app,
    cobalt_console,
    platform_defaults,
    browser_keyed_tv,
    desktop_inference,
    canonicalize_device,
    first_tag_fallback,
];

/// 依序执行全部级联步骤
pub(crate) fn apply(ua: &mut UserAgent, state: &mut LeftoverState, registry: &CompiledRegistry) {
    for step in STEPS {
        step(ua, state, registry);
    }
}

/// 步骤1：按已识别OS名分派的修正
fn os_keyed_corrections(ua: &mut UserAgent, state: &mut LeftoverState, _: &CompiledRegistry) {
    match ua.os.name.as_str() {
        "linux" => {
            if ua.os.version.starts_with("smarttv") {
                ua.device_type = DeviceType::SmartTv;
            }
        }
        "android" => {
            // android惯例：末个未匹配注释token即设备标识
            if ua.device.is_empty() {
                if let Some(mut tok) = state.extra_comments.pop() {
                    if let Some(stripped) = tok.name.strip_suffix(" build") {
                        tok.name = stripped.to_string();
                    }
                    ua.device.force_assign(tok.name, tok.version);
                }
            }

            if ua.tags.contains_key("ctv") {
                ua.device_type = DeviceType::SmartTv;
            }

            if ua.engine.name == "exoplayerlib" && ua.browser.is_empty() {
                ua.browser.name = "exoplayerapp".to_string();
            }

            // 流行设备名前后缀
            if ua.device.name.starts_with("aft") {
                // Amazon Fire TV
                ua.device_type = DeviceType::SmartTv;
            } else if ua.device.name.starts_with("kf") {
                // Amazon Kindle Fire
                ua.device_type = DeviceType::Tablet;
            } else if ua.device.name.ends_with("tv") {
                ua.device_type = DeviceType::SmartTv;
            }
        }
        "windows_nt" => {
            // 旧版IE：浏览器缺失时以rv:捕获值回填
            if ua.browser.is_empty() && !ua.raw_rv.is_empty() {
                ua.browser.name = "msie".to_string();
                ua.browser.version = ua.raw_rv.clone();
            }
        }
        "tvos" => {
            if ua.device.is_empty() {
                ua.device.name = "appletv".to_string();
            }
            ua.device_type = DeviceType::SmartTv;
        }
        "rokuos" => {
            // Cobalt on Roku
            ua.device_type = DeviceType::SmartTv;
            ua.device.name = "roku".to_string();
            ua.os.name.clear();
        }
        _ => {}
    }
}

/// 步骤2：标记派生分类
fn tag_classification(ua: &mut UserAgent, _: &mut LeftoverState, _: &CompiledRegistry) {
    if ua.tags.contains_key("tablet") {
        ua.device_type = DeviceType::Tablet;
    } else if ua.tags.contains_key("mobile") {
        ua.mobile = true;
    }
}

/// 步骤3：iOS内嵌应用（cfnetwork栈）按首token推断设备
fn embedded_app(ua: &mut UserAgent, state: &mut LeftoverState, _: &CompiledRegistry) {
    if !ua.tags.contains_key("cfnetwork") || ua.os.name != "darwin" || !ua.device.is_empty() {
        return;
    }

    let first_tag = state.first_tag.as_str();
    if first_tag.starts_with("appletv") || first_tag.ends_with("tvos") {
        ua.os.name = "tvos".to_string();
        ua.device.name = "appletv".to_string();
        ua.device_type = DeviceType::SmartTv;
    } else {
        ua.mobile = true;
        ua.os.name = "ios".to_string();
        if first_tag.starts_with("ipad") {
            ua.device_type = DeviceType::Tablet;
            ua.device.name = "ipad".to_string();
        } else {
            ua.device_type = DeviceType::Phone;
            if first_tag.starts_with("iphone") {
                ua.device.name = "iphone".to_string();
            }
        }
    }
}

/// 步骤4：Cobalt引擎的下划线产品token推断电视/机顶盒/游戏机
fn cobalt_console(ua: &mut UserAgent, state: &mut LeftoverState, _: &CompiledRegistry) {
    if ua.engine.name != "cobalt" {
        return;
    }

    for product in &state.extra_products {
        let Some(rest) = product.name.strip_prefix('_') else {
            continue;
        };
        let segments: Vec<&str> = rest.split('_').collect();
        match segments[0] {
            "ott" | "atv" | "tv" => ua.device_type = DeviceType::SmartTv,
            "stb" => ua.device_type = DeviceType::SetTop,
            "game" => ua.device_type = DeviceType::Console,
            _ => {}
        }

        if ua.device.is_empty() {
            if segments.len() >= 2 && !segments[1].is_empty() {
                ua.device.name = segments[1].to_string();
            } else {
                ua.device.name = segments[0].to_string();
            }
        }

        if ua.os.name == "darwin" && ua.device.name == "ott" {
            ua.device.name = "appletv".to_string();
        }
    }
}

/// 步骤5：android缺省手机；移动safari改名
fn platform_defaults(ua: &mut UserAgent, _: &mut LeftoverState, _: &CompiledRegistry) {
    if ua.os.name == "android" {
        if ua.device_type == DeviceType::Unknown {
            ua.device_type = DeviceType::Phone;
        }
    } else if ua.browser.name == "safari" && ua.mobile {
        ua.browser.name = "mobile safari".to_string();
    }
}

/// 步骤6：设备类型仍未知时按浏览器名推断电视形态
fn browser_keyed_tv(ua: &mut UserAgent, state: &mut LeftoverState, _: &CompiledRegistry) {
    if ua.device_type != DeviceType::Unknown {
        return;
    }

    match ua.browser.name.as_str() {
        "hbbtv" | "youviewhtml" => ua.device_type = DeviceType::SmartTv,
        // LG Browser/8.00.00 (webOS.TV-2017), _TV_M2R/05.80.02 (LG, 43LJ5500-SA, wireless)
        "lg browser" => {
            const LG_TV_MARKERS: &[&str] = &[
                "_tv_",
                "lg netcast.tv",
                "webos.tv",
                "lg simplesmart.tv",
                "lg netcast.media",
            ];
            for product in &state.extra_products {
                if LG_TV_MARKERS.iter().any(|m| product.name.starts_with(m)) {
                    ua.device_type = DeviceType::SmartTv;
                }
            }
        }
        // opera电视版（omi运行时 + 嵌入式linux）
        "opr" => {
            if ua.tags.contains_key("omi")
                && ua.os.name == "linux"
                && (ua.os.version.starts_with("armv") || ua.os.version == "mips")
            {
                ua.device_type = DeviceType::SmartTv;
            }
        }
        _ => {}
    }

    // 浏览器分支未定型时的OS兜底
    if ua.device_type == DeviceType::Unknown {
        if ua.os.name == "ios" {
            ua.device_type = DeviceType::Phone;
        } else if ua.os.name == "tizen" {
            ua.device_type = DeviceType::SmartTv;
        }
    }
}

/// 步骤7：桌面推断
fn desktop_inference(ua: &mut UserAgent, _: &mut LeftoverState, _: &CompiledRegistry) {
    if ua.device_type != DeviceType::Unknown || ua.mobile || ua.browser.is_empty() {
        return;
    }

    match ua.os.name.as_str() {
        "windows_nt" | "macosx" | "chromeos" => ua.device_type = DeviceType::Desktop,
        "linux" => {
            if ua.os.version.starts_with("x86_64") || ua.os.version == "i686" {
                ua.device_type = DeviceType::Desktop;
            }
        }
        _ => {}
    }
}

/// 步骤8：设备名规范化（精确重写表）
fn canonicalize_device(ua: &mut UserAgent, _: &mut LeftoverState, registry: &CompiledRegistry) {
    if let Some(canonical) = registry.canonical_devices.get(&ua.device.name) {
        ua.device.name = canonical.clone();
    }
}

/// 步骤9：末段兜底，仅在设备类型仍未知时嗅探首token
fn first_tag_fallback(ua: &mut UserAgent, state: &mut LeftoverState, registry: &CompiledRegistry) {
    if ua.device_type != DeviceType::Unknown || state.first_tag.is_empty() {
        return;
    }

    let name = state.first_tag.as_str();
    if let Some(known) = registry.known_products.get(name) {
        ua.device_type = known.device_type;
        if ua.device.is_empty() {
            ua.device.name = known.device_name.to_string();
        }
    } else if name.starts_with("appletv") {
        ua.device.name = "appletv".to_string();
        ua.device_type = DeviceType::SmartTv;
    } else if name.starts_with("iphone") || name.starts_with("ipod") {
        ua.os.name = "ios".to_string();
        ua.device.name = "iphone".to_string();
        ua.device_type = DeviceType::Phone;
    } else if name.starts_with("ipad") {
        ua.os.name = "ios".to_string();
        ua.device.name = "ipad".to_string();
        ua.device_type = DeviceType::Tablet;
    } else if name.starts_with("androidtv") {
        ua.device.name = "androidtv".to_string();
        ua.device_type = DeviceType::SmartTv;
    } else if name.starts_with("android") {
        ua.os.name = "android".to_string();
        ua.device_type = DeviceType::Phone;
    }
}
