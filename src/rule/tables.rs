//! 静态识别规则表
//! 仅存储规则数据，无任何业务逻辑；由 RegistryCompiler 编译为查找结构

use super::model::DeviceType;

/// 规则生效的语法上下文（产品前导token / 注释块内token / 两者）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    Product,
    Comment,
    Both,
}

impl RuleSource {
    pub fn in_product(self) -> bool {
        matches!(self, RuleSource::Product | RuleSource::Both)
    }

    pub fn in_comment(self) -> bool {
        matches!(self, RuleSource::Comment | RuleSource::Both)
    }
}

/// 浏览器表：(名称, 优先级, 上下文)
pub(crate) const BROWSERS: &[(&str, u8, RuleSource)] = &[
    ("safari", 1, RuleSource::Product),
    ("mobile safari", 1, RuleSource::Product),
    ("tv safari", 2, RuleSource::Product),
    ("msie", 2, RuleSource::Comment),
    ("firefox", 2, RuleSource::Product),
    ("opera", 2, RuleSource::Both),
    ("chrome", 2, RuleSource::Product),
    ("dalvik", 2, RuleSource::Product),
    ("edge", 3, RuleSource::Product),
    ("silk", 3, RuleSource::Both),
    ("fxios", 3, RuleSource::Both),
    ("lg browser", 3, RuleSource::Product),
    ("opr", 3, RuleSource::Product),
    ("ucbrowser", 3, RuleSource::Product),
    ("applecoremedia", 2, RuleSource::Product),
    ("leanbackshell", 3, RuleSource::Product),
    ("hbbtv", 4, RuleSource::Product),
    ("adobe primetime", 3, RuleSource::Product),
    ("dmost", 3, RuleSource::Product),
    ("youviewhtml", 3, RuleSource::Product),
];

/// 渲染引擎表：(名称, 优先级, 上下文)
pub(crate) const ENGINES: &[(&str, u8, RuleSource)] = &[
    ("applewebkit", 1, RuleSource::Product),
    ("trident", 1, RuleSource::Comment),
    ("gecko", 1, RuleSource::Product),
    ("presto", 1, RuleSource::Product),
    ("exoplayerlib", 1, RuleSource::Product),
    ("cobalt", 1, RuleSource::Product),
];

/// 操作系统表：(名称, 优先级, 上下文)
pub(crate) const OSES: &[(&str, u8, RuleSource)] = &[
    ("linux", 1, RuleSource::Both),
    ("freebsd", 1, RuleSource::Both),
    ("darwin", 1, RuleSource::Both),
    ("android", 2, RuleSource::Both),
    ("windows_nt", 1, RuleSource::Comment),
    ("ios", 2, RuleSource::Both),
    ("tvos", 2, RuleSource::Both),
    ("rokuos", 2, RuleSource::Comment),
];

/// 设备表：(名称, 优先级, 上下文, 设备类型提示)
pub(crate) const DEVICES: &[(&str, u8, RuleSource, DeviceType)] = &[
    ("iphone", 2, RuleSource::Both, DeviceType::Phone),
    ("ipad", 2, RuleSource::Both, DeviceType::Tablet),
    ("ipod", 1, RuleSource::Both, DeviceType::Phone),
    ("ipod touch", 1, RuleSource::Both, DeviceType::Phone),
    ("bb10", 2, RuleSource::Comment, DeviceType::Phone),
    ("roku", 1, RuleSource::Both, DeviceType::SmartTv),
    ("roku 3", 1, RuleSource::Both, DeviceType::SmartTv),
    ("googletv", 1, RuleSource::Both, DeviceType::SmartTv),
    ("fire tv", 1, RuleSource::Both, DeviceType::SmartTv),
    ("xbox", 1, RuleSource::Both, DeviceType::Console),
    ("xbox360", 1, RuleSource::Both, DeviceType::Console),
    ("xbox one", 2, RuleSource::Both, DeviceType::Console),
    ("xboxone", 2, RuleSource::Both, DeviceType::Console),
    ("playstation 4", 1, RuleSource::Comment, DeviceType::Console),
    ("playstation 3", 1, RuleSource::Comment, DeviceType::Console),
    ("fymp", 1, RuleSource::Both, DeviceType::Console),
    ("nintendo switch", 1, RuleSource::Comment, DeviceType::Console),
    ("nintendo wiiu", 1, RuleSource::Comment, DeviceType::Console),
    ("wiiu", 1, RuleSource::Both, DeviceType::Console),
    ("crkey", 2, RuleSource::Product, DeviceType::SmartTv),
    ("kindle", 2, RuleSource::Product, DeviceType::Tablet),
    ("android tv", 2, RuleSource::Both, DeviceType::SmartTv),
    ("android phone", 2, RuleSource::Comment, DeviceType::Phone),
    ("android tablet", 2, RuleSource::Comment, DeviceType::Tablet),
];

/// 跳过表：已知但对识别无意义的token，消耗后不产生任何写入
pub(crate) const SKIPS: &[(&str, u8, RuleSource)] = &[
    ("u", 0, RuleSource::Comment),
    ("x11", 0, RuleSource::Comment),
    ("ubuntu", 0, RuleSource::Comment),
    ("compatible", 0, RuleSource::Comment),
    ("ppc", 0, RuleSource::Comment),
    ("arm", 0, RuleSource::Comment),
    ("touch", 0, RuleSource::Comment),
    ("macintosh", 0, RuleSource::Comment),
    ("x64", 0, RuleSource::Comment),
    ("win64", 0, RuleSource::Comment),
    ("wow64", 0, RuleSource::Comment),
    ("like gecko", 0, RuleSource::Product),
    ("like chrome", 0, RuleSource::Product),
    ("microsoft", 0, RuleSource::Comment),
    ("iemobile", 0, RuleSource::Comment),
    ("nokia", 0, RuleSource::Comment),
    ("build", 0, RuleSource::Comment),
];

/// 语言/区域代码表（注释上下文专用），输入已统一小写
pub(crate) const LANGUAGES: &[&str] = &[
    "en", "en_us", "en-us", "en_gb", "en-gb", "en_ca", "en_au", "en_in",
    "es", "es_es", "es-es", "es_us", "es-us", "es_mx", "es_ar",
    "fr", "fr_fr", "fr-fr", "fr_ca",
    "de", "de_de", "de-de", "de_at",
    "it", "it_it", "it-it",
    "pt", "pt_br", "pt-br", "pt_pt",
    "nl", "nl_nl", "ru", "ru_ru", "ru-ru",
    "pl", "pl_pl", "tr", "tr_tr", "sv", "sv_se",
    "da", "da_dk", "nb", "fi", "fi_fi", "cs", "cs_cz", "hu", "hu_hu",
    "el", "el_gr", "ro", "ro_ro", "uk", "uk_ua",
    "ja", "ja_jp", "ja-jp", "ko", "ko_kr", "ko-kr",
    "zh", "zh_cn", "zh-cn", "zh_tw", "zh-tw", "zh_hk",
    "ar", "he", "th", "th_th", "vi", "vi_vn", "id_id", "hi_in",
];

/// 已知注释标记表：(标记, 规范化键名)；键名为空时以标记自身为键
pub(crate) const KNOWN_TAGS: &[(&str, &str)] = &[
    ("ctv", "smarttv"),
    ("tablet", ""),
    ("stb", ""),
    ("cfnetwork", ""),
    ("alamofire", ""),
    ("nativehost", ""),
    ("omi", ""),
];

/// 设备名规范化表（级联末段的精确重写，右侧均为表的不动点）
pub(crate) const CANONICAL_DEVICES: &[(&str, &str)] = &[
    ("roku 3", "roku"),
    ("playstation 4", "ps4"),
    ("playstation 3", "ps3"),
    ("crkey", "chromecast"),
    ("nintendo wiiu", "wiiu"),
    ("nintendo switch", "switch"),
    ("xboxone", "xbox"),
    ("xbox one", "xbox"),
    ("xbox360", "xbox"),
];

/// 已知产品标识表：(首token, 设备类型, 设备名)
/// 仅在设备类型仍未知时按首token精确命中
pub(crate) const KNOWN_PRODUCTS: &[(&str, DeviceType, &str)] = &[
    ("roku", DeviceType::SmartTv, "roku"),
    ("hbbtv", DeviceType::SmartTv, ""),
    ("xbox", DeviceType::Console, "xbox"),
    ("playstation", DeviceType::Console, ""),
    ("nintendo", DeviceType::Console, ""),
];
