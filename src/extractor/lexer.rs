//! 词法切分器：将归一化后的 User-Agent 串切分为语法单元序列
//! 输入需已统一小写且`+`已替换为空格（由检测器完成）

/// 单个token：按首个`/`切分出的名称/版本对
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UaToken {
    pub name: String,
    pub version: String,
}

impl UaToken {
    /// 从一段文本解析token（无`/`时版本为空，两侧均去除空白）
    pub fn parse(s: &str) -> Self {
        let mut parts = s.splitn(2, '/');
        let name = parts.next().unwrap_or("").trim().to_string();
        let version = parts.next().unwrap_or("").trim().to_string();
        Self { name, version }
    }
}

/// 注释块：括号区域内按`;`切分出的有序token列表
pub type CommentBlock = Vec<UaToken>;

/// 语法单元（封闭变体，消费方必须穷尽匹配）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// 普通token
    Token(UaToken),
    /// 括号注释块
    Comment(CommentBlock),
    /// 方括号跳过块（内容仅用于配平定界符，不参与识别）
    Skip(String),
}

/// 解析括号注释内部文本（按`;`切分，空段丢弃）
fn parse_comment(s: &str) -> CommentBlock {
    s.split(';')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(UaToken::parse)
        .collect()
}

/// 扫描归一化串，产出语法单元序列
///
/// 状态机三态：普通 / 注释中（括号深度≥1）/ 跳过中（方括号深度≥1），
/// 同类定界符可嵌套计数，异类嵌套不识别。
/// 定界符不配平时不报错：未闭合的注释/跳过内容直接丢弃。
pub(crate) fn tokenize(ua: &str) -> Vec<Item> {
    let mut items = Vec::new();
    let mut in_comment = 0u32;
    let mut in_skip = 0u32;
    let mut span_start: Option<usize> = None;

    for (i, c) in ua.char_indices() {
        if in_comment == 0 && in_skip == 0 {
            match c {
                // 空格是普通态唯一的token冲洗触发
                ' ' => {
                    if let Some(start) = span_start {
                        items.push(Item::Token(UaToken::parse(&ua[start..i])));
                    }
                    span_start = None;
                }
                '(' => {
                    if let Some(start) = span_start {
                        items.push(Item::Token(UaToken::parse(&ua[start..i])));
                    }
                    in_comment = 1;
                    span_start = Some(i + 1);
                }
                // 跳过区不冲洗：其前的未完成片段被放弃
                '[' => {
                    in_skip = 1;
                    span_start = Some(i + 1);
                }
                // 逗号/分号自身不开启片段，也不冲洗已开启的片段
                ',' | ';' => {}
                _ => {
                    if span_start.is_none() {
                        span_start = Some(i);
                    }
                }
            }
        } else if in_comment > 0 {
            if c == ')' {
                in_comment -= 1;
                if in_comment == 0 {
                    if let Some(start) = span_start {
                        let block = parse_comment(&ua[start..i]);
                        // 空内部不产出注释块
                        if !block.is_empty() {
                            items.push(Item::Comment(block));
                        }
                    }
                    span_start = None;
                }
            } else if c == '(' {
                in_comment += 1;
            }
        } else if c == ']' {
            in_skip -= 1;
            if in_skip == 0 {
                if let Some(start) = span_start {
                    items.push(Item::Skip(ua[start..i].to_string()));
                }
                span_start = None;
            }
        } else if c == '[' {
            in_skip += 1;
        }
    }

    // 普通态下残留的片段成为尾部token；未闭合区域内容不冲洗
    if in_comment == 0 && in_skip == 0 {
        if let Some(start) = span_start {
            items.push(Item::Token(UaToken::parse(&ua[start..])));
        }
    }

    items
}
