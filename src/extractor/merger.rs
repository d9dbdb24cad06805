//! token归并器：还原被空格切散的多词厂商标识
//! 连续无版本token遇到带版本token或注释/跳过边界时，按序并入边界侧token

use super::lexer::Item;

/// 单元在归并扫描中的角色
#[derive(Clone, Copy)]
enum Role {
    // 普通token（是否带版本）
    Token { versioned: bool },
    // 注释块或跳过块
    Boundary,
}

/// 将 `[start, end)` 区间内的token名称依次并入 `slots[end]`
///
/// 区间内条目清空；目标不是token时仅丢弃累积的前缀。
fn fold(slots: &mut [Option<Item>], run_start: &mut Option<usize>, end: usize) {
    let Some(start) = *run_start else {
        return;
    };

    let mut prefix = String::new();
    for slot in slots.iter_mut().take(end).skip(start) {
        if let Some(Item::Token(tok)) = slot {
            if !prefix.is_empty() {
                prefix.push(' ');
            }
            prefix.push_str(&tok.name);
        }
        *slot = None;
    }

    if !prefix.is_empty() {
        if let Some(Item::Token(tok)) = &mut slots[end] {
            tok.name = format!("{} {}", prefix, tok.name);
        }
    }

    *run_start = None;
}

/// 归并扫描：左到右维护"连续无版本token"的起点
///
/// - 带版本token：将其前的连续无版本token并入自身；
/// - 注释/跳过块：将连续无版本token并入块前紧邻的token；
/// - 序列末尾的残留连续token并入最后一个token。
pub(crate) fn merge(items: Vec<Item>) -> Vec<Item> {
    let mut slots: Vec<Option<Item>> = items.into_iter().map(Some).collect();
    let mut run_start: Option<usize> = None;

    for i in 0..slots.len() {
        let role = match &slots[i] {
            Some(Item::Token(tok)) => Role::Token {
                versioned: !tok.version.is_empty(),
            },
            Some(Item::Comment(_)) | Some(Item::Skip(_)) => Role::Boundary,
            None => continue,
        };

        match role {
            Role::Token { versioned } => {
                if run_start.is_none() {
                    run_start = Some(i);
                }
                if versioned {
                    fold(&mut slots, &mut run_start, i);
                }
            }
            Role::Boundary => {
                if i > 0 {
                    fold(&mut slots, &mut run_start, i - 1);
                }
                run_start = None;
            }
        }
    }

    // 残留连续token并入末尾token
    if run_start.is_some() && !slots.is_empty() {
        let end = slots.len() - 1;
        fold(&mut slots, &mut run_start, end);
    }

    slots.into_iter().flatten().collect()
}
