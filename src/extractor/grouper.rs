//! 产品分组器：前导token与其紧随的注释块配对为产品单元

use super::lexer::{CommentBlock, Item, UaToken};

/// 产品单元：前导token + 可选注释块
#[derive(Debug, Clone, Default)]
pub struct ProductUnit {
    pub leading: Option<UaToken>,
    pub comment: Option<CommentBlock>,
}

/// 取归并前序列首个单元的原始文本（去除双引号），用作末段兜底信号
pub(crate) fn first_tag(items: &[Item]) -> String {
    match items.first() {
        Some(Item::Token(tok)) => tok.name.trim_matches('"').to_string(),
        _ => String::new(),
    }
}

/// 遍历归并后的单元序列并分组
///
/// - token后紧随注释块 → 一个产品；
/// - 孤立token → 注释为空的产品；
/// - 无前导token的注释块仅在位于序列最前时被接受（孤立前导注释场景），
///   其余位置的孤立注释丢弃；跳过块不参与分组。
pub(crate) fn group(items: Vec<Item>) -> Vec<ProductUnit> {
    let mut products = Vec::new();
    let mut iter = items.into_iter().peekable();
    let mut leading_position = true;

    while let Some(item) = iter.next() {
        match item {
            Item::Token(tok) => {
                let comment = if matches!(iter.peek(), Some(Item::Comment(_))) {
                    match iter.next() {
                        Some(Item::Comment(block)) => Some(block),
                        _ => None,
                    }
                } else {
                    None
                };
                products.push(ProductUnit {
                    leading: Some(tok),
                    comment,
                });
            }
            Item::Comment(block) => {
                if leading_position {
                    products.push(ProductUnit {
                        leading: None,
                        comment: Some(block),
                    });
                }
            }
            Item::Skip(_) => {}
        }
        leading_position = false;
    }

    products
}
