//! 词法提取模块：切分 → 归并 → 产品分组

pub mod grouper;
pub mod lexer;
pub mod merger;

pub use grouper::ProductUnit;
pub use lexer::{CommentBlock, Item, UaToken};
