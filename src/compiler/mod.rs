//! 编译模块：静态规则表 → 不可变识别注册表

pub mod compiler;
pub mod recognizer;

pub use compiler::{CompiledRegistry, KnownProduct, RegistryCompiler, shared_registry};
pub use recognizer::{ExactEntry, PrefixHandler, PrefixRule, RecoKind};
