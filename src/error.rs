//! 全局错误类型定义

use thiserror::Error;
use serde_json::Error as SerdeJsonError;

#[derive(Error, Debug)]
pub enum RsuaError {
    // 输入相关错误
    #[error("无效输入：{0}")]
    InvalidInput(String),

    // 序列化/反序列化错误
    #[error("JSON序列化失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 一致性校验错误（校验器对解析结果的事后检查）
    #[error("一致性校验失败：输入含\"{marker}\"但设备名为空")]
    DeviceNameMissing { marker: &'static str },
    #[error("一致性校验失败：输入含\"{marker}\"但设备名为\"{actual}\"")]
    DeviceMismatch { marker: &'static str, actual: String },
    #[error("一致性校验失败：输入含\"{marker}\"但操作系统为\"{actual}\"")]
    OsMismatch { marker: &'static str, actual: String },
    #[error("一致性校验失败：输入含\"{marker}\"但设备类型不符")]
    DeviceTypeMismatch { marker: &'static str },
}

// 全局Result类型
pub type RsuaResult<T> = Result<T, RsuaError>;
