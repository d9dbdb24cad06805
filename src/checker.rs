//! 一致性校验器：解析结果与原始输入的事后交叉检查
//! 用于批量回归与规则表变更后的抽检，不参与解析流程

use crate::error::{RsuaError, RsuaResult};
use crate::rule::model::{DeviceType, UserAgent};

/// 一致性校验器
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// 校验解析结果与原始输入是否一致
    ///
    /// 检查项按序执行，首个不一致即返回错误。
    pub fn validate(raw: &str, ua: &UserAgent) -> RsuaResult<()> {
        let lowered = raw.to_lowercase();

        // 1. iOS设备标识出现时设备名不应为空
        for marker in ["ipad", "iphone"] {
            if lowered.contains(marker) && ua.device.is_empty() {
                return Err(RsuaError::DeviceNameMissing { marker });
            }
        }

        // 2. Apple TV标识出现时设备名应为appletv
        for marker in ["apple_tv", "appletv", "apple tv"] {
            if lowered.contains(marker) && ua.device.name != "appletv" {
                return Err(RsuaError::DeviceMismatch {
                    marker,
                    actual: ua.device.name.clone(),
                });
            }
        }

        // 3. tvos标识出现时OS应为tvos
        if lowered.contains("tvos") && ua.os.name != "tvos" {
            return Err(RsuaError::OsMismatch {
                marker: "tvos",
                actual: ua.os.name.clone(),
            });
        }

        // 4. tv字样出现时应已判为电视或至少识别出设备名
        if lowered.contains("tv")
            && ua.device_type != DeviceType::SmartTv
            && ua.device.is_empty()
        {
            return Err(RsuaError::DeviceTypeMismatch { marker: "tv" });
        }

        // 5. tablet字样出现时设备类型应为平板
        if lowered.contains("tablet") && ua.device_type != DeviceType::Tablet {
            return Err(RsuaError::DeviceTypeMismatch { marker: "tablet" });
        }

        Ok(())
    }

    /// 布尔形式的校验
    pub fn check(raw: &str, ua: &UserAgent) -> bool {
        Self::validate(raw, ua).is_ok()
    }
}
