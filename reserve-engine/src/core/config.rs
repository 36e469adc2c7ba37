use shared::types::{MAX_SPILL_MINUTES, MIN_BLOCK_MINUTES, Minute, SNAP_STEP_MINUTES};

/// Engine configuration
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | SNAP_STEP_MINUTES | 5 | 时间轴网格步长（分钟） |
/// | MIN_BLOCK_MINUTES | 15 | 预订块最小时长（分钟） |
/// | MAX_SPILL_MINUTES | 360 | 跨午夜延长上限（分钟） |
/// | CHANNEL_CAPACITY | 1024 | 变更通知通道容量 |
///
/// # 示例
///
/// ```ignore
/// SNAP_STEP_MINUTES=10 MIN_BLOCK_MINUTES=30 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Grid step; pointer positions and stored windows snap to this
    pub snap_step_minutes: Minute,
    /// Floor below which no block may shrink
    pub min_block_minutes: Minute,
    /// Cap on next-day spillover past midnight
    pub max_spill_minutes: Minute,
    /// Capacity of the adjustment change-notification channel
    pub channel_capacity: usize,
}

impl EngineConfig {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            snap_step_minutes: std::env::var("SNAP_STEP_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(SNAP_STEP_MINUTES),
            min_block_minutes: std::env::var("MIN_BLOCK_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MIN_BLOCK_MINUTES),
            max_spill_minutes: std::env::var("MAX_SPILL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_SPILL_MINUTES),
            channel_capacity: std::env::var("CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_step_minutes: SNAP_STEP_MINUTES,
            min_block_minutes: MIN_BLOCK_MINUTES,
            max_spill_minutes: MAX_SPILL_MINUTES,
            channel_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.snap_step_minutes, 5);
        assert_eq!(config.min_block_minutes, 15);
        assert_eq!(config.max_spill_minutes, 360);
    }
}
