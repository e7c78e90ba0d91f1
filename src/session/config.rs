//! 会话配置
//!
//! 一个会话的全部可调参数；显式传给 runner 与引擎构造器，
//! 便于测试隔离与确定性注入。

use serde::{Deserialize, Serialize};

use crate::channel::ChannelConfig;
use crate::sim::SimTime;

use super::error::SessionError;

/// 协议类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolKind {
    StopAndWait,
    GoBackN,
}

/// 会话配置
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// 信道损伤阈值
    pub channel: ChannelConfig,
    /// 超时时长
    pub timeout: SimTime,
    /// Go-Back-N 窗口大小
    pub window_size: u64,
    /// 会话内数据包总数
    pub total_packets: u64,
    /// 单个数据包的最大传输次数，超过则判投递失败
    pub max_tx: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            channel: ChannelConfig::default(),
            timeout: SimTime::from_secs(2),
            window_size: 4,
            total_packets: 10,
            max_tx: 16,
        }
    }
}

impl SessionConfig {
    /// 校验配置；会话开始前调用。
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.window_size == 0 {
            return Err(SessionError::InvalidConfig {
                reason: "window_size 必须为正",
            });
        }
        if self.total_packets == 0 {
            return Err(SessionError::InvalidConfig {
                reason: "total_packets 必须为正",
            });
        }
        if self.timeout == SimTime::ZERO {
            return Err(SessionError::InvalidConfig {
                reason: "timeout 必须为正",
            });
        }
        if self.max_tx == 0 {
            return Err(SessionError::InvalidConfig {
                reason: "max_tx 必须为正",
            });
        }
        for t in [
            self.channel.loss_threshold,
            self.channel.corrupt_threshold,
        ] {
            if !(0.0..=1.0).contains(&t) {
                return Err(SessionError::InvalidConfig {
                    reason: "损伤阈值必须在 [0,1] 内",
                });
            }
        }
        Ok(())
    }
}
