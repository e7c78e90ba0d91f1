//! 会话错误类型
//!
//! 丢包/损坏/乱序属于正常协议事件，不在此列；这里只有配置错误
//! 与超过重传上限的终态失败。

use thiserror::Error;

/// 会话错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// 配置无效，会话拒绝启动
    #[error("配置无效: {reason}")]
    InvalidConfig { reason: &'static str },

    /// 某个数据包的传输次数超过上限
    #[error("seq {seq} 传输 {attempts} 次后仍未确认，投递失败")]
    DeliveryFailed { seq: u64, attempts: u32 },
}
