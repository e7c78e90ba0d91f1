//! 会话统计
//!
//! 定义会话计数器与最终报告（可序列化为 JSON 输出）。

use serde::Serialize;

use super::config::ProtocolKind;

/// 会话统计信息
#[derive(Debug, Default, Clone, Serialize)]
pub struct SessionStats {
    /// 总传输次数（含重传）
    pub packets_sent: u64,
    /// 重传次数
    pub retransmissions: u64,
    /// 整窗重传次数（Go-Back-N）
    pub window_retransmits: u64,
    /// 按序交付上层的包数
    pub packets_delivered: u64,
    /// 信道丢失的包数
    pub packets_lost: u64,
    /// 信道损坏的包数
    pub packets_corrupted: u64,
    /// 被接受的确认数
    pub acks_accepted: u64,
    /// 损坏的确认数
    pub acks_corrupted: u64,
    /// 过期/不匹配的确认数
    pub acks_stale: u64,
    /// 超时等待次数
    pub timeouts: u64,
}

/// 会话结果报告
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub protocol: ProtocolKind,
    pub total_packets: u64,
    pub delivered: u64,
    /// 会话耗费的逻辑时间（纳秒）
    pub elapsed_ns: u64,
    pub stats: SessionStats,
}
