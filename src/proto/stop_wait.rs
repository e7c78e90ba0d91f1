//! Stop-and-Wait（停等）协议引擎
//!
//! 发送端与接收端各持一个 0/1 交替序号。一次只允许一个未确认数据包；
//! 确认成功才翻转序号并推进。

use tracing::{debug, info, warn};

use crate::channel::{Channel, ChannelOutcome};

use super::packet::Packet;

/// ACK 处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwAckOutcome {
    /// 确认匹配，序号已翻转
    Accepted,
    /// ACK 在信道中损坏
    Corrupted,
    /// 序号不匹配（过期/重复确认）
    Mismatch,
}

/// 接收结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwRecvOutcome {
    /// 按序送达，携带确认号
    Delivered { ack: u64 },
    /// 重复/乱序包：回应期望序号的反面
    OutOfOrder { ack: u64 },
    /// 数据包在信道中丢失或损坏，无确认
    Dropped { outcome: ChannelOutcome },
}

/// Stop-and-Wait 发送端
#[derive(Debug, Default)]
pub struct SwSender {
    seq: u64,
}

impl SwSender {
    /// 当前序号（0 或 1）
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// 发送数据包。纯转交信道，不改变状态。
    pub fn send(&self, pkt: &Packet, retransmission: bool) {
        if retransmission {
            info!(seq = pkt.seq, payload = %pkt.payload, "重发数据包");
        } else {
            info!(seq = pkt.seq, payload = %pkt.payload, "发送数据包");
        }
    }

    /// 处理一条确认。只有未损坏且序号匹配的 ACK 才翻转序号。
    pub fn on_ack<C: Channel>(&mut self, ack: u64, channel: &mut C) -> SwAckOutcome {
        if channel.decide() == ChannelOutcome::Corrupted {
            warn!(ack, "ACK 损坏，需重传");
            return SwAckOutcome::Corrupted;
        }
        if ack == self.seq {
            info!(ack, "收到 ACK，切换到下一个数据包");
            self.seq = 1 - self.seq;
            SwAckOutcome::Accepted
        } else {
            warn!(ack, expected = self.seq, "ACK 序号不匹配，需重传");
            SwAckOutcome::Mismatch
        }
    }
}

/// Stop-and-Wait 接收端
#[derive(Debug, Default)]
pub struct SwReceiver {
    expected: u64,
}

impl SwReceiver {
    /// 期望的下一个序号（0 或 1）
    pub fn expected_seq(&self) -> u64 {
        self.expected
    }

    /// 接收一个数据包。先过信道判定；完好且按序才交付上层。
    pub fn receive<C: Channel>(&mut self, pkt: &Packet, channel: &mut C) -> SwRecvOutcome {
        match channel.decide() {
            ChannelOutcome::Lost => {
                warn!(seq = pkt.seq, "数据包丢失");
                SwRecvOutcome::Dropped {
                    outcome: ChannelOutcome::Lost,
                }
            }
            ChannelOutcome::Corrupted => {
                warn!(seq = pkt.seq, "数据包损坏");
                SwRecvOutcome::Dropped {
                    outcome: ChannelOutcome::Corrupted,
                }
            }
            ChannelOutcome::Intact => {
                if pkt.seq == self.expected {
                    info!(seq = pkt.seq, payload = %pkt.payload, "按序收到数据包，回 ACK");
                    let ack = pkt.seq;
                    self.expected = 1 - self.expected;
                    SwRecvOutcome::Delivered { ack }
                } else {
                    debug!(seq = pkt.seq, expected = self.expected, "重复/乱序数据包，回 NACK");
                    SwRecvOutcome::OutOfOrder {
                        ack: 1 - self.expected,
                    }
                }
            }
        }
    }
}
