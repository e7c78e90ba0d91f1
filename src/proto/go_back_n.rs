//! Go-Back-N（回退 N）协议引擎
//!
//! 发送端维护 `[base, next_seq)` 的滑动窗口，每个在途序号挂一个重传
//! 定时器；确认是累计语义（ACK n 确认所有 ≤ n 的序号）。接收端不缓存
//! 乱序包，只推进单一期望序号并重申累计位置。

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::channel::{Channel, ChannelOutcome};
use crate::sim::SimTime;

use super::packet::Packet;

/// 在途序号的定时器记录
#[derive(Debug, Clone, Copy)]
pub struct TimerEntry {
    /// 最近一次（重）传输时刻
    pub armed_at: SimTime,
    /// 累计传输次数
    pub tx_count: u32,
}

/// ACK 处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GbnAckOutcome {
    /// 累计确认，窗口前移
    Advanced { newly_acked: u64 },
    /// ACK 损坏，已重传整个窗口
    Corrupted { resent: u64 },
    /// 过期/重复确认，忽略
    Stale,
}

/// 接收结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GbnRecvOutcome {
    /// 按序送达，携带累计确认号
    Delivered { ack: u64 },
    /// 乱序包：重申最后正确收到的累计位置；尚未收到任何包时无可重申
    OutOfOrder { ack: Option<u64> },
    /// 数据包在信道中丢失或损坏，无确认
    Dropped { outcome: ChannelOutcome },
}

/// Go-Back-N 发送端
#[derive(Debug)]
pub struct GbnSender {
    base: u64,
    next_seq: u64,
    window_size: u64,
    total_packets: u64,
    timeout: SimTime,
    packets: Vec<Packet>,
    timers: BTreeMap<u64, TimerEntry>,
}

impl GbnSender {
    pub fn new(window_size: u64, total_packets: u64, timeout: SimTime) -> Self {
        let packets = (0..total_packets)
            .map(|seq| Packet::new(seq, format!("Message {}", seq + 1)))
            .collect();
        Self {
            base: 0,
            next_seq: 0,
            window_size,
            total_packets,
            timeout,
            packets,
            timers: BTreeMap::new(),
        }
    }

    /// 最老的未确认序号（窗口左沿）
    pub fn base(&self) -> u64 {
        self.base
    }

    /// 下一个待发送序号
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn window_size(&self) -> u64 {
        self.window_size
    }

    pub fn total_packets(&self) -> u64 {
        self.total_packets
    }

    /// 全部数据包均已确认
    pub fn all_acked(&self) -> bool {
        self.base >= self.total_packets
    }

    /// 窗口尚有空位且还有新数据可发
    pub fn can_send(&self) -> bool {
        self.next_seq < self.base + self.window_size && self.next_seq < self.total_packets
    }

    /// 在途（未确认）序号数
    pub fn outstanding(&self) -> usize {
        self.timers.len()
    }

    /// 指定序号的定时器记录
    pub fn timer(&self, seq: u64) -> Option<&TimerEntry> {
        self.timers.get(&seq)
    }

    pub fn packet(&self, seq: u64) -> &Packet {
        &self.packets[seq as usize]
    }

    /// 发送 `next_seq` 处的数据包：挂定时器并推进 `next_seq`。
    pub fn send_next(&mut self, now: SimTime) -> &Packet {
        debug_assert!(self.can_send(), "窗口已满或无数据可发");
        let seq = self.next_seq;
        self.timers.insert(
            seq,
            TimerEntry {
                armed_at: now,
                tx_count: 1,
            },
        );
        self.next_seq += 1;
        let pkt = &self.packets[seq as usize];
        info!(seq = pkt.seq, payload = %pkt.payload, "发送数据包");
        pkt
    }

    /// 重传整个窗口，每个包重置定时器并累加传输计数。返回重发的包数。
    pub fn retransmit_window(&mut self, now: SimTime) -> u64 {
        // 重传范围不越过 next_seq：窗口填充先行，二者在会话中相等。
        let end = self
            .next_seq
            .min(self.base + self.window_size)
            .min(self.total_packets);
        info!(base = self.base, end, "重传窗口");
        let mut resent = 0;
        for seq in self.base..end {
            let pkt = &self.packets[seq as usize];
            info!(seq = pkt.seq, payload = %pkt.payload, "重发数据包");
            let entry = self.timers.entry(seq).or_insert(TimerEntry {
                armed_at: now,
                tx_count: 0,
            });
            entry.armed_at = now;
            entry.tx_count += 1;
            resent += 1;
        }
        resent
    }

    /// 处理一条确认。损坏的 ACK 触发整窗重传；`ack >= base` 按累计语义
    /// 前移窗口并丢弃已确认序号的定时器；更早的 ACK 忽略。
    pub fn on_ack<C: Channel>(&mut self, ack: u64, channel: &mut C, now: SimTime) -> GbnAckOutcome {
        if channel.decide() == ChannelOutcome::Corrupted {
            warn!(ack, "ACK 损坏，重传窗口");
            let resent = self.retransmit_window(now);
            return GbnAckOutcome::Corrupted { resent };
        }
        if ack >= self.base {
            let newly_acked = ack + 1 - self.base;
            self.base = ack + 1;
            self.timers.retain(|&seq, _| seq > ack);
            info!(ack, base = self.base, "收到累计 ACK，窗口前移");
            GbnAckOutcome::Advanced { newly_acked }
        } else {
            debug!(ack, base = self.base, "过期/重复 ACK，忽略");
            GbnAckOutcome::Stale
        }
    }

    /// 检查在途定时器。发现第一个到期的即整窗重传一次并停止检查
    /// （一次检查至多触发一次重传）。返回重发的包数。
    ///
    /// 逻辑时钟恰好落在超时边界上，故到期判定取 `elapsed >= timeout`。
    pub fn check_timeout(&mut self, now: SimTime) -> Option<u64> {
        let expired = self
            .timers
            .iter()
            .find(|(_, entry)| now.elapsed_since(entry.armed_at) >= self.timeout)
            .map(|(&seq, _)| seq);
        let seq = expired?;
        warn!(seq, "定时器超时，重传窗口");
        Some(self.retransmit_window(now))
    }

    /// 传输次数超过 `max_tx` 的第一个在途序号（及其计数）。
    pub fn over_tx_limit(&self, max_tx: u32) -> Option<(u64, u32)> {
        self.timers
            .iter()
            .find(|(_, entry)| entry.tx_count > max_tx)
            .map(|(&seq, entry)| (seq, entry.tx_count))
    }
}

/// Go-Back-N 接收端
#[derive(Debug, Default)]
pub struct GbnReceiver {
    expected: u64,
}

impl GbnReceiver {
    /// 期望的下一个序号
    pub fn expected_seq(&self) -> u64 {
        self.expected
    }

    /// 已按序交付的包数
    pub fn delivered(&self) -> u64 {
        self.expected
    }

    /// 接收一个数据包。先过信道判定；只有完好且序号恰为期望值才交付，
    /// 乱序包重申累计位置 `expected - 1`（尚未交付任何包时按"无确认"处理）。
    pub fn receive<C: Channel>(&mut self, pkt: &Packet, channel: &mut C) -> GbnRecvOutcome {
        match channel.decide() {
            ChannelOutcome::Lost => {
                warn!(seq = pkt.seq, "数据包丢失");
                GbnRecvOutcome::Dropped {
                    outcome: ChannelOutcome::Lost,
                }
            }
            ChannelOutcome::Corrupted => {
                warn!(seq = pkt.seq, "数据包损坏");
                GbnRecvOutcome::Dropped {
                    outcome: ChannelOutcome::Corrupted,
                }
            }
            ChannelOutcome::Intact => {
                if pkt.seq == self.expected {
                    info!(seq = pkt.seq, payload = %pkt.payload, "按序收到数据包，回 ACK");
                    let ack = pkt.seq;
                    self.expected += 1;
                    GbnRecvOutcome::Delivered { ack }
                } else {
                    let ack = self.expected.checked_sub(1);
                    debug!(seq = pkt.seq, expected = self.expected, ?ack, "乱序数据包，重申累计 ACK");
                    GbnRecvOutcome::OutOfOrder { ack }
                }
            }
        }
    }
}
