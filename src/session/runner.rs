//! 会话 runner
//!
//! 同步驱动一个协议引擎跑完整个会话：所有包确认则成功返回报告，
//! 超过重传上限则以投递失败终止。没有事件队列——发送、信道判定、
//! 确认处理在一次会话内严格顺序执行，时间只在超时等待时前进。

use tracing::info;

use crate::channel::{Channel, ChannelOutcome};
use crate::proto::{
    GbnAckOutcome, GbnReceiver, GbnRecvOutcome, GbnSender, Packet, SwAckOutcome, SwReceiver,
    SwRecvOutcome, SwSender,
};
use crate::sim::{LogicalClock, SimTime};

use super::config::{ProtocolKind, SessionConfig};
use super::error::SessionError;
use super::stats::{SessionReport, SessionStats};

fn note_drop(stats: &mut SessionStats, outcome: ChannelOutcome) {
    match outcome {
        ChannelOutcome::Lost => stats.packets_lost += 1,
        ChannelOutcome::Corrupted => stats.packets_corrupted += 1,
        ChannelOutcome::Intact => {}
    }
}

/// 运行一个 Stop-and-Wait 会话。
///
/// 每个数据包为一轮：发送、接收；无确认则等待一个超时后重发一次再收。
/// 轮次以 `max_tx` 为上限，超过即投递失败。
#[tracing::instrument(skip(cfg, channel))]
pub fn run_stop_and_wait<C: Channel>(
    cfg: &SessionConfig,
    channel: &mut C,
) -> Result<SessionReport, SessionError> {
    cfg.validate()?;

    let mut clock = LogicalClock::default();
    let mut sender = SwSender::default();
    let mut receiver = SwReceiver::default();
    let mut stats = SessionStats::default();

    info!(total = cfg.total_packets, "▶️  开始 Stop-and-Wait 会话");

    for i in 0..cfg.total_packets {
        let pkt = Packet::new(sender.seq(), format!("Message {}", i + 1));
        let mut rounds: u32 = 0;
        loop {
            if rounds >= cfg.max_tx {
                return Err(SessionError::DeliveryFailed {
                    seq: i,
                    attempts: rounds,
                });
            }
            rounds += 1;

            sender.send(&pkt, rounds > 1);
            stats.packets_sent += 1;
            if rounds > 1 {
                stats.retransmissions += 1;
            }

            let mut recv = receiver.receive(&pkt, channel);
            if let SwRecvOutcome::Dropped { outcome } = recv {
                // 等一个超时，重发一次再收
                note_drop(&mut stats, outcome);
                stats.timeouts += 1;
                clock.advance(cfg.timeout);
                sender.send(&pkt, true);
                stats.packets_sent += 1;
                stats.retransmissions += 1;
                recv = receiver.receive(&pkt, channel);
            }

            let ack = match recv {
                SwRecvOutcome::Delivered { ack } => {
                    stats.packets_delivered += 1;
                    Some(ack)
                }
                SwRecvOutcome::OutOfOrder { ack } => Some(ack),
                SwRecvOutcome::Dropped { outcome } => {
                    note_drop(&mut stats, outcome);
                    stats.timeouts += 1;
                    clock.advance(cfg.timeout);
                    None
                }
            };

            if let Some(ack) = ack {
                match sender.on_ack(ack, channel) {
                    SwAckOutcome::Accepted => {
                        stats.acks_accepted += 1;
                        break;
                    }
                    SwAckOutcome::Corrupted => {
                        stats.acks_corrupted += 1;
                        stats.timeouts += 1;
                        clock.advance(cfg.timeout);
                    }
                    SwAckOutcome::Mismatch => {
                        stats.acks_stale += 1;
                        stats.timeouts += 1;
                        clock.advance(cfg.timeout);
                    }
                }
            }
        }
    }

    info!(
        delivered = stats.packets_delivered,
        elapsed = ?clock.now(),
        "✅ 会话完成，全部数据包已确认"
    );

    Ok(SessionReport {
        protocol: ProtocolKind::StopAndWait,
        total_packets: cfg.total_packets,
        delivered: stats.packets_delivered,
        elapsed_ns: clock.now().0,
        stats,
    })
}

fn apply_gbn_ack<C: Channel>(
    sender: &mut GbnSender,
    stats: &mut SessionStats,
    ack: u64,
    channel: &mut C,
    now: SimTime,
) {
    match sender.on_ack(ack, channel, now) {
        GbnAckOutcome::Advanced { .. } => stats.acks_accepted += 1,
        GbnAckOutcome::Corrupted { resent } => {
            stats.acks_corrupted += 1;
            stats.window_retransmits += 1;
            stats.retransmissions += resent;
            stats.packets_sent += resent;
        }
        GbnAckOutcome::Stale => stats.acks_stale += 1,
    }
}

/// 运行一个 Go-Back-N 会话。
///
/// 外层循环：填满窗口，再按进入投递段时的 `[base, next_seq)` 快照逐包
/// 投递；任何一次丢失/损坏都等待一个超时、检查定时器并中断本段。
/// 每轮结束后再检查一次定时器，并核对单包传输上限。
#[tracing::instrument(skip(cfg, channel))]
pub fn run_go_back_n<C: Channel>(
    cfg: &SessionConfig,
    channel: &mut C,
) -> Result<SessionReport, SessionError> {
    cfg.validate()?;

    let mut clock = LogicalClock::default();
    let mut sender = GbnSender::new(cfg.window_size, cfg.total_packets, cfg.timeout);
    let mut receiver = GbnReceiver::default();
    let mut stats = SessionStats::default();

    info!(
        total = cfg.total_packets,
        window = cfg.window_size,
        "▶️  开始 Go-Back-N 会话"
    );

    while !sender.all_acked() {
        // 填满窗口
        while sender.can_send() {
            sender.send_next(clock.now());
            stats.packets_sent += 1;
        }

        // 投递当前窗口；范围在进入时快照，与基准前移解耦
        for seq in sender.base()..sender.next_seq() {
            let pkt = sender.packet(seq).clone();
            match receiver.receive(&pkt, channel) {
                GbnRecvOutcome::Delivered { ack } => {
                    stats.packets_delivered += 1;
                    apply_gbn_ack(&mut sender, &mut stats, ack, channel, clock.now());
                }
                GbnRecvOutcome::OutOfOrder { ack: Some(ack) } => {
                    apply_gbn_ack(&mut sender, &mut stats, ack, channel, clock.now());
                }
                GbnRecvOutcome::OutOfOrder { ack: None } => {
                    // 接收端尚未交付任何包，无累计位置可重申：当作无确认，
                    // 走超时重传路径恢复
                    stats.timeouts += 1;
                    clock.advance(cfg.timeout);
                    if let Some(resent) = sender.check_timeout(clock.now()) {
                        stats.window_retransmits += 1;
                        stats.retransmissions += resent;
                        stats.packets_sent += resent;
                    }
                    break;
                }
                GbnRecvOutcome::Dropped { outcome } => {
                    note_drop(&mut stats, outcome);
                    stats.timeouts += 1;
                    clock.advance(cfg.timeout);
                    if let Some(resent) = sender.check_timeout(clock.now()) {
                        stats.window_retransmits += 1;
                        stats.retransmissions += resent;
                        stats.packets_sent += resent;
                    }
                    break;
                }
            }
        }

        // 捕捉与显式丢包信号无关的到期定时器
        if let Some(resent) = sender.check_timeout(clock.now()) {
            stats.window_retransmits += 1;
            stats.retransmissions += resent;
            stats.packets_sent += resent;
        }

        if let Some((seq, attempts)) = sender.over_tx_limit(cfg.max_tx) {
            return Err(SessionError::DeliveryFailed { seq, attempts });
        }
    }

    info!(
        delivered = stats.packets_delivered,
        elapsed = ?clock.now(),
        "✅ 会话完成，全部数据包已确认"
    );

    Ok(SessionReport {
        protocol: ProtocolKind::GoBackN,
        total_packets: cfg.total_packets,
        delivered: stats.packets_delivered,
        elapsed_ns: clock.now().0,
        stats,
    })
}
