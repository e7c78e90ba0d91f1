//! 损伤判定器
//!
//! 每个传输单元（数据包或 ACK）独立判定一次：完好、丢失或损坏。
//! 判定规则：抽取丢包值 `a` 与损坏值 `b`；仅当 `a > b` 且 `a` 超过
//! 丢包阈值时丢失；仅当 `b > a` 且 `b` 超过损坏阈值时损坏；其余完好。
//! `a == b` 恒为完好。

use std::collections::VecDeque;

use super::config::ChannelConfig;
use super::draws::DrawSource;

/// 单次传输的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOutcome {
    /// 完好送达
    Intact,
    /// 丢失
    Lost,
    /// 损坏
    Corrupted,
}

/// 信道：对每个传输单元给出判定。
pub trait Channel {
    fn decide(&mut self) -> ChannelOutcome;
}

/// 基于抽样比较的判定器。
#[derive(Debug)]
pub struct ImpairmentOracle<S> {
    cfg: ChannelConfig,
    draws: S,
}

impl<S: DrawSource> ImpairmentOracle<S> {
    pub fn new(cfg: ChannelConfig, draws: S) -> Self {
        Self { cfg, draws }
    }
}

impl<S: DrawSource> Channel for ImpairmentOracle<S> {
    fn decide(&mut self) -> ChannelOutcome {
        let loss = self.draws.next_draw();
        let corrupt = self.draws.next_draw();

        if loss > corrupt {
            if loss > self.cfg.loss_threshold {
                return ChannelOutcome::Lost;
            }
        } else if corrupt > loss {
            if corrupt > self.cfg.corrupt_threshold {
                return ChannelOutcome::Corrupted;
            }
        }
        ChannelOutcome::Intact
    }
}

/// 脚本化信道：按序返回固定判定，耗尽后恒为完好。测试用。
#[derive(Debug, Default)]
pub struct ScriptedOutcomes {
    outcomes: VecDeque<ChannelOutcome>,
}

impl ScriptedOutcomes {
    pub fn new(outcomes: impl IntoIterator<Item = ChannelOutcome>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }
}

impl Channel for ScriptedOutcomes {
    fn decide(&mut self) -> ChannelOutcome {
        self.outcomes.pop_front().unwrap_or(ChannelOutcome::Intact)
    }
}
