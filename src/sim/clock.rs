//! 逻辑时钟
//!
//! 同步仿真没有事件队列：时间只在会话显式等待（超时）时前进。
//! 用逻辑前进替代真实 sleep，使测试瞬时完成。

use super::time::SimTime;
use tracing::trace;

/// 逻辑时钟：维护会话的当前仿真时间。
#[derive(Debug, Default)]
pub struct LogicalClock {
    now: SimTime,
}

impl LogicalClock {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 前进指定时长（模拟一次阻塞等待）。
    pub fn advance(&mut self, d: SimTime) {
        self.now = self.now.saturating_add(d);
        trace!(now = ?self.now, "时钟前进");
    }
}
