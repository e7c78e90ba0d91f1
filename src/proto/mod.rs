//! 协议引擎模块
//!
//! 包含 Stop-and-Wait / Go-Back-N 两个可靠传输引擎的实现（用于信道仿真）。

// 子模块声明
mod go_back_n;
mod packet;
mod stop_wait;

// 重新导出公共接口
pub use go_back_n::{GbnAckOutcome, GbnReceiver, GbnRecvOutcome, GbnSender, TimerEntry};
pub use packet::Packet;
pub use stop_wait::{SwAckOutcome, SwReceiver, SwRecvOutcome, SwSender};
