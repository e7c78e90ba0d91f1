//! 会话模块
//!
//! 包含会话配置、统计、错误类型与驱动协议引擎跑完整个会话的 runner。

// 子模块声明
mod config;
mod error;
mod runner;
mod stats;

// 重新导出公共接口
pub use config::{ProtocolKind, SessionConfig};
pub use error::SessionError;
pub use runner::{run_go_back_n, run_stop_and_wait};
pub use stats::{SessionReport, SessionStats};
