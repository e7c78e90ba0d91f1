//! 信道损伤模块
//!
//! 此模块包含不可靠信道的核心组件：损伤判定结果、阈值配置、
//! 随机抽样源与判定器（oracle）。

// 子模块声明
mod config;
mod draws;
mod oracle;

// 重新导出公共接口
pub use config::ChannelConfig;
pub use draws::{DrawSource, RandomDraws, ScriptedDraws};
pub use oracle::{Channel, ChannelOutcome, ImpairmentOracle, ScriptedOutcomes};
