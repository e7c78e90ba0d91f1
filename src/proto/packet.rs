//! 数据包类型
//!
//! 定义协议数据包。构造后不可变；同一会话内重传的包保持相同序号与载荷。

/// 协议数据包
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub seq: u64,
    pub payload: String,
}

impl Packet {
    pub fn new(seq: u64, payload: impl Into<String>) -> Packet {
        Packet {
            seq,
            payload: payload.into(),
        }
    }
}
