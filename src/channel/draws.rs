//! 均匀抽样源
//!
//! 判定器每次决策抽取两个 [0,1) 均匀值。抽样源可注入：
//! 真实运行用带种子的 RNG，测试用脚本化的固定序列。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// [0,1) 均匀抽样源
pub trait DrawSource {
    fn next_draw(&mut self) -> f64;
}

/// 基于带种子 RNG 的抽样源。
#[derive(Debug)]
pub struct RandomDraws {
    rng: StdRng,
}

impl RandomDraws {
    /// 固定种子，可复现
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 系统熵源
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl DrawSource for RandomDraws {
    fn next_draw(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// 脚本化抽样源：按序弹出固定值，耗尽后返回 0.0（必然判定为完好）。
#[derive(Debug, Default)]
pub struct ScriptedDraws {
    draws: VecDeque<f64>,
}

impl ScriptedDraws {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }
}

impl DrawSource for ScriptedDraws {
    fn next_draw(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(0.0)
    }
}
