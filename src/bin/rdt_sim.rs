//! 可靠传输协议仿真
//!
//! 在不可靠信道上运行一次 Stop-and-Wait 或 Go-Back-N 会话。
//! 不带 `--protocol` 时进入交互菜单（输入 1 或 2）。

use clap::{Parser, ValueEnum};
use rdtsim_rs::channel::{ChannelConfig, ImpairmentOracle, RandomDraws};
use rdtsim_rs::session::{self, ProtocolKind, SessionConfig};
use rdtsim_rs::sim::SimTime;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProtocolArg {
    StopAndWait,
    GoBackN,
}

#[derive(Debug, Parser)]
#[command(name = "rdt-sim", about = "可靠传输协议仿真：Stop-and-Wait / Go-Back-N 过不可靠信道")]
struct Args {
    /// 协议；缺省时进入交互菜单
    #[arg(long, value_enum)]
    protocol: Option<ProtocolArg>,

    /// 会话内数据包总数
    #[arg(long, default_value_t = 10)]
    total_packets: u64,

    /// Go-Back-N 窗口大小
    #[arg(long, default_value_t = 4)]
    window_size: u64,

    /// 丢包阈值（0..=1，抽样值严格大于阈值才可能丢包）
    #[arg(long, default_value_t = 0.6)]
    loss_threshold: f64,

    /// 损坏阈值（0..=1）
    #[arg(long, default_value_t = 0.6)]
    corrupt_threshold: f64,

    /// 超时时长（秒，逻辑时间）
    #[arg(long, default_value_t = 2)]
    timeout_secs: u64,

    /// 单个数据包的最大传输次数，超过则判投递失败
    #[arg(long, default_value_t = 16)]
    max_tx: u32,

    /// 随机种子；缺省使用系统熵源
    #[arg(long)]
    seed: Option<u64>,

    /// 把会话报告写成 JSON 文件；不填则不生成
    #[arg(long)]
    report_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let protocol = match args.protocol {
        Some(ProtocolArg::StopAndWait) => ProtocolKind::StopAndWait,
        Some(ProtocolArg::GoBackN) => ProtocolKind::GoBackN,
        None => match prompt_protocol() {
            Some(p) => p,
            None => {
                eprintln!("无效选择，请输入 1 或 2。");
                return ExitCode::from(2);
            }
        },
    };

    let cfg = SessionConfig {
        channel: ChannelConfig {
            loss_threshold: args.loss_threshold,
            corrupt_threshold: args.corrupt_threshold,
        },
        timeout: SimTime::from_secs(args.timeout_secs),
        window_size: args.window_size,
        total_packets: args.total_packets,
        max_tx: args.max_tx,
    };

    let draws = match args.seed {
        Some(seed) => RandomDraws::from_seed(seed),
        None => RandomDraws::from_entropy(),
    };
    let mut channel = ImpairmentOracle::new(cfg.channel.clone(), draws);

    let result = match protocol {
        ProtocolKind::StopAndWait => session::run_stop_and_wait(&cfg, &mut channel),
        ProtocolKind::GoBackN => session::run_go_back_n(&cfg, &mut channel),
    };

    match result {
        Ok(report) => {
            println!(
                "session_result delivered {}/{} retransmissions {} elapsed_ns {}",
                report.delivered,
                report.total_packets,
                report.stats.retransmissions,
                report.elapsed_ns
            );
            if let Some(path) = args.report_json {
                let json = serde_json::to_string_pretty(&report).expect("serialize report");
                fs::write(&path, json).expect("write report json");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("会话失败: {err}");
            ExitCode::FAILURE
        }
    }
}

fn prompt_protocol() -> Option<ProtocolKind> {
    println!("请选择要测试的协议:");
    println!("1. Stop-and-Wait");
    println!("2. Go-Back-N");
    print!("输入 1 或 2: ");
    io::stdout().flush().ok();

    let mut line = String::new();
    io::stdin().read_line(&mut line).ok()?;
    match line.trim() {
        "1" => Some(ProtocolKind::StopAndWait),
        "2" => Some(ProtocolKind::GoBackN),
        _ => None,
    }
}
