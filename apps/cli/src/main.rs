//! # SpaceMouse CLI
//!
//! SpaceMouse Pro Wireless 的命令行工具。
//!
//! ```bash
//! # 枚举 USB 设备，查找接收器的 VID/PID
//! spacemouse-cli list
//!
//! # 打印原始中断报文（协议调试）
//! spacemouse-cli dump --seconds 10
//!
//! # 轮询并显示解码后的运动轴/按键状态
//! spacemouse-cli monitor
//!
//! # 非默认接收器
//! spacemouse-cli monitor --vendor-id 0x256f --product-id 0xc62e
//! ```
//!
//! 日志级别通过 `RUST_LOG` 控制（例如 `RUST_LOG=spacemouse_usb=trace`）。

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{DeviceArgs, dump, list, monitor};

/// SpaceMouse CLI - 3D 鼠标命令行工具
#[derive(Parser, Debug)]
#[command(name = "spacemouse-cli")]
#[command(about = "Command-line tools for the 3Dconnexion SpaceMouse Pro Wireless", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 枚举 USB 设备（查找接收器的 VID/PID）
    List,

    /// 打印原始中断报文
    Dump {
        #[command(flatten)]
        device: DeviceArgs,

        /// 采集时长（秒）
        #[arg(short, long, default_value_t = 10)]
        seconds: u64,
    },

    /// 轮询并显示解码后的状态
    Monitor {
        #[command(flatten)]
        device: DeviceArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => list::run(),
        Commands::Dump { device, seconds } => dump::run(&device, seconds),
        Commands::Monitor { device } => monitor::run(&device),
    }
}
