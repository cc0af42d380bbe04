//! 子命令实现

pub mod dump;
pub mod list;
pub mod monitor;

use anyhow::{Context, Result, bail};
use clap::Args;
use spacemouse_driver::SpaceMouseConfig;

/// 接收器选择参数（所有需要打开设备的子命令共用）
#[derive(Args, Debug)]
pub struct DeviceArgs {
    /// USB Vendor ID（十六进制，如 0x256f）
    #[arg(long, default_value = "0x256f", value_parser = parse_hex_id)]
    pub vendor_id: u16,

    /// USB Product ID（十六进制，如 0xc652）
    #[arg(long, default_value = "0xc652", value_parser = parse_hex_id)]
    pub product_id: u16,
}

impl DeviceArgs {
    pub fn to_config(&self) -> SpaceMouseConfig {
        SpaceMouseConfig {
            vendor_id: self.vendor_id,
            product_id: self.product_id,
            ..Default::default()
        }
    }
}

/// 解析 `0x256f` / `256f` 形式的 16 bit USB ID
fn parse_hex_id(s: &str) -> Result<u16> {
    let digits = s.trim().trim_start_matches("0x").trim_start_matches("0X");
    if digits.is_empty() {
        bail!("empty USB id");
    }
    u16::from_str_radix(digits, 16).with_context(|| format!("invalid USB id: {s}"))
}
