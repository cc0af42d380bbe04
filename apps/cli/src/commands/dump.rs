//! `dump` 子命令：打印原始中断报文
//!
//! 协议调试用：逐条打印报文字节；Button 报文额外按位打印
//! 寄存器来源的 4 个载荷字节，便于核对位映射。

use std::time::{Duration, Instant};

use anyhow::Result;
use spacemouse_usb::{DEFAULT_READ_TIMEOUT, InterruptTransport, SpaceMouseUsbDevice};

use super::DeviceArgs;

/// Button 报文的类型标签
const BUTTON_TAG: u8 = 3;

pub fn run(device: &DeviceArgs, seconds: u64) -> Result<()> {
    let mut dev = SpaceMouseUsbDevice::open(device.vendor_id, device.product_id)?;
    let deadline = Instant::now() + Duration::from_secs(seconds);

    println!(
        "Dumping interrupt packets from {:04x}:{:04x} for {}s ...",
        device.vendor_id, device.product_id, seconds
    );

    while Instant::now() < deadline {
        let Some(packet) = dev.read_interrupt(DEFAULT_READ_TIMEOUT)? else {
            continue;
        };

        print_packet(&packet);
    }

    Ok(())
}

fn print_packet(packet: &[u8]) {
    let hex: Vec<String> = packet.iter().map(|b| format!("{b:02x}")).collect();
    println!("[{}]", hex.join(" "));

    if packet.first() == Some(&BUTTON_TAG) && packet.len() >= 5 {
        println!("  Index | Value binary");
        for (index, byte) in packet.iter().enumerate().take(5).skip(1) {
            println!("  {index}     | {byte:08b}");
        }
    }
}
