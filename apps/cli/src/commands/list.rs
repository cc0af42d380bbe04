//! `list` 子命令：枚举 USB 设备
//!
//! 用于查找接收器的 VID/PID（不同型号的 3Dconnexion 接收器
//! Product ID 不同，构造时需要覆盖默认值）。

use anyhow::Result;

pub fn run() -> Result<()> {
    for device in rusb::devices()?.iter() {
        let desc = match device.device_descriptor() {
            Ok(desc) => desc,
            Err(_) => continue,
        };

        // 产品名是锦上添花：打不开设备（权限）就只打印 ID
        let product = device
            .open()
            .ok()
            .and_then(|handle| {
                desc.product_string_index()
                    .filter(|&idx| idx != 0)
                    .and_then(|idx| handle.read_string_descriptor_ascii(idx).ok())
            })
            .unwrap_or_default();

        println!(
            "Bus {:03} Device {:03}: {:04x}:{:04x} {}",
            device.bus_number(),
            device.address(),
            desc.vendor_id(),
            desc.product_id(),
            product,
        );
    }

    Ok(())
}
