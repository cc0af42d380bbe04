//! `monitor` 子命令：轮询并显示解码后的状态
//!
//! 终端版的状态显示（原型里的 Qt 参数面板不在范围内）。
//! 每处理一条报文打印一行当前快照，Ctrl-C 退出。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use spacemouse_driver::{MotionState, PollOutcome, SpaceMouse};
use tracing::info;

use super::DeviceArgs;

pub fn run(device: &DeviceArgs) -> Result<()> {
    let mut mouse = SpaceMouse::open(device.to_config())?;
    info!(
        "SpaceMouse receiver {:04x}:{:04x} opened",
        device.vendor_id, device.product_id
    );

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
    }

    println!("Monitoring (Ctrl-C to quit) ...");

    while running.load(Ordering::SeqCst) {
        if mouse.process_interrupt_message()? == PollOutcome::NoSignal {
            continue;
        }

        println!("{} | pressed: {}", format_motion(mouse.motion()), format_buttons(&mouse));
    }

    Ok(())
}

fn format_motion(motion: MotionState) -> String {
    let axis = |v: Option<i16>| match v {
        Some(v) => format!("{v:6}"),
        None => "     -".to_string(),
    };

    format!(
        "x={} y={} z={} roll={} pitch={} yaw={}",
        axis(motion.x),
        axis(motion.y),
        axis(motion.z),
        axis(motion.roll),
        axis(motion.pitch),
        axis(motion.yaw),
    )
}

fn format_buttons(mouse: &SpaceMouse) -> String {
    let pressed = mouse.buttons().pressed();
    if pressed.is_empty() {
        "-".to_string()
    } else {
        pressed.join(", ")
    }
}
