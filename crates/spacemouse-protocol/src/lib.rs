//! # SpaceMouse Protocol
//!
//! 3Dconnexion SpaceMouse Pro Wireless 的 HID 中断报文解析（无硬件依赖）
//!
//! ## 模块
//!
//! - `codec`: 字节/整数转换工具函数
//! - `report`: 中断报文分类与解码（摇杆轴、按键位寄存器）
//!
//! ## 报文格式
//!
//! 设备通过接收器的中断端点上报固定布局的报文：第 0 字节为消息类型
//! 标签，其余字节为载荷。载荷使用 little-endian（LSB 在前）。
//!
//! ## 架构位置
//!
//! ```text
//! Driver Layer (spacemouse-driver)
//!     ↓ 报文 -> 状态更新
//! Protocol Layer (此 crate)
//!     ↓ InterruptTransport 读取原始字节
//! USB Layer (spacemouse-usb)
//! ```

pub mod codec;
pub mod report;

// 重新导出常用类型
pub use codec::{to_int16, to_uint32};
pub use report::{
    BUTTON_PACKET_LEN, ButtonState, JOYSTICK_PACKET_LEN, JoystickReading, MessageType, button_bits,
    is_released,
};

use thiserror::Error;

/// 协议解析错误类型
///
/// 未知的消息类型标签意味着协议变体不兼容（例如不同固件的设备），
/// 必须作为硬错误向上传播，不能静默忽略。
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Unknown message type: 0x{tag:02X}")]
    UnknownMessageType { tag: u8 },

    #[error("Truncated packet: expected at least {expected} bytes, got {actual}")]
    TruncatedPacket { expected: usize, actual: usize },
}
