//! # SpaceMouse USB Transport
//!
//! USB 硬件抽象层：通过 `rusb` 从接收器的中断端点读取原始报文。
//!
//! 上层（spacemouse-driver）只依赖 [`InterruptTransport`] trait，
//! 不直接接触 USB 细节；测试时可用 `mock` feature 提供的
//! [`mock::MockTransport`] 替换真实设备。

use std::time::Duration;
use thiserror::Error;

pub mod device;

#[cfg(feature = "mock")]
pub mod mock;

pub use device::SpaceMouseUsbDevice;

// ============================================================================
// 设备默认参数（SpaceMouse Pro Wireless + Universal Receiver）
// ============================================================================

/// 3Dconnexion 的 USB Vendor ID
///
/// 其他接收器型号可用 CLI 的 `list` 子命令查询后在构造时覆盖。
pub const DEFAULT_VENDOR_ID: u16 = 0x256F;
/// Universal Receiver 的 Product ID
pub const DEFAULT_PRODUCT_ID: u16 = 0xC652;

/// HID 接口序号
pub const INTERFACE_NUMBER: u8 = 0;
/// 中断 IN 端点地址
pub const ENDPOINT_IN: u8 = 0x81;
/// 单次中断读取长度（wMaxPacketSize）
pub const READ_LENGTH: usize = 0x20;
/// 默认单次轮询超时
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(10);

/// USB 传输层错误类型
///
/// 超时不在此列：单次轮询超时是无输入时的常态，
/// 由 [`InterruptTransport::read_interrupt`] 以 `Ok(None)` 表达。
#[derive(Error, Debug)]
pub enum UsbError {
    /// 设备未找到（不存在或 VID/PID 不匹配），构造期致命错误
    #[error("SpaceMouse receiver {vendor_id:04x}:{product_id:04x} not found")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    /// 内核驱动占用接口且无法分离，构造期致命错误（通常是权限问题）
    #[error("Could not detach kernel driver from interface {interface}: {source}")]
    DriverDetachFailed {
        interface: u8,
        #[source]
        source: rusb::Error,
    },

    /// 其他 USB 错误，原样向上传播
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),
}

/// 中断报文源
///
/// 驱动层消费的唯一传输契约："读取下一条中断报文，或报告超时"。
/// 超时返回 `Ok(None)`，是正常且高频的结果（轮询间隔很短，
/// 并非每个间隔都有物理输入事件）。
pub trait InterruptTransport {
    /// 在 `timeout` 内读取一条中断报文
    ///
    /// - `Ok(Some(packet))`: 收到报文（长度为实际读取的字节数）
    /// - `Ok(None)`: 超时，无数据
    /// - `Err(_)`: 传输故障
    fn read_interrupt(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>, UsbError>;
}
