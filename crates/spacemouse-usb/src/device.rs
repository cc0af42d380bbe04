//! USB 设备操作
//!
//! 提供接收器的扫描、内核驱动分离、接口声明与中断读取。

use rusb::{DeviceHandle, GlobalContext};
use std::time::Duration;
use tracing::trace;

use crate::{
    DEFAULT_PRODUCT_ID, DEFAULT_VENDOR_ID, ENDPOINT_IN, INTERFACE_NUMBER, InterruptTransport,
    READ_LENGTH, UsbError,
};

/// SpaceMouse 接收器的 USB 句柄
///
/// 生命周期：`open()` 时扫描并独占接口，Drop 时释放接口交还给
/// 操作系统。释放是幂等的，句柄从未成功声明接口时为 no-op。
pub struct SpaceMouseUsbDevice {
    handle: DeviceHandle<GlobalContext>,
    interface_number: u8,
    endpoint_in: u8,
    read_len: usize,
    /// 记录是否已经 claim 了接口（用于正确的资源清理）
    interface_claimed: bool,
}

/// 构造期所需的最小句柄操作
///
/// 从 `DeviceHandle` 上抽出来，内核驱动分离/接口声明的决策逻辑
/// 可以用桩句柄在无硬件环境下测试。
trait InterfaceOps {
    fn kernel_driver_active(&self, interface: u8) -> Result<bool, rusb::Error>;
    fn detach_kernel_driver(&mut self, interface: u8) -> Result<(), rusb::Error>;
    fn claim_interface(&mut self, interface: u8) -> Result<(), rusb::Error>;
}

impl InterfaceOps for DeviceHandle<GlobalContext> {
    fn kernel_driver_active(&self, interface: u8) -> Result<bool, rusb::Error> {
        DeviceHandle::kernel_driver_active(self, interface)
    }

    fn detach_kernel_driver(&mut self, interface: u8) -> Result<(), rusb::Error> {
        DeviceHandle::detach_kernel_driver(self, interface)
    }

    fn claim_interface(&mut self, interface: u8) -> Result<(), rusb::Error> {
        DeviceHandle::claim_interface(self, interface)
    }
}

/// 分离内核驱动并声明接口
///
/// HID 设备默认被内核 hid 驱动占用，必须先分离才能 claim。
/// 活跃性查询失败按"未占用"处理（设备可能不支持该查询），
/// 分离失败则是构造期致命错误。
fn prepare_interface_on(handle: &mut impl InterfaceOps, interface: u8) -> Result<(), UsbError> {
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    {
        if handle.kernel_driver_active(interface).unwrap_or(false) {
            handle
                .detach_kernel_driver(interface)
                .map_err(|source| UsbError::DriverDetachFailed { interface, source })?;
            trace!(interface, "Kernel driver detached");
        }
    }

    handle.claim_interface(interface)?;
    Ok(())
}

/// 设备描述符的 VID/PID 是否为目标接收器
fn ids_match(desc_vendor: u16, desc_product: u16, vendor_id: u16, product_id: u16) -> bool {
    desc_vendor == vendor_id && desc_product == product_id
}

impl SpaceMouseUsbDevice {
    /// 用默认 VID/PID（Universal Receiver）打开接收器
    pub fn open_default() -> Result<Self, UsbError> {
        Self::open(DEFAULT_VENDOR_ID, DEFAULT_PRODUCT_ID)
    }

    /// 按 VID/PID 扫描并打开接收器
    ///
    /// # 错误
    /// - [`UsbError::DeviceNotFound`]: 无匹配设备
    /// - [`UsbError::DriverDetachFailed`]: 内核占用接口且分离失败
    ///   （调用方需在外部解决，例如 udev 权限）
    pub fn open(vendor_id: u16, product_id: u16) -> Result<Self, UsbError> {
        for device in rusb::devices()?.iter() {
            let desc = match device.device_descriptor() {
                Ok(desc) => desc,
                Err(_) => continue,
            };

            if !ids_match(desc.vendor_id(), desc.product_id(), vendor_id, product_id) {
                continue;
            }

            let handle = device.open()?;
            let mut dev = SpaceMouseUsbDevice {
                handle,
                interface_number: INTERFACE_NUMBER,
                endpoint_in: ENDPOINT_IN,
                read_len: READ_LENGTH,
                interface_claimed: false,
            };
            dev.prepare_interface()?;

            trace!(vendor_id, product_id, "SpaceMouse receiver opened");
            return Ok(dev);
        }

        Err(UsbError::DeviceNotFound {
            vendor_id,
            product_id,
        })
    }

    /// 准备接口（detach kernel driver 和 claim interface）
    fn prepare_interface(&mut self) -> Result<(), UsbError> {
        if self.interface_claimed {
            return Ok(());
        }

        prepare_interface_on(&mut self.handle, self.interface_number)?;
        self.interface_claimed = true;
        Ok(())
    }

    /// 释放 USB 接口（交还给操作系统）
    ///
    /// 幂等：重复调用或从未 claim 成功时为 no-op。
    pub fn release_interface(&mut self) {
        if self.interface_claimed {
            // 销毁路径上忽略错误（设备可能已断开）
            let _ = self.handle.release_interface(self.interface_number);
            self.interface_claimed = false;
            trace!("USB interface released");
        }
    }
}

impl InterruptTransport for SpaceMouseUsbDevice {
    fn read_interrupt(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>, UsbError> {
        let mut buf = vec![0u8; self.read_len];

        match self.handle.read_interrupt(self.endpoint_in, &mut buf, timeout) {
            Ok(len) => {
                buf.truncate(len);
                trace!(len, "Interrupt packet received");
                Ok(Some(buf))
            },
            Err(rusb::Error::Timeout) => Ok(None),
            Err(e) => Err(UsbError::Usb(e)),
        }
    }
}

impl Drop for SpaceMouseUsbDevice {
    fn drop(&mut self) {
        self.release_interface();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 可配置失败点的桩句柄（替代真实 `DeviceHandle`）
    #[derive(Default)]
    struct StubHandle {
        kernel_driver_active: bool,
        active_check_fails: bool,
        detach_fails: bool,
        claim_fails: bool,
        detached: bool,
        claimed: bool,
    }

    impl InterfaceOps for StubHandle {
        fn kernel_driver_active(&self, _interface: u8) -> Result<bool, rusb::Error> {
            if self.active_check_fails {
                Err(rusb::Error::NotSupported)
            } else {
                Ok(self.kernel_driver_active)
            }
        }

        fn detach_kernel_driver(&mut self, _interface: u8) -> Result<(), rusb::Error> {
            if self.detach_fails {
                Err(rusb::Error::Access)
            } else {
                self.detached = true;
                Ok(())
            }
        }

        fn claim_interface(&mut self, _interface: u8) -> Result<(), rusb::Error> {
            if self.claim_fails {
                Err(rusb::Error::Busy)
            } else {
                self.claimed = true;
                Ok(())
            }
        }
    }

    #[test]
    fn test_ids_match() {
        assert!(ids_match(0x256F, 0xC652, 0x256F, 0xC652));
        assert!(!ids_match(0x256F, 0xC62E, 0x256F, 0xC652)); // 同厂商其他接收器
        assert!(!ids_match(0x1234, 0xC652, 0x256F, 0xC652));
    }

    #[cfg(any(target_os = "linux", target_os = "macos"))]
    #[test]
    fn test_prepare_detaches_active_kernel_driver() {
        let mut handle = StubHandle {
            kernel_driver_active: true,
            ..Default::default()
        };

        prepare_interface_on(&mut handle, INTERFACE_NUMBER).unwrap();

        assert!(handle.detached);
        assert!(handle.claimed);
    }

    #[cfg(any(target_os = "linux", target_os = "macos"))]
    #[test]
    fn test_prepare_detach_failure_is_fatal() {
        // 内核占用接口且分离失败：构造必须失败，接口不会被 claim
        let mut handle = StubHandle {
            kernel_driver_active: true,
            detach_fails: true,
            ..Default::default()
        };

        match prepare_interface_on(&mut handle, INTERFACE_NUMBER) {
            Err(UsbError::DriverDetachFailed { interface, .. }) => {
                assert_eq!(interface, INTERFACE_NUMBER);
            },
            other => panic!("Expected DriverDetachFailed, got {:?}", other),
        }
        assert!(!handle.claimed);
    }

    #[cfg(any(target_os = "linux", target_os = "macos"))]
    #[test]
    fn test_prepare_skips_detach_when_driver_inactive() {
        let mut handle = StubHandle::default();

        prepare_interface_on(&mut handle, INTERFACE_NUMBER).unwrap();

        assert!(!handle.detached);
        assert!(handle.claimed);
    }

    #[cfg(any(target_os = "linux", target_os = "macos"))]
    #[test]
    fn test_prepare_treats_active_check_failure_as_inactive() {
        // 活跃性查询失败按"未占用"处理，不阻断构造
        let mut handle = StubHandle {
            active_check_fails: true,
            ..Default::default()
        };

        prepare_interface_on(&mut handle, INTERFACE_NUMBER).unwrap();

        assert!(!handle.detached);
        assert!(handle.claimed);
    }

    #[test]
    fn test_prepare_claim_failure_propagates() {
        let mut handle = StubHandle {
            claim_fails: true,
            ..Default::default()
        };

        match prepare_interface_on(&mut handle, INTERFACE_NUMBER) {
            Err(UsbError::Usb(rusb::Error::Busy)) => {},
            other => panic!("Expected Usb(Busy), got {:?}", other),
        }
    }

    /// 需要实际接收器插入才能运行
    ///
    /// ```bash
    /// cargo test -p spacemouse-usb -- --ignored
    /// ```
    #[test]
    #[ignore]
    fn test_open_default_receiver() {
        let dev = SpaceMouseUsbDevice::open_default();
        assert!(dev.is_ok(), "open failed: {:?}", dev.err());
    }

    #[test]
    fn test_open_unknown_ids_reports_not_found() {
        // VID/PID 0:0 不可能匹配任何设备。无 USB 访问权限的环境
        // （CI 容器）里枚举本身可能失败，同样是可接受的错误路径。
        match SpaceMouseUsbDevice::open(0, 0) {
            Err(UsbError::DeviceNotFound {
                vendor_id,
                product_id,
            }) => {
                assert_eq!(vendor_id, 0);
                assert_eq!(product_id, 0);
            },
            Err(UsbError::Usb(_)) => {},
            other => panic!("Expected DeviceNotFound, got {:?}", other.map(|_| ())),
        }
    }
}
