//! 驱动层错误类型定义

use spacemouse_protocol::ProtocolError;
use spacemouse_usb::UsbError;
use thiserror::Error;

/// 驱动层错误类型
///
/// 核心不做重试也不做日志策略：所有错误原样交给直接调用方，
/// 由 CLI/GUI 决定显示、整体重连还是退出。
#[derive(Error, Debug)]
pub enum DriverError {
    /// USB 传输错误（超时除外，超时不是错误）
    #[error("USB transport error: {0}")]
    Usb(#[from] UsbError),

    /// 协议解析错误（未知消息类型、报文截断）
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

#[cfg(test)]
mod tests {
    use super::DriverError;
    use spacemouse_protocol::ProtocolError;
    use spacemouse_usb::UsbError;

    /// 测试 DriverError 的 Display 实现
    #[test]
    fn test_driver_error_display() {
        let usb_error = UsbError::DeviceNotFound {
            vendor_id: 0x256F,
            product_id: 0xC652,
        };
        let driver_error = DriverError::Usb(usb_error);
        let msg = format!("{}", driver_error);
        assert!(msg.contains("256f:c652"), "Usb error message: {}", msg);

        let protocol_error = ProtocolError::UnknownMessageType { tag: 0x42 };
        let driver_error = DriverError::Protocol(protocol_error);
        let msg = format!("{}", driver_error);
        assert!(
            msg.contains("Unknown message type") && msg.contains("0x42"),
            "Protocol error message: {}",
            msg
        );
    }

    /// 测试 From<UsbError> 转换
    #[test]
    fn test_from_usb_error() {
        let usb_error = UsbError::DeviceNotFound {
            vendor_id: 1,
            product_id: 2,
        };
        let driver_error: DriverError = usb_error.into();
        match driver_error {
            DriverError::Usb(UsbError::DeviceNotFound {
                vendor_id,
                product_id,
            }) => {
                assert_eq!(vendor_id, 1);
                assert_eq!(product_id, 2);
            },
            _ => panic!("Expected Usb variant"),
        }
    }

    /// 测试 From<ProtocolError> 转换
    #[test]
    fn test_from_protocol_error() {
        let protocol_error = ProtocolError::TruncatedPacket {
            expected: 13,
            actual: 3,
        };
        let driver_error: DriverError = protocol_error.into();
        match driver_error {
            DriverError::Protocol(ProtocolError::TruncatedPacket { expected, actual }) => {
                assert_eq!(expected, 13);
                assert_eq!(actual, 3);
            },
            _ => panic!("Expected Protocol variant"),
        }
    }
}
