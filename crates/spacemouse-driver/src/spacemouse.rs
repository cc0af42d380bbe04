//! SpaceMouse 设备状态机（对外 API）
//!
//! 封装传输层句柄和参数状态，单一可变入口为
//! [`SpaceMouse::process_interrupt_message`]。状态只能通过只读
//! 访问器观察，外部代码无法绕过释放/复位不变量直接改写参数。

use std::time::Duration;
use tracing::trace;

use spacemouse_protocol::{ButtonState, JoystickReading, MessageType, ProtocolError, is_released};
use spacemouse_usb::{
    DEFAULT_PRODUCT_ID, DEFAULT_READ_TIMEOUT, DEFAULT_VENDOR_ID, InterruptTransport,
    SpaceMouseUsbDevice,
};

use crate::error::DriverError;
use crate::state::MotionState;

/// 一次轮询的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// 超时，无报文到达（无输入时的常态，不是错误）
    NoSignal,
    /// 收到并处理了一条报文（含 LongPress/Inactivity 的 no-op）
    Handled,
}

/// 构造配置
///
/// 默认值对应 3Dconnexion Universal Receiver；其他接收器型号
/// 用 CLI 的 `list` 子命令查到 VID/PID 后覆盖。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceMouseConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    /// 单次轮询的有界等待，亚秒级，保证调用及时返回
    pub read_timeout: Duration,
}

impl Default for SpaceMouseConfig {
    fn default() -> Self {
        Self {
            vendor_id: DEFAULT_VENDOR_ID,
            product_id: DEFAULT_PRODUCT_ID,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// SpaceMouse 设备状态机
///
/// 独占持有参数状态；每个实例单逻辑线程使用，
/// [`process_interrupt_message`](Self::process_interrupt_message)
/// 不可重入。传输句柄在 Drop 时随 `T` 一起释放。
pub struct SpaceMouse<T: InterruptTransport = SpaceMouseUsbDevice> {
    transport: T,
    read_timeout: Duration,
    motion: MotionState,
    buttons: ButtonState,
}

impl SpaceMouse<SpaceMouseUsbDevice> {
    /// 用默认配置打开接收器
    pub fn open_default() -> Result<Self, DriverError> {
        Self::open(SpaceMouseConfig::default())
    }

    /// 按配置打开接收器
    ///
    /// # 错误
    /// - `UsbError::DeviceNotFound`: 设备不存在或 VID/PID 不匹配
    /// - `UsbError::DriverDetachFailed`: 内核驱动分离失败（权限问题）
    pub fn open(config: SpaceMouseConfig) -> Result<Self, DriverError> {
        let transport = SpaceMouseUsbDevice::open(config.vendor_id, config.product_id)?;
        Ok(Self::with_transport(transport, config.read_timeout))
    }
}

impl<T: InterruptTransport> SpaceMouse<T> {
    /// 用任意传输实现构造（测试时注入 mock）
    pub fn with_transport(transport: T, read_timeout: Duration) -> Self {
        Self {
            transport,
            read_timeout,
            motion: MotionState::default(),
            buttons: ButtonState::default(),
        }
    }

    /// 处理一条中断报文
    ///
    /// 向传输层请求一条报文（有界等待）；超时返回
    /// [`PollOutcome::NoSignal`]，不改动任何状态。收到报文时按
    /// 类型标签分派：
    ///
    /// - `Joystick`: 释放报文把 6 个轴全部置 `None`，否则解码写入
    ///   6 个轴。按键组不受影响。
    /// - `Button`: 释放报文把 15 个 flag 全部置 `false`，否则解码
    ///   位寄存器并整体替换按键向量。运动轴组不受影响。
    /// - `LongPress` / `Inactivity`: no-op。
    /// - 未知标签: [`ProtocolError::UnknownMessageType`]，硬错误
    ///   （可能在驱动错误的设备），不在内部吞掉。
    pub fn process_interrupt_message(&mut self) -> Result<PollOutcome, DriverError> {
        let Some(packet) = self.transport.read_interrupt(self.read_timeout)? else {
            return Ok(PollOutcome::NoSignal);
        };

        let tag = *packet.first().ok_or(ProtocolError::TruncatedPacket {
            expected: 1,
            actual: 0,
        })?;

        match MessageType::try_from(tag)? {
            MessageType::Joystick => {
                if is_released(&packet) {
                    self.motion = MotionState::default();
                    trace!("Joystick released");
                } else {
                    self.motion = MotionState::from_reading(JoystickReading::decode(&packet)?);
                    trace!(motion = ?self.motion, "Joystick moved");
                }
            },
            MessageType::Button => {
                if is_released(&packet) {
                    self.buttons = ButtonState::default();
                    trace!("Buttons released");
                } else {
                    // 先算出完整的下一向量再整体替换，不存在
                    // 新旧报文混杂的窗口
                    self.buttons = ButtonState::decode(&packet)?;
                    trace!(pressed = ?self.buttons.pressed(), "Button state");
                }
            },
            MessageType::LongPress | MessageType::Inactivity => {},
        }

        Ok(PollOutcome::Handled)
    }

    /// 运动轴参数组的当前快照
    pub fn motion(&self) -> MotionState {
        self.motion
    }

    /// 按键参数组的当前快照
    pub fn buttons(&self) -> ButtonState {
        self.buttons
    }

    /// 配置的单次轮询超时
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }
}
