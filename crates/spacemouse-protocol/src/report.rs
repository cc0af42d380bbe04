//! 中断报文分类与解码
//!
//! 报文第 0 字节为消息类型标签，其余字节为载荷：
//!
//! - `Joystick (1)`: 6 个轴值，偏移 (1,2),(3,4),(5,6),(7,8),(9,10),(11,12)
//!   的 little-endian 字节对，依次为 x, y, z, pitch, roll, yaw
//! - `Button (3)`: 偏移 4,3,2,1 组成的 32 bit 位寄存器，每个 bit 对应
//!   一个按键
//! - `LongPress (22)` / `Inactivity (23)`: 设备内部信号，无载荷语义
//!
//! 已知限制：位寄存器结构上支持多键同时按下，但上层语义只针对
//! 单键按下/释放做过实机验证。

use crate::ProtocolError;
use crate::codec::{to_int16, to_uint32};

// ============================================================================
// 消息类型标签
// ============================================================================

/// 消息类型标签（报文第 0 字节）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    /// 摇杆位移（6 轴）
    Joystick = 1,
    /// 按键位寄存器
    Button = 3,
    /// 长按信号（设备内部，忽略）
    LongPress = 22,
    /// 无操作超时信号（设备内部，忽略）
    Inactivity = 23,
}

impl TryFrom<u8> for MessageType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MessageType::Joystick),
            3 => Ok(MessageType::Button),
            22 => Ok(MessageType::LongPress),
            23 => Ok(MessageType::Inactivity),
            tag => Err(ProtocolError::UnknownMessageType { tag }),
        }
    }
}

// ============================================================================
// Released 判定
// ============================================================================

/// 判断报文是否为"释放"状态
///
/// 释放报文表示摇杆回中/按键全部松开：除第 0 字节的类型标签外，
/// 所有载荷字节均为 0。同一判定同时用于 Joystick 和 Button 报文，
/// 但两种类型触发的复位行为不同（各自只复位自己的参数组）。
pub fn is_released(packet: &[u8]) -> bool {
    packet.iter().skip(1).all(|&b| b == 0)
}

// ============================================================================
// 摇杆报文
// ============================================================================

/// Joystick 报文的最小长度（标签 + 6 轴 × 2 字节）
pub const JOYSTICK_PACKET_LEN: usize = 13;

/// 一次摇杆报文解码出的 6 个轴值
///
/// 值域为 i16 全范围，0 不会出现在非释放报文的"全部轴"上
/// （回中由释放报文表达，而不是 6 个 0）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoystickReading {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub roll: i16,
    pub pitch: i16,
    pub yaw: i16,
}

impl JoystickReading {
    /// 从完整的 Joystick 报文（含类型标签）解码 6 个轴值
    ///
    /// 设备原生坐标系与右手系相反，除 x 外的 5 个轴取反修正。
    pub fn decode(packet: &[u8]) -> Result<Self, ProtocolError> {
        if packet.len() < JOYSTICK_PACKET_LEN {
            return Err(ProtocolError::TruncatedPacket {
                expected: JOYSTICK_PACKET_LEN,
                actual: packet.len(),
            });
        }

        // 0x8000 没有对应的 i16 相反数，取反时饱和到 32767
        let axis = |offset: usize| to_int16(packet[offset], packet[offset + 1]);

        Ok(Self {
            x: axis(1),
            y: axis(3).saturating_neg(),
            z: axis(5).saturating_neg(),
            pitch: axis(7).saturating_neg(),
            roll: axis(9).saturating_neg(),
            yaw: axis(11).saturating_neg(),
        })
    }
}

// ============================================================================
// 按键位寄存器
// ============================================================================

/// Button 报文的最小长度（标签 + 4 字节寄存器）
pub const BUTTON_PACKET_LEN: usize = 5;

/// 按键位序号
///
/// 位序号从 32 bit 寄存器的最高位（MSB）开始计，
/// 即测试 `register & (0x8000_0000 >> N)`。未列出的位保留。
pub mod button_bits {
    pub const FRONT: u32 = 2;
    pub const RIGHT: u32 = 3;
    pub const TOP: u32 = 5;
    pub const FIT: u32 = 6;
    pub const MENU: u32 = 7;
    pub const B4: u32 = 8;
    pub const B3: u32 = 9;
    pub const B2: u32 = 10;
    pub const B1: u32 = 11;
    pub const ROLL_VIEW: u32 = 15;
    pub const ALT: u32 = 16;
    pub const ESCAPE: u32 = 17;
    pub const LOCK_ROTATION: u32 = 29;
    pub const CONTROL: u32 = 30;
    pub const SHIFT: u32 = 31;
}

/// 15 个按键的完整布尔向量
///
/// 每收到一条 Button 报文都重新计算整个向量并整体替换，
/// 任何一个 flag 都不会保留上一条报文的旧值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonState {
    pub b1: bool,
    pub b2: bool,
    pub b3: bool,
    pub b4: bool,
    pub escape: bool,
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub top: bool,
    pub front: bool,
    pub right: bool,
    pub roll_view: bool,
    pub lock_rotation: bool,
    pub menu: bool,
    pub fit: bool,
}

impl ButtonState {
    /// 从完整的 Button 报文（含类型标签）解码
    ///
    /// 寄存器由偏移 4,3,2,1 的字节按 `to_uint32(b[4], b[3], b[2], b[1])`
    /// 组成（实机抓包验证的字节序）。
    pub fn decode(packet: &[u8]) -> Result<Self, ProtocolError> {
        if packet.len() < BUTTON_PACKET_LEN {
            return Err(ProtocolError::TruncatedPacket {
                expected: BUTTON_PACKET_LEN,
                actual: packet.len(),
            });
        }

        let register = to_uint32(packet[4], packet[3], packet[2], packet[1]);
        Ok(Self::from_register(register))
    }

    /// 从 32 bit 位寄存器计算完整的按键向量
    pub fn from_register(register: u32) -> Self {
        use button_bits::*;

        let bit = |n: u32| register & (0x8000_0000 >> n) != 0;

        Self {
            b1: bit(B1),
            b2: bit(B2),
            b3: bit(B3),
            b4: bit(B4),
            escape: bit(ESCAPE),
            shift: bit(SHIFT),
            control: bit(CONTROL),
            alt: bit(ALT),
            top: bit(TOP),
            front: bit(FRONT),
            right: bit(RIGHT),
            roll_view: bit(ROLL_VIEW),
            lock_rotation: bit(LOCK_ROTATION),
            menu: bit(MENU),
            fit: bit(FIT),
        }
    }

    /// 当前按下的按键名称列表（用于显示/调试）
    pub fn pressed(&self) -> Vec<&'static str> {
        self.iter()
            .filter_map(|(name, pressed)| pressed.then_some(name))
            .collect()
    }

    /// 是否有任意按键按下
    pub fn any_pressed(&self) -> bool {
        self.iter().any(|(_, pressed)| pressed)
    }

    /// 按 (名称, 是否按下) 遍历全部 15 个按键
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> {
        [
            ("b1", self.b1),
            ("b2", self.b2),
            ("b3", self.b3),
            ("b4", self.b4),
            ("escape", self.escape),
            ("shift", self.shift),
            ("control", self.control),
            ("alt", self.alt),
            ("top", self.top),
            ("front", self.front),
            ("right", self.right),
            ("rollView", self.roll_view),
            ("lockRotation", self.lock_rotation),
            ("menu", self.menu),
            ("fit", self.fit),
        ]
        .into_iter()
    }
}
