//! 运动轴状态
//!
//! 6 个连续运动轴的当前值。`None` 表示摇杆回中（释放报文之后），
//! 与数值 0 区分开：设备回中时上报的是释放报文，而不是 6 个 0。

use spacemouse_protocol::JoystickReading;

/// 运动轴参数组
///
/// 值域 [-32768, 32767]，按右手系修正后的方向。
/// 只由驱动在 Joystick 报文上整体写入；Button 报文永远不触碰它。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionState {
    pub x: Option<i16>,
    pub y: Option<i16>,
    pub z: Option<i16>,
    pub roll: Option<i16>,
    pub pitch: Option<i16>,
    pub yaw: Option<i16>,
}

impl MotionState {
    /// 摇杆是否处于中位（所有轴均无值）
    pub fn is_neutral(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.z.is_none()
            && self.roll.is_none()
            && self.pitch.is_none()
            && self.yaw.is_none()
    }

    pub(crate) fn from_reading(reading: JoystickReading) -> Self {
        Self {
            x: Some(reading.x),
            y: Some(reading.y),
            z: Some(reading.z),
            roll: Some(reading.roll),
            pitch: Some(reading.pitch),
            yaw: Some(reading.yaw),
        }
    }
}
