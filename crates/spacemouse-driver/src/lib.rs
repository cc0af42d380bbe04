//! # SpaceMouse Driver
//!
//! 设备状态机：持有 21 个接口参数（6 个连续运动轴 + 15 个按键布尔量），
//! 从传输层逐条消费中断报文，按消息类型更新对应的参数子集。
//!
//! ## 使用模式
//!
//! 每个实例是单逻辑线程的：调用方在一个线程里反复调用
//! [`SpaceMouse::process_interrupt_message`]（内部带亚秒级有界等待），
//! 读取状态快照后发布给其他线程。实例内部无锁，跨线程共享时由
//! 调用方整体串行化。
//!
//! ```rust,no_run
//! use spacemouse_driver::{PollOutcome, SpaceMouse};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut mouse = SpaceMouse::open_default()?;
//! loop {
//!     if mouse.process_interrupt_message()? == PollOutcome::Handled {
//!         println!("{:?} {:?}", mouse.motion(), mouse.buttons().pressed());
//!     }
//! }
//! # }
//! ```

mod error;
mod spacemouse;
mod state;

pub use error::DriverError;
pub use spacemouse::{PollOutcome, SpaceMouse, SpaceMouseConfig};
pub use state::MotionState;

// 按键向量类型由协议层定义，整体替换式更新
pub use spacemouse_protocol::ButtonState;
