//! Mock 传输（无硬件依赖，测试专用）
//!
//! 按脚本顺序回放报文/超时/故障，模拟接收器的中断端点。
//! 脚本耗尽后的读取一律返回超时，对应真实设备无输入时的表现。

use std::collections::VecDeque;
use std::time::Duration;

use crate::{InterruptTransport, UsbError};

/// 一次 `read_interrupt` 调用的脚本结果
#[derive(Debug, Clone)]
pub enum MockStep {
    /// 返回一条报文
    Packet(Vec<u8>),
    /// 返回超时（`Ok(None)`）
    Timeout,
    /// 返回传输故障（`rusb::Error::NoDevice`，模拟设备拔出）
    Disconnect,
}

/// 脚本化的中断报文源
#[derive(Debug, Default)]
pub struct MockTransport {
    steps: VecDeque<MockStep>,
    /// 已执行的读取次数（含超时）
    pub reads: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条报文
    pub fn packet(mut self, bytes: &[u8]) -> Self {
        self.steps.push_back(MockStep::Packet(bytes.to_vec()));
        self
    }

    /// 追加一次超时
    pub fn timeout(mut self) -> Self {
        self.steps.push_back(MockStep::Timeout);
        self
    }

    /// 追加一次设备拔出故障
    pub fn disconnect(mut self) -> Self {
        self.steps.push_back(MockStep::Disconnect);
        self
    }

    /// 剩余未消费的脚本步数
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl InterruptTransport for MockTransport {
    fn read_interrupt(&mut self, _timeout: Duration) -> Result<Option<Vec<u8>>, UsbError> {
        self.reads += 1;

        match self.steps.pop_front() {
            Some(MockStep::Packet(p)) => Ok(Some(p)),
            Some(MockStep::Timeout) | None => Ok(None),
            Some(MockStep::Disconnect) => Err(UsbError::Usb(rusb::Error::NoDevice)),
        }
    }
}
