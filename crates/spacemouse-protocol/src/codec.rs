//! 字节/整数转换工具函数
//!
//! 设备报文为 little-endian（LSB 在前），这些函数用于在协议层
//! 重建有符号/无符号整数。两个函数都是全函数：对任意输入字节
//! 均有定义，无错误分支。

/// 两个 8 bit 字节转有符号 16 bit 整数
///
/// `low` 为 LSB。`0x8000..=0xFFFF` 按二进制补码解释为负数。
pub fn to_int16(low: u8, high: u8) -> i16 {
    i16::from_le_bytes([low, high])
}

/// 四个 8 bit 字节转无符号 32 bit 整数
///
/// `b0` 为 LSB，无符号组合，不做符号处理。
pub fn to_uint32(b0: u8, b1: u8, b2: u8, b3: u8) -> u32 {
    u32::from_le_bytes([b0, b1, b2, b3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_int16_zero() {
        assert_eq!(to_int16(0, 0), 0);
    }

    #[test]
    fn test_to_int16_one() {
        assert_eq!(to_int16(1, 0), 1);
    }

    #[test]
    fn test_to_int16_negative_one() {
        assert_eq!(to_int16(255, 255), -1);
    }

    #[test]
    fn test_to_int16_max() {
        assert_eq!(to_int16(255, 127), 32767);
    }

    #[test]
    fn test_to_int16_min() {
        assert_eq!(to_int16(0, 128), -32768);
    }

    #[test]
    fn test_to_uint32_zero() {
        assert_eq!(to_uint32(0, 0, 0, 0), 0);
    }

    #[test]
    fn test_to_uint32_max() {
        assert_eq!(to_uint32(255, 255, 255, 255), 0xFFFF_FFFF);
    }

    #[test]
    fn test_to_uint32_byte_order() {
        assert_eq!(to_uint32(1, 2, 3, 4), 0x0403_0201);
    }

    #[test]
    fn test_to_uint32_msb_set() {
        assert_eq!(to_uint32(1, 0, 0, 128), 0x8000_0001);
    }

    proptest! {
        /// 对任意输入字节，结果与按位/补码的算术定义一致
        #[test]
        fn prop_to_int16_matches_twos_complement(low: u8, high: u8) {
            let raw = low as u32 | ((high as u32) << 8);
            let expected = if raw >= 32768 {
                raw as i64 - 65536
            } else {
                raw as i64
            };
            prop_assert_eq!(to_int16(low, high) as i64, expected);
        }

        #[test]
        fn prop_to_uint32_matches_shift_composition(b0: u8, b1: u8, b2: u8, b3: u8) {
            let expected =
                b0 as u32 | ((b1 as u32) << 8) | ((b2 as u32) << 16) | ((b3 as u32) << 24);
            prop_assert_eq!(to_uint32(b0, b1, b2, b3), expected);
        }
    }
}
