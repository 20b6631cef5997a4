//! Conversions between 16-bit fields and their big-endian octets.

/// Interpret the last (up to) two octets of `octets` as a big-endian
/// `u16`.
///
/// If there is only one octet, the high byte is taken to be zero.  If
/// there are none, the result is zero.  If there are more than two,
/// the leading octets are ignored.
pub fn read_u16_be(octets: &[u8]) -> u16 {
    match octets {
        [] => 0,
        [lo] => u16::from(*lo),
        [.., hi, lo] => u16::from_be_bytes([*hi, *lo]),
    }
}

/// Encode a `u16` as two big-endian octets.
pub fn write_u16_be(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn read_empty_is_zero() {
        assert_eq!(0, read_u16_be(&[]));
    }

    #[test]
    fn read_single_octet_is_low_byte() {
        assert_eq!(0x00ab, read_u16_be(&[0xab]));
    }

    #[test]
    fn read_two_octets() {
        assert_eq!(0x1234, read_u16_be(&[0x12, 0x34]));
    }

    #[test]
    fn read_long_slice_uses_trailing_octets() {
        assert_eq!(0x5678, read_u16_be(&[0x12, 0x34, 0x56, 0x78]));
        assert_eq!(0xff00, read_u16_be(&[0x01, 0xff, 0x00]));
    }

    #[test]
    fn write_is_big_endian() {
        assert_eq!([0x12, 0x34], write_u16_be(0x1234));
        assert_eq!([0x00, 0x01], write_u16_be(1));
    }

    #[test]
    fn u16_write_read_roundtrip() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let value: u16 = rng.random();
            assert_eq!(value, read_u16_be(&write_u16_be(value)));
        }
    }
}
