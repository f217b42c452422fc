//! Integer literal formatting.
//!
//! Literals print as `0x`-prefixed lower-case hex, or as `-0x<magnitude>` when
//! the sign bit of their declared width is set together with at least one
//! other bit. A lone sign bit (`0x80`, `0x8000`, ...) prints unsigned.
//! Address-sized literals (32 and 64 bits) print as a label when one exists.

use unmasm_core::{IntegerValue, LabelMap, Width};

/// Formats `value`, substituting a label for address-sized literals.
pub fn format_integer(value: &IntegerValue, labels: &LabelMap) -> String {
    let v = value.unsigned();
    if matches!(value.width(), Width::W32 | Width::W64) {
        if let Some(label) = labels.get(v) {
            return label.to_string();
        }
    }
    format_hex(value)
}

/// Formats `value` numerically, never consulting labels.
pub fn format_hex(value: &IntegerValue) -> String {
    let width = value.width();
    let v = value.unsigned();
    let sign = width.sign_bit();
    if v & sign != 0 && v & (sign - 1) != 0 {
        format!("-{:#x}", v.wrapping_neg() & width.mask())
    } else {
        format!("{:#x}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(width: Width, bits: u64) -> String {
        format_integer(&IntegerValue::new(width, bits), &LabelMap::new())
    }

    #[test]
    fn test_positive_values() {
        assert_eq!(fmt(Width::W8, 0x7f), "0x7f");
        assert_eq!(fmt(Width::W16, 0x1234), "0x1234");
        assert_eq!(fmt(Width::W32, 0xdead), "0xdead");
        assert_eq!(fmt(Width::W64, 0x1_0000_0000), "0x100000000");
    }

    #[test]
    fn test_zero_keeps_prefix() {
        assert_eq!(fmt(Width::W8, 0), "0x0");
        assert_eq!(fmt(Width::W64, 0), "0x0");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(fmt(Width::W8, 0x81), "-0x7f");
        assert_eq!(fmt(Width::W8, 0xff), "-0x1");
        assert_eq!(fmt(Width::W16, 0xfff8), "-0x8");
        assert_eq!(fmt(Width::W32, 0xffff_fff0), "-0x10");
        assert_eq!(fmt(Width::W64, u64::MAX), "-0x1");
    }

    #[test]
    fn test_lone_sign_bit_prints_unsigned() {
        assert_eq!(fmt(Width::W8, 0x80), "0x80");
        assert_eq!(fmt(Width::W16, 0x8000), "0x8000");
        assert_eq!(fmt(Width::W32, 0x8000_0000), "0x80000000");
        assert_eq!(fmt(Width::W64, 1 << 63), "0x8000000000000000");
    }

    #[test]
    fn test_label_substitution_for_address_sized_values() {
        let labels: LabelMap = [(0x402000u64, "g_table"), (0x7f, "seven_f")]
            .into_iter()
            .collect();

        let addr32 = IntegerValue::new(Width::W32, 0x402000);
        let addr64 = IntegerValue::new(Width::W64, 0x402000);
        assert_eq!(format_integer(&addr32, &labels), "g_table");
        assert_eq!(format_integer(&addr64, &labels), "g_table");

        // Narrow literals never resolve to labels.
        let narrow = IntegerValue::new(Width::W8, 0x7f);
        assert_eq!(format_integer(&narrow, &labels), "0x7f");
        assert_eq!(format_hex(&addr32), "0x402000");
    }

    #[test]
    fn test_label_above_4gib() {
        let labels: LabelMap = [(0x7ff6_1234_5000u64, "RtlUserThreadStart")]
            .into_iter()
            .collect();
        let wide = IntegerValue::new(Width::W64, 0x7ff6_1234_5000);
        assert_eq!(format_integer(&wide, &labels), "RtlUserThreadStart");
        let narrow = IntegerValue::new(Width::W32, 0x7ff6_1234_5000);
        assert_eq!(format_integer(&narrow, &labels), "0x12345000");
    }

    #[test]
    fn test_label_on_negative_pattern() {
        let labels: LabelMap = [(0xffff_fff0u64, "high")].into_iter().collect();
        let v = IntegerValue::new(Width::W32, 0xffff_fff0);
        assert_eq!(format_integer(&v, &labels), "high");
    }

    #[test]
    fn test_zero_never_labelled() {
        let labels: LabelMap = [(0u64, "null")].into_iter().collect();
        assert_eq!(format_integer(&IntegerValue::new(Width::W32, 0), &labels), "0x0");
    }
}
