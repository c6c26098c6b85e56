//! Scalar writers called by generated encoders.
//!
//! Quotes, keys, commas and delimiters are emitted by the generated code as
//! literal writes; these helpers cover the values that need formatting.

use std::fmt::{self, Write as _};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::BufMut;

/// Input bytes encoded per step of [`put_base64`]; a multiple of 3 so only
/// the last step can produce padding.
const BASE64_CHUNK: usize = 768;

/// Write an integer as unsigned decimal digits.
///
/// Every member of the integer family is funnelled through here after an
/// `as u64` cast, so negative signed values come out as their two's
/// complement reading (`-1i32` → `18446744073709551615`).
#[inline]
pub fn put_uint<B: BufMut>(buf: &mut B, mut value: u64) {
    // u64::MAX has 20 digits.
    let mut digits = [0u8; 20];
    let mut pos = digits.len();
    loop {
        pos -= 1;
        digits[pos] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    buf.put_slice(&digits[pos..]);
}

/// Write a double using the shortest representation that round-trips.
///
/// The output never uses exponent notation and always carries a fractional
/// point. Non-finite values are written as the quoted strings `"NaN"`,
/// `"Infinity"` and `"-Infinity"`.
#[inline]
pub fn put_f64<B: BufMut>(buf: &mut B, value: f64) {
    if value.is_finite() {
        put_decimal(buf, value, value.fract() == 0.0);
    } else {
        put_non_finite(buf, value.is_nan(), value.is_sign_negative());
    }
}

/// Write a float using the shortest representation that round-trips at
/// single precision. Same shape rules as [`put_f64`].
#[inline]
pub fn put_f32<B: BufMut>(buf: &mut B, value: f32) {
    if value.is_finite() {
        put_decimal(buf, value, value.fract() == 0.0);
    } else {
        put_non_finite(buf, value.is_nan(), value.is_sign_negative());
    }
}

/// Write `bytes` as standard, padded base64. Quotes are not included.
#[inline]
pub fn put_base64<B: BufMut>(buf: &mut B, bytes: &[u8]) {
    let mut out = [0u8; BASE64_CHUNK / 3 * 4];
    for chunk in bytes.chunks(BASE64_CHUNK) {
        match STANDARD.encode_slice(chunk, &mut out) {
            Ok(len) => buf.put_slice(&out[..len]),
            Err(_) => unreachable!("`out` holds the encoding of a full chunk"),
        }
    }
}

/// Formats straight into a [`BufMut`].
struct BufWriter<'a, B>(&'a mut B);

impl<B: BufMut> fmt::Write for BufWriter<'_, B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.put_slice(s.as_bytes());
        Ok(())
    }
}

fn put_decimal<B: BufMut, F: fmt::Display>(buf: &mut B, value: F, integral: bool) {
    // `Display` for floats never switches to exponent notation and prints
    // integral values without a fractional point.
    let _ = write!(BufWriter(&mut *buf), "{}", value);
    if integral {
        buf.put_slice(b".0");
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use proptest::property_test;

    use super::*;

    fn render<F: FnOnce(&mut Vec<u8>)>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn smoketest_put_uint() {
        #[track_caller]
        fn test_case(value: u64, expected: &str) {
            assert_eq!(render(|b| put_uint(b, value)), expected);
        }

        test_case(0, "0");
        test_case(7, "7");
        test_case(4_294_967_295, "4294967295");
        test_case(u64::MAX, "18446744073709551615");
    }

    #[test]
    fn test_put_uint_negative_signed_is_cast() {
        assert_eq!(render(|b| put_uint(b, -1i32 as u64)), "18446744073709551615");
        assert_eq!(render(|b| put_uint(b, -2i64 as u64)), "18446744073709551614");
        assert_eq!(render(|b| put_uint(b, i32::MIN as u64)), "18446744071562067968");
    }

    #[test]
    fn smoketest_put_f64() {
        #[track_caller]
        fn test_case(value: f64, expected: &str) {
            assert_eq!(render(|b| put_f64(b, value)), expected);
        }

        test_case(0.0, "0.0");
        test_case(1.0, "1.0");
        test_case(-2.5, "-2.5");
        test_case(0.1, "0.1");
        test_case(1e21, "1000000000000000000000.0");
        test_case(1e-7, "0.0000001");
        test_case(f64::NAN, "\"NaN\"");
        test_case(f64::INFINITY, "\"Infinity\"");
        test_case(f64::NEG_INFINITY, "\"-Infinity\"");
    }

    #[test]
    fn smoketest_put_f32() {
        assert_eq!(render(|b| put_f32(b, 0.1)), "0.1");
        assert_eq!(render(|b| put_f32(b, 3.0)), "3.0");
        assert_eq!(render(|b| put_f32(b, 16_777_216.0)), "16777216.0");
    }

    #[test]
    fn smoketest_put_base64() {
        assert_eq!(render(|b| put_base64(b, &[48, 59])), "MDs=");
        assert_eq!(render(|b| put_base64(b, &[])), "");
        assert_eq!(render(|b| put_base64(b, b"hello")), "aGVsbG8=");
    }

    #[test]
    fn test_put_f64_negative_zero() {
        assert_eq!(render(|b| put_f64(b, -0.0)), "-0.0");
        assert_eq!(render(|b| put_f32(b, -0.0)), "-0.0");
    }

    #[test]
    fn test_put_base64_spans_chunks() {
        #[track_caller]
        fn test_case(len: usize) {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 7 % 256) as u8).collect();
            assert_eq!(render(|b| put_base64(b, &bytes)), STANDARD.encode(&bytes));
        }

        test_case(BASE64_CHUNK - 1);
        test_case(BASE64_CHUNK);
        test_case(BASE64_CHUNK + 1);
        test_case(BASE64_CHUNK * 3 + 2);
    }

    #[property_test]
    fn proptest_put_base64_matches_engine(bytes: Vec<u8>) {
        prop_assert_eq!(render(|b| put_base64(b, &bytes)), STANDARD.encode(&bytes));
    }

    #[property_test]
    fn proptest_put_uint_matches_display(value: u64) {
        prop_assert_eq!(render(|b| put_uint(b, value)), value.to_string());
    }

    #[property_test]
    fn proptest_put_uint_parses_back(value: u64) {
        let text = render(|b| put_uint(b, value));
        let parsed: u64 = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(parsed, value);
    }

    #[property_test]
    fn proptest_put_f64_round_trips(value: f64) {
        prop_assume!(value.is_finite());
        let text = render(|b| put_f64(b, value));
        prop_assert!(!text.contains('e') && !text.contains('E'));
        prop_assert!(text.contains('.'));
        let parsed: f64 = text.parse().unwrap();
        prop_assert_eq!(parsed.to_bits(), value.to_bits());
    }

    #[property_test]
    fn proptest_put_f32_round_trips(value: f32) {
        prop_assume!(value.is_finite());
        let text = render(|b| put_f32(b, value));
        let parsed: f32 = text.parse().unwrap();
        prop_assert_eq!(parsed.to_bits(), value.to_bits());
    }
}
