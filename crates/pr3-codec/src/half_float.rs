//! Half-precision floats
//!
//! Geometry components are stored as 16-bit floats. The encoding is lossy:
//! a round trip is exact to within one half-precision ULP. Finite values
//! outside `[-HALF_MAX, HALF_MAX]` are rejected instead of being clamped to
//! infinity; infinities and NaN keep their meaning.

use half::f16;

use crate::error::CodecError;

/// Largest finite half-precision magnitude
pub const HALF_MAX: f32 = 65504.0;

/// Encode a single-precision value as half-precision bits.
pub fn encode(value: f32) -> Result<u16, CodecError> {
    if value.is_finite() && value.abs() > HALF_MAX {
        return Err(CodecError::HalfFloatOutOfRange(value));
    }
    Ok(f16::from_f32(value).to_bits())
}

/// Decode half-precision bits. Total over every `u16`.
pub fn decode(bits: u16) -> f32 {
    f16::from_bits(bits).to_f32()
}

/// Encode the three components of a vector
pub fn encode_vec3(v: &[f32; 3]) -> Result<[u16; 3], CodecError> {
    Ok([encode(v[0])?, encode(v[1])?, encode(v[2])?])
}

pub fn decode_vec3(bits: [u16; 3]) -> [f32; 3] {
    [decode(bits[0]), decode(bits[1]), decode(bits[2])]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Upper bound on one half ULP at `x`, with the subnormal floor.
    fn ulp(x: f32) -> f32 {
        (x.abs() * 2f32.powi(-10)).max(2f32.powi(-24))
    }

    #[test]
    fn exact_values_round_trip() {
        for x in [0.0f32, 1.0, -1.0, 0.5, 2.0, 1024.0, -0.25, HALF_MAX, -HALF_MAX] {
            assert_eq!(decode(encode(x).unwrap()), x);
        }
    }

    #[test]
    fn round_trip_within_one_ulp() {
        let samples = [
            0.1f32, -0.3333, 3.14159, 123.456, -9876.5, 40000.1, 1e-3, -7.77e-5, 65000.0,
        ];
        for x in samples {
            let y = decode(encode(x).unwrap());
            assert!((y - x).abs() <= ulp(x), "{x} decoded as {y}");
        }
    }

    #[test]
    fn subnormals_survive() {
        let x = 3.0e-6f32;
        let bits = encode(x).unwrap();
        assert_eq!(bits & 0x7c00, 0, "expected a subnormal encoding");
        assert_ne!(bits & 0x03ff, 0);
        assert!((decode(bits) - x).abs() <= ulp(x));

        // smallest positive subnormal
        assert_eq!(decode(0x0001), 2f32.powi(-24));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            encode(65505.0),
            Err(CodecError::HalfFloatOutOfRange(_))
        ));
        assert!(matches!(
            encode(-70000.0),
            Err(CodecError::HalfFloatOutOfRange(_))
        ));
        assert!(encode_vec3(&[0.0, 1.0e6, 0.0]).is_err());
    }

    #[test]
    fn special_values() {
        assert_eq!(encode(f32::INFINITY).unwrap(), 0x7c00);
        assert_eq!(encode(f32::NEG_INFINITY).unwrap(), 0xfc00);
        assert!(decode(encode(f32::NAN).unwrap()).is_nan());
        assert_eq!(decode(0x7c00), f32::INFINITY);
    }

    #[test]
    fn decode_is_total() {
        for bits in 0..=u16::MAX {
            let _ = decode(bits);
        }
    }

    #[test]
    fn sign_of_zero_is_kept() {
        assert_eq!(encode(-0.0).unwrap(), 0x8000);
        assert!(decode(0x8000).is_sign_negative());
    }
}
