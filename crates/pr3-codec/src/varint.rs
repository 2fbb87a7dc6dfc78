//! Variable-length unsigned integers
//!
//! Each byte carries 7 value bits, least significant group first. The high
//! bit is set on every byte except the last.

use std::io::{Read, Write};

use crate::error::CodecError;

/// Longest encoding of a `u32`
pub const MAX_LEN_U32: usize = 5;
/// Longest encoding of a `u64`
pub const MAX_LEN_U64: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;

/// Append the encoding of `value` to `out`, returning the byte count.
pub fn encode(mut value: u64, out: &mut Vec<u8>) -> usize {
    let start = out.len();
    while value >= u64::from(CONTINUATION) {
        out.push((value as u8 & PAYLOAD) | CONTINUATION);
        value >>= 7;
    }
    out.push(value as u8);
    out.len() - start
}

/// Encode a signed value, failing when it is negative.
pub fn encode_signed(value: i64, out: &mut Vec<u8>) -> Result<usize, CodecError> {
    let value = u64::try_from(value).map_err(|_| CodecError::NegativeVarint(value))?;
    Ok(encode(value, out))
}

/// Number of bytes `value` occupies once encoded
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Decode one varint from the front of `bytes`, returning the value and the
/// number of bytes consumed.
pub fn decode(bytes: &[u8]) -> Result<(u64, usize), CodecError> {
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().enumerate() {
        let shift = 7 * i as u32;
        let payload = u64::from(byte & PAYLOAD);
        if shift >= 64 || (shift == 63 && payload > 1) {
            return Err(CodecError::VarintOverflow(64));
        }
        value |= payload << shift;
        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(CodecError::TruncatedVarint)
}

/// Write the encoding of `value` to a sink.
pub fn write<W: Write>(writer: &mut W, value: u64) -> std::io::Result<usize> {
    let mut buf = Vec::with_capacity(MAX_LEN_U64);
    let len = encode(value, &mut buf);
    writer.write_all(&buf)?;
    Ok(len)
}

/// Read one varint from a source. A source that ends mid-varint yields
/// [`CodecError::TruncatedVarint`].
pub fn read<R: Read>(reader: &mut R) -> Result<u64, CodecError> {
    let mut buf = Vec::with_capacity(MAX_LEN_U64);
    loop {
        let mut byte = [0u8; 1];
        if let Err(e) = reader.read_exact(&mut byte) {
            return Err(match e.kind() {
                std::io::ErrorKind::UnexpectedEof => CodecError::TruncatedVarint,
                _ => CodecError::Io(e),
            });
        }
        buf.push(byte[0]);
        if byte[0] & CONTINUATION == 0 || buf.len() > MAX_LEN_U64 {
            return decode(&buf).map(|(value, _)| value);
        }
    }
}

/// Read one varint that must fit in a `u32`.
pub fn read_u32<R: Read>(reader: &mut R) -> Result<u32, CodecError> {
    let value = read(reader)?;
    u32::try_from(value).map_err(|_| CodecError::VarintOverflow(32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        encode(value, &mut out);
        out
    }

    #[test]
    fn known_encodings() {
        assert_eq!(bytes(0), vec![0x00]);
        assert_eq!(bytes(1), vec![0x01]);
        assert_eq!(bytes(127), vec![0x7f]);
        assert_eq!(bytes(128), vec![0x80, 0x01]);
        assert_eq!(bytes(300), vec![0xac, 0x02]);
        assert_eq!(bytes(16384), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn round_trips_boundaries() {
        let values = [
            0u64,
            1,
            127,
            128,
            255,
            16383,
            16384,
            2_097_151,
            2_097_152,
            u32::MAX as u64,
            u64::MAX,
        ];
        for value in values {
            let encoded = bytes(value);
            assert_eq!(encoded.len(), encoded_len(value));
            assert_eq!(decode(&encoded).unwrap(), (value, encoded.len()));
        }
    }

    #[test]
    fn u32_fits_in_five_bytes() {
        assert_eq!(bytes(u32::MAX as u64).len(), MAX_LEN_U32);
        assert_eq!(bytes(u64::MAX).len(), MAX_LEN_U64);
    }

    #[test]
    fn continuation_bit_only_on_leading_bytes() {
        let encoded = bytes(1 << 30);
        let (last, rest) = encoded.split_last().unwrap();
        assert!(rest.iter().all(|b| b & CONTINUATION != 0));
        assert_eq!(last & CONTINUATION, 0);
    }

    #[test]
    fn rejects_negative() {
        let mut out = Vec::new();
        assert!(matches!(
            encode_signed(-1, &mut out),
            Err(CodecError::NegativeVarint(-1))
        ));
        assert!(out.is_empty());
        assert_eq!(encode_signed(42, &mut out).unwrap(), 1);
    }

    #[test]
    fn rejects_truncated_and_oversized() {
        assert!(matches!(decode(&[0x80, 0x80]), Err(CodecError::TruncatedVarint)));
        assert!(matches!(decode(&[]), Err(CodecError::TruncatedVarint)));
        assert!(matches!(
            decode(&[0xff; 11]),
            Err(CodecError::VarintOverflow(64))
        ));
    }

    #[test]
    fn stream_read_and_write() {
        let mut sink = Vec::new();
        write(&mut sink, 5).unwrap();
        write(&mut sink, 1 << 35).unwrap();
        write(&mut sink, 300).unwrap();

        let mut source = sink.as_slice();
        assert_eq!(read(&mut source).unwrap(), 5);
        assert!(matches!(
            read_u32(&mut source),
            Err(CodecError::VarintOverflow(32))
        ));
        assert_eq!(read_u32(&mut source).unwrap(), 300);
        assert!(matches!(read(&mut source), Err(CodecError::TruncatedVarint)));
    }

    #[test]
    fn decode_reports_consumed_prefix() {
        let (value, used) = decode(&[0xac, 0x02, 0xff]).unwrap();
        assert_eq!((value, used), (300, 2));
    }
}
