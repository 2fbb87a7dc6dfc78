//! Little-endian primitives shared by both container kinds

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use pr3_codec::{half_float, varint};
use pr3_core::Transform;

use crate::error::FormatError;
use crate::version::ModelVersion;

/// Upper bound for capacity reserved from an untrusted count
const MAX_PREALLOC: usize = 1 << 16;

pub(crate) fn write_magic<W: Write>(w: &mut W, magic: &[u8]) -> Result<(), FormatError> {
    w.write_all(magic)?;
    Ok(())
}

pub(crate) fn read_magic<R: Read>(r: &mut R, expected: &'static [u8]) -> Result<(), FormatError> {
    let mut found = vec![0u8; expected.len()];
    r.read_exact(&mut found)?;
    if found != expected {
        return Err(FormatError::BadMagic { expected, found });
    }
    Ok(())
}

/// Write a string followed by a NUL byte
pub(crate) fn write_nt_string<W: Write>(w: &mut W, s: &str) -> Result<(), FormatError> {
    if s.as_bytes().contains(&0) {
        return Err(FormatError::InteriorNul(s.to_string()));
    }
    w.write_all(s.as_bytes())?;
    w.write_u8(0)?;
    Ok(())
}

pub(crate) fn read_nt_string<R: Read>(r: &mut R) -> Result<String, FormatError> {
    let mut bytes = Vec::new();
    loop {
        match r.read_u8()? {
            0 => break,
            b => bytes.push(b),
        }
    }
    String::from_utf8(bytes).map_err(|_| FormatError::InvalidUtf8)
}

pub(crate) fn write_transform<W: Write>(w: &mut W, t: &Transform) -> Result<(), FormatError> {
    for &value in &t.rows {
        w.write_f32::<LittleEndian>(value)?;
    }
    Ok(())
}

pub(crate) fn read_transform<R: Read>(r: &mut R) -> Result<Transform, FormatError> {
    let mut rows = [0.0f32; 16];
    r.read_f32_into::<LittleEndian>(&mut rows)?;
    Ok(Transform::from_rows(rows))
}

pub(crate) fn write_u32<W: Write>(w: &mut W, value: usize) -> Result<(), FormatError> {
    let value = u32::try_from(value).map_err(|_| FormatError::CountOverflow(value))?;
    w.write_u32::<LittleEndian>(value)?;
    Ok(())
}

/// Write a count or index in the width the version prescribes.
pub(crate) fn write_count<W: Write>(
    w: &mut W,
    version: ModelVersion,
    value: usize,
) -> Result<(), FormatError> {
    match version {
        ModelVersion::Compact => {
            varint::write(w, value as u64)?;
        }
        ModelVersion::Legacy => {
            let value = i32::try_from(value).map_err(|_| FormatError::CountOverflow(value))?;
            w.write_i32::<LittleEndian>(value)?;
        }
    }
    Ok(())
}

pub(crate) fn read_count<R: Read>(r: &mut R, version: ModelVersion) -> Result<usize, FormatError> {
    match version {
        ModelVersion::Compact => Ok(varint::read_u32(r)? as usize),
        ModelVersion::Legacy => {
            let value = r.read_i32::<LittleEndian>()?;
            usize::try_from(value).map_err(|_| FormatError::NegativeCount(value))
        }
    }
}

/// Write a length-prefixed array of 3-component vectors.
pub(crate) fn write_vectors<W: Write>(
    w: &mut W,
    version: ModelVersion,
    vectors: &[[f32; 3]],
) -> Result<(), FormatError> {
    write_count(w, version, vectors.len())?;
    for v in vectors {
        match version {
            ModelVersion::Compact => {
                for bits in half_float::encode_vec3(v)? {
                    w.write_u16::<LittleEndian>(bits)?;
                }
            }
            ModelVersion::Legacy => {
                for &component in v {
                    w.write_f32::<LittleEndian>(component)?;
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn read_vectors<R: Read>(
    r: &mut R,
    version: ModelVersion,
) -> Result<Vec<[f32; 3]>, FormatError> {
    let count = read_count(r, version)?;
    let mut vectors = Vec::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        let v = match version {
            ModelVersion::Compact => {
                let mut bits = [0u16; 3];
                r.read_u16_into::<LittleEndian>(&mut bits)?;
                half_float::decode_vec3(bits)
            }
            ModelVersion::Legacy => {
                let mut v = [0.0f32; 3];
                r.read_f32_into::<LittleEndian>(&mut v)?;
                v
            }
        };
        vectors.push(v);
    }
    Ok(vectors)
}

/// Write a face count followed by three indices per face.
pub(crate) fn write_faces<W: Write>(
    w: &mut W,
    version: ModelVersion,
    indices: &[u32],
) -> Result<(), FormatError> {
    write_count(w, version, indices.len() / 3)?;
    for &index in indices {
        write_count(w, version, index as usize)?;
    }
    Ok(())
}

pub(crate) fn read_faces<R: Read>(r: &mut R, version: ModelVersion) -> Result<Vec<u32>, FormatError> {
    let faces = read_count(r, version)?;
    let mut indices = Vec::with_capacity(faces.saturating_mul(3).min(MAX_PREALLOC));
    for _ in 0..faces.saturating_mul(3) {
        let index = read_count(r, version)?;
        indices.push(u32::try_from(index).map_err(|_| FormatError::CountOverflow(index))?);
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nt_strings() {
        let mut buf = Vec::new();
        write_nt_string(&mut buf, "Cube").unwrap();
        write_nt_string(&mut buf, "").unwrap();
        assert_eq!(buf, b"Cube\0\0");

        let mut r = buf.as_slice();
        assert_eq!(read_nt_string(&mut r).unwrap(), "Cube");
        assert_eq!(read_nt_string(&mut r).unwrap(), "");
    }

    #[test]
    fn nt_string_rejects_interior_nul() {
        let mut buf = Vec::new();
        assert!(matches!(
            write_nt_string(&mut buf, "a\0b"),
            Err(FormatError::InteriorNul(_))
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn nt_string_requires_terminator_and_utf8() {
        let mut r: &[u8] = b"abc";
        assert!(matches!(read_nt_string(&mut r), Err(FormatError::Io(_))));

        let mut r: &[u8] = &[0xff, 0xfe, 0x00];
        assert!(matches!(read_nt_string(&mut r), Err(FormatError::InvalidUtf8)));
    }

    #[test]
    fn counts_follow_the_version() {
        let mut compact = Vec::new();
        write_count(&mut compact, ModelVersion::Compact, 300).unwrap();
        assert_eq!(compact, vec![0xac, 0x02]);

        let mut legacy = Vec::new();
        write_count(&mut legacy, ModelVersion::Legacy, 300).unwrap();
        assert_eq!(legacy, 300i32.to_le_bytes());

        assert_eq!(read_count(&mut compact.as_slice(), ModelVersion::Compact).unwrap(), 300);
        assert_eq!(read_count(&mut legacy.as_slice(), ModelVersion::Legacy).unwrap(), 300);
    }

    #[test]
    fn negative_legacy_count() {
        let bytes = (-5i32).to_le_bytes();
        assert!(matches!(
            read_count(&mut bytes.as_slice(), ModelVersion::Legacy),
            Err(FormatError::NegativeCount(-5))
        ));
    }

    #[test]
    fn compact_vectors_are_half_floats() {
        let mut buf = Vec::new();
        write_vectors(&mut buf, ModelVersion::Compact, &[[1.0, -2.0, 0.5]]).unwrap();
        assert_eq!(buf, vec![0x01, 0x00, 0x3c, 0x00, 0xc0, 0x00, 0x38]);
        assert_eq!(
            read_vectors(&mut buf.as_slice(), ModelVersion::Compact).unwrap(),
            vec![[1.0, -2.0, 0.5]]
        );
    }

    #[test]
    fn out_of_range_component_fails() {
        let mut buf = Vec::new();
        let err = write_vectors(&mut buf, ModelVersion::Compact, &[[0.0, 1.0e5, 0.0]]).unwrap_err();
        assert!(matches!(err, FormatError::Codec(_)));

        // the legacy encoding has no such limit
        buf.clear();
        write_vectors(&mut buf, ModelVersion::Legacy, &[[0.0, 1.0e5, 0.0]]).unwrap();
        assert_eq!(buf.len(), 4 + 12);
    }

    #[test]
    fn transform_is_sixteen_floats() {
        let mut buf = Vec::new();
        write_transform(&mut buf, &Transform::IDENTITY).unwrap();
        assert_eq!(buf.len(), 64);
        assert!(read_transform(&mut buf.as_slice()).unwrap().is_identity());
    }

    #[test]
    fn bad_magic() {
        let mut r: &[u8] = b"PR4";
        assert!(matches!(
            read_magic(&mut r, b"PR3"),
            Err(FormatError::BadMagic { .. })
        ));
    }
}
