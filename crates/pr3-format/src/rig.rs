//! PR3R rig containers
//!
//! ```text
//! magic "PR3R" | version u32 | bone count u32
//! per bone: name\0 flags(u8) [parent\0] [mesh index u32] transform(16 x f32)
//! ```

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use pr3_core::{Bone, Rig};
use tracing::debug;

use crate::binary::{
    read_magic, read_nt_string, read_transform, write_magic, write_nt_string, write_transform,
    write_u32,
};
use crate::error::FormatError;
use crate::record::RecordWriter;

pub const RIG_MAGIC: &[u8] = b"PR3R";
pub const RIG_VERSION: u32 = 1;

/// Bone has a parent name
pub const FLAG_HAS_PARENT: u8 = 0b0000_0001;
/// Bone has an associated mesh index
pub const FLAG_HAS_MESH: u8 = 0b0000_0010;

fn flags(bone: &Bone) -> u8 {
    let mut flags = 0;
    if bone.parent.is_some() {
        flags |= FLAG_HAS_PARENT;
    }
    if bone.associated_mesh.is_some() {
        flags |= FLAG_HAS_MESH;
    }
    flags
}

/// Streaming writer for one rig container.
pub struct RigWriter<W: Write> {
    inner: RecordWriter<W>,
}

impl<W: Write> RigWriter<W> {
    pub fn new(sink: W, bone_count: usize) -> Result<Self, FormatError> {
        let inner = RecordWriter::open(sink, bone_count, |w| {
            write_magic(w, RIG_MAGIC)?;
            w.write_u32::<LittleEndian>(RIG_VERSION)?;
            write_u32(w, bone_count)
        })?;
        Ok(Self { inner })
    }

    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    pub fn write_bone(&mut self, bone: &Bone) -> Result<(), FormatError> {
        self.inner.record(|w| {
            write_nt_string(w, &bone.name)?;
            w.write_u8(flags(bone))?;
            if let Some(parent) = &bone.parent {
                write_nt_string(w, parent)?;
            }
            if let Some(mesh) = bone.associated_mesh {
                w.write_u32::<LittleEndian>(mesh)?;
            }
            write_transform(w, &bone.transform)
        })?;
        debug!("Wrote bone '{}'", bone.name);
        Ok(())
    }

    pub fn finish(self) -> Result<W, FormatError> {
        self.inner.finish()
    }
}

/// Write a complete rig container to `sink`.
pub fn write_rig<W: Write>(sink: W, rig: &Rig) -> Result<W, FormatError> {
    let mut writer = RigWriter::new(sink, rig.bones.len())?;
    for bone in &rig.bones {
        writer.write_bone(bone)?;
    }
    writer.finish()
}

/// Encode a rig container into memory.
pub fn encode_rig(rig: &Rig) -> Result<Vec<u8>, FormatError> {
    write_rig(Vec::new(), rig)
}

pub fn read_rig<R: Read>(mut source: R) -> Result<Rig, FormatError> {
    let r = &mut source;
    read_magic(r, RIG_MAGIC)?;
    let version = r.read_u32::<LittleEndian>()?;
    if version != RIG_VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }

    let count = r.read_u32::<LittleEndian>()?;
    let mut bones = Vec::new();
    for _ in 0..count {
        let name = read_nt_string(r)?;
        let flags = r.read_u8()?;
        if flags & !(FLAG_HAS_PARENT | FLAG_HAS_MESH) != 0 {
            return Err(FormatError::UnknownFlags(flags));
        }
        let parent = match flags & FLAG_HAS_PARENT {
            0 => None,
            _ => Some(read_nt_string(r)?),
        };
        let associated_mesh = match flags & FLAG_HAS_MESH {
            0 => None,
            _ => Some(r.read_u32::<LittleEndian>()?),
        };
        let transform = read_transform(r)?;
        bones.push(Bone {
            name,
            transform,
            associated_mesh,
            parent,
        });
    }

    Ok(Rig::new(bones))
}
