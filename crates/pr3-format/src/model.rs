//! PR3 model containers
//!
//! ```text
//! magic "PR3" | version u32 | object count
//! per object: name\0 material\0 transform(16 x f32)
//!             positions, normals, uvs (count + 3 components each)
//!             faces (count + 3 indices each)
//! ```
//!
//! Counts, indices and components are varints and half floats in the compact
//! encoding, and `i32`/`f32` in the legacy one.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use pr3_core::{Geometry, Pr3Model};
use tracing::debug;

use crate::binary::{
    read_count, read_faces, read_magic, read_nt_string, read_transform, read_vectors,
    write_count, write_faces, write_magic, write_nt_string, write_transform, write_vectors,
};
use crate::error::FormatError;
use crate::record::RecordWriter;
use crate::version::ModelVersion;

pub const MODEL_MAGIC: &[u8] = b"PR3";

/// Streaming writer for one model container.
pub struct ModelWriter<W: Write> {
    inner: RecordWriter<W>,
    version: ModelVersion,
}

impl<W: Write> ModelWriter<W> {
    /// Write the header for `object_count` objects.
    pub fn new(sink: W, version: ModelVersion, object_count: usize) -> Result<Self, FormatError> {
        let inner = RecordWriter::open(sink, object_count, |w| {
            write_magic(w, MODEL_MAGIC)?;
            w.write_u32::<LittleEndian>(version.as_u32())?;
            write_count(w, version, object_count)
        })?;
        Ok(Self { inner, version })
    }

    /// Objects still owed before the container can be finished
    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    pub fn write_object(&mut self, object: &Geometry) -> Result<(), FormatError> {
        let version = self.version;
        self.inner.record(|w| {
            write_nt_string(w, object.name())?;
            write_nt_string(w, object.material())?;
            write_transform(w, object.transform())?;
            write_vectors(w, version, object.positions())?;
            write_vectors(w, version, object.normals())?;
            write_vectors(w, version, object.uvs())?;
            write_faces(w, version, object.indices())
        })?;
        debug!(
            "Wrote object '{}' ({} vertices, {} faces)",
            object.name(),
            object.vertex_count(),
            object.face_count()
        );
        Ok(())
    }

    pub fn finish(self) -> Result<W, FormatError> {
        self.inner.finish()
    }
}

/// Write a complete model container to `sink`.
pub fn write_model<W: Write>(
    sink: W,
    version: ModelVersion,
    model: &Pr3Model,
) -> Result<W, FormatError> {
    let mut writer = ModelWriter::new(sink, version, model.objects.len())?;
    for object in &model.objects {
        writer.write_object(object)?;
    }
    writer.finish()
}

/// Encode a model container into memory.
pub fn encode_model(model: &Pr3Model, version: ModelVersion) -> Result<Vec<u8>, FormatError> {
    write_model(Vec::new(), version, model)
}

/// Read a model container, returning the encoding it was stored with.
pub fn read_model<R: Read>(mut source: R) -> Result<(ModelVersion, Pr3Model), FormatError> {
    let r = &mut source;
    read_magic(r, MODEL_MAGIC)?;
    let version = ModelVersion::try_from(r.read_u32::<LittleEndian>()?)?;
    let count = read_count(r, version)?;

    let mut objects = Vec::new();
    for _ in 0..count {
        let name = read_nt_string(r)?;
        let material = read_nt_string(r)?;
        let transform = read_transform(r)?;
        let positions = read_vectors(r, version)?;
        let normals = read_vectors(r, version)?;
        let uvs = read_vectors(r, version)?;
        let indices = read_faces(r, version)?;
        objects.push(Geometry::new(
            name, material, transform, positions, normals, uvs, indices,
        )?);
    }

    Ok((version, Pr3Model::new(objects)))
}
