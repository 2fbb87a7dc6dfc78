use pr3_codec::CodecError;
use pr3_core::GeometryError;

/// Errors raised while reading or writing PR3 containers.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Codec(#[from] CodecError),

    #[error("invalid geometry in container: {0}")]
    Geometry(#[from] GeometryError),

    #[error("bad magic: expected {expected:?}, found {found:?}")]
    BadMagic {
        expected: &'static [u8],
        found: Vec<u8>,
    },

    #[error("unsupported container version {0}")]
    UnsupportedVersion(u32),

    #[error("string {0:?} contains a NUL byte")]
    InteriorNul(String),

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("count {0} does not fit the container's integer width")]
    CountOverflow(usize),

    #[error("negative count {0}")]
    NegativeCount(i32),

    #[error("unknown bone flags {0:#04x}")]
    UnknownFlags(u8),

    #[error("container declared {0} records, refusing to write more")]
    TooManyRecords(usize),

    #[error("container closed with {0} declared records still unwritten")]
    MissingRecords(usize),

    #[error("writer is unusable after an earlier failure")]
    Poisoned,
}
