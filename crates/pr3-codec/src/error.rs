/// Errors produced while encoding or decoding compact numbers.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("value {0} is outside the half-precision range")]
    HalfFloatOutOfRange(f32),

    #[error("cannot varint-encode negative value {0}")]
    NegativeVarint(i64),

    #[error("varint ends before its final byte")]
    TruncatedVarint,

    #[error("varint does not fit in {0} bits")]
    VarintOverflow(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
