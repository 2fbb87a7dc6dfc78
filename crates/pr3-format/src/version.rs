use crate::error::FormatError;

/// Model container versions. The version field selects the encoding; it is
/// never inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelVersion {
    /// Full-precision floats and 32-bit counts and indices
    Legacy = 1,
    /// Half-float components, varint counts and indices
    #[default]
    Compact = 2,
}

impl ModelVersion {
    pub const CURRENT: Self = Self::Compact;

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for ModelVersion {
    type Error = FormatError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Legacy),
            2 => Ok(Self::Compact),
            other => Err(FormatError::UnsupportedVersion(other)),
        }
    }
}
