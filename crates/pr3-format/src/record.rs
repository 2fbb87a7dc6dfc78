//! Record-counting writer shared by the model and rig containers

use std::io::Write;

use tracing::warn;

use crate::error::FormatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open { declared: usize, written: usize },
    Poisoned,
}

/// Owns the sink of a container being written and tracks how many of the
/// declared records have been emitted. Any failed write poisons it.
pub(crate) struct RecordWriter<W: Write> {
    sink: W,
    state: State,
}

impl<W: Write> RecordWriter<W> {
    /// Write the container header and open it for `declared` records.
    pub(crate) fn open(
        mut sink: W,
        declared: usize,
        header: impl FnOnce(&mut W) -> Result<(), FormatError>,
    ) -> Result<Self, FormatError> {
        header(&mut sink)?;
        Ok(Self {
            sink,
            state: State::Open {
                declared,
                written: 0,
            },
        })
    }

    /// Write one record.
    pub(crate) fn record(
        &mut self,
        body: impl FnOnce(&mut W) -> Result<(), FormatError>,
    ) -> Result<(), FormatError> {
        let (declared, written) = match self.state {
            State::Poisoned => return Err(FormatError::Poisoned),
            State::Open { declared, written } if written == declared => {
                return Err(FormatError::TooManyRecords(declared))
            }
            State::Open { declared, written } => (declared, written),
        };

        match body(&mut self.sink) {
            Ok(()) => {
                self.state = State::Open {
                    declared,
                    written: written + 1,
                };
                Ok(())
            }
            Err(e) => {
                warn!("Container write failed after {} records: {}", written, e);
                self.state = State::Poisoned;
                Err(e)
            }
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        match self.state {
            State::Open { declared, written } => declared - written,
            State::Poisoned => 0,
        }
    }

    /// Close the container and hand back the sink.
    pub(crate) fn finish(mut self) -> Result<W, FormatError> {
        match self.state {
            State::Poisoned => Err(FormatError::Poisoned),
            State::Open { declared, written } if written < declared => {
                Err(FormatError::MissingRecords(declared - written))
            }
            State::Open { .. } => {
                self.sink.flush()?;
                Ok(self.sink)
            }
        }
    }
}
