use std::sync::Arc;

/// One encoded image of the target window.
///
/// The bytes are immutable and reference counted, so cloning a frame never
/// copies pixel data and a reader can hold on to it while newer frames are
/// published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Arc<[u8]>,
    width: u32,
    height: u32,
    sequence: u64,
}

impl Frame {
    pub fn new(data: impl Into<Arc<[u8]>>, width: u32, height: u32) -> Self {
        Self {
            data: data.into(),
            width,
            height,
            sequence: 0,
        }
    }

    /// Encoded image bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Publish order assigned by the store, starting at 1. Zero until published.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub(crate) fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }
}
