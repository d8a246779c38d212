//! Ordered accumulation of captured sample chunks.
//!
//! The audio callback pushes whatever the device hands it; assembly is a
//! plain concatenation in arrival order, no chunk dropped or duplicated.

#[derive(Debug, Default)]
pub struct ChunkBuffer {
    samples: Vec<f32>,
    chunk_count: usize,
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk. Called from the audio callback, so it must not
    /// block beyond the extend itself.
    pub fn push(&mut self, chunk: &[f32]) {
        self.samples.extend_from_slice(chunk);
        self.chunk_count += 1;
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Final assembly: all chunks concatenated in arrival order.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembly_is_concatenation_in_arrival_order() {
        let chunks = [
            vec![0.1f32, 0.2],
            vec![0.3f32],
            vec![0.4f32, 0.5, 0.6],
        ];

        let mut buffer = ChunkBuffer::new();
        for chunk in &chunks {
            buffer.push(chunk);
        }

        assert_eq!(buffer.chunk_count(), 3);
        let expected: Vec<f32> = chunks.iter().flatten().copied().collect();
        assert_eq!(buffer.into_samples(), expected);
    }

    #[test]
    fn empty_chunks_are_counted_but_add_nothing() {
        let mut buffer = ChunkBuffer::new();
        buffer.push(&[]);
        buffer.push(&[1.0]);
        buffer.push(&[]);

        assert_eq!(buffer.chunk_count(), 3);
        assert_eq!(buffer.into_samples(), vec![1.0]);
    }
}
