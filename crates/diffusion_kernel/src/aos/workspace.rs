//! Pre-allocated line buffer for serial axis passes.
//!
//! One [`LineWorkspace`] is sized once to the longest axis of the volume
//! and reused by every line of every pass, so a diffusion step performs no
//! per-line allocation. The buffer is released when the workspace drops,
//! including on early return from a failed step.

/// Reusable scratch line.
///
/// # Examples
///
/// ```rust
/// use diffusion_kernel::aos::LineWorkspace;
///
/// let mut workspace = LineWorkspace::new(8);
/// assert_eq!(workspace.line_mut(5).len(), 5);
///
/// workspace.ensure_capacity(32);
/// assert!(workspace.capacity() >= 32);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineWorkspace {
    buffer: Vec<f64>,
}

impl LineWorkspace {
    /// Creates a workspace holding lines of up to `capacity` elements.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity],
        }
    }

    /// Grows the buffer so it holds at least `len` elements. Never shrinks.
    pub fn ensure_capacity(&mut self, len: usize) {
        if len > self.buffer.len() {
            self.buffer.resize(len, 0.0);
        }
    }

    /// Returns the current capacity in elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns a scratch line of exactly `len` elements, growing if needed.
    ///
    /// Contents are left over from the previous use.
    #[inline]
    pub fn line_mut(&mut self, len: usize) -> &mut [f64] {
        self.ensure_capacity(len);
        &mut self.buffer[..len]
    }

    /// Returns the memory held by the buffer in bytes.
    #[inline]
    pub fn memory_usage(&self) -> usize {
        self.buffer.capacity() * std::mem::size_of::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_capacity() {
        let workspace = LineWorkspace::new(16);
        assert_eq!(workspace.capacity(), 16);
        assert!(workspace.memory_usage() >= 16 * 8);
    }

    #[test]
    fn test_line_mut_grows_on_demand() {
        let mut workspace = LineWorkspace::default();
        assert_eq!(workspace.capacity(), 0);
        assert_eq!(workspace.line_mut(10).len(), 10);
        assert_eq!(workspace.capacity(), 10);
    }

    #[test]
    fn test_never_shrinks() {
        let mut workspace = LineWorkspace::new(64);
        workspace.ensure_capacity(4);
        assert_eq!(workspace.capacity(), 64);
        assert_eq!(workspace.line_mut(4).len(), 4);
        assert_eq!(workspace.capacity(), 64);
    }

    #[test]
    fn test_contents_persist_between_uses() {
        let mut workspace = LineWorkspace::new(4);
        workspace.line_mut(4).copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(workspace.line_mut(2), &[1.0, 2.0]);
    }
}
