use std::fmt;

/// Kind of GPU resource an object represents.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GlirType {
    Buffer,
    Program,
    Texture,
    RenderBuffer,
    FrameBuffer,
    VertexArray,
}

impl GlirType {
    /// Whether objects of this kind live in the shared namespace.
    ///
    /// Render buffers and frame buffers belong to a single surface; all
    /// other kinds can be used from any context sharing the namespace.
    #[inline]
    pub const fn is_shareable(self) -> bool {
        !matches!(self, GlirType::RenderBuffer | GlirType::FrameBuffer)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GlirType::Buffer => "Buffer",
            GlirType::Program => "Program",
            GlirType::Texture => "Texture",
            GlirType::RenderBuffer => "RenderBuffer",
            GlirType::FrameBuffer => "FrameBuffer",
            GlirType::VertexArray => "VertexArray",
        }
    }
}

impl fmt::Display for GlirType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
