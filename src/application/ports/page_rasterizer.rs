use super::FileLoaderError;

/// Renders every page of a PDF to an encoded image, in page order.
///
/// Implementations block; callers run them on the blocking pool.
pub trait PageRasterizer: Send + Sync {
    fn rasterize(&self, pdf: &[u8]) -> Result<Vec<Vec<u8>>, FileLoaderError>;
}
