//! Picture-URI composition boundary.

/// Composes absolute picture URIs from catalog-relative paths.
///
/// The catalog stores relative paths; where the images actually live is a
/// deployment concern, injected at the edges.
pub trait PictureUriComposer: Send + Sync {
    /// Turns a catalog-relative picture path into an absolute URI.
    fn compose(&self, relative_path: &str) -> String;
}

/// Composer that prefixes a configured base URL.
#[derive(Debug, Clone)]
pub struct BaseUrlComposer {
    base_url: String,
}

impl BaseUrlComposer {
    /// Creates a composer rooted at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl PictureUriComposer for BaseUrlComposer {
    fn compose(&self, relative_path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            relative_path.trim_start_matches('/')
        )
    }
}
