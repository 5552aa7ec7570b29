use crate::shared::Result;

/// OutputPresenter port for presenting rendered output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where a serialized view model is written.
pub trait OutputPresenter {
    /// Presents the content to the output destination
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}

impl<T: OutputPresenter + ?Sized> OutputPresenter for Box<T> {
    fn present(&self, content: &str) -> Result<()> {
        (**self).present(content)
    }
}
