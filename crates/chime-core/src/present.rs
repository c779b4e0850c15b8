//! Rendering collaborator.

/// Where the countdown text goes.
///
/// The core hands over two-decimal seconds strings; what "showing" means
/// is up to the host (the CLI rewrites a status line, a GUI would swap a
/// text node).
pub trait Presenter {
    fn show_remaining(&mut self, text: &str);
    fn show_current_interval(&mut self, text: &str);
}
