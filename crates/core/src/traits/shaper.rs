//! Response shaping trait

use crate::response::UiHint;

/// Optional post-processing of response wording
///
/// A shaper may rephrase text but never changes what a response means. The
/// controller only ever hands it the text; hints and confirmation gating
/// are not its to touch.
pub trait ResponseShaper: Send + Sync {
    /// Return replacement text, or `None` to keep the original
    fn shape(&self, text: &str, hint: UiHint) -> Option<String>;
}

/// Shaper that leaves every response as is
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopShaper;

impl ResponseShaper for NoopShaper {
    fn shape(&self, _text: &str, _hint: UiHint) -> Option<String> {
        None
    }
}
