use std::borrow::Cow;
use tracing::trace;

/// Transient editing state of one input field.
///
/// While `raw_text` is present it is shown verbatim, parseable or not.
/// Otherwise the field shows the formatted canonical value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditState {
    raw_text: Option<String>,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.raw_text.is_some()
    }

    /// Text to display; `formatted` is only evaluated when there is no raw text
    pub fn display<'a, F>(&'a self, formatted: F) -> Cow<'a, str>
    where
        F: FnOnce() -> String,
    {
        match &self.raw_text {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(formatted()),
        }
    }

    pub fn edit(&mut self, text: String) {
        trace!(text = %text, "edit");
        self.raw_text = Some(text);
    }

    /// Seed the raw text with what the user currently sees, unless already editing
    pub fn focus(&mut self, displayed: String) {
        if self.raw_text.is_none() {
            trace!(text = %displayed, "focus seeds raw text");
            self.raw_text = Some(displayed);
        }
    }

    pub fn blur(&mut self) {
        trace!("blur clears raw text");
        self.raw_text = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefers_raw_text() {
        let mut state = EditState::new();
        assert_eq!(state.display(|| "1.000".to_string()), "1.000");

        state.edit("1.".to_string());
        assert_eq!(state.display(|| panic!("formatter must not run")), "1.");
    }

    #[test]
    fn test_focus_keeps_existing_raw_text() {
        let mut state = EditState::new();
        state.edit("12".to_string());
        state.focus("99.000".to_string());
        assert_eq!(state.raw_text(), Some("12"));
    }

    #[test]
    fn test_blur_clears() {
        let mut state = EditState::new();
        state.focus("5".to_string());
        assert!(state.is_editing());
        state.blur();
        assert!(!state.is_editing());
        assert_eq!(state.raw_text(), None);
    }
}
