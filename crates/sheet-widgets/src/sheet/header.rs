#![forbid(unsafe_code)]

//! Header chrome shown above sheet content.

/// Action emitted by the sheet's chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetAction {
    /// The header's close button was activated.
    Close,
    /// Escape was pressed while the sheet had focus.
    Escape,
}

/// Title, subtitle, and close button configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetHeader {
    title: Option<String>,
    subtitle: Option<String>,
    show_close_button: bool,
}

impl Default for SheetHeader {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            show_close_button: true,
        }
    }
}

impl SheetHeader {
    /// Create a header with a close button and no text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set subtitle.
    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Show or hide the close button.
    #[must_use]
    pub fn close_button(mut self, show: bool) -> Self {
        self.show_close_button = show;
        self
    }

    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn subtitle_text(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    #[must_use]
    pub fn shows_close_button(&self) -> bool {
        self.show_close_button
    }

    /// Whether the header has anything to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.subtitle.is_none() && !self.show_close_button
    }

    /// Map an action to whether it should dismiss the sheet.
    ///
    /// `Close` only counts when the close button is shown.
    #[must_use]
    pub fn dismisses_on(&self, action: SheetAction) -> bool {
        match action {
            SheetAction::Close => self.show_close_button,
            SheetAction::Escape => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shows_close_button_only() {
        let header = SheetHeader::default();
        assert!(header.shows_close_button());
        assert_eq!(header.title_text(), None);
        assert!(!header.is_empty());
    }

    #[test]
    fn builder_sets_text() {
        let header = SheetHeader::new().title("Filters").subtitle("3 active");
        assert_eq!(header.title_text(), Some("Filters"));
        assert_eq!(header.subtitle_text(), Some("3 active"));
    }

    #[test]
    fn hidden_close_button_ignores_close_action() {
        let header = SheetHeader::new().close_button(false);
        assert!(header.is_empty());
        assert!(!header.dismisses_on(SheetAction::Close));
        assert!(header.dismisses_on(SheetAction::Escape));
    }
}
