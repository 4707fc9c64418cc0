//! Image overlay state.
//!
//! Independent of card navigation: showing or dismissing an image never
//! touches the navigation state or its history.

/// Image overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LightboxState {
    #[default]
    Hidden,
    Showing { src: String, alt: String },
}

impl LightboxState {
    pub fn is_showing(&self) -> bool {
        matches!(self, LightboxState::Showing { .. })
    }

    /// Show an image, replacing any image already shown.
    pub fn show(&mut self, src: impl Into<String>, alt: impl Into<String>) {
        *self = LightboxState::Showing {
            src: src.into(),
            alt: alt.into(),
        };
    }

    /// Dismiss the overlay. Returns whether it was showing.
    pub fn close(&mut self) -> bool {
        std::mem::take(self).is_showing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_then_close() {
        let mut lightbox = LightboxState::default();
        assert!(!lightbox.is_showing());

        lightbox.show("/diagram.png", "Diagram");
        assert_eq!(
            lightbox,
            LightboxState::Showing {
                src: "/diagram.png".to_string(),
                alt: "Diagram".to_string(),
            }
        );

        assert!(lightbox.close());
        assert_eq!(lightbox, LightboxState::Hidden);
        assert!(!lightbox.close(), "closing a hidden overlay reports no change");
    }

    #[test]
    fn showing_another_image_replaces_the_first() {
        let mut lightbox = LightboxState::default();
        lightbox.show("a.png", "A");
        lightbox.show("b.png", "B");
        assert_eq!(
            lightbox,
            LightboxState::Showing {
                src: "b.png".to_string(),
                alt: "B".to_string(),
            }
        );
    }
}
