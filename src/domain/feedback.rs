use crate::domain::models::SoundCue;

/// Non-speech feedback hooks invoked synchronously by the menu operations.
/// `cue` fires before any resulting outbound command is dispatched.
#[cfg_attr(test, mockall::automock)]
pub trait UiFeedback {
    fn cue(&mut self, cue: SoundCue);

    /// Selection move that hit a list edge without moving. Carries the
    /// current item's text so the caller can re-announce it.
    fn boundary_repeat(&mut self, text: &str);

    /// Server-requested sound effect by name.
    fn server_sound(&mut self, name: &str);
}

/// Records feedback for the caller to apply after the update settles.
/// Doubles as the assertion point in reducer tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingFeedback {
    pub cues: Vec<SoundCue>,
    pub boundary_text: Option<String>,
    pub server_sounds: Vec<String>,
}

impl UiFeedback for PendingFeedback {
    fn cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    fn boundary_repeat(&mut self, text: &str) {
        self.boundary_text = Some(text.to_string());
    }

    fn server_sound(&mut self, name: &str) {
        self.server_sounds.push(name.to_string());
    }
}
