use serde::Serialize;

use crate::models::vehicle::fleet;
use crate::models::voice::{Role, TranscriptTurn, View};
use crate::voice::rules::{navigation_rules, CommandOutcome, ConsoleContext, RuleTable};

pub const LISTENING_PLACEHOLDER: &str = "Listening...";
pub const RECOGNITION_UNSUPPORTED: &str =
    "❌ Speech recognition not supported on this device. Please use a browser with speech recognition.";

/// Fixed synthesis parameters for every utterance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub locale: &'static str,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
            locale: "en-US",
        }
    }
}

/// Text-to-speech capability.
pub trait SpeechSynthesizer: Send {
    /// Drops whatever utterance is in flight.
    fn cancel(&mut self);
    fn speak(&mut self, text: &str, settings: &SpeechSettings);
}

/// Writes utterances to the trace log.
#[derive(Debug, Default)]
pub struct TracingSynthesizer;

impl SpeechSynthesizer for TracingSynthesizer {
    fn cancel(&mut self) {}

    fn speak(&mut self, text: &str, settings: &SpeechSettings) {
        tracing::info!(rate = settings.rate, locale = settings.locale, "speaking: {text}");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeechCall {
    Cancel,
    Speak(String),
}

/// Keeps every call for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSynthesizer {
    pub calls: std::sync::Arc<std::sync::Mutex<Vec<SpeechCall>>>,
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn cancel(&mut self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(SpeechCall::Cancel);
        }
    }

    fn speak(&mut self, text: &str, _settings: &SpeechSettings) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(SpeechCall::Speak(text.to_string()));
        }
    }
}

/// The shell's voice assistant: single-shot recognition feeding the
/// navigation rules, with every reply shown and spoken.
pub struct VoiceAssistant {
    rules: RuleTable<ConsoleContext>,
    context: ConsoleContext,
    synthesizer: Option<Box<dyn SpeechSynthesizer>>,
    recognition_available: bool,
    settings: SpeechSettings,
    active_view: View,
    listening: bool,
    speaking: bool,
    transcript: String,
    response: String,
    history: Vec<TranscriptTurn>,
}

impl VoiceAssistant {
    /// `synthesizer` is `None` when the host cannot speak.
    pub fn new(synthesizer: Option<Box<dyn SpeechSynthesizer>>) -> Self {
        Self {
            rules: navigation_rules(),
            context: ConsoleContext { vehicles: fleet() },
            synthesizer,
            recognition_available: true,
            settings: SpeechSettings::default(),
            active_view: View::Dashboard,
            listening: false,
            speaking: false,
            transcript: String::new(),
            response: String::new(),
            history: Vec::new(),
        }
    }

    pub fn without_recognition(mut self) -> Self {
        self.recognition_available = false;
        self
    }

    /// Starts one recognition attempt. Returns `false` when recognition is unavailable.
    pub fn begin_listening(&mut self) -> bool {
        if !self.recognition_available {
            self.response = RECOGNITION_UNSUPPORTED.to_string();
            return false;
        }
        self.listening = true;
        self.transcript = LISTENING_PLACEHOLDER.to_string();
        self.response.clear();
        true
    }

    pub fn recognized(&mut self, text: &str) -> CommandOutcome {
        self.transcript = text.to_string();
        self.handle_command(text)
    }

    /// Recognition failures are shown once and never retried.
    pub fn recognition_failed(&mut self, error: &str) {
        self.listening = false;
        self.transcript.clear();
        self.response = format!("❌ Error: {error}. Please try again.");
    }

    pub fn recognition_ended(&mut self) {
        self.listening = false;
    }

    /// Interprets typed or recognized text, applies navigation and speaks the reply.
    pub fn handle_command(&mut self, text: &str) -> CommandOutcome {
        self.history.push(TranscriptTurn {
            role: Role::User,
            text: text.to_string(),
        });

        let outcome = self.rules.interpret(&self.context, text);
        if let Some(view) = outcome.view {
            self.active_view = view;
        }
        self.response = outcome.response.clone();
        self.history.push(TranscriptTurn {
            role: Role::Assistant,
            text: outcome.response.clone(),
        });
        self.speak(&outcome.response);

        tracing::debug!(rule = outcome.rule, view = ?outcome.view, "voice command handled");
        outcome
    }

    /// Cancels any utterance in flight before starting the new one.
    pub fn speak(&mut self, text: &str) {
        let Some(synth) = self.synthesizer.as_mut() else {
            return;
        };
        synth.cancel();
        synth.speak(text, &self.settings);
        self.speaking = true;
    }

    pub fn finished_speaking(&mut self) {
        self.speaking = false;
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn history(&self) -> &[TranscriptTurn] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recording() -> (VoiceAssistant, Arc<Mutex<Vec<SpeechCall>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let synth = RecordingSynthesizer { calls: Arc::clone(&calls) };
        (VoiceAssistant::new(Some(Box::new(synth))), calls)
    }

    #[test]
    fn recognized_command_navigates_and_speaks() {
        let (mut assistant, calls) = recording();
        assert!(assistant.begin_listening());
        assert!(assistant.is_listening());
        assert_eq!(assistant.transcript(), LISTENING_PLACEHOLDER);

        let outcome = assistant.recognized("schedule appointment");
        assistant.recognition_ended();

        assert_eq!(assistant.active_view(), View::Scheduling);
        assert!(assistant.response().to_lowercase().contains("scheduling"));
        assert_eq!(assistant.transcript(), "schedule appointment");
        assert!(!assistant.is_listening());
        assert!(assistant.is_speaking());
        assert_eq!(
            *calls.lock().unwrap(),
            vec![SpeechCall::Cancel, SpeechCall::Speak(outcome.response)]
        );
        assert_eq!(assistant.history().len(), 2);
    }

    #[test]
    fn new_utterance_cancels_previous_one() {
        let (mut assistant, calls) = recording();
        assistant.handle_command("help");
        assistant.handle_command("show analytics");
        let calls = calls.lock().unwrap();
        let cancels = calls.iter().filter(|c| **c == SpeechCall::Cancel).count();
        assert_eq!(cancels, 2);
        assert_eq!(calls[2], SpeechCall::Cancel);
    }

    #[test]
    fn recognition_error_resets_listening() {
        let (mut assistant, _) = recording();
        assistant.begin_listening();
        assistant.recognition_failed("no-speech");
        assert!(!assistant.is_listening());
        assert_eq!(assistant.transcript(), "");
        assert_eq!(assistant.response(), "❌ Error: no-speech. Please try again.");
    }

    #[test]
    fn missing_capabilities_degrade_gracefully() {
        let mut assistant = VoiceAssistant::new(None).without_recognition();
        assert!(!assistant.begin_listening());
        assert_eq!(assistant.response(), RECOGNITION_UNSUPPORTED);

        assistant.handle_command("security status");
        assert_eq!(assistant.active_view(), View::Ueba);
        assert!(!assistant.is_speaking());
    }

    #[test]
    fn commands_without_navigation_keep_the_view() {
        let (mut assistant, _) = recording();
        assistant.handle_command("show analytics");
        assistant.handle_command("what can you do");
        assert_eq!(assistant.active_view(), View::Analytics);
    }
}
