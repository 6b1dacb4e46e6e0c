pub mod assistant;
pub mod rules;

pub use assistant::{SpeechSettings, SpeechSynthesizer, VoiceAssistant};
pub use rules::{navigation_rules, CommandOutcome, CommandRule, ConsoleContext, Reply, RuleTable};
