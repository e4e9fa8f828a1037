//! User-facing messages for a finished submission.

use cropforge_schemas::recommendation::Outcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Success(String),
    Info(String),
    Warning(String),
}

impl Message {
    pub fn render(&self) -> String {
        match self {
            Message::Success(text) => format!("[ok]   {}", text),
            Message::Info(text) => format!("[info] {}", text),
            Message::Warning(text) => format!("[warn] {}", text),
        }
    }
}

/// "rice" → "Rice", "kidneyBeans" → "Kidneybeans".
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// The crop line always comes first, followed by either the fertilizer line or
/// the warning.
pub fn messages(outcome: &Outcome) -> Vec<Message> {
    let mut messages = vec![Message::Success(format!(
        "Recommended Crop: {}",
        capitalize(outcome.crop())
    ))];

    match outcome {
        Outcome::Completed {
            resolution,
            fertilizer,
            ..
        } => {
            let text = if resolution.was_substituted {
                format!(
                    "The recommended crop is '{}', but the fertilizer data does not cover it. \
                     Here is a fertilizer for a close relative, '{}'.\n       \
                     Recommended Fertilizer in {} soil: {}",
                    capitalize(&resolution.predicted),
                    capitalize(&resolution.resolved),
                    fertilizer.soil_type,
                    fertilizer.fertilizer
                )
            } else {
                format!(
                    "Recommended Fertilizer for {} in {} soil: {}",
                    capitalize(&fertilizer.crop),
                    fertilizer.soil_type,
                    fertilizer.fertilizer
                )
            };
            messages.push(Message::Info(text));
        }
        Outcome::CompletedWithWarning { warning, .. } => {
            messages.push(Message::Warning(format!(
                "Fertilizer could not be predicted. ({})",
                warning
            )));
        }
    }
    messages
}

pub fn print_outcome(outcome: &Outcome) {
    for message in messages(outcome) {
        println!("{}", message.render());
    }
}
