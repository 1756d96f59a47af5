//! Assistant reply generation

/// Produces the assistant's reply to a user message
pub trait Responder: Send + Sync {
    fn respond(&self, prompt: &str) -> String;
}

/// Acknowledges the message by quoting it back
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoResponder;

impl Responder for EchoResponder {
    fn respond(&self, prompt: &str) -> String {
        format!("I received your message: \"{prompt}\". How can I further assist you?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_quotes_prompt() {
        assert_eq!(
            EchoResponder.respond("hello"),
            "I received your message: \"hello\". How can I further assist you?"
        );
    }
}
