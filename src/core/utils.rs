use crate::core::Message;

/// Resolves the messages to be used for a generation request.
///
/// This function takes a prompt and a list of messages and returns a vector of
/// messages that can be used for LanguageModelCallOptions.
/// if no messages are provided, a default message is created with the prompt and system prompt.
pub fn resolve_messages(
    system: Option<String>,
    prompt: Option<String>,
    messages: Option<Vec<Message>>,
) -> (Option<String>, Vec<Message>) {
    let messages = match messages {
        Some(messages) if !messages.is_empty() => messages,
        _ => vec![Message::User(prompt.unwrap_or_default().into())],
    };

    let system = system.or_else(|| {
        messages.iter().find_map(|m| match m {
            Message::System(s) => Some(s.content.clone()),
            _ => None,
        })
    });

    (system, messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_becomes_a_user_message() {
        let (system, messages) = resolve_messages(
            Some("Be terse.".to_string()),
            Some("Say hi.".to_string()),
            None,
        );
        assert_eq!(system.as_deref(), Some("Be terse."));
        assert_eq!(messages.len(), 1);
        assert!(matches!(&messages[0], Message::User(u) if u.content == "Say hi."));
    }

    #[test]
    fn test_explicit_messages_pass_through() {
        let given = Message::builder().user("Hello!").assistant("Hi.").build();
        let (system, messages) = resolve_messages(None, None, Some(given.clone()));
        assert!(system.is_none());
        assert_eq!(messages.len(), given.len());
    }

    #[test]
    fn test_system_is_pulled_from_messages_when_unset() {
        let given = Message::builder().system("You are helpful.").user("Hey").build();
        let (system, _messages) = resolve_messages(None, None, Some(given));
        assert_eq!(system.as_deref(), Some("You are helpful."));
    }
}
