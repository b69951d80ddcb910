//! Helper functions and conversions for the OpenAI provider.

use crate::core::types::{LanguageModelCallOptions, Message};
use async_openai::types::ResponseFormatJsonSchema;
use async_openai::types::responses::{
    CreateResponse, Input, InputContent, InputItem, InputMessage, InputMessageType, Role,
    TextConfig, TextResponseFormat,
};

impl From<LanguageModelCallOptions> for CreateResponse {
    fn from(options: LanguageModelCallOptions) -> Self {
        let system = options.system;

        // When a system prompt is given it replaces any system messages in
        // the list, so the request never carries two of them.
        let mut items: Vec<InputItem> = options
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter(|m| !(system.is_some() && matches!(m, Message::System(_))))
            .map(Into::into)
            .collect();

        // system prompt first since openai likes it at the top
        if let Some(system) = system {
            items.insert(
                0,
                InputItem::Message(InputMessage {
                    role: Role::System,
                    kind: InputMessageType::default(),
                    content: InputContent::TextInput(system),
                }),
            );
        }

        // top_k and stop have no Responses API mapping and are not forwarded
        CreateResponse {
            input: Input::Items(items),
            text: Some(TextConfig {
                format: TextResponseFormat::JsonSchema(ResponseFormatJsonSchema {
                    name: options.schema_name,
                    description: options.schema_description,
                    schema: Some(options.schema),
                    strict: Some(true),
                }),
            }),
            temperature: options.temperature.map(|t| t as f32 / 100.0),
            max_output_tokens: options.max_tokens,
            stream: Some(false),
            top_p: options.top_p.map(|t| t as f32 / 100.0),
            ..Default::default()
        }
    }
}

impl From<Message> for InputItem {
    fn from(m: Message) -> Self {
        let mut text_inp = InputMessage {
            role: Role::System,
            kind: InputMessageType::default(),
            content: InputContent::TextInput(Default::default()),
        };
        match m {
            Message::Assistant(a) => {
                text_inp.role = Role::Assistant;
                text_inp.content = InputContent::TextInput(a.content);
            }
            Message::User(u) => {
                text_inp.role = Role::User;
                text_inp.content = InputContent::TextInput(u.content);
            }
            Message::System(s) => {
                text_inp.role = Role::System;
                text_inp.content = InputContent::TextInput(s.content);
            }
        }
        InputItem::Message(text_inp)
    }
}
