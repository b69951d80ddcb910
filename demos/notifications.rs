//! One-shot structured generation: notifications for a messages app.
//!
//! Requires `OPENAI_API_KEY` (a `.env` file works). Run with:
//! `cargo run --example notifications --features openai`

use objstream::core::{GenerateObjectCallOptions, ObjectSchema, SchemaType, generate_object};
use objstream::providers::openai::OpenAI;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Notification {
    name: String,
    message: String,
    #[serde(rename = "minutesAgo")]
    minutes_ago: f64,
}

#[derive(Debug, Deserialize)]
struct Notifications {
    notifications: Vec<Notification>,
}

#[tokio::main]
async fn main() -> objstream::Result<()> {
    dotenv::dotenv().ok();

    let schema = ObjectSchema::object([(
        "notifications",
        SchemaType::array(SchemaType::object([
            (
                "name",
                SchemaType::string().describe("Name of a fictional person."),
            ),
            (
                "message",
                SchemaType::string().describe("Do not use emojis or links."),
            ),
            ("minutesAgo", SchemaType::number()),
        ])),
    )])
    .name("notifications");

    let options = GenerateObjectCallOptions::builder()
        .system(Some(
            "You generate three notifications for a messages app.".to_string(),
        ))
        .prompt(Some("Messages during finals week.".to_string()))
        .schema(schema)
        .build()?;

    let response = generate_object::<Notifications, _>(OpenAI::new("gpt-4o"), options).await?;

    if let Some(model) = &response.model {
        println!("generated by {model}\n");
    }
    for n in response.object.notifications {
        println!("{} ({} minutes ago)", n.name, n.minutes_ago);
        println!("    {}\n", n.message);
    }

    Ok(())
}
