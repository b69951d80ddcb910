//! Streaming structured generation: a live news feed rendered as it grows.
//!
//! Each snapshot replaces the previous one, so the whole list is redrawn per
//! frame. The live view stops early after a few frames while the generation
//! keeps running in the background, and the final typed object is still
//! awaited afterwards.
//!
//! Requires `OPENAI_API_KEY` (a `.env` file works). Run with:
//! `cargo run --example news_feed --features openai`

use objstream::core::{GenerateObjectCallOptions, ObjectSchema, SchemaType, stream_object};
use objstream::providers::openai::OpenAI;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
enum Category {
    Politics,
    Technology,
    Sports,
    Entertainment,
    Science,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    headline: String,
    category: Category,
    timestamp: String,
    summary: String,
}

#[derive(Debug, Deserialize)]
struct NewsList {
    #[serde(rename = "newsItem")]
    news_item: Vec<NewsItem>,
}

fn render(frame: u32, snapshot: &Value) {
    println!("--- frame {frame} ---");
    let Some(items) = snapshot["newsItem"].as_array() else {
        println!("Waiting for news updates...\n");
        return;
    };
    for item in items {
        println!(
            "[{}] {}",
            item["category"].as_str().unwrap_or("..."),
            item["headline"].as_str().unwrap_or("..."),
        );
        if let Some(summary) = item["summary"].as_str() {
            println!("    {summary}");
        }
    }
    println!();
}

#[tokio::main]
async fn main() -> objstream::Result<()> {
    dotenv::dotenv().ok();

    let schema = ObjectSchema::object([(
        "newsItem",
        SchemaType::array(SchemaType::object([
            ("headline", SchemaType::string()),
            (
                "category",
                SchemaType::enumeration([
                    "Politics",
                    "Technology",
                    "Sports",
                    "Entertainment",
                    "Science",
                ]),
            ),
            ("timestamp", SchemaType::string()),
            ("summary", SchemaType::string()),
        ])),
    )])
    .name("newsFeed");

    let options = GenerateObjectCallOptions::builder()
        .system(Some(
            "You are a live news feed generator, creating real-time updates on various topics."
                .to_string(),
        ))
        .prompt(Some("Generate a live news update, at least 3 items.".to_string()))
        .schema(schema)
        .build()?;

    let response = stream_object(OpenAI::new("gpt-4o"), options);

    let mut live = response.partial_object_stream();
    let mut frame = 0;
    while let Some(snapshot) = live.recv().await {
        render(frame, &snapshot?);
        frame += 1;
        if frame >= 8 {
            println!("(leaving the live view, generation continues)\n");
            break;
        }
    }
    drop(live);

    let list: NewsList = response.object().await?;
    println!("final feed: {} items", list.news_item.len());
    for item in list.news_item {
        println!("[{:?}] {} at {}", item.category, item.headline, item.timestamp);
        println!("    {}", item.summary);
    }

    Ok(())
}
