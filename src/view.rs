//! Terminal presentation of controller state.
//!
//! Pure mapping from a [`Snapshot`] to printable text; holds no state of its
//! own and never touches the controller.

use crate::app::Snapshot;
use crate::data_uri;
use crate::models::Stage;

const INTRO: &str = "MemeLord AI\n\
    Tell me what happened today, and I'll turn your pain into a meme.\n\
    The more tragic, the better.";

pub const GENERATING_TEXT_COPY: &str = "[1/2] Writing the joke...";
pub const GENERATING_IMAGE_COPY: &str = "[2/2] Painting the picture...";

/// Render a state snapshot as display text.
pub fn render(snapshot: &Snapshot) -> String {
    match snapshot.stage {
        Stage::Idle => {
            if snapshot.input.is_empty() {
                format!("{}\n\nUsage: memelord <topic>", INTRO)
            } else {
                format!("{}\n\nTopic: {}", INTRO, snapshot.input)
            }
        }
        Stage::GeneratingText => GENERATING_TEXT_COPY.to_string(),
        Stage::GeneratingImage => GENERATING_IMAGE_COPY.to_string(),
        Stage::Error => {
            let message = snapshot.error.as_deref().unwrap_or("Something went wrong.");
            format!(
                "Error: {}\nRun again with the same topic to retry: \"{}\"",
                message, snapshot.input
            )
        }
        Stage::Complete => match &snapshot.meme {
            Some(meme) => {
                let mut lines = vec![format!("\"{}\"", meme.content.caption)];
                if let Some(remark) = &meme.content.humor_explanation {
                    lines.push(format!("({})", remark));
                }
                lines.push(describe_image(&meme.image_url));
                lines.push(format!("Meme ID: {}", meme.id));
                lines.join("\n")
            }
            // Complete without a meme cannot happen via the controller.
            None => "Done, but the meme went missing.".to_string(),
        },
    }
}

fn describe_image(image_url: &str) -> String {
    match data_uri::decode(image_url) {
        Ok((mime_type, bytes)) => format!("Image: {} ({} bytes)", mime_type, bytes.len()),
        Err(_) => "Image: <unreadable>".to_string(),
    }
}
