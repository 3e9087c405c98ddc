//! Turn assembly: the only gate between raw input and the network.

use crate::image::ImageAttachment;
use crate::models::Turn;
use crate::prompts;
use thiserror::Error;

/// Returned when there is nothing to send. Carries the prompt shown to the
/// user; no request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Rejected {
    pub message: &'static str,
}

/// Build a [`Turn`] from the raw input line and the pending image.
///
/// The text is trimmed. The image is assumed to be validated already.
/// Nothing is mutated; clearing the pending input is the caller's job.
pub fn assemble(raw_text: &str, image: Option<&ImageAttachment>) -> Result<Turn, Rejected> {
    let text = raw_text.trim();

    if text.is_empty() && image.is_none() {
        return Err(Rejected {
            message: prompts::EMPTY_TURN,
        });
    }

    Ok(Turn {
        text: text.to_string(),
        image: image.cloned(),
    })
}

/// Input state waiting for the next send.
#[derive(Debug, Default)]
pub struct PendingInput {
    image: Option<ImageAttachment>,
}

impl PendingInput {
    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    pub fn attach(&mut self, image: ImageAttachment) {
        self.image = Some(image);
    }

    /// Drop the pending image; returns whether one was attached.
    pub fn clear(&mut self) -> bool {
        self.image.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::test_support::PNG_DATA_URL;

    fn png() -> ImageAttachment {
        ImageAttachment::from_data_url(PNG_DATA_URL).unwrap()
    }

    #[test]
    fn test_empty_text_without_image_is_rejected() {
        assert_eq!(
            assemble("", None),
            Err(Rejected {
                message: prompts::EMPTY_TURN
            })
        );
        assert!(assemble("  \n\t ", None).is_err());
    }

    #[test]
    fn test_text_is_trimmed() {
        let turn = assemble("  hello there \n", None).unwrap();
        assert_eq!(turn.text, "hello there");
        assert!(turn.image.is_none());
    }

    #[test]
    fn test_image_without_text_is_accepted() {
        let image = png();
        let turn = assemble("   ", Some(&image)).unwrap();
        assert_eq!(turn.text, "");
        assert_eq!(turn.image, Some(image));
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let image = png();
        let first = assemble(" what is this? ", Some(&image)).unwrap();
        let second = assemble(" what is this? ", Some(&image)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pending_input_clear() {
        let mut pending = PendingInput::default();
        assert!(!pending.clear());

        pending.attach(png());
        assert!(pending.image().is_some());
        assert!(pending.clear());
        assert!(pending.image().is_none());
    }
}
