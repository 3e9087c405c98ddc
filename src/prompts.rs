//! Fixed user-facing strings and the template helper that fills them.

/// Text part sent alongside an image when the user typed nothing.
pub const DEFAULT_IMAGE_PROMPT: &str = "Please describe this image in detail.";

pub const MISSING_CREDENTIAL: &str = "Please set your API key in the settings to continue.";

pub const FALLBACK_TEXT: &str = "I couldn't generate a response.";
pub const FALLBACK_IMAGE: &str = "I couldn't analyze this image.";

pub const EMPTY_TURN: &str = "Please enter a message or attach an image.";

pub const TRANSPORT_ERROR: &str = "Error: {{message}}. Please check your API key and try again.";

pub const WELCOME: &str = "Hello! I'm your Gemini assistant. Ask me anything, or attach an image with /image <path>.";

pub const API_KEY_SAVED: &str = "API key saved";

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
