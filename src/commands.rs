//! REPL command parsing
//!
//! Parses user input into typed commands consumed by [`crate::app::App::dispatch`].

use std::path::PathBuf;

/// Parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the line (possibly empty) plus any pending image
    Send(String),

    /// Attach an image file to the next turn
    UploadImage(PathBuf),

    /// Drop the pending image
    RemoveImage,

    /// Switch between light and dark mode
    ToggleTheme,

    /// Turn audible cues on or off
    ToggleSound,

    /// Store a new API key
    SetApiKey(String),

    /// Print current settings
    ShowSettings,

    /// Clear the transcript back to the welcome message
    Clear,

    /// Show help text
    Help,

    /// Exit the REPL
    Quit,

    /// Unknown command, or a known one missing its argument
    Unknown(String),
}

impl Command {
    /// Parse user input into a command
    ///
    /// Commands start with `/`. Everything else is sent as a message.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        if let Some(cmd) = trimmed.strip_prefix('/') {
            let parts: Vec<&str> = cmd.splitn(2, char::is_whitespace).collect();
            let cmd_name = parts[0].to_lowercase();
            let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

            match cmd_name.as_str() {
                "image" | "i" if !arg.is_empty() => Command::UploadImage(PathBuf::from(arg)),
                "remove-image" | "ri" => Command::RemoveImage,
                "theme" | "t" => Command::ToggleTheme,
                "sound" | "s" => Command::ToggleSound,
                "key" if !arg.is_empty() => Command::SetApiKey(arg.to_string()),
                "settings" => Command::ShowSettings,
                "clear" => Command::Clear,
                "help" | "?" => Command::Help,
                "quit" | "exit" | "q" => Command::Quit,
                _ => Command::Unknown(cmd_name),
            }
        } else {
            Command::Send(trimmed.to_string())
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"Available commands:
  /image <path>   Attach an image to your next message (alias: /i)
  /remove-image   Drop the attached image (alias: /ri)
  /theme          Toggle light/dark mode (alias: /t)
  /sound          Toggle sound cues (alias: /s)
  /key <api-key>  Save your Gemini API key
  /settings       Show current settings
  /clear          Clear the conversation
  /help           Show this help message (alias: /?)
  /quit           Exit (aliases: /exit, /q)

Anything else is sent as a message. Press Enter on an empty line to send
an attached image on its own."#
    }
}
