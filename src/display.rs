//! Terminal rendering of transcript events.
//!
//! Bot replies are typed out one character at a time; everything else is
//! written at once. Colours follow the light/dark setting.

use crate::app::AppEvent;
use crate::models::{DisplayMessage, Role};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(10);

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy)]
struct Palette {
    user: &'static str,
    bot: &'static str,
    notice: &'static str,
    dim: &'static str,
}

const LIGHT: Palette = Palette {
    user: "\x1b[34m",
    bot: "\x1b[30m",
    notice: "\x1b[35m",
    dim: "\x1b[2m",
};

const DARK: Palette = Palette {
    user: "\x1b[96m",
    bot: "\x1b[97m",
    notice: "\x1b[93m",
    dim: "\x1b[90m",
};

pub struct Renderer<W> {
    out: W,
    dark_mode: bool,
    color: bool,
    typing_delay: Duration,
}

impl<W: AsyncWrite + Unpin> Renderer<W> {
    pub fn new(out: W, dark_mode: bool) -> Self {
        Self {
            out,
            dark_mode,
            color: true,
            typing_delay: DEFAULT_TYPING_DELAY,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Per-character delay for bot replies; zero prints them at once.
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn palette(&self) -> Palette {
        if self.dark_mode {
            DARK
        } else {
            LIGHT
        }
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", style, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub async fn render(&mut self, event: &AppEvent) -> std::io::Result<()> {
        match event {
            AppEvent::Message(message) => self.message(message).await,
            AppEvent::Notice(text) => self.notice(text).await,
            AppEvent::ThemeChanged { dark_mode } => {
                self.set_dark_mode(*dark_mode);
                Ok(())
            }
            AppEvent::Quit => Ok(()),
        }
    }

    pub async fn message(&mut self, message: &DisplayMessage) -> std::io::Result<()> {
        let palette = self.palette();
        let style = match message.role {
            Role::User => palette.user,
            Role::Bot => palette.bot,
        };

        let header = format!(
            "{} {}: ",
            self.paint(palette.dim, &format!("[{}]", message.time_label())),
            self.paint(style, message.role.label()),
        );
        self.out.write_all(header.as_bytes()).await?;

        if message.has_image {
            let tag = self.paint(palette.dim, "[image] ");
            self.out.write_all(tag.as_bytes()).await?;
        }

        if message.role == Role::Bot && !self.typing_delay.is_zero() {
            self.type_out(style, &message.content).await?;
        } else {
            let body = self.paint(style, &message.content);
            self.out.write_all(body.as_bytes()).await?;
        }

        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }

    async fn type_out(&mut self, style: &str, text: &str) -> std::io::Result<()> {
        if self.color {
            self.out.write_all(style.as_bytes()).await?;
        }
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            self.out
                .write_all(ch.encode_utf8(&mut buf).as_bytes())
                .await?;
            self.out.flush().await?;
            tokio::time::sleep(self.typing_delay).await;
        }
        if self.color {
            self.out.write_all(RESET.as_bytes()).await?;
        }
        Ok(())
    }

    pub async fn notice(&mut self, text: &str) -> std::io::Result<()> {
        let line = self.paint(self.palette().notice, text);
        self.out.write_all(line.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }

    /// Input prompt; marks a pending image so the user knows it will be sent.
    pub async fn prompt(&mut self, image_pending: bool) -> std::io::Result<()> {
        let prompt = if image_pending {
            format!("{} > ", self.paint(self.palette().dim, "[image]"))
        } else {
            "> ".to_string()
        };
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Renderer<Vec<u8>> {
        Renderer::new(Vec::new(), false)
            .with_color(false)
            .with_typing_delay(Duration::ZERO)
    }

    fn output(renderer: Renderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[tokio::test]
    async fn test_message_line_has_time_and_role() {
        let mut renderer = plain();
        let message = DisplayMessage::bot("hello");
        renderer.message(&message).await.unwrap();

        assert_eq!(
            output(renderer),
            format!("[{}] gemini: hello\n", message.time_label())
        );
    }

    #[tokio::test]
    async fn test_user_image_message_is_tagged() {
        let mut renderer = plain();
        let message = DisplayMessage::user("", true);
        renderer.message(&message).await.unwrap();

        assert!(output(renderer).ends_with("you: [image] \n"));
    }

    #[tokio::test]
    async fn test_typing_animation_writes_full_text() {
        let mut renderer = plain().with_typing_delay(Duration::from_millis(1));
        renderer
            .message(&DisplayMessage::bot("héllo ✓"))
            .await
            .unwrap();

        assert!(output(renderer).ends_with("gemini: héllo ✓\n"));
    }

    #[tokio::test]
    async fn test_theme_changes_palette() {
        let mut renderer = Renderer::new(Vec::new(), false).with_typing_delay(Duration::ZERO);
        renderer.notice("light").await.unwrap();
        renderer
            .render(&AppEvent::ThemeChanged { dark_mode: true })
            .await
            .unwrap();
        renderer.notice("dark").await.unwrap();

        let text = output(renderer);
        assert!(text.contains(&format!("{}light{}", LIGHT.notice, RESET)));
        assert!(text.contains(&format!("{}dark{}", DARK.notice, RESET)));
    }

    #[tokio::test]
    async fn test_prompt_marks_pending_image() {
        let mut renderer = plain();
        renderer.prompt(true).await.unwrap();
        renderer.prompt(false).await.unwrap();
        assert_eq!(output(renderer), "[image] > > ");
    }
}
