//! Presentation of replayed messages, snipes and the word of the day.
//!
//! The chat front end shows everything as an embed: a coloured card with an
//! optional title, author line and footer. [`Embed`] captures those parts and
//! renders as plain text for terminals.

use std::fmt;

use serde::Serialize;

use crate::Message;
use crate::core::snipe::DeletedMessage;
use crate::core::wotd::WordOfTheDay;

/// Date format of the echo author line (`MM-DD-YYYY`).
pub const ECHO_DATE_FORMAT: &str = "%m-%d-%Y";

/// Timestamp format of the snipe footer.
pub const SNIPE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accent colour of replayed messages.
pub const ECHO_COLOR: u32 = 0x001a_bc9c;

/// Accent colour of snipes and the word of the day.
pub const INFO_COLOR: u32 = 0x0034_98db;

/// A rendered card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    /// Bold heading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Small line above the body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Main text
    pub description: String,
    /// Small line below the body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    /// Accent colour as `0xRRGGBB`
    pub color: u32,
}

impl Embed {
    fn new(description: impl Into<String>, color: u32) -> Self {
        Self {
            title: None,
            author: None,
            description: description.into(),
            footer: None,
            color,
        }
    }
}

impl fmt::Display for Embed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{title}")?;
        }
        if let Some(author) = &self.author {
            writeln!(f, "{author}")?;
        }
        write!(f, "{}", self.description)?;
        if let Some(footer) = &self.footer {
            write!(f, "\n{footer}")?;
        }
        Ok(())
    }
}

/// `"{sender} on MM-DD-YYYY"`, dated in the offset the export recorded.
pub fn echo_header(message: &Message) -> String {
    format!(
        "{} on {}",
        message.sender,
        message.timestamp.format(ECHO_DATE_FORMAT)
    )
}

/// Card for a replayed message.
///
/// ```
/// use chatecho::core::render::echo_embed;
/// use chatecho::parser::Platform;
/// use chatecho::Message;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2019, 7, 4, 18, 30, 0).unwrap();
/// let msg = Message::new("Alice", "Fireworks were amazing tonight", ts, Platform::Facebook);
///
/// let embed = echo_embed(&msg);
/// assert_eq!(embed.author.as_deref(), Some("Alice on 07-04-2019"));
/// ```
pub fn echo_embed(message: &Message) -> Embed {
    Embed {
        author: Some(echo_header(message)),
        ..Embed::new(message.content.clone(), ECHO_COLOR)
    }
}

/// Card for a sniped message.
pub fn snipe_embed(deleted: &DeletedMessage) -> Embed {
    Embed {
        author: Some(format!("{} said:", deleted.author)),
        footer: Some(format!(
            "Deleted on {}",
            deleted.created_at.format(SNIPE_TIME_FORMAT)
        )),
        ..Embed::new(deleted.content.clone(), INFO_COLOR)
    }
}

/// Card for the word of the day.
pub fn wotd_embed(wotd: &WordOfTheDay) -> Embed {
    Embed {
        title: Some(format!("Word of the Day: {}", wotd.word)),
        ..Embed::new(wotd.definition.clone(), INFO_COLOR)
    }
}
