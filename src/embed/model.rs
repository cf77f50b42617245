//! Payload, embed, and descriptor types.

use serde::Serialize;

use crate::time::{Clock, SystemClock, rfc3339_utc};

use super::{EmbedError, parse_color};

/// A rich message ready to be delivered to a webhook.
///
/// Built incrementally through in-place mutators, serialized once at send
/// time. The `embeds` key is always present in the serialized form, even
/// when the payload carries no embed.
///
/// # Example
///
/// ```
/// use embed_hook::embed::Payload;
///
/// let mut payload = Payload::new("Deploy finished", "All checks passed", "https://ci.example.com/42");
/// payload.set_color("#2ECC71")?;
/// payload.add_field("Branch", "main", true)?;
/// payload.add_field("Duration", "3m 12s", true)?;
/// payload.set_footer("ci-bot", "")?;
///
/// let json = String::from_utf8(payload.to_json()?).unwrap();
/// assert!(json.contains(r#""color":3066993"#));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Payload {
    #[serde(skip_serializing_if = "String::is_empty")]
    username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    avatar_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    content: String,
    embeds: Vec<Embed>,
}

/// One rich visual block of a [`Payload`].
///
/// Empty strings, `None` values and empty field lists are omitted from the
/// serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Embed {
    /// Author line shown above the title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Title text
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Link attached to the title
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// Body text
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// RFC 3339 UTC timestamp
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timestamp: String,
    /// Sidebar color as a 24-bit RGB integer
    ///
    /// Black (`0`) is serialized; only an unset color is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// Name/value entries, in insertion order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    /// Small image shown beside the description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Image>,
    /// Large image shown below the fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Footer line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
}

/// Author descriptor of an [`Embed`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Author {
    /// Display name
    pub name: String,
    /// Link opened when the name is clicked
    pub url: String,
    /// Small icon shown next to the name
    pub icon_url: String,
}

/// A name/value entry of an [`Embed`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field heading
    pub name: String,
    /// Field body
    pub value: String,
    /// Render alongside adjacent inline fields
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub inline: bool,
}

/// Footer descriptor of an [`Embed`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Footer text
    pub text: String,
    /// Small icon shown next to the text
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
}

/// Image reference used for thumbnails and main images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Image {
    /// Image location
    pub url: String,
}

impl Image {
    fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Payload {
    /// Creates a payload holding exactly one embed with the given title,
    /// description, and link. Every other attribute starts empty.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            embeds: vec![Embed {
                title: title.into(),
                description: description.into(),
                url: url.into(),
                ..Embed::default()
            }],
            ..Self::default()
        }
    }

    /// Overrides the webhook's display name and avatar.
    pub fn set_display_identity(
        &mut self,
        username: impl Into<String>,
        avatar_url: impl Into<String>,
    ) {
        self.username = username.into();
        self.avatar_url = avatar_url.into();
    }

    /// Sets the plain-text message content shown above the embeds.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Sets the author of the first embed, creating that embed if the
    /// payload has none.
    pub fn set_author(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
        icon_url: impl Into<String>,
    ) {
        let author = Author {
            name: name.into(),
            url: url.into(),
            icon_url: icon_url.into(),
        };

        match self.embeds.first_mut() {
            Some(embed) => embed.author = Some(author),
            None => self.embeds.push(Embed {
                author: Some(author),
                ..Embed::default()
            }),
        }
    }

    /// Sets the color of the first embed from a hex code such as `#1A2B3C`,
    /// `0x1A2B3C` or `1A2B3C`.
    ///
    /// # Errors
    ///
    /// - [`EmbedError::NoEmbed`] if the payload has no embed
    /// - [`EmbedError::InvalidColor`] if the code is not valid hex
    ///
    /// On error the stored color is left unchanged.
    pub fn set_color(&mut self, hex: &str) -> Result<(), EmbedError> {
        let embed = self.first_embed_mut()?;
        embed.color = Some(parse_color(hex)?);
        Ok(())
    }

    /// Sets the thumbnail of the first embed.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::NoEmbed`] if the payload has no embed.
    pub fn set_thumbnail(&mut self, url: impl Into<String>) -> Result<(), EmbedError> {
        self.first_embed_mut()?.thumbnail = Some(Image::new(url));
        Ok(())
    }

    /// Sets the main image of the first embed.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::NoEmbed`] if the payload has no embed.
    pub fn set_image(&mut self, url: impl Into<String>) -> Result<(), EmbedError> {
        self.first_embed_mut()?.image = Some(Image::new(url));
        Ok(())
    }

    /// Sets the footer of the first embed. An empty `icon_url` is omitted
    /// from the serialized footer.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::NoEmbed`] if the payload has no embed.
    pub fn set_footer(
        &mut self,
        text: impl Into<String>,
        icon_url: impl Into<String>,
    ) -> Result<(), EmbedError> {
        self.first_embed_mut()?.footer = Some(Footer {
            text: text.into(),
            icon_url: icon_url.into(),
        });
        Ok(())
    }

    /// Stamps the first embed with the current UTC time.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::NoEmbed`] if the payload has no embed.
    pub fn set_timestamp(&mut self) -> Result<(), EmbedError> {
        self.set_timestamp_at(&SystemClock)
    }

    /// Stamps the first embed with the time reported by `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::NoEmbed`] if the payload has no embed.
    pub fn set_timestamp_at<C: Clock>(&mut self, clock: &C) -> Result<(), EmbedError> {
        self.first_embed_mut()?.timestamp = rfc3339_utc(clock.now());
        Ok(())
    }

    /// Appends a field to the first embed.
    ///
    /// Fields keep insertion order; duplicates are not merged.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::NoEmbed`] if the payload has no embed.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Result<(), EmbedError> {
        self.first_embed_mut()?.fields.push(Field {
            name: name.into(),
            value: value.into(),
            inline,
        });
        Ok(())
    }

    /// Appends an embed. Mutators keep targeting the first embed.
    pub fn push_embed(&mut self, embed: Embed) {
        self.embeds.push(embed);
    }

    /// Returns the display name override (empty when unset).
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the avatar override (empty when unset).
    #[must_use]
    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    /// Returns the plain-text content (empty when unset).
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns all embeds in order.
    #[must_use]
    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }

    /// Returns the embed targeted by the mutators, if any.
    #[must_use]
    pub fn first_embed(&self) -> Option<&Embed> {
        self.embeds.first()
    }

    /// Serializes the payload to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if the payload cannot be represented.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    fn first_embed_mut(&mut self) -> Result<&mut Embed, EmbedError> {
        self.embeds.first_mut().ok_or(EmbedError::NoEmbed)
    }
}
