//! Slack Incoming Webhook wire types.
//!
//! Optional keys are `Option`s and are left out of the JSON when `None`.
//! An empty string that was explicitly set is still sent as-is.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Webhook {
    #[serde(rename = "username", skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub unfurl_links: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
}

/// Legacy message decoration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attachment {
    pub fallback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl Field {
    pub fn new(title: impl Into<String>, value: impl Into<String>, short: bool) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short,
        }
    }

    pub fn wide(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(title, value, false)
    }

    pub fn short(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(title, value, true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Header {
        text: Text,
    },
    Section {
        text: Text,
        #[serde(skip_serializing_if = "Option::is_none")]
        accessory: Option<Accessory>,
    },
    Divider,
}

impl Block {
    pub fn header(text: impl Into<String>) -> Self {
        Block::Header {
            text: Text::plain(text),
        }
    }

    pub fn section(text: Text) -> Self {
        Block::Section {
            text,
            accessory: None,
        }
    }

    pub fn with_accessory(self, accessory: Accessory) -> Self {
        match self {
            Block::Section { text, .. } => Block::Section {
                text,
                accessory: Some(accessory),
            },
            other => other,
        }
    }

    /// Text payload, if the block carries one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Header { text } | Block::Section { text, .. } => Some(text.as_str()),
            Block::Divider => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Text {
    #[serde(rename = "plain_text")]
    Plain { text: String },
    #[serde(rename = "mrkdwn")]
    Markdown { text: String },
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Text::Plain { text: text.into() }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Text::Markdown { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Text::Plain { text } | Text::Markdown { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Accessory {
    Image { image_url: String, alt_text: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_overrides_are_omitted() {
        let hook = Webhook {
            blocks: Some(vec![Block::Divider]),
            ..Default::default()
        };
        let value = serde_json::to_value(&hook).unwrap();
        assert_eq!(
            value,
            json!({"unfurl_links": false, "blocks": [{"type": "divider"}]})
        );
    }

    #[test]
    fn explicit_empty_string_is_kept() {
        let hook = Webhook {
            channel: Some(String::new()),
            ..Default::default()
        };
        let value = serde_json::to_value(&hook).unwrap();
        assert_eq!(value["channel"], json!(""));
        assert!(value.get("username").is_none());
    }

    #[test]
    fn blocks_use_slack_tags() {
        let block = Block::section(Text::markdown("*Actions URL:*\nx")).with_accessory(
            Accessory::Image {
                image_url: "http://github.com/octo.png?size=32".into(),
                alt_text: "octo".into(),
            },
        );
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "type": "section",
                "text": {"type": "mrkdwn", "text": "*Actions URL:*\nx"},
                "accessory": {
                    "type": "image",
                    "image_url": "http://github.com/octo.png?size=32",
                    "alt_text": "octo"
                }
            })
        );
        assert_eq!(
            serde_json::to_value(Block::header("Deploy")).unwrap(),
            json!({"type": "header", "text": {"type": "plain_text", "text": "Deploy"}})
        );
    }

    #[test]
    fn attachment_skips_absent_author() {
        let attachment = Attachment {
            fallback: "done".into(),
            color: Some("good".into()),
            fields: vec![Field::short("Site", "prod")],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({
                "fallback": "done",
                "color": "good",
                "fields": [{"title": "Site", "value": "prod", "short": true}]
            })
        );
    }
}
