//! Field and block assembly.
//!
//! Conditional fields come from [`FIELD_RULES`], evaluated top to bottom; the
//! first matching rule's fields appear first in the message. The run fields
//! and then the headline (title/message) field always follow, and minimal
//! mode reduces the whole list to the headline alone.

use crate::config::{Config, Variant};
use crate::payload::{Accessory, Attachment, Block, Field, Text, Webhook};

pub const ACTIONS_URL_TITLE: &str = "Actions URL";
pub const PSE_VERSION_TITLE: &str = "PSE Version";

/// A field producer guarded by a predicate over the configuration.
pub struct FieldRule {
    pub name: &'static str,
    pub applies: fn(&Config) -> bool,
    pub build: fn(&Config) -> Vec<Field>,
}

pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        name: "site_host",
        applies: |c| c.site.is_some(),
        build: |c| match &c.site {
            Some(site) => vec![
                Field::short(&site.site_title, &site.site_name),
                Field::short(&site.host_title, &site.host_name),
            ],
            None => Vec::new(),
        },
    },
    FieldRule {
        name: "pull_request_url",
        applies: |c| c.pull_request_url.is_some(),
        build: |c| optional_field("Pull Request URL", &c.pull_request_url),
    },
    FieldRule {
        name: "pse_url",
        applies: |c| c.pse_url.is_some(),
        build: |c| optional_field("PSE URL", &c.pse_url),
    },
    FieldRule {
        name: "pse_ip",
        applies: |c| c.pse_ip.is_some(),
        build: |c| optional_field("PSE IP", &c.pse_ip),
    },
];

fn optional_field(title: &str, value: &Option<String>) -> Vec<Field> {
    value
        .iter()
        .map(|v| Field::wide(title, v))
        .collect()
}

/// Mandatory fields describing the CI run.
pub fn run_fields(config: &Config) -> Vec<Field> {
    vec![
        Field::wide(ACTIONS_URL_TITLE, config.run.actions_url()),
        Field::short(PSE_VERSION_TITLE, &config.pse_version),
    ]
}

/// Fields from every applicable rule, in rule order. Ignores minimal mode.
pub fn context_fields(config: &Config) -> Vec<Field> {
    FIELD_RULES
        .iter()
        .filter(|rule| (rule.applies)(config))
        .flat_map(|rule| {
            tracing::trace!(rule = rule.name, "field rule applied");
            (rule.build)(config)
        })
        .collect()
}

/// Full, ordered field list for the given message text.
pub fn assemble_fields(config: &Config, message: &str) -> Vec<Field> {
    let headline = Field::wide(&config.title, message);
    if config.minimal {
        return vec![headline];
    }
    let mut fields = context_fields(config);
    fields.extend(run_fields(config));
    fields.push(headline);
    fields
}

pub fn build_webhook(config: &Config, variant: Variant) -> Webhook {
    let mut hook = Webhook {
        user_name: config.display.user_name.clone(),
        icon_url: config.display.icon_url.clone(),
        icon_emoji: config.display.icon_emoji.clone(),
        channel: config.display.channel.clone(),
        unfurl_links: false,
        ..Default::default()
    };
    match variant {
        Variant::Blocks => hook.blocks = Some(build_blocks(config)),
        Variant::Attachment => {
            let message = config
                .message
                .clone()
                .unwrap_or_else(|| config.run.summary());
            hook.attachments = Some(vec![build_attachment(config, &message)]);
        }
        Variant::Legacy => {
            hook.attachments = Some(vec![build_attachment(config, config.message_text())]);
        }
    }
    hook
}

pub fn build_attachment(config: &Config, message: &str) -> Attachment {
    Attachment {
        fallback: message.to_string(),
        color: Some(config.color.clone()),
        author_name: config.run.actor.clone(),
        author_link: config.run.actor_link(),
        author_icon: config.run.actor_avatar(),
        footer: Some(config.footer.clone()),
        fields: assemble_fields(config, message),
    }
}

pub fn build_blocks(config: &Config) -> Vec<Block> {
    let mut blocks = vec![
        Block::header(&config.title),
        Block::section(Text::markdown(config.message_text())),
        Block::section(Text::plain(&config.description)),
    ];

    if !config.minimal {
        blocks.extend(
            context_fields(config)
                .iter()
                .map(|field| labelled(&field.title, &field.value)),
        );
    }

    let actions = labelled(ACTIONS_URL_TITLE, &config.run.actions_url());
    blocks.push(match avatar(config) {
        Some(accessory) => actions.with_accessory(accessory),
        None => actions,
    });

    let run_sections = [
        ("Run UUID", config.run_uuid.as_deref()),
        (PSE_VERSION_TITLE, Some(config.pse_version.as_str())),
        ("BI (Metabase)", config.bi_link.as_deref()),
        ("BigQuery", config.bq_link.as_deref()),
    ];
    for (label, value) in run_sections {
        if let Some(value) = value {
            blocks.push(labelled(label, value));
        }
    }

    blocks.push(Block::Divider);
    blocks.push(Block::section(Text::markdown(&config.footer)));
    blocks
}

fn labelled(title: &str, value: &str) -> Block {
    Block::section(Text::markdown(format!("*{title}:*\n{value}")))
}

fn avatar(config: &Config) -> Option<Accessory> {
    let actor = config.run.actor.clone()?;
    let image_url = config.run.actor_avatar()?;
    Some(Accessory::Image {
        image_url,
        alt_text: actor,
    })
}
