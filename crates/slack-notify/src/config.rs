use clap::ValueEnum;

use crate::error::NotifyError;

pub const SLACK_FORMAT: &str = "SLACK_FORMAT";
pub const SLACK_WEBHOOK: &str = "SLACK_WEBHOOK";
pub const SLACK_ICON: &str = "SLACK_ICON";
pub const SLACK_ICON_EMOJI: &str = "SLACK_ICON_EMOJI";
pub const SLACK_CHANNEL: &str = "SLACK_CHANNEL";
pub const SLACK_USERNAME: &str = "SLACK_USERNAME";
pub const SLACK_TITLE: &str = "SLACK_TITLE";
pub const SLACK_MESSAGE: &str = "SLACK_MESSAGE";
pub const SLACK_DESCRIPTION: &str = "SLACK_DESCRIPTION";
pub const SLACK_COLOR: &str = "SLACK_COLOR";
pub const SLACK_FOOTER: &str = "SLACK_FOOTER";
pub const MSG_MINIMAL: &str = "MSG_MINIMAL";
pub const PULL_REQUEST_URL: &str = "PULL_REQUEST_URL";
pub const PSE_URL: &str = "PSE_URL";
pub const PSE_IP: &str = "PSE_IP";
pub const PSE_VERSION: &str = "PSE_VERSION";
pub const SITE_NAME: &str = "SITE_NAME";
pub const SITE_TITLE: &str = "SITE_TITLE";
pub const HOST_NAME: &str = "HOST_NAME";
pub const HOST_TITLE: &str = "HOST_TITLE";
pub const UUID: &str = "UUID";
pub const BI_LINK: &str = "BI_LINK";
pub const BQ_LINK: &str = "BQ_LINK";
pub const GITHUB_ACTOR: &str = "GITHUB_ACTOR";
pub const GITHUB_SERVER_URL: &str = "GITHUB_SERVER_URL";
pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const GITHUB_RUN_ID: &str = "GITHUB_RUN_ID";
pub const GITHUB_RUN_ATTEMPT: &str = "GITHUB_RUN_ATTEMPT";
pub const GITHUB_ACTION: &str = "GITHUB_ACTION";
pub const GITHUB_EVENT_NAME: &str = "GITHUB_EVENT_NAME";
pub const GITHUB_REF: &str = "GITHUB_REF";
pub const GITHUB_WORKFLOW: &str = "GITHUB_WORKFLOW";

pub const DEFAULT_DESCRIPTION: &str = "Links to results below";
pub const DEFAULT_COLOR: &str = "good";
pub const DEFAULT_FOOTER: &str =
    "<https://github.com/rtCamp/github-actions-library|Powered By rtCamp's GitHub Actions Library>";

/// Which message layout is posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Structured header/section blocks
    Blocks,
    /// Attachment with fields; message falls back to a run summary
    Attachment,
    /// Attachment with fields; message is mandatory
    Legacy,
}

impl Variant {
    pub fn from_env() -> Result<Self, NotifyError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// `SLACK_FORMAT`, case-insensitive; unset or blank means [`Variant::Blocks`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NotifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(value) = lookup(SLACK_FORMAT).filter(|v| !v.trim().is_empty()) else {
            return Ok(Variant::Blocks);
        };
        <Variant as ValueEnum>::from_str(value.trim(), true).map_err(|_| NotifyError::InvalidVar {
            name: SLACK_FORMAT,
            value,
        })
    }
}

/// Everything read from the environment, resolved once at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub webhook: String,
    pub display: Display,
    pub title: String,
    /// `None` when `SLACK_MESSAGE` is unset or empty.
    pub message: Option<String>,
    pub description: String,
    pub color: String,
    pub footer: String,
    pub minimal: bool,
    pub pull_request_url: Option<String>,
    pub pse_url: Option<String>,
    pub pse_ip: Option<String>,
    pub pse_version: String,
    /// Present only when `HOST_NAME` is non-empty.
    pub site: Option<Site>,
    pub run_uuid: Option<String>,
    pub bi_link: Option<String>,
    pub bq_link: Option<String>,
    pub run: RunContext,
}

/// Webhook display overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Display {
    pub user_name: Option<String>,
    pub icon_url: Option<String>,
    pub icon_emoji: Option<String>,
    pub channel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Site {
    pub site_title: String,
    pub site_name: String,
    pub host_title: String,
    pub host_name: String,
}

/// GitHub Actions metadata for the current job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    pub actor: Option<String>,
    pub server_url: String,
    pub repository: String,
    pub run_id: String,
    pub run_attempt: String,
    pub action: String,
    pub event_name: String,
    pub git_ref: String,
    pub workflow: String,
}

impl RunContext {
    pub fn actions_url(&self) -> String {
        format!(
            "{}/{}/actions/runs/{}/attempts/{}",
            self.server_url, self.repository, self.run_id, self.run_attempt
        )
    }

    /// Plain-text description of the run, used when no message is given.
    pub fn summary(&self) -> String {
        [
            (GITHUB_ACTION, self.action.as_str()),
            (GITHUB_ACTOR, self.actor.as_deref().unwrap_or_default()),
            (GITHUB_EVENT_NAME, self.event_name.as_str()),
            (GITHUB_REF, self.git_ref.as_str()),
            (GITHUB_REPOSITORY, self.repository.as_str()),
            (GITHUB_WORKFLOW, self.workflow.as_str()),
        ]
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
    }

    pub fn actor_link(&self) -> Option<String> {
        self.actor
            .as_ref()
            .map(|actor| format!("http://github.com/{actor}"))
    }

    pub fn actor_avatar(&self) -> Option<String> {
        self.actor_link().map(|link| format!("{link}.png?size=32"))
    }
}

impl Config {
    pub fn from_env(variant: Variant) -> Result<Self, NotifyError> {
        Self::from_lookup(variant, |name| std::env::var(name).ok())
    }

    /// Resolve configuration from any name→value source.
    pub fn from_lookup<F>(variant: Variant, lookup: F) -> Result<Self, NotifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let text = |name: &str| lookup(name).unwrap_or_default();
        let or_default = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let webhook = non_empty(SLACK_WEBHOOK).ok_or(NotifyError::MissingVar(SLACK_WEBHOOK))?;
        let message = non_empty(SLACK_MESSAGE);
        if variant == Variant::Legacy && message.is_none() {
            return Err(NotifyError::MissingVar(SLACK_MESSAGE));
        }

        let site = non_empty(HOST_NAME).map(|host_name| Site {
            site_title: text(SITE_TITLE),
            site_name: text(SITE_NAME),
            host_title: text(HOST_TITLE),
            host_name,
        });

        Ok(Config {
            webhook,
            display: Display {
                user_name: non_empty(SLACK_USERNAME),
                icon_url: non_empty(SLACK_ICON),
                icon_emoji: non_empty(SLACK_ICON_EMOJI),
                channel: non_empty(SLACK_CHANNEL),
            },
            title: text(SLACK_TITLE),
            message,
            description: or_default(SLACK_DESCRIPTION, DEFAULT_DESCRIPTION),
            color: or_default(SLACK_COLOR, DEFAULT_COLOR),
            footer: or_default(SLACK_FOOTER, DEFAULT_FOOTER),
            minimal: lookup(MSG_MINIMAL).as_deref() == Some("true"),
            pull_request_url: non_empty(PULL_REQUEST_URL),
            pse_url: non_empty(PSE_URL),
            pse_ip: non_empty(PSE_IP),
            pse_version: text(PSE_VERSION),
            site,
            run_uuid: non_empty(UUID),
            bi_link: non_empty(BI_LINK),
            bq_link: non_empty(BQ_LINK),
            run: RunContext {
                actor: non_empty(GITHUB_ACTOR),
                server_url: text(GITHUB_SERVER_URL),
                repository: text(GITHUB_REPOSITORY),
                run_id: text(GITHUB_RUN_ID),
                run_attempt: text(GITHUB_RUN_ATTEMPT),
                action: text(GITHUB_ACTION),
                event_name: text(GITHUB_EVENT_NAME),
                git_ref: text(GITHUB_REF),
                workflow: text(GITHUB_WORKFLOW),
            },
        })
    }

    /// Message body as posted: explicit message, else empty.
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}
