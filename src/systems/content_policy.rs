//! Content policy system: who may see adult-rated content.
//!
//! Two decisions:
//! - [`resolve_policy`]: does this viewer's consent allow adult content at all?
//! - [`evaluate_visibility`] / [`should_show_content`]: may this viewer see
//!   this particular piece, given its rating and the owner's preference?
//!
//! Every non-sfw rating is gated the same way; severity is reported but does
//! not demand stronger verification. Missing inputs fail closed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::config;
use crate::error::{Error, Result};

/// The only cookie value that counts as opt-in.
pub const CONSENT_COOKIE_ENABLED: &str = "enabled";

/// Environment variable carrying the operator override.
pub const GLOBAL_OVERRIDE_ENV: &str = "NSFW_GLOBAL_OVERRIDE";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentRating {
    Sfw = 0,
    Spicy = 1,
    NsfwIllustration = 2,
    NsfwHard = 3,
}

impl ContentRating {
    #[inline]
    pub fn severity(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_sfw(self) -> bool {
        self == ContentRating::Sfw
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentRating::Sfw => "sfw",
            ContentRating::Spicy => "spicy",
            ContentRating::NsfwIllustration => "nsfw-illustration",
            ContentRating::NsfwHard => "nsfw-hard",
        }
    }
}

impl fmt::Display for ContentRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentRating {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sfw" => Ok(ContentRating::Sfw),
            "spicy" => Ok(ContentRating::Spicy),
            "nsfw-illustration" => Ok(ContentRating::NsfwIllustration),
            "nsfw-hard" => Ok(ContentRating::NsfwHard),
            other => Err(Error::UnknownRating(other.to_string())),
        }
    }
}

/// The owner's own disclosure preference for their content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerVisibility {
    #[default]
    Off,
    On,
    Private,
}

impl FromStr for OwnerVisibility {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "off" => Ok(OwnerVisibility::Off),
            "on" => Ok(OwnerVisibility::On),
            "private" => Ok(OwnerVisibility::Private),
            other => Err(Error::UnknownVisibility(other.to_string())),
        }
    }
}

/// Viewer consent signals, already extracted from the request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Consent<'a> {
    pub cookie_value: Option<&'a str>,
    pub adult_verified: bool,
}

impl<'a> Consent<'a> {
    pub fn new(cookie_value: Option<&'a str>, adult_verified: bool) -> Self {
        Self { cookie_value, adult_verified }
    }

    #[inline]
    pub fn opted_in(&self) -> bool {
        self.cookie_value == Some(CONSENT_COOKIE_ENABLED)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewer<'a> {
    /// `None` for anonymous visitors.
    pub user_id: Option<&'a str>,
    pub consent: Consent<'a>,
}

impl<'a> Viewer<'a> {
    pub fn anonymous(consent: Consent<'a>) -> Self {
        Self { user_id: None, consent }
    }

    pub fn signed_in(user_id: &'a str, consent: Consent<'a>) -> Self {
        Self { user_id: Some(user_id), consent }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentOwner<'a> {
    pub user_id: &'a str,
    pub visibility: OwnerVisibility,
}

/// Site-wide switches, passed in by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicySettings {
    /// Operator escape hatch: allow regardless of consent.
    pub global_override: bool,
    /// Persisted site setting; when off nothing but sfw is shown.
    pub content_enabled: bool,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self { global_override: false, content_enabled: true }
    }
}

impl PolicySettings {
    /// Override from `NSFW_GLOBAL_OVERRIDE`; `content_enabled` comes from the
    /// caller's site-setting lookup.
    pub fn from_env(content_enabled: bool) -> Self {
        Self::from_lookup(|k| std::env::var(k).ok(), content_enabled)
    }

    pub fn from_lookup<F>(lookup: F, content_enabled: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let global_override = match lookup(GLOBAL_OVERRIDE_ENV) {
            Some(raw) => config::parse_flag(&raw).unwrap_or_else(|| {
                warn!(var = GLOBAL_OVERRIDE_ENV, value = %raw, "unrecognized flag value, treating as off");
                false
            }),
            None => false,
        };
        Self { global_override, content_enabled }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDecision {
    pub nsfw_allowed: bool,
}

/// Override wins; otherwise both the opt-in cookie and verification are needed.
#[inline]
pub fn resolve_policy(consent: &Consent<'_>, global_override: bool) -> PolicyDecision {
    if global_override {
        return PolicyDecision { nsfw_allowed: true };
    }
    PolicyDecision { nsfw_allowed: consent.opted_in() && consent.adult_verified }
}

/// Which rule decided a visibility check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Sfw,
    ContentDisabled,
    Anonymous,
    NotConsented,
    PrivateToOwner,
    Allowed,
}

impl Visibility {
    #[inline]
    pub fn is_visible(self) -> bool {
        matches!(self, Visibility::Sfw | Visibility::Allowed)
    }
}

/// First matching rule wins: sfw, site switch, identity, consent, privacy.
pub fn evaluate_visibility(
    rating: ContentRating,
    viewer: &Viewer<'_>,
    owner: &ContentOwner<'_>,
    settings: &PolicySettings,
) -> Visibility {
    let verdict = if rating.is_sfw() {
        Visibility::Sfw
    } else if !settings.content_enabled {
        Visibility::ContentDisabled
    } else if viewer.user_id.is_none() {
        Visibility::Anonymous
    } else if !resolve_policy(&viewer.consent, settings.global_override).nsfw_allowed {
        Visibility::NotConsented
    } else if owner.visibility == OwnerVisibility::Private && viewer.user_id != Some(owner.user_id) {
        Visibility::PrivateToOwner
    } else {
        Visibility::Allowed
    };
    trace!(%rating, owner = owner.user_id, ?verdict, "visibility evaluated");
    verdict
}

#[inline]
pub fn should_show_content(
    rating: ContentRating,
    viewer: &Viewer<'_>,
    owner: &ContentOwner<'_>,
    settings: &PolicySettings,
) -> bool {
    evaluate_visibility(rating, viewer, owner, settings).is_visible()
}
