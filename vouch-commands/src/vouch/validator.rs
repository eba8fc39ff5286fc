//! Pure submission checks against the active configuration.

use std::fmt;

use twilight_model::id::{Id, marker::UserMarker};
use vouch_state::config::Configuration;
use vouch_utils::mention::user_mention;

use crate::inbound::InboundMessage;
use crate::messages::{NO_IMAGE_REASON, WRONG_FORMAT_REASON};

/// The parts of an inbound message the validator looks at.
#[derive(Clone, Debug)]
pub struct Submission {
    pub author_id: Id<UserMarker>,
    /// Lower-cased message text.
    pub text: String,
    pub attachment_count: usize,
}

impl Submission {
    pub fn from_message(message: &InboundMessage) -> Self {
        Self {
            author_id: message.author_id,
            text: message.content.to_lowercase(),
            attachment_count: message.attachment_count,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rejection {
    MissingPhrase,
    MissingMention,
    NoAttachment,
}

impl Rejection {
    /// Reason shown to the offender. Phrase and mention failures read the same.
    pub fn public_reason(self) -> &'static str {
        match self {
            Self::MissingPhrase | Self::MissingMention => WRONG_FORMAT_REASON,
            Self::NoAttachment => NO_IMAGE_REASON,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingPhrase => "wrong format: missing phrase",
            Self::MissingMention => "wrong format: missing mention",
            Self::NoAttachment => "no image attached",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

/// Check phrase, then mention, then attachment; the first failure wins.
pub fn validate(submission: &Submission, config: &Configuration) -> Verdict {
    if !submission.text.contains(&config.trigger_phrase) {
        return Verdict::Rejected(Rejection::MissingPhrase);
    }

    if !submission.text.contains(&user_mention(config.mention_id)) {
        return Verdict::Rejected(Rejection::MissingMention);
    }

    if submission.attachment_count == 0 {
        return Verdict::Rejected(Rejection::NoAttachment);
    }

    Verdict::Accepted
}
