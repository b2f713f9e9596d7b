use serde::{Deserialize, Serialize};

use super::super::domain::{Action, ActionKind, CheckInVenue};

/// The additive bonus rules, listed in evaluation order. Each rule inspects
/// only the action payload, so the sum is deterministic for a given action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusRule {
    StadiumVenue,
    AwayVenue,
    PhotoAttached,
    CommentAttached,
}

impl BonusRule {
    pub const fn label(self) -> &'static str {
        match self {
            BonusRule::StadiumVenue => "stadium_venue",
            BonusRule::AwayVenue => "away_venue",
            BonusRule::PhotoAttached => "photo_attached",
            BonusRule::CommentAttached => "comment_attached",
        }
    }
}

/// Discrete token contribution from one matched bonus rule, kept alongside
/// the outcome so reward audits can show how a total was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusComponent {
    pub rule: BonusRule,
    pub tokens: u32,
    pub notes: String,
}

pub(crate) fn evaluate(action: &Action) -> Vec<BonusComponent> {
    let mut components = Vec::new();

    let ActionKind::CheckIn { venue, attachments } = &action.kind else {
        return components;
    };

    match venue {
        CheckInVenue::Stadium => components.push(BonusComponent {
            rule: BonusRule::StadiumVenue,
            tokens: 25,
            notes: "checked in at the stadium".to_string(),
        }),
        CheckInVenue::Away => components.push(BonusComponent {
            rule: BonusRule::AwayVenue,
            tokens: 15,
            notes: "travelled to an away ground".to_string(),
        }),
        CheckInVenue::Home => {}
    }

    if attachments.has_photo() {
        components.push(BonusComponent {
            rule: BonusRule::PhotoAttached,
            tokens: 10,
            notes: "photo evidence attached".to_string(),
        });
    }

    if attachments.has_comment() {
        components.push(BonusComponent {
            rule: BonusRule::CommentAttached,
            tokens: 5,
            notes: "match-day comment attached".to_string(),
        });
    }

    components
}
