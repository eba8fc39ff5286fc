use twilight_model::{
    channel::message::component::{ActionRow, Button, ButtonStyle, Component},
    id::{
        Id,
        marker::{RoleMarker, UserMarker},
    },
};

/// Prefix shared by every escalation button custom ID.
pub const ESCALATION_CUSTOM_ID_PREFIX: &str = "escalation:";

/// The (user, role) pair an escalation button is bound to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RevocationTarget {
    pub user_id: Id<UserMarker>,
    pub role_id: Id<RoleMarker>,
}

pub fn build_revocation_custom_id(target: RevocationTarget) -> String {
    format!(
        "{ESCALATION_CUSTOM_ID_PREFIX}revoke:{}:{}",
        target.user_id.get(),
        target.role_id.get()
    )
}

pub fn parse_revocation_custom_id(custom_id: &str) -> Option<RevocationTarget> {
    let raw = custom_id.strip_prefix(ESCALATION_CUSTOM_ID_PREFIX)?;
    let mut parts = raw.split(':');

    if parts.next()? != "revoke" {
        return None;
    }

    let user_id = Id::new_checked(parts.next()?.parse::<u64>().ok()?)?;
    let role_id = Id::new_checked(parts.next()?.parse::<u64>().ok()?)?;

    if parts.next().is_some() {
        return None;
    }

    Some(RevocationTarget { user_id, role_id })
}

/// A single danger-styled "remove role" button.
pub fn build_revocation_components(custom_id: String) -> Vec<Component> {
    vec![Component::ActionRow(ActionRow {
        id: None,
        components: vec![Component::Button(Button {
            id: None,
            custom_id: Some(custom_id),
            disabled: false,
            emoji: None,
            label: Some("remove role".to_owned()),
            style: ButtonStyle::Danger,
            url: None,
            sku_id: None,
        })],
    })]
}
