use twilight_model::{
    guild::Permissions,
    id::{
        Id,
        marker::{GuildMarker, RoleMarker},
    },
};

/// Fold a member's effective guild permissions from the guild's role table.
///
/// The `@everyone` role shares the guild's ID and always applies.
pub fn resolve_member_permissions(
    guild_id: Id<GuildMarker>,
    member_roles: &[Id<RoleMarker>],
    guild_roles: impl IntoIterator<Item = (Id<RoleMarker>, Permissions)>,
) -> Permissions {
    let mut resolved = Permissions::empty();

    for (role_id, permissions) in guild_roles {
        if role_id == guild_id.cast() || member_roles.contains(&role_id) {
            resolved |= permissions;
        }
    }

    resolved
}

/// Whether a permission set satisfies `required` (administrator always does).
pub fn grants(perms: Permissions, required: Permissions) -> bool {
    perms.contains(Permissions::ADMINISTRATOR) || perms.contains(required)
}
