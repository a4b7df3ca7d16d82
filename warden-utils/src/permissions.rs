use poise::serenity_prelude as serenity;

/// Fold the `@everyone` role and the member's roles into one permission set.
///
/// The guild owner and `ADMINISTRATOR` holders get everything.
pub fn effective_permissions(
    is_owner: bool,
    everyone: serenity::Permissions,
    member_roles: impl IntoIterator<Item = serenity::Permissions>,
) -> serenity::Permissions {
    if is_owner {
        return serenity::Permissions::all();
    }

    let resolved = member_roles
        .into_iter()
        .fold(everyone, |acc, role| acc | role);

    if resolved.contains(serenity::Permissions::ADMINISTRATOR) {
        serenity::Permissions::all()
    } else {
        resolved
    }
}

/// Resolve a user's effective guild permissions over HTTP.
pub async fn resolve_user_permissions(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<serenity::Permissions> {
    let guild = guild_id.to_partial_guild(http).await?;
    if guild.owner_id == user_id {
        return Ok(serenity::Permissions::all());
    }

    let member = guild_id.member(http, user_id).await?;
    let roles = guild_id.roles(http).await?;
    let everyone_role_id = serenity::RoleId::new(guild_id.get());

    let everyone = roles
        .get(&everyone_role_id)
        .map_or(serenity::Permissions::empty(), |role| role.permissions);
    let member_roles = roles
        .values()
        .filter(|role| member.roles.contains(&role.id))
        .map(|role| role.permissions);

    Ok(effective_permissions(false, everyone, member_roles))
}

pub async fn has_user_permission(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
    required: serenity::Permissions,
) -> anyhow::Result<bool> {
    let perms = resolve_user_permissions(http, guild_id, user_id).await?;
    Ok(perms.contains(required))
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::Permissions;

    use super::effective_permissions;

    #[test]
    fn owner_has_everything() {
        let perms = effective_permissions(true, Permissions::empty(), []);
        assert!(perms.contains(Permissions::BAN_MEMBERS));
    }

    #[test]
    fn administrator_implies_all() {
        let perms = effective_permissions(false, Permissions::empty(), [Permissions::ADMINISTRATOR]);
        assert!(perms.contains(Permissions::MODERATE_MEMBERS | Permissions::MANAGE_GUILD));
    }

    #[test]
    fn roles_are_unioned_with_everyone() {
        let perms = effective_permissions(
            false,
            Permissions::SEND_MESSAGES,
            [Permissions::MANAGE_MESSAGES, Permissions::KICK_MEMBERS],
        );
        assert!(perms.contains(Permissions::SEND_MESSAGES | Permissions::MANAGE_MESSAGES));
        assert!(perms.contains(Permissions::KICK_MEMBERS));
        assert!(!perms.contains(Permissions::BAN_MEMBERS));
    }
}
