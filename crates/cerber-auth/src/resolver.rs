//! Authorization resolution: user → groups → actions → permission grants.

use tracing::debug;

use cerber_core::error::CerberError;
use cerber_core::result::CerberResult;
use cerber_core::traits::Zone;
use cerber_core::types::Permission;

/// Resolves the grants of `user_id` after checking an already-hashed
/// password.
///
/// The password must have been hashed with the zone's scheme; it is compared
/// byte for byte with the stored digest. Any missing group or malformed
/// action fails the whole call.
pub fn authorize(
    zone: &dyn Zone,
    user_id: &str,
    hashed_password: &str,
) -> CerberResult<Vec<Permission>> {
    let user = zone.find_user(user_id)?;
    if user.passwd.as_bytes() != hashed_password.as_bytes() {
        debug!(zone = zone.name(), user = user_id, "Password mismatch");
        return Err(CerberError::invalid_credentials());
    }

    let mut actions = Vec::new();
    for group in &user.groups {
        let group = zone.find_group(group)?;
        actions.extend(group.actions.iter().cloned());
    }

    debug!(
        zone = zone.name(),
        user = user_id,
        groups = user.groups.len(),
        actions = actions.len(),
        "User authorized"
    );
    canonicalize(actions)
}

/// Hashes `plaintext` with the zone's scheme, then [`authorize`]s.
pub fn authenticate(
    zone: &dyn Zone,
    user_id: &str,
    plaintext: &str,
) -> CerberResult<Vec<Permission>> {
    let hashed = zone.hash_password(plaintext)?;
    authorize(zone, user_id, &hashed)
}

/// Sorts `resource:verb` actions and folds consecutive entries on the same
/// resource into one repository grant.
///
/// An empty action list yields an empty grant list, not a placeholder
/// repository grant with an empty name and no actions.
pub fn canonicalize(mut actions: Vec<String>) -> CerberResult<Vec<Permission>> {
    actions.sort();

    let mut grants: Vec<Permission> = Vec::new();
    for action in &actions {
        let (resource, verb) = match action.split_once(':') {
            Some((resource, verb)) if !resource.is_empty() && !verb.is_empty() => (resource, verb),
            _ => return Err(CerberError::malformed_action(action)),
        };

        match grants.last_mut() {
            Some(last) if last.name == resource => last.actions.push(verb.to_string()),
            _ => grants.push(Permission::repository(resource, vec![verb.to_string()])),
        }
    }
    Ok(grants)
}
