//! Profile resolution with at-most-one-concurrent-fetch semantics.
//!
//! Resolution is split-phase: [`ProfileResolver::begin`] claims the in-flight
//! slot and hands back a ticket; the host performs the lookup (possibly
//! asynchronously) and settles it with [`ProfileResolver::finish`]. A second
//! `begin` while a ticket is outstanding is a logged no-op (not queued, not
//! retried), which is what keeps the mount-time initializer and the
//! signed-in notification from producing duplicate fetches when they land in
//! the same tick.

use brasa_auth::{Profile, ProfileStoreError};
use brasa_core::UserId;

/// Claim on the single in-flight fetch slot. Obtained from `begin`, consumed
/// by `finish`.
#[derive(Debug, PartialEq, Eq)]
pub struct ProfileFetchTicket {
    user_id: UserId,
}

impl ProfileFetchTicket {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

#[derive(Debug, Default)]
pub struct ProfileResolver {
    in_flight: bool,
}

impl ProfileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Claim the fetch slot for `user_id`.
    ///
    /// Returns `None` when a fetch is already in flight; the caller must not
    /// issue another lookup in that case.
    pub fn begin(&mut self, user_id: UserId) -> Option<ProfileFetchTicket> {
        if self.in_flight {
            tracing::debug!(%user_id, "profile fetch already in flight, skipping");
            return None;
        }
        self.in_flight = true;
        Some(ProfileFetchTicket { user_id })
    }

    /// Settle an outstanding fetch, releasing the slot.
    ///
    /// Every failure (record missing, transport error) degrades to "no
    /// profile"; nothing propagates to the caller beyond diagnostics. Success
    /// replaces the profile wholesale. Last write wins, which is safe because
    /// only one fetch can be in flight.
    pub fn finish(
        &mut self,
        ticket: ProfileFetchTicket,
        result: Result<Option<Profile>, ProfileStoreError>,
    ) -> Option<Profile> {
        self.in_flight = false;
        match result {
            Ok(Some(profile)) => {
                tracing::debug!(user_id = %ticket.user_id, rol = %profile.rol, "profile resolved");
                Some(profile)
            }
            Ok(None) => {
                tracing::warn!(user_id = %ticket.user_id, "no profile record for identity");
                None
            }
            Err(err) => {
                tracing::error!(user_id = %ticket.user_id, error = %err, "profile fetch failed");
                None
            }
        }
    }

    /// Drop any claim without settling (identity went away mid-fetch).
    pub fn reset(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brasa_auth::{DocumentType, ProfileSeed};
    use chrono::Utc;

    fn profile_for(user_id: UserId) -> Profile {
        ProfileSeed {
            nombre: "Rosa".to_string(),
            apellido: "Díaz".to_string(),
            tipo_documento: DocumentType::Cc,
            cedula: "112233".to_string(),
            telefono: None,
            direccion: None,
            departamento: None,
            pais: None,
        }
        .into_profile(user_id, Utc::now())
    }

    #[test]
    fn second_begin_in_same_tick_is_a_no_op() {
        let mut resolver = ProfileResolver::new();
        let user_id = UserId::new();

        let first = resolver.begin(user_id);
        let second = resolver.begin(user_id);

        assert!(first.is_some());
        assert!(second.is_none());
    }

    #[test]
    fn finishing_releases_the_slot() {
        let mut resolver = ProfileResolver::new();
        let user_id = UserId::new();

        let ticket = resolver.begin(user_id).unwrap();
        let resolved = resolver.finish(ticket, Ok(Some(profile_for(user_id))));
        assert!(resolved.is_some());
        assert!(!resolver.is_in_flight());

        assert!(resolver.begin(user_id).is_some());
    }

    #[test]
    fn missing_record_and_transport_error_both_degrade_to_absent() {
        let mut resolver = ProfileResolver::new();
        let user_id = UserId::new();

        let ticket = resolver.begin(user_id).unwrap();
        assert!(resolver.finish(ticket, Ok(None)).is_none());

        let ticket = resolver.begin(user_id).unwrap();
        let result = resolver.finish(
            ticket,
            Err(ProfileStoreError::Transport("timeout".to_string())),
        );
        assert!(result.is_none());
    }
}
