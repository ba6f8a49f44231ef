//! View-model behind the ikitai board: the user's own opt-in status and the
//! list of friends who currently want ramen.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::api::IkitaiApi;
use crate::core::view;
use crate::errors::{AppError, AppResult};
use crate::location::{LocationProvider, Permission};
use crate::models::ikitai::{IkitaiFriend, StatusUpdate};
use crate::models::time_slot::TimeSlot;
use crate::models::user::Credentials;

/// A local value changed ahead of the server's answer. It must be either
/// confirmed or reverted once the request resolves.
#[must_use]
#[derive(Debug)]
pub struct Tentative<T: Copy> {
    previous: T,
}

impl<T: Copy> Tentative<T> {
    /// Apply `next` to `slot`, remembering the old value.
    pub fn apply(slot: &mut T, next: T) -> Self {
        let previous = *slot;
        *slot = next;
        Self { previous }
    }

    pub fn confirm(self) {}

    pub fn revert(self, slot: &mut T) {
        *slot = self.previous;
    }
}

pub struct IkitaiBoard<'a, A: IkitaiApi + ?Sized, L: LocationProvider + ?Sized> {
    api: &'a A,
    location: &'a L,
    auth: Credentials,

    is_ikitai: bool,
    selected_time_slot: TimeSlot,
    selected_municipality: Option<String>,
    friends: Vec<IkitaiFriend>,
    expires_at: Option<DateTime<Utc>>,
}

impl<'a, A, L> IkitaiBoard<'a, A, L>
where
    A: IkitaiApi + ?Sized,
    L: LocationProvider + ?Sized,
{
    pub fn new(api: &'a A, location: &'a L, auth: Credentials, default_slot: TimeSlot) -> Self {
        Self {
            api,
            location,
            auth,
            is_ikitai: false,
            selected_time_slot: default_slot,
            selected_municipality: None,
            friends: Vec::new(),
            expires_at: None,
        }
    }

    /// Load the board when it becomes visible: the friend list first, then
    /// the user's own status. A failure reading the own status is not fatal;
    /// the switch simply starts in the off position.
    pub fn activate(&mut self) -> AppResult<()> {
        self.reload()?;
        self.sync_own_status();
        Ok(())
    }

    /// Adopt the server's record of the user's own status.
    pub fn sync_own_status(&mut self) {
        match self.api.fetch_own_status(&self.auth) {
            Ok(Some(own)) => {
                debug!(slot = ?own.time_slot, "own status is on");
                self.is_ikitai = true;
                // records without a slot keep the locally selected one
                if let Some(slot) = own.time_slot {
                    self.selected_time_slot = slot;
                }
                self.expires_at = own
                    .expires_at
                    .or_else(|| Some(self.selected_time_slot.expires_at(Utc::now())));
            }
            Ok(None) => {
                self.is_ikitai = false;
                self.expires_at = None;
            }
            Err(e) => {
                warn!("could not read own ikitai status: {}", e);
                self.is_ikitai = false;
            }
        }
    }

    /// Full re-fetch of the friend list. The previous list is kept on failure.
    pub fn reload(&mut self) -> AppResult<()> {
        let friends = self.api.fetch_ikitai_friends(&self.auth)?;
        info!(count = friends.len(), "ikitai friends loaded");
        self.friends = friends;
        Ok(())
    }

    /// Flip the opt-in switch.
    ///
    /// Turning on asks for location permission, reads a position and sends
    /// it with the selected slot. Turning off sends neither. Whatever fails,
    /// the switch goes back to where it was.
    pub fn set_ikitai(&mut self, on: bool) -> AppResult<()> {
        let pending = Tentative::apply(&mut self.is_ikitai, on);

        let result = if on { self.push_on() } else { self.push_off() };

        match result {
            Ok(()) => {
                pending.confirm();
                self.expires_at = on.then(|| self.selected_time_slot.expires_at(Utc::now()));
                info!(on, slot = %self.selected_time_slot, "ikitai status updated");
                Ok(())
            }
            Err(e) => {
                pending.revert(&mut self.is_ikitai);
                warn!(on, "ikitai status update failed, reverted: {}", e);
                Err(e)
            }
        }
    }

    fn push_on(&self) -> AppResult<()> {
        if self.location.request_permission()? == Permission::Denied {
            return Err(AppError::PermissionDenied);
        }
        let at = self.location.current_position()?;
        let update = StatusUpdate::on(self.selected_time_slot, Some(at));
        self.api.update_status(&self.auth, &update)
    }

    fn push_off(&self) -> AppResult<()> {
        self.api.update_status(&self.auth, &StatusUpdate::off())
    }

    /// Pick a slot. While opted in the server is told right away (no new
    /// location fix); a rejected update restores the previous slot.
    pub fn select_time_slot(&mut self, slot: TimeSlot) -> AppResult<()> {
        let pending = Tentative::apply(&mut self.selected_time_slot, slot);
        if !self.is_ikitai {
            pending.confirm();
            return Ok(());
        }

        match self
            .api
            .update_status(&self.auth, &StatusUpdate::on(slot, None))
        {
            Ok(()) => {
                pending.confirm();
                self.expires_at = Some(slot.expires_at(Utc::now()));
                Ok(())
            }
            Err(e) => {
                pending.revert(&mut self.selected_time_slot);
                warn!(%slot, "time slot update failed, reverted: {}", e);
                Err(e)
            }
        }
    }

    /// `None` or the sentinel clears the filter.
    pub fn select_municipality(&mut self, selection: Option<String>) {
        self.selected_municipality = selection.filter(|s| !view::is_show_all(Some(s.as_str())));
    }

    pub fn is_ikitai(&self) -> bool {
        self.is_ikitai
    }

    pub fn selected_time_slot(&self) -> TimeSlot {
        self.selected_time_slot
    }

    pub fn selected_municipality(&self) -> Option<&str> {
        self.selected_municipality.as_deref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn friends(&self) -> &[IkitaiFriend] {
        &self.friends
    }

    pub fn municipalities(&self) -> Vec<String> {
        view::municipalities(&self.friends)
    }

    pub fn filtered_friends(&self) -> Vec<&IkitaiFriend> {
        view::filter_by_municipality(&self.friends, self.selected_municipality())
    }
}
