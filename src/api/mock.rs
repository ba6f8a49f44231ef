//! In-process backend used when `backend: mock` is configured.
//!
//! The ikitai endpoints are not deployed yet, so the app ships with this
//! stand-in. It serves a fixed friend list and keeps any writes in memory
//! for the lifetime of the process.

use chrono::Utc;
use std::cell::RefCell;
use tracing::info;

use super::{AuthApi, IkitaiApi, RamenLogApi, RefreshedToken, RelationshipApi};
use crate::errors::{AppError, AppResult};
use crate::models::ikitai::{IkitaiFriend, OwnStatus, StatusFlag, StatusUpdate};
use crate::models::ramen_log::{NewRamenLog, RamenLog};
use crate::models::relationship::{FollowAction, RelationshipStatus, UserRelationship};
use crate::models::time_slot::TimeSlot;
use crate::models::user::{AuthTokens, Credentials, User};

pub const MOCK_ACCESS_TOKEN: &str = "mock-access";
pub const MOCK_REFRESH_TOKEN: &str = "mock-refresh";

/// Id of the logged-in user inside the mock.
const ME: i64 = 100;

#[derive(Debug, Default)]
struct MockState {
    own_status: Option<OwnStatus>,
    relationships: Vec<UserRelationship>,
    logs: Vec<RamenLog>,
    next_id: i64,
}

pub struct MockApi {
    friends: Vec<IkitaiFriend>,
    users: Vec<User>,
    state: RefCell<MockState>,
}

fn friend(id: &str, name: &str, slot: TimeSlot, municipality: &str) -> IkitaiFriend {
    IkitaiFriend {
        user_id: id.to_string(),
        user_name: name.to_string(),
        user_icon_url: "icon_url".to_string(),
        time_slot: slot,
        municipality: municipality.to_string(),
    }
}

fn user(id: i64, name: &str) -> User {
    User {
        id,
        username: name.to_string(),
        email: format!("{}@example.com", name),
        created_at: None,
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    pub fn new() -> Self {
        let users = vec![
            user(ME, "me"),
            user(1, "suzuki"),
            user(2, "sato"),
            user(3, "tanaka"),
            user(4, "takahashi"),
        ];

        let mut state = MockState {
            next_id: 1,
            ..Default::default()
        };
        // tanaka already asked to follow us
        state.relationships.push(UserRelationship {
            id: state.next_id,
            follower: users[3].clone(),
            followed: users[0].clone(),
            status: Some(RelationshipStatus::Pending),
            created_at: None,
        });
        state.next_id += 1;
        for u in &users[1..3] {
            state.relationships.push(UserRelationship {
                id: state.next_id,
                follower: users[0].clone(),
                followed: u.clone(),
                status: Some(RelationshipStatus::Approved),
                created_at: None,
            });
            state.next_id += 1;
        }

        Self {
            friends: vec![
                friend("1", "ラーメン大好き鈴木さん", TimeSlot::Now, "渋谷区"),
                friend("2", "つけ麺好きの佐藤さん", TimeSlot::Lunch, "新宿区"),
                friend("3", "家系マスター田中くん", TimeSlot::Night, "渋谷区"),
                friend("4", "あっさり派の高橋さん", TimeSlot::Now, "豊島区"),
            ],
            users,
            state: RefCell::new(state),
        }
    }

    /// Replace the served friend list.
    pub fn with_friends(mut self, friends: Vec<IkitaiFriend>) -> Self {
        self.friends = friends;
        self
    }

    fn check(auth: &Credentials) -> AppResult<()> {
        if auth.token().is_empty() {
            return Err(AppError::NotAuthenticated);
        }
        Ok(())
    }

    fn find_user(&self, id: i64) -> AppResult<User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AppError::Api {
                status: 404,
                detail: "User not found".into(),
            })
    }

    fn listing<F>(&self, pred: F) -> Vec<UserRelationship>
    where
        F: Fn(&UserRelationship) -> bool,
    {
        self.state
            .borrow()
            .relationships
            .iter()
            .filter(|r| pred(r))
            .cloned()
            .collect()
    }
}

impl IkitaiApi for MockApi {
    fn fetch_ikitai_friends(&self, auth: &Credentials) -> AppResult<Vec<IkitaiFriend>> {
        Self::check(auth)?;
        info!("API Call: fetch ikitai friends (mock)");
        Ok(self.friends.clone())
    }

    fn update_status(&self, auth: &Credentials, update: &StatusUpdate) -> AppResult<()> {
        Self::check(auth)?;
        info!(?update, "API Call: update ikitai status (mock)");
        let mut st = self.state.borrow_mut();
        match update.status {
            StatusFlag::Off => st.own_status = None,
            StatusFlag::On => {
                let slot = update
                    .time_slot
                    .ok_or_else(|| AppError::Api {
                        status: 400,
                        detail: "timeSlot is required".into(),
                    })?;
                let prev = st.own_status.take();
                st.own_status = Some(OwnStatus {
                    time_slot: Some(slot),
                    // a slot change comes without coordinates; keep the old fix
                    latitude: update
                        .latitude
                        .or_else(|| prev.as_ref().and_then(|p| p.latitude)),
                    longitude: update
                        .longitude
                        .or_else(|| prev.as_ref().and_then(|p| p.longitude)),
                    expires_at: Some(slot.expires_at(Utc::now())),
                });
            }
        }
        Ok(())
    }

    fn fetch_own_status(&self, auth: &Credentials) -> AppResult<Option<OwnStatus>> {
        Self::check(auth)?;
        Ok(self.state.borrow().own_status.clone())
    }
}

impl AuthApi for MockApi {
    fn register(&self, username: &str, email: &str, _password: &str) -> AppResult<User> {
        info!(username, "API Call: register (mock)");
        if self.users.iter().any(|u| u.username == username) {
            return Err(AppError::Api {
                status: 400,
                detail: "A user with that username already exists.".into(),
            });
        }
        Ok(User {
            id: 1000,
            username: username.to_string(),
            email: email.to_string(),
            created_at: Some(Utc::now()),
        })
    }

    fn login(&self, username: &str, password: &str) -> AppResult<AuthTokens> {
        info!(username, "API Call: login (mock)");
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Api {
                status: 401,
                detail: "No active account found with the given credentials".into(),
            });
        }
        Ok(AuthTokens {
            access: MOCK_ACCESS_TOKEN.to_string(),
            refresh: MOCK_REFRESH_TOKEN.to_string(),
        })
    }

    fn refresh(&self, refresh: &str) -> AppResult<RefreshedToken> {
        if refresh != MOCK_REFRESH_TOKEN {
            return Err(AppError::NotAuthenticated);
        }
        Ok(RefreshedToken {
            access: MOCK_ACCESS_TOKEN.to_string(),
            refresh: None,
        })
    }
}

impl RelationshipApi for MockApi {
    fn follow(&self, auth: &Credentials, user_id: i64) -> AppResult<UserRelationship> {
        Self::check(auth)?;
        if user_id == ME {
            return Err(AppError::Api {
                status: 400,
                detail: "You cannot follow yourself.".into(),
            });
        }
        let target = self.find_user(user_id)?;
        let me = self.find_user(ME)?;

        let mut st = self.state.borrow_mut();
        if let Some(existing) = st
            .relationships
            .iter()
            .find(|r| r.follower.id == ME && r.followed.id == user_id)
        {
            let detail = match existing.status {
                Some(RelationshipStatus::Approved) => "Already following.",
                _ => "A follow request is already pending.",
            };
            return Err(AppError::Api {
                status: 409,
                detail: detail.into(),
            });
        }

        let rel = UserRelationship {
            id: st.next_id,
            follower: me,
            followed: target,
            status: Some(RelationshipStatus::Pending),
            created_at: Some(Utc::now()),
        };
        st.next_id += 1;
        st.relationships.push(rel.clone());
        Ok(rel)
    }

    fn respond(
        &self,
        auth: &Credentials,
        follower_id: i64,
        action: FollowAction,
    ) -> AppResult<UserRelationship> {
        Self::check(auth)?;
        let mut st = self.state.borrow_mut();
        let rel = st
            .relationships
            .iter_mut()
            .find(|r| {
                r.follower.id == follower_id
                    && r.followed.id == ME
                    && r.status == Some(RelationshipStatus::Pending)
            })
            .ok_or_else(|| AppError::Api {
                status: 404,
                detail: "No pending follow request found.".into(),
            })?;
        rel.status = Some(match action {
            FollowAction::Approve => RelationshipStatus::Approved,
            FollowAction::Deny => RelationshipStatus::Denied,
        });
        Ok(rel.clone())
    }

    fn unfollow(&self, auth: &Credentials, user_id: i64) -> AppResult<()> {
        Self::check(auth)?;
        let mut st = self.state.borrow_mut();
        let before = st.relationships.len();
        st.relationships.retain(|r| {
            !(r.follower.id == ME
                && r.followed.id == user_id
                && r.status == Some(RelationshipStatus::Approved))
        });
        if st.relationships.len() == before {
            return Err(AppError::Api {
                status: 404,
                detail: "You are not following this user.".into(),
            });
        }
        Ok(())
    }

    fn following(&self, auth: &Credentials) -> AppResult<Vec<UserRelationship>> {
        Self::check(auth)?;
        Ok(self.listing(|r| {
            r.follower.id == ME && r.status == Some(RelationshipStatus::Approved)
        }))
    }

    fn followers(&self, auth: &Credentials) -> AppResult<Vec<UserRelationship>> {
        Self::check(auth)?;
        Ok(self.listing(|r| {
            r.followed.id == ME && r.status == Some(RelationshipStatus::Approved)
        }))
    }

    fn pending_requests(&self, auth: &Credentials) -> AppResult<Vec<UserRelationship>> {
        Self::check(auth)?;
        Ok(self.listing(|r| {
            r.followed.id == ME && r.status == Some(RelationshipStatus::Pending)
        }))
    }
}

impl RamenLogApi for MockApi {
    fn list_logs(&self, _auth: Option<&Credentials>) -> AppResult<Vec<RamenLog>> {
        let mut logs = self.state.borrow().logs.clone();
        // newest visit first, undated entries last
        logs.sort_by(|a, b| b.visited_at.cmp(&a.visited_at));
        Ok(logs)
    }

    fn get_log(&self, _auth: Option<&Credentials>, id: i64) -> AppResult<RamenLog> {
        self.state
            .borrow()
            .logs
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| AppError::Api {
                status: 404,
                detail: "Not found.".into(),
            })
    }

    fn create_log(&self, _auth: Option<&Credentials>, log: &NewRamenLog) -> AppResult<RamenLog> {
        let mut st = self.state.borrow_mut();
        let entry = RamenLog {
            id: st.next_id,
            shop_name: log.shop_name.clone(),
            user_name: log.user_name.clone(),
            ordered_item: log.ordered_item.clone(),
            noodle_hardness: log.noodle_hardness.clone(),
            toppings: log.toppings.clone(),
            rating: log.rating,
            visited_at: log.visited_at,
        };
        st.next_id += 1;
        st.logs.push(entry.clone());
        Ok(entry)
    }

    fn delete_log(&self, _auth: Option<&Credentials>, id: i64) -> AppResult<()> {
        let mut st = self.state.borrow_mut();
        let before = st.logs.len();
        st.logs.retain(|l| l.id != id);
        if st.logs.len() == before {
            return Err(AppError::Api {
                status: 404,
                detail: "Not found.".into(),
            });
        }
        Ok(())
    }
}
