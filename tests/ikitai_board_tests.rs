use std::cell::{Cell, RefCell};

use ramenlog::api::{IkitaiApi, MockApi};
use ramenlog::core::ikitai::IkitaiBoard;
use ramenlog::errors::{AppError, AppResult};
use ramenlog::location::{LocationProvider, Permission};
use ramenlog::models::ikitai::{Coordinates, IkitaiFriend, OwnStatus, StatusFlag, StatusUpdate};
use ramenlog::models::time_slot::TimeSlot;
use ramenlog::models::user::Credentials;

fn friend(id: &str, municipality: &str, slot: TimeSlot) -> IkitaiFriend {
    IkitaiFriend {
        user_id: id.to_string(),
        user_name: format!("friend {id}"),
        user_icon_url: "icon_url".to_string(),
        time_slot: slot,
        municipality: municipality.to_string(),
    }
}

/// Records every status update and can be told to fail.
#[derive(Default)]
struct RecordingApi {
    friends: Vec<IkitaiFriend>,
    own: Option<OwnStatus>,
    fail_updates: Cell<bool>,
    fail_fetch: Cell<bool>,
    fail_own: Cell<bool>,
    updates: RefCell<Vec<StatusUpdate>>,
    tokens: RefCell<Vec<String>>,
}

impl IkitaiApi for RecordingApi {
    fn fetch_ikitai_friends(&self, auth: &Credentials) -> AppResult<Vec<IkitaiFriend>> {
        self.tokens.borrow_mut().push(auth.token().to_string());
        if self.fail_fetch.get() {
            return Err(AppError::Network("connection refused".into()));
        }
        Ok(self.friends.clone())
    }

    fn update_status(&self, auth: &Credentials, update: &StatusUpdate) -> AppResult<()> {
        self.tokens.borrow_mut().push(auth.token().to_string());
        self.updates.borrow_mut().push(update.clone());
        if self.fail_updates.get() {
            return Err(AppError::Network("HTTP 503".into()));
        }
        Ok(())
    }

    fn fetch_own_status(&self, _auth: &Credentials) -> AppResult<Option<OwnStatus>> {
        if self.fail_own.get() {
            return Err(AppError::Network("timeout".into()));
        }
        Ok(self.own.clone())
    }
}

/// Counts permission prompts and position reads.
struct FakeLocation {
    permission: Permission,
    fix: Option<Coordinates>,
    prompts: Cell<usize>,
    reads: Cell<usize>,
}

impl FakeLocation {
    fn granted() -> Self {
        Self {
            permission: Permission::Granted,
            fix: Some(Coordinates {
                latitude: 35.658,
                longitude: 139.701,
            }),
            prompts: Cell::new(0),
            reads: Cell::new(0),
        }
    }

    fn denied() -> Self {
        Self {
            permission: Permission::Denied,
            ..Self::granted()
        }
    }

    fn touched(&self) -> bool {
        self.prompts.get() > 0 || self.reads.get() > 0
    }
}

impl LocationProvider for FakeLocation {
    fn request_permission(&self) -> AppResult<Permission> {
        self.prompts.set(self.prompts.get() + 1);
        Ok(self.permission)
    }

    fn current_position(&self) -> AppResult<Coordinates> {
        self.reads.set(self.reads.get() + 1);
        self.fix
            .ok_or_else(|| AppError::LocationUnavailable("no fix".into()))
    }
}

fn creds() -> Credentials {
    Credentials::bearer("token-abc")
}

fn sample_friends() -> Vec<IkitaiFriend> {
    vec![
        friend("1", "渋谷区", TimeSlot::Now),
        friend("2", "新宿区", TimeSlot::Lunch),
        friend("3", "渋谷区", TimeSlot::Night),
    ]
}

#[test]
fn test_activation_loads_friends_and_own_status() {
    let api = RecordingApi {
        friends: sample_friends(),
        own: Some(OwnStatus {
            time_slot: Some(TimeSlot::Night),
            latitude: Some(35.6),
            longitude: Some(139.7),
            expires_at: None,
        }),
        ..Default::default()
    };
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);

    board.activate().unwrap();

    assert_eq!(board.friends().len(), 3);
    assert!(board.is_ikitai());
    assert_eq!(board.selected_time_slot(), TimeSlot::Night);
    assert!(!loc.touched());
}

#[test]
fn test_backend_record_without_slot_keeps_local_slot() {
    let own: OwnStatus = serde_json::from_str(
        r#"{"id":7,"latitude":35.6,"longitude":139.7,"expires_at":"2025-10-03T14:00:00Z"}"#,
    )
    .unwrap();
    let api = RecordingApi {
        friends: sample_friends(),
        own: Some(own),
        ..Default::default()
    };
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Lunch);

    board.activate().unwrap();

    assert!(board.is_ikitai());
    assert_eq!(board.selected_time_slot(), TimeSlot::Lunch);
    assert_eq!(
        board.expires_at().map(|t| t.to_rfc3339()),
        Some("2025-10-03T14:00:00+00:00".to_string())
    );

    board.select_time_slot(TimeSlot::Night).unwrap();
    let updates = api.updates.borrow();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].time_slot, Some(TimeSlot::Night));
    assert!(!loc.touched());
}

#[test]
fn test_activation_without_own_status_starts_off() {
    let api = RecordingApi {
        friends: sample_friends(),
        ..Default::default()
    };
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Lunch);

    board.activate().unwrap();

    assert!(!board.is_ikitai());
    assert_eq!(board.selected_time_slot(), TimeSlot::Lunch);
    assert!(api.updates.borrow().is_empty());
}

#[test]
fn test_own_status_failure_does_not_fail_activation() {
    let api = RecordingApi {
        friends: sample_friends(),
        ..Default::default()
    };
    api.fail_own.set(true);
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);

    assert!(board.activate().is_ok());
    assert!(!board.is_ikitai());
    assert_eq!(board.friends().len(), 3);
}

#[test]
fn test_fetch_failure_is_network_error_and_keeps_list() {
    let api = RecordingApi {
        friends: sample_friends(),
        ..Default::default()
    };
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);
    board.reload().unwrap();

    api.fail_fetch.set(true);
    let err = board.reload().unwrap_err();

    assert!(matches!(err, AppError::Network(_)));
    assert_eq!(board.friends().len(), 3);
}

#[test]
fn test_turning_on_sends_slot_and_location() {
    let api = RecordingApi::default();
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);
    board.select_time_slot(TimeSlot::Lunch).unwrap();

    board.set_ikitai(true).unwrap();

    assert!(board.is_ikitai());
    assert!(board.expires_at().is_some());
    let updates = api.updates.borrow();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].status, StatusFlag::On);
    assert_eq!(updates[0].time_slot, Some(TimeSlot::Lunch));
    assert_eq!(updates[0].latitude, Some(35.658));
    assert_eq!(updates[0].longitude, Some(139.701));
    assert_eq!(loc.prompts.get(), 1);
    assert_eq!(loc.reads.get(), 1);
}

#[test]
fn test_permission_denied_leaves_switch_off() {
    let api = RecordingApi::default();
    let loc = FakeLocation::denied();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);

    let err = board.set_ikitai(true).unwrap_err();

    assert!(matches!(err, AppError::PermissionDenied));
    assert!(!board.is_ikitai());
    assert_eq!(loc.reads.get(), 0);
    assert!(api.updates.borrow().is_empty());
}

#[test]
fn test_missing_fix_reverts_switch() {
    let api = RecordingApi::default();
    let loc = FakeLocation {
        fix: None,
        ..FakeLocation::granted()
    };
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);

    let err = board.set_ikitai(true).unwrap_err();

    assert!(matches!(err, AppError::LocationUnavailable(_)));
    assert!(!board.is_ikitai());
    assert!(api.updates.borrow().is_empty());
}

#[test]
fn test_turning_off_never_touches_location() {
    let api = RecordingApi::default();
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);
    board.set_ikitai(true).unwrap();
    loc.prompts.set(0);
    loc.reads.set(0);

    board.set_ikitai(false).unwrap();

    assert!(!board.is_ikitai());
    assert!(board.expires_at().is_none());
    assert!(!loc.touched());
    let updates = api.updates.borrow();
    let last = updates.last().unwrap();
    assert_eq!(last.status, StatusFlag::Off);
    assert_eq!(last.time_slot, None);
    assert!(!last.has_location());
}

#[test]
fn test_off_with_denied_permission_still_works() {
    let api = RecordingApi::default();
    let loc = FakeLocation::denied();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);

    board.set_ikitai(false).unwrap();

    assert!(!loc.touched());
    assert_eq!(api.updates.borrow().len(), 1);
}

#[test]
fn test_network_failure_reverts_switch() {
    let api = RecordingApi::default();
    api.fail_updates.set(true);
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);

    let err = board.set_ikitai(true).unwrap_err();
    assert!(matches!(err, AppError::Network(_)));
    assert!(!board.is_ikitai());
}

#[test]
fn test_failed_off_reverts_to_on() {
    let api = RecordingApi::default();
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);
    board.set_ikitai(true).unwrap();

    api.fail_updates.set(true);
    assert!(board.set_ikitai(false).is_err());
    assert!(board.is_ikitai());
}

#[test]
fn test_slot_change_while_on_sends_exactly_one_update() {
    let api = RecordingApi::default();
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);
    board.set_ikitai(true).unwrap();
    let before = api.updates.borrow().len();
    loc.prompts.set(0);
    loc.reads.set(0);

    board.select_time_slot(TimeSlot::Night).unwrap();

    let updates = api.updates.borrow();
    assert_eq!(updates.len(), before + 1);
    let last = updates.last().unwrap();
    assert_eq!(last.status, StatusFlag::On);
    assert_eq!(last.time_slot, Some(TimeSlot::Night));
    assert!(!last.has_location());
    assert!(!loc.touched());
    assert_eq!(board.selected_time_slot(), TimeSlot::Night);
}

#[test]
fn test_slot_change_while_off_is_local() {
    let api = RecordingApi::default();
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);

    board.select_time_slot(TimeSlot::Lunch).unwrap();

    assert_eq!(board.selected_time_slot(), TimeSlot::Lunch);
    assert!(api.updates.borrow().is_empty());
    assert!(!loc.touched());
}

#[test]
fn test_rejected_slot_change_restores_previous_slot() {
    let api = RecordingApi::default();
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);
    board.set_ikitai(true).unwrap();

    api.fail_updates.set(true);
    assert!(board.select_time_slot(TimeSlot::Lunch).is_err());

    assert_eq!(board.selected_time_slot(), TimeSlot::Now);
    assert!(board.is_ikitai());
}

#[test]
fn test_municipality_filter_on_example_list() {
    let api = RecordingApi {
        friends: sample_friends(),
        ..Default::default()
    };
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);
    board.activate().unwrap();

    assert_eq!(board.municipalities(), vec!["すべて", "渋谷区", "新宿区"]);

    board.select_municipality(Some("渋谷区".to_string()));
    let ids: Vec<&str> = board
        .filtered_friends()
        .iter()
        .map(|f| f.user_id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "3"]);

    board.select_municipality(Some("すべて".to_string()));
    assert_eq!(board.selected_municipality(), None);
    assert_eq!(board.filtered_friends().len(), 3);
}

#[test]
fn test_every_request_carries_the_credentials() {
    let api = RecordingApi {
        friends: sample_friends(),
        ..Default::default()
    };
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, creds(), TimeSlot::Now);
    board.reload().unwrap();
    board.set_ikitai(true).unwrap();
    board.set_ikitai(false).unwrap();

    let tokens = api.tokens.borrow();
    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|t| t == "token-abc"));
}

#[test]
fn test_mock_with_custom_friend_list() {
    let api = MockApi::new().with_friends(vec![
        friend("10", "池袋", TimeSlot::Night),
        friend("11", "池袋", TimeSlot::Now),
    ]);
    let loc = FakeLocation::granted();
    let mut board = IkitaiBoard::new(&api, &loc, Credentials::bearer("mock-access"), TimeSlot::Now);

    board.activate().unwrap();

    assert!(!board.is_ikitai());
    assert_eq!(board.municipalities(), vec!["すべて", "池袋"]);
    assert_eq!(board.filtered_friends().len(), 2);

    board.set_ikitai(true).unwrap();
    board.sync_own_status();
    assert!(board.is_ikitai());
    assert_eq!(board.selected_time_slot(), TimeSlot::Now);
}
