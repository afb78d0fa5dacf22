//! End-to-end flows across registration, channels, news and replies.

use std::cell::Cell;

use gazette_service::{CommunityService, ServiceError};
use gazette_types::api::{
    ChannelRequest, DeleteChannelRequest, GetNewsRequest, PostNewsRequest, RegisterUserRequest,
    ReplyRequest,
};
use gazette_types::{HostEnv, Principal};
use uuid::Uuid;

/// Deterministic host with a fixed caller and sequential ids.
struct FakeHost {
    caller: Principal,
    next_id: Cell<u128>,
}

impl FakeHost {
    fn new(seed: u128) -> Self {
        Self {
            caller: Principal::new(Uuid::from_u128(seed)),
            next_id: Cell::new(seed << 64),
        }
    }
}

impl HostEnv for FakeHost {
    fn caller(&self) -> Principal {
        self.caller.clone()
    }

    fn now(&self) -> u64 {
        1_700_000_000_000_000_000
    }

    fn generate_id(&self) -> Principal {
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        Principal::new(Uuid::from_u128(n))
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("gazette_service=debug")
        .with_test_writer()
        .try_init();
}

fn channel_req(channel: &str, username: &str) -> ChannelRequest {
    ChannelRequest {
        channel_name: channel.into(),
        username: username.into(),
    }
}

#[test]
fn publish_and_reply_flow() {
    init_logging();
    let mut service = CommunityService::new();
    let alice = FakeHost::new(1);
    let bob = FakeHost::new(2);

    service
        .register_user(&alice, RegisterUserRequest { username: "alice".into() })
        .unwrap();
    service
        .create_channel(&alice, channel_req("news1", "alice"))
        .unwrap();
    service
        .post_news(
            &alice,
            PostNewsRequest {
                title: "T".into(),
                description: "D".into(),
                owner: alice.caller(),
                channel_name: "news1".into(),
            },
        )
        .unwrap();

    let news = service
        .news_for(GetNewsRequest { channel_name: "news1".into() })
        .unwrap();
    assert_eq!(news.len(), 1);
    assert_eq!(news[0].title, "T");
    assert_eq!(news[0].description, "D");

    // bob cannot follow before registering.
    let err = service
        .follow_channel(&bob, channel_req("news1", "bob"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::UserDoesNotExist(_)));

    service
        .register_user(&bob, RegisterUserRequest { username: "bob".into() })
        .unwrap();
    service
        .follow_channel(&bob, channel_req("news1", "bob"))
        .unwrap();

    let channels = service.all_channels();
    assert_eq!(
        channels[0].followers.iter().filter(|f| *f == "bob").count(),
        1
    );

    service
        .reply_to_news(
            &bob,
            ReplyRequest {
                channel_name: "news1".into(),
                username: "bob".into(),
                news_id: news[0].id.clone(),
                text: "good catch".into(),
            },
        )
        .unwrap();

    let news = service
        .news_for(GetNewsRequest { channel_name: "news1".into() })
        .unwrap();
    assert_eq!(news[0].replies.len(), 1);
    assert_eq!(news[0].replies[0].by.to_text(), bob.caller().to_text());
    assert_eq!(news[0].replies[0].text, "good catch");
}

#[test]
fn channel_listing_is_name_ordered_and_bookkeeping_tracks_deletes() {
    init_logging();
    let mut service = CommunityService::new();
    let alice = FakeHost::new(7);

    service
        .register_user(&alice, RegisterUserRequest { username: "alice".into() })
        .unwrap();
    for name in ["zebra", "alpha", "mango"] {
        service
            .create_channel(&alice, channel_req(name, "alice"))
            .unwrap();
    }

    let names: Vec<String> = service.all_channels().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["alpha", "mango", "zebra"]);

    let creator = service.storage().user("alice").unwrap();
    assert_eq!(
        creator.channels_created,
        vec!["zebra".to_string(), "alpha".to_string(), "mango".to_string()]
    );

    service
        .delete_channel(
            &alice,
            DeleteChannelRequest {
                channel_name: "alpha".into(),
                owner: alice.caller(),
            },
        )
        .unwrap();

    let creator = service.storage().user("alice").unwrap();
    assert_eq!(
        creator.channels_created,
        vec!["zebra".to_string(), "mango".to_string()]
    );
    let names: Vec<String> = service.all_channels().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["mango", "zebra"]);
}

#[test]
fn followers_and_replies_keep_insertion_order() {
    init_logging();
    let mut service = CommunityService::new();
    let alice = FakeHost::new(1);
    let bob = FakeHost::new(2);
    let carol = FakeHost::new(3);

    for (host, name) in [(&alice, "alice"), (&bob, "bob"), (&carol, "carol")] {
        service
            .register_user(host, RegisterUserRequest { username: name.into() })
            .unwrap();
    }
    service
        .create_channel(&alice, channel_req("news1", "alice"))
        .unwrap();

    // Follow order is not alphabetical, so order preserved means appended.
    service.follow_channel(&carol, channel_req("news1", "carol")).unwrap();
    service.follow_channel(&bob, channel_req("news1", "bob")).unwrap();
    assert_eq!(
        service.all_channels()[0].followers,
        vec!["carol".to_string(), "bob".to_string()]
    );

    service
        .post_news(
            &alice,
            PostNewsRequest {
                title: "T".into(),
                description: "D".into(),
                owner: alice.caller(),
                channel_name: "news1".into(),
            },
        )
        .unwrap();
    let news_id = service.all_channels()[0].news[0].id.clone();

    for (host, name, text) in [(&carol, "carol", "first"), (&bob, "bob", "second")] {
        service
            .reply_to_news(
                host,
                ReplyRequest {
                    channel_name: "news1".into(),
                    username: name.into(),
                    news_id: news_id.clone(),
                    text: text.into(),
                },
            )
            .unwrap();
    }

    let replies = &service.all_channels()[0].news[0].replies;
    let texts: Vec<&str> = replies.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
    assert_eq!(replies[0].by.to_text(), carol.caller().to_text());
    assert_eq!(replies[1].by.to_text(), bob.caller().to_text());
}

#[test]
fn failed_delete_mutates_nothing() {
    init_logging();
    let mut service = CommunityService::new();
    let alice = FakeHost::new(1);
    let mallory = FakeHost::new(9);

    service
        .register_user(&alice, RegisterUserRequest { username: "alice".into() })
        .unwrap();
    service
        .create_channel(&alice, channel_req("news1", "alice"))
        .unwrap();

    let err = service
        .delete_channel(
            &mallory,
            DeleteChannelRequest {
                channel_name: "news1".into(),
                owner: mallory.caller(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::OnlyOwnerCanDelete(_)));

    assert_eq!(service.all_channels().len(), 1);
    assert_eq!(
        service.storage().user("alice").unwrap().channels_created,
        vec!["news1".to_string()]
    );
}

#[test]
fn registration_timestamps_and_identity_come_from_host() {
    init_logging();
    let mut service = CommunityService::new();
    let alice = FakeHost::new(3);

    service
        .register_user(&alice, RegisterUserRequest { username: "alice".into() })
        .unwrap();

    let user = service.storage().user("alice").unwrap();
    assert_eq!(user.joined_at, alice.now());
    assert_eq!(user.id.to_text(), alice.caller().to_text());
    assert!(user.channels_created.is_empty());
}
