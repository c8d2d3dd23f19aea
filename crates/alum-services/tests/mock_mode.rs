//! Facades routed to an in-process mock document server.

use std::sync::Arc;

use alum_config::{AlumConfig, ApiMode, ModeResolver};
use alum_core::actions::{EventBulkAction, SponsorBulkAction};
use alum_core::entities::{Event, Sponsor};
use alum_core::enums::{EventStatus, UserStatus};
use alum_core::state::KeyValueStore;
use alum_http::ListQuery;
use alum_mock::{MentorshipRequest, MockServer};
use alum_services::{HealthStatus, NoJitter, ServiceContext};
use alum_storage::LocalStore;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn seed() -> Value {
    json!({
        "events": [
            {"id": "a", "title": "Gala", "status": "draft", "capacity": 1, "attendeeIds": []},
            {"id": "b", "title": "Fair", "status": "draft"},
            {"id": "c", "title": "Mixer", "status": "published"}
        ],
        "sponsors": [
            {"id": "s1", "name": "Northwind", "tier": "gold", "status": "pending", "contributionAmount": 100.0},
            {"id": "s2", "name": "Contoso", "tier": "gold", "status": "active", "contributionAmount": 250.0}
        ],
        "users": [
            {"id": "u1", "firstName": "Amara", "lastName": "Okafor", "email": "a@example.com",
             "role": "mentor", "status": "active", "verified": true,
             "skills": ["a", "b", "c", "d", "e"], "interests": ["x", "y", "z"]},
            {"id": "u2", "firstName": "Mei", "lastName": "Lin", "email": "m@example.com",
             "role": "student", "status": "suspended"}
        ],
        "mentorships": []
    })
}

fn context(server: &MockServer) -> ServiceContext {
    let mut config = AlumConfig::default();
    config.mock.base_url = server.base_url();
    // Nothing listens on the discard port.
    config.api.base_url = "http://127.0.0.1:9".to_string();
    config.api.timeout_secs = 2;
    let store: Arc<dyn KeyValueStore> = Arc::new(LocalStore::in_memory());
    ServiceContext::assemble(
        config,
        store,
        Arc::new(ModeResolver::fixed(ApiMode::Mock)),
        Arc::new(NoJitter),
    )
    .unwrap()
}

#[tokio::test]
async fn list_returns_paginated_envelope() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);

    let page = ctx.events.list(&ListQuery::new(1, 2)).await;

    assert!(page.success);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);
}

#[tokio::test]
async fn missing_record_is_a_404_envelope() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);

    let response = ctx.events.get("nope").await;
    assert!(!response.success);
    assert!(response.data.is_none());
    assert_eq!(response.error.as_ref().map(|e| e.code), Some(404));

    let err = ctx.events.try_get("nope").await.unwrap_err();
    assert_eq!(err.code, 404);
}

#[tokio::test]
async fn create_then_get_round_trips_through_the_server() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);

    let created = ctx
        .events
        .create(Event {
            title: "Webinar".into(),
            ..Event::default()
        })
        .await;
    assert!(created.success);
    let id = created.data.unwrap().id;

    let fetched = ctx.events.get(&id).await;
    assert_eq!(fetched.data.map(|e| e.title), Some("Webinar".to_string()));
}

#[tokio::test]
async fn bulk_publish_isolates_failures() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);

    let ids = vec!["a".to_string(), "missing".to_string(), "b".to_string()];
    let result = ctx.events.bulk_operation(&ids, EventBulkAction::Publish).await;

    assert_eq!(result.success_count, 2);
    assert_eq!(result.failure_count, 1);
    assert_eq!(result.errors[0].id, "missing");

    let b = ctx.events.try_get("b").await.unwrap();
    assert_eq!(b.status, EventStatus::Published);
}

#[tokio::test]
async fn delete_many_reports_deleted_count() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);

    let result = ctx
        .sponsors
        .bulk_operation(&["s1".to_string(), "s2".to_string()], SponsorBulkAction::Delete)
        .await;
    assert_eq!(result.deleted_count, Some(2));
    assert!(server.collection("sponsors").is_empty());
}

#[tokio::test]
async fn full_event_rejects_second_registration() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);

    assert!(ctx.events.register_attendee("a", "u1").await.success);
    let second = ctx.events.register_attendee("a", "u2").await;
    assert!(!second.success);
    assert_eq!(second.error.map(|e| e.code), Some(409));
}

#[tokio::test]
async fn sponsors_by_tier_sorts_by_contribution() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);

    let gold = ctx.sponsors.by_tier(alum_core::enums::SponsorTier::Gold).await;
    let names: Vec<String> = gold.data.unwrap().into_iter().map(|s: Sponsor| s.name).collect();
    assert_eq!(names, vec!["Contoso", "Northwind"]);
}

#[tokio::test]
async fn profiles_are_deterministic_without_jitter() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);

    let profile = ctx.users.get_profile("u1").await.data.unwrap();
    assert_eq!(profile.display_name, "Amara Okafor");
    assert_eq!(profile.badges, vec!["verified", "mentor", "skilled", "curious"]);
    assert_eq!(profile.impact_score, 150);

    let page = ctx.users.list_profiles(&ListQuery::default()).await;
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[1].impact_score, 20);
}

#[tokio::test]
async fn status_transitions_are_validated() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);

    let illegal = ctx.users.update_status("u2", UserStatus::Inactive).await;
    assert_eq!(illegal.error.map(|e| e.code), Some(409));

    let restored = ctx.users.update_status("u2", UserStatus::Active).await;
    assert_eq!(restored.data.map(|p| p.user.status), Some(UserStatus::Active));
}

#[tokio::test]
async fn mentorship_request_rejects_self_mentoring() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);

    let response = ctx
        .mentorship
        .request(MentorshipRequest {
            mentor_id: "u1".into(),
            mentee_id: "u1".into(),
            ..MentorshipRequest::default()
        })
        .await;
    assert_eq!(response.error.map(|e| e.code), Some(422));

    let ok = ctx
        .mentorship
        .request(MentorshipRequest {
            mentor_id: "u1".into(),
            mentee_id: "u2".into(),
            ..MentorshipRequest::default()
        })
        .await;
    assert!(ok.success);
}

#[tokio::test]
async fn cache_manager_warms_and_clears() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);
    let cache = ctx.cache();

    let warmed = cache.warm(&["events", "users"]).await;
    assert_eq!(warmed[0].items, 3);
    assert_eq!(cache.stats().keys, vec!["events", "users"]);

    cache.invalidate("events");
    assert_eq!(cache.stats().keys, vec!["users"]);

    cache.clear();
    assert_eq!(cache.stats().entries, 0);
}

#[tokio::test]
async fn health_is_degraded_when_only_the_idle_backend_is_down() {
    let server = MockServer::start(seed(), "127.0.0.1:0").unwrap();
    let ctx = context(&server);

    let report = ctx.health().check().await;
    assert_eq!(report.mode, ApiMode::Mock);
    assert_eq!(report.status, HealthStatus::Degraded);
    let api = report.components.iter().find(|c| c.name == "api").unwrap();
    assert_eq!(api.status, HealthStatus::Unhealthy);
    assert!(!api.active);
}
