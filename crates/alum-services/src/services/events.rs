use std::sync::Arc;

use alum_core::actions::EventBulkAction;
use alum_core::entities::Event;
use alum_core::responses::{ApiResponse, BulkOperationResult};
use alum_core::stats::{EventAnalytics, EventStats};
use alum_http::Endpoints;
use chrono::Utc;
use serde_json::json;

use crate::context::Backend;
use crate::facade::{RealCollection, bulk_from_result, facade_crud};

#[derive(Clone)]
pub struct EventsService {
    backend: Backend,
    real: RealCollection<Event>,
}

impl EventsService {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        let real = RealCollection::new(Arc::clone(backend.client()), Endpoints::EVENTS);
        Self { backend, real }
    }

    facade_crud!(Event, events);

    pub async fn publish(&self, id: &str) -> ApiResponse<Event> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.events.publish(id), self.real.action(id, "publish", &json!({})))
            .await;
        ApiResponse::from_result_with_message(result, "Event published")
    }

    pub async fn cancel(&self, id: &str) -> ApiResponse<Event> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.events.cancel(id), self.real.action(id, "cancel", &json!({})))
            .await;
        ApiResponse::from_result_with_message(result, "Event cancelled")
    }

    pub async fn complete(&self, id: &str) -> ApiResponse<Event> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.events.complete(id), self.real.action(id, "complete", &json!({})))
            .await;
        ApiResponse::from_result_with_message(result, "Event completed")
    }

    /// Register a user; full, closed or duplicate registrations are 409.
    pub async fn register_attendee(&self, id: &str, user_id: &str) -> ApiResponse<Event> {
        let mocks = self.backend.mocks();
        let body = json!({ "userId": user_id });
        let result = self
            .backend
            .route(
                mocks.events.register_attendee(id, user_id),
                self.real.action(id, "register", &body),
            )
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn unregister_attendee(&self, id: &str, user_id: &str) -> ApiResponse<Event> {
        let mocks = self.backend.mocks();
        let body = json!({ "userId": user_id });
        let result = self
            .backend
            .route(
                mocks.events.unregister_attendee(id, user_id),
                self.real.action(id, "unregister", &body),
            )
            .await;
        ApiResponse::from_result(result)
    }

    /// Published events that have not started yet, soonest first.
    pub async fn upcoming(&self, limit: usize) -> ApiResponse<Vec<Event>> {
        let mocks = self.backend.mocks();
        let params = [("limit".to_string(), limit.to_string())];
        let result = self
            .backend
            .route(
                async { Ok(mocks.events.upcoming(Utc::now(), limit).await) },
                self.real.view("upcoming", &params),
            )
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn analytics(&self, id: &str) -> ApiResponse<EventAnalytics> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.events.analytics(id), self.real.nested(id, "analytics"))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn stats(&self) -> ApiResponse<EventStats> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(async { Ok(mocks.events.stats(Utc::now()).await) }, self.real.stats())
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn bulk_operation(&self, ids: &[String], action: EventBulkAction) -> BulkOperationResult {
        if self.backend.use_mock() {
            return self.backend.mocks().events.bulk(ids, action).await;
        }
        let summary = bulk_from_result(ids, self.real.bulk(action.as_str(), ids).await);
        if action == EventBulkAction::Delete {
            summary.as_delete()
        } else {
            summary
        }
    }
}
