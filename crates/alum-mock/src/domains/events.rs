use std::sync::Arc;

use alum_core::actions::EventBulkAction;
use alum_core::entities::Event;
use alum_core::enums::EventStatus;
use alum_core::resource::Resource;
use alum_core::responses::{ApiFailure, ApiResult, BulkOperationResult};
use alum_core::stats::{EventAnalytics, EventStats, breakdown};
use chrono::{DateTime, Utc};

use super::{crud_delegates, invalid_transition};
use crate::collection::MockCollection;
use crate::loader::MockDataLoader;
use crate::stub;

#[derive(Clone)]
pub struct EventsMock {
    events: MockCollection<Event>,
}

impl EventsMock {
    #[must_use]
    pub const fn new(loader: Arc<MockDataLoader>) -> Self {
        Self {
            events: MockCollection::new(loader),
        }
    }

    crud_delegates!(events: Event);

    async fn move_to(&self, id: &str, next: EventStatus) -> ApiResult<Event> {
        self.events
            .modify(id, |event| {
                if !event.status.can_transition_to(next) {
                    return Err(invalid_transition(Event::ENTITY, id, event.status, next));
                }
                event.status = next;
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// 404 for unknown ids; 409 unless the event is a draft.
    pub async fn publish(&self, id: &str) -> ApiResult<Event> {
        self.move_to(id, EventStatus::Published).await
    }

    /// # Errors
    ///
    /// 404 for unknown ids; 409 for completed or already cancelled events.
    pub async fn cancel(&self, id: &str) -> ApiResult<Event> {
        self.move_to(id, EventStatus::Cancelled).await
    }

    /// # Errors
    ///
    /// 404 for unknown ids; 409 unless the event is published.
    pub async fn complete(&self, id: &str) -> ApiResult<Event> {
        self.move_to(id, EventStatus::Completed).await
    }

    /// Add `user_id` to the attendee list.
    ///
    /// # Errors
    ///
    /// 404 for unknown ids. 409 when the event is cancelled or completed,
    /// the user is already registered, or the event is full.
    pub async fn register_attendee(&self, id: &str, user_id: &str) -> ApiResult<Event> {
        self.events
            .modify(id, |event| {
                if matches!(event.status, EventStatus::Cancelled | EventStatus::Completed) {
                    return Err(ApiFailure::conflict(format!(
                        "Event {id} is {} and not open for registration",
                        event.status
                    )));
                }
                if event.attendee_ids.iter().any(|a| a == user_id) {
                    return Err(ApiFailure::conflict(format!(
                        "User {user_id} is already registered for event {id}"
                    )));
                }
                if !event.has_capacity() {
                    return Err(ApiFailure::conflict(format!("Event {id} is full")));
                }
                event.attendee_ids.push(user_id.to_string());
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// 404 for unknown events or when the user is not registered.
    pub async fn unregister_attendee(&self, id: &str, user_id: &str) -> ApiResult<Event> {
        self.events
            .modify(id, |event| {
                let before = event.attendee_ids.len();
                event.attendee_ids.retain(|a| a != user_id);
                if event.attendee_ids.len() == before {
                    return Err(ApiFailure::new(
                        404,
                        format!("User {user_id} is not registered for event {id}"),
                    ));
                }
                Ok(())
            })
            .await
    }

    /// Published events starting after `now`, soonest first.
    pub async fn upcoming(&self, now: DateTime<Utc>, limit: usize) -> Vec<Event> {
        let mut upcoming: Vec<Event> = self
            .events
            .all()
            .await
            .into_iter()
            .filter(|e| e.status == EventStatus::Published && e.start_date.is_some_and(|s| s > now))
            .collect();
        upcoming.sort_by_key(|e| e.start_date);
        upcoming.truncate(limit);
        upcoming
    }

    /// # Errors
    ///
    /// 404 for unknown ids.
    pub async fn analytics(&self, id: &str) -> ApiResult<EventAnalytics> {
        let event = self.events.get(id).await?;
        Ok(stub::event_analytics(
            &event,
            self.events.loader().synthesize_demo_data(),
        ))
    }

    pub async fn stats(&self, now: DateTime<Utc>) -> EventStats {
        let events = self.events.all().await;
        EventStats {
            total: events.len(),
            by_status: breakdown(&events, |e| e.status.as_str()),
            upcoming: events
                .iter()
                .filter(|e| e.status == EventStatus::Published && e.start_date.is_some_and(|s| s > now))
                .count(),
            total_attendees: events.iter().map(|e| e.attendee_ids.len()).sum(),
        }
    }

    pub async fn bulk(&self, ids: &[String], action: EventBulkAction) -> BulkOperationResult {
        match action {
            EventBulkAction::Delete => self.events.delete_many(ids).await,
            EventBulkAction::Publish => {
                self.events
                    .bulk(ids, |id| async move { self.publish(&id).await.map(|_| ()) })
                    .await
            }
            EventBulkAction::Cancel => {
                self.events
                    .bulk(ids, |id| async move { self.cancel(&id).await.map(|_| ()) })
                    .await
            }
        }
    }
}
