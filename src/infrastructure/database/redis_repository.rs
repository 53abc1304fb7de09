//! Redis repository backend.
//!
//! Layout:
//! - `webinar:{id}`: hash holding one webinar record.
//! - `webinars:index`: sorted set of webinar ids scored by creation millis,
//!   read in reverse for the newest-first list view.
//! - `attendee:{id}`: hash holding one attendee record.
//! - `webinar:{id}:attendees`: sorted set of attendee ids scored by join
//!   millis, read in reverse for the most-recent-first list.
//! - `webinar:{id}:emails`: set of normalized emails; the `SADD` answer is
//!   the uniqueness constraint for the (webinar, email) pair.
//!
//! Uniqueness and the attendee counter are single Redis commands (`SADD`,
//! `HINCRBY`), so concurrent registrations cannot both claim a pair or lose
//! an increment.

use crate::config::RedisConfig;
use crate::domain::{
    Attendee, AttendeeSummary, NewAttendee, NewWebinar, Repository, RepositoryPtr, StoreError,
    Webinar, WebinarSummary,
};
use anyhow::Context;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Client};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

const WEBINARS_INDEX: &str = "webinars:index";

/// Creates a Redis-backed repository. Connections are multiplexed and
/// created on demand per operation.
pub fn create(config: &RedisConfig) -> anyhow::Result<RepositoryPtr> {
    // ---
    let client = Client::open(config.url.clone())?;
    Ok(Arc::new(RedisRepository { client }))
}

pub struct RedisRepository {
    // ---
    client: Client,
}

impl RedisRepository {
    // ---
    async fn conn(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        // ---
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|err| {
                tracing::error!("Failed to connect to Redis: {:?}", err);
                StoreError::Backend(err.into())
            })
    }
}

fn backend(err: redis::RedisError) -> StoreError {
    // ---
    StoreError::Backend(err.into())
}

fn webinar_key(id: Uuid) -> String {
    format!("webinar:{id}")
}

fn attendee_key(id: Uuid) -> String {
    format!("attendee:{id}")
}

fn attendees_index_key(webinar_id: Uuid) -> String {
    format!("webinar:{webinar_id}:attendees")
}

fn emails_key(webinar_id: Uuid) -> String {
    format!("webinar:{webinar_id}:emails")
}

#[async_trait::async_trait]
impl Repository for RedisRepository {
    // ---
    async fn create_webinar(&self, new: NewWebinar) -> Result<Webinar, StoreError> {
        // ---
        let webinar = Webinar::new(new);
        let mut conn = self.conn().await?;

        let fields = [
            ("id", webinar.id.to_string()),
            ("title", webinar.title.clone()),
            ("description", webinar.description.clone()),
            ("scheduled_at", webinar.scheduled_at.to_rfc3339()),
            ("attendee_count", webinar.attendee_count.to_string()),
            ("created_at", webinar.created_at.to_rfc3339()),
            ("updated_at", webinar.updated_at.to_rfc3339()),
        ];
        let _: () = conn
            .hset_multiple(webinar_key(webinar.id), &fields)
            .await
            .map_err(backend)?;

        let _: () = conn
            .zadd(
                WEBINARS_INDEX,
                webinar.id.to_string(),
                webinar.created_at.timestamp_millis(),
            )
            .await
            .map_err(backend)?;

        Ok(webinar)
    }

    async fn list_webinars(&self) -> Result<Vec<WebinarSummary>, StoreError> {
        // ---
        let mut conn = self.conn().await?;

        let ids: Vec<String> = conn
            .zrevrange(WEBINARS_INDEX, 0, -1)
            .await
            .map_err(backend)?;

        let mut summaries = Vec::with_capacity(ids.len());
        for id in ids {
            let fields: HashMap<String, String> = conn
                .hgetall(format!("webinar:{id}"))
                .await
                .map_err(backend)?;
            if fields.is_empty() {
                // Index entry without a hash; skip rather than fail the list.
                tracing::warn!("webinar {id} is indexed but has no record");
                continue;
            }
            let webinar = parse_webinar(&fields)?;
            summaries.push(WebinarSummary::from(&webinar));
        }

        Ok(summaries)
    }

    async fn get_webinar(&self, id: Uuid) -> Result<Option<Webinar>, StoreError> {
        // ---
        let mut conn = self.conn().await?;

        let fields: HashMap<String, String> =
            conn.hgetall(webinar_key(id)).await.map_err(backend)?;

        if fields.is_empty() {
            return Ok(None);
        }

        Ok(Some(parse_webinar(&fields)?))
    }

    async fn increment_attendee_count(&self, id: Uuid) -> Result<(), StoreError> {
        // ---
        let mut conn = self.conn().await?;

        // HINCRBY is the whole update; there is no read-modify-write cycle
        // for a concurrent registration to interleave with.
        let _: i64 = conn
            .hincr(webinar_key(id), "attendee_count", 1)
            .await
            .map_err(backend)?;

        let _: () = conn
            .hset(webinar_key(id), "updated_at", Utc::now().to_rfc3339())
            .await
            .map_err(backend)?;

        Ok(())
    }

    async fn insert_attendee(&self, new: NewAttendee) -> Result<Attendee, StoreError> {
        // ---
        let mut conn = self.conn().await?;

        // SADD both claims and checks the (webinar, email) pair in one
        // command; the loser of a concurrent race sees 0 here.
        let added: i64 = conn
            .sadd(emails_key(new.webinar_id), &new.email)
            .await
            .map_err(backend)?;
        if added == 0 {
            return Err(StoreError::DuplicateRegistration);
        }

        let attendee = Attendee::new(new);

        let fields = [
            ("id", attendee.id.to_string()),
            ("webinar_id", attendee.webinar_id.to_string()),
            ("email", attendee.email.clone()),
            ("full_name", attendee.full_name.clone()),
            ("joined_at", attendee.joined_at.to_rfc3339()),
            ("created_at", attendee.created_at.to_rfc3339()),
            ("updated_at", attendee.updated_at.to_rfc3339()),
        ];
        let _: () = conn
            .hset_multiple(attendee_key(attendee.id), &fields)
            .await
            .map_err(backend)?;

        let _: () = conn
            .zadd(
                attendees_index_key(attendee.webinar_id),
                attendee.id.to_string(),
                attendee.joined_at.timestamp_millis(),
            )
            .await
            .map_err(backend)?;

        Ok(attendee)
    }

    async fn list_attendees(&self, webinar_id: Uuid) -> Result<Vec<AttendeeSummary>, StoreError> {
        // ---
        let mut conn = self.conn().await?;

        let ids: Vec<String> = conn
            .zrevrange(attendees_index_key(webinar_id), 0, -1)
            .await
            .map_err(backend)?;

        let mut attendees = Vec::with_capacity(ids.len());
        for id in ids {
            let fields: HashMap<String, String> = conn
                .hgetall(format!("attendee:{id}"))
                .await
                .map_err(backend)?;
            if fields.is_empty() {
                tracing::warn!("attendee {id} is indexed but has no record");
                continue;
            }
            let attendee = parse_attendee(&fields)?;
            attendees.push(AttendeeSummary::from(&attendee));
        }

        Ok(attendees)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        // ---
        let mut conn = self.conn().await?;

        let _: String = conn.ping().await.map_err(backend)?;

        Ok(())
    }
}

// Hash parsing ------------------------------------------------------------

fn field<'a>(map: &'a HashMap<String, String>, name: &str) -> anyhow::Result<&'a str> {
    // ---
    map.get(name)
        .map(String::as_str)
        .with_context(|| format!("record is missing field {name}"))
}

fn datetime_field(map: &HashMap<String, String>, name: &str) -> anyhow::Result<DateTime<Utc>> {
    // ---
    let raw = field(map, name)?;
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("field {name} is not a valid timestamp: {raw}"))?;
    Ok(parsed.with_timezone(&Utc))
}

fn uuid_field(map: &HashMap<String, String>, name: &str) -> anyhow::Result<Uuid> {
    // ---
    let raw = field(map, name)?;
    Uuid::parse_str(raw).with_context(|| format!("field {name} is not a valid id: {raw}"))
}

fn parse_webinar(map: &HashMap<String, String>) -> anyhow::Result<Webinar> {
    // ---
    Ok(Webinar {
        id: uuid_field(map, "id")?,
        title: field(map, "title")?.to_string(),
        description: field(map, "description")?.to_string(),
        scheduled_at: datetime_field(map, "scheduled_at")?,
        attendee_count: field(map, "attendee_count")?
            .parse()
            .context("attendee_count is not a non-negative integer")?,
        created_at: datetime_field(map, "created_at")?,
        updated_at: datetime_field(map, "updated_at")?,
    })
}

fn parse_attendee(map: &HashMap<String, String>) -> anyhow::Result<Attendee> {
    // ---
    Ok(Attendee {
        id: uuid_field(map, "id")?,
        webinar_id: uuid_field(map, "webinar_id")?,
        email: field(map, "email")?.to_string(),
        full_name: field(map, "full_name")?.to_string(),
        joined_at: datetime_field(map, "joined_at")?,
        created_at: datetime_field(map, "created_at")?,
        updated_at: datetime_field(map, "updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn sample_webinar_map() -> HashMap<String, String> {
        // ---
        let mut map = HashMap::new();
        map.insert("id".into(), Uuid::new_v4().to_string());
        map.insert("title".into(), "Intro".into());
        map.insert("description".into(), String::new());
        map.insert("scheduled_at".into(), "2025-01-01T10:00:00+00:00".into());
        map.insert("attendee_count".into(), "3".into());
        map.insert("created_at".into(), "2024-12-01T09:00:00+00:00".into());
        map.insert("updated_at".into(), "2024-12-02T09:00:00+00:00".into());
        map
    }

    #[test]
    fn webinar_hash_round_trips() {
        // ---
        let map = sample_webinar_map();
        let webinar = parse_webinar(&map).unwrap();

        assert_eq!(webinar.title, "Intro");
        assert_eq!(webinar.attendee_count, 3);
        assert_eq!(
            webinar.scheduled_at.to_rfc3339(),
            "2025-01-01T10:00:00+00:00"
        );
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        // ---
        let mut map = sample_webinar_map();
        map.remove("title");

        let err = parse_webinar(&map).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn negative_count_is_a_parse_error() {
        // ---
        let mut map = sample_webinar_map();
        map.insert("attendee_count".into(), "-1".into());

        assert!(parse_webinar(&map).is_err());
    }
}
