//! Provider-side scheduled pushes.
//!
//! A schedule wraps a [`PushRequest`] in a trigger: either a single fire
//! time or a periodical rule. The provider stores and fires it; nothing runs
//! locally. Times use the `%Y-%m-%d %H:%M:%S` layout in the provider's
//! timezone.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::JPushClient;
use crate::push::PushRequest;
use crate::zone::Service;
use crate::Result;

/// `%Y-%m-%d %H:%M:%S` timestamps.
mod schedule_time {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        time: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => super::serialize(time, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|s| {
                NaiveDateTime::parse_from_str(&s, super::FORMAT).map_err(de::Error::custom)
            })
            .transpose()
        }
    }
}

/// Recurrence granularity of a periodical trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PeriodUnit {
    Day,
    Week,
    Month,
}

/// Recurring fire rule.
///
/// Fires every `frequency` units at `time` between `start` and `end`. For
/// weekly rules `point` holds weekday names (`"WED"`), for monthly rules
/// days of the month (`"01"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Periodical {
    #[serde(default, with = "schedule_time::option", skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, with = "schedule_time::option", skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<PeriodUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub point: Vec<String>,
}

impl Periodical {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_time_unit(mut self, unit: PeriodUnit) -> Self {
        self.time_unit = Some(unit);
        self
    }

    pub fn with_frequency(mut self, frequency: i32) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn with_points<I, S>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.point.extend(points.into_iter().map(Into::into));
        self
    }
}

/// When a schedule fires.
///
/// Serializes under a `single` or `periodical` key, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Fire once at the given time.
    Single(#[serde(with = "schedule_time")] NaiveDateTime),
    /// Fire on a recurring rule.
    Periodical(Periodical),
}

/// Create or update payload for a schedule.
///
/// Updates may carry any subset of fields; the provider leaves the rest
/// untouched. Creation requires `name`, `enabled`, `trigger` and `push`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScheduleRequest {
    /// Pre-allocated schedule ID from
    /// [`JPushClient::cid_pool`](crate::JPushClient::cid_pool).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Explicit `false` pauses the schedule without deleting it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Trigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<PushRequest>,
}

impl ScheduleRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn with_push(mut self, push: PushRequest) -> Self {
        self.push = Some(push);
        self
    }
}

/// A stored schedule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Schedule {
    pub schedule_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub trigger: Option<Trigger>,
    #[serde(default)]
    pub push: Option<PushRequest>,
}

/// One page of the schedule list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchedulePage {
    pub total_count: i32,
    pub total_pages: i32,
    pub page: i32,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

/// Message IDs produced by a schedule's past fires.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleMsgIds {
    pub count: i32,
    /// IDs come back as numbers or strings depending on provider version.
    #[serde(default)]
    pub msgids: Vec<Value>,
}

impl JPushClient {
    /// Store a new schedule.
    ///
    /// `POST /v3/schedules`
    pub async fn create_schedule(&self, request: &ScheduleRequest) -> Result<Schedule> {
        let url = self.endpoint(Service::Schedule, "");
        self.send_json(self.http().post(url).json(request)).await
    }

    /// List schedules, 50 per page, newest first.
    ///
    /// `GET /v3/schedules?page=`
    pub async fn schedules(&self, page: u32) -> Result<SchedulePage> {
        let url = self.endpoint(Service::Schedule, "");
        let request = self.http().get(url).query(&[("page", page.to_string())]);
        self.send_json(request).await
    }

    /// Fetch one schedule.
    ///
    /// `GET /v3/schedules/{schedule_id}`
    pub async fn schedule(&self, schedule_id: &str) -> Result<Schedule> {
        let url = self.endpoint(Service::Schedule, schedule_id);
        self.send_json(self.http().get(url)).await
    }

    /// Message IDs from a schedule's past fires.
    ///
    /// `GET /v3/schedules/{schedule_id}/msg_ids`
    pub async fn schedule_msg_ids(&self, schedule_id: &str) -> Result<ScheduleMsgIds> {
        let path = format!("{schedule_id}/msg_ids");
        let url = self.endpoint(Service::Schedule, &path);
        self.send_json(self.http().get(url)).await
    }

    /// Apply a partial or full update to a schedule.
    ///
    /// `PUT /v3/schedules/{schedule_id}`
    pub async fn update_schedule(
        &self,
        schedule_id: &str,
        request: &ScheduleRequest,
    ) -> Result<Schedule> {
        let url = self.endpoint(Service::Schedule, schedule_id);
        self.send_json(self.http().put(url).json(request)).await
    }

    /// Delete a schedule.
    ///
    /// `DELETE /v3/schedules/{schedule_id}`
    pub async fn delete_schedule(&self, schedule_id: &str) -> Result<()> {
        let url = self.endpoint(Service::Schedule, schedule_id);
        self.send(self.http().delete(url)).await?;
        Ok(())
    }
}
