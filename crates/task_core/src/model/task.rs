use super::Priority;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "completion_time")]
    pub completed_at: Option<OffsetDateTime>,
    #[serde(default = "zero_duration", with = "nanoseconds")]
    pub took_time: Duration,
}

impl Task {
    pub fn new(
        id: String,
        description: String,
        priority: Priority,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            description,
            priority,
            completed: false,
            created_at,
            completed_at: None,
            took_time: Duration::ZERO,
        }
    }

    /// Stamps completion at `now`. Calling this again re-stamps both
    /// `completed_at` and `took_time`.
    pub fn mark_completed(&mut self, now: OffsetDateTime) {
        self.completed = true;
        self.completed_at = Some(now);
        self.took_time = now - self.created_at;
    }
}

fn zero_duration() -> Duration {
    Duration::ZERO
}

/// RFC 3339 timestamp or `null`. Files written by earlier tools store the
/// zero time (`0001-01-01T00:00:00Z`) for tasks that are not completed.
mod completion_time {
    use serde::{Deserializer, Serializer};
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(
        value: &Option<OffsetDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        time::serde::rfc3339::option::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<OffsetDateTime>, D::Error> {
        let value = time::serde::rfc3339::option::deserialize(deserializer)?;
        Ok(value.filter(|timestamp| timestamp.year() > 1))
    }
}

mod nanoseconds {
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = i64::try_from(value.whole_nanoseconds()).map_err(S::Error::custom)?;
        serializer.serialize_i64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::nanoseconds(i64::deserialize(deserializer)?))
    }
}
