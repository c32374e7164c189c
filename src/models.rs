use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::calendar::MonthKey;
use crate::histogram::Histogram;

#[derive(Debug, Clone)]
pub struct Member {
    pub id: Uuid,
    pub major: Option<String>,
    /// `0` when not set.
    pub graduation_year: i32,
    pub created_at: Option<DateTime<Utc>>,
    /// `None` when the collection was never initialised, as opposed to empty.
    pub attended_events: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub event_time: DateTime<Utc>,
    pub attendees: Option<Vec<Uuid>>,
    pub private_event: bool,
}

/// Read-only view of members and events for one report.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberReport {
    pub majors: Histogram<String>,
    pub grades: Histogram<i32>,
    pub num_new_members_per_month: Histogram<MonthKey>,
    pub num_members_per_month: Histogram<MonthKey>,
    pub members_event_attendance: Histogram<usize>,
    pub event_attendance_per_month: Histogram<MonthKey>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReport {
    pub event_name: String,
    pub majors: Histogram<String>,
    pub grades: Histogram<i32>,
    pub members_event_attendance_prior_to_the_event: Histogram<usize>,
    pub members_current_event_attendance: Histogram<usize>,
}
