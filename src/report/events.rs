use std::collections::HashSet;

use uuid::Uuid;

use crate::calendar::ClassYearWindow;
use crate::histogram::{Histogram, SortOrder};
use crate::models::{Event, EventReport, Member};
use crate::report::members::{grades_of, majors_of};

/// Ids of every event that happened strictly before `event`.
pub fn prior_event_ids(event: &Event, events: &[Event]) -> HashSet<Uuid> {
    events
        .iter()
        .filter(|other| other.event_time < event.event_time)
        .map(|other| other.id)
        .collect()
}

/// Attendees of `event`, drawn from `members`.
pub fn attendees_of<'a>(event: &Event, members: &'a [Member]) -> Vec<&'a Member> {
    let ids: HashSet<Uuid> = event.attendees.iter().flatten().copied().collect();
    members.iter().filter(|member| ids.contains(&member.id)).collect()
}

fn attended(member: &Member) -> &[Uuid] {
    member.attended_events.as_deref().unwrap_or_default()
}

/// `event` must already be resolved; `attendees` are the members who checked in to it.
pub fn build(
    event: &Event,
    events: &[Event],
    attendees: &[&Member],
    window: &ClassYearWindow,
) -> EventReport {
    let prior = prior_event_ids(event, events);

    let members_event_attendance_prior_to_the_event = Histogram::count_by(
        attendees,
        |member| Some(attended(member).iter().filter(|id| prior.contains(id)).count()),
        SortOrder::KeyAscending,
    );

    let members_current_event_attendance = Histogram::count_by(
        attendees,
        |member| Some(attended(member).len()),
        SortOrder::KeyAscending,
    );

    EventReport {
        event_name: event.name.clone(),
        majors: majors_of(attendees.iter().copied()),
        grades: grades_of(attendees.iter().copied(), window, SortOrder::KeyAscending),
        members_event_attendance_prior_to_the_event,
        members_current_event_attendance,
    }
}
