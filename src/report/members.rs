use crate::calendar::{ClassYearWindow, MonthKey};
use crate::histogram::{by_count_descending, Histogram, SortOrder};
use crate::majors;
use crate::models::{Event, Member, MemberReport};

/// Abbreviated majors, most common first. Members without a major are skipped.
pub fn majors_of<'a, I>(members: I) -> Histogram<String>
where
    I: IntoIterator<Item = &'a Member>,
{
    Histogram::count_by(
        members,
        |member| majors::assigned(member.major.as_deref()).map(majors::abbreviate),
        SortOrder::By(by_count_descending),
    )
}

/// Graduation years falling inside the current class-year window.
pub fn grades_of<'a, I>(members: I, window: &ClassYearWindow, order: SortOrder<i32>) -> Histogram<i32>
where
    I: IntoIterator<Item = &'a Member>,
{
    Histogram::count_by(
        members,
        |member| window.contains(member.graduation_year).then_some(member.graduation_year),
        order,
    )
}

pub fn new_members_per_month(members: &[Member]) -> Histogram<MonthKey> {
    Histogram::count_by(
        members,
        |member| member.created_at.map(MonthKey::of),
        SortOrder::KeyAscending,
    )
}

pub fn event_attendance_per_member(members: &[Member]) -> Histogram<usize> {
    Histogram::count_by(
        members,
        |member| member.attended_events.as_ref().map(Vec::len),
        SortOrder::KeyAscending,
    )
}

/// Check-ins per month, weighted by each event's attendee count.
pub fn event_attendance_per_month(events: &[Event]) -> Histogram<MonthKey> {
    Histogram::sum_by(
        events,
        |event| {
            event
                .attendees
                .as_ref()
                .map(|attendees| (MonthKey::of(event.event_time), attendees.len() as u64))
        },
        SortOrder::KeyAscending,
    )
}

pub fn build(members: &[Member], events: &[Event], window: &ClassYearWindow) -> MemberReport {
    let num_new_members_per_month = new_members_per_month(members);
    let num_members_per_month = num_new_members_per_month.running_total();

    MemberReport {
        majors: majors_of(members),
        grades: grades_of(members, window, SortOrder::KeyDescending),
        num_new_members_per_month,
        num_members_per_month,
        members_event_attendance: event_attendance_per_member(members),
        event_attendance_per_month: event_attendance_per_month(events),
    }
}
