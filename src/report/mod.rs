use log::debug;
use uuid::Uuid;

use crate::calendar::ClassYearWindow;
use crate::clock::Clock;
use crate::error::ReportError;
use crate::models::{EventReport, MemberReport, Snapshot};

pub mod events;
pub mod markdown;
pub mod members;

pub fn member_report(snapshot: &Snapshot, clock: &dyn Clock) -> MemberReport {
    let window = ClassYearWindow::at(clock.now());
    debug!(
        "building member report over {} members and {} events (class years {:?})",
        snapshot.members.len(),
        snapshot.events.len(),
        window.years()
    );

    members::build(&snapshot.members, &snapshot.events, &window)
}

pub fn event_report(
    snapshot: &Snapshot,
    event_id: Uuid,
    clock: &dyn Clock,
) -> Result<EventReport, ReportError> {
    let event = snapshot
        .events
        .iter()
        .find(|event| event.id == event_id)
        .ok_or(ReportError::EventNotFound(event_id))?;

    let window = ClassYearWindow::at(clock.now());
    let attendees = events::attendees_of(event, &snapshot.members);
    debug!(
        "building event report for {} ({}) with {} attendees",
        event.name,
        event.id,
        attendees.len()
    );

    Ok(events::build(event, &snapshot.events, &attendees, &window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn unknown_event_is_reported_not_panicked() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2018, 6, 1, 0, 0, 0).unwrap());
        let missing = Uuid::new_v4();
        let result = event_report(&Snapshot::default(), missing, &clock);
        assert_eq!(result.unwrap_err(), ReportError::EventNotFound(missing));
    }

    #[test]
    fn empty_snapshot_serializes_empty_objects() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2018, 6, 1, 0, 0, 0).unwrap());
        let report = member_report(&Snapshot::default(), &clock);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "majors": {},
                "grades": {},
                "numNewMembersPerMonth": {},
                "numMembersPerMonth": {},
                "membersEventAttendance": {},
                "eventAttendancePerMonth": {}
            })
        );
    }
}
