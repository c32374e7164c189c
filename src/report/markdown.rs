use std::fmt::{Display, Write};

use crate::histogram::Histogram;
use crate::models::{EventReport, MemberReport};

fn write_section<K: Display>(output: &mut String, title: &str, histogram: &Histogram<K>) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");

    if histogram.is_empty() {
        let _ = writeln!(output, "No data.");
    } else {
        for (key, count) in histogram.entries() {
            let _ = writeln!(output, "- {key}: {count}");
        }
    }
}

pub fn render_member_report(report: &MemberReport) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Membership Report");
    write_section(&mut output, "Majors", &report.majors);
    write_section(&mut output, "Class Years", &report.grades);
    write_section(&mut output, "New Members Per Month", &report.num_new_members_per_month);
    write_section(&mut output, "Total Members Per Month", &report.num_members_per_month);
    write_section(&mut output, "Events Attended Per Member", &report.members_event_attendance);
    write_section(&mut output, "Event Check-ins Per Month", &report.event_attendance_per_month);

    output
}

pub fn render_event_report(report: &EventReport) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Event Report: {}", report.event_name);
    write_section(&mut output, "Majors", &report.majors);
    write_section(&mut output, "Class Years", &report.grades);
    write_section(
        &mut output,
        "Events Attended Before This Event",
        &report.members_event_attendance_prior_to_the_event,
    );
    write_section(
        &mut output,
        "Events Attended Overall",
        &report.members_current_event_attendance,
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::SortOrder;

    #[test]
    fn empty_sections_say_so() {
        let report = EventReport {
            event_name: "Kickoff".to_string(),
            majors: Histogram::default(),
            grades: Histogram::default(),
            members_event_attendance_prior_to_the_event: Histogram::default(),
            members_current_event_attendance: Histogram::count_by([1usize, 1, 3], Some, SortOrder::KeyAscending),
        };

        let output = render_event_report(&report);
        assert!(output.starts_with("# Event Report: Kickoff\n"));
        assert!(output.contains("## Majors\nNo data.\n"));
        assert!(output.contains("## Events Attended Overall\n- 1: 2\n- 3: 1\n"));
    }
}
