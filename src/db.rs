use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{Event, Member, Snapshot};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn evening(year: i32, month: u32, day: u32) -> anyhow::Result<DateTime<Utc>> {
    Ok(NaiveDate::from_ymd_opt(year, month, day)
        .context("invalid date")?
        .and_hms_opt(18, 30, 0)
        .context("invalid time")?
        .and_utc())
}

async fn upsert_member(
    pool: &PgPool,
    full_name: &str,
    email: &str,
    major: Option<&str>,
    graduation_year: i32,
) -> anyhow::Result<Uuid> {
    let id: Uuid = sqlx::query(
        r#"
        INSERT INTO membership.members (id, full_name, email, major, graduation_year)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE
        SET full_name = EXCLUDED.full_name,
            major = EXCLUDED.major,
            graduation_year = EXCLUDED.graduation_year
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(full_name)
    .bind(email)
    .bind(major)
    .bind(graduation_year)
    .fetch_one(pool)
    .await?
    .get("id");

    Ok(id)
}

async fn upsert_event(
    pool: &PgPool,
    name: &str,
    location: &str,
    event_time: DateTime<Utc>,
) -> anyhow::Result<Uuid> {
    let id: Uuid = sqlx::query(
        r#"
        INSERT INTO membership.events (id, name, location, event_time)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (name, event_time) DO UPDATE
        SET location = EXCLUDED.location
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(location)
    .bind(event_time)
    .fetch_one(pool)
    .await?
    .get("id");

    Ok(id)
}

/// Records a check-in; returns false if the member was already checked in.
async fn check_in(pool: &PgPool, member_id: Uuid, event_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO membership.event_attendance (member_id, event_id)
        VALUES ($1, $2)
        ON CONFLICT (member_id, event_id) DO NOTHING
        "#,
    )
    .bind(member_id)
    .bind(event_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let members = vec![
        ("Avery Lee", "avery.lee@example.edu", Some("Computer Science"), 2027),
        ("Jules Moreno", "jules.moreno@example.edu", Some("Computer Science"), 2028),
        ("Kiara Patel", "kiara.patel@example.edu", Some("First Year Engineering"), 2029),
        ("Noah Brooks", "noah.brooks@example.edu", Some("Math"), 2027),
        ("Priya Shah", "priya.shah@example.edu", Some("Electrical Computer Engineering"), 2030),
        ("Sam Okafor", "sam.okafor@example.edu", None, 0),
    ];

    let mut member_ids = Vec::new();
    for (name, email, major, graduation_year) in members {
        member_ids.push(upsert_member(pool, name, email, major, graduation_year).await?);
    }

    let events = vec![
        ("Kickoff Social", "Lawson Commons", evening(2026, 1, 14)?, 5),
        ("Intro to Git Workshop", "Lawson B134", evening(2026, 2, 4)?, 4),
        ("Resume Review", "Lawson B155", evening(2026, 2, 18)?, 2),
        ("Spring Hack Night", "Lawson Commons", evening(2026, 4, 9)?, 3),
    ];

    for (name, location, event_time, attendee_count) in events {
        let event_id = upsert_event(pool, name, location, event_time).await?;
        for member_id in member_ids.iter().take(attendee_count) {
            check_in(pool, *member_id, event_id).await?;
        }
    }

    Ok(())
}

async fn fetch_members(pool: &PgPool) -> anyhow::Result<Vec<Member>> {
    let rows = sqlx::query(
        r#"
        SELECT m.id, m.major, m.graduation_year, m.created_at,
               COALESCE(array_agg(a.event_id) FILTER (WHERE a.event_id IS NOT NULL), '{}') AS attended_events
        FROM membership.members m
        LEFT JOIN membership.event_attendance a ON a.member_id = m.id
        GROUP BY m.id
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to load members")?;

    let mut members = Vec::with_capacity(rows.len());
    for row in rows {
        members.push(Member {
            id: row.get("id"),
            major: row.get("major"),
            graduation_year: row.get("graduation_year"),
            created_at: row.get("created_at"),
            attended_events: Some(row.get("attended_events")),
        });
    }

    Ok(members)
}

async fn fetch_events(pool: &PgPool) -> anyhow::Result<Vec<Event>> {
    let rows = sqlx::query(
        r#"
        SELECT e.id, e.name, e.event_time, e.private_event,
               COALESCE(array_agg(a.member_id) FILTER (WHERE a.member_id IS NOT NULL), '{}') AS attendees
        FROM membership.events e
        LEFT JOIN membership.event_attendance a ON a.event_id = e.id
        GROUP BY e.id
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to load events")?;

    let mut events = Vec::with_capacity(rows.len());
    for row in rows {
        events.push(Event {
            id: row.get("id"),
            name: row.get("name"),
            event_time: row.get("event_time"),
            attendees: Some(row.get("attendees")),
            private_event: row.get("private_event"),
        });
    }

    Ok(events)
}

/// Loads members and events concurrently.
pub async fn load_snapshot(pool: &PgPool) -> anyhow::Result<Snapshot> {
    let (members, events) = tokio::try_join!(fetch_members(pool), fetch_events(pool))?;
    debug!("loaded snapshot with {} members and {} events", members.len(), events.len());

    Ok(Snapshot { members, events })
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        full_name: String,
        email: String,
        major: Option<String>,
        graduation_year: Option<i32>,
        event_name: String,
        event_location: String,
        event_time: DateTime<Utc>,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let member_id = upsert_member(
            pool,
            &row.full_name,
            &row.email,
            row.major.as_deref().filter(|major| !major.trim().is_empty()),
            row.graduation_year.unwrap_or(0),
        )
        .await?;
        let event_id = upsert_event(pool, &row.event_name, &row.event_location, row.event_time).await?;

        if check_in(pool, member_id, event_id).await? {
            inserted += 1;
        }
    }

    Ok(inserted)
}
