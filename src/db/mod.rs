mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::*;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "planner")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("planner.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Trip operations
    // ============================================================

    /// Insert a trip together with its owner participant (confirmed) and one
    /// invited participant per address, in a single transaction.
    pub fn create_trip(&self, input: &CreateTripInput) -> Result<Trip> {
        let mut conn = self.conn.lock().expect("database lock poisoned");
        let tx = conn.transaction()?;

        let trip_id = Uuid::new_v4();
        let now = Utc::now();

        tx.execute(
            "INSERT INTO trips (id, destination, starts_at, ends_at, is_confirmed, created_at)
             VALUES (?, ?, ?, ?, 0, ?)",
            (
                trip_id.to_string(),
                &input.destination,
                input.starts_at.to_rfc3339(),
                input.ends_at.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        tx.execute(
            "INSERT INTO participants (id, trip_id, name, email, state, is_owner, created_at)
             VALUES (?, ?, ?, ?, 'confirmed', 1, ?)",
            (
                Uuid::new_v4().to_string(),
                trip_id.to_string(),
                &input.owner_name,
                &input.owner_email,
                now.to_rfc3339(),
            ),
        )?;

        for email in &input.emails_to_invite {
            tx.execute(
                "INSERT INTO participants (id, trip_id, email, state, is_owner, created_at)
                 VALUES (?, ?, ?, 'invited', 0, ?)",
                (
                    Uuid::new_v4().to_string(),
                    trip_id.to_string(),
                    email,
                    now.to_rfc3339(),
                ),
            )?;
        }

        tx.commit()?;

        Ok(Trip {
            id: trip_id,
            destination: input.destination.clone(),
            starts_at: input.starts_at,
            ends_at: input.ends_at,
            is_confirmed: false,
            created_at: now,
        })
    }

    pub fn get_trip(&self, id: Uuid) -> Result<Option<Trip>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, destination, starts_at, ends_at, is_confirmed, created_at
             FROM trips WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Trip {
                id: parse_uuid(row.get::<_, String>(0)?),
                destination: row.get(1)?,
                starts_at: parse_datetime(row.get::<_, String>(2)?),
                ends_at: parse_datetime(row.get::<_, String>(3)?),
                is_confirmed: row.get::<_, i32>(4)? != 0,
                created_at: parse_datetime(row.get::<_, String>(5)?),
            }))
        } else {
            Ok(None)
        }
    }

    /// Fetch a trip with its activities, ordered ascending by occurrence.
    pub fn get_trip_with_activities(&self, id: Uuid) -> Result<Option<TripWithActivities>> {
        let trip = match self.get_trip(id)? {
            Some(t) => t,
            None => return Ok(None),
        };

        let activities = self.get_activities_by_trip(id)?;

        Ok(Some(TripWithActivities { trip, activities }))
    }

    pub fn update_trip(&self, id: Uuid, input: UpdateTripInput) -> Result<Option<Trip>> {
        let Some(existing) = self.get_trip(id)? else {
            return Ok(None);
        };

        let conn = self.conn.lock().expect("database lock poisoned");
        let destination = input.destination.unwrap_or(existing.destination);
        let starts_at = input.starts_at.unwrap_or(existing.starts_at);
        let ends_at = input.ends_at.unwrap_or(existing.ends_at);

        conn.execute(
            "UPDATE trips SET destination = ?, starts_at = ?, ends_at = ? WHERE id = ?",
            (
                &destination,
                starts_at.to_rfc3339(),
                ends_at.to_rfc3339(),
                id.to_string(),
            ),
        )?;

        Ok(Some(Trip {
            id,
            destination,
            starts_at,
            ends_at,
            is_confirmed: existing.is_confirmed,
            created_at: existing.created_at,
        }))
    }

    pub fn confirm_trip(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute(
            "UPDATE trips SET is_confirmed = 1 WHERE id = ?",
            [id.to_string()],
        )?;
        Ok(rows > 0)
    }

    // ============================================================
    // Participant operations
    // ============================================================

    pub fn create_participant(&self, trip_id: Uuid, input: NewParticipant) -> Result<Participant> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO participants (id, trip_id, name, email, state, is_owner, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                trip_id.to_string(),
                &input.name,
                &input.email,
                input.state.as_str(),
                if input.is_owner { 1 } else { 0 },
                now.to_rfc3339(),
            ),
        )?;

        Ok(Participant {
            id,
            trip_id,
            name: input.name,
            email: input.email,
            state: input.state,
            is_owner: input.is_owner,
            created_at: now,
        })
    }

    pub fn get_participant(&self, id: Uuid) -> Result<Option<Participant>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, trip_id, name, email, state, is_owner, created_at
             FROM participants WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Participant {
                id: parse_uuid(row.get::<_, String>(0)?),
                trip_id: parse_uuid(row.get::<_, String>(1)?),
                name: row.get(2)?,
                email: row.get(3)?,
                state: ParticipantState::from_str(&row.get::<_, String>(4)?)
                    .unwrap_or(ParticipantState::Invited),
                is_owner: row.get::<_, i32>(5)? != 0,
                created_at: parse_datetime(row.get::<_, String>(6)?),
            }))
        } else {
            Ok(None)
        }
    }

    pub fn get_participants_by_trip(&self, trip_id: Uuid) -> Result<Vec<Participant>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, trip_id, name, email, state, is_owner, created_at
             FROM participants WHERE trip_id = ? ORDER BY created_at, rowid",
        )?;

        let participants = stmt
            .query_map([trip_id.to_string()], |row| {
                Ok(Participant {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    trip_id: parse_uuid(row.get::<_, String>(1)?),
                    name: row.get(2)?,
                    email: row.get(3)?,
                    state: ParticipantState::from_str(&row.get::<_, String>(4)?)
                        .unwrap_or(ParticipantState::Invited),
                    is_owner: row.get::<_, i32>(5)? != 0,
                    created_at: parse_datetime(row.get::<_, String>(6)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(participants)
    }

    /// Non-owner participants still waiting on their confirmation link.
    pub fn get_pending_participants(&self, trip_id: Uuid) -> Result<Vec<Participant>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, trip_id, name, email, state, is_owner, created_at
             FROM participants
             WHERE trip_id = ? AND state = 'invited' AND is_owner = 0
             ORDER BY created_at, rowid",
        )?;

        let participants = stmt
            .query_map([trip_id.to_string()], |row| {
                Ok(Participant {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    trip_id: parse_uuid(row.get::<_, String>(1)?),
                    name: row.get(2)?,
                    email: row.get(3)?,
                    state: ParticipantState::from_str(&row.get::<_, String>(4)?)
                        .unwrap_or(ParticipantState::Invited),
                    is_owner: row.get::<_, i32>(5)? != 0,
                    created_at: parse_datetime(row.get::<_, String>(6)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(participants)
    }

    pub fn confirm_participant(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute(
            "UPDATE participants SET state = 'confirmed' WHERE id = ?",
            [id.to_string()],
        )?;
        Ok(rows > 0)
    }

    // ============================================================
    // Activity operations
    // ============================================================

    pub fn create_activity(&self, trip_id: Uuid, input: CreateActivityInput) -> Result<Activity> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO activities (id, trip_id, title, occurs_at, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                id.to_string(),
                trip_id.to_string(),
                &input.title,
                input.occurs_at.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Activity {
            id,
            trip_id,
            title: input.title,
            occurs_at: input.occurs_at,
            created_at: now,
        })
    }

    pub fn get_activities_by_trip(&self, trip_id: Uuid) -> Result<Vec<Activity>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, trip_id, title, occurs_at, created_at
             FROM activities WHERE trip_id = ? ORDER BY occurs_at",
        )?;

        let activities = stmt
            .query_map([trip_id.to_string()], |row| {
                Ok(Activity {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    trip_id: parse_uuid(row.get::<_, String>(1)?),
                    title: row.get(2)?,
                    occurs_at: parse_datetime(row.get::<_, String>(3)?),
                    created_at: parse_datetime(row.get::<_, String>(4)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(activities)
    }

    /// Activities bucketed per trip day (inclusive range), ascending within
    /// each day. Days without activities get an empty bucket.
    pub fn get_trip_day_activities(&self, trip_id: Uuid) -> Result<Option<Vec<DayActivities>>> {
        let trip = match self.get_trip(trip_id)? {
            Some(t) => t,
            None => return Ok(None),
        };

        let activities = self.get_activities_by_trip(trip_id)?;

        let mut buckets = Vec::new();
        let mut day = trip.starts_at.date_naive();
        let last = trip.ends_at.date_naive();
        while day <= last {
            let on_day = activities
                .iter()
                .filter(|a| a.occurs_at.date_naive() == day)
                .cloned()
                .collect();
            buckets.push(DayActivities {
                date: day,
                activities: on_day,
            });
            day = day
                .succ_opt()
                .ok_or_else(|| anyhow::anyhow!("Trip end date out of range"))?;
        }

        Ok(Some(buckets))
    }

    // ============================================================
    // Link operations
    // ============================================================

    pub fn create_link(&self, trip_id: Uuid, input: CreateLinkInput) -> Result<Link> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO links (id, trip_id, title, url, created_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                id.to_string(),
                trip_id.to_string(),
                &input.title,
                &input.url,
                now.to_rfc3339(),
            ),
        )?;

        Ok(Link {
            id,
            trip_id,
            title: input.title,
            url: input.url,
            created_at: now,
        })
    }

    pub fn get_links_by_trip(&self, trip_id: Uuid) -> Result<Vec<Link>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, trip_id, title, url, created_at
             FROM links WHERE trip_id = ? ORDER BY created_at, rowid",
        )?;

        let links = stmt
            .query_map([trip_id.to_string()], |row| {
                Ok(Link {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    trip_id: parse_uuid(row.get::<_, String>(1)?),
                    title: row.get(2)?,
                    url: row.get(3)?,
                    created_at: parse_datetime(row.get::<_, String>(4)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(links)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
