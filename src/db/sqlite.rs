use crate::db::models::{
    Appointment, AppointmentDetail, AppointmentStatus, NewAppointment, Service, ServiceWithSubs,
    SubService,
};
use crate::db::schema::{SEED_SERVICES, SEED_SUB_SERVICES, SQLITE_INIT};
use crate::error::LacquerError;
use chrono::{Days, NaiveDate};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

const DETAIL_SELECT: &str = r#"
SELECT a.id, a.client_id, a.service_id, a.sub_service_id,
       a.appointment_date, a.appointment_time, a.status, a.notes,
       c.name AS client_name, c.email AS client_email, c.phone AS client_phone,
       s.name AS service_name, ss.name AS sub_service_name
FROM appointments a
JOIN clients c ON a.client_id = c.id
JOIN services s ON a.service_id = s.id
JOIN sub_services ss ON a.sub_service_id = ss.id
"#;

#[derive(Clone)]
pub struct BookingStorage {
    pool: SqlitePool,
}

impl BookingStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pooled connection, creating the database file when missing.
    pub async fn connect(database_url: &str) -> Result<Self, LacquerError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), LacquerError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert the seed catalog when `services` is empty. Returns whether
    /// anything was inserted.
    pub async fn seed_catalog(&self) -> Result<bool, LacquerError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;
        for &(name, icon) in SEED_SERVICES {
            sqlx::query("INSERT INTO services (name, icon) VALUES (?, ?)")
                .bind(name)
                .bind(icon)
                .execute(&mut *tx)
                .await?;
        }
        for &(service, name, duration_minutes, price) in SEED_SUB_SERVICES {
            sqlx::query(
                r#"INSERT INTO sub_services (service_id, name, duration_minutes, price)
                   SELECT id, ?, ?, ? FROM services WHERE name = ?"#,
            )
            .bind(name)
            .bind(duration_minutes)
            .bind(price)
            .bind(service)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        info!(
            services = SEED_SERVICES.len(),
            sub_services = SEED_SUB_SERVICES.len(),
            "seeded service catalog"
        );
        Ok(true)
    }

    /// All services, each with its sub-services attached.
    pub async fn list_services(&self) -> Result<Vec<ServiceWithSubs>, LacquerError> {
        let services: Vec<Service> =
            sqlx::query_as("SELECT id, name, icon FROM services ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        let subs: Vec<SubService> = sqlx::query_as(
            r#"SELECT id, service_id, name, duration_minutes, price
               FROM sub_services ORDER BY service_id, id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut catalog: Vec<ServiceWithSubs> = services
            .into_iter()
            .map(|s| ServiceWithSubs {
                id: s.id,
                name: s.name,
                icon: s.icon,
                sub_services: Vec::new(),
            })
            .collect();
        for sub in subs {
            if let Some(entry) = catalog.iter_mut().find(|s| s.id == sub.service_id) {
                entry.sub_services.push(sub);
            }
        }
        Ok(catalog)
    }

    /// Whether an appointment already occupies the slot.
    pub async fn slot_taken(&self, date: NaiveDate, time: &str) -> Result<bool, LacquerError> {
        let row = sqlx::query(
            "SELECT id FROM appointments WHERE appointment_date = ? AND appointment_time = ?",
        )
        .bind(date)
        .bind(time)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    /// Book an appointment in one transaction: slot pre-check, client
    /// upsert by email, appointment insert. The UNIQUE(date, time)
    /// constraint remains the source of truth; a lost race against a
    /// concurrent booking surfaces as the same `SlotTaken` error.
    pub async fn book(&self, new: &NewAppointment) -> Result<Appointment, LacquerError> {
        let mut tx = self.pool.begin().await?;

        let occupied = sqlx::query(
            "SELECT id FROM appointments WHERE appointment_date = ? AND appointment_time = ?",
        )
        .bind(new.date)
        .bind(&new.time)
        .fetch_optional(&mut *tx)
        .await?;
        if occupied.is_some() {
            return Err(LacquerError::SlotTaken {
                date: new.date,
                time: new.time.clone(),
            });
        }

        let client_id = match &new.client_email {
            Some(email) => {
                sqlx::query(
                    r#"INSERT INTO clients (name, email, phone) VALUES (?, ?, ?)
                       ON CONFLICT(email) DO UPDATE SET
                           name = excluded.name,
                           phone = COALESCE(excluded.phone, clients.phone)"#,
                )
                .bind(&new.client_name)
                .bind(email)
                .bind(&new.client_phone)
                .execute(&mut *tx)
                .await?;

                let rec: (i64,) = sqlx::query_as("SELECT id FROM clients WHERE email = ?")
                    .bind(email)
                    .fetch_one(&mut *tx)
                    .await?;
                rec.0
            }
            // No email to match on: every such booking gets a fresh client row.
            None => sqlx::query("INSERT INTO clients (name, email, phone) VALUES (?, NULL, ?)")
                .bind(&new.client_name)
                .bind(&new.client_phone)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid(),
        };

        let inserted = sqlx::query(
            r#"INSERT INTO appointments
               (client_id, service_id, sub_service_id, appointment_date, appointment_time, notes)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(client_id)
        .bind(new.service_id)
        .bind(new.sub_service_id)
        .bind(new.date)
        .bind(&new.time)
        .bind(&new.notes)
        .execute(&mut *tx)
        .await;

        let appointment_id = match inserted {
            Ok(res) => res.last_insert_rowid(),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(LacquerError::SlotTaken {
                    date: new.date,
                    time: new.time.clone(),
                });
            }
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                return Err(LacquerError::InvalidReference);
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;

        Ok(Appointment {
            id: appointment_id,
            client_id,
            service_id: new.service_id,
            sub_service_id: new.sub_service_id,
            date: new.date,
            time: new.time.clone(),
            status: AppointmentStatus::Confirmed,
            notes: new.notes.clone(),
        })
    }

    pub async fn appointments_all(&self) -> Result<Vec<AppointmentDetail>, LacquerError> {
        let sql =
            format!("{DETAIL_SELECT} ORDER BY a.appointment_date DESC, a.appointment_time DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_detail).collect()
    }

    pub async fn appointments_for_day(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<AppointmentDetail>, LacquerError> {
        let sql = format!(
            "{DETAIL_SELECT} WHERE a.appointment_date = ? ORDER BY a.appointment_time"
        );
        let rows = sqlx::query(&sql).bind(date).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_detail).collect()
    }

    /// Appointments within [start, start + 6 days].
    pub async fn appointments_for_week(
        &self,
        start: NaiveDate,
    ) -> Result<Vec<AppointmentDetail>, LacquerError> {
        let end = start + Days::new(6);
        let sql = format!(
            "{DETAIL_SELECT} WHERE a.appointment_date BETWEEN ? AND ?
             ORDER BY a.appointment_date, a.appointment_time"
        );
        let rows = sqlx::query(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Self::row_to_detail).collect()
    }

    pub async fn appointment_by_id(&self, id: i64) -> Result<AppointmentDetail, LacquerError> {
        let sql = format!("{DETAIL_SELECT} WHERE a.id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(LacquerError::AppointmentNotFound(id))?;
        Self::row_to_detail(row)
    }

    /// Soft cancel: flips the status, leaves the row (and its slot) in place.
    pub async fn cancel(&self, id: i64) -> Result<AppointmentDetail, LacquerError> {
        let res = sqlx::query("UPDATE appointments SET status = ? WHERE id = ?")
            .bind(AppointmentStatus::Cancelled.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(LacquerError::AppointmentNotFound(id));
        }
        self.appointment_by_id(id).await
    }

    /// Hard delete by primary key; frees the slot.
    pub async fn delete(&self, id: i64) -> Result<(), LacquerError> {
        let res = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(LacquerError::AppointmentNotFound(id));
        }
        Ok(())
    }

    fn row_to_detail(row: SqliteRow) -> Result<AppointmentDetail, LacquerError> {
        let status_text: String = row.try_get("status")?;
        let status = status_text
            .parse::<AppointmentStatus>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(AppointmentDetail {
            id: row.try_get("id")?,
            client_id: row.try_get("client_id")?,
            service_id: row.try_get("service_id")?,
            sub_service_id: row.try_get("sub_service_id")?,
            date: row.try_get("appointment_date")?,
            time: row.try_get("appointment_time")?,
            status,
            notes: row.try_get("notes")?,
            client_name: row.try_get("client_name")?,
            client_email: row.try_get("client_email")?,
            client_phone: row.try_get("client_phone")?,
            service_name: row.try_get("service_name")?,
            sub_service_name: row.try_get("sub_service_name")?,
        })
    }
}
