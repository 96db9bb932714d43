//! SQL DDL and seed data for the booking database.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema:
/// - `services` / `sub_services`: the bookable catalog, seeded once
/// - `clients`: `email` UNIQUE but nullable; NULL emails never collide
/// - `appointments`: UNIQUE(appointment_date, appointment_time) is the
///   authoritative double-booking guard
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS services (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    icon TEXT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS sub_services (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    service_id INTEGER NOT NULL REFERENCES services(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    duration_minutes INTEGER NOT NULL DEFAULT 60,
    price REAL NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NULL UNIQUE,
    phone TEXT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
    service_id INTEGER NOT NULL REFERENCES services(id),
    sub_service_id INTEGER NOT NULL REFERENCES sub_services(id),
    appointment_date TEXT NOT NULL,
    appointment_time TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'confirmed',
    notes TEXT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(appointment_date, appointment_time)
);

CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(appointment_date);
"#;

/// Seed catalog, inserted only when `services` is empty.
pub const SEED_SERVICES: &[(&str, &str)] = &[("Makeup", "💄"), ("BeautyLash", "👁️")];

/// (service name, sub-service name, duration minutes, price)
pub const SEED_SUB_SERVICES: &[(&str, &str, i64, f64)] = &[
    ("Makeup", "Social Makeup", 60, 35.00),
    ("Makeup", "Bridal Makeup", 90, 80.00),
    ("Makeup", "Photo Shoot Makeup", 75, 50.00),
    ("BeautyLash", "Lash Extensions", 120, 45.00),
    ("BeautyLash", "Brow Lift", 60, 30.00),
    ("BeautyLash", "Lash Lift", 90, 40.00),
    ("BeautyLash", "Volume Lashes", 150, 70.00),
];
