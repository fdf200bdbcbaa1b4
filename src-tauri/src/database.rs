use crate::models::DatabaseStats;
use crate::seed::{demo_trips, demo_vehicles};
use crate::store::{StoreError, StoreKind, TripStore};
use chrono::Utc;
use navexa_fleet_wasm::{
    Customer, Driver, DriverStatus, Expenses, OdometerReading, PaymentDetails, PaymentMethod,
    PaymentStatus, Trip, TripStatus, Vehicle,
};
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult, Row};
use std::path::Path;

const TRIP_COLUMNS: &str = r#"id, date, vehicle_id, driver_id, driver_name,
    customer_id, customer_name,
    pickup_location, drop_location, trip_amount,
    fuel_cost, toll_charges, parking_charges, driver_payment, other_expenses,
    payment_total, advance_paid, balance, payment_status, payment_method,
    odometer_start, odometer_end, total_distance, notes, status"#;

/// Database wrapper for SQLite operations
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file, then create the schema and seed
    /// the demo fleet if it is empty
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        log::info!("Opened SQLite database at {}", path.as_ref().display());
        Self::with_connection(conn, true)
    }

    /// Private in-memory database, without demo data
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, false)
    }

    fn with_connection(conn: Connection, seed: bool) -> Result<Self, StoreError> {
        let mut db = Database { conn };
        db.initialize_schema()?;
        if seed {
            db.seed_mock_data()?;
        }
        Ok(db)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS vehicles (
                id TEXT PRIMARY KEY,
                registration_number TEXT NOT NULL,
                model TEXT NOT NULL,
                last_service_date TEXT NOT NULL,
                next_service_due_date TEXT NOT NULL,
                insurance_expiry_date TEXT NOT NULL,
                pollution_expiry_date TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS drivers (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                phone TEXT NOT NULL DEFAULT '',
                license_number TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'Active',
                joining_date TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS customers (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                phone TEXT NOT NULL DEFAULT '',
                email TEXT NOT NULL DEFAULT '',
                address TEXT NOT NULL DEFAULT ''
            );

            -- vehicle_id may point at a vehicle that is not stored
            CREATE TABLE IF NOT EXISTS trips (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                vehicle_id TEXT NOT NULL,
                driver_id TEXT,
                driver_name TEXT NOT NULL,
                customer_id TEXT,
                customer_name TEXT NOT NULL,
                pickup_location TEXT NOT NULL DEFAULT '',
                drop_location TEXT NOT NULL DEFAULT '',
                trip_amount REAL NOT NULL DEFAULT 0.0,
                fuel_cost REAL NOT NULL DEFAULT 0.0,
                toll_charges REAL NOT NULL DEFAULT 0.0,
                parking_charges REAL NOT NULL DEFAULT 0.0,
                driver_payment REAL NOT NULL DEFAULT 0.0,
                other_expenses REAL NOT NULL DEFAULT 0.0,
                payment_total REAL NOT NULL DEFAULT 0.0,
                advance_paid REAL NOT NULL DEFAULT 0.0,
                balance REAL NOT NULL DEFAULT 0.0,
                payment_status TEXT NOT NULL DEFAULT 'Pending',
                payment_method TEXT NOT NULL DEFAULT 'Cash',
                odometer_start REAL NOT NULL DEFAULT 0.0,
                odometer_end REAL NOT NULL DEFAULT 0.0,
                total_distance REAL NOT NULL DEFAULT 0.0,
                notes TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'Scheduled'
            );

            CREATE INDEX IF NOT EXISTS idx_trips_vehicle_id ON trips(vehicle_id);
            CREATE INDEX IF NOT EXISTS idx_trips_date ON trips(date);
            "#,
        )?;
        Ok(())
    }

    /// Seed the database with the demo fleet
    ///
    /// Runs in one transaction, so a fresh database ends up either fully
    /// seeded or empty.
    fn seed_mock_data(&mut self) -> Result<(), StoreError> {
        // Check if we already have data
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM vehicles", [], |row| row.get(0))?;

        if count > 0 {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        for vehicle in demo_vehicles() {
            Self::write_vehicle(&tx, &vehicle)?;
        }
        for trip in demo_trips() {
            Self::write_trip(&tx, &trip)?;
        }
        tx.commit()?;

        log::debug!("Seeded SQLite database with demo fleet");
        Ok(())
    }

    fn write_vehicle(conn: &Connection, vehicle: &Vehicle) -> Result<(), StoreError> {
        conn.execute(
            r#"INSERT INTO vehicles (id, registration_number, model, last_service_date,
               next_service_due_date, insurance_expiry_date, pollution_expiry_date)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
            rusqlite::params![
                vehicle.id,
                vehicle.registration_number,
                vehicle.model,
                vehicle.last_service_date,
                vehicle.next_service_due_date,
                vehicle.insurance_expiry_date,
                vehicle.pollution_expiry_date,
            ],
        )?;
        Ok(())
    }

    fn write_trip(conn: &Connection, trip: &Trip) -> Result<(), StoreError> {
        conn.execute(
            &format!(
                "INSERT INTO trips ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, \
                 ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)",
                TRIP_COLUMNS
            ),
            rusqlite::params![
                trip.id,
                trip.date,
                trip.vehicle_id,
                trip.driver_id,
                trip.driver_name,
                trip.customer_id,
                trip.customer_name,
                trip.pickup_location,
                trip.drop_location,
                trip.trip_amount,
                trip.expenses.fuel_cost,
                trip.expenses.toll_charges,
                trip.expenses.parking_charges,
                trip.expenses.driver_payment,
                trip.expenses.other_expenses,
                trip.payment_details.total_amount,
                trip.payment_details.advance_paid,
                trip.payment_details.balance,
                trip.payment_details.status.as_str(),
                trip.payment_details.method.as_str(),
                trip.odometer.start,
                trip.odometer.end,
                trip.odometer.total_distance,
                trip.notes,
                trip.status.as_str(),
            ],
        )?;
        Ok(())
    }

    /// Rewrite every column of an existing trip; returns the number of rows changed
    fn update_trip(conn: &Connection, trip: &Trip) -> Result<usize, StoreError> {
        let changed = conn.execute(
            r#"UPDATE trips SET date = ?2, vehicle_id = ?3, driver_id = ?4, driver_name = ?5,
               customer_id = ?6, customer_name = ?7, pickup_location = ?8, drop_location = ?9,
               trip_amount = ?10, fuel_cost = ?11, toll_charges = ?12, parking_charges = ?13,
               driver_payment = ?14, other_expenses = ?15, payment_total = ?16,
               advance_paid = ?17, balance = ?18, payment_status = ?19, payment_method = ?20,
               odometer_start = ?21, odometer_end = ?22, total_distance = ?23, notes = ?24,
               status = ?25
               WHERE id = ?1"#,
            rusqlite::params![
                trip.id,
                trip.date,
                trip.vehicle_id,
                trip.driver_id,
                trip.driver_name,
                trip.customer_id,
                trip.customer_name,
                trip.pickup_location,
                trip.drop_location,
                trip.trip_amount,
                trip.expenses.fuel_cost,
                trip.expenses.toll_charges,
                trip.expenses.parking_charges,
                trip.expenses.driver_payment,
                trip.expenses.other_expenses,
                trip.payment_details.total_amount,
                trip.payment_details.advance_paid,
                trip.payment_details.balance,
                trip.payment_details.status.as_str(),
                trip.payment_details.method.as_str(),
                trip.odometer.start,
                trip.odometer.end,
                trip.odometer.total_distance,
                trip.notes,
                trip.status.as_str(),
            ],
        )?;
        Ok(changed)
    }

    fn row_to_trip(row: &Row<'_>) -> SqliteResult<Trip> {
        let payment_status: String = row.get(18)?;
        let payment_method: String = row.get(19)?;
        let status: String = row.get(24)?;

        Ok(Trip {
            id: row.get(0)?,
            date: row.get(1)?,
            vehicle_id: row.get(2)?,
            driver_id: row.get(3)?,
            driver_name: row.get(4)?,
            customer_id: row.get(5)?,
            customer_name: row.get(6)?,
            pickup_location: row.get(7)?,
            drop_location: row.get(8)?,
            trip_amount: row.get(9)?,
            expenses: Expenses {
                fuel_cost: row.get(10)?,
                toll_charges: row.get(11)?,
                parking_charges: row.get(12)?,
                driver_payment: row.get(13)?,
                other_expenses: row.get(14)?,
            },
            payment_details: PaymentDetails {
                total_amount: row.get(15)?,
                advance_paid: row.get(16)?,
                balance: row.get(17)?,
                status: PaymentStatus::from_str(&payment_status).unwrap_or_default(),
                method: PaymentMethod::from_str(&payment_method).unwrap_or_default(),
            },
            odometer: OdometerReading {
                start: row.get(20)?,
                end: row.get(21)?,
                total_distance: row.get(22)?,
            },
            notes: row.get(23)?,
            status: TripStatus::from_str(&status).unwrap_or_default(),
        })
    }

    fn row_to_vehicle(row: &Row<'_>) -> SqliteResult<Vehicle> {
        Ok(Vehicle {
            id: row.get(0)?,
            registration_number: row.get(1)?,
            model: row.get(2)?,
            last_service_date: row.get(3)?,
            next_service_due_date: row.get(4)?,
            insurance_expiry_date: row.get(5)?,
            pollution_expiry_date: row.get(6)?,
        })
    }

    fn count(&self, table: &str) -> Result<u32, StoreError> {
        let count: u32 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }

    fn exists(conn: &Connection, table: &str, id: &str) -> Result<bool, StoreError> {
        let found = conn
            .query_row(
                &format!("SELECT 1 FROM {} WHERE id = ?1", table),
                [id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl TripStore for Database {
    fn kind(&self) -> StoreKind {
        StoreKind::Local
    }

    fn fetch_trips(&self) -> Result<Vec<Trip>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM trips ORDER BY date DESC, rowid DESC",
            TRIP_COLUMNS
        ))?;

        let trips = stmt
            .query_map([], Self::row_to_trip)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(trips)
    }

    fn fetch_trips_for_vehicle(&self, vehicle_id: &str) -> Result<Vec<Trip>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM trips WHERE vehicle_id = ?1 ORDER BY date DESC, rowid DESC",
            TRIP_COLUMNS
        ))?;

        let trips = stmt
            .query_map([vehicle_id], Self::row_to_trip)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(trips)
    }

    fn fetch_trip(&self, trip_id: &str) -> Result<Option<Trip>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM trips WHERE id = ?1", TRIP_COLUMNS))?;

        let trip = stmt.query_row([trip_id], Self::row_to_trip).optional()?;

        Ok(trip)
    }

    fn insert_trip(&mut self, trip: &Trip) -> Result<(), StoreError> {
        if Self::exists(&self.conn, "trips", &trip.id)? {
            return Err(StoreError::Duplicate(trip.id.clone()));
        }
        Self::write_trip(&self.conn, trip)
    }

    fn replace_trip(&mut self, trip: &Trip) -> Result<(), StoreError> {
        if Self::update_trip(&self.conn, trip)? == 0 {
            return Err(StoreError::NotFound(format!("trip {}", trip.id)));
        }
        Ok(())
    }

    /// All-or-nothing: the batch is written in a single transaction
    fn import_trips(&mut self, trips: &[Trip]) -> Result<(u32, u32), StoreError> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        let mut replaced = 0;

        for trip in trips {
            if Self::update_trip(&tx, trip)? > 0 {
                replaced += 1;
            } else {
                Self::write_trip(&tx, trip)?;
                inserted += 1;
            }
        }

        tx.commit()?;
        Ok((inserted, replaced))
    }

    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"SELECT id, registration_number, model, last_service_date, next_service_due_date,
                      insurance_expiry_date, pollution_expiry_date
               FROM vehicles ORDER BY rowid"#,
        )?;

        let vehicles = stmt
            .query_map([], Self::row_to_vehicle)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(vehicles)
    }

    fn insert_vehicle(&mut self, vehicle: &Vehicle) -> Result<(), StoreError> {
        if Self::exists(&self.conn, "vehicles", &vehicle.id)? {
            return Err(StoreError::Duplicate(vehicle.id.clone()));
        }
        Self::write_vehicle(&self.conn, vehicle)
    }

    fn fetch_drivers(&self) -> Result<Vec<Driver>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"SELECT id, name, phone, license_number, status, joining_date
               FROM drivers ORDER BY rowid"#,
        )?;

        let drivers = stmt
            .query_map([], |row| {
                let status: String = row.get(4)?;
                Ok(Driver {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    phone: row.get(2)?,
                    license_number: row.get(3)?,
                    status: DriverStatus::from_str(&status).unwrap_or_default(),
                    joining_date: row.get(5)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(drivers)
    }

    fn insert_driver(&mut self, driver: &Driver) -> Result<(), StoreError> {
        if Self::exists(&self.conn, "drivers", &driver.id)? {
            return Err(StoreError::Duplicate(driver.id.clone()));
        }
        self.conn.execute(
            r#"INSERT INTO drivers (id, name, phone, license_number, status, joining_date)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            rusqlite::params![
                driver.id,
                driver.name,
                driver.phone,
                driver.license_number,
                driver.status.as_str(),
                driver.joining_date,
            ],
        )?;
        Ok(())
    }

    fn fetch_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, phone, email, address FROM customers ORDER BY rowid")?;

        let customers = stmt
            .query_map([], |row| {
                Ok(Customer {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    phone: row.get(2)?,
                    email: row.get(3)?,
                    address: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(customers)
    }

    fn insert_customer(&mut self, customer: &Customer) -> Result<(), StoreError> {
        if Self::exists(&self.conn, "customers", &customer.id)? {
            return Err(StoreError::Duplicate(customer.id.clone()));
        }
        self.conn.execute(
            "INSERT INTO customers (id, name, phone, email, address) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                customer.id,
                customer.name,
                customer.phone,
                customer.email,
                customer.address,
            ],
        )?;
        Ok(())
    }

    /// Record counts plus the on-disk size reported by SQLite
    fn stats(&self) -> Result<DatabaseStats, StoreError> {
        let page_count: i64 = self
            .conn
            .query_row("PRAGMA page_count", [], |row| row.get(0))?;
        let page_size: i64 = self
            .conn
            .query_row("PRAGMA page_size", [], |row| row.get(0))?;

        Ok(DatabaseStats {
            backend: StoreKind::Local,
            total_trips: self.count("trips")?,
            total_vehicles: self.count("vehicles")?,
            total_drivers: self.count("drivers")?,
            total_customers: self.count("customers")?,
            database_size_bytes: (page_count * page_size).max(0) as u64,
            last_sync: Some(Utc::now()),
        })
    }
}
