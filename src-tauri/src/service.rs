//! Fleet service: the fetch/save cycle behind every front-end screen.
//!
//! Owns a [`TripStore`] and runs the trip normalizer and statistics
//! aggregator over whatever the store returns. Nothing here keeps a cached
//! copy of the fleet; each call reads the store again.

use crate::config::AppConfig;
use crate::ids::generate_id;
use crate::models::{
    AddCustomerRequest, AddDriverRequest, AddVehicleRequest, DatabaseStats, FleetSnapshot,
    ImportSummary, SavedTrip,
};
use crate::store::{StoreError, TripStore};
use chrono::NaiveDate;
use navexa_fleet_wasm::{
    aggregate, aggregate_for_vehicle, expense_breakdown, monthly_breakdown, normalize_trip,
    vehicle_compliance, Customer, DashboardStats, Driver, ExpenseSlice, MonthlySummary, Trip,
    TripForm, Vehicle, VehicleCompliance, DEFAULT_COMPLIANCE_WINDOW_DAYS,
};

pub struct FleetService {
    store: Box<dyn TripStore>,
    compliance_window_days: i64,
}

impl FleetService {
    pub fn new(store: Box<dyn TripStore>) -> Self {
        Self {
            store,
            compliance_window_days: DEFAULT_COMPLIANCE_WINDOW_DAYS,
        }
    }

    /// Open the configured backend and apply the rest of the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let store = config.open_store()?;
        log::info!("Fleet service ready on {} backend", store.kind().as_str());
        Ok(Self {
            store,
            compliance_window_days: config.compliance_window_days,
        })
    }

    pub fn store(&self) -> &dyn TripStore {
        self.store.as_ref()
    }

    // ========================================================================
    // Trips
    // ========================================================================

    /// Validate, normalize and persist a submitted trip form.
    ///
    /// A form without an id becomes a new trip with a generated id. A form
    /// with an id replaces that trip and fails if it does not exist.
    pub fn save_trip(&mut self, form: TripForm) -> Result<SavedTrip, StoreError> {
        form.validate()?;
        let is_new = form.is_new();

        let saved = normalize_trip(form.into_trip(generate_id)?);
        for warning in &saved.warnings {
            log::warn!("Trip {}: {}", saved.trip.id, warning.message());
        }

        if is_new {
            self.store.insert_trip(&saved.trip)?;
            log::info!("Added trip {} for vehicle {}", saved.trip.id, saved.trip.vehicle_id);
        } else {
            self.store.replace_trip(&saved.trip)?;
            log::info!("Updated trip {}", saved.trip.id);
        }

        Ok(saved)
    }

    /// Bulk import of trip forms, e.g. from an export file.
    ///
    /// Trips whose id already exists are replaced, everything else is
    /// inserted (keeping its id when it has one). Every form is checked
    /// before anything is written, so an invalid form leaves the store
    /// untouched.
    pub fn import_trips(&mut self, forms: Vec<TripForm>) -> Result<ImportSummary, StoreError> {
        let mut trips = Vec::with_capacity(forms.len());
        let mut warnings = 0;

        for form in forms {
            form.validate()?;
            let saved = normalize_trip(form.into_trip(generate_id)?);
            warnings += saved.warnings.len() as u32;
            trips.push(saved.trip);
        }

        let (inserted, replaced) = self.store.import_trips(&trips)?;
        let summary = ImportSummary {
            inserted,
            replaced,
            warnings,
        };

        log::info!(
            "Imported trips: {} inserted, {} replaced, {} warnings",
            summary.inserted,
            summary.replaced,
            summary.warnings
        );
        Ok(summary)
    }

    pub fn trips(&self) -> Result<Vec<Trip>, StoreError> {
        self.store.fetch_trips()
    }

    pub fn trips_for_vehicle(&self, vehicle_id: &str) -> Result<Vec<Trip>, StoreError> {
        self.store.fetch_trips_for_vehicle(vehicle_id)
    }

    pub fn trip(&self, trip_id: &str) -> Result<Trip, StoreError> {
        self.store
            .fetch_trip(trip_id)?
            .ok_or_else(|| StoreError::NotFound(format!("trip {}", trip_id)))
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Fetch trips and vehicles, then recompute the dashboard
    pub fn refresh(&self) -> Result<FleetSnapshot, StoreError> {
        let trips = self.store.fetch_trips()?;
        let vehicles = self.store.fetch_vehicles()?;
        let stats = aggregate(&trips);
        log::debug!("Refreshed fleet: {} trips, {} vehicles", trips.len(), vehicles.len());
        Ok(FleetSnapshot {
            trips,
            vehicles,
            stats,
        })
    }

    pub fn dashboard(&self) -> Result<DashboardStats, StoreError> {
        Ok(aggregate(&self.store.fetch_trips()?))
    }

    /// Statistics over one vehicle's trips; an unknown vehicle yields zeros
    pub fn vehicle_stats(&self, vehicle_id: &str) -> Result<DashboardStats, StoreError> {
        Ok(aggregate_for_vehicle(vehicle_id, &self.store.fetch_trips()?))
    }

    pub fn monthly_breakdown(&self) -> Result<Vec<MonthlySummary>, StoreError> {
        Ok(monthly_breakdown(&self.store.fetch_trips()?))
    }

    pub fn expense_breakdown(&self) -> Result<Vec<ExpenseSlice>, StoreError> {
        Ok(expense_breakdown(&self.store.fetch_trips()?))
    }

    pub fn compliance_report(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<VehicleCompliance>, StoreError> {
        Ok(self
            .store
            .fetch_vehicles()?
            .iter()
            .map(|v| vehicle_compliance(v, today, self.compliance_window_days))
            .collect())
    }

    pub fn database_stats(&self) -> Result<DatabaseStats, StoreError> {
        self.store.stats()
    }

    // ========================================================================
    // Vehicles, drivers, customers
    // ========================================================================

    pub fn vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
        self.store.fetch_vehicles()
    }

    pub fn add_vehicle(&mut self, request: AddVehicleRequest) -> Result<Vehicle, StoreError> {
        require("registrationNumber", &request.registration_number)?;
        require("model", &request.model)?;

        let vehicle = Vehicle {
            id: generate_id(),
            registration_number: request.registration_number.trim().to_string(),
            model: request.model.trim().to_string(),
            last_service_date: request.last_service_date,
            next_service_due_date: request.next_service_due_date,
            insurance_expiry_date: request.insurance_expiry_date,
            pollution_expiry_date: request.pollution_expiry_date,
        };
        self.store.insert_vehicle(&vehicle)?;
        log::info!("Added vehicle {} ({})", vehicle.id, vehicle.registration_number);
        Ok(vehicle)
    }

    pub fn drivers(&self) -> Result<Vec<Driver>, StoreError> {
        self.store.fetch_drivers()
    }

    pub fn add_driver(&mut self, request: AddDriverRequest) -> Result<Driver, StoreError> {
        require("name", &request.name)?;

        let driver = Driver {
            id: generate_id(),
            name: request.name.trim().to_string(),
            phone: request.phone,
            license_number: request.license_number,
            status: request.status,
            joining_date: request.joining_date,
        };
        self.store.insert_driver(&driver)?;
        log::info!("Added driver {}", driver.id);
        Ok(driver)
    }

    pub fn customers(&self) -> Result<Vec<Customer>, StoreError> {
        self.store.fetch_customers()
    }

    pub fn add_customer(&mut self, request: AddCustomerRequest) -> Result<Customer, StoreError> {
        require("name", &request.name)?;

        let customer = Customer {
            id: generate_id(),
            name: request.name.trim().to_string(),
            phone: request.phone,
            email: request.email,
            address: request.address,
        };
        self.store.insert_customer(&customer)?;
        log::info!("Added customer {}", customer.id);
        Ok(customer)
    }
}

fn require(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidData(format!("{} is required", field)));
    }
    Ok(())
}
