//! Demo fleet used by the mock store and to seed an empty SQLite database

use chrono::NaiveDate;
use navexa_fleet_wasm::{
    Expenses, OdometerReading, PaymentDetails, PaymentMethod, PaymentStatus, Trip, TripStatus,
    Vehicle,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn demo_vehicles() -> Vec<Vehicle> {
    let vehicles = [
        (
            "v1",
            "KA-01-AB-1234",
            "Toyota Innova Crysta",
            (2023, 10, 15),
            (2024, 1, 15),
            (2024, 5, 20),
            (2024, 3, 10),
        ),
        (
            "v2",
            "KA-05-XY-9876",
            "Suzuki Ertiga",
            (2023, 11, 1),
            (2024, 2, 1),
            (2024, 8, 15),
            (2024, 2, 28),
        ),
        (
            "v3",
            "TN-09-ZZ-5555",
            "Force Traveler",
            (2023, 9, 20),
            (2023, 12, 20),
            (2024, 1, 10),
            (2024, 1, 15),
        ),
    ];

    vehicles
        .iter()
        .map(|(id, registration, model, last, next, insurance, pollution)| Vehicle {
            id: id.to_string(),
            registration_number: registration.to_string(),
            model: model.to_string(),
            last_service_date: date(last.0, last.1, last.2),
            next_service_due_date: date(next.0, next.1, next.2),
            insurance_expiry_date: date(insurance.0, insurance.1, insurance.2),
            pollution_expiry_date: date(pollution.0, pollution.1, pollution.2),
        })
        .collect()
}

pub fn demo_trips() -> Vec<Trip> {
    vec![
        Trip {
            id: "t1".to_string(),
            date: date(2023, 11, 20),
            vehicle_id: "v1".to_string(),
            driver_id: None,
            driver_name: "Ramesh Kumar".to_string(),
            customer_id: None,
            customer_name: "Tech Corp".to_string(),
            pickup_location: "Airport".to_string(),
            drop_location: "Electronic City".to_string(),
            trip_amount: 4500.0,
            expenses: Expenses {
                fuel_cost: 1200.0,
                toll_charges: 150.0,
                parking_charges: 100.0,
                driver_payment: 500.0,
                other_expenses: 0.0,
            },
            payment_details: PaymentDetails {
                total_amount: 500.0,
                advance_paid: 500.0,
                balance: 0.0,
                status: PaymentStatus::Paid,
                method: PaymentMethod::Upi,
            },
            odometer: OdometerReading {
                start: 10500.0,
                end: 10580.0,
                total_distance: 80.0,
            },
            notes: "Client requested waiting for 1 hour.".to_string(),
            status: TripStatus::Completed,
        },
        Trip {
            id: "t2".to_string(),
            date: date(2023, 11, 21),
            vehicle_id: "v2".to_string(),
            driver_id: None,
            driver_name: "Suresh Singh".to_string(),
            customer_id: None,
            customer_name: "Family Tour".to_string(),
            pickup_location: "Indiranagar".to_string(),
            drop_location: "Mysore".to_string(),
            trip_amount: 8000.0,
            expenses: Expenses {
                fuel_cost: 2500.0,
                toll_charges: 300.0,
                parking_charges: 0.0,
                driver_payment: 1000.0,
                other_expenses: 200.0,
            },
            payment_details: PaymentDetails {
                total_amount: 1000.0,
                advance_paid: 500.0,
                balance: 500.0,
                status: PaymentStatus::Pending,
                method: PaymentMethod::Cash,
            },
            odometer: OdometerReading {
                start: 45000.0,
                end: 45300.0,
                total_distance: 300.0,
            },
            notes: String::new(),
            status: TripStatus::Completed,
        },
        Trip {
            id: "t3".to_string(),
            date: date(2023, 11, 22),
            vehicle_id: "v1".to_string(),
            driver_id: None,
            driver_name: "Ramesh Kumar".to_string(),
            customer_id: None,
            customer_name: "Hotel Royal".to_string(),
            pickup_location: "City Center".to_string(),
            drop_location: "Airport".to_string(),
            trip_amount: 3500.0,
            expenses: Expenses {
                fuel_cost: 800.0,
                toll_charges: 100.0,
                parking_charges: 50.0,
                driver_payment: 400.0,
                other_expenses: 0.0,
            },
            payment_details: PaymentDetails {
                total_amount: 400.0,
                advance_paid: 0.0,
                balance: 400.0,
                status: PaymentStatus::Pending,
                method: PaymentMethod::BankTransfer,
            },
            odometer: OdometerReading {
                start: 10580.0,
                end: 10620.0,
                total_distance: 40.0,
            },
            notes: "Night pickup".to_string(),
            status: TripStatus::Completed,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use navexa_fleet_wasm::derive_on_save;

    #[test]
    fn test_demo_trips_are_normalized() {
        for trip in demo_trips() {
            assert_eq!(derive_on_save(trip.clone()), trip);
        }
    }

    #[test]
    fn test_demo_trips_reference_demo_vehicles() {
        let vehicles = demo_vehicles();
        for trip in demo_trips() {
            assert!(vehicles.iter().any(|v| v.id == trip.vehicle_id));
        }
    }
}
