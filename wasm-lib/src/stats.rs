//! Fleet Statistics Aggregator
//!
//! Single-pass reductions over a trip collection for the dashboard cards,
//! the monthly bar chart and the expense pie chart. Inputs are borrowed and
//! never mutated.

use crate::models::{DashboardStats, Trip};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Income, expense and profit for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Chart label, e.g. "Nov 2023"
    pub name: String,
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub profit: f64,
}

/// One slice of the expense breakdown chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSlice {
    pub name: String,
    pub value: f64,
}

/// Reduce trips into dashboard totals.
///
/// `net_profit` is computed from the summed totals, and pending payments are
/// the plain sum of balances: over-paid trips reduce it.
pub fn aggregate(trips: &[Trip]) -> DashboardStats {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut pending_payments = 0.0;

    for trip in trips {
        total_income += trip.trip_amount;
        total_expenses += trip.total_expenses();
        pending_payments += trip.payment_details.balance;
    }

    DashboardStats {
        total_income,
        total_expenses,
        net_profit: total_income - total_expenses,
        pending_payments,
        total_trips: trips.len() as u32,
    }
}

/// [`aggregate`] restricted to one vehicle.
///
/// A vehicle without trips (or an unknown id) yields all-zero stats.
pub fn aggregate_for_vehicle(vehicle_id: &str, trips: &[Trip]) -> DashboardStats {
    let vehicle_trips: Vec<Trip> = trips
        .iter()
        .filter(|t| t.vehicle_id == vehicle_id)
        .cloned()
        .collect();

    aggregate(&vehicle_trips)
}

/// Per-month totals, oldest month first
pub fn monthly_breakdown(trips: &[Trip]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u32), MonthlySummary> = BTreeMap::new();

    for trip in trips {
        let key = (trip.date.year(), trip.date.month());
        let entry = months.entry(key).or_insert_with(|| MonthlySummary {
            name: trip.date.format("%b %Y").to_string(),
            year: key.0,
            month: key.1,
            income: 0.0,
            expense: 0.0,
            profit: 0.0,
        });

        let expense = trip.total_expenses();
        entry.income += trip.trip_amount;
        entry.expense += expense;
        entry.profit += trip.trip_amount - expense;
    }

    months.into_values().collect()
}

/// Expense totals grouped the way the dashboard pie chart shows them.
///
/// Toll and parking share one slice.
pub fn expense_breakdown(trips: &[Trip]) -> Vec<ExpenseSlice> {
    let mut fuel = 0.0;
    let mut driver = 0.0;
    let mut toll = 0.0;
    let mut other = 0.0;

    for trip in trips {
        fuel += trip.expenses.fuel_cost;
        driver += trip.expenses.driver_payment;
        toll += trip.expenses.toll_charges + trip.expenses.parking_charges;
        other += trip.expenses.other_expenses;
    }

    [
        ("Fuel", fuel),
        ("Driver", driver),
        ("Toll/Parking", toll),
        ("Other", other),
    ]
    .into_iter()
    .map(|(name, value)| ExpenseSlice {
        name: name.to_string(),
        value,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Expenses, OdometerReading, PaymentDetails, PaymentMethod, PaymentStatus, TripStatus,
    };
    use crate::normalize::derive_on_save;
    use chrono::NaiveDate;

    fn trip(
        id: &str,
        vehicle_id: &str,
        date: (i32, u32, u32),
        amount: f64,
        expenses: [f64; 5],
        payout: (f64, f64),
    ) -> Trip {
        derive_on_save(Trip {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            vehicle_id: vehicle_id.to_string(),
            driver_id: None,
            driver_name: "Driver".to_string(),
            customer_id: None,
            customer_name: "Customer".to_string(),
            pickup_location: String::new(),
            drop_location: String::new(),
            trip_amount: amount,
            expenses: Expenses {
                fuel_cost: expenses[0],
                toll_charges: expenses[1],
                parking_charges: expenses[2],
                driver_payment: expenses[3],
                other_expenses: expenses[4],
            },
            payment_details: PaymentDetails {
                total_amount: payout.0,
                advance_paid: payout.1,
                balance: 0.0,
                status: PaymentStatus::Pending,
                method: PaymentMethod::Cash,
            },
            odometer: OdometerReading::default(),
            notes: String::new(),
            status: TripStatus::Completed,
        })
    }

    fn demo_trips() -> Vec<Trip> {
        vec![
            trip(
                "t1",
                "v1",
                (2023, 11, 20),
                4500.0,
                [1200.0, 150.0, 100.0, 500.0, 0.0],
                (500.0, 500.0),
            ),
            trip(
                "t2",
                "v2",
                (2023, 11, 21),
                8000.0,
                [2500.0, 300.0, 0.0, 1000.0, 200.0],
                (1000.0, 500.0),
            ),
            trip(
                "t3",
                "v1",
                (2023, 12, 2),
                3500.0,
                [800.0, 100.0, 50.0, 400.0, 0.0],
                (400.0, 0.0),
            ),
        ]
    }

    #[test]
    fn test_single_trip_scenario() {
        let stats = aggregate(&demo_trips()[..1]);
        assert_eq!(
            stats,
            DashboardStats {
                total_income: 4500.0,
                total_expenses: 1950.0,
                net_profit: 2550.0,
                pending_payments: 0.0,
                total_trips: 1,
            }
        );
    }

    #[test]
    fn test_two_trip_scenario() {
        let trips = demo_trips();
        let stats = aggregate(&trips[..2]);
        assert_eq!(stats.total_income, 12500.0);
        assert_eq!(stats.total_expenses, 5950.0);
        assert_eq!(stats.net_profit, 6550.0);
        assert_eq!(stats.pending_payments, 500.0);
        assert_eq!(stats.total_trips, 2);
    }

    #[test]
    fn test_empty_collection_is_all_zero() {
        assert_eq!(aggregate(&[]), DashboardStats::default());
    }

    #[test]
    fn test_overpaid_trip_reduces_pending_payments() {
        let trips = vec![
            trip("a", "v1", (2024, 1, 1), 0.0, [0.0; 5], (1000.0, 400.0)),
            trip("b", "v1", (2024, 1, 2), 0.0, [0.0; 5], (200.0, 500.0)),
        ];
        assert_eq!(aggregate(&trips).pending_payments, 300.0);
    }

    #[test]
    fn test_net_profit_may_be_negative() {
        let trips = vec![trip(
            "a",
            "v1",
            (2024, 1, 1),
            100.0,
            [300.0, 0.0, 0.0, 0.0, 0.0],
            (0.0, 0.0),
        )];
        assert_eq!(aggregate(&trips).net_profit, -200.0);
    }

    #[test]
    fn test_aggregate_is_additive_over_partitions() {
        let trips = demo_trips();
        let (left, right) = trips.split_at(1);

        let whole = aggregate(&trips);
        let a = aggregate(left);
        let b = aggregate(right);

        assert_eq!(whole.total_income, a.total_income + b.total_income);
        assert_eq!(whole.total_expenses, a.total_expenses + b.total_expenses);
        assert_eq!(whole.pending_payments, a.pending_payments + b.pending_payments);
        assert_eq!(whole.total_trips, a.total_trips + b.total_trips);
        assert_eq!(whole.net_profit, whole.total_income - whole.total_expenses);
    }

    #[test]
    fn test_vehicle_scope() {
        let stats = aggregate_for_vehicle("v1", &demo_trips());
        assert_eq!(stats.total_trips, 2);
        assert_eq!(stats.total_income, 8000.0);
        assert_eq!(stats.pending_payments, 400.0);
    }

    #[test]
    fn test_unknown_vehicle_is_all_zero() {
        let stats = aggregate_for_vehicle("v-unknown", &demo_trips());
        assert_eq!(stats, DashboardStats::default());
        assert_eq!(stats.total_trips, 0);
    }

    #[test]
    fn test_monthly_breakdown_is_chronological() {
        let mut trips = demo_trips();
        trips.reverse();

        let months = monthly_breakdown(&trips);
        assert_eq!(months.len(), 2);

        assert_eq!(months[0].name, "Nov 2023");
        assert_eq!(months[0].income, 12500.0);
        assert_eq!(months[0].expense, 5950.0);
        assert_eq!(months[0].profit, 6550.0);

        assert_eq!(months[1].name, "Dec 2023");
        assert_eq!((months[1].year, months[1].month), (2023, 12));
        assert_eq!(months[1].profit, 2150.0);
    }

    #[test]
    fn test_expense_breakdown_slices() {
        let slices = expense_breakdown(&demo_trips());
        let values: Vec<(&str, f64)> = slices.iter().map(|s| (s.name.as_str(), s.value)).collect();
        assert_eq!(
            values,
            vec![
                ("Fuel", 4500.0),
                ("Driver", 1900.0),
                ("Toll/Parking", 700.0),
                ("Other", 200.0),
            ]
        );
    }
}
