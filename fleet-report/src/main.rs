//! Fleet report tool for Navexa Fleet
//!
//! Prints dashboard figures from the same store the desktop app uses and
//! moves trips in and out as JSON.
//!
//! Usage:
//!   # Dashboard totals, whole fleet or one vehicle
//!   fleet-report stats
//!   fleet-report stats --vehicle v1
//!
//!   # Chart data
//!   fleet-report monthly
//!   fleet-report expenses
//!
//!   # Insurance / pollution / service deadlines
//!   fleet-report compliance --today 2024-01-01
//!
//!   # Move trips between stores
//!   fleet-report --backend local --db fleet.db export > trips.json
//!   fleet-report --db other.db import trips.json
//!
//! `NAVEXA_BACKEND`, `NAVEXA_DB_PATH` and `NAVEXA_COMPLIANCE_WINDOW_DAYS` are
//! honoured; `--backend` and `--db` take precedence.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use navexa_fleet_lib::{AppConfig, FleetService, StoreError, StoreKind};
use navexa_fleet_wasm::{
    ComplianceStatus, DashboardStats, ExpenseSlice, MonthlySummary, TripForm, VehicleCompliance,
};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "fleet-report")]
#[command(about = "Reports and trip import/export for Navexa Fleet")]
struct Cli {
    /// Storage backend (overrides NAVEXA_BACKEND)
    #[arg(long, value_enum, global = true)]
    backend: Option<Backend>,

    /// SQLite database file (overrides NAVEXA_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    Mock,
    Local,
}

impl From<Backend> for StoreKind {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Mock => StoreKind::Mock,
            Backend::Local => StoreKind::Local,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dashboard totals
    Stats {
        /// Restrict to one vehicle id
        #[arg(long)]
        vehicle: Option<String>,
    },
    /// Income, expense and profit per month
    Monthly,
    /// Expense totals by category
    Expenses,
    /// Compliance status of every vehicle
    Compliance {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,
    },
    /// Import trips from a JSON array file
    Import { file: PathBuf },
    /// Print every trip as a JSON array
    Export,
}

#[derive(Error, Debug)]
enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

fn main() {
    navexa_fleet_lib::init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn config_for(cli: &Cli) -> Result<AppConfig, ReportError> {
    let mut config = AppConfig::from_env()?;
    if let Some(backend) = cli.backend {
        config.backend = backend.into();
    }
    if let Some(db) = &cli.db {
        config.db_path = Some(db.clone());
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<String, ReportError> {
    let mut fleet = FleetService::from_config(&config_for(cli)?)?;
    execute(&mut fleet, &cli.command, cli.json)
}

fn execute(fleet: &mut FleetService, command: &Command, json: bool) -> Result<String, ReportError> {
    match command {
        Command::Stats { vehicle } => {
            let stats = match vehicle {
                Some(id) => fleet.vehicle_stats(id)?,
                None => fleet.dashboard()?,
            };
            render(&stats, json, |s| render_stats(s, vehicle.as_deref()))
        }
        Command::Monthly => render(&fleet.monthly_breakdown()?, json, |m| render_monthly(m)),
        Command::Expenses => render(&fleet.expense_breakdown()?, json, |e| render_expenses(e)),
        Command::Compliance { today } => {
            let today = match today {
                Some(raw) => parse_date(raw)?,
                None => Local::now().date_naive(),
            };
            render(&fleet.compliance_report(today)?, json, |c| {
                render_compliance(c, today)
            })
        }
        Command::Import { file } => {
            let forms = load_trip_forms(file)?;
            let summary = fleet.import_trips(forms)?;
            render(&summary, json, |s| {
                format!(
                    "Imported {} new and {} updated trips ({} warnings)\n",
                    s.inserted, s.replaced, s.warnings
                )
            })
        }
        Command::Export => {
            let mut out = serde_json::to_string_pretty(&fleet.trips()?)?;
            out.push('\n');
            Ok(out)
        }
    }
}

fn render<T, F>(value: &T, json: bool, table: F) -> Result<String, ReportError>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    if json {
        let mut out = serde_json::to_string_pretty(value)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(table(value))
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ReportError::InvalidDate(raw.to_string()))
}

fn load_trip_forms(path: &Path) -> Result<Vec<TripForm>, ReportError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let forms: Vec<TripForm> = serde_json::from_str(&raw)?;
    log::debug!("Read {} trips from {}", forms.len(), path.display());
    Ok(forms)
}

fn render_stats(stats: &DashboardStats, vehicle: Option<&str>) -> String {
    let mut out = String::new();
    match vehicle {
        Some(id) => {
            let _ = writeln!(out, "Vehicle {}", id);
        }
        None => {
            let _ = writeln!(out, "Fleet");
        }
    }
    let _ = writeln!(out, "  Trips:            {}", stats.total_trips);
    let _ = writeln!(out, "  Total income:     {:.2}", stats.total_income);
    let _ = writeln!(out, "  Total expenses:   {:.2}", stats.total_expenses);
    let _ = writeln!(out, "  Net profit:       {:.2}", stats.net_profit);
    let _ = writeln!(out, "  Pending payments: {:.2}", stats.pending_payments);
    out
}

fn render_monthly(months: &[MonthlySummary]) -> String {
    if months.is_empty() {
        return "No trips recorded\n".to_string();
    }
    let mut out = format!("{:<10} {:>12} {:>12} {:>12}\n", "Month", "Income", "Expense", "Profit");
    for month in months {
        let _ = writeln!(
            out,
            "{:<10} {:>12.2} {:>12.2} {:>12.2}",
            month.name, month.income, month.expense, month.profit
        );
    }
    out
}

fn render_expenses(slices: &[ExpenseSlice]) -> String {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    let mut out = String::new();
    for slice in slices {
        let share = if total > 0.0 { slice.value / total * 100.0 } else { 0.0 };
        let _ = writeln!(out, "{:<14} {:>12.2} {:>6.1}%", slice.name, slice.value, share);
    }
    let _ = writeln!(out, "{:<14} {:>12.2}", "Total", total);
    out
}

fn status_label(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Expired => "EXPIRED",
        ComplianceStatus::DueSoon => "due soon",
        ComplianceStatus::Valid => "ok",
    }
}

fn render_compliance(report: &[VehicleCompliance], today: NaiveDate) -> String {
    let mut out = format!("Compliance as of {}\n", today);
    let _ = writeln!(
        out,
        "{:<16} {:<10} {:<10} {:<10}",
        "Registration", "Insurance", "Pollution", "Service"
    );
    for vehicle in report {
        let _ = writeln!(
            out,
            "{:<16} {:<10} {:<10} {:<10}",
            vehicle.registration_number,
            status_label(vehicle.insurance),
            status_label(vehicle.pollution),
            status_label(vehicle.service)
        );
    }
    let flagged = report.iter().filter(|v| v.needs_attention()).count();
    let _ = writeln!(out, "{} of {} vehicles need attention", flagged, report.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use navexa_fleet_lib::MockStore;
    use std::io::Write;

    fn mock_fleet() -> FleetService {
        FleetService::new(Box::new(MockStore::new()))
    }

    #[test]
    fn test_cli_parses_global_overrides() {
        let cli = Cli::try_parse_from([
            "fleet-report",
            "stats",
            "--vehicle",
            "v1",
            "--backend",
            "mock",
        ])
        .unwrap();
        assert_eq!(cli.backend, Some(Backend::Mock));
        assert!(matches!(cli.command, Command::Stats { vehicle: Some(ref v) } if v == "v1"));
    }

    #[test]
    fn test_run_against_mock_backend() {
        let cli =
            Cli::try_parse_from(["fleet-report", "--backend", "mock", "--json", "expenses"])
                .unwrap();
        let out = run(&cli).unwrap();
        let slices: Vec<ExpenseSlice> = serde_json::from_str(&out).unwrap();
        assert_eq!(slices.len(), 4);
        assert_eq!(slices[0].name, "Fuel");
        assert_eq!(slices[0].value, 4500.0);
    }

    #[test]
    fn test_stats_report() {
        let mut fleet = mock_fleet();
        let out = execute(&mut fleet, &Command::Stats { vehicle: None }, false).unwrap();
        assert!(out.contains("Trips:            3"));
        assert!(out.contains("16000.00"));
    }

    #[test]
    fn test_stats_json() {
        let mut fleet = mock_fleet();
        let command = Command::Stats {
            vehicle: Some("v2".to_string()),
        };
        let out = execute(&mut fleet, &command, true).unwrap();
        let stats: DashboardStats = serde_json::from_str(&out).unwrap();
        assert_eq!(stats.total_trips, 1);
        assert_eq!(stats.pending_payments, 500.0);
    }

    #[test]
    fn test_compliance_rejects_bad_date() {
        let mut fleet = mock_fleet();
        let command = Command::Compliance {
            today: Some("01/01/2024".to_string()),
        };
        assert!(matches!(
            execute(&mut fleet, &command, false),
            Err(ReportError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_compliance_report() {
        let mut fleet = mock_fleet();
        let command = Command::Compliance {
            today: Some("2024-01-01".to_string()),
        };
        let out = execute(&mut fleet, &command, false).unwrap();
        assert!(out.contains("TN-09-ZZ-5555"));
        assert!(out.contains("2 of 3 vehicles need attention"));
    }

    #[test]
    fn test_export_then_import_into_empty_store() {
        let mut source = mock_fleet();
        let exported = execute(&mut source, &Command::Export, false).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(exported.as_bytes()).unwrap();

        let mut target = FleetService::new(Box::new(MockStore::empty()));
        let command = Command::Import {
            file: file.path().to_path_buf(),
        };
        let out = execute(&mut target, &command, true).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(summary["inserted"], 3);

        let ids: Vec<String> = target.trips().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_import_missing_file() {
        let mut fleet = mock_fleet();
        let command = Command::Import {
            file: PathBuf::from("/definitely/not/here.json"),
        };
        assert!(matches!(
            execute(&mut fleet, &command, false),
            Err(ReportError::Read { .. })
        ));
    }

    #[test]
    fn test_empty_monthly_report() {
        let mut fleet = FleetService::new(Box::new(MockStore::empty()));
        let out = execute(&mut fleet, &Command::Monthly, false).unwrap();
        assert_eq!(out, "No trips recorded\n");
    }
}
