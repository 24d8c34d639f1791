//! Sales-by-period report.

use crate::state::AppState;
use crate::store::Collection;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use common::model::invoice::Invoice;
use common::model::report::SalesReport;
use common::requests::SalesReportQuery;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The time window a sales report covers, relative to `today`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodFilter {
    /// Invoices dated exactly on this `YYYY-MM-DD` string.
    Daily(String),
    Monthly { year: i32, month: u32 },
    Yearly(i32),
    /// Inclusive range compared as `YYYY-MM-DD` strings.
    Range { start: String, end: String },
    Unfiltered,
}

impl PeriodFilter {
    /// A named period wins over an explicit range; the range only applies
    /// when both ends are non-empty; anything else reports on every invoice.
    pub fn from_query(query: &SalesReportQuery, today: NaiveDate) -> Self {
        match query.period.as_deref() {
            Some("daily") => PeriodFilter::Daily(today.format(DATE_FORMAT).to_string()),
            Some("monthly") => PeriodFilter::Monthly {
                year: today.year(),
                month: today.month(),
            },
            Some("yearly") => PeriodFilter::Yearly(today.year()),
            _ => match (query.start_date.as_deref(), query.end_date.as_deref()) {
                (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
                    PeriodFilter::Range {
                        start: start.to_string(),
                        end: end.to_string(),
                    }
                }
                _ => PeriodFilter::Unfiltered,
            },
        }
    }

    pub fn matches(&self, date: &str) -> bool {
        match self {
            PeriodFilter::Daily(day) => date == day,
            PeriodFilter::Monthly { year, month } => {
                parse_date(date).is_some_and(|d| d.year() == *year && d.month() == *month)
            }
            PeriodFilter::Yearly(year) => parse_date(date).is_some_and(|d| d.year() == *year),
            PeriodFilter::Range { start, end } => date >= start.as_str() && date <= end.as_str(),
            PeriodFilter::Unfiltered => true,
        }
    }
}

/// Accepts plain `YYYY-MM-DD` dates and full RFC 3339 timestamps. Anything
/// else never falls inside a calendar period.
fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(date)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

pub fn sales_report(invoices: Vec<Invoice>, filter: &PeriodFilter) -> SalesReport {
    let invoices: Vec<Invoice> = invoices
        .into_iter()
        .filter(|invoice| filter.matches(&invoice.date))
        .collect();
    SalesReport {
        total_revenue: invoices
            .iter()
            .fold(0.0, |sum, invoice| sum + invoice.total),
        total_invoices: invoices.len(),
        invoices,
    }
}

/// Loads the invoice collection and reports on the selected period.
pub fn load_sales_report(state: &AppState, query: &SalesReportQuery, today: NaiveDate) -> SalesReport {
    let filter = PeriodFilter::from_query(query, today);
    sales_report(state.store.load_all(Collection::Invoices), &filter)
}

pub(crate) async fn process(
    state: web::Data<AppState>,
    query: web::Query<SalesReportQuery>,
) -> HttpResponse {
    let report = load_sales_report(&state, &query, Utc::now().date_naive());
    HttpResponse::Ok().json(report)
}
