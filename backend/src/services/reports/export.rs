//! # Report Export
//!
//! Renders one of the three reports as a downloadable file for
//! `GET /api/reports/{report}/export?format=pdf|csv`.
//!
//! ## Workflow
//!
//! 1.  **Report**: the handler computes the requested report exactly as the
//!     JSON endpoints do. The sales export honours the same `period`,
//!     `startDate` and `endDate` parameters.
//!
//! 2.  **Flattening**: the report becomes a [`ReportTable`]: a title, summary
//!     lines, column headers and typed cells.
//!
//! 3.  **Rendering**: `pdf` lays the table out with `genpdf` (title, generation
//!     date, summary, bordered table, page number header on every page);
//!     `csv` writes a header row and one record per table row with the `csv`
//!     crate. Money is shown with two decimals, prefixed with `$` in the PDF.
//!
//! 4.  **Response**: the file is returned as an attachment named
//!     `<report>-report-<epoch millis>.<ext>`.

use crate::error::{ApiError, ApiResult};
use crate::services::reports::customers::load_customer_report;
use crate::services::reports::products::load_product_report;
use crate::services::reports::sales::load_sales_report;
use crate::state::AppState;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use common::model::report::{CustomerReport, ProductReport, SalesReport};
use common::requests::ExportQuery;
use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element as _, SimplePageDecorator};
use log::info;
use std::path::Path;
use std::str::FromStr;

const PAGE_MARGIN_MM: i32 = 10;
const BODY_FONT_SIZE: u8 = 10;
const TITLE_FONT_SIZE: u8 = 18;
const HEADER_FONT_SIZE: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Sales,
    Customers,
    Products,
}

impl ReportKind {
    fn slug(self) -> &'static str {
        match self {
            ReportKind::Sales => "sales",
            ReportKind::Customers => "customers",
            ReportKind::Products => "products",
        }
    }
}

impl FromStr for ReportKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(ReportKind::Sales),
            "customers" => Ok(ReportKind::Customers),
            "products" => Ok(ReportKind::Products),
            other => Err(ApiError::InvalidRequest(format!("unknown report '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Csv,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Csv => "csv",
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ExportFormat::Pdf),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ApiError::InvalidRequest(format!(
                "unknown export format '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Count(u64),
    Money(f64),
}

impl Cell {
    fn for_document(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Count(n) => n.to_string(),
            Cell::Money(amount) => format!("${amount:.2}"),
        }
    }

    fn for_spreadsheet(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Count(n) => n.to_string(),
            Cell::Money(amount) => format!("{amount:.2}"),
        }
    }
}

/// A report flattened to rows, ready for either renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub title: &'static str,
    pub summary: Vec<String>,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

fn count(n: usize) -> Cell {
    Cell::Count(u64::try_from(n).unwrap_or(u64::MAX))
}

pub fn sales_table(report: &SalesReport) -> ReportTable {
    ReportTable {
        title: "Sales Report",
        summary: vec![
            format!("Total Revenue: ${:.2}", report.total_revenue),
            format!("Total Invoices: {}", report.total_invoices),
        ],
        headers: vec!["Invoice #", "Customer", "Date", "Amount"],
        rows: report
            .invoices
            .iter()
            .map(|invoice| {
                vec![
                    Cell::Text(invoice.invoice_number.clone()),
                    Cell::Text(invoice.customer_name.clone()),
                    Cell::Text(invoice.date.clone()),
                    Cell::Money(invoice.total),
                ]
            })
            .collect(),
    }
}

pub fn customers_table(report: &[CustomerReport]) -> ReportTable {
    ReportTable {
        title: "Customers Report",
        summary: Vec::new(),
        headers: vec!["Customer Name", "Email", "Total Invoices", "Total Amount"],
        rows: report
            .iter()
            .map(|row| {
                vec![
                    Cell::Text(row.customer.name.clone()),
                    Cell::Text(row.customer.email.clone()),
                    count(row.total_invoices),
                    Cell::Money(row.total_amount),
                ]
            })
            .collect(),
    }
}

pub fn products_table(report: &[ProductReport]) -> ReportTable {
    ReportTable {
        title: "Products Report",
        summary: Vec::new(),
        headers: vec!["Product Name", "Category", "Total Sold", "Total Revenue"],
        rows: report
            .iter()
            .map(|row| {
                vec![
                    Cell::Text(row.product.name.clone()),
                    Cell::Text(row.product.category.clone()),
                    Cell::Count(row.stats.total_quantity),
                    Cell::Money(row.stats.total_revenue),
                ]
            })
            .collect(),
    }
}

pub fn render_csv(table: &ReportTable) -> ApiResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(Cell::for_spreadsheet))?;
    }
    writer
        .into_inner()
        .map_err(|e| ApiError::Csv(csv::Error::from(e.into_error())))
}

/// Arial if present in `fonts_dir`, LiberationSans otherwise.
fn load_font(fonts_dir: &Path) -> Result<FontFamily<FontData>, genpdf::error::Error> {
    genpdf::fonts::from_files(fonts_dir, "Arial", None)
        .or_else(|_| genpdf::fonts::from_files(fonts_dir, "LiberationSans", None))
}

fn configure_document(fonts_dir: &Path, title: &'static str) -> ApiResult<Document> {
    let mut doc = Document::new(load_font(fonts_dir)?);
    doc.set_title(title);
    doc.set_font_size(BODY_FONT_SIZE);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(PAGE_MARGIN_MM);
    decorator.set_header(move |page| {
        Paragraph::new(format!("{title} - page {page}"))
            .aligned(Alignment::Right)
            .styled(Style::new().with_font_size(HEADER_FONT_SIZE))
    });
    doc.set_page_decorator(decorator);
    Ok(doc)
}

pub fn render_pdf(table: &ReportTable, fonts_dir: &Path, generated_on: NaiveDate) -> ApiResult<Vec<u8>> {
    let mut doc = configure_document(fonts_dir, table.title)?;

    doc.push(
        Paragraph::new(table.title).styled(Style::new().bold().with_font_size(TITLE_FONT_SIZE)),
    );
    doc.push(Paragraph::new(format!(
        "Generated on: {}",
        generated_on.format("%Y-%m-%d")
    )));
    for line in &table.summary {
        doc.push(Paragraph::new(line.clone()));
    }
    doc.push(Break::new(1));

    let mut layout = TableLayout::new(vec![1; table.headers.len()]);
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let mut header = layout.row();
    for title in &table.headers {
        header.push_element(Paragraph::new(*title).styled(Style::new().bold()).padded(1));
    }
    header.push()?;

    for cells in &table.rows {
        let mut row = layout.row();
        for cell in cells {
            row.push_element(Paragraph::new(cell.for_document()).padded(1));
        }
        row.push()?;
    }
    doc.push(layout);

    let mut out = Vec::new();
    doc.render(&mut out)?;
    Ok(out)
}

fn build_table(state: &AppState, kind: ReportKind, query: &ExportQuery, today: NaiveDate) -> ReportTable {
    match kind {
        ReportKind::Sales => sales_table(&load_sales_report(state, &query.sales_query(), today)),
        ReportKind::Customers => customers_table(&load_customer_report(state)),
        ReportKind::Products => products_table(&load_product_report(state)),
    }
}

pub(crate) async fn process(
    state: web::Data<AppState>,
    report: web::Path<String>,
    query: web::Query<ExportQuery>,
) -> ApiResult<HttpResponse> {
    let kind: ReportKind = report.parse()?;
    let format: ExportFormat = query.format.as_deref().unwrap_or("pdf").parse()?;
    let now = Utc::now();

    let table = build_table(&state, kind, &query, now.date_naive());
    let body = match format {
        ExportFormat::Pdf => render_pdf(&table, state.fonts_dir(), now.date_naive())?,
        ExportFormat::Csv => render_csv(&table)?,
    };

    let filename = format!(
        "{}-report-{}.{}",
        kind.slug(),
        now.timestamp_millis(),
        format.extension()
    );
    info!("exported {} ({} rows)", filename, table.rows.len());

    Ok(HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(body))
}
