//! Revenue-by-customer report.

use crate::state::AppState;
use crate::store::Collection;
use actix_web::{web, HttpResponse};
use common::model::customer::Customer;
use common::model::invoice::Invoice;
use common::model::report::CustomerReport;

/// One row per customer, in customer store order, with the invoices that
/// reference it. Customers without invoices report zeros. Invoices whose
/// customer no longer exists appear in no row.
pub fn customer_report(customers: Vec<Customer>, invoices: &[Invoice]) -> Vec<CustomerReport> {
    customers
        .into_iter()
        .map(|customer| {
            let matched: Vec<Invoice> = invoices
                .iter()
                .filter(|invoice| invoice.customer_id == customer.id)
                .cloned()
                .collect();
            CustomerReport {
                total_invoices: matched.len(),
                total_amount: matched
                    .iter()
                    .fold(0.0, |sum, invoice| sum + invoice.total),
                invoices: matched,
                customer,
            }
        })
        .collect()
}

pub fn load_customer_report(state: &AppState) -> Vec<CustomerReport> {
    let invoices: Vec<Invoice> = state.store.load_all(Collection::Invoices);
    customer_report(state.store.load_all(Collection::Customers), &invoices)
}

pub(crate) async fn process(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(load_customer_report(&state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            ..Customer::default()
        }
    }

    fn invoice(id: &str, customer_id: &str, total: f64) -> Invoice {
        Invoice {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            total,
            ..Invoice::default()
        }
    }

    #[test]
    fn partitions_invoices_by_customer() {
        let customers = vec![customer("a", "Acme"), customer("b", "Bolt"), customer("c", "Cog")];
        let invoices = vec![
            invoice("1", "a", 10.0),
            invoice("2", "b", 5.0),
            invoice("3", "a", 2.5),
            invoice("4", "ghost", 99.0),
        ];

        let report = customer_report(customers, &invoices);

        assert_eq!(report.len(), 3);
        assert_eq!(report[0].customer.name, "Acme");
        assert_eq!(report[0].total_invoices, 2);
        assert_eq!(report[0].total_amount, 12.5);
        assert_eq!(report[1].total_invoices, 1);
        assert_eq!(report[1].invoices[0].id, "2");
        assert_eq!(report[2].total_invoices, 0);
        assert_eq!(report[2].total_amount, 0.0);
        assert!(report[2].invoices.is_empty());
    }

    #[test]
    fn no_customers_means_no_rows() {
        let invoices = vec![invoice("1", "a", 10.0)];
        assert!(customer_report(Vec::new(), &invoices).is_empty());
    }
}
