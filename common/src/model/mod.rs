pub mod customer;
pub mod invoice;
pub mod lenient;
pub mod product;
pub mod report;
