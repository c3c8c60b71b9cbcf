mod common;
pub mod schema;
mod ticket_csv;

pub use schema::{TicketColumn, REQUIRED_COLUMNS};
pub use ticket_csv::TicketCsvParser;
