pub mod errors;
pub mod formats;
mod ingest;
pub mod model;
pub mod options;
mod upload;

pub use errors::{ErrorKind, ParserError};
pub use formats::{TicketColumn, REQUIRED_COLUMNS};
pub use ingest::{compute_hash, parse_ticket_upload};
pub use model::{Ticket, TicketTable};
pub use options::{ColumnMap, DateOrder, Delimiter, IngestOptions};
pub use upload::{decode_payload, decode_upload_contents};
