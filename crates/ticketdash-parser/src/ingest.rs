use blake3::Hasher;
use tracing::{debug, info};

use crate::errors::ParserError;
use crate::formats::TicketCsvParser;
use crate::model::TicketTable;
use crate::options::IngestOptions;
use crate::upload::decode_payload;

/// Decodes and normalizes one uploaded ticket export.
///
/// Either every row parses or the whole upload is rejected; the first
/// malformed row aborts ingestion.
pub fn parse_ticket_upload(
    payload: &[u8],
    options: &IngestOptions,
) -> Result<TicketTable, ParserError> {
    let file_hash = compute_hash(payload);
    let content = decode_payload(payload)?;
    debug!(
        %file_hash,
        bytes = payload.len(),
        delimiter = %options.delimiter,
        date_order = ?options.date_order,
        "parsing ticket upload"
    );

    let tickets = TicketCsvParser::new(options).parse(content)?;
    info!(%file_hash, rows = tickets.len(), "ticket upload normalized");

    Ok(TicketTable::new(tickets, file_hash))
}

pub fn compute_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    let hash = hasher.finalize();
    hash.to_hex().to_string()
}
