use crate::errors::ParserError;
use crate::model::Ticket;
use crate::options::IngestOptions;

use super::common::RowCells;
use super::schema::{ColumnIndex, TicketColumn};

/// Reads a delimited ticket export: one header row followed by one ticket per row.
pub struct TicketCsvParser<'a> {
    options: &'a IngestOptions,
}

impl<'a> TicketCsvParser<'a> {
    pub fn new(options: &'a IngestOptions) -> Self {
        Self { options }
    }

    fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.options.delimiter.as_byte());
        builder
    }

    pub fn parse(&self, content: &str) -> Result<Vec<Ticket>, ParserError> {
        let mut reader = self.reader_builder().from_reader(content.as_bytes());
        let mut records = reader.records();

        let header = records
            .next()
            .ok_or_else(|| ParserError::decode("file is empty; expected a header row"))??;
        let index = ColumnIndex::resolve(&header, &self.options.columns)?;

        let mut tickets = Vec::new();
        for (offset, record) in records.enumerate() {
            let record = record?;
            // 1-based file line, counting the header as line 1.
            let line_index = record
                .position()
                .map_or(offset + 2, |position| position.line() as usize);
            let cells = RowCells::new(&record, &index, &self.options.columns, line_index);
            tickets.push(self.parse_row(&cells)?);
        }

        Ok(tickets)
    }

    fn parse_row(&self, cells: &RowCells<'_>) -> Result<Ticket, ParserError> {
        let order = self.options.date_order;
        Ok(Ticket {
            customer_key: cells.text(TicketColumn::CustomerKey)?,
            name: cells.text(TicketColumn::Name)?,
            status: cells.text(TicketColumn::Status)?,
            department: cells.text(TicketColumn::Department)?,
            tags: cells.optional_text(TicketColumn::Tags)?,
            agent: cells.text(TicketColumn::Agent)?,
            opened_at: cells.timestamp(TicketColumn::OpenedAt, order)?,
            closed_at: cells.optional_timestamp(TicketColumn::ClosedAt, order)?,
            last_message_at: cells.optional_timestamp(TicketColumn::LastMessageAt, order)?,
        })
    }
}
