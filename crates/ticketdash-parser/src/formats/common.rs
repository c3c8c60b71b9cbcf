use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::errors::ParserError;
use crate::options::{ColumnMap, DateOrder};

use super::schema::{ColumnIndex, TicketColumn};

pub(crate) fn parse_timestamp(
    value: &str,
    order: DateOrder,
    column: &str,
    line_index: usize,
) -> Result<NaiveDateTime, ParserError> {
    let trimmed = value.trim();
    for fmt in order.formats() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }
    for fmt in order.date_only_formats() {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date.and_time(chrono::NaiveTime::MIN));
        }
    }
    Err(ParserError::TimestampFormat {
        column: column.to_string(),
        line_index,
        value: trimmed.to_string(),
    })
}

pub(crate) fn parse_optional_timestamp(
    value: &str,
    order: DateOrder,
    column: &str,
    line_index: usize,
) -> Result<Option<NaiveDateTime>, ParserError> {
    match clean_optional(Some(value)) {
        Some(text) => parse_timestamp(&text, order, column, line_index).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// Borrowed view of one data row, addressed by ticket field instead of position.
pub(crate) struct RowCells<'a> {
    record: &'a StringRecord,
    index: &'a ColumnIndex,
    columns: &'a ColumnMap,
    line_index: usize,
}

impl<'a> RowCells<'a> {
    pub fn new(
        record: &'a StringRecord,
        index: &'a ColumnIndex,
        columns: &'a ColumnMap,
        line_index: usize,
    ) -> Self {
        Self {
            record,
            index,
            columns,
            line_index,
        }
    }

    pub fn header(&self, column: TicketColumn) -> &'a str {
        self.columns.header_for(column)
    }

    pub fn get(&self, column: TicketColumn) -> Result<&'a str, ParserError> {
        self.record
            .get(self.index.position(column))
            .ok_or_else(|| ParserError::Field {
                column: self.header(column).to_string(),
                line_index: self.line_index,
                message: format!(
                    "row has {} fields, header expects column at position {}",
                    self.record.len(),
                    self.index.position(column)
                ),
            })
    }

    pub fn text(&self, column: TicketColumn) -> Result<String, ParserError> {
        self.get(column).map(|value| value.trim().to_string())
    }

    pub fn optional_text(&self, column: TicketColumn) -> Result<Option<String>, ParserError> {
        self.get(column).map(|value| clean_optional(Some(value)))
    }

    pub fn timestamp(
        &self,
        column: TicketColumn,
        order: DateOrder,
    ) -> Result<NaiveDateTime, ParserError> {
        let value = self.get(column)?;
        parse_timestamp(value, order, self.header(column), self.line_index)
    }

    pub fn optional_timestamp(
        &self,
        column: TicketColumn,
        order: DateOrder,
    ) -> Result<Option<NaiveDateTime>, ParserError> {
        let value = self.get(column)?;
        parse_optional_timestamp(value, order, self.header(column), self.line_index)
    }
}
