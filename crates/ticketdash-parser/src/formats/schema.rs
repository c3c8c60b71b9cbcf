use csv::StringRecord;

use crate::errors::ParserError;
use crate::options::ColumnMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketColumn {
    CustomerKey,
    Name,
    Status,
    Department,
    Tags,
    Agent,
    OpenedAt,
    ClosedAt,
    LastMessageAt,
}

impl TicketColumn {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            TicketColumn::CustomerKey => "customer_key",
            TicketColumn::Name => "name",
            TicketColumn::Status => "status",
            TicketColumn::Department => "department",
            TicketColumn::Tags => "tags",
            TicketColumn::Agent => "agent",
            TicketColumn::OpenedAt => "opened_at",
            TicketColumn::ClosedAt => "closed_at",
            TicketColumn::LastMessageAt => "last_message_at",
        }
    }
}

pub const REQUIRED_COLUMNS: [TicketColumn; 9] = [
    TicketColumn::CustomerKey,
    TicketColumn::Name,
    TicketColumn::Status,
    TicketColumn::Department,
    TicketColumn::Tags,
    TicketColumn::Agent,
    TicketColumn::OpenedAt,
    TicketColumn::ClosedAt,
    TicketColumn::LastMessageAt,
];

/// Position of every required column inside the header row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnIndex {
    positions: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnIndex {
    pub fn resolve(header: &StringRecord, columns: &ColumnMap) -> Result<Self, ParserError> {
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        let mut missing = Vec::new();

        for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
            let wanted = columns.header_for(*column).trim();
            match header
                .iter()
                .position(|field| field.trim().eq_ignore_ascii_case(wanted))
            {
                Some(position) => positions[slot] = position,
                None => missing.push(wanted.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(Self { positions })
        } else {
            Err(ParserError::Schema { missing })
        }
    }

    pub fn position(&self, column: TicketColumn) -> usize {
        let slot = REQUIRED_COLUMNS
            .iter()
            .position(|candidate| *candidate == column)
            .unwrap_or_default();
        self.positions[slot]
    }
}
