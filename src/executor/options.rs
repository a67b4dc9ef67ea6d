//! Options controlling paginated id listing.
use crate::errors::QueryError;
use serde::{Deserialize, Serialize};

/// Sort key for a listing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderByField {
    CreateTime,
    UpdateTime,
    Id,
}

impl OrderByField {
    pub(crate) fn column_name(self) -> &'static str {
        match self {
            Self::CreateTime => "create_time_since_epoch",
            Self::UpdateTime => "last_update_time_since_epoch",
            Self::Id => "id",
        }
    }
}

/// Options for the shared id-listing planner.
///
/// `max_result_size` must be positive. `filter_query` is only accepted when
/// listing artifacts and is combined into the WHERE clause with `AND`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOperationOptions {
    pub max_result_size: i64,
    pub order_by_field: OrderByField,
    pub is_asc: bool,
    pub next_page_token: Option<String>,
    pub filter_query: Option<String>,
}

impl Default for ListOperationOptions {
    fn default() -> Self {
        Self {
            max_result_size: 20,
            order_by_field: OrderByField::Id,
            is_asc: true,
            next_page_token: None,
            filter_query: None,
        }
    }
}

impl ListOperationOptions {
    pub fn max_result_size(mut self, size: i64) -> Self {
        self.max_result_size = size;
        self
    }

    pub fn ordered_by(mut self, field: OrderByField, is_asc: bool) -> Self {
        self.order_by_field = field;
        self.is_asc = is_asc;
        self
    }

    pub fn page_token(mut self, token: &str) -> Self {
        self.next_page_token = Some(token.to_owned());
        self
    }

    pub fn filter(mut self, filter_query: &str) -> Self {
        self.filter_query = Some(filter_query.to_owned());
        self
    }
}

/// Cursor state carried between listing pages: the sort-key value and id of
/// the last returned row, plus the ordering it was produced under.
///
/// Opaque to callers; the encoding is an implementation detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct NextPageToken {
    pub field: OrderByField,
    pub is_asc: bool,
    pub field_offset: i64,
    pub id_offset: i64,
}

impl NextPageToken {
    pub(crate) fn encode(&self) -> Result<String, QueryError> {
        serde_json::to_string(self).map_err(|e| QueryError::Internal {
            message: format!("cannot encode next_page_token: {e}"),
        })
    }

    pub(crate) fn decode(token: &str) -> Result<Self, QueryError> {
        serde_json::from_str(token).map_err(|e| QueryError::InvalidArgument {
            message: format!("malformed next_page_token: {e}"),
        })
    }

    /// Tokens are only valid for the ordering that produced them.
    pub(crate) fn validate_against(&self, options: &ListOperationOptions) -> Result<(), QueryError> {
        if self.field != options.order_by_field || self.is_asc != options.is_asc {
            return Err(QueryError::InvalidArgument {
                message: "next_page_token does not match the requested ordering".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_token_round_trips() -> anyhow::Result<()> {
        let token = NextPageToken {
            field: OrderByField::CreateTime,
            is_asc: false,
            field_offset: 1609134222018,
            id_offset: 42,
        };
        let decoded = NextPageToken::decode(&token.encode()?)?;
        assert_eq!(decoded, token);
        Ok(())
    }

    #[test]
    fn malformed_token_is_invalid_argument() {
        assert!(matches!(
            NextPageToken::decode("not json"),
            Err(QueryError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn token_ordering_mismatch_is_rejected() {
        let token = NextPageToken {
            field: OrderByField::Id,
            is_asc: true,
            field_offset: 5,
            id_offset: 5,
        };
        let options = ListOperationOptions::default().ordered_by(OrderByField::CreateTime, true);
        assert!(matches!(
            token.validate_against(&options),
            Err(QueryError::InvalidArgument { .. })
        ));
        let options = ListOperationOptions::default().ordered_by(OrderByField::Id, true);
        assert!(token.validate_against(&options).is_ok());
    }
}
