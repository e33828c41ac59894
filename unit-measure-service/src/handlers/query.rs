//! Query parameters for the list endpoint
//!
//! `offset` is interpreted according to the configured
//! [`OffsetConvention`]: either a number of rows to skip or a 1-indexed page
//! number. Either way the store only ever sees a row window.
//!
//! # Example
//!
//! ```rust
//! use unit_measure_service::config::PaginationConfig;
//! use unit_measure_service::handlers::ListQuery;
//!
//! let query = ListQuery::default().with_offset(20).with_limit(10);
//! let window = query.resolve(&PaginationConfig::default()).unwrap();
//! assert_eq!(window.offset, 20);
//! assert_eq!(window.limit, 10);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiOperation};
use crate::{
    config::{OffsetConvention, PaginationConfig},
    repository::Pagination,
};

/// Query parameters for `GET /unit-measures`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Rows to skip, or page number. None uses the configured default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    /// Page size. None uses the configured default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl ListQuery {
    /// Set the offset
    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the limit
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resolve into a row window
    ///
    /// Limits above `max_limit` are clamped. A zero limit, or page 0 under
    /// the page-number convention, is rejected.
    pub fn resolve(&self, config: &PaginationConfig) -> Result<Pagination, ApiError> {
        let limit = self.limit.unwrap_or(u64::from(config.default_limit));
        if limit == 0 {
            return Err(ApiError::validation_failed(
                ApiOperation::List,
                "limit must be greater than zero",
            ));
        }
        let limit = limit.min(u64::from(config.max_limit));

        let offset = self
            .offset
            .unwrap_or(u64::from(config.effective_default_offset()));

        let rows_to_skip = match config.convention {
            OffsetConvention::RowOffset => offset,
            OffsetConvention::PageNumber => {
                if offset == 0 {
                    return Err(ApiError::validation_failed(
                        ApiOperation::List,
                        "offset is a page number and must be at least 1",
                    ));
                }
                (offset - 1).saturating_mul(limit)
            }
        };

        Ok(Pagination::new(rows_to_skip, limit))
    }
}
