// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Failed to {operation}: {source}")]
	Query {
		operation: &'static str,
		#[source]
		source: sqlx::Error,
	},

	#[error("Table does not exist: {0}")]
	MissingTable(&'static str),

	#[error("Internal: {0}")]
	Internal(String),
}

impl DbError {
	/// Wrap a query failure with the operation that issued it.
	pub(crate) fn query(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
		move |source| DbError::Query { operation, source }
	}
}

pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_query_error_names_operation() {
		let err = DbError::query("insert raw samples")(sqlx::Error::RowNotFound);
		assert!(err.to_string().starts_with("Failed to insert raw samples"));
	}

	#[test]
	fn test_missing_table_message() {
		let err = DbError::MissingTable("summaries");
		assert_eq!(err.to_string(), "Table does not exist: summaries");
	}
}
