//! Query execution module
//!
//! Runs client-assembled query text against the backing engine. There is
//! deliberately no validation, parameterization or rewriting here: the
//! query reaches the engine exactly as the session built it, and engine
//! failures are captured as text rather than propagated, because the raw
//! error text is part of the service's response surface.

use tracing::warn;

use crate::backend::{Backend, Row};

/// Outcome of executing one query
///
/// Either the engine's full row set or its error text; never both.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The engine returned normally
    Rows(Vec<Row>),
    /// The engine failed; the text is the engine's own error display
    Failed(String),
}

/// Query Executor
///
/// Owns the shared backing-engine handle for the lifetime of the process.
pub struct QueryExecutor<B: Backend> {
    backend: B,
}

impl<B: Backend> QueryExecutor<B> {
    /// Create an executor around an engine handle
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Execute arbitrary query text
    ///
    /// Engine failure of any kind becomes `Failed` carrying the error
    /// text; it never terminates the calling session.
    pub fn execute(&mut self, query: &str) -> QueryOutcome {
        match self.backend.run_query(query) {
            Ok(rows) => QueryOutcome::Rows(rows),
            Err(e) => {
                warn!("Query failed: {}", e);
                QueryOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};

    /// Engine double that always returns the same canned answer
    struct Canned(Result<Vec<Row>>);

    impl Backend for Canned {
        fn run_query(&mut self, _query: &str) -> Result<Vec<Row>> {
            match &self.0 {
                Ok(rows) => Ok(rows.clone()),
                Err(e) => Err(Error::Execution(e.to_string())),
            }
        }
    }

    #[test]
    fn test_rows_pass_through() {
        let mut executor = QueryExecutor::new(Canned(Ok(vec![vec!["7".to_string()]])));
        assert_eq!(
            executor.execute("SELECT 3 + 4"),
            QueryOutcome::Rows(vec![vec!["7".to_string()]])
        );
    }

    #[test]
    fn test_failure_captured_as_text() {
        let text = "Unknown column 'foo' in 'field list'";
        let mut executor = QueryExecutor::new(Canned(Err(Error::Execution(text.to_string()))));
        assert_eq!(
            executor.execute("SELECT foo + 4"),
            QueryOutcome::Failed(text.to_string())
        );
    }
}
