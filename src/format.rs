//! Result formatting
//!
//! Renders a query outcome into the line-based text sent to the client.

use crate::executor::QueryOutcome;

/// Response when the engine returned no rows
pub const NO_OUTPUT: &str = "Aucune sortie ou erreur.\n";

/// Response substituted for engine error text when reflection is disabled
pub const GENERIC_ERROR: &str = "Une erreur est survenue.\n";

/// Render an outcome for sending to the client
///
/// Rows are reduced to their first column, one per line. Error text is
/// sent unwrapped when `reflect_backend_errors` is set; this discloses
/// engine internals on purpose and is the behavior the wargame relies on.
pub fn render(outcome: &QueryOutcome, reflect_backend_errors: bool) -> String {
    match outcome {
        QueryOutcome::Rows(rows) if rows.is_empty() => NO_OUTPUT.to_string(),
        QueryOutcome::Rows(rows) => {
            let lines: Vec<&str> = rows
                .iter()
                .map(|row| row.first().map_or("", String::as_str))
                .collect();
            format!("{}\n", lines.join("\n"))
        }
        QueryOutcome::Failed(text) if reflect_backend_errors => format!("{}\n", text),
        QueryOutcome::Failed(_) => GENERIC_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row() {
        let outcome = QueryOutcome::Rows(vec![vec!["7".to_string()]]);
        assert_eq!(render(&outcome, true), "7\n");
    }

    #[test]
    fn test_first_column_joined() {
        let outcome = QueryOutcome::Rows(vec![
            vec!["1".to_string(), "ignored".to_string()],
            vec!["flag{abc}".to_string()],
        ]);
        assert_eq!(render(&outcome, true), "1\nflag{abc}\n");
    }

    #[test]
    fn test_no_rows() {
        let outcome = QueryOutcome::Rows(vec![]);
        assert_eq!(render(&outcome, true), NO_OUTPUT);
    }

    #[test]
    fn test_error_reflected_verbatim() {
        let outcome = QueryOutcome::Failed(
            "ERROR 1064 (42000): You have an error in your SQL syntax".to_string(),
        );
        assert_eq!(
            render(&outcome, true),
            "ERROR 1064 (42000): You have an error in your SQL syntax\n"
        );
    }

    #[test]
    fn test_error_suppressed_when_reflection_off() {
        let outcome = QueryOutcome::Failed("ERROR 1064 (42000): ...".to_string());
        assert_eq!(render(&outcome, false), GENERIC_ERROR);
    }
}
