/// Owner-scoped task filter composition
///
/// This module builds the WHERE clause used by every task listing. The owner
/// clause is always present and always first: no composed query can reach
/// another owner's tasks. Optional clauses are AND-ed behind it:
///
/// - an exact status match, unless the filter is [`StatusFilter::All`]
/// - a case-insensitive substring match against title OR description
///
/// Results are ordered by creation time descending (newest first). There is
/// no secondary sort key, so tasks sharing a creation timestamp come back in
/// an unspecified relative order.
///
/// # Example
///
/// ```
/// use tasktrail_shared::query::{StatusFilter, TaskFilter};
///
/// let filter = TaskFilter::from_params(Some("pending"), Some("milk")).unwrap();
/// let query = filter.to_query();
///
/// assert!(query.where_clause().starts_with("owner_id = $1"));
/// assert_eq!(query.search_pattern(), Some("%milk%"));
/// ```

use crate::models::task::TaskStatus;

/// Status portion of a task filter
///
/// The query-string sentinel `"all"` (and an absent parameter) map to
/// [`StatusFilter::All`], which adds no status clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No status restriction
    #[default]
    All,

    /// Restrict to tasks with exactly this status
    Only(TaskStatus),
}

/// Filter parameters for listing tasks
///
/// Owner scoping is not part of the filter: the owner is supplied separately
/// by the caller and is always bound first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Status restriction
    pub status: StatusFilter,

    /// Free-text search over title and description (case-insensitive
    /// substring); empty or whitespace-only strings are treated as absent
    pub search: Option<String>,
}

/// A composed task query: WHERE clause text plus the optional bind values
///
/// Bind positions are fixed: `$1` is the owner, `$2` the status when
/// present, and the search pattern takes the next free position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    where_clause: String,
    status: Option<TaskStatus>,
    search_pattern: Option<String>,
}

impl TaskFilter {
    /// Builds a filter from raw query-string parameters
    ///
    /// - `status`: `None` or `"all"` mean no restriction; `"pending"` and
    ///   `"completed"` restrict; anything else is rejected
    /// - `search`: trimmed; empty and whitespace-only values are dropped
    ///
    /// # Errors
    ///
    /// Returns a message naming the unrecognized status value
    pub fn from_params(status: Option<&str>, search: Option<&str>) -> Result<Self, String> {
        let status = match status {
            None => StatusFilter::All,
            Some(s) if s.eq_ignore_ascii_case("all") => StatusFilter::All,
            Some(s) => StatusFilter::Only(
                s.parse::<TaskStatus>()
                    .map_err(|_| format!("Unknown status filter: {}", s))?,
            ),
        };

        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self { status, search })
    }

    /// Composes the WHERE clause and bind values for this filter
    ///
    /// The owner clause (`owner_id = $1`) is emitted first, unconditionally.
    pub fn to_query(&self) -> TaskQuery {
        let mut where_clause = String::from("owner_id = $1");
        let mut bind_count = 1;

        let status = match self.status {
            StatusFilter::All => None,
            StatusFilter::Only(status) => {
                bind_count += 1;
                where_clause.push_str(&format!(" AND status = ${}", bind_count));
                Some(status)
            }
        };

        let search_pattern = self.search.as_deref().map(|search| {
            bind_count += 1;
            where_clause.push_str(&format!(
                " AND (title ILIKE ${0} OR description ILIKE ${0})",
                bind_count
            ));
            format!("%{}%", escape_like(search))
        });

        TaskQuery {
            where_clause,
            status,
            search_pattern,
        }
    }
}

impl TaskQuery {
    /// WHERE clause text, owner clause first
    pub fn where_clause(&self) -> &str {
        &self.where_clause
    }

    /// Status bind value, when the filter restricts by status
    pub fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// `%`-wrapped, escaped ILIKE pattern, when the filter has a search term
    pub fn search_pattern(&self) -> Option<&str> {
        self.search_pattern.as_deref()
    }
}

/// Escapes LIKE metacharacters so a search term matches literally
///
/// PostgreSQL treats backslash as the default LIKE escape character, so
/// `\`, `%` and `_` in user input are each prefixed with a backslash.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_clause_always_first() {
        let filters = [
            TaskFilter::default(),
            TaskFilter::from_params(Some("pending"), None).unwrap(),
            TaskFilter::from_params(None, Some("foo")).unwrap(),
            TaskFilter::from_params(Some("completed"), Some("foo")).unwrap(),
        ];

        for filter in filters {
            let query = filter.to_query();
            assert!(
                query.where_clause().starts_with("owner_id = $1"),
                "owner clause must lead: {}",
                query.where_clause()
            );
        }
    }

    #[test]
    fn test_empty_filter() {
        let query = TaskFilter::default().to_query();

        assert_eq!(query.where_clause(), "owner_id = $1");
        assert_eq!(query.status(), None);
        assert_eq!(query.search_pattern(), None);
    }

    #[test]
    fn test_status_filter() {
        let filter = TaskFilter::from_params(Some("completed"), None).unwrap();
        let query = filter.to_query();

        assert_eq!(query.where_clause(), "owner_id = $1 AND status = $2");
        assert_eq!(query.status(), Some(TaskStatus::Completed));
        assert_eq!(query.search_pattern(), None);
    }

    #[test]
    fn test_all_sentinel_adds_no_status_clause() {
        for sentinel in [Some("all"), Some("ALL"), None] {
            let filter = TaskFilter::from_params(sentinel, None).unwrap();
            assert_eq!(filter.status, StatusFilter::All);
            assert_eq!(filter.to_query().where_clause(), "owner_id = $1");
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result = TaskFilter::from_params(Some("archived"), None);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("archived"));
    }

    #[test]
    fn test_search_filter() {
        let filter = TaskFilter::from_params(None, Some("milk")).unwrap();
        let query = filter.to_query();

        assert_eq!(
            query.where_clause(),
            "owner_id = $1 AND (title ILIKE $2 OR description ILIKE $2)"
        );
        assert_eq!(query.search_pattern(), Some("%milk%"));
    }

    #[test]
    fn test_status_and_search_combined() {
        let filter = TaskFilter::from_params(Some("pending"), Some("milk")).unwrap();
        let query = filter.to_query();

        assert_eq!(
            query.where_clause(),
            "owner_id = $1 AND status = $2 AND (title ILIKE $3 OR description ILIKE $3)"
        );
        assert_eq!(query.status(), Some(TaskStatus::Pending));
        assert_eq!(query.search_pattern(), Some("%milk%"));
    }

    #[test]
    fn test_blank_search_treated_as_absent() {
        for search in [Some(""), Some("   "), Some("\t\n"), None] {
            let filter = TaskFilter::from_params(None, search).unwrap();
            assert_eq!(filter.search, None);
            assert_eq!(filter.to_query().where_clause(), "owner_id = $1");
        }
    }

    #[test]
    fn test_search_is_trimmed() {
        let filter = TaskFilter::from_params(None, Some("  milk  ")).unwrap();
        assert_eq!(filter.to_query().search_pattern(), Some("%milk%"));
    }

    #[test]
    fn test_search_escapes_like_metacharacters() {
        let filter = TaskFilter::from_params(None, Some("50%_done\\now")).unwrap();
        let query = filter.to_query();

        assert_eq!(query.search_pattern(), Some("%50\\%\\_done\\\\now%"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
