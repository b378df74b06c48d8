use crate::model::task::{Status, Task};

/// Status filter for the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Todo,
    Doing,
    Done,
}

impl StatusFilter {
    /// Parse a filter name as given on the command line
    pub fn parse(s: &str) -> Option<StatusFilter> {
        match s {
            "all" => Some(StatusFilter::All),
            "todo" => Some(StatusFilter::Todo),
            "doing" => Some(StatusFilter::Doing),
            "done" => Some(StatusFilter::Done),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Todo => "todo",
            StatusFilter::Doing => "doing",
            StatusFilter::Done => "done",
        }
    }

    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Todo => status == Status::Todo,
            StatusFilter::Doing => status == Status::Doing,
            StatusFilter::Done => status == Status::Done,
        }
    }

    /// Next filter in the TUI cycle: all → todo → doing → done → all
    pub fn cycled(self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Todo,
            StatusFilter::Todo => StatusFilter::Doing,
            StatusFilter::Doing => StatusFilter::Done,
            StatusFilter::Done => StatusFilter::All,
        }
    }
}

/// Derive the visible task list. A task is included when its title
/// contains the query case-insensitively (a blank query matches
/// everything) and its status passes the filter. Repository order is
/// preserved; the result is recomputed in full on every call.
pub fn project<'a>(tasks: &'a [Task], query: &str, filter: StatusFilter) -> Vec<&'a Task> {
    let query = query.trim().to_lowercase();
    tasks
        .iter()
        .filter(|t| filter.matches(t.status))
        .filter(|t| query.is_empty() || t.title.to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Task;
    use pretty_assertions::assert_eq;

    fn task(title: &str, status: Status) -> Task {
        let mut t = Task::new(title.into(), None, None, false);
        t.status = status;
        t
    }

    fn titles<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn blank_query_and_all_filter_match_everything() {
        let tasks = vec![
            task("Write report", Status::Todo),
            task("Email team", Status::Done),
        ];
        assert_eq!(project(&tasks, "", StatusFilter::All).len(), 2);
        assert_eq!(project(&tasks, "   ", StatusFilter::All).len(), 2);
    }

    #[test]
    fn query_matches_title_substring_case_insensitively() {
        let tasks = vec![
            task("Ship milestone one", Status::Todo),
            task("MILEAGE report", Status::Done),
            task("Email team", Status::Todo),
        ];
        let visible = project(&tasks, "mile", StatusFilter::All);
        assert_eq!(titles(&visible), vec!["Ship milestone one", "MILEAGE report"]);
    }

    #[test]
    fn status_filter_requires_exact_match() {
        let tasks = vec![
            task("a", Status::Todo),
            task("b", Status::Doing),
            task("c", Status::Done),
        ];
        assert_eq!(titles(&project(&tasks, "", StatusFilter::Done)), vec!["c"]);
        assert_eq!(titles(&project(&tasks, "", StatusFilter::Doing)), vec!["b"]);
    }

    #[test]
    fn both_conditions_must_hold() {
        let tasks = vec![
            task("mileage log", Status::Todo),
            task("milestone review", Status::Done),
        ];
        let visible = project(&tasks, "mile", StatusFilter::Done);
        assert_eq!(titles(&visible), vec!["milestone review"]);
    }

    #[test]
    fn order_is_preserved() {
        let tasks = vec![
            task("z last added first", Status::Todo),
            task("a added earlier", Status::Todo),
        ];
        let visible = project(&tasks, "", StatusFilter::All);
        assert_eq!(titles(&visible), vec!["z last added first", "a added earlier"]);
    }

    #[test]
    fn filter_cycle_wraps_around() {
        let mut f = StatusFilter::All;
        for _ in 0..4 {
            f = f.cycled();
        }
        assert_eq!(f, StatusFilter::All);
    }

    #[test]
    fn parse_accepts_only_known_names() {
        assert_eq!(StatusFilter::parse("done"), Some(StatusFilter::Done));
        assert_eq!(StatusFilter::parse("ALL"), None);
        assert_eq!(StatusFilter::parse("bogus"), None);
    }
}
