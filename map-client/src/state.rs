use crate::models::LocationResult;

/// Where the search UI is. One variant at a time, so "loading with an error"
/// or "selection without results" cannot be represented.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching {
        query: String,
    },
    /// At least one result. `selected` indexes into `results`.
    Displayed {
        results: Vec<LocationResult>,
        selected: Option<usize>,
    },
    /// The search succeeded with no results.
    Empty,
    Errored {
        message: String,
    },
}

impl SearchState {
    /// Current results; empty unless [`SearchState::Displayed`].
    pub fn results(&self) -> &[LocationResult] {
        match self {
            SearchState::Displayed { results, .. } => results,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<&LocationResult> {
        match self {
            SearchState::Displayed {
                results,
                selected: Some(i),
            } => results.get(*i),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchState::Errored { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching { .. })
    }

    /// Builds the post-search state from a result list.
    pub fn from_results(results: Vec<LocationResult>) -> Self {
        if results.is_empty() {
            SearchState::Empty
        } else {
            SearchState::Displayed {
                results,
                selected: None,
            }
        }
    }
}
