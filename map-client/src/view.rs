//! What a host draws for the current [`SearchState`].

use crate::state::SearchState;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultItemView {
    /// 1-based, matches the marker label.
    pub rank: usize,
    pub place_id: String,
    pub name: String,
    pub address: String,
    /// `"Zip/Postal Code: <code>"`, absent when the code is unknown.
    pub postal_line: Option<String>,
    /// `"<lat>, <lng>"` with 6 decimals.
    pub coordinates: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Loading,
    Error(String),
    NoResults,
}

impl StatusLine {
    pub fn text(&self) -> &str {
        match self {
            StatusLine::Loading => "Searching...",
            StatusLine::Error(message) => message,
            StatusLine::NoResults => "No results found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchView {
    pub status: Option<StatusLine>,
    pub items: Vec<ResultItemView>,
}

pub fn render(state: &SearchState) -> SearchView {
    match state {
        SearchState::Idle => SearchView::default(),
        SearchState::Searching { .. } => SearchView {
            status: Some(StatusLine::Loading),
            items: Vec::new(),
        },
        SearchState::Empty => SearchView {
            status: Some(StatusLine::NoResults),
            items: Vec::new(),
        },
        SearchState::Errored { message } => SearchView {
            status: Some(StatusLine::Error(message.clone())),
            items: Vec::new(),
        },
        SearchState::Displayed { results, selected } => SearchView {
            status: None,
            items: results
                .iter()
                .enumerate()
                .map(|(i, r)| ResultItemView {
                    rank: i + 1,
                    place_id: r.place_id.clone(),
                    name: r.name.clone(),
                    address: r.formatted_address.clone(),
                    postal_line: (!r.postal_code.is_empty())
                        .then(|| format!("Zip/Postal Code: {}", r.postal_code)),
                    coordinates: format!("{:.6}, {:.6}", r.latitude, r.longitude),
                    selected: *selected == Some(i),
                })
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationResult;

    fn eiffel() -> LocationResult {
        LocationResult {
            place_id: "eiffel".into(),
            name: "Eiffel Tower".into(),
            formatted_address: "Av. Gustave Eiffel, 75007 Paris, France".into(),
            latitude: 48.8584,
            longitude: 2.2945,
            postal_code: "75007".into(),
        }
    }

    #[test]
    fn displayed_item_lines() {
        let mut no_zip = eiffel();
        no_zip.place_id = "other".into();
        no_zip.postal_code.clear();

        let view = render(&SearchState::Displayed {
            results: vec![eiffel(), no_zip],
            selected: Some(0),
        });

        assert_eq!(view.status, None);
        let first = &view.items[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.postal_line.as_deref(), Some("Zip/Postal Code: 75007"));
        assert_eq!(first.coordinates, "48.858400, 2.294500");
        assert!(first.selected);

        assert_eq!(view.items[1].rank, 2);
        assert_eq!(view.items[1].postal_line, None);
        assert!(!view.items[1].selected);
    }

    #[test]
    fn status_lines() {
        let loading = render(&SearchState::Searching {
            query: "x".into(),
        });
        assert_eq!(loading.status.unwrap().text(), "Searching...");

        let empty = render(&SearchState::Empty);
        assert_eq!(empty.status.unwrap().text(), "No results found");
        assert!(empty.items.is_empty());

        let failed = render(&SearchState::Errored {
            message: "Search failed".into(),
        });
        assert_eq!(failed.status.unwrap().text(), "Search failed");

        assert_eq!(render(&SearchState::Idle), SearchView::default());
    }
}
