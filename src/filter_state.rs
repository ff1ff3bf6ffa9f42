use crate::category::{Category, CategoryFilter};
use crate::history::{History, ListenerId, Location};
use std::marker::PhantomData;

pub const SEARCH_PARAM: &str = "search";
pub const TYPE_PARAM: &str = "type";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<C> {
    pub search_text: String,
    pub category: CategoryFilter<C>,
}

impl<C> Default for FilterState<C> {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: CategoryFilter::All,
        }
    }
}

impl<C: Category> FilterState<C> {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            category: CategoryFilter::All,
        }
    }

    pub fn is_default(&self) -> bool {
        self.search_text.is_empty() && self.category.is_default()
    }
}

/// How a write lands in the session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Replace,
    Push,
}

/// Reads and writes [`FilterState`] through the query string of the current
/// location. It holds no copy of the state: every read goes back to the location.
#[derive(Debug, Clone)]
pub struct FilterStateManager<C> {
    search_param: &'static str,
    type_param: &'static str,
    search_mode: HistoryMode,
    category_mode: HistoryMode,
    _category: PhantomData<C>,
}

impl<C: Category> Default for FilterStateManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> FilterStateManager<C> {
    pub fn new() -> Self {
        Self {
            search_param: SEARCH_PARAM,
            type_param: TYPE_PARAM,
            search_mode: HistoryMode::Replace,
            category_mode: HistoryMode::Push,
            _category: PhantomData,
        }
    }

    pub fn with_history_modes(mut self, search: HistoryMode, category: HistoryMode) -> Self {
        self.search_mode = search;
        self.category_mode = category;
        self
    }

    pub fn get_state(&self, location: &Location) -> FilterState<C> {
        FilterState {
            search_text: location
                .query
                .get(self.search_param)
                .unwrap_or_default()
                .to_string(),
            category: CategoryFilter::parse_lenient(location.query.get(self.type_param)),
        }
    }

    pub fn set_search_text(&self, history: &mut History, text: &str) {
        let state = FilterState {
            search_text: text.to_string(),
            ..self.get_state(history.current())
        };
        self.write(history, &state, self.search_mode);
    }

    /// Unknown tokens are replaced by `all`; see [`CategoryFilter::parse_lenient`].
    pub fn set_category(&self, history: &mut History, raw: &str) {
        self.set_category_filter(history, CategoryFilter::parse_lenient(Some(raw)));
    }

    pub fn set_category_filter(&self, history: &mut History, category: CategoryFilter<C>) {
        let state = FilterState {
            category,
            ..self.get_state(history.current())
        };
        self.write(history, &state, self.category_mode);
    }

    pub fn clear(&self, history: &mut History) {
        self.write(history, &FilterState::default(), self.category_mode);
    }

    /// Location carrying `state`, with defaults omitted and unrelated parameters kept.
    pub fn location_for(&self, base: &Location, state: &FilterState<C>) -> Location {
        let mut query = base.query.clone();
        if state.search_text.is_empty() {
            query.remove(self.search_param);
        } else {
            query.set(self.search_param, &state.search_text);
        }
        if state.category.is_default() {
            query.remove(self.type_param);
        } else {
            query.set(self.type_param, state.category.token());
        }
        base.with_query(query)
    }

    fn write(&self, history: &mut History, state: &FilterState<C>, mode: HistoryMode) {
        let next = self.location_for(history.current(), state);
        if next == *history.current() {
            return;
        }
        match mode {
            HistoryMode::Replace => history.replace(next),
            HistoryMode::Push => history.push(next),
        }
    }

    /// Calls `on_change` with a freshly derived state after every navigation.
    pub fn watch(
        &self,
        history: &mut History,
        mut on_change: impl FnMut(FilterState<C>) + 'static,
    ) -> ListenerId {
        let manager = self.clone();
        history.subscribe(move |location| on_change(manager.get_state(location)))
    }
}
