use crate::query::QueryString;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: QueryString,
}

impl Location {
    /// Accepts a path with an optional query (`/legislation?type=ordinance`);
    /// a `#fragment` is ignored.
    pub fn parse(href: &str) -> Self {
        let href = href.trim();
        let href = href.split_once('#').map_or(href, |(before, _)| before);
        let (path, query) = match href.split_once('?') {
            Some((path, query)) => (path, QueryString::parse(query)),
            None => (href, QueryString::default()),
        };
        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self { path, query }
    }

    pub fn with_query(&self, query: QueryString) -> Self {
        Self {
            path: self.path.clone(),
            query,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path, self.query.to_query())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Location)>;

/// Browser-style session history: a list of locations and a cursor.
pub struct History {
    entries: Vec<Location>,
    index: usize,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl History {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            listeners: Vec::new(),
            next_listener_id: 1,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds an entry after the cursor; forward entries are dropped.
    pub fn push(&mut self, location: Location) {
        if self.index + 1 < self.entries.len() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(location);
        self.index += 1;
        tracing::debug!(href = %self.current(), "history push");
        self.notify();
    }

    pub fn replace(&mut self, location: Location) {
        self.entries[self.index] = location;
        tracing::debug!(href = %self.current(), "history replace");
        self.notify();
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        self.notify();
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        self.notify();
        true
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Location) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let location = &self.entries[self.index];
        for (_, listener) in self.listeners.iter_mut() {
            listener(location);
        }
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("entries", &self.entries)
            .field("index", &self.index)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
