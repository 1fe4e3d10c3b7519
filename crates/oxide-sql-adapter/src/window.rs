//! Row windows for statements the engine cannot paginate itself.
//!
//! A [`QueryWindow`] is passed by value into each execute call and dropped
//! when the call returns, so a limit or offset can never leak into the next
//! statement.

/// Upper bound on the rows a window returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// At most this many rows.
    Rows(usize),
    /// Every row from the offset onwards.
    Unbounded,
}

/// Optional limit and offset applied to a full result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryWindow {
    /// Row limit; `None` means unset.
    pub limit: Option<Limit>,
    /// Rows to skip; `None` means 0.
    pub offset: Option<usize>,
}

impl QueryWindow {
    /// Creates an unset window.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            limit: None,
            offset: None,
        }
    }

    /// Builds a window from ORM-style limit/offset options.
    ///
    /// A limit of `-1` is unbounded; any other negative limit selects no
    /// rows. Negative offsets clamp to 0.
    #[must_use]
    pub fn from_options(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = limit.map(|n| match n {
            -1 => Limit::Unbounded,
            n => Limit::Rows(usize::try_from(n).unwrap_or(0)),
        });
        let offset = offset.map(|n| usize::try_from(n).unwrap_or(0));
        Self { limit, offset }
    }

    /// Sets the row limit.
    #[must_use]
    pub const fn limit(mut self, rows: usize) -> Self {
        self.limit = Some(Limit::Rows(rows));
        self
    }

    /// Removes any upper bound.
    #[must_use]
    pub const fn unbounded(mut self) -> Self {
        self.limit = Some(Limit::Unbounded);
        self
    }

    /// Sets the offset.
    #[must_use]
    pub const fn offset(mut self, rows: usize) -> Self {
        self.offset = Some(rows);
        self
    }

    /// Returns true when neither limit nor offset is set.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }

    /// Sets the limit only if none is set yet.
    #[must_use]
    pub fn or_limit(mut self, rows: usize) -> Self {
        self.limit.get_or_insert(Limit::Rows(rows));
        self
    }

    /// Applies the window to a full, ordered result set.
    ///
    /// Returns the half-open slice `[offset, offset + limit)`; a window past
    /// the end yields no rows.
    #[must_use]
    pub fn apply<T>(self, rows: Vec<T>) -> Vec<T> {
        let offset = self.offset.unwrap_or(0);
        let rows = rows.into_iter().skip(offset);
        match self.limit {
            None | Some(Limit::Unbounded) => rows.collect(),
            Some(Limit::Rows(n)) => rows.take(n).collect(),
        }
    }
}
