use crate::ScoutError;

/// Number of job listings a search may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimit(usize);

impl SearchLimit {
    pub const DEFAULT: SearchLimit = SearchLimit(25);
    pub const MAX: usize = 100;

    pub fn new(limit: usize) -> Result<Self, ScoutError> {
        if limit == 0 || limit > Self::MAX {
            return Err(ScoutError::invalid_parameter(
                "limit",
                format!("limit must be between 1 and {}, got {limit}", Self::MAX),
            ));
        }
        Ok(Self(limit))
    }

    /// Parses caller text; `None` or blank input means [`SearchLimit::DEFAULT`].
    pub fn parse(raw: Option<&str>) -> Result<Self, ScoutError> {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(Self::DEFAULT);
        };
        let limit = raw.parse::<usize>().map_err(|_| {
            ScoutError::invalid_parameter("limit", format!("limit must be a number, got {raw:?}"))
        })?;
        Self::new(limit)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for SearchLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSearchQuery {
    pub keywords: String,
    pub location: Option<String>,
    pub limit: SearchLimit,
}

impl JobSearchQuery {
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location: None,
            limit: SearchLimit::DEFAULT,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_limit(mut self, limit: SearchLimit) -> Self {
        self.limit = limit;
        self
    }
}
