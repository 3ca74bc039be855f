//! Request DTOs for the best stories API
//!
//! Defines validation for incoming request parameters.

/// Parameters of `GET /getbeststories/:count`.
#[derive(Debug, Clone, Copy)]
pub struct BestStoriesRequest {
    /// Number of stories requested
    pub count: i64,
}

impl BestStoriesRequest {
    /// Validates the request against the configured cache size.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, cache_max_size: usize) -> Option<String> {
        let in_range = usize::try_from(self.count)
            .map(|count| (1..=cache_max_size).contains(&count))
            .unwrap_or(false);

        if in_range {
            None
        } else {
            Some(format!(
                "Specify number of best stories to fetch between 1 and {}",
                cache_max_size
            ))
        }
    }
}
