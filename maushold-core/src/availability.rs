use crate::error::ApiError;

/// Result of a call to an optional collaborator.
///
/// Optional collaborators never raise; a failure is reported as
/// `Unavailable` with the reason so screens can render an explicit
/// "unavailable" state instead of guessing from an empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum Availability<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Availability<T> {
    #[must_use]
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Available(value),
            Err(err) => {
                log::warn!("optional collaborator unavailable: {err}");
                Self::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    #[must_use]
    pub fn available(self) -> Option<T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Availability<U> {
        match self {
            Self::Available(value) => Availability::Available(f(value)),
            Self::Unavailable { reason } => Availability::Unavailable { reason },
        }
    }
}

impl<T: Default> Availability<T> {
    /// Degrade to the empty value, e.g. an empty leaderboard.
    #[must_use]
    pub fn unwrap_or_default(self) -> T {
        self.available().unwrap_or_default()
    }
}

impl<T: Default> Default for Availability<T> {
    fn default() -> Self {
        Self::Available(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    #[test]
    fn failures_degrade_to_empty_with_reason() {
        let degraded: Availability<Vec<u32>> = Availability::from_result(Err(ApiError::Transport(
            TransportError(String::from("connection refused")),
        )));
        assert!(!degraded.is_available());
        assert!(degraded.reason().unwrap().contains("connection refused"));
        assert!(degraded.unwrap_or_default().is_empty());
    }

    #[test]
    fn map_preserves_reason() {
        let unavailable: Availability<Vec<u32>> = Availability::Unavailable {
            reason: String::from("HTTP 503"),
        };
        let mapped = unavailable.map(|v| v.len());
        assert_eq!(mapped.reason(), Some("HTTP 503"));
        assert_eq!(Availability::Available(vec![1, 2]).map(|v| v.len()), Availability::Available(2));
    }
}
