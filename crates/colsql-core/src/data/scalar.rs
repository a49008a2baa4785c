///
/// ScalarResult
///
/// Outcome of reading one column of one row.
///
/// `Absent` means the row does not exist; `Present(None)` means the row exists
/// and the column holds null (or is not used in this deployment).
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ScalarResult<T> {
    #[default]
    Absent,
    Present(Option<T>),
}

impl<T> ScalarResult<T> {
    pub const ABSENT: Self = Self::Absent;

    #[must_use]
    pub const fn row_exists(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Present(Some(value)) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Present(value) => value,
            Self::Absent => None,
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ScalarResult<U> {
        match self {
            Self::Absent => ScalarResult::Absent,
            Self::Present(value) => ScalarResult::Present(value.map(f)),
        }
    }
}
