//! Validated type for error accumulation.
//!
//! Unlike `Result`, `Validated` keeps every failure when two validations are
//! combined with [`Validated::concat`] or [`Validated::map2`].
//!
//! # Examples
//!
//! ```rust
//! use focal::validation::Validated;
//!
//! let first: Validated<&str, i32> = Validated::failure("error 1");
//! let second: Validated<&str, i32> = Validated::failure("error 2");
//!
//! // Both errors are accumulated
//! assert_eq!(first.concat(second).errors(), ["error 1", "error 2"]);
//! ```

/// A validation result that accumulates errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated<E, A> {
    /// A successful validation result.
    Success(A),
    /// A failed validation with accumulated errors, in the order they were
    /// found.
    Failure(Vec<E>),
}

impl<E, A> Validated<E, A> {
    /// Creates a successful result.
    #[must_use]
    pub const fn success(value: A) -> Self {
        Self::Success(value)
    }

    /// Creates a failed result with a single error.
    #[must_use]
    pub fn failure(error: E) -> Self {
        Self::Failure(vec![error])
    }

    /// Returns true if this is a successful result.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if this is a failed result.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the errors, empty on success.
    #[must_use]
    pub fn errors(&self) -> &[E] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(errors) => errors,
        }
    }

    /// Combines two validations, keeping every failure.
    ///
    /// Failures are concatenated left then right. When both sides succeed the
    /// left value is kept.
    #[must_use]
    pub fn concat(self, other: Self) -> Self {
        match (self, other) {
            (Self::Failure(mut left), Self::Failure(right)) => {
                left.extend(right);
                Self::Failure(left)
            }
            (Self::Failure(errors), Self::Success(_)) | (Self::Success(_), Self::Failure(errors)) => {
                Self::Failure(errors)
            }
            (success @ Self::Success(_), Self::Success(_)) => success,
        }
    }

    /// Transforms the successful value.
    pub fn map<B, F>(self, function: F) -> Validated<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Success(value) => Validated::Success(function(value)),
            Self::Failure(errors) => Validated::Failure(errors),
        }
    }

    /// Combines two successful values, accumulating errors otherwise.
    pub fn map2<B, C, F>(self, other: Validated<E, B>, function: F) -> Validated<E, C>
    where
        F: FnOnce(A, B) -> C,
    {
        match (self, other) {
            (Self::Success(a), Validated::Success(b)) => Validated::Success(function(a, b)),
            (Self::Failure(mut left), Validated::Failure(right)) => {
                left.extend(right);
                Validated::Failure(left)
            }
            (Self::Failure(errors), Validated::Success(_))
            | (Self::Success(_), Validated::Failure(errors)) => Validated::Failure(errors),
        }
    }

    /// Dispatches on the two cases.
    pub fn match_with<R>(
        self,
        on_failure: impl FnOnce(Vec<E>) -> R,
        on_success: impl FnOnce(A) -> R,
    ) -> R {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(errors) => on_failure(errors),
        }
    }

    /// Converts to an Option, discarding errors.
    #[must_use]
    pub fn to_option(self) -> Option<A> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Converts to a Result.
    ///
    /// # Errors
    ///
    /// Returns `Err` with every accumulated error if this is a failure.
    pub fn into_result(self) -> Result<A, Vec<E>> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(errors) => Err(errors),
        }
    }

    /// Lifts a `Result` with a single error.
    pub fn from_result(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::failure(error),
        }
    }
}

impl<E, A> From<Validated<E, A>> for Result<A, Vec<E>> {
    fn from(validated: Validated<E, A>) -> Self {
        validated.into_result()
    }
}

/// Collects every success, or every error of every failure.
impl<E, A> FromIterator<Validated<E, A>> for Validated<E, Vec<A>> {
    fn from_iter<I: IntoIterator<Item = Validated<E, A>>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::Success(Vec::new()), |accumulated, item| {
                accumulated.map2(item, |mut values, value| {
                    values.push(value);
                    values
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // Constructor Tests
    // =========================================================================

    #[rstest]
    fn success_has_no_errors() {
        let validated: Validated<String, i32> = Validated::success(1);
        assert!(validated.is_success());
        assert!(validated.errors().is_empty());
    }

    #[rstest]
    fn failure_has_one_error() {
        let validated: Validated<&str, i32> = Validated::failure("bad");
        assert!(validated.is_failure());
        assert_eq!(validated.errors(), ["bad"]);
    }

    // =========================================================================
    // Combination Tests
    // =========================================================================

    #[rstest]
    #[case(Validated::success(1), Validated::success(2), Validated::success(1))]
    #[case(Validated::failure("a"), Validated::success(2), Validated::failure("a"))]
    #[case(Validated::success(1), Validated::failure("b"), Validated::failure("b"))]
    #[case(
        Validated::failure("a"),
        Validated::failure("b"),
        Validated::Failure(vec!["a", "b"])
    )]
    fn concat_table(
        #[case] left: Validated<&'static str, i32>,
        #[case] right: Validated<&'static str, i32>,
        #[case] expected: Validated<&'static str, i32>,
    ) {
        assert_eq!(left.concat(right), expected);
    }

    #[rstest]
    fn map2_adds_successes() {
        let sum = Validated::<&str, i32>::success(1).map2(Validated::success(2), |a, b| a + b);
        assert_eq!(sum, Validated::success(3));
    }

    #[rstest]
    fn match_with_dispatches() {
        let failed: Validated<&str, i32> = Validated::Failure(vec!["x", "y"]);
        assert_eq!(failed.match_with(|errors| errors.join(", "), |_| String::new()), "x, y");

        let succeeded: Validated<&str, i32> = Validated::success(5);
        assert_eq!(succeeded.match_with(|_| 0, |value| value * 2), 10);
    }

    #[rstest]
    fn collect_accumulates_all_errors() {
        let collected: Validated<&str, Vec<i32>> = vec![
            Validated::success(1),
            Validated::failure("two"),
            Validated::success(3),
            Validated::failure("four"),
        ]
        .into_iter()
        .collect();

        assert_eq!(collected, Validated::Failure(vec!["two", "four"]));
    }

    #[rstest]
    fn collect_keeps_order_of_successes() {
        let collected: Validated<&str, Vec<i32>> =
            (1..=3).map(Validated::success).collect();
        assert_eq!(collected, Validated::success(vec![1, 2, 3]));
    }

    #[rstest]
    fn result_conversions() {
        let validated: Validated<&str, i32> = Validated::from_result(Err("nope"));
        let result: Result<i32, Vec<&str>> = validated.into();
        assert_eq!(result, Err(vec!["nope"]));
        assert_eq!(Validated::<&str, i32>::success(2).to_option(), Some(2));
    }
}
