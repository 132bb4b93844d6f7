//! Reusable handler sets for [`Outcome`] values.

use std::fmt;

use crate::error::{Error, Failure};

use super::Outcome;

type OkHandler<'h, T> = Box<dyn FnMut(&T) + 'h>;
type SpecificHandler<'h> = Box<dyn FnMut(&Error) -> bool + 'h>;
type GenericHandler<'h> = Box<dyn FnMut(&Error) + 'h>;
type FallbackHandler<'h> = Box<dyn FnMut() + 'h>;

/// A builder of handlers dispatched on an [`Outcome`].
///
/// Dispatch order on failure: handlers registered with
/// [`on_error_of`](Self::on_error_of) are tried first, in registration order,
/// and the first whose failure type matches wins. Otherwise the first handler
/// registered with [`on_error`](Self::on_error) runs. If nothing handled the
/// outcome (including a success with no [`on_ok`](Self::on_ok) handler), the
/// fallback runs.
///
/// A matcher can be reused for any number of outcomes.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use unifunc::error::{Error, InvalidCast};
/// use unifunc::outcome::{Outcome, OutcomeMatcher};
///
/// let log = RefCell::new(Vec::new());
/// let mut matcher = OutcomeMatcher::<i32>::new()
///     .on_error(|error| log.borrow_mut().push(format!("generic: {error}")))
///     .on_error_of::<InvalidCast>(|_| log.borrow_mut().push("cast".to_string()));
///
/// matcher.match_outcome(&Outcome::fail(InvalidCast));
/// matcher.match_outcome(&Outcome::fail(Error::new("io")));
/// assert_eq!(*log.borrow(), vec!["cast", "generic: io"]);
/// ```
pub struct OutcomeMatcher<'h, T> {
    on_ok: Option<OkHandler<'h, T>>,
    specific: Vec<SpecificHandler<'h>>,
    generic: Vec<GenericHandler<'h>>,
    fallback: Option<FallbackHandler<'h>>,
}

impl<'h, T> OutcomeMatcher<'h, T> {
    /// Creates a matcher with no handlers.
    pub fn new() -> Self {
        Self {
            on_ok: None,
            specific: Vec::new(),
            generic: Vec::new(),
            fallback: None,
        }
    }

    /// Sets the success handler, replacing any previous one.
    #[must_use]
    pub fn on_ok(mut self, handler: impl FnMut(&T) + 'h) -> Self {
        self.on_ok = Some(Box::new(handler));
        self
    }

    /// Registers a handler for any failure.
    #[must_use]
    pub fn on_error(mut self, handler: impl FnMut(&Error) + 'h) -> Self {
        self.generic.push(Box::new(handler));
        self
    }

    /// Registers a handler for failures whose runtime type is `F`.
    #[must_use]
    pub fn on_error_of<F: Failure>(mut self, mut handler: impl FnMut(&F) + 'h) -> Self {
        self.specific.push(Box::new(move |error: &Error| {
            error
                .downcast_ref::<F>()
                .map(|failure| handler(failure))
                .is_some()
        }));
        self
    }

    /// Sets the handler run when nothing else matched.
    #[must_use]
    pub fn on_fallback(mut self, handler: impl FnMut() + 'h) -> Self {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Dispatches `outcome` to the handlers.
    ///
    /// Returns `true` if a success or error handler ran, `false` if the
    /// fallback ran or nothing applied.
    pub fn match_outcome(&mut self, outcome: &Outcome<T>) -> bool {
        let matched = match outcome {
            Outcome::Ok(value) => self.on_ok.as_mut().map(|handler| handler(value)).is_some(),
            Outcome::Fail(error) => self.dispatch_error(error),
        };

        if !matched {
            if let Some(fallback) = self.fallback.as_mut() {
                fallback();
            }
        }
        matched
    }

    fn dispatch_error(&mut self, error: &Error) -> bool {
        if self.specific.iter_mut().any(|handler| handler(error)) {
            return true;
        }
        self.generic
            .first_mut()
            .map(|handler| handler(error))
            .is_some()
    }
}

impl<T> Default for OutcomeMatcher<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for OutcomeMatcher<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("OutcomeMatcher")
            .field("on_ok", &self.on_ok.is_some())
            .field("specific", &self.specific.len())
            .field("generic", &self.generic.len())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

/// An [`OutcomeMatcher`] bound to one outcome; built by [`Outcome::matcher`].
#[derive(Debug)]
pub struct AutoMatcher<'o, 'h, T> {
    outcome: &'o Outcome<T>,
    matcher: OutcomeMatcher<'h, T>,
}

impl<'o, 'h, T> AutoMatcher<'o, 'h, T> {
    pub(super) const fn new(outcome: &'o Outcome<T>, matcher: OutcomeMatcher<'h, T>) -> Self {
        Self { outcome, matcher }
    }

    /// Dispatches the bound outcome; see [`OutcomeMatcher::match_outcome`].
    pub fn run(mut self) -> bool {
        self.matcher.match_outcome(self.outcome)
    }
}
