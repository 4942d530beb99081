//! The behaviour carried by a node: a transform or a fixed state.

use std::fmt;

/// Boxed state transform stored in a [`Transaction::Transform`].
pub type Transform<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// What a node does to the state flowing through it.
///
/// The set of behaviours is closed: a node either transforms its input or
/// discards it and yields a constant. The constant variant is how a chain is
/// seeded with a known starting state, and placed mid-chain it resets the
/// state regardless of upstream history.
///
/// # Example
///
/// ```rust
/// use transaction_tree::core::Transaction;
///
/// let double = Transaction::new(|x: i32| x * 2);
/// let reset = Transaction::fixed(10);
///
/// assert_eq!(double.apply(21), 42);
/// assert_eq!(reset.apply(21), 10);
/// assert_eq!(reset.fixed_state(), Some(&10));
/// ```
pub enum Transaction<T> {
    /// Applies the stored function to the incoming state.
    Transform(Transform<T>),

    /// Ignores the incoming state and yields a clone of the stored one.
    Fixed(T),
}

impl<T> Transaction<T> {
    /// Create a transaction from a transform function.
    ///
    /// The function is treated as opaque. It must not expect to observe or
    /// change the tree it lives in; it only ever sees the state.
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Transaction::Transform(Box::new(transform))
    }

    /// Create a transaction that always yields `state`.
    pub fn fixed(state: T) -> Self {
        Transaction::Fixed(state)
    }

    /// Apply this transaction to the state.
    ///
    /// A panic raised by a transform is not caught here.
    pub fn apply(&self, state: T) -> T
    where
        T: Clone,
    {
        match self {
            Self::Transform(transform) => transform(state),
            Self::Fixed(fixed) => fixed.clone(),
        }
    }

    /// The constant of a fixed-state transaction, `None` for transforms.
    pub fn fixed_state(&self) -> Option<&T> {
        match self {
            Self::Fixed(state) => Some(state),
            Self::Transform(_) => None,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

impl<T: fmt::Debug> fmt::Debug for Transaction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transform(_) => f.write_str("Transform(..)"),
            Self::Fixed(state) => f.debug_tuple("Fixed").field(state).finish(),
        }
    }
}

impl<T> From<T> for Transaction<T> {
    fn from(state: T) -> Self {
        Transaction::fixed(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Door {
        Open,
        Closed,
        Locked,
    }

    #[test]
    fn transform_applies_function() {
        let close = Transaction::new(|door: Door| match door {
            Door::Open => Door::Closed,
            other => other,
        });

        assert_eq!(close.apply(Door::Open), Door::Closed);
        assert_eq!(close.apply(Door::Locked), Door::Locked);
    }

    #[test]
    fn fixed_ignores_input() {
        let lock = Transaction::fixed(Door::Locked);

        assert_eq!(lock.apply(Door::Open), Door::Locked);
        assert_eq!(lock.apply(Door::Closed), Door::Locked);
        assert_eq!(lock.apply(Door::Locked), Door::Locked);
    }

    #[test]
    fn fixed_state_only_for_fixed_transactions() {
        let fixed = Transaction::fixed(Door::Open);
        let transform = Transaction::new(|door: Door| door);

        assert_eq!(fixed.fixed_state(), Some(&Door::Open));
        assert!(fixed.is_fixed());
        assert!(transform.fixed_state().is_none());
        assert!(!transform.is_fixed());
    }

    #[test]
    fn apply_is_repeatable() {
        let increment = Transaction::new(|x: u64| x + 1);

        assert_eq!(increment.apply(1), 2);
        assert_eq!(increment.apply(1), 2);
    }

    #[test]
    fn debug_hides_closure() {
        let transform = Transaction::new(|x: i32| x);
        let fixed = Transaction::fixed(5);

        assert_eq!(format!("{transform:?}"), "Transform(..)");
        assert_eq!(format!("{fixed:?}"), "Fixed(5)");
    }

    #[test]
    fn state_converts_into_fixed() {
        let transaction: Transaction<i32> = 9.into();
        assert_eq!(transaction.fixed_state(), Some(&9));
    }
}
