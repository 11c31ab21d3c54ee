//! "One spec or a list of specs" carrier.
//!
//! Shapes, dtypes, exact lengths and class sets can all be given either as a single
//! acceptable value or as a list meaning "any one of these". [`OneOrMany`] keeps that
//! distinction (messages are worded differently) and provides the single
//! any-candidate-matches combinator every check reuses.

use serde::{Deserialize, Serialize};

use crate::dtype::{DType, DTypeFamily, DTypeSpec};
use crate::value::TypeClass;

/// A single candidate or a list of alternative candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// All candidates, in the order given.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(item) => core::slice::from_ref(item),
            OneOrMany::Many(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// True when given as a list, even a list of one.
    pub fn is_list(&self) -> bool {
        matches!(self, OneOrMany::Many(_))
    }

    /// Whether any candidate satisfies `pred`. Stops at the first match.
    pub fn any_match<F>(&self, pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.as_slice().iter().any(pred)
    }

    /// Fallible variant of [`any_match`](Self::any_match): the first error aborts the
    /// search and is returned unchanged.
    pub fn try_any_match<E, F>(&self, mut pred: F) -> Result<bool, E>
    where
        F: FnMut(&T) -> Result<bool, E>,
    {
        for candidate in self.as_slice() {
            if pred(candidate)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        OneOrMany::Many(items)
    }
}

impl<T, const N: usize> From<[T; N]> for OneOrMany<T> {
    fn from(items: [T; N]) -> Self {
        OneOrMany::Many(items.into())
    }
}

macro_rules! impl_single {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for OneOrMany<$ty> {
                fn from(item: $ty) -> Self {
                    OneOrMany::One(item)
                }
            }
        )*
    };
}

impl_single!(usize, TypeClass, DTypeSpec);

impl From<DType> for OneOrMany<DTypeSpec> {
    fn from(dtype: DType) -> Self {
        OneOrMany::One(dtype.into())
    }
}

impl From<DTypeFamily> for OneOrMany<DTypeSpec> {
    fn from(family: DTypeFamily) -> Self {
        OneOrMany::One(family.into())
    }
}

impl<const N: usize> From<[DType; N]> for OneOrMany<DTypeSpec> {
    fn from(dtypes: [DType; N]) -> Self {
        OneOrMany::Many(dtypes.into_iter().map(DTypeSpec::from).collect())
    }
}

impl<const N: usize> From<[DTypeFamily; N]> for OneOrMany<DTypeSpec> {
    fn from(families: [DTypeFamily; N]) -> Self {
        OneOrMany::Many(families.into_iter().map(DTypeSpec::from).collect())
    }
}

impl From<&[TypeClass]> for OneOrMany<TypeClass> {
    fn from(classes: &[TypeClass]) -> Self {
        OneOrMany::Many(classes.to_vec())
    }
}
