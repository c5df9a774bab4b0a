//! Type-level booleans and structural equality.
//!
//! Keywords are compared by the compiler, not at runtime. Every comparison
//! yields one of the two types [`True`] or [`False`], and the resolution
//! traits select their implementation by that result.

use crate::{Cons, Nil};

/// The type-level `true`. Also the `1` bit of an encoded symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct True;

/// The type-level `false`. Also the `0` bit of an encoded symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct False;

/// A type-level boolean.
pub trait Bit {
    const VALUE: bool;
}

impl Bit for True {
    const VALUE: bool = true;
}

impl Bit for False {
    const VALUE: bool = false;
}

/// Type-level conjunction.
pub trait And<Rhs: Bit>: Bit {
    type Output: Bit;
}

impl<Rhs: Bit> And<Rhs> for True {
    type Output = Rhs;
}

impl<Rhs: Bit> And<Rhs> for False {
    type Output = False;
}

/// Type-level disjunction.
pub trait Or<Rhs: Bit>: Bit {
    type Output: Bit;
}

impl<Rhs: Bit> Or<Rhs> for True {
    type Output = True;
}

impl<Rhs: Bit> Or<Rhs> for False {
    type Output = Rhs;
}

/// Structural type equality: `Output` is [`True`] iff `Self` and `Rhs` are
/// built the same way out of bits and lists.
pub trait SameAs<Rhs> {
    type Output: Bit;
}

impl SameAs<True> for True {
    type Output = True;
}

impl SameAs<False> for True {
    type Output = False;
}

impl SameAs<True> for False {
    type Output = False;
}

impl SameAs<False> for False {
    type Output = True;
}

impl SameAs<Nil> for Nil {
    type Output = True;
}

impl<H, T> SameAs<Cons<H, T>> for Nil {
    type Output = False;
}

impl<H, T> SameAs<Nil> for Cons<H, T> {
    type Output = False;
}

impl<H1, T1, H2, T2> SameAs<Cons<H2, T2>> for Cons<H1, T1>
where
    H1: SameAs<H2>,
    T1: SameAs<T2>,
    <H1 as SameAs<H2>>::Output: And<<T1 as SameAs<T2>>::Output>,
{
    type Output = <<H1 as SameAs<H2>>::Output as And<<T1 as SameAs<T2>>::Output>>::Output;
}

/// Satisfied by [`False`] only. Used to turn a type-level `false` into a
/// trait bound. Only the uniqueness check of the container needs this.
#[diagnostic::on_unimplemented(message = "keyword specified twice")]
pub trait IsFalse: Bit {}

impl IsFalse for False {}

/// Satisfied by [`True`] only. Container lookups require the keyword to be a
/// member through this bound.
#[diagnostic::on_unimplemented(
    message = "keyword not found",
    label = "no argument is bound to this keyword"
)]
pub trait IsTrue: Bit {}

impl IsTrue for True {}

#[cfg(test)]
mod tests {
    use super::*;

    fn same<A: SameAs<B>, B>() -> bool {
        <<A as SameAs<B>>::Output as Bit>::VALUE
    }

    #[test]
    fn bits() {
        assert!(same::<True, True>());
        assert!(same::<False, False>());
        assert!(!same::<True, False>());
        assert!(!<<True as And<False>>::Output as Bit>::VALUE);
        assert!(<<False as Or<True>>::Output as Bit>::VALUE);
    }

    #[test]
    fn lists() {
        type A = Cons<True, Cons<False, Nil>>;
        type B = Cons<True, Cons<True, Nil>>;
        type C = Cons<True, Nil>;
        assert!(same::<A, A>());
        assert!(!same::<A, B>());
        assert!(!same::<A, C>());
        assert!(!same::<C, A>());
        assert!(same::<Nil, Nil>());
    }
}
