//! Argument lists and the sequential `pick` resolution over them.
//!
//! An argument list is a `Cons`/`Nil` chain of [`Named`] values, in call
//! order. `pick` scans it from the front and stops at the first keyword that
//! matches; it does not care whether a keyword is repeated further down.

use crate::bit::{Bit, False, SameAs, True};
use crate::keyword::Named;

/// A non-empty list: a head followed by the rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cons<H, T>(pub H, pub T);

/// The empty list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Nil;

/// Length of a list, known at compile time.
pub trait ArgList {
    const LEN: usize;

    fn len(&self) -> usize {
        Self::LEN
    }

    fn is_empty(&self) -> bool {
        Self::LEN == 0
    }
}

impl ArgList for Nil {
    const LEN: usize = 0;
}

impl<H, T: ArgList> ArgList for Cons<H, T> {
    const LEN: usize = T::LEN + 1;
}

/// Removes the first value bound to `K` from the list.
#[diagnostic::on_unimplemented(
    message = "keyword not found",
    label = "no argument is bound to this keyword"
)]
pub trait Pick<K> {
    type Value;
    /// The list without the picked entry.
    type Rest;

    fn pick(self) -> (Self::Value, Self::Rest);
}

#[doc(hidden)]
pub trait PickAt<K, Found> {
    type Value;
    type Rest;

    fn pick_at(self) -> (Self::Value, Self::Rest);
}

impl<K, Kh, V, T> Pick<K> for Cons<Named<Kh, V>, T>
where
    K: SameAs<Kh>,
    Self: PickAt<K, <K as SameAs<Kh>>::Output>,
{
    type Value = <Self as PickAt<K, <K as SameAs<Kh>>::Output>>::Value;
    type Rest = <Self as PickAt<K, <K as SameAs<Kh>>::Output>>::Rest;

    fn pick(self) -> (Self::Value, Self::Rest) {
        self.pick_at()
    }
}

impl<K, Kh, V, T> PickAt<K, True> for Cons<Named<Kh, V>, T> {
    type Value = V;
    type Rest = T;

    fn pick_at(self) -> (V, T) {
        (self.0.value, self.1)
    }
}

impl<K, H, T: Pick<K>> PickAt<K, False> for Cons<H, T> {
    type Value = T::Value;
    type Rest = Cons<H, T::Rest>;

    fn pick_at(self) -> (Self::Value, Self::Rest) {
        let (value, rest) = self.1.pick();
        (value, Cons(self.0, rest))
    }
}

/// Removes the first value bound to `K`, or yields `D` when there is none.
pub trait PickOr<K, D> {
    type Value;
    /// The list without the picked entry; the whole list if the default was
    /// used.
    type Rest;

    fn pick_or(self, default: D) -> (Self::Value, Self::Rest);
}

#[doc(hidden)]
pub trait PickOrAt<K, D, Found> {
    type Value;
    type Rest;

    fn pick_or_at(self, default: D) -> (Self::Value, Self::Rest);
}

impl<K, D> PickOr<K, D> for Nil {
    type Value = D;
    type Rest = Nil;

    fn pick_or(self, default: D) -> (D, Nil) {
        (default, Nil)
    }
}

impl<K, D, Kh, V, T> PickOr<K, D> for Cons<Named<Kh, V>, T>
where
    K: SameAs<Kh>,
    Self: PickOrAt<K, D, <K as SameAs<Kh>>::Output>,
{
    type Value = <Self as PickOrAt<K, D, <K as SameAs<Kh>>::Output>>::Value;
    type Rest = <Self as PickOrAt<K, D, <K as SameAs<Kh>>::Output>>::Rest;

    fn pick_or(self, default: D) -> (Self::Value, Self::Rest) {
        self.pick_or_at(default)
    }
}

impl<K, D, Kh, V, T> PickOrAt<K, D, True> for Cons<Named<Kh, V>, T> {
    type Value = V;
    type Rest = T;

    fn pick_or_at(self, _default: D) -> (V, T) {
        (self.0.value, self.1)
    }
}

impl<K, D, H, T: PickOr<K, D>> PickOrAt<K, D, False> for Cons<H, T> {
    type Value = T::Value;
    type Rest = Cons<H, T::Rest>;

    fn pick_or_at(self, default: D) -> (Self::Value, Self::Rest) {
        let (value, rest) = self.1.pick_or(default);
        (value, Cons(self.0, rest))
    }
}

/// Satisfied by the empty list only: every argument has been consumed.
///
/// ```compile_fail,E0277
/// use kwparams::*;
///
/// #[named_args]
/// fn area(width: u32, height: u32) -> u32 { width * height }
///
/// area(args!{ width: 2, height: 3, depth: 4 });
/// ```
#[diagnostic::on_unimplemented(
    message = "unexpected keyword argument",
    label = "some arguments are left over after all parameters were resolved",
    note = "each keyword may be passed once and must name a parameter"
)]
pub trait Exhausted {}

impl Exhausted for Nil {}

/// Type-level membership test: `Output` is [`True`] iff some entry of the
/// list is bound to `K`.
pub trait Contains<K> {
    type Output: Bit;
}

#[doc(hidden)]
pub trait ContainsAt<K, Found> {
    type Output: Bit;
}

impl<K> Contains<K> for Nil {
    type Output = False;
}

impl<K, Kh, V, T> Contains<K> for Cons<Named<Kh, V>, T>
where
    K: SameAs<Kh>,
    Self: ContainsAt<K, <K as SameAs<Kh>>::Output>,
{
    type Output = <Self as ContainsAt<K, <K as SameAs<Kh>>::Output>>::Output;
}

impl<K, H, T> ContainsAt<K, True> for Cons<H, T> {
    type Output = True;
}

impl<K, H, T: Contains<K>> ContainsAt<K, False> for Cons<H, T> {
    type Output = T::Output;
}

/// Returns the value of the first argument bound to `seed`, moving it out
/// of `args`.
///
/// A missing keyword does not compile:
///
/// ```compile_fail,E0277
/// use kwparams::*;
///
/// let width: u32 = pick(kw!(width), args!{ height: 600_u32, depth: 2_u32 });
/// ```
pub fn pick<K, L: Pick<K>>(seed: K, args: L) -> L::Value {
    let _ = seed;
    args.pick().0
}

/// Like [`pick`], but returns `default` unchanged when no argument is bound
/// to `seed`.
pub fn pick_default<K, D, L: PickOr<K, D>>(seed: K, default: D, args: L) -> L::Value {
    let _ = seed;
    args.pick_or(default).0
}

/// Builds a `Cons`/`Nil` list out of the given expressions, in order.
#[doc(hidden)]
#[macro_export]
macro_rules! list {
    () => { $crate::Nil };
    ($head:expr $(, $tail:expr)* $(,)?) => {
        $crate::Cons($head, $crate::list!($($tail),*))
    };
}

/// `pick!(seed, named0, named1, ..)` is `pick(seed, args)` over the list
/// `named0, named1, ..`.
#[macro_export]
macro_rules! pick {
    ($seed:expr $(, $named:expr)* $(,)?) => {
        $crate::pick($seed, $crate::list!($($named),*))
    };
}

/// `pick_default!(seed, default, named0, ..)` is
/// `pick_default(seed, default, args)` over the list `named0, ..`.
#[macro_export]
macro_rules! pick_default {
    ($seed:expr, $default:expr $(, $named:expr)* $(,)?) => {
        $crate::pick_default($seed, $default, $crate::list!($($named),*))
    };
}
