//! The keyword argument container.

use core::fmt;
use core::marker::PhantomData;

use crate::bit::{Bit, False, IsFalse, IsTrue, SameAs, True};
use crate::keyword::{Key, Named};
use crate::list::{ArgList, Cons, Contains, Nil};

/// Every keyword of the list appears once.
///
/// ```compile_fail,E0277
/// use kwparams::*;
///
/// let args = kwargs!{ a: 1, b: 2, a: 3 };
/// ```
#[diagnostic::on_unimplemented(
    message = "keyword specified twice",
    label = "the same keyword is bound more than once"
)]
pub trait Unique {}

impl Unique for Nil {}

impl<K, V, T> Unique for Cons<Named<K, V>, T>
where
    T: Unique + Contains<K>,
    <T as Contains<K>>::Output: IsFalse,
{
}

/// Borrows the value bound to `K`.
///
/// The empty list answers with itself, so `Value` is [`Nil`] when no entry is
/// bound to `K`. [`Kwargs::get`] rules that case out by requiring membership.
pub trait Lookup<K> {
    type Value;

    fn lookup(&self) -> &Self::Value;
    fn lookup_mut(&mut self) -> &mut Self::Value;
}

impl<K> Lookup<K> for Nil {
    type Value = Nil;

    fn lookup(&self) -> &Nil {
        self
    }

    fn lookup_mut(&mut self) -> &mut Nil {
        self
    }
}

#[doc(hidden)]
pub trait LookupAt<K, Found> {
    type Value;

    fn lookup_at(&self) -> &Self::Value;
    fn lookup_at_mut(&mut self) -> &mut Self::Value;
}

impl<K, Kh, V, T> Lookup<K> for Cons<Named<Kh, V>, T>
where
    K: SameAs<Kh>,
    Self: LookupAt<K, <K as SameAs<Kh>>::Output>,
{
    type Value = <Self as LookupAt<K, <K as SameAs<Kh>>::Output>>::Value;

    fn lookup(&self) -> &Self::Value {
        self.lookup_at()
    }

    fn lookup_mut(&mut self) -> &mut Self::Value {
        self.lookup_at_mut()
    }
}

impl<K, Kh, V, T> LookupAt<K, True> for Cons<Named<Kh, V>, T> {
    type Value = V;

    fn lookup_at(&self) -> &V {
        &self.0.value
    }

    fn lookup_at_mut(&mut self) -> &mut V {
        &mut self.0.value
    }
}

impl<K, H, T: Lookup<K>> LookupAt<K, False> for Cons<H, T> {
    type Value = T::Value;

    fn lookup_at(&self) -> &T::Value {
        self.1.lookup()
    }

    fn lookup_at_mut(&mut self) -> &mut T::Value {
        self.1.lookup_mut()
    }
}

/// Borrows the value bound to `K`, or passes `D` through when there is none.
pub trait LookupOr<'a, K, D> {
    type Output;

    fn lookup_or(&'a self, default: D) -> Self::Output;
}

#[doc(hidden)]
pub trait LookupOrAt<'a, K, D, Found> {
    type Output;

    fn lookup_or_at(&'a self, default: D) -> Self::Output;
}

impl<'a, K, D> LookupOr<'a, K, D> for Nil {
    type Output = D;

    fn lookup_or(&'a self, default: D) -> D {
        default
    }
}

impl<'a, K, D, Kh, V, T> LookupOr<'a, K, D> for Cons<Named<Kh, V>, T>
where
    K: SameAs<Kh>,
    Self: LookupOrAt<'a, K, D, <K as SameAs<Kh>>::Output>,
{
    type Output = <Self as LookupOrAt<'a, K, D, <K as SameAs<Kh>>::Output>>::Output;

    fn lookup_or(&'a self, default: D) -> Self::Output {
        self.lookup_or_at(default)
    }
}

impl<'a, K, D, Kh, V: 'a, T> LookupOrAt<'a, K, D, True> for Cons<Named<Kh, V>, T>
where
    Self: 'a,
{
    type Output = &'a V;

    fn lookup_or_at(&'a self, _default: D) -> &'a V {
        &self.0.value
    }
}

impl<'a, K, D, H, T> LookupOrAt<'a, K, D, False> for Cons<H, T>
where
    T: LookupOr<'a, K, D>,
    Self: 'a,
{
    type Output = T::Output;

    fn lookup_or_at(&'a self, default: D) -> T::Output {
        self.1.lookup_or(default)
    }
}

/// Receives the entries of a [`Kwargs`] whose value has type `V`.
///
/// Every `FnMut(&'static str, &V)` is a visitor. A struct can implement
/// `Visitor<V>` for several `V` to walk a container of mixed types.
pub trait Visitor<V: ?Sized> {
    fn visit(&mut self, keyword: &'static str, value: &V);
}

impl<V: ?Sized, F: FnMut(&'static str, &V)> Visitor<V> for F {
    fn visit(&mut self, keyword: &'static str, value: &V) {
        self(keyword, value)
    }
}

/// Like [`Visitor`], with mutable access to the values.
pub trait VisitorMut<V: ?Sized> {
    fn visit_mut(&mut self, keyword: &'static str, value: &mut V);
}

impl<V: ?Sized, F: FnMut(&'static str, &mut V)> VisitorMut<V> for F {
    fn visit_mut(&mut self, keyword: &'static str, value: &mut V) {
        self(keyword, value)
    }
}

/// Feeds every entry of a list to `F`, front to back.
pub trait Walk<F> {
    fn walk(&self, visitor: &mut F);
}

impl<F> Walk<F> for Nil {
    fn walk(&self, _visitor: &mut F) {}
}

impl<F, K: Key, V, T: Walk<F>> Walk<F> for Cons<Named<K, V>, T>
where
    F: Visitor<V>,
{
    fn walk(&self, visitor: &mut F) {
        visitor.visit(K::NAME, &self.0.value);
        self.1.walk(visitor);
    }
}

/// Feeds every entry of a list to `F` mutably, front to back.
pub trait WalkMut<F> {
    fn walk_mut(&mut self, visitor: &mut F);
}

impl<F> WalkMut<F> for Nil {
    fn walk_mut(&mut self, _visitor: &mut F) {}
}

impl<F, K: Key, V, T: WalkMut<F>> WalkMut<F> for Cons<Named<K, V>, T>
where
    F: VisitorMut<V>,
{
    fn walk_mut(&mut self, visitor: &mut F) {
        visitor.visit_mut(K::NAME, &mut self.0.value);
        self.1.walk_mut(visitor);
    }
}

/// The set of keywords of a container type. Needs no instance.
pub struct KeySet<L>(PhantomData<L>);

impl<L> KeySet<L> {
    /// Whether some entry is bound to `keyword`. Usable in constants.
    pub const fn contains<K>(&self, keyword: K) -> bool
    where
        L: Contains<K>,
    {
        core::mem::forget(keyword);
        <<L as Contains<K>>::Output as Bit>::VALUE
    }
}

impl<L> Clone for KeySet<L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for KeySet<L> {}

/// Owns a list of values bound to pairwise distinct keywords.
///
/// ```
/// use kwparams::*;
///
/// let mut args = kwargs!{ width: 800_u32, title: "main" };
/// assert_eq!(args.size(), 2);
/// assert!(args.keys().contains(kw!(title)));
/// assert!(!args.keys().contains(kw!(height)));
///
/// *args.get_mut(kw!(width)) += 224;
/// assert_eq!(*args.get(kw!(width)), 1024);
/// assert_eq!(*args.get_or(kw!(height), &600), 600);
/// ```
pub struct Kwargs<L> {
    args: L,
}

impl<L: Unique> Kwargs<L> {
    pub fn new(args: L) -> Self {
        Kwargs { args }
    }
}

impl<L> Kwargs<L> {
    pub const KEYS: KeySet<L> = KeySet(PhantomData);

    pub const fn keys(&self) -> KeySet<L> {
        KeySet(PhantomData)
    }

    /// Returns a reference to the value bound to `keyword`; an absent
    /// keyword does not compile:
    ///
    /// ```compile_fail,E0277
    /// use kwparams::*;
    ///
    /// let args = kwargs!{ width: 800 };
    /// let height = args.get(kw!(height));
    /// ```
    pub fn get<K>(&self, keyword: K) -> &<L as Lookup<K>>::Value
    where
        L: Contains<K> + Lookup<K>,
        <L as Contains<K>>::Output: IsTrue,
    {
        let _ = keyword;
        self.args.lookup()
    }

    /// ```compile_fail,E0277
    /// use kwparams::*;
    ///
    /// let mut args = kwargs!{ width: 800 };
    /// *args.get_mut(kw!(height)) += 1;
    /// ```
    pub fn get_mut<K>(&mut self, keyword: K) -> &mut <L as Lookup<K>>::Value
    where
        L: Contains<K> + Lookup<K>,
        <L as Contains<K>>::Output: IsTrue,
    {
        let _ = keyword;
        self.args.lookup_mut()
    }

    /// Returns a reference to the value bound to `keyword` if there is one,
    /// otherwise `default` as given.
    pub fn get_or<'a, K, D>(&'a self, keyword: K, default: D) -> <L as LookupOr<'a, K, D>>::Output
    where
        L: LookupOr<'a, K, D>,
    {
        let _ = keyword;
        self.args.lookup_or(default)
    }

    /// Calls `visitor` once per entry, in construction order.
    pub fn visit<F>(&self, visitor: &mut F)
    where
        L: Walk<F>,
    {
        self.args.walk(visitor)
    }

    pub fn visit_mut<F>(&mut self, visitor: &mut F)
    where
        L: WalkMut<F>,
    {
        self.args.walk_mut(visitor)
    }

    pub fn into_inner(self) -> L {
        self.args
    }
}

impl<L: ArgList> Kwargs<L> {
    pub const SIZE: usize = L::LEN;

    pub const fn size(&self) -> usize {
        L::LEN
    }
}

impl<L: Clone> Clone for Kwargs<L> {
    fn clone(&self) -> Self {
        Kwargs { args: self.args.clone() }
    }
}

/// Writes the entries of a list into a debug map.
pub trait DebugEntries {
    fn entries(&self, map: &mut fmt::DebugMap<'_, '_>);
}

impl DebugEntries for Nil {
    fn entries(&self, _map: &mut fmt::DebugMap<'_, '_>) {}
}

impl<K: Key, V: fmt::Debug, T: DebugEntries> DebugEntries for Cons<Named<K, V>, T> {
    fn entries(&self, map: &mut fmt::DebugMap<'_, '_>) {
        map.entry(&format_args!("{}", K::NAME), &self.0.value);
        self.1.entries(map);
    }
}

impl<L: DebugEntries> fmt::Debug for Kwargs<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.args.entries(&mut map);
        map.finish()
    }
}

/// Moves `args` into a new container. Repeated keywords do not compile.
pub fn parse<L: Unique>(args: L) -> Kwargs<L> {
    Kwargs::new(args)
}
