//! Keyword tokens and the values bound to them.

use core::fmt;
use core::marker::PhantomData;

use crate::bit::{Bit, SameAs};
use crate::{Cons, Nil};

/// Size of the symbol buffer of a keyword, sentinel included.
pub const CAPACITY: usize = 64;

/// Longest keyword name, in bytes.
pub const MAX_LEN: usize = CAPACITY - 1;

/// One symbol of a keyword name: a byte, spelled as a most-significant-first
/// list of eight [`True`](crate::True)/[`False`](crate::False) bits.
pub struct Ch<Bits>(PhantomData<Bits>);

impl<A: SameAs<B>, B> SameAs<Ch<B>> for Ch<A> {
    type Output = A::Output;
}

/// A list of type-level bits read as an unsigned number.
pub trait BitList {
    const LEN: u32;
    const VALUE: u32;
}

impl BitList for Nil {
    const LEN: u32 = 0;
    const VALUE: u32 = 0;
}

impl<H: Bit, T: BitList> BitList for Cons<H, T> {
    const LEN: u32 = T::LEN + 1;
    const VALUE: u32 = ((H::VALUE as u32) << T::LEN) | T::VALUE;
}

/// A single encoded symbol.
pub trait Symbol {
    const BYTE: u8;
}

impl<B: BitList> Symbol for Ch<B> {
    const BYTE: u8 = B::VALUE as u8;
}

/// A list of symbols, flattened into a zero-padded buffer at compile time.
pub trait SymbolList {
    const LEN: usize;
    const BUF: [u8; CAPACITY];
}

impl SymbolList for Nil {
    const LEN: usize = 0;
    const BUF: [u8; CAPACITY] = [0; CAPACITY];
}

impl<H: Symbol, T: SymbolList> SymbolList for Cons<H, T> {
    const LEN: usize = T::LEN + 1;
    const BUF: [u8; CAPACITY] = prepend(H::BYTE, T::BUF);
}

const fn prepend(head: u8, tail: [u8; CAPACITY]) -> [u8; CAPACITY] {
    let mut buf = [0; CAPACITY];
    buf[0] = head;
    let mut i = 1;
    while i < CAPACITY {
        buf[i] = tail[i - 1];
        i += 1;
    }
    buf
}

/// A keyword token. `N` is the list of its symbols; two tokens have the same
/// type iff they are spelled the same. Build one with `kw!(name)` and name its
/// type with `Kw!(name)`.
pub struct Keyword<N>(PhantomData<N>);

impl<N> Keyword<N> {
    pub const fn new() -> Self {
        Keyword(PhantomData)
    }

    /// Binds `value` to this keyword. `kw!(name = value)` expands to this.
    pub fn bind<V>(self, value: V) -> Named<Self, V> {
        Named::new(value)
    }
}

impl<N: SymbolList> Keyword<N> {
    const BUF: &'static [u8; CAPACITY] = &N::BUF;

    /// The symbols of the name followed by a `0` sentinel.
    pub const SYMBOLS: &'static [u8] = Self::BUF.split_at(N::LEN + 1).0;

    /// The name as text.
    pub const NAME: &'static str = match core::str::from_utf8(Self::BUF.split_at(N::LEN).0) {
        Ok(name) => name,
        Err(_) => panic!("keyword is not valid UTF-8"),
    };
}

impl<N> Clone for Keyword<N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Keyword<N> {}

impl<N> PartialEq for Keyword<N> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<N> Eq for Keyword<N> {}

impl<N> Default for Keyword<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: SymbolList> fmt::Debug for Keyword<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kw!({})", Self::NAME)
    }
}

impl<A: SameAs<B>, B> SameAs<Keyword<B>> for Keyword<A> {
    type Output = A::Output;
}

/// Compile-time access to the name of a keyword type.
pub trait Key {
    const NAME: &'static str;
    const SYMBOLS: &'static [u8];
}

impl<N: SymbolList> Key for Keyword<N> {
    const NAME: &'static str = Keyword::<N>::NAME;
    const SYMBOLS: &'static [u8] = Keyword::<N>::SYMBOLS;
}

/// A value bound to the keyword `K`.
pub struct Named<K, V> {
    pub value: V,
    keyword: PhantomData<K>,
}

impl<K, V> Named<K, V> {
    pub fn new(value: V) -> Self {
        Named { value, keyword: PhantomData }
    }

    pub fn keyword(&self) -> K
    where
        K: Default,
    {
        K::default()
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }
}

impl<K, V: Clone> Clone for Named<K, V> {
    fn clone(&self) -> Self {
        Named::new(self.value.clone())
    }
}

impl<K, V: Copy> Copy for Named<K, V> {}

impl<K, V: PartialEq> PartialEq for Named<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K, V: Eq> Eq for Named<K, V> {}

impl<K: Key, V: fmt::Debug> fmt::Debug for Named<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", K::NAME, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{False as O, True as I};

    // b'a' = 0x61, b'b' = 0x62
    type A = Ch<Cons<O, Cons<I, Cons<I, Cons<O, Cons<O, Cons<O, Cons<O, Cons<I, Nil>>>>>>>>>;
    type B = Ch<Cons<O, Cons<I, Cons<I, Cons<O, Cons<O, Cons<O, Cons<I, Cons<O, Nil>>>>>>>>>;
    type Ab = Keyword<Cons<A, Cons<B, Nil>>>;
    type Ba = Keyword<Cons<B, Cons<A, Nil>>>;

    #[test]
    fn symbols() {
        assert_eq!(<A as Symbol>::BYTE, b'a');
        assert_eq!(<B as Symbol>::BYTE, b'b');
        assert_eq!(Ab::NAME, "ab");
        assert_eq!(Ab::SYMBOLS, b"ab\0");
        assert_eq!(Ba::NAME, "ba");
        assert_eq!(Keyword::<Nil>::SYMBOLS, b"\0");
    }

    #[test]
    fn identity() {
        assert!(<<Ab as SameAs<Ab>>::Output as Bit>::VALUE);
        assert!(!<<Ab as SameAs<Ba>>::Output as Bit>::VALUE);
    }

    #[test]
    fn bind() {
        let named = Ab::new().bind(3_u8);
        assert_eq!(*named.value(), 3);
        assert_eq!(named.into_value(), 3);
    }
}
