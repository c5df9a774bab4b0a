//! # Overview
//!
//! This project provides keyword arguments resolved at compile time, using
//! proc macros `kw!{}`, `Kw!{}`, `args!{}`, `kwargs!{}` and `#[named_args]`.
//! A keyword is a zero-sized type spelled out of the bytes of its name, so
//! looking one up costs nothing at runtime, and looking up a keyword that was
//! never passed does not compile.
//!
//! ## Usage of this crate
//!
//! Add the following in your Cargo.toml file:
//!
//! ```toml
//! [dependencies]
//! kwparams = "0.1"
//! ```
//!
//! Add the following in your .rs files:
//!
//! ```rust,no_run
//! use kwparams::*;
//! ```
//!
//! # Keywords and named values
//!
//! `kw!(name)` is the keyword `name`, `Kw!(name)` is its type. Any text can be
//! a keyword when quoted: `kw!("max-depth")`. Binding a value to a keyword
//! gives a named value.
//!
//! ```rust
//! use kwparams::*;
//!
//! let width = kw!(width = 800);
//! let height = kw!(height).bind(600);
//! assert_eq!(<Kw!(width) as Key>::NAME, "width");
//! assert_eq!(kw!("max-depth"), kw!("max-depth"));
//! ```
//!
//! # Picking from an argument list
//!
//! `args!{}` builds an argument list. `pick` takes the first value bound to a
//! keyword; `pick_default` falls back to a given value.
//!
//! ```rust
//! use kwparams::*;
//!
//! let width: u32 = pick(kw!(width), args!{ height: 600_u32, width: 800_u32 });
//! assert_eq!(width, 800);
//!
//! let depth = pick_default(kw!(depth), 8, args!{ width: 800 });
//! assert_eq!(depth, 8);
//! ```
//!
//! # The argument container
//!
//! `kwargs!{}` (or `parse(args!{})`) stores the arguments, checks that no
//! keyword is given twice, and supports membership tests, lookups and visits.
//!
//! ```rust
//! use kwparams::*;
//!
//! let args = kwargs!{ a: 1, b: "x", c: 2.0 };
//! assert_eq!(args.size(), 3);
//! assert!(args.keys().contains(kw!(b)));
//! assert_eq!(*args.get(kw!(b)), "x");
//! assert_eq!(format!("{:?}", args), r#"{a: 1, b: "x", c: 2.0}"#);
//! ```
//!
//! # Functions with keyword arguments
//!
//! At definition site, add attribute `#[named_args]` to functions. Parameters
//! marked `#[default(expr)]` may be left out.
//!
//! ```rust
//! use kwparams::*;
//!
//! #[named_args]
//! fn set_size(width: u32, #[default(600)] height: u32) -> (u32, u32) {
//!     (width, height)
//! }
//!
//! assert_eq!(set_size(args!{ width: 800 }), (800, 600));
//! assert_eq!(set_size(args!{ height: 768, width: 1024 }), (1024, 768));
//! ```
//!
//! # License
//!
//! Under Apache License 2.0 or MIT License, at your will.

#![no_std]

mod bit;
mod keyword;
mod kwargs;
mod list;

pub use bit::{And, Bit, False, IsFalse, IsTrue, Or, SameAs, True};
pub use keyword::{BitList, Ch, Key, Keyword, Named, Symbol, SymbolList, CAPACITY, MAX_LEN};
pub use kwargs::{
    parse, DebugEntries, KeySet, Kwargs, Lookup, LookupAt, LookupOr, LookupOrAt, Unique, Visitor,
    VisitorMut, Walk, WalkMut,
};
pub use list::{
    pick, pick_default, ArgList, Cons, Contains, ContainsAt, Exhausted, Nil, Pick, PickAt, PickOr,
    PickOrAt,
};

#[cfg(feature = "macros")]
pub use kwparams_derive::{args, kw, kwargs, named_args, Kw};
