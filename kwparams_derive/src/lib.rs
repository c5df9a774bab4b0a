extern crate proc_macro;
use proc_macro::TokenStream;

extern crate proc_macro2;
use proc_macro2::{Span, TokenStream as TokenStream2};

use quote::quote;

use std::mem;

use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, parse_quote,
    punctuated::Punctuated,
    visit_mut::{self, VisitMut},
    Attribute, Error, Expr, FnArg, GenericParam, Ident, ItemFn, Lifetime, LifetimeParam, LitStr,
    Pat, ReturnType, Token, Type, TypeBareFn, TypeReference, WherePredicate,
};

/// Longest keyword, in bytes. One more byte holds the sentinel.
const MAX_LEN: usize = 63;

/*
 * A keyword as written at the call site: a bare identifier or a string
 * literal. Raw identifiers name the same keyword as their unraw spelling.
 */
enum KeywordName {
    Ident(Ident),
    Lit(LitStr),
}

impl Parse for KeywordName {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            Ok(KeywordName::Lit(input.parse()?))
        } else {
            Ok(KeywordName::Ident(Ident::parse_any(input)?))
        }
    }
}

impl KeywordName {
    fn span(&self) -> Span {
        match self {
            KeywordName::Ident(ident) => ident.span(),
            KeywordName::Lit(lit) => lit.span(),
        }
    }

    fn text(&self) -> String {
        match self {
            KeywordName::Ident(ident) => ident.unraw().to_string(),
            KeywordName::Lit(lit) => lit.value(),
        }
    }

    fn keyword_type(&self) -> syn::Result<TokenStream2> {
        keyword_type(&self.text(), self.span())
    }
}

/// Spells `name` as a keyword type: a list of symbols, each symbol a list of
/// eight bits, most significant first.
fn keyword_type(name: &str, span: Span) -> syn::Result<TokenStream2> {
    if name.is_empty() {
        return Err(Error::new(span, "keyword can't be empty"));
    }
    if name.len() > MAX_LEN {
        return Err(Error::new(
            span,
            format!("keyword can't be longer than {} bytes", MAX_LEN),
        ));
    }
    if name.bytes().any(|byte| byte == 0) {
        return Err(Error::new(span, "keyword can't contain a NUL byte"));
    }
    let symbols = name.bytes().rev().fold(quote!(::kwparams::Nil), |tail, byte| {
        let bits = (0..8).fold(quote!(::kwparams::Nil), |tail, nth| {
            let bit = if (byte >> nth) & 1 == 1 {
                quote!(::kwparams::True)
            } else {
                quote!(::kwparams::False)
            };
            quote!(::kwparams::Cons<#bit, #tail>)
        });
        quote!(::kwparams::Cons<::kwparams::Ch<#bits>, #tail>)
    });
    Ok(quote!(::kwparams::Keyword<#symbols>))
}

struct KwInput {
    name: KeywordName,
    value: Option<Expr>,
}

impl Parse for KwInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name = input.parse()?;
        let value = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse()?)
        } else {
            None
        };
        if !input.is_empty() {
            return Err(input.error("expected `kw!(name)` or `kw!(name = value)`"));
        }
        Ok(KwInput { name, value })
    }
}

/// Keyword value, or a named value with `kw!(name = value)`.
#[proc_macro]
pub fn kw(input: TokenStream) -> TokenStream {
    let KwInput { name, value } = parse_macro_input!(input as KwInput);
    let expanded = name.keyword_type().map(|keyword| match value {
        Some(value) => quote!( <#keyword>::new().bind(#value) ),
        None => quote!( <#keyword>::new() ),
    });
    expanded.unwrap_or_else(Error::into_compile_error).into()
}

/// Type of a keyword.
#[allow(non_snake_case)]
#[proc_macro]
pub fn Kw(input: TokenStream) -> TokenStream {
    let name = parse_macro_input!(input as KeywordName);
    name.keyword_type()
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

struct ArgField {
    name: KeywordName,
    value: Option<Expr>,
}

impl Parse for ArgField {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name = input.parse()?;
        let value = if input.peek(Token![:]) {
            input.parse::<Token![:]>()?;
            Some(input.parse()?)
        } else {
            None
        };
        Ok(ArgField { name, value })
    }
}

impl ArgField {
    fn named_value(&self) -> syn::Result<TokenStream2> {
        let keyword = self.name.keyword_type()?;
        let value = match (&self.value, &self.name) {
            (Some(value), _) => quote!(#value),
            (None, KeywordName::Ident(ident)) => quote!(#ident),
            (None, KeywordName::Lit(lit)) => {
                return Err(Error::new(lit.span(), "a quoted keyword needs a value"));
            }
        };
        Ok(quote!( <#keyword>::new().bind(#value) ))
    }
}

struct ArgsInput(Punctuated<ArgField, Token![,]>);

impl Parse for ArgsInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        Ok(ArgsInput(Punctuated::<ArgField, Token![,]>::parse_terminated(input)?))
    }
}

impl ArgsInput {
    fn list(&self) -> syn::Result<TokenStream2> {
        self.0.iter().rev().try_fold(quote!(::kwparams::Nil), |tail, field| {
            let head = field.named_value()?;
            Ok(quote!( ::kwparams::Cons(#head, #tail) ))
        })
    }
}

/// Argument list, in the order written: `args!{ width: 800, height }`.
#[proc_macro]
pub fn args(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as ArgsInput);
    args.list().unwrap_or_else(Error::into_compile_error).into()
}

/// Keyword argument container: `kwargs!{ width: 800, height }`.
#[proc_macro]
pub fn kwargs(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as ArgsInput);
    args.list()
        .map(|list| quote!( ::kwparams::parse(#list) ))
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/*
 * Elided lifetimes are not allowed in where clauses, so every `&T` and `'_`
 * in a parameter type gets a fresh named lifetime. Function pointer types and
 * `Fn(..)` sugar keep theirs, they bind their own.
 */
#[derive(Default)]
struct ElidedLifetimes(Vec<Lifetime>);

impl ElidedLifetimes {
    fn fresh(&mut self) -> Lifetime {
        let lifetime = Lifetime::new(&format!("'__kw{}", self.0.len()), Span::call_site());
        self.0.push(lifetime.clone());
        lifetime
    }
}

impl VisitMut for ElidedLifetimes {
    fn visit_type_reference_mut(&mut self, reference: &mut TypeReference) {
        if reference.lifetime.is_none() {
            reference.lifetime = Some(self.fresh());
        }
        visit_mut::visit_type_reference_mut(self, reference);
    }

    fn visit_lifetime_mut(&mut self, lifetime: &mut Lifetime) {
        if lifetime.ident == "_" {
            *lifetime = self.fresh();
        }
    }

    fn visit_type_bare_fn_mut(&mut self, _: &mut TypeBareFn) {}

    fn visit_parenthesized_generic_arguments_mut(
        &mut self,
        _: &mut syn::ParenthesizedGenericArguments,
    ) {
    }
}

/*
 * The parameters are gone from the rewritten signature, so an elided lifetime
 * in the return type has nothing left to borrow from. It gets the one
 * lifetime the parameters were given, if there is exactly one.
 */
struct ReturnLifetimes {
    fill: Option<Lifetime>,
    unfilled: Option<Span>,
}

impl ReturnLifetimes {
    fn fill(&mut self, span: Span) -> Option<Lifetime> {
        if self.fill.is_none() && self.unfilled.is_none() {
            self.unfilled = Some(span);
        }
        self.fill.clone()
    }
}

impl VisitMut for ReturnLifetimes {
    fn visit_type_reference_mut(&mut self, reference: &mut TypeReference) {
        if reference.lifetime.is_none() {
            reference.lifetime = self.fill(reference.span());
        }
        visit_mut::visit_type_reference_mut(self, reference);
    }

    fn visit_lifetime_mut(&mut self, lifetime: &mut Lifetime) {
        if lifetime.ident == "_" {
            if let Some(fill) = self.fill(lifetime.span()) {
                *lifetime = fill;
            }
        }
    }

    fn visit_type_bare_fn_mut(&mut self, _: &mut TypeBareFn) {}

    fn visit_parenthesized_generic_arguments_mut(
        &mut self,
        _: &mut syn::ParenthesizedGenericArguments,
    ) {
    }
}

struct NamedParam {
    ident: Ident,
    mutability: Option<Token![mut]>,
    ty: Type,
    default: Option<Expr>,
}

fn take_default(attrs: &mut Vec<Attribute>) -> syn::Result<Option<Expr>> {
    let mut default = None;
    for attr in mem::take(attrs) {
        if !attr.path().is_ident("default") {
            return Err(Error::new(
                attr.span(),
                "#[named_args] function's arguments accept no attribute but `#[default(value)]`.",
            ));
        }
        if default.is_some() {
            return Err(Error::new(attr.span(), "`#[default]` given twice."));
        }
        default = Some(attr.parse_args::<Expr>()?);
    }
    Ok(default)
}

fn named_param(fn_arg: &mut syn::PatType, lifetimes: &mut ElidedLifetimes) -> syn::Result<NamedParam> {
    let default = take_default(&mut fn_arg.attrs)?;
    let pat_ident = match &*fn_arg.pat {
        Pat::Ident(pat_ident) if pat_ident.by_ref.is_none() && pat_ident.subpat.is_none() => {
            pat_ident
        }
        pat => {
            return Err(Error::new(
                pat.span(),
                "#[named_args] function's arguments should be either receiver or `id: Type`.",
            ));
        }
    };
    if let Type::ImplTrait(ty) = &*fn_arg.ty {
        return Err(Error::new(
            ty.span(),
            "#[named_args] function's arguments can't be `impl Trait`, use a generic parameter.",
        ));
    }
    let mut ty = (*fn_arg.ty).clone();
    lifetimes.visit_type_mut(&mut ty);
    Ok(NamedParam {
        ident: pat_ident.ident.clone(),
        mutability: pat_ident.mutability,
        ty,
        default,
    })
}

/// Rewrites `fn f(a: A, #[default(d)] b: B)` into a function taking one
/// argument list, resolving `a` and `b` by keyword.
fn expand_named_args(mut item_fn: ItemFn) -> syn::Result<TokenStream2> {
    let args = Ident::new("__kwargs", Span::mixed_site());
    let args_ty = Ident::new("__KwArgs", Span::call_site());

    let mut lifetimes = ElidedLifetimes::default();
    let mut params = Vec::with_capacity(item_fn.sig.inputs.len());
    for fn_arg in mem::take(&mut item_fn.sig.inputs) {
        match fn_arg {
            FnArg::Receiver(_) => item_fn.sig.inputs.push(fn_arg),
            FnArg::Typed(mut pat_type) => params.push(named_param(&mut pat_type, &mut lifetimes)?),
        }
    }

    let mut rest: Type = parse_quote!(#args_ty);
    let mut predicates = Vec::<WherePredicate>::with_capacity(params.len() + 1);
    let mut stmts = Vec::with_capacity(params.len());
    for NamedParam { ident, mutability, ty, default } in params {
        let keyword = keyword_type(&ident.unraw().to_string(), ident.span())?;
        match default {
            None => {
                predicates.push(parse_quote!( #rest: ::kwparams::Pick<#keyword, Value = #ty> ));
                stmts.push(quote!(
                    let (#mutability #ident, #args) = <#rest as ::kwparams::Pick<#keyword>>::pick(#args);
                ));
                rest = parse_quote!( <#rest as ::kwparams::Pick<#keyword>>::Rest );
            }
            Some(default) => {
                predicates.push(parse_quote!(
                    #rest: ::kwparams::PickOr<#keyword, #ty, Value = #ty>
                ));
                stmts.push(quote!(
                    let (#mutability #ident, #args) =
                        <#rest as ::kwparams::PickOr<#keyword, #ty>>::pick_or(#args, #default);
                ));
                rest = parse_quote!( <#rest as ::kwparams::PickOr<#keyword, #ty>>::Rest );
            }
        }
    }
    predicates.push(parse_quote!( #rest: ::kwparams::Exhausted ));

    let borrows_self = item_fn
        .sig
        .receiver()
        .map_or(false, |receiver| matches!(&*receiver.ty, Type::Reference(_)));
    if let (false, ReturnType::Type(_, output)) = (borrows_self, &mut item_fn.sig.output) {
        let mut returned = ReturnLifetimes {
            fill: match lifetimes.0.as_slice() {
                [lifetime] => Some(lifetime.clone()),
                _ => None,
            },
            unfilled: None,
        };
        returned.visit_type_mut(output);
        if let Some(span) = returned.unfilled {
            return Err(Error::new(
                span,
                "#[named_args] function's return type needs an explicit lifetime here.",
            ));
        }
    }

    let generics = &mut item_fn.sig.generics;
    for (nth, lifetime) in lifetimes.0.into_iter().enumerate() {
        generics
            .params
            .insert(nth, GenericParam::Lifetime(LifetimeParam::new(lifetime)));
    }
    generics.params.push(parse_quote!(#args_ty));
    generics.make_where_clause().predicates.extend(predicates);

    item_fn.sig.inputs.push(parse_quote!( #args: #args_ty ));
    let body = &item_fn.block.stmts;
    let block = parse_quote!({
        #( #stmts )*
        let _ = #args;
        #( #body )*
    });
    item_fn.block = Box::new(block);

    Ok(quote!( #item_fn ))
}

/// Function taking keyword arguments, called as `f(args!{ .. })`.
#[proc_macro_attribute]
pub fn named_args(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        let args = TokenStream2::from(args);
        return Error::new(args.span(), "#[named_args] takes no arguments.")
            .into_compile_error()
            .into();
    }
    let item_fn = parse_macro_input!(input as ItemFn);
    expand_named_args(item_fn)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    fn squash(tokens: TokenStream2) -> String {
        tokens.to_string().split_whitespace().collect()
    }

    #[test]
    fn encodes_bytes_most_significant_first() {
        let ty = keyword_type("a", Span::call_site()).unwrap();
        let bits = "::kwparams::Cons<::kwparams::False,::kwparams::Cons<::kwparams::True,\
                    ::kwparams::Cons<::kwparams::True,::kwparams::Cons<::kwparams::False,\
                    ::kwparams::Cons<::kwparams::False,::kwparams::Cons<::kwparams::False,\
                    ::kwparams::Cons<::kwparams::False,::kwparams::Cons<::kwparams::True,\
                    ::kwparams::Nil>>>>>>>>";
        assert_eq!(
            squash(ty),
            format!(
                "::kwparams::Keyword<::kwparams::Cons<::kwparams::Ch<{}>,::kwparams::Nil>>",
                bits
            )
        );
    }

    #[test]
    fn raw_and_quoted_names_agree() {
        let raw: KeywordName = syn::parse_quote!(r#type);
        let lit: KeywordName = syn::parse_quote!("type");
        assert_eq!(raw.text(), "type");
        assert_eq!(
            squash(raw.keyword_type().unwrap()),
            squash(lit.keyword_type().unwrap())
        );
    }

    #[test]
    fn rejects_bad_names() {
        assert!(keyword_type("", Span::call_site()).is_err());
        assert!(keyword_type("a\0b", Span::call_site()).is_err());
        assert!(keyword_type(&"x".repeat(MAX_LEN), Span::call_site()).is_ok());
        assert!(keyword_type(&"x".repeat(MAX_LEN + 1), Span::call_site()).is_err());
    }

    #[test]
    fn quoted_keyword_needs_value() {
        let args: ArgsInput = syn::parse_quote!(a: 1, "b-c");
        assert!(args.list().is_err());
        let args: ArgsInput = syn::parse_quote!(a: 1, b, "b-c": 2,);
        assert!(args.list().is_ok());
    }

    #[test]
    fn named_args_rewrites_signature() {
        let item_fn: ItemFn = syn::parse_quote! {
            fn greet(name: &str, #[default(1)] times: usize) -> String {
                name.repeat(times)
            }
        };
        let expanded: ItemFn = syn::parse2(expand_named_args(item_fn).unwrap()).unwrap();
        assert_eq!(expanded.sig.inputs.len(), 1);
        let params = expanded.sig.generics.params.iter().collect::<Vec<_>>();
        assert_eq!(params.len(), 2);
        assert!(matches!(params[0], GenericParam::Lifetime(_)));
        assert!(matches!(params[1], GenericParam::Type(_)));
        let where_clause = expanded.sig.generics.where_clause.unwrap();
        assert_eq!(where_clause.predicates.len(), 3);
        let last = squash(where_clause.predicates.last().unwrap().to_token_stream());
        assert!(last.ends_with("::kwparams::Exhausted"));
    }

    #[test]
    fn named_args_lends_parameter_lifetime_to_return_type() {
        let item_fn: ItemFn = syn::parse_quote! {
            fn first(s: &str) -> &str { s }
        };
        let expanded: ItemFn = syn::parse2(expand_named_args(item_fn).unwrap()).unwrap();
        let output = squash(expanded.sig.output.to_token_stream());
        assert_eq!(output, "->&'__kw0str");

        let item_fn: ItemFn = syn::parse_quote! {
            fn longer(a: &str, b: &str) -> &str { a }
        };
        assert!(expand_named_args(item_fn).is_err());

        let item_fn: ItemFn = syn::parse_quote! {
            fn name(&self, prefix: &str) -> &str { &self.0 }
        };
        let expanded: ItemFn = syn::parse2(expand_named_args(item_fn).unwrap()).unwrap();
        assert_eq!(squash(expanded.sig.output.to_token_stream()), "->&str");
    }

    #[test]
    fn named_args_keeps_body_statements_flat() {
        let item_fn: ItemFn = syn::parse_quote! {
            fn id(x: u32) -> u32 { x }
        };
        let expanded: ItemFn = syn::parse2(expand_named_args(item_fn).unwrap()).unwrap();
        assert_eq!(expanded.block.stmts.len(), 3);
        assert!(matches!(expanded.block.stmts.last(), Some(syn::Stmt::Expr(Expr::Path(_), None))));
    }

    #[test]
    fn named_args_rejects_patterns() {
        let item_fn: ItemFn = syn::parse_quote! {
            fn f((a, b): (u8, u8)) {}
        };
        assert!(expand_named_args(item_fn).is_err());

        let item_fn: ItemFn = syn::parse_quote! {
            fn f(#[allow(unused)] a: u8) {}
        };
        assert!(expand_named_args(item_fn).is_err());
    }
}
