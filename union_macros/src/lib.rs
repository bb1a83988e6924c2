//! The declaration step behind `variadic_union!`.
//!
//! Types can't be compared for equality in a trait bound, so repeated types
//! are removed here, before any trait sees the list. Two types count as the
//! same when they are spelled with the same tokens.

use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::{Delimiter, TokenStream as TokenStream2, TokenTree};
use quote::{quote, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{braced, Attribute, GenericParam, Generics, Ident, Token, Type, Visibility};

/// Expects the path of the runtime crate, a `;`, and any number of
/// `union Name<Params> where .. { Type, ... }` declarations. Called through the
/// `variadic_union!` wrapper, which fills in the path.
#[proc_macro]
pub fn variadic_union(input: TokenStream) -> TokenStream {
    match syn::parse::<Input>(input) {
        Ok(input) => input.expand().into(),
        Err(err) => err.into_compile_error().into(),
    }
}

struct Input {
    krate: TokenStream2,
    declarations: Vec<Declaration>,
}

struct Declaration {
    attrs: Vec<Attribute>,
    vis: Visibility,
    name: Ident,
    generics: Generics,
    types: Vec<Type>,
}

impl Parse for Input {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut krate = TokenStream2::new();
        while !input.peek(Token![;]) {
            krate.extend([input.parse::<TokenTree>()?]);
        }
        input.parse::<Token![;]>()?;

        let mut declarations = Vec::new();
        while !input.is_empty() {
            declarations.push(input.parse()?);
        }

        Ok(Input {
            krate,
            declarations,
        })
    }
}

impl Parse for Declaration {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis = input.parse()?;
        input.parse::<Token![union]>()?;
        let name = input.parse()?;
        let mut generics: Generics = input.parse()?;
        generics.where_clause = input.parse()?;

        let content;
        braced!(content in input);
        let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?
            .into_iter()
            .collect();

        Ok(Declaration {
            attrs,
            vis,
            name,
            generics,
            types,
        })
    }
}

impl Input {
    fn expand(&self) -> TokenStream2 {
        self.declarations
            .iter()
            .map(|declaration| declaration.expand(&self.krate))
            .collect()
    }
}

impl Declaration {
    fn expand(&self, krate: &TokenStream2) -> TokenStream2 {
        let Declaration {
            attrs,
            vis,
            name,
            generics,
            types,
        } = self;

        let list = dedup(types)
            .into_iter()
            .rev()
            .fold(quote!(#krate::__private::Nil), |tail, ty| {
                quote!(#krate::__private::Cons<#ty, #tail>)
            });

        // Bounds on an alias aren't enforced, so they only go on the check.
        let params: Vec<TokenStream2> = generics
            .params
            .iter()
            .map(|param| match param {
                GenericParam::Lifetime(param) => param.lifetime.to_token_stream(),
                GenericParam::Type(param) => param.ident.to_token_stream(),
                GenericParam::Const(param) => {
                    let (ident, ty) = (&param.ident, &param.ty);
                    quote!(const #ident: #ty)
                }
            })
            .collect();
        let alias_generics = if params.is_empty() {
            TokenStream2::new()
        } else {
            quote!(<#(#params),*>)
        };
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        // Every requested type, repeats included, must resolve to exactly
        // one slot. A type spelled two ways survives `dedup` and fails here.
        let checks: Vec<TokenStream2> = types
            .iter()
            .map(|ty| {
                quote!(#krate::__private::require_supported::<#name #ty_generics, #ty, _>();)
            })
            .collect();

        // The check names the alias, so it must vanish along with it.
        let cfgs = attrs.iter().filter(|attr| attr.path().is_ident("cfg"));

        quote! {
            #(#attrs)*
            #vis type #name #alias_generics = #krate::VariadicUnion<#list>;

            #(#cfgs)*
            const _: () = {
                #[allow(dead_code)]
                fn requested #impl_generics () #where_clause {
                    #(#checks)*
                }
            };
        }
    }
}

/// Keeps the first occurrence of every type.
fn dedup(types: &[Type]) -> Vec<&Type> {
    let mut seen = HashSet::new();
    types
        .iter()
        .filter(|ty| seen.insert(fingerprint(ty.to_token_stream())))
        .collect()
}

/// Spells out `tokens`, ignoring spacing.
fn fingerprint(tokens: TokenStream2) -> String {
    let mut out = String::new();
    write_tokens(tokens, &mut out);
    out
}

fn write_tokens(tokens: TokenStream2, out: &mut String) {
    for tree in tokens {
        match tree {
            TokenTree::Group(group) => {
                let (open, close) = match group.delimiter() {
                    Delimiter::Parenthesis => ("(", ")"),
                    Delimiter::Brace => ("{", "}"),
                    Delimiter::Bracket => ("[", "]"),
                    Delimiter::None => ("", ""),
                };
                out.push_str(open);
                write_tokens(group.stream(), out);
                out.push_str(close);
            }
            TokenTree::Ident(ident) => {
                out.push_str(&ident.to_string());
                out.push(' ');
            }
            TokenTree::Punct(punct) => out.push(punct.as_char()),
            TokenTree::Literal(literal) => {
                out.push_str(&literal.to_string());
                out.push(' ');
            }
        }
    }
}
