// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Lit, LitInt, LitStr,
    Meta, Type,
};

/// Struct-level `#[record(...)]` options.
#[derive(Default)]
struct RecordAttrs {
    name: Option<String>,
    namespace: Option<String>,
    doc: Option<String>,
}

/// Field-level `#[record(...)]` options.
///
/// Annotations keep their written order.
#[derive(Default)]
struct FieldAttrs {
    annotations: Vec<TokenStream2>,
    default: Option<Expr>,
    doc: Option<String>,
}

struct FieldInfo {
    ident: syn::Ident,
    ty: Type,
    attrs: FieldAttrs,
}

/// `#[derive(Record)]` macro: generates `Record` + `WireType` impls
///
/// Struct attributes:
/// - `name = ".."`: record name (defaults to the struct name)
/// - `namespace = ".."`: record namespace (defaults to the module path)
/// - `doc = ".."`: record doc (defaults to the `///` comment)
///
/// Field attributes:
/// - `fixed = N`: write the field as a fixed of `N` bytes
/// - `name = ".."`, `namespace = ".."`, `alias = ".."`, `doc = ".."`
/// - `transient`: never written, decoded from its default
/// - `default = <expr>`: used when the field is missing or fails to decode
///
/// Example:
/// ```ignore
/// use fieldcodec::Record;
///
/// #[derive(Record)]
/// #[record(namespace = "fleet")]
/// struct Vehicle {
///     #[record(fixed = 17, name = "vin")]
///     id: String,
///     #[record(default = None)]
///     plate: Option<String>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only named fields are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let record = parse_record_attrs(&input.attrs)?;
    let mut infos = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Only named fields are supported"));
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        infos.push(FieldInfo {
            ident,
            ty: field.ty.clone(),
            attrs,
        });
    }

    let record_name = record.name.unwrap_or_else(|| ident.to_string());
    let namespace = match record.namespace {
        Some(ns) => quote! { ::std::option::Option::Some(::std::string::String::from(#ns)) },
        None => quote! {
            ::std::option::Option::Some(::std::module_path!().replace("::", "."))
        },
    };
    let record_doc = opt_string(record.doc.as_deref());

    let field_metas = infos.iter().enumerate().map(|(index, info)| {
        let label = info.ident.to_string();
        let doc = opt_string(info.attrs.doc.as_deref());
        let annotations = &info.attrs.annotations;
        quote! {
            {
                let mut field = ::fieldcodec::FieldMeta::new(#label, #index);
                field.doc = #doc;
                #( field.annotations.push(#annotations); )*
                field
            }
        }
    });

    let defaults: Vec<TokenStream2> = infos
        .iter()
        .map(|info| {
            let ty = &info.ty;
            match &info.attrs.default {
                Some(expr) => quote! {
                    ::std::option::Option::Some((|| -> #ty { #expr }) as fn() -> #ty)
                },
                None => quote! { ::std::option::Option::None },
            }
        })
        .collect();

    let encoders = infos.iter().enumerate().map(|(index, info)| {
        let field = &info.ident;
        let ty = &info.ty;
        let default = &defaults[index];
        quote! {
            encoders.extend(builder.encoder::<Self, #ty>(#index, |record| &record.#field, #default)?);
        }
    });

    let decoder_types = infos.iter().map(|info| {
        let ty = &info.ty;
        quote! { ::fieldcodec::ResolvedFieldDecoder<#ty> }
    });

    let decoders = infos.iter().enumerate().map(|(index, info)| {
        let ty = &info.ty;
        let default = &defaults[index];
        quote! { builder.decoder::<#ty>(#index, #default)? }
    });

    let assembled = infos.iter().enumerate().map(|(index, info)| {
        let field = &info.ident;
        let slot = syn::Index::from(index);
        quote! { #field: decoders.#slot.decode_field(record)? }
    });

    Ok(quote! {
        impl ::fieldcodec::Record for #ident {
            type Decoders = ( #( #decoder_types, )* );

            fn meta() -> ::fieldcodec::RecordMeta {
                ::fieldcodec::RecordMeta {
                    name: ::std::string::String::from(#record_name),
                    namespace: #namespace,
                    doc: #record_doc,
                    fields: ::std::vec![ #( #field_metas ),* ],
                }
            }

            fn encoders(
                builder: &mut ::fieldcodec::RecordBuilder<'_, '_>,
            ) -> ::std::result::Result<
                ::std::vec::Vec<::fieldcodec::ResolvedFieldEncoder<Self>>,
                ::fieldcodec::ConfigError,
            > {
                let mut encoders = ::std::vec::Vec::new();
                #( #encoders )*
                ::std::result::Result::Ok(encoders)
            }

            fn decoders(
                builder: &mut ::fieldcodec::RecordBuilder<'_, '_>,
            ) -> ::std::result::Result<Self::Decoders, ::fieldcodec::ConfigError> {
                ::std::result::Result::Ok(( #( #decoders, )* ))
            }

            #[allow(unused_variables)]
            fn assemble(
                decoders: &Self::Decoders,
                record: &::fieldcodec::GenericRecord,
            ) -> ::std::result::Result<Self, ::fieldcodec::DecodeError> {
                ::std::result::Result::Ok(Self { #( #assembled ),* })
            }
        }

        impl ::fieldcodec::WireType for #ident {
            fn resolve(
                resolver: &mut ::fieldcodec::Resolver<'_>,
                update: &::fieldcodec::SchemaUpdate,
            ) -> ::std::result::Result<
                ::fieldcodec::CodecRef<Self>,
                ::fieldcodec::ConfigError,
            > {
                ::fieldcodec::RecordCodec::<Self>::resolve(resolver, update)
            }
        }
    })
}

fn opt_string(value: Option<&str>) -> TokenStream2 {
    match value {
        Some(s) => quote! { ::std::option::Option::Some(::std::string::String::from(#s)) },
        None => quote! { ::std::option::Option::None },
    }
}

/// Joined `///` comment lines, if any.
fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

fn parse_record_attrs(attrs: &[Attribute]) -> syn::Result<RecordAttrs> {
    let mut parsed = RecordAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                parsed.name = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("namespace") {
                parsed.namespace = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("doc") {
                parsed.doc = Some(meta.value()?.parse::<LitStr>()?.value());
            } else {
                return Err(meta.error("unsupported record attribute"));
            }
            Ok(())
        })?;
    }
    if parsed.doc.is_none() {
        parsed.doc = doc_comment(attrs);
    }
    Ok(parsed)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("fixed") {
                let size: usize = meta.value()?.parse::<LitInt>()?.base10_parse()?;
                parsed
                    .annotations
                    .push(quote! { ::fieldcodec::Annotation::Fixed(#size) });
            } else if meta.path.is_ident("name") {
                let name = meta.value()?.parse::<LitStr>()?.value();
                parsed.annotations.push(
                    quote! { ::fieldcodec::Annotation::Name(::std::string::String::from(#name)) },
                );
            } else if meta.path.is_ident("namespace") {
                let namespace = meta.value()?.parse::<LitStr>()?.value();
                parsed.annotations.push(quote! {
                    ::fieldcodec::Annotation::Namespace(::std::string::String::from(#namespace))
                });
            } else if meta.path.is_ident("alias") {
                let alias = meta.value()?.parse::<LitStr>()?.value();
                parsed.annotations.push(
                    quote! { ::fieldcodec::Annotation::Alias(::std::string::String::from(#alias)) },
                );
            } else if meta.path.is_ident("transient") {
                parsed
                    .annotations
                    .push(quote! { ::fieldcodec::Annotation::Transient });
            } else if meta.path.is_ident("default") {
                if parsed.default.is_some() {
                    return Err(meta.error("duplicate default"));
                }
                parsed.default = Some(meta.value()?.parse::<Expr>()?);
            } else if meta.path.is_ident("doc") {
                parsed.doc = Some(meta.value()?.parse::<LitStr>()?.value());
            } else {
                return Err(meta.error("unsupported record field attribute"));
            }
            Ok(())
        })?;
    }
    if parsed.doc.is_none() {
        parsed.doc = doc_comment(attrs);
    }
    Ok(parsed)
}
