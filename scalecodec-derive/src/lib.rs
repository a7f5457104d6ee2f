//! # scalecodec Derive Macros
//!
//! This crate provides the procedural macros for `scalecodec`. It implements
//! `Encodable` and `Decodable` for structs and enums by composing the field codecs.
//!
//! * Structs (named, tuple or unit) encode their fields in declaration order.
//! * Enums write one tag byte equal to the variant's declaration index, then the
//!   variant's fields. At most 256 variants are accepted.
//! * `#[scale(discriminant = "u16")]` on a fieldless enum encodes each variant's
//!   discriminant value in the named integer type instead of a tag.
//!
//! Field attributes: `#[scale(compact)]` encodes an unsigned integer field with the
//! compact codec; `#[scale(skip)]` writes nothing and decodes as `Default::default()`.
//!
//! Compatible with `syn 2.0`.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DataEnum, DeriveInput, Fields, GenericParam, Generics, Ident, Index, LitStr,
    Type, parse_macro_input, parse_quote,
};

/// Largest variant count a one-byte tag can address.
const MAX_VARIANTS: usize = 256;

/// Integer types a fieldless enum's discriminant may be encoded as.
const DISCRIMINANT_TYPES: &[&str] = &[
    "u8", "u16", "u32", "u64", "u128", "i8", "i16", "i32", "i64", "i128",
];

/// Derives `scalecodec::Encodable` (and `scalecodec::Variants` for tagged enums).
#[proc_macro_derive(Encodable, attributes(scale))]
pub fn derive_encodable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_encodable(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Derives `scalecodec::Decodable`.
#[proc_macro_derive(Decodable, attributes(scale))]
pub fn derive_decodable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_decodable(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

// --- Internal Data Structures ---

/// How a single field is encoded.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldMode {
    Plain,
    Compact,
    Skip,
}

struct FieldInfo {
    /// `Some` for named fields.
    ident: Option<Ident>,
    ty: Type,
    mode: FieldMode,
}

/// Parses field attributes. Returns the encoding mode.
fn parse_field_attributes(attrs: &[Attribute]) -> syn::Result<FieldMode> {
    let mut mode = FieldMode::Plain;

    for attr in attrs {
        if attr.path().is_ident("scale") {
            attr.parse_nested_meta(|meta| {
                let requested = if meta.path.is_ident("compact") {
                    FieldMode::Compact
                } else if meta.path.is_ident("skip") {
                    FieldMode::Skip
                } else {
                    return Err(meta.error("Unknown scale field attribute. Supported: compact, skip"));
                };
                if mode != FieldMode::Plain && mode != requested {
                    return Err(meta.error("`compact` and `skip` are mutually exclusive"));
                }
                mode = requested;
                Ok(())
            })?;
        }
    }
    Ok(mode)
}

/// Parses container attributes. Returns the discriminant type, if any.
fn parse_container_attributes(attrs: &[Attribute]) -> syn::Result<Option<Ident>> {
    let mut discriminant = None;

    for attr in attrs {
        if attr.path().is_ident("scale") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("discriminant") {
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    let ty = s.value();
                    if !DISCRIMINANT_TYPES.contains(&ty.as_str()) {
                        return Err(meta.error("discriminant must be a primitive integer type"));
                    }
                    discriminant = Some(Ident::new(&ty, s.span()));
                    return Ok(());
                }
                Err(meta.error("Unknown scale container attribute. Supported: discriminant"))
            })?;
        }
    }
    Ok(discriminant)
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldInfo>> {
    fields
        .iter()
        .map(|field| {
            Ok(FieldInfo {
                ident: field.ident.clone(),
                ty: field.ty.clone(),
                mode: parse_field_attributes(&field.attrs)?,
            })
        })
        .collect()
}

/// Adds `bound` to every type parameter.
fn add_bounds(generics: &Generics, bound: TokenStream2) -> Generics {
    let mut generics = generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(#bound));
        }
    }
    generics
}

/// Pattern binding names for the fields of one variant.
fn bindings(fields: &[FieldInfo]) -> Vec<Ident> {
    (0..fields.len())
        .map(|i| format_ident!("__field{}", i))
        .collect()
}

/// Destructuring pattern `{ a: __field0, .. }` / `(__field0, ..)` for a variant.
fn variant_pattern(fields: &Fields, infos: &[FieldInfo], names: &[Ident]) -> TokenStream2 {
    let binds = infos.iter().zip(names).map(|(f, name)| {
        let bind = if f.mode == FieldMode::Skip {
            quote! { _ }
        } else {
            quote! { #name }
        };
        match &f.ident {
            Some(ident) => quote! { #ident: #bind },
            None => bind,
        }
    });
    match fields {
        Fields::Named(_) => quote! { { #(#binds),* } },
        Fields::Unnamed(_) => quote! { ( #(#binds),* ) },
        Fields::Unit => quote! {},
    }
}

// --- Generator: field-level code ---

/// Statement writing one field; `access` evaluates to `&FieldType`.
fn encode_field(field: &FieldInfo, access: &TokenStream2) -> TokenStream2 {
    match field.mode {
        FieldMode::Plain => quote! {
            ::scalecodec::Encodable::encode_to(#access, __dest);
        },
        FieldMode::Compact => quote! {
            ::scalecodec::Encodable::encode_to(&::scalecodec::Compact(*#access), __dest);
        },
        FieldMode::Skip => quote! {},
    }
}

fn size_hint_field(field: &FieldInfo, access: &TokenStream2) -> TokenStream2 {
    match field.mode {
        FieldMode::Plain => quote! { + ::scalecodec::Encodable::size_hint(#access) },
        FieldMode::Compact => quote! { + ::scalecodec::compact_len(#access) },
        FieldMode::Skip => quote! {},
    }
}

fn decode_field(field: &FieldInfo) -> TokenStream2 {
    let ty = &field.ty;
    match field.mode {
        FieldMode::Plain => quote! {
            <#ty as ::scalecodec::Decodable>::decode(__input)?
        },
        FieldMode::Compact => quote! {
            <::scalecodec::Compact<#ty> as ::scalecodec::Decodable>::decode(__input)?.0
        },
        FieldMode::Skip => quote! { ::core::default::Default::default() },
    }
}

/// Constructor expression `Path { a: .., b: .. }` / `Path(..)` / `Path`.
fn construct(path: TokenStream2, fields: &Fields, infos: &[FieldInfo]) -> TokenStream2 {
    let values = infos.iter().map(|f| {
        let value = decode_field(f);
        match &f.ident {
            Some(ident) => quote! { #ident: #value },
            None => value,
        }
    });
    match fields {
        Fields::Named(_) => quote! { #path { #(#values),* } },
        Fields::Unnamed(_) => quote! { #path ( #(#values),* ) },
        Fields::Unit => path,
    }
}

// --- Generator: Encodable ---

fn expand_encodable(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let generics = add_bounds(&input.generics, quote!(::scalecodec::Encodable));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (encode_body, size_body, extra) = match &input.data {
        Data::Struct(ds) => {
            reject_discriminant(&input.attrs, name)?;
            let infos = collect_fields(&ds.fields)?;
            let accesses: Vec<TokenStream2> = infos
                .iter()
                .enumerate()
                .map(|(i, f)| match &f.ident {
                    Some(ident) => quote! { &self.#ident },
                    None => {
                        let index = Index::from(i);
                        quote! { &self.#index }
                    }
                })
                .collect();
            let writes = infos.iter().zip(&accesses).map(|(f, a)| encode_field(f, a));
            let hints = infos.iter().zip(&accesses).map(|(f, a)| size_hint_field(f, a));
            (
                quote! { #(#writes)* },
                quote! { 0usize #(#hints)* },
                quote! {},
            )
        }
        Data::Enum(de) => match parse_container_attributes(&input.attrs)? {
            Some(repr) => encode_by_discriminant(name, de, &repr)?,
            None => encode_tagged(name, &generics, de)?,
        },
        Data::Union(_) => {
            return Err(syn::Error::new(
                name.span(),
                "Encodable cannot be derived for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::scalecodec::Encodable for #name #ty_generics #where_clause {
            fn encode_to<__O: ::scalecodec::Output + ?Sized>(&self, __dest: &mut __O) {
                #encode_body
            }

            fn size_hint(&self) -> usize {
                #size_body
            }
        }

        #extra
    })
}

fn encode_tagged(
    name: &Ident,
    generics: &Generics,
    de: &DataEnum,
) -> syn::Result<(TokenStream2, TokenStream2, TokenStream2)> {
    check_variant_count(name, de)?;
    let count = de.variants.len();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut encode_arms = Vec::new();
    let mut size_arms = Vec::new();
    let mut index_arms = Vec::new();
    for (index, variant) in de.variants.iter().enumerate() {
        let vname = &variant.ident;
        let infos = collect_fields(&variant.fields)?;
        let names = bindings(&infos);
        let pattern = variant_pattern(&variant.fields, &infos, &names);
        let tag = u8::try_from(index)
            .map_err(|_| syn::Error::new(vname.span(), "variant index exceeds 255"))?;

        let accesses: Vec<TokenStream2> = names.iter().map(|n| quote! { #n }).collect();
        let writes = infos.iter().zip(&accesses).map(|(f, a)| encode_field(f, a));
        let hints = infos.iter().zip(&accesses).map(|(f, a)| size_hint_field(f, a));

        encode_arms.push(quote! {
            Self::#vname #pattern => {
                ::scalecodec::variant::encode_variant_index(#tag, __dest);
                #(#writes)*
            }
        });
        size_arms.push(quote! {
            Self::#vname #pattern => 1usize #(#hints)*,
        });
        index_arms.push(quote! {
            Self::#vname { .. } => #tag,
        });
    }

    // An uninhabited enum has no value to encode.
    let (encode_body, size_body, index_body) = if count == 0 {
        (
            quote! { match *self {} },
            quote! { match *self {} },
            quote! { match *self {} },
        )
    } else {
        (
            quote! { match self { #(#encode_arms)* } },
            quote! { match self { #(#size_arms)* } },
            quote! { match self { #(#index_arms)* } },
        )
    };

    let variants_impl = quote! {
        impl #impl_generics ::scalecodec::Variants for #name #ty_generics #where_clause {
            const VARIANT_COUNT: usize = #count;

            fn variant_index(&self) -> u8 {
                #index_body
            }
        }
    };
    Ok((encode_body, size_body, variants_impl))
}

fn encode_by_discriminant(
    name: &Ident,
    de: &DataEnum,
    repr: &Ident,
) -> syn::Result<(TokenStream2, TokenStream2, TokenStream2)> {
    require_fieldless(name, de)?;
    let arms = de.variants.iter().map(|variant| {
        let vname = &variant.ident;
        quote! {
            Self::#vname => ::scalecodec::Encodable::encode_to(&(Self::#vname as #repr), __dest),
        }
    });
    let encode_body = if de.variants.is_empty() {
        quote! { match *self {} }
    } else {
        quote! { match self { #(#arms)* } }
    };
    let width = quote! { ::core::mem::size_of::<#repr>() };
    Ok((encode_body, width, discriminant_guards(name, de, repr)))
}

/// One const assertion per variant: its discriminant must survive the cast to `repr`,
/// otherwise two variants could share a wire value.
fn discriminant_guards(name: &Ident, de: &DataEnum, repr: &Ident) -> TokenStream2 {
    let guards = de.variants.iter().map(|variant| {
        let vname = &variant.ident;
        let message = LitStr::new(
            &format!("discriminant of `{name}::{vname}` does not fit `{repr}`"),
            vname.span(),
        );
        quote! {
            const _: () = ::core::assert!(
                (#name::#vname as i128) == ((#name::#vname as #repr) as i128),
                #message
            );
        }
    });
    quote! { #(#guards)* }
}

// --- Generator: Decodable ---

fn expand_decodable(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let generics = add_bounds(&input.generics, quote!(::scalecodec::Decodable));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(ds) => {
            reject_discriminant(&input.attrs, name)?;
            let infos = collect_fields(&ds.fields)?;
            let value = construct(quote! { Self }, &ds.fields, &infos);
            quote! { ::core::result::Result::Ok(#value) }
        }
        Data::Enum(de) => match parse_container_attributes(&input.attrs)? {
            Some(repr) => decode_by_discriminant(name, de, &repr)?,
            None => decode_tagged(name, de)?,
        },
        Data::Union(_) => {
            return Err(syn::Error::new(
                name.span(),
                "Decodable cannot be derived for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::scalecodec::Decodable for #name #ty_generics #where_clause {
            fn decode(__input: &mut ::scalecodec::Cursor<'_>) -> ::scalecodec::Result<Self> {
                #body
            }
        }
    })
}

fn decode_tagged(name: &Ident, de: &DataEnum) -> syn::Result<TokenStream2> {
    check_variant_count(name, de)?;
    let count = de.variants.len();

    let mut arms = Vec::new();
    for (index, variant) in de.variants.iter().enumerate() {
        let vname = &variant.ident;
        let infos = collect_fields(&variant.fields)?;
        let tag = u8::try_from(index)
            .map_err(|_| syn::Error::new(vname.span(), "variant index exceeds 255"))?;
        let value = construct(quote! { Self::#vname }, &variant.fields, &infos);
        arms.push(quote! {
            #tag => ::core::result::Result::Ok(#value),
        });
    }

    Ok(quote! {
        let __index = ::scalecodec::variant::decode_variant_index(__input, #count)?;
        match __index {
            #(#arms)*
            _ => ::core::result::Result::Err(::scalecodec::DecodeError::InvalidVariantIndex {
                index: __index,
                count: #count,
            }),
        }
    })
}

fn decode_by_discriminant(name: &Ident, de: &DataEnum, repr: &Ident) -> syn::Result<TokenStream2> {
    require_fieldless(name, de)?;
    let type_name = LitStr::new(&name.to_string(), Span::call_site());
    let checks = de.variants.iter().map(|variant| {
        let vname = &variant.ident;
        quote! {
            if __value == Self::#vname as #repr {
                return ::core::result::Result::Ok(Self::#vname);
            }
        }
    });

    Ok(quote! {
        let __value = <#repr as ::scalecodec::Decodable>::decode(__input)?;
        #(#checks)*
        ::core::result::Result::Err(::scalecodec::variant::invalid_enum_value(#type_name))
    })
}

// --- Validation ---

fn check_variant_count(name: &Ident, de: &DataEnum) -> syn::Result<()> {
    if de.variants.len() > MAX_VARIANTS {
        return Err(syn::Error::new(
            name.span(),
            format!(
                "enum has {} variants; a one-byte tag supports at most {}",
                de.variants.len(),
                MAX_VARIANTS
            ),
        ));
    }
    Ok(())
}

fn require_fieldless(name: &Ident, de: &DataEnum) -> syn::Result<()> {
    match de.variants.iter().find(|v| !matches!(v.fields, Fields::Unit)) {
        Some(v) => Err(syn::Error::new(
            v.ident.span(),
            format!("`discriminant` requires every variant of `{name}` to be fieldless"),
        )),
        None => Ok(()),
    }
}

fn reject_discriminant(attrs: &[Attribute], name: &Ident) -> syn::Result<()> {
    if parse_container_attributes(attrs)?.is_some() {
        return Err(syn::Error::new(
            name.span(),
            "`discriminant` is only supported on enums",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminant_enums_carry_one_guard_per_variant() {
        let input: DeriveInput = parse_quote! {
            #[scale(discriminant = "u8")]
            enum Wide {
                Low = 0,
                High = 256,
            }
        };
        let expanded = expand_encodable(&input).unwrap().to_string();
        assert_eq!(expanded.matches("const _ : () =").count(), 2);
        assert!(expanded.contains("discriminant of `Wide::High` does not fit `u8`"));
    }

    #[test]
    fn tagged_enums_need_no_guard() {
        let input: DeriveInput = parse_quote! {
            enum Plain {
                A,
                B(u8),
            }
        };
        let expanded = expand_encodable(&input).unwrap().to_string();
        assert!(!expanded.contains("does not fit"));
    }
}
