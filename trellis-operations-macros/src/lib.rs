//! The `#[operation]` attribute.
//!
//! Applied to a command struct, it implements `trellis_operations::Operation`
//! using the attribute arguments for verb/noun/description and the struct's
//! named fields for the parameter list.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, DeriveInput, Expr, Field, Lit, LitStr, Meta, Type};

/// Derive `Operation` for a command struct.
///
/// ```ignore
/// #[operation(verb = "rename", noun = "board", description = "Change a board's title")]
/// #[derive(Debug, Deserialize, Serialize)]
/// pub struct RenameBoard {
///     /// Board to rename
///     pub board_id: BoardId,
///     /// New title
///     pub title: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn operation(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut verb: Option<LitStr> = None;
    let mut noun: Option<LitStr> = None;
    let mut description: Option<LitStr> = None;

    let args_parser = syn::meta::parser(|meta| {
        let slot = if meta.path.is_ident("verb") {
            &mut verb
        } else if meta.path.is_ident("noun") {
            &mut noun
        } else if meta.path.is_ident("description") {
            &mut description
        } else {
            return Err(meta.error("expected `verb`, `noun` or `description`"));
        };
        *slot = Some(meta.value()?.parse()?);
        Ok(())
    });
    parse_macro_input!(attr with args_parser);

    let input = parse_macro_input!(item as DeriveInput);

    match expand(&input, verb, noun, description) {
        Ok(tokens) => tokens.into(),
        Err(err) => {
            let err = err.to_compile_error();
            quote!(#input #err).into()
        }
    }
}

fn expand(
    input: &DeriveInput,
    verb: Option<LitStr>,
    noun: Option<LitStr>,
    description: Option<LitStr>,
) -> syn::Result<TokenStream2> {
    let span = input.ident.span();
    let verb = verb.ok_or_else(|| syn::Error::new(span, "missing `verb`"))?;
    let noun = noun.ok_or_else(|| syn::Error::new(span, "missing `noun`"))?;
    let description = description.ok_or_else(|| syn::Error::new(span, "missing `description`"))?;

    let params: Vec<TokenStream2> = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            syn::Fields::Named(fields) => fields.named.iter().map(param_meta).collect(),
            syn::Fields::Unit => Vec::new(),
            syn::Fields::Unnamed(fields) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "operations need named fields",
                ))
            }
        },
        _ => return Err(syn::Error::new(span, "operations must be structs")),
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let count = params.len();

    Ok(quote! {
        #input

        impl #impl_generics ::trellis_operations::Operation for #name #ty_generics #where_clause {
            fn verb(&self) -> &'static str {
                #verb
            }

            fn noun(&self) -> &'static str {
                #noun
            }

            fn description(&self) -> &'static str {
                #description
            }

            fn parameters(&self) -> &'static [::trellis_operations::ParamMeta] {
                static PARAMS: [::trellis_operations::ParamMeta; #count] = [#(#params),*];
                &PARAMS
            }
        }
    })
}

fn param_meta(field: &Field) -> TokenStream2 {
    let name = field
        .ident
        .as_ref()
        .map(|ident| ident.to_string())
        .unwrap_or_default();
    let description = doc_comment(&field.attrs);
    let param_type = param_type(&field.ty);
    let required = if is_optional(&field.ty) {
        quote!()
    } else {
        quote!(.required())
    };

    quote! {
        ::trellis_operations::ParamMeta::new(#name)
            .description(#description)
            .param_type(#param_type)
            #required
    }
}

fn doc_comment(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Only `Option<_>` fields are optional
fn is_optional(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|seg| seg.ident == "Option")
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(path) => path.path.segments.last(),
        _ => None,
    }
}

fn param_type(ty: &Type) -> TokenStream2 {
    let Some(segment) = last_segment(ty) else {
        return quote!(::trellis_operations::ParamType::Object);
    };
    let ident = segment.ident.to_string();

    if ident == "Option" {
        if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
            if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                return param_type(inner);
            }
        }
    }

    match ident.as_str() {
        "String" | "str" => quote!(::trellis_operations::ParamType::String),
        "bool" => quote!(::trellis_operations::ParamType::Boolean),
        "Vec" => quote!(::trellis_operations::ParamType::Array),
        "i32" | "i64" | "u32" | "u64" | "usize" | "isize" => {
            quote!(::trellis_operations::ParamType::Integer)
        }
        // identifier newtypes serialize as integers
        id if id.ends_with("Id") => quote!(::trellis_operations::ParamType::Integer),
        _ => quote!(::trellis_operations::ParamType::Object),
    }
}
