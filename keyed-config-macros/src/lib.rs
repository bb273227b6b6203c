//! Proc macros for the keyed-config crate.
//!
//! This crate provides the `#[derive(ConfigKeys)]` macro.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Fields, Lit, parse_macro_input, spanned::Spanned};

/// Key metadata parsed from a `#[key(...)]` variant attribute.
struct KeySpec {
    path: String,
    kind: String,
    default: Expr,
}

impl KeySpec {
    fn from_variant(variant: &syn::Variant) -> syn::Result<Self> {
        let mut path = None;
        let mut kind = None;
        let mut default = None;

        for attr in &variant.attrs {
            if attr.path().is_ident("key") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("path") {
                        path = Some(lit_str(&meta.value()?.parse()?, "path")?);
                    } else if meta.path.is_ident("kind") {
                        kind = Some(lit_str(&meta.value()?.parse()?, "kind")?);
                    } else if meta.path.is_ident("default") {
                        default = Some(meta.value()?.parse()?);
                    } else {
                        return Err(syn::Error::new(
                            meta.path.span(),
                            "expected `path`, `kind` or `default`",
                        ));
                    }
                    Ok(())
                })?;
            }
        }

        let span = variant.ident.span();
        let path = path
            .ok_or_else(|| syn::Error::new(span, "missing required attribute: #[key(path = \"...\")]"))?;
        let kind = kind
            .ok_or_else(|| syn::Error::new(span, "missing required attribute: #[key(kind = \"...\")]"))?;
        let default = default
            .ok_or_else(|| syn::Error::new(span, "missing required attribute: #[key(default = ...)]"))?;

        Ok(Self { path, kind, default })
    }
}

fn lit_str(value: &Expr, what: &str) -> syn::Result<String> {
    if let Expr::Lit(expr_lit) = value {
        if let Lit::Str(lit_str) = &expr_lit.lit {
            return Ok(lit_str.value());
        }
    }
    Err(syn::Error::new(
        value.span(),
        format!("{what} must be a string literal"),
    ))
}

/// Derive macro implementing the `ConfigKey` trait for a fieldless enum.
///
/// Each variant declares its storage path, value kind, and default through
/// a `#[key(...)]` attribute. Supported kinds are `string`, `string_list`,
/// `int`, `int_list`, `bool`, and `double`; the default must be a matching
/// literal (or array of literals for the list kinds).
///
/// # Example
///
/// ```rust
/// use keyed_config::ConfigKeys;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, ConfigKeys)]
/// enum SettingsKey {
///     #[key(path = "general.prefix", kind = "string", default = "&7[app] ")]
///     Prefix,
///     #[key(path = "rewards.milestones", kind = "int_list", default = [10, 50, 100])]
///     Milestones,
///     #[key(path = "features.broadcast", kind = "bool", default = true)]
///     Broadcast,
/// }
/// ```
///
/// This expands to roughly:
///
/// ```rust,ignore
/// impl keyed_config::ConfigKey for SettingsKey {
///     fn descriptor(&self) -> keyed_config::KeyDescriptor {
///         match self { /* one descriptor per variant */ }
///     }
///
///     fn all() -> &'static [Self] {
///         &[SettingsKey::Prefix, SettingsKey::Milestones, SettingsKey::Broadcast]
///     }
/// }
/// ```
#[proc_macro_derive(ConfigKeys, attributes(key))]
pub fn derive_config_keys(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_config_keys_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_config_keys_impl(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let data = match &input.data {
        Data::Enum(data) => data,
        _ => {
            return Err(syn::Error::new(
                name.span(),
                "ConfigKeys can only be derived for enums",
            ));
        }
    };

    let mut arms = Vec::new();
    let mut idents = Vec::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.ident.span(),
                "ConfigKeys variants must be unit variants",
            ));
        }

        let spec = KeySpec::from_variant(variant)?;
        let ident = &variant.ident;
        let path = &spec.path;
        let default = &spec.default;

        let (kind, default_value) = match spec.kind.as_str() {
            "string" => (
                quote! { String },
                quote! { ::keyed_config::ConfigValue::String((#default).to_string()) },
            ),
            "string_list" => (
                quote! { StringList },
                quote! {{
                    let items: &[&str] = &#default;
                    ::keyed_config::ConfigValue::StringList(
                        items.iter().map(|item| item.to_string()).collect(),
                    )
                }},
            ),
            "int" => (
                quote! { Int },
                quote! { ::keyed_config::ConfigValue::Int((#default) as i64) },
            ),
            "int_list" => (
                quote! { IntList },
                quote! {{
                    let items: &[i64] = &#default;
                    ::keyed_config::ConfigValue::IntList(items.to_vec())
                }},
            ),
            "bool" => (
                quote! { Bool },
                quote! { ::keyed_config::ConfigValue::Bool(#default) },
            ),
            "double" => (
                quote! { Double },
                quote! { ::keyed_config::ConfigValue::Double((#default) as f64) },
            ),
            other => {
                return Err(syn::Error::new(
                    variant.ident.span(),
                    format!(
                        "unknown kind `{other}`; expected one of `string`, `string_list`, `int`, `int_list`, `bool`, `double`"
                    ),
                ));
            }
        };

        arms.push(quote! {
            Self::#ident => ::keyed_config::KeyDescriptor {
                path: #path,
                kind: ::keyed_config::ValueKind::#kind,
                default: #default_value,
            },
        });
        idents.push(ident.clone());
    }

    Ok(quote! {
        impl ::keyed_config::ConfigKey for #name {
            fn descriptor(&self) -> ::keyed_config::KeyDescriptor {
                match self {
                    #(#arms)*
                }
            }

            fn all() -> &'static [Self] {
                &[#(Self::#idents,)*]
            }
        }
    })
}
