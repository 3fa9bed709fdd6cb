use proc_macro::TokenStream;
use quote::quote;

use syn::punctuated::Punctuated;
use syn::spanned::Spanned as _;
use syn::{
    Data, DeriveInput, Error, FnArg, GenericArgument, Ident, ImplItem, ItemImpl, ItemStruct,
    LitStr, Meta, Pat, PathArguments, ReturnType, Token, Type,
};

const INJECT_ATTR: &str = "inject";
const PROVIDE_ATTR: &str = "provide";

fn is_slot_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
    {
        return segment.ident == "Slot";
    }
    false
}

fn extract_option_type(ty: &Type) -> Option<Type> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Option"
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner.clone());
    }
    None
}

/// Derive macro for Target trait
#[proc_macro_derive(Target, attributes(inject))]
pub fn derive_target(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    handle_derive_target(input)
}

/// Attribute macro for impl blocks with inject methods
#[proc_macro_attribute]
pub fn target(attr: TokenStream, item: TokenStream) -> TokenStream {
    let fields = match parse_target_fields(attr) {
        Ok(v) => v,
        Err(err) => return TokenStream::from(err.to_compile_error()),
    };
    if let Ok(item_impl) = syn::parse::<ItemImpl>(item) {
        return handle_target_impl(item_impl, fields);
    }
    TokenStream::from(
        Error::new(
            proc_macro2::Span::call_site(),
            "#[target] can only be applied to impl blocks",
        )
        .to_compile_error(),
    )
}

/// Attribute macro for impl blocks with provide methods
#[proc_macro_attribute]
pub fn provider(_attr: TokenStream, item: TokenStream) -> TokenStream {
    if let Ok(item_impl) = syn::parse::<ItemImpl>(item) {
        return handle_provider_impl(item_impl);
    }
    TokenStream::from(
        Error::new(
            proc_macro2::Span::call_site(),
            "#[provider] can only be applied to impl blocks",
        )
        .to_compile_error(),
    )
}

fn handle_derive_target(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        _ => {
            return TokenStream::from(
                Error::new(name.span(), "Only structs are supported").to_compile_error(),
            );
        }
    };

    let mut members = Vec::new();

    match fields {
        syn::Fields::Named(fields) => {
            for field in &fields.named {
                if !field
                    .attrs
                    .iter()
                    .any(|attr| attr.path().is_ident(INJECT_ATTR))
                {
                    continue;
                }
                if !is_slot_type(&field.ty) {
                    return TokenStream::from(
                        Error::new(field.ty.span(), "Injected fields must be of type Slot<T>")
                            .to_compile_error(),
                    );
                }
                let field_ident = field.ident.as_ref().unwrap();
                let field_name = field_ident.to_string();
                members.push(quote! { self.#field_ident.binding(#field_name) });
            }
        }
        syn::Fields::Unnamed(_) => {
            return TokenStream::from(
                Error::new(name.span(), "Tuple structs are not supported").to_compile_error(),
            );
        }
        syn::Fields::Unit => {}
    }

    quote! {
        impl ::graft::Target for #name {
            fn members(&self) -> ::std::vec::Vec<::graft::MemberBinding<'_>> {
                ::std::vec![#(#members),*]
            }
        }
    }
    .into()
}

fn parse_target_fields(attr: TokenStream) -> syn::Result<Vec<Ident>> {
    if attr.is_empty() {
        return Ok(Vec::new());
    }
    let meta = syn::parse::<Meta>(attr)?;
    let list = meta.require_list()?;
    if !list.path.is_ident("fields") {
        return Err(Error::new(list.path.span(), "Expected fields(...)"));
    }
    let idents = list.parse_args_with(Punctuated::<Ident, Token![,]>::parse_terminated)?;
    Ok(idents.into_iter().collect())
}

fn handle_target_impl(input: ItemImpl, fields: Vec<Ident>) -> TokenStream {
    if input.trait_.is_some() {
        return TokenStream::from(
            Error::new(input.span(), "Trait impls are not supported").to_compile_error(),
        );
    }

    let self_ty = &input.self_ty;
    let mut members = Vec::new();

    for field in &fields {
        let field_name = field.to_string();
        members.push(quote! { self.#field.binding(#field_name) });
    }

    let mut found_methods = false;
    for item in &input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        if !method
            .attrs
            .iter()
            .any(|attr| attr.path().is_ident(INJECT_ATTR))
        {
            continue;
        }
        found_methods = true;

        match method.sig.receiver() {
            Some(receiver) if receiver.reference.is_some() && receiver.mutability.is_none() => {}
            _ => {
                return TokenStream::from(
                    Error::new(method.sig.span(), "Inject methods must take &self")
                        .to_compile_error(),
                );
            }
        }
        if method.sig.asyncness.is_some() {
            return TokenStream::from(
                Error::new(method.sig.span(), "Inject methods cannot be async")
                    .to_compile_error(),
            );
        }
        if !matches!(method.sig.output, ReturnType::Default) {
            return TokenStream::from(
                Error::new(
                    method.sig.output.span(),
                    "Inject methods cannot have a return type",
                )
                .to_compile_error(),
            );
        }

        let mut param_keys = Vec::new();
        let mut param_lets = Vec::new();
        let mut param_names = Vec::new();

        for fn_arg in &method.sig.inputs {
            let FnArg::Typed(pat_type) = fn_arg else {
                continue;
            };
            let Pat::Ident(pat_ident) = pat_type.pat.as_ref() else {
                return TokenStream::from(
                    Error::new(pat_type.pat.span(), "Only simple bindings supported")
                        .to_compile_error(),
                );
            };
            let arg_name = &pat_ident.ident;
            let arg_ty = &pat_type.ty;
            param_keys.push(quote! { ::graft::TypeKey::of::<#arg_ty>() });
            param_lets.push(quote! {
                let #arg_name = match registry.get::<#arg_ty>() {
                    ::std::option::Option::Some(v) => v,
                    ::std::option::Option::None => {
                        return ::std::result::Result::Err(::graft::TypeKey::of::<#arg_ty>());
                    }
                };
            });
            param_names.push(quote! { #arg_name });
        }

        let method_name = &method.sig.ident;
        let member_name = method_name.to_string();
        members.push(quote! {
            ::graft::MemberBinding::from(::graft::MethodBinding::new(
                #member_name,
                ::std::vec![#(#param_keys),*],
                move |registry: &::graft::Registry| {
                    #(#param_lets)*
                    self.#method_name(#(#param_names),*);
                    ::std::result::Result::Ok(())
                },
            ))
        });
    }

    if !found_methods && fields.is_empty() {
        return TokenStream::from(
            Error::new(input.span(), "No inject members found").to_compile_error(),
        );
    }

    // Emit the impl with inject attributes removed.
    let mut cleaned_input = input.clone();
    for item in &mut cleaned_input.items {
        if let ImplItem::Fn(method) = item {
            method
                .attrs
                .retain(|attr| !attr.path().is_ident(INJECT_ATTR));
        }
    }

    quote! {
        #cleaned_input

        impl ::graft::Target for #self_ty {
            fn members(&self) -> ::std::vec::Vec<::graft::MemberBinding<'_>> {
                ::std::vec![#(#members),*]
            }
        }
    }
    .into()
}

fn handle_provider_impl(input: ItemImpl) -> TokenStream {
    if input.trait_.is_some() {
        return TokenStream::from(
            Error::new(input.span(), "Trait impls are not supported").to_compile_error(),
        );
    }

    let self_ty = &input.self_ty;
    let mut operations = Vec::new();

    for item in &input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        if !method
            .attrs
            .iter()
            .any(|attr| attr.path().is_ident(PROVIDE_ATTR))
        {
            continue;
        }

        match method.sig.receiver() {
            Some(receiver) if receiver.reference.is_some() && receiver.mutability.is_none() => {}
            _ => {
                return TokenStream::from(
                    Error::new(method.sig.span(), "Provide methods must take &self")
                        .to_compile_error(),
                );
            }
        }
        if method.sig.asyncness.is_some() {
            return TokenStream::from(
                Error::new(method.sig.span(), "Provide methods cannot be async")
                    .to_compile_error(),
            );
        }
        if method.sig.inputs.len() != 1 {
            return TokenStream::from(
                Error::new(method.sig.span(), "Provide methods cannot take parameters")
                    .to_compile_error(),
            );
        }
        let return_type = match &method.sig.output {
            ReturnType::Default => {
                return TokenStream::from(
                    Error::new(method.sig.span(), "Provide methods must have a return type")
                        .to_compile_error(),
                );
            }
            ReturnType::Type(_, ty) => ty.as_ref(),
        };

        let method_name = &method.sig.ident;
        let operation_name = method_name.to_string();
        // An Option return models the operation yielding no instance.
        if extract_option_type(return_type).is_some() {
            operations.push(quote! {
                ::graft::ProvideOp::new(#operation_name, move || self.#method_name())
            });
        } else {
            operations.push(quote! {
                ::graft::ProvideOp::new(#operation_name, move || {
                    ::std::option::Option::Some(self.#method_name())
                })
            });
        }
    }

    if operations.is_empty() {
        return TokenStream::from(
            Error::new(input.span(), "No provide methods found").to_compile_error(),
        );
    }

    // Emit the impl with provide attributes removed.
    let mut cleaned_input = input.clone();
    for item in &mut cleaned_input.items {
        if let ImplItem::Fn(method) = item {
            method
                .attrs
                .retain(|attr| !attr.path().is_ident(PROVIDE_ATTR));
        }
    }

    quote! {
        #cleaned_input

        impl ::graft::Provider for #self_ty {
            fn operations(&self) -> ::std::vec::Vec<::graft::ProvideOp<'_>> {
                ::std::vec![#(#operations),*]
            }
        }
    }
    .into()
}

/// Attribute macro binding a config struct to its section key
#[proc_macro_attribute]
pub fn config_section(args: TokenStream, input: TokenStream) -> TokenStream {
    let key_arg = syn::parse_macro_input!(args as LitStr);
    let input_struct = syn::parse_macro_input!(input as ItemStruct);

    let struct_name = &input_struct.ident;
    let key = key_arg.value();

    let expanded = quote! {
        #input_struct

        impl ::graft_base::ConfigSection for #struct_name {
            fn key() -> &'static str {
                #key
            }
        }
    };

    TokenStream::from(expanded)
}
