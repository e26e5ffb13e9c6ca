use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, FnArg, ItemFn, PatType, ReturnType, Type};

fn formatted_arg_error_msg(arg_name: &str, arg_pos: usize, fn_name: &str) -> String {
    format!(
        "Expected argument {} ('{}') to be f64, for builtin {}",
        arg_pos, arg_name, fn_name
    )
}

fn is_f64(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path.qself.is_none() && type_path.path.is_ident("f64"),
        _ => false,
    }
}

/// Turns `fn name(a: f64, b: f64) -> f64 { .. }` into a slice-taking builtin.
///
/// The expansion is `pub fn name(args: &[f64]) -> Result<f64, crate::functions::CallError>`
/// which rejects a wrong argument count, plus `pub const NAME_ARITY: usize` for the
/// registry table. Only `f64` parameters and an `f64` return type are accepted.
#[proc_macro_attribute]
pub fn builtin_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    expand_builtin(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_builtin(input: &ItemFn) -> syn::Result<TokenStream2> {
    let fn_name = &input.sig.ident;
    let fn_attrs = &input.attrs;
    let fn_body = &input.block;
    let name_str = fn_name.to_string();
    let arity_ident = format_ident!("{}_ARITY", name_str.to_uppercase());

    match &input.sig.output {
        ReturnType::Type(_, ty) if is_f64(ty) => {}
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "builtin functions must return f64",
            ))
        }
    }

    let mut arg_extractions = Vec::new();

    for (i, arg) in input.sig.inputs.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return Err(syn::Error::new_spanned(
                arg,
                "builtin functions cannot take self",
            ));
        };
        let arg_name = match pat.as_ref() {
            syn::Pat::Ident(ident) => &ident.ident,
            other => return Err(syn::Error::new_spanned(other, "Unsupported pattern")),
        };
        if !is_f64(ty) {
            let msg = formatted_arg_error_msg(&arg_name.to_string(), i, &name_str);
            return Err(syn::Error::new_spanned(ty, msg));
        }

        arg_extractions.push(quote! {
            let #arg_name: f64 = args[#i];
        });
    }

    let args_len = arg_extractions.len();
    Ok(quote! {
        #[doc = concat!("Number of arguments taken by `", #name_str, "`.")]
        pub const #arity_ident: usize = #args_len;

        #(#fn_attrs)*
        pub fn #fn_name(args: &[f64]) -> ::std::result::Result<f64, crate::functions::CallError> {
            if args.len() != #args_len {
                return Err(crate::functions::CallError::Arity {
                    function: #name_str,
                    expected: #args_len,
                    found: args.len(),
                });
            }

            #(#arg_extractions)*

            Ok(#fn_body)
        }
    })
}
