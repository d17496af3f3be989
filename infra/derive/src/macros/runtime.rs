use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, Ident, ItemFn, ReturnType, Type};

/// Expands `#[artis_runtime::main]`.
#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return Error::new_spanned(
            &input.sig.ident,
            "#[artis_runtime::main] can only be used on async functions",
        )
        .to_compile_error();
    }

    if !returns_result(&input.sig.output) {
        return Error::new_spanned(
            &input.sig.output,
            "#[artis_runtime::main] requires a Result return type",
        )
        .to_compile_error();
    }

    let profile = match profile_constructor(args) {
        Ok(profile) => profile,
        Err(err) => return err,
    };

    let ItemFn { attrs, vis, sig, block } = input;
    let name = &sig.ident;
    let output = &sig.output;

    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let profile = #profile;
            let rt = ::artis_runtime::build_runtime(&profile)?;
            rt.block_on(async #block)
        }
    }
}

fn profile_constructor(args: TokenStream) -> Result<TokenStream, TokenStream> {
    if args.is_empty() {
        return Ok(quote! { ::artis_runtime::RuntimeProfile::default() });
    }

    let ident: Ident = syn::parse2(args).map_err(|err| err.to_compile_error())?;
    match ident.to_string().as_str() {
        "event_loop" => Ok(quote! { ::artis_runtime::RuntimeProfile::event_loop() }),
        "default" => Ok(quote! { ::artis_runtime::RuntimeProfile::default() }),
        _ => Err(Error::new_spanned(ident, "Unknown runtime profile. Use: event_loop or default")
            .to_compile_error()),
    }
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = &**ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| seg.ident == "Result")
}
