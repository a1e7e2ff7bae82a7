//! Implementation of the `path!` procedural macro.
//!
//! The closure body is walked from the outermost access inward, then the
//! collected steps are replayed in source order as `PathBuilder` calls:
//!
//! ```text
//! path!(|s, i| s.items[i].name)
//! // expands to
//! ::pathlens::Path::builder().attr("items").var().attr("name").build()
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Expr, ExprClosure, ExprLit, Ident, Lit, Member, Pat, Stmt};

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Attribute(String),
    Fixed(usize),
    Variable,
}

pub fn path_impl(input: TokenStream) -> TokenStream {
    let expanded = syn::parse::<ExprClosure>(input)
        .and_then(|closure| generate_path(&closure))
        .unwrap_or_else(|error| error.to_compile_error());

    TokenStream::from(expanded)
}

fn generate_path(closure: &ExprClosure) -> syn::Result<TokenStream2> {
    let steps = collect_closure_steps(closure)?;
    let calls = steps.iter().map(|step| match step {
        Step::Attribute(name) => quote! { .attr(#name) },
        Step::Fixed(index) => quote! { .index(#index) },
        Step::Variable => quote! { .var() },
    });

    Ok(quote! {
        ::pathlens::Path::builder() #(#calls)* .build()
    })
}

fn collect_closure_steps(closure: &ExprClosure) -> syn::Result<Vec<Step>> {
    let root = root_parameter(closure)?;
    let mut steps = Vec::new();
    collect_steps(tail_expression(&closure.body)?, root, &mut steps)?;
    Ok(steps)
}

fn root_parameter(closure: &ExprClosure) -> syn::Result<&Ident> {
    let parameter = closure.inputs.first().ok_or_else(|| {
        syn::Error::new(
            closure.span(),
            "path! requires a closure whose first parameter is the root",
        )
    })?;

    let pattern = match parameter {
        Pat::Type(typed) => &*typed.pat,
        other => other,
    };

    match pattern {
        Pat::Ident(identifier) => Ok(&identifier.ident),
        other => Err(syn::Error::new(
            other.span(),
            "path! expected a plain identifier for the root parameter",
        )),
    }
}

/// Looks through blocks, `return`, parentheses and borrows to the access chain.
fn tail_expression(expression: &Expr) -> syn::Result<&Expr> {
    match expression {
        Expr::Block(block) => match block.block.stmts.as_slice() {
            [Stmt::Expr(inner, _)] => tail_expression(inner),
            _ => Err(syn::Error::new(
                block.span(),
                "path! expected a block with a single expression",
            )),
        },
        Expr::Return(returned) => returned.expr.as_deref().map_or_else(
            || {
                Err(syn::Error::new(
                    returned.span(),
                    "path! expected `return` with a value",
                ))
            },
            tail_expression,
        ),
        Expr::Paren(parenthesized) => tail_expression(&parenthesized.expr),
        Expr::Reference(reference) => tail_expression(&reference.expr),
        other => Ok(other),
    }
}

fn collect_steps(expression: &Expr, root: &Ident, steps: &mut Vec<Step>) -> syn::Result<()> {
    match expression {
        Expr::Path(path) if path.path.is_ident(root) => Ok(()),
        Expr::Paren(parenthesized) => collect_steps(&parenthesized.expr, root, steps),
        Expr::Field(field) => {
            collect_steps(&field.base, root, steps)?;
            steps.push(match &field.member {
                Member::Named(name) => Step::Attribute(name.unraw().to_string()),
                Member::Unnamed(index) => Step::Fixed(index.index as usize),
            });
            Ok(())
        }
        Expr::Index(indexed) => {
            collect_steps(&indexed.expr, root, steps)?;
            steps.push(index_step(&indexed.index)?);
            Ok(())
        }
        Expr::Path(path) => Err(syn::Error::new(
            path.span(),
            format!("path! expected the root parameter `{root}`"),
        )),
        other => Err(syn::Error::new(
            other.span(),
            "path! supports only field access and indexing on the root parameter",
        )),
    }
}

fn index_step(index: &Expr) -> syn::Result<Step> {
    match index {
        Expr::Lit(ExprLit {
            lit: Lit::Int(literal_integer),
            ..
        }) => Ok(Step::Fixed(literal_integer.base10_parse::<usize>()?)),
        Expr::Lit(ExprLit {
            lit: Lit::Str(literal_string),
            ..
        }) => Ok(Step::Attribute(literal_string.value())),
        Expr::Path(_) => Ok(Step::Variable),
        Expr::Paren(parenthesized) => index_step(&parenthesized.expr),
        other => Err(syn::Error::new(
            other.span(),
            "path! expected an integer literal, a string literal, or a variable as index",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn steps_of(source: &str) -> syn::Result<Vec<Step>> {
        let closure: ExprClosure = syn::parse_str(source).expect("test input must be a closure");
        collect_closure_steps(&closure)
    }

    #[rstest]
    fn test_attribute_and_variable_steps() {
        assert_eq!(
            steps_of("|d, i| d.foo.bar[i].baz[5]").unwrap(),
            vec![
                Step::Attribute("foo".to_string()),
                Step::Attribute("bar".to_string()),
                Step::Variable,
                Step::Attribute("baz".to_string()),
                Step::Fixed(5),
            ]
        );
    }

    #[rstest]
    #[case("|s: &State| &s.list", vec![Step::Attribute("list".to_string())])]
    #[case("|s| { s.list }", vec![Step::Attribute("list".to_string())])]
    #[case("|s| { return s.list; }", vec![Step::Attribute("list".to_string())])]
    #[case("|s| (s.list)", vec![Step::Attribute("list".to_string())])]
    fn test_wrappers_are_looked_through(#[case] source: &str, #[case] expected: Vec<Step>) {
        assert_eq!(steps_of(source).unwrap(), expected);
    }

    #[rstest]
    fn test_root_only_is_empty() {
        assert_eq!(steps_of("|s| s").unwrap(), Vec::new());
    }

    #[rstest]
    fn test_root_index_and_tuple_field() {
        assert_eq!(
            steps_of("|rows| rows[0].pair.1").unwrap(),
            vec![
                Step::Fixed(0),
                Step::Attribute("pair".to_string()),
                Step::Fixed(1),
            ]
        );
    }

    #[rstest]
    fn test_string_key_and_raw_identifier() {
        assert_eq!(
            steps_of(r#"|s| s.r#type["display name"]"#).unwrap(),
            vec![
                Step::Attribute("type".to_string()),
                Step::Attribute("display name".to_string()),
            ]
        );
    }

    #[rstest]
    #[case("|s| s.items.len()")]
    #[case("|s| other.items")]
    #[case("|s, i| s.items[i + 1]")]
    #[case("|s| { let x = 1; s.items }")]
    #[case("|(a, b)| a.items")]
    fn test_unsupported_expressions_are_rejected(#[case] source: &str) {
        assert!(steps_of(source).is_err());
    }
}
