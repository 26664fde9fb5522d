/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */

use super::{Expr, Expression, Literal, Numeric, Predicate, SqlType};

/// Factory for expressions that are not reachable from a path: constants
/// and raw SQL templates.
///
/// Templates reference their arguments as `{0}`, `{1}`, ... Literal
/// arguments are bound as parameters, never spliced into the text.
pub struct Expressions;

impl Expressions {
    pub fn constant<L: Literal>(value: L) -> Expression<L::Sql> {
        Expression::new(Expr::Value(value.into_literal()))
    }

    pub fn string_template(template: &str, args: Vec<Expr>) -> Expression<Option<String>> {
        Expression::new(Self::template(template, args))
    }

    pub fn number_template<T: SqlType<Kind = Numeric>>(template: &str, args: Vec<Expr>) -> Expression<T> {
        Expression::new(Self::template(template, args))
    }

    pub fn boolean_template(template: &str, args: Vec<Expr>) -> Predicate {
        Predicate::new(Self::template(template, args))
    }

    fn template(template: &str, args: Vec<Expr>) -> Expr {
        Expr::Template { template: template.to_string(), args }
    }
}

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateElement<'a> {
    Text(&'a str),
    Arg(usize),
}

/// Splits a template into text runs and `{n}` argument references. Braces
/// that do not enclose a number are kept as text.
pub fn parse_template(template: &str) -> Vec<TemplateElement<'_>> {
    let mut elements = Vec::new();
    let bytes = template.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' {
            let digits = bytes[i + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
            let close = i + 1 + digits;
            if digits > 0 && close < bytes.len() && bytes[close] == b'}' {
                if let Ok(index) = template[i + 1..close].parse::<usize>() {
                    if start < i {
                        elements.push(TemplateElement::Text(&template[start..i]));
                    }
                    elements.push(TemplateElement::Arg(index));
                    i = close + 1;
                    start = i;
                    continue;
                }
            }
        }
        i += 1;
    }
    if start < template.len() {
        elements.push(TemplateElement::Text(&template[start..]));
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_placeholders() {
        assert_eq!(
            parse_template("replace({0}, {1}, {2})"),
            vec![
                TemplateElement::Text("replace("),
                TemplateElement::Arg(0),
                TemplateElement::Text(", "),
                TemplateElement::Arg(1),
                TemplateElement::Text(", "),
                TemplateElement::Arg(2),
                TemplateElement::Text(")"),
            ]
        );
    }

    #[test]
    fn keeps_non_placeholder_braces() {
        assert_eq!(
            parse_template("{x}{12}"),
            vec![TemplateElement::Text("{x}"), TemplateElement::Arg(12)]
        );
    }
}
