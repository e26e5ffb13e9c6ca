use crate::ast::{ASTNode, Formula, Operator, SymbolKind, SymbolTable};
use crate::error::FormulaError;
use crate::functions;
use log::{debug, trace};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "formula.pest"]
pub struct FormulaParser;

impl FormulaParser {
    /// Parses `name(variable) = body` against the given whitelist.
    ///
    /// Every identifier in the body is checked against `symbols` before the body is
    /// parsed, so text that is not arithmetic at all still fails as an unknown symbol.
    pub fn parse_formula(input: &str, symbols: &SymbolTable) -> Result<Formula, FormulaError> {
        debug!("Parsing formula: {}", input);
        let (lhs, rhs) = split_definition(input)?;
        let (name, variable) = Self::parse_signature(lhs)?;
        symbols.check_variable(&variable)?;

        Self::check_symbols(rhs, &variable, symbols)?;
        if rhs.contains('=') {
            return Err(FormulaError::Format(
                "expected exactly one '=' in the definition".to_string(),
            ));
        }
        let body = Self::build_body(rhs, &variable, symbols)?;
        debug!("Parsed {}({}) = {:?}", name, variable, body);

        Ok(Formula {
            name,
            variable,
            body,
        })
    }

    /// Parses a right-hand side on its own.
    pub fn parse_body(
        body: &str,
        variable: &str,
        symbols: &SymbolTable,
    ) -> Result<ASTNode, FormulaError> {
        Self::check_symbols(body, variable, symbols)?;
        Self::build_body(body, variable, symbols)
    }

    pub fn is_identifier(name: &str) -> bool {
        FormulaParser::parse(Rule::symbol_name, name).is_ok()
    }

    fn build_body(
        body: &str,
        variable: &str,
        symbols: &SymbolTable,
    ) -> Result<ASTNode, FormulaError> {
        let pair = FormulaParser::parse(Rule::formula_body, body)
            .map_err(|e| FormulaError::Syntax(format!("Parse error: {}", e)))?
            .next()
            .ok_or_else(|| FormulaError::Syntax("Failed to parse formula body".to_string()))?;

        let builder = TreeBuilder { variable, symbols };
        let mut pairs = pair.into_inner();
        builder.build_expression(next_pair(&mut pairs, "expression")?)
    }

    fn parse_signature(lhs: &str) -> Result<(String, String), FormulaError> {
        let malformed = || {
            FormulaError::Format(format!(
                "left-hand side '{}' is not of the form name(variable)",
                lhs
            ))
        };
        let pair = FormulaParser::parse(Rule::signature, lhs)
            .map_err(|_| malformed())?
            .next()
            .ok_or_else(malformed)?;

        let mut pairs = pair.into_inner();
        let name = pairs.next().ok_or_else(malformed)?.as_str().to_string();
        let variable = pairs.next().ok_or_else(malformed)?.as_str().to_string();
        Ok((name, variable))
    }

    /// Rejects the first identifier that is neither the variable, a declared constant
    /// nor a builtin function.
    fn check_symbols(
        body: &str,
        variable: &str,
        symbols: &SymbolTable,
    ) -> Result<(), FormulaError> {
        let lexemes = FormulaParser::parse(Rule::lexemes, body)
            .map_err(|e| FormulaError::Syntax(format!("Parse error: {}", e)))?;

        for token in lexemes.flatten().filter(|p| p.as_rule() == Rule::identifier) {
            let name = token.as_str();
            if symbols.classify(name, variable).is_none() {
                debug!("Rejected identifier '{}' in: {}", name, body);
                return Err(FormulaError::UnknownSymbol(name.to_string()));
            }
        }
        Ok(())
    }
}

/// Splits on the first `=` and trims both sides.
fn split_definition(input: &str) -> Result<(&str, &str), FormulaError> {
    let (lhs, rhs) = input.split_once('=').ok_or_else(|| {
        FormulaError::Format("expected a definition of the form name(variable) = body".to_string())
    })?;
    Ok((lhs.trim(), rhs.trim()))
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, expected: &str) -> Result<Pair<'i, Rule>, FormulaError> {
    pairs
        .next()
        .ok_or_else(|| FormulaError::Syntax(format!("Expected {}", expected)))
}

struct TreeBuilder<'a> {
    variable: &'a str,
    symbols: &'a SymbolTable,
}

impl TreeBuilder<'_> {
    fn build_expression(&self, pair: Pair<Rule>) -> Result<ASTNode, FormulaError> {
        trace!("Building expression: {:?}", pair);
        let mut pairs = pair.into_inner();
        let mut node = self.build_term(next_pair(&mut pairs, "term")?)?;

        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::PLUS => Operator::Add,
                Rule::MINUS => Operator::Subtract,
                _ => {
                    return Err(FormulaError::Syntax(format!(
                        "Unexpected additive operator: {}",
                        operator_pair.as_str()
                    )))
                }
            };

            let right = self.build_term(next_pair(&mut pairs, "term")?)?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_term(&self, pair: Pair<Rule>) -> Result<ASTNode, FormulaError> {
        trace!("Building term: {:?}", pair);
        let mut pairs = pair.into_inner();
        let mut node = self.build_unary(next_pair(&mut pairs, "factor")?)?;

        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::STAR => Operator::Multiply,
                Rule::SLASH => Operator::Divide,
                _ => {
                    return Err(FormulaError::Syntax(format!(
                        "Unexpected term operator: {}",
                        operator_pair.as_str()
                    )))
                }
            };

            let right = self.build_unary(next_pair(&mut pairs, "factor")?)?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_unary(&self, pair: Pair<Rule>) -> Result<ASTNode, FormulaError> {
        let mut negations = 0usize;
        let mut node = None;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::MINUS => negations += 1,
                Rule::PLUS => {}
                Rule::power => node = Some(self.build_power(inner)?),
                _ => {
                    return Err(FormulaError::Syntax(format!(
                        "Unexpected prefix: {}",
                        inner.as_str()
                    )))
                }
            }
        }

        let mut node = node.ok_or_else(|| FormulaError::Syntax("Expected operand".to_string()))?;
        for _ in 0..negations {
            node = ASTNode::Negate(Box::new(node));
        }
        Ok(node)
    }

    fn build_power(&self, pair: Pair<Rule>) -> Result<ASTNode, FormulaError> {
        let mut pairs = pair.into_inner();
        let base = self.build_primary(next_pair(&mut pairs, "operand")?)?;

        match pairs.next() {
            Some(operator_pair) => {
                let operator = Operator::try_from(operator_pair.as_str())?;
                let exponent = self.build_unary(next_pair(&mut pairs, "exponent")?)?;
                Ok(ASTNode::BinaryOperation {
                    left: Box::new(base),
                    operator,
                    right: Box::new(exponent),
                })
            }
            None => Ok(base),
        }
    }

    fn build_primary(&self, pair: Pair<Rule>) -> Result<ASTNode, FormulaError> {
        trace!("Building primary expression: {:?}", pair);
        match pair.as_rule() {
            Rule::number => {
                let value = pair.as_str().parse::<f64>().map_err(|e| {
                    FormulaError::Syntax(format!("Invalid number '{}': {}", pair.as_str(), e))
                })?;
                if !value.is_finite() {
                    return Err(FormulaError::Syntax(format!(
                        "Number '{}' is out of range",
                        pair.as_str()
                    )));
                }
                Ok(ASTNode::Number(value))
            }
            Rule::identifier => self.build_identifier(pair.as_str()),
            Rule::group => {
                let mut pairs = pair.into_inner();
                self.build_expression(next_pair(&mut pairs, "expression")?)
            }
            Rule::call => self.build_call(pair),
            _ => Err(FormulaError::Syntax(format!(
                "Unexpected rule in primary expression: {:?}",
                pair.as_rule()
            ))),
        }
    }

    fn build_identifier(&self, name: &str) -> Result<ASTNode, FormulaError> {
        match self.symbols.classify(name, self.variable) {
            Some(SymbolKind::Variable) => Ok(ASTNode::Variable),
            Some(SymbolKind::Constant) => Ok(ASTNode::Constant(name.to_string())),
            Some(SymbolKind::Function) => Err(FormulaError::Syntax(format!(
                "Function '{}' must be called with arguments",
                name
            ))),
            None => Err(FormulaError::UnknownSymbol(name.to_string())),
        }
    }

    fn build_call(&self, pair: Pair<Rule>) -> Result<ASTNode, FormulaError> {
        let mut inner = pair.into_inner();
        let name = next_pair(&mut inner, "function name")?.as_str().to_string();

        let builtin = match self.symbols.classify(&name, self.variable) {
            Some(SymbolKind::Function) => functions::lookup(&name)
                .ok_or_else(|| FormulaError::UnknownSymbol(name.clone()))?,
            Some(_) => {
                return Err(FormulaError::Syntax(format!(
                    "'{}' is not a function",
                    name
                )))
            }
            None => return Err(FormulaError::UnknownSymbol(name)),
        };

        let args = match inner.next() {
            Some(arguments) => arguments
                .into_inner()
                .map(|arg| self.build_expression(arg))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        if args.len() != builtin.arity {
            return Err(FormulaError::Arity {
                function: name,
                expected: builtin.arity,
                found: args.len(),
            });
        }

        Ok(ASTNode::FunctionCall { name, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decay_symbols() -> SymbolTable {
        SymbolTable::with_constants(["N0", "λ", "k"]).unwrap()
    }

    fn parse(input: &str) -> Result<Formula, FormulaError> {
        FormulaParser::parse_formula(input, &decay_symbols())
    }

    fn constant(name: &str) -> Box<ASTNode> {
        Box::new(ASTNode::Constant(name.to_string()))
    }

    #[test]
    fn test_decay_formula() {
        let formula = parse("N(t) = N0 * exp(-λ * t)").unwrap();
        assert_eq!(formula.name, "N");
        assert_eq!(formula.variable, "t");

        let expected = ASTNode::BinaryOperation {
            left: constant("N0"),
            operator: Operator::Multiply,
            right: Box::new(ASTNode::FunctionCall {
                name: "exp".to_string(),
                args: vec![ASTNode::BinaryOperation {
                    left: Box::new(ASTNode::Negate(constant("λ"))),
                    operator: Operator::Multiply,
                    right: Box::new(ASTNode::Variable),
                }],
            }),
        };
        assert_eq!(formula.body, expected);
    }

    #[test]
    fn test_precedence() {
        let formula = parse("f(x) = 1 + 2 * x").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::Number(1.0)),
            operator: Operator::Add,
            right: Box::new(ASTNode::BinaryOperation {
                left: Box::new(ASTNode::Number(2.0)),
                operator: Operator::Multiply,
                right: Box::new(ASTNode::Variable),
            }),
        };
        assert_eq!(formula.body, expected);
    }

    #[test]
    fn test_left_associative_subtraction() {
        let formula = parse("f(x) = x - 1 - 2").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::BinaryOperation {
                left: Box::new(ASTNode::Variable),
                operator: Operator::Subtract,
                right: Box::new(ASTNode::Number(1.0)),
            }),
            operator: Operator::Subtract,
            right: Box::new(ASTNode::Number(2.0)),
        };
        assert_eq!(formula.body, expected);
    }

    #[test]
    fn test_power_is_right_associative() {
        let formula = parse("f(x) = 2 ^ 3 ** x").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::Number(2.0)),
            operator: Operator::Power,
            right: Box::new(ASTNode::BinaryOperation {
                left: Box::new(ASTNode::Number(3.0)),
                operator: Operator::Power,
                right: Box::new(ASTNode::Variable),
            }),
        };
        assert_eq!(formula.body, expected);
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        let formula = parse("f(x) = -x^2").unwrap();
        let expected = ASTNode::Negate(Box::new(ASTNode::BinaryOperation {
            left: Box::new(ASTNode::Variable),
            operator: Operator::Power,
            right: Box::new(ASTNode::Number(2.0)),
        }));
        assert_eq!(formula.body, expected);
    }

    #[test]
    fn test_negative_exponent() {
        let formula = parse("f(x) = x ^ -1").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::Variable),
            operator: Operator::Power,
            right: Box::new(ASTNode::Negate(Box::new(ASTNode::Number(1.0)))),
        };
        assert_eq!(formula.body, expected);
    }

    #[test]
    fn test_scientific_notation() {
        let formula = parse("f(x) = 1.5e-3 * x + .5").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::BinaryOperation {
                left: Box::new(ASTNode::Number(1.5e-3)),
                operator: Operator::Multiply,
                right: Box::new(ASTNode::Variable),
            }),
            operator: Operator::Add,
            right: Box::new(ASTNode::Number(0.5)),
        };
        assert_eq!(formula.body, expected);
    }

    #[test]
    fn test_multi_argument_call() {
        let formula = parse("f(x) = max(x, k)").unwrap();
        let expected = ASTNode::FunctionCall {
            name: "max".to_string(),
            args: vec![ASTNode::Variable, ASTNode::Constant("k".to_string())],
        };
        assert_eq!(formula.body, expected);
    }

    #[test]
    fn test_excess_whitespace() {
        let formula = parse("   N ( t )   =    N0   *   t   ").unwrap();
        assert_eq!(formula.name, "N");
        assert_eq!(
            formula.body,
            ASTNode::BinaryOperation {
                left: constant("N0"),
                operator: Operator::Multiply,
                right: Box::new(ASTNode::Variable),
            }
        );
    }

    #[test]
    fn test_missing_equals() {
        assert!(matches!(
            parse("N0 * exp(-λ * t)"),
            Err(FormulaError::Format(_))
        ));
    }

    #[test]
    fn test_extra_equals() {
        assert!(matches!(parse("f(t) = t = 1"), Err(FormulaError::Format(_))));
    }

    #[test]
    fn test_malformed_left_hand_side() {
        let inputs = vec![
            "f = t",
            "(t) = t",
            "f(t = t",
            "f(t, k) = t",
            "f(2) = t",
            "f(t) g = t",
            " = t",
        ];

        for input in inputs {
            assert!(
                matches!(parse(input), Err(FormulaError::Format(_))),
                "Input '{}' should be a format error",
                input
            );
        }
    }

    #[test]
    fn test_variable_shadowing_constant() {
        assert!(matches!(parse("f(k) = k"), Err(FormulaError::Format(_))));
        assert!(matches!(parse("f(exp) = 1"), Err(FormulaError::Format(_))));
    }

    #[test]
    fn test_unknown_symbol_is_named() {
        assert_eq!(
            parse("f(t) = N0 * exp(-mu * t)"),
            Err(FormulaError::UnknownSymbol("mu".to_string()))
        );
    }

    #[test]
    fn test_injection_payloads_are_unknown_symbols() {
        let inputs = vec![
            ("f(t) = __import__('os').system('rm -rf /')", "__import__"),
            ("f(t) = eval('1+1')", "eval"),
            ("f(t) = exec(t)", "exec"),
            ("f(t) = open('/etc/passwd').read()", "open"),
            ("f(t) = ().__class__.__bases__[0]", "__class__"),
            ("f(t) = (lambda: 0)()", "lambda"),
            ("f(t) = t if t else k", "if"),
            ("f(t) = globals()['k']", "globals"),
            ("f(t) = t; import os", "import"),
            ("f(t) = f(t)", "f"),
        ];

        for (input, token) in inputs {
            assert_eq!(
                parse(input),
                Err(FormulaError::UnknownSymbol(token.to_string())),
                "Input '{}' should be rejected on '{}'",
                input,
                token
            );
        }
    }

    #[test]
    fn test_exponent_letter_is_not_an_identifier() {
        assert!(parse("f(t) = 2e10 * t").is_ok());
        assert_eq!(
            parse("f(t) = 2 * e"),
            Err(FormulaError::UnknownSymbol("e".to_string()))
        );
    }

    #[test]
    fn test_invalid_syntax() {
        let inputs = vec![
            "f(t) = ",
            "f(t) = t +",
            "f(t) = * t",
            "f(t) = (t",
            "f(t) = t)",
            "f(t) = 2t",
            "f(t) = t * * 2",
            "f(t) = t $ 2",
            "f(t) = exp(t,)",
        ];

        for input in inputs {
            assert!(
                matches!(parse(input), Err(FormulaError::Syntax(_))),
                "Input '{}' should be a syntax error, got {:?}",
                input,
                parse(input)
            );
        }
    }

    #[test]
    fn test_out_of_range_literal() {
        assert!(matches!(parse("f(t) = 1e400"), Err(FormulaError::Syntax(_))));
    }

    #[test]
    fn test_bare_function_name() {
        assert!(matches!(parse("f(t) = exp + t"), Err(FormulaError::Syntax(_))));
    }

    #[test]
    fn test_calling_a_constant() {
        assert!(matches!(parse("f(t) = k(t)"), Err(FormulaError::Syntax(_))));
    }

    #[test]
    fn test_arity_mismatch() {
        assert_eq!(
            parse("f(t) = exp(t, 2)"),
            Err(FormulaError::Arity {
                function: "exp".to_string(),
                expected: 1,
                found: 2,
            })
        );
        assert!(matches!(
            parse("f(t) = max(t)"),
            Err(FormulaError::Arity { .. })
        ));
        assert!(matches!(
            parse("f(t) = sqrt()"),
            Err(FormulaError::Arity { .. })
        ));
    }

    #[test]
    fn test_constants_match_formula_text() {
        let formula = parse("A(t) = N0 * exp(-λ * t) + 0 * N0").unwrap();
        let names: Vec<_> = formula.constants().into_iter().collect();
        assert_eq!(names, vec!["N0".to_string(), "λ".to_string()]);
    }

    #[test]
    fn test_is_identifier() {
        assert!(FormulaParser::is_identifier("λ"));
        assert!(FormulaParser::is_identifier("N₀"));
        assert!(!FormulaParser::is_identifier("1x"));
        assert!(!FormulaParser::is_identifier("x y"));
    }
}
