pub mod ast;
pub mod lexer;
pub mod parser;
pub mod stage;

use stage::codegen::{self, Instruction};
use stage::interpret;

/// Lexes and parses a source string into a single expression.
pub fn parse_source(source: &str) -> Result<ast::Expr, parser::ParseError> {
    let tokens: Vec<(usize, lexer::Token)> = lexer::lex(source).into_iter().enumerate().collect();

    parser::parse(&tokens)
}

/// Compiles a source string into its stack machine instructions.
pub fn compile(source: &str) -> Result<Vec<Instruction>, parser::ParseError> {
    parse_source(source).map(|expr| codegen::generate(&expr))
}

/// Evaluates a source string directly to its integer value.
pub fn evaluate(source: &str) -> Result<i64, parser::ParseError> {
    parse_source(source).map(|expr| interpret::interpret(&expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Token;
    use crate::parser::ParseError;
    use proptest::prelude::*;

    /// Executes instructions against a bare operand stack.
    fn run_stack_machine(insts: &[Instruction]) -> Option<i64> {
        let mut stack: Vec<i64> = vec![];
        for inst in insts {
            match inst {
                Instruction::Push(value) => stack.push(*value),
                Instruction::Add => {
                    let rhs = stack.pop()?;
                    let lhs = stack.pop()?;
                    stack.push(lhs.wrapping_add(rhs));
                }
            }
        }

        match stack.as_slice() {
            [result] => Some(*result),
            _ => None,
        }
    }

    #[test]
    fn should_compile_and_interpret_addition_chain() {
        let input = "11 + 22 + 33";

        assert_eq!(Ok(66), evaluate(input));
        assert_eq!(
            Ok(vec![
                Instruction::Push(11),
                Instruction::Push(22),
                Instruction::Add,
                Instruction::Push(33),
                Instruction::Add,
            ]),
            compile(input)
        );
    }

    #[test]
    fn should_interpret_arithmetic_input_with_arbitrary_whitespace() {
        let input = "13 +6+  4
        +
               08 ";

        assert_eq!(Ok(31), evaluate(input))
    }

    #[test]
    fn should_compile_single_literal() {
        assert_eq!(Ok(7), evaluate("7"));
        assert_eq!(Ok(vec![Instruction::Push(7)]), compile("7"));
    }

    #[test]
    fn should_reject_unsupported_operator_at_trailing_number() {
        assert_eq!(
            Err(ParseError::ExpectedEndOfInput {
                actual: Token::Number(55)
            }),
            compile("11 + 22 + 33 - 55")
        )
    }

    #[test]
    fn should_reject_empty_input() {
        for input in ["", "   ", "\n\t "] {
            assert_eq!(
                Err(ParseError::ExpectedNumber { actual: Token::Eof }),
                evaluate(input)
            )
        }
    }

    #[test]
    fn should_reject_dangling_operators() {
        let input_expected = [
            ("1 +", Token::Eof),
            ("1 + + 2", Token::Plus),
            ("+ 1", Token::Plus),
        ];

        for (input, actual) in input_expected {
            assert_eq!(Err(ParseError::ExpectedNumber { actual }), compile(input))
        }
    }

    fn operands() -> impl Strategy<Value = (Vec<i64>, Vec<String>)> {
        (
            prop::collection::vec(0i64..1_000_000, 1..32),
            prop::collection::vec("[ \t\n]{0,3}", 64),
        )
    }

    fn join_with_whitespace(values: &[i64], padding: &[String]) -> String {
        values
            .iter()
            .enumerate()
            .map(|(idx, value)| format!("{}{}{}", padding[2 * idx], value, padding[2 * idx + 1]))
            .collect::<Vec<_>>()
            .join("+")
    }

    proptest! {
        #[test]
        fn should_evaluate_to_arithmetic_sum((values, padding) in operands()) {
            let input = join_with_whitespace(&values, &padding);

            prop_assert_eq!(Ok(values.iter().sum::<i64>()), evaluate(&input));
        }

        #[test]
        fn should_emit_consistent_left_associative_instructions((values, padding) in operands()) {
            let input = join_with_whitespace(&values, &padding);
            let insts = compile(&input).unwrap();

            prop_assert_eq!(2 * values.len() - 1, insts.len());
            prop_assert_eq!(
                values.len(),
                insts.iter().filter(|inst| matches!(inst, Instruction::Push(_))).count()
            );

            let expected: Vec<Instruction> = values
                .iter()
                .enumerate()
                .flat_map(|(idx, value)| {
                    let push = core::iter::once(Instruction::Push(*value));
                    let add = (idx > 0).then_some(Instruction::Add);
                    push.chain(add)
                })
                .collect();
            prop_assert_eq!(&expected, &insts);

            prop_assert_eq!(evaluate(&input).ok(), run_stack_machine(&insts));
        }
    }
}
