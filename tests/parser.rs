use rlox::{
    ast::{Binary, Expression, Grouping, Literal, Operator, Unary},
    parser::{ParseError, Parser},
    report::Diagnostics,
    scanner,
    token::TokenKind,
};

#[test]
fn subtraction_is_left_associative() {
    test(
        "1 - 2 - 3",
        Binary::new(
            Binary::new(number(1.0), op(TokenKind::Minus, 1), number(2.0)).into(),
            op(TokenKind::Minus, 1),
            number(3.0),
        )
        .into(),
    );
}

#[test]
fn factors_bind_tighter_than_terms() {
    test(
        "1 + 2 * 3",
        Binary::new(
            number(1.0),
            op(TokenKind::Plus, 1),
            Binary::new(number(2.0), op(TokenKind::Star, 1), number(3.0)).into(),
        )
        .into(),
    );
}

#[test]
fn grouping_overrides_precedence() {
    test(
        "(1 + 2) * 3",
        Binary::new(
            Grouping::new(Binary::new(number(1.0), op(TokenKind::Plus, 1), number(2.0)).into())
                .into(),
            op(TokenKind::Star, 1),
            number(3.0),
        )
        .into(),
    );
}

#[test]
fn unary_operators_nest_to_the_right() {
    test(
        "!!true",
        Unary::new(
            op(TokenKind::Bang, 1),
            Unary::new(op(TokenKind::Bang, 1), Literal::new(true).into()).into(),
        )
        .into(),
    );
    test(
        "-1 + -2",
        Binary::new(
            Unary::new(op(TokenKind::Minus, 1), number(1.0)).into(),
            op(TokenKind::Plus, 1),
            Unary::new(op(TokenKind::Minus, 1), number(2.0)).into(),
        )
        .into(),
    );
}

#[test]
fn literals() {
    test("true", Literal::new(true).into());
    test("false", Literal::new(false).into());
    test("nil", Literal::nil().into());
    test("\"lox\"", Literal::new("lox").into());
    test("123.45", number(123.45));
}

#[test]
fn comparison_and_equality_chain() {
    test(
        "1 < 2 == true",
        Binary::new(
            Binary::new(number(1.0), op(TokenKind::Less, 1), number(2.0)).into(),
            op(TokenKind::EqualEqual, 1),
            Literal::new(true).into(),
        )
        .into(),
    );
}

#[test]
fn operator_lines_survive_into_the_tree() {
    test(
        "1\n- 2",
        Binary::new(number(1.0), op(TokenKind::Minus, 2), number(2.0)).into(),
    );
}

#[test]
fn missing_closing_parenthesis() {
    match parse("(1 + 2") {
        Err(ParseError::MissingToken { line, message, .. }) => {
            assert_eq!(line, 1);
            assert!(message.contains("')'"), "{message}");
        }
        other => panic!("expected a missing-token error, got {other:?}"),
    }
}

#[test]
fn empty_input_is_not_an_expression() {
    match parse("") {
        Err(ParseError::UnexpectedToken { context, message, .. }) => {
            assert_eq!(context, " at end");
            assert_eq!(message, "Expect expression.");
        }
        other => panic!("expected an unexpected-token error, got {other:?}"),
    }
}

#[test]
fn dangling_operator_is_rejected() {
    match parse("1 + *") {
        Err(ParseError::UnexpectedToken { context, .. }) => assert_eq!(context, " at '*'"),
        other => panic!("expected an unexpected-token error, got {other:?}"),
    }
}

#[test]
fn parse_errors_render_like_diagnostics() {
    let error = parse("(1").unwrap_err();
    assert_eq!(
        error.to_string(),
        "[line 1] Error at end: Expect ')' after expression."
    );
}

fn parse(code: &str) -> Result<Expression, ParseError> {
    let mut diagnostics = Diagnostics::new();
    let tokens = scanner::scan(code, &mut diagnostics);
    assert!(!diagnostics.had_error(), "lexical errors in {code:?}");
    Parser::new(&tokens).parse()
}

fn test(code: &str, expect: Expression) {
    assert_eq!(parse(code).expect("error parsing expression"), expect, "{code:?}");
}

fn number(value: f64) -> Expression {
    Literal::new(value).into()
}

fn op(kind: TokenKind, line: u32) -> Operator {
    Operator::new(kind, line)
}
