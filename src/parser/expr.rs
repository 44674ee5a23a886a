use crate::{
    cst::cst::{
        AdditiveNode, ArgumentNode, ConditionalAndNode, ConditionalOrNode, EqualityNode, ExpressionNode,
        LiteralNode, MultiplicativeNode, OperatorChain, PostfixNode, PostfixSuffix, PrimaryNode, RelationalNode,
        UnaryNode,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    types::{at_cast, parse_type},
};

pub fn parse_expr(parser: &mut Parser) -> Result<ExpressionNode, Error> {
    let left = parse_or_expr(parser)?;

    if !parser.current_token_kind().is_assignment_operator() {
        return Ok(ExpressionNode::NonAssignment(Box::new(left)));
    }

    match left.into_unary() {
        Ok(target) => {
            let operator = parser.advance().clone();
            let value = parse_expr(parser)?;

            Ok(ExpressionNode::Assignment {
                target: Box::new(target),
                operator,
                value: Box::new(value),
            })
        }
        Err(_) => Err(parser.unexpected("left side of an assignment must be a unary expression")),
    }
}

/// Parses `operand (op operand)*` for every operator registered at `bp`.
fn parse_chain<T>(
    parser: &mut Parser,
    bp: BindingPower,
    operand: fn(&mut Parser) -> Result<T, Error>,
) -> Result<OperatorChain<T>, Error> {
    let mut chain = OperatorChain::single(operand(parser)?);

    while parser.get_binding_power(parser.current_token_kind()) == Some(bp) {
        let operator = parser.advance().clone();
        chain.rest.push((operator, operand(parser)?));
    }

    Ok(chain)
}

pub fn parse_or_expr(parser: &mut Parser) -> Result<ConditionalOrNode, Error> {
    parse_chain(parser, BindingPower::LogicalOr, parse_and_expr)
}

fn parse_and_expr(parser: &mut Parser) -> Result<ConditionalAndNode, Error> {
    parse_chain(parser, BindingPower::LogicalAnd, parse_equality_expr)
}

fn parse_equality_expr(parser: &mut Parser) -> Result<EqualityNode, Error> {
    parse_chain(parser, BindingPower::Equality, parse_relational_expr)
}

fn parse_relational_expr(parser: &mut Parser) -> Result<RelationalNode, Error> {
    parse_chain(parser, BindingPower::Relational, parse_additive_expr)
}

fn parse_additive_expr(parser: &mut Parser) -> Result<AdditiveNode, Error> {
    parse_chain(parser, BindingPower::Additive, parse_multiplicative_expr)
}

fn parse_multiplicative_expr(parser: &mut Parser) -> Result<MultiplicativeNode, Error> {
    parse_chain(parser, BindingPower::Multiplicative, parse_unary_expr)
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<UnaryNode, Error> {
    match parser.current_token_kind() {
        TokenKind::Plus | TokenKind::Dash | TokenKind::Not | TokenKind::PlusPlus | TokenKind::MinusMinus => {
            let operator = parser.advance().clone();
            let operand = parse_unary_expr(parser)?;

            Ok(UnaryNode::Prefix {
                operator,
                operand: Box::new(operand),
            })
        }
        TokenKind::OpenParen if at_cast(parser) => {
            let open = parser.advance().clone();
            let cast_type = parse_type(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            let operand = parse_unary_expr(parser)?;

            Ok(UnaryNode::Cast {
                open,
                cast_type,
                operand: Box::new(operand),
            })
        }
        _ => Ok(UnaryNode::Postfix(parse_postfix_expr(parser)?)),
    }
}

fn parse_postfix_expr(parser: &mut Parser) -> Result<PostfixNode, Error> {
    let primary = parse_primary_expr(parser)?;
    let mut suffixes = vec![];

    loop {
        let suffix = match parser.current_token_kind() {
            TokenKind::OpenParen => {
                let open = parser.advance().clone();
                let arguments = parse_arguments(parser)?;

                let extern_target = if parser.current_token_kind() == TokenKind::Extern {
                    parser.advance();
                    let error = parser.unexpected("expected back-quoted extern target");
                    Some(parser.expect_error(TokenKind::BackString, Some(error))?)
                } else {
                    None
                };

                PostfixSuffix::Invocation {
                    open,
                    arguments,
                    extern_target,
                }
            }
            TokenKind::Dot => {
                parser.advance();
                let error = parser.unexpected("expected member name");
                PostfixSuffix::Member(parser.expect_error(TokenKind::Identifier, Some(error))?)
            }
            TokenKind::PlusPlus => PostfixSuffix::Increment(parser.advance().clone()),
            TokenKind::MinusMinus => PostfixSuffix::Decrement(parser.advance().clone()),
            TokenKind::OpenBracket => {
                let open = parser.advance().clone();
                let mut arguments = vec![];
                while parser.current_token_kind() != TokenKind::CloseBracket {
                    arguments.push(parse_expr(parser)?);
                    if parser.current_token_kind() != TokenKind::CloseBracket {
                        parser.expect(TokenKind::Comma)?;
                    }
                }
                parser.expect(TokenKind::CloseBracket)?;

                PostfixSuffix::Inject { open, arguments }
            }
            _ => break,
        };

        suffixes.push(suffix);
    }

    Ok(PostfixNode { primary, suffixes })
}

/// Parses call arguments after the opening parenthesis, consuming the closing one.
fn parse_arguments(parser: &mut Parser) -> Result<Vec<ArgumentNode>, Error> {
    let mut arguments = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        let ref_token = if parser.current_token_kind() == TokenKind::Ref {
            Some(parser.advance().clone())
        } else {
            None
        };
        let value = parse_expr(parser)?;
        arguments.push(ArgumentNode { ref_token, value });

        if parser.current_token_kind() != TokenKind::CloseParen {
            parser.expect(TokenKind::Comma)?;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    Ok(arguments)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<PrimaryNode, Error> {
    match parser.current_token_kind() {
        TokenKind::Identifier => Ok(PrimaryNode::Identifier(parser.advance().clone())),
        TokenKind::LocalizedString => Ok(PrimaryNode::Localized(parser.advance().clone())),
        TokenKind::Number | TokenKind::HexNumber | TokenKind::Float | TokenKind::True | TokenKind::False => {
            Ok(PrimaryNode::Literal(LiteralNode {
                tokens: vec![parser.advance().clone()],
            }))
        }
        TokenKind::String | TokenKind::BackString => {
            let mut tokens = vec![];
            while parser.current_token_kind().is_string_literal() {
                tokens.push(parser.advance().clone());
            }
            Ok(PrimaryNode::Literal(LiteralNode { tokens }))
        }
        TokenKind::OpenParen => {
            let open = parser.advance().clone();
            let inner = parse_expr(parser)?;
            parser.expect(TokenKind::CloseParen)?;

            Ok(PrimaryNode::Parenthesized {
                open,
                inner: Box::new(inner),
            })
        }
        _ => Err(parser.unexpected("expected expression")),
    }
}
