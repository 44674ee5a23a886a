use crate::{
    cst::cst::{
        BlockNode, DeclarationNode, DeclaratorNode, EmbeddedNode, ExpressionNode, ForInitializerNode, FunctionDeclarationNode,
        LocalVariableDeclarationNode, ParameterNode, StatementListNode, StatementNode, SwitchLabelNode,
        SwitchSectionNode,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_expr,
    parser::Parser,
    types::{at_declaration, at_function_declaration, parse_type},
};

/// Parses statements until `terminator` (or EOF) is the current token.
pub fn parse_statement_list(parser: &mut Parser, terminator: TokenKind) -> Result<StatementListNode, Error> {
    let mut statements = vec![];

    while parser.has_tokens() && parser.current_token_kind() != terminator {
        statements.push(parse_stmt(parser)?);
    }

    Ok(StatementListNode { statements })
}

pub fn parse_stmt(parser: &mut Parser) -> Result<StatementNode, Error> {
    if at_function_declaration(parser) {
        return Ok(StatementNode::Declaration(DeclarationNode::Function(parse_function_decl(parser)?)));
    }

    if at_declaration(parser) {
        let declaration = parse_local_var_decl(parser)?;
        parser.expect(TokenKind::Semicolon)?;
        return Ok(StatementNode::Declaration(DeclarationNode::LocalVariable(declaration)));
    }

    Ok(StatementNode::Embedded(parse_embedded_stmt(parser)?))
}

pub fn parse_embedded_stmt(parser: &mut Parser) -> Result<EmbeddedNode, Error> {
    let kind = parser.current_token_kind();
    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    let expression = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(EmbeddedNode::Expression(expression))
}

pub fn parse_function_decl(parser: &mut Parser) -> Result<FunctionDeclarationNode, Error> {
    let server = if parser.current_token_kind() == TokenKind::Server {
        Some(parser.advance().clone())
    } else {
        None
    };

    let return_type = parse_type(parser)?;
    let error = parser.unexpected("expected function name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let parameter_type = parse_type(parser)?;
        let error = parser.unexpected("expected parameter name");
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?;
        parameters.push(ParameterNode { parameter_type, name });

        if parser.current_token_kind() != TokenKind::CloseParen {
            parser.expect(TokenKind::Comma)?;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(FunctionDeclarationNode {
        server,
        return_type,
        name,
        parameters,
        body,
    })
}

pub fn parse_local_var_decl(parser: &mut Parser) -> Result<LocalVariableDeclarationNode, Error> {
    let declared_type = parse_type(parser)?;
    let mut declarators = vec![];

    loop {
        let error = parser.unexpected("expected identifier during variable declaration");
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

        let initializer = if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            Some(parse_expr(parser)?)
        } else {
            None
        };
        declarators.push(DeclaratorNode { name, initializer });

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    Ok(LocalVariableDeclarationNode {
        declared_type,
        declarators,
    })
}

fn parse_block(parser: &mut Parser) -> Result<BlockNode, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;
    let statements = parse_statement_list(parser, TokenKind::CloseCurly)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockNode { open, statements })
}

fn parse_condition(parser: &mut Parser) -> Result<ExpressionNode, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    Ok(condition)
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<EmbeddedNode, Error> {
    Ok(EmbeddedNode::Block(parse_block(parser)?))
}

pub fn parse_null_stmt(parser: &mut Parser) -> Result<EmbeddedNode, Error> {
    Ok(EmbeddedNode::Null(parser.advance().clone()))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<EmbeddedNode, Error> {
    parser.advance();

    let condition = parse_condition(parser)?;
    let then_branch = Box::new(parse_embedded_stmt(parser)?);

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_embedded_stmt(parser)?))
    } else {
        None
    };

    Ok(EmbeddedNode::If {
        condition,
        then_branch,
        else_branch,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<EmbeddedNode, Error> {
    parser.advance();

    let condition = parse_condition(parser)?;
    let body = Box::new(parse_embedded_stmt(parser)?);

    Ok(EmbeddedNode::While { condition, body })
}

pub fn parse_do_stmt(parser: &mut Parser) -> Result<EmbeddedNode, Error> {
    parser.advance();

    let body = Box::new(parse_embedded_stmt(parser)?);
    let error = parser.unexpected("expected `while` after do body");
    parser.expect_error(TokenKind::While, Some(error))?;
    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(EmbeddedNode::DoWhile { body, condition })
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<EmbeddedNode, Error> {
    parser.advance();
    parser.expect(TokenKind::OpenParen)?;

    let initializer = match parser.current_token_kind() {
        TokenKind::Semicolon => None,
        _ if at_declaration(parser) => Some(ForInitializerNode::Declaration(parse_local_var_decl(parser)?)),
        _ => Some(ForInitializerNode::Expression(parse_expr(parser)?)),
    };
    parser.expect(TokenKind::Semicolon)?;

    let condition = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    let iterator = if parser.current_token_kind() != TokenKind::CloseParen {
        Some(parse_expr(parser)?)
    } else {
        None
    };
    parser.expect(TokenKind::CloseParen)?;

    let body = Box::new(parse_embedded_stmt(parser)?);

    Ok(EmbeddedNode::For {
        initializer,
        condition,
        iterator,
        body,
    })
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<EmbeddedNode, Error> {
    parser.advance();

    let subject = parse_condition(parser)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut sections = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let label = match parser.current_token_kind() {
            TokenKind::Case => {
                parser.advance();
                SwitchLabelNode::Case(parse_expr(parser)?)
            }
            TokenKind::Default => SwitchLabelNode::Default(parser.advance().clone()),
            _ => return Err(parser.unexpected("expected `case` or `default` label")),
        };
        parser.expect(TokenKind::Colon)?;

        let mut statements = vec![];
        while !matches!(
            parser.current_token_kind(),
            TokenKind::Case | TokenKind::Default | TokenKind::CloseCurly | TokenKind::EOF
        ) {
            statements.push(parse_stmt(parser)?);
        }

        sections.push(SwitchSectionNode { label, statements });
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(EmbeddedNode::Switch { subject, sections })
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<EmbeddedNode, Error> {
    let keyword = parser.advance().clone();
    parser.expect(TokenKind::Semicolon)?;
    Ok(EmbeddedNode::Break(keyword))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<EmbeddedNode, Error> {
    let keyword = parser.advance().clone();
    parser.expect(TokenKind::Semicolon)?;
    Ok(EmbeddedNode::Continue(keyword))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<EmbeddedNode, Error> {
    let keyword = parser.advance().clone();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    Ok(EmbeddedNode::Return { keyword, value })
}
