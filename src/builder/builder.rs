use crate::{
    ast::ast::{
        Argument, AssignmentOperator, BinaryOperator, Declarator, Expr, ExprKind, ForInit, FunctionDecl, Inferred,
        Invocation, Literal, Parameter, PostfixOperator, StatementList, Stmt, SwitchLabel, SwitchSection, Type,
        UnaryOperator, VarDecl,
    },
    cst::cst::{
        ArgumentNode, DeclarationNode, EmbeddedNode, ExpressionNode, ForInitializerNode, FunctionDeclarationNode,
        LiteralNode, LocalVariableDeclarationNode, OperatorChain, PostfixNode, PostfixSuffix, PrimaryNode,
        StatementListNode, StatementNode, SwitchLabelNode, TypeNode, UnaryNode,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

/// Builds one AST from one parse tree.
pub fn build(root: &StatementListNode) -> Result<StatementList, Error> {
    let mut builder = Builder { next_id: 0 };
    builder.build_statement_list(&root.statements)
}

struct Builder {
    next_id: usize,
}

type OperandBuilder<T> = fn(&mut Builder, &T) -> Result<Expr, Error>;

fn malformed(production: &str, token: Option<&Token>) -> Error {
    let position = token.map(|token| token.span.start.clone()).unwrap_or_else(Position::null);
    Error::new(
        ErrorImpl::MalformedTree {
            production: production.to_string(),
        },
        position,
    )
}

fn build_type(node: &TypeNode) -> Type {
    Type {
        name: node.name.value.clone(),
        is_ref: node.ref_token.is_some(),
    }
}

impl Builder {
    fn advance_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn build_statement_list(&mut self, statements: &[StatementNode]) -> Result<StatementList, Error> {
        let statements = statements
            .iter()
            .map(|statement| self.build_statement(statement))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StatementList::new(statements))
    }

    fn build_statement(&mut self, node: &StatementNode) -> Result<Stmt, Error> {
        match node {
            StatementNode::Declaration(DeclarationNode::Function(function)) => {
                Ok(Stmt::Function(self.build_function(function)?))
            }
            StatementNode::Declaration(DeclarationNode::LocalVariable(declaration)) => {
                Ok(Stmt::VarDecl(self.build_var_decl(declaration)?))
            }
            StatementNode::Embedded(embedded) => self.build_embedded(embedded),
        }
    }

    fn build_function(&mut self, node: &FunctionDeclarationNode) -> Result<FunctionDecl, Error> {
        let parameters = node
            .parameters
            .iter()
            .map(|parameter| Parameter {
                name: parameter.name.value.clone(),
                param_type: build_type(&parameter.parameter_type),
                inferred: Inferred::Pending,
            })
            .collect();

        Ok(FunctionDecl {
            name: node.name.value.clone(),
            is_server: node.server.is_some(),
            return_type: build_type(&node.return_type),
            parameters,
            body: self.build_statement_list(&node.body.statements.statements)?,
            inferred: Inferred::Pending,
        })
    }

    fn build_var_decl(&mut self, node: &LocalVariableDeclarationNode) -> Result<VarDecl, Error> {
        if node.declarators.is_empty() {
            return Err(malformed("local_var_decl", Some(&node.declared_type.name)));
        }

        let mut declarators = Vec::with_capacity(node.declarators.len());
        for declarator in &node.declarators {
            let initializer = match &declarator.initializer {
                Some(expression) => Some(self.build_expression(expression)?),
                None => None,
            };

            declarators.push(Declarator {
                id: self.advance_id(),
                name: declarator.name.value.clone(),
                initializer,
                inferred: Inferred::Pending,
            });
        }

        Ok(VarDecl {
            declared_type: build_type(&node.declared_type),
            declarators,
            inferred: Inferred::Pending,
        })
    }

    fn build_embedded(&mut self, node: &EmbeddedNode) -> Result<Stmt, Error> {
        let statement = match node {
            EmbeddedNode::Block(block) => Stmt::Block(self.build_statement_list(&block.statements.statements)?),
            EmbeddedNode::Null(_) => Stmt::Null,
            EmbeddedNode::Expression(expression) => Stmt::Expression(self.build_expression(expression)?),
            EmbeddedNode::If {
                condition,
                then_branch,
                else_branch,
            } => Stmt::If {
                condition: self.build_expression(condition)?,
                then_branch: Box::new(self.build_embedded(then_branch)?),
                else_branch: match else_branch {
                    Some(branch) => Some(Box::new(self.build_embedded(branch)?)),
                    None => None,
                },
            },
            EmbeddedNode::Switch { subject, sections } => {
                let subject = self.build_expression(subject)?;
                let mut built = Vec::with_capacity(sections.len());
                for section in sections {
                    let label = match &section.label {
                        SwitchLabelNode::Case(value) => SwitchLabel::Case(self.build_expression(value)?),
                        SwitchLabelNode::Default(_) => SwitchLabel::Default,
                    };
                    built.push(SwitchSection {
                        label,
                        body: self.build_statement_list(&section.statements)?,
                    });
                }

                Stmt::Switch {
                    subject,
                    sections: built,
                }
            }
            EmbeddedNode::While { condition, body } => Stmt::While {
                condition: self.build_expression(condition)?,
                body: Box::new(self.build_embedded(body)?),
            },
            EmbeddedNode::DoWhile { body, condition } => Stmt::DoWhile {
                body: Box::new(self.build_embedded(body)?),
                condition: self.build_expression(condition)?,
            },
            EmbeddedNode::For {
                initializer,
                condition,
                iterator,
                body,
            } => Stmt::For {
                initializer: match initializer {
                    Some(ForInitializerNode::Declaration(declaration)) => {
                        Some(ForInit::Declaration(self.build_var_decl(declaration)?))
                    }
                    Some(ForInitializerNode::Expression(expression)) => {
                        Some(ForInit::Expression(self.build_expression(expression)?))
                    }
                    None => None,
                },
                condition: self.build_optional(condition.as_ref())?,
                iterator: self.build_optional(iterator.as_ref())?,
                body: Box::new(self.build_embedded(body)?),
            },
            EmbeddedNode::Break(_) => Stmt::Break,
            EmbeddedNode::Continue(_) => Stmt::Continue,
            EmbeddedNode::Return { value, .. } => Stmt::Return(self.build_optional(value.as_ref())?),
        };

        Ok(statement)
    }

    fn build_optional(&mut self, node: Option<&ExpressionNode>) -> Result<Option<Expr>, Error> {
        node.map(|expression| self.build_expression(expression)).transpose()
    }

    fn build_expression(&mut self, node: &ExpressionNode) -> Result<Expr, Error> {
        match node {
            ExpressionNode::Assignment { target, operator, value } => {
                let assignment = AssignmentOperator::from_token(operator.kind)
                    .ok_or_else(|| malformed("assignment", Some(operator)))?;

                Ok(Expr::new(ExprKind::Assignment {
                    target: Box::new(self.build_unary(target)?),
                    operator: assignment,
                    value: Box::new(self.build_expression(value)?),
                }))
            }
            ExpressionNode::NonAssignment(or) => self.fold_chain(or, |builder, and| {
                builder.fold_chain(and, |builder, equality| {
                    builder.fold_chain(equality, |builder, relational| {
                        builder.fold_chain(relational, |builder, additive| {
                            builder.fold_chain(additive, |builder, multiplicative| {
                                builder.fold_chain(multiplicative, Builder::build_unary)
                            })
                        })
                    })
                })
            }),
        }
    }

    /// Folds `first (op operand)*` into left-nested binary nodes.
    fn fold_chain<T>(&mut self, chain: &OperatorChain<T>, operand: OperandBuilder<T>) -> Result<Expr, Error> {
        let mut left = operand(self, &chain.first)?;

        for (token, node) in &chain.rest {
            let operator = BinaryOperator::from_token(token.kind).ok_or_else(|| malformed("binary", Some(token)))?;
            let right = operand(self, node)?;

            left = Expr::new(ExprKind::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn build_unary(&mut self, node: &UnaryNode) -> Result<Expr, Error> {
        match node {
            UnaryNode::Postfix(postfix) => self.build_postfix(postfix),
            UnaryNode::Prefix { operator, operand } => {
                let unary = UnaryOperator::from_token(operator.kind).ok_or_else(|| malformed("unary", Some(operator)))?;

                Ok(Expr::new(ExprKind::Unary {
                    operator: unary,
                    operand: Box::new(self.build_unary(operand)?),
                }))
            }
            UnaryNode::Cast {
                cast_type, operand, ..
            } => Ok(Expr::new(ExprKind::Cast {
                target_type: build_type(cast_type),
                operand: Box::new(self.build_unary(operand)?),
            })),
        }
    }

    fn build_postfix(&mut self, node: &PostfixNode) -> Result<Expr, Error> {
        let mut expression = self.build_primary(&node.primary)?;

        for suffix in &node.suffixes {
            let kind = match suffix {
                PostfixSuffix::Invocation {
                    arguments,
                    extern_target,
                    ..
                } => ExprKind::Invocation(Invocation {
                    callee: Box::new(expression),
                    arguments: self.build_arguments(arguments)?,
                    extern_target: extern_target.as_ref().map(|target| target.value.clone()),
                }),
                PostfixSuffix::Member(member) => ExprKind::Member {
                    receiver: Box::new(expression),
                    member: member.value.clone(),
                },
                PostfixSuffix::Increment(_) => ExprKind::Postfix {
                    operator: PostfixOperator::Increment,
                    operand: Box::new(expression),
                },
                PostfixSuffix::Decrement(_) => ExprKind::Postfix {
                    operator: PostfixOperator::Decrement,
                    operand: Box::new(expression),
                },
                PostfixSuffix::Inject { arguments, .. } => ExprKind::Interpolation {
                    base: Box::new(expression),
                    arguments: arguments
                        .iter()
                        .map(|argument| self.build_expression(argument))
                        .collect::<Result<Vec<_>, _>>()?,
                },
            };

            expression = Expr::new(kind);
        }

        Ok(expression)
    }

    fn build_arguments(&mut self, arguments: &[ArgumentNode]) -> Result<Vec<Argument>, Error> {
        arguments
            .iter()
            .map(|argument| {
                let value = self.build_expression(&argument.value)?;
                Ok(Argument::new(value, argument.ref_token.is_some()))
            })
            .collect()
    }

    fn build_primary(&mut self, node: &PrimaryNode) -> Result<Expr, Error> {
        match node {
            PrimaryNode::Identifier(token) => Ok(Expr::new(ExprKind::Variable(token.value.clone()))),
            PrimaryNode::Literal(literal) => Ok(Expr::new(ExprKind::Literal(build_literal(literal)?))),
            PrimaryNode::Parenthesized { inner, .. } => {
                Ok(Expr::new(ExprKind::Parenthesized(Box::new(self.build_expression(inner)?))))
            }
            PrimaryNode::Localized(token) => Ok(Expr::new(ExprKind::Localized(token.value.clone()))),
        }
    }
}

fn number_error(token: &Token) -> Error {
    Error::new(
        ErrorImpl::NumberParseError {
            token: token.value.clone(),
        },
        token.span.start.clone(),
    )
}

/// Builds a literal value from its tokens.
///
/// Integers that overflow `i32` become 64-bit literals. Hex literals are
/// read as `u32` and reinterpreted as `i32`.
pub fn build_literal(node: &LiteralNode) -> Result<Literal, Error> {
    let Some(first) = node.tokens.first() else {
        return Err(malformed("literal", None));
    };

    if first.kind.is_string_literal() {
        let mut value = String::new();
        for token in &node.tokens {
            if !token.kind.is_string_literal() {
                return Err(malformed("literal", Some(token)));
            }
            value.push_str(&token.value);
        }
        return Ok(Literal::String(value));
    }

    if node.tokens.len() != 1 {
        return Err(malformed("literal", node.tokens.get(1)));
    }

    match first.kind {
        TokenKind::Number => match first.value.parse::<i32>() {
            Ok(value) => Ok(Literal::Int(value)),
            Err(_) => first
                .value
                .parse::<i64>()
                .map(Literal::Long)
                .map_err(|_| number_error(first)),
        },
        TokenKind::HexNumber => u32::from_str_radix(&first.value[2..], 16)
            .map(|value| Literal::Int(value as i32))
            .map_err(|_| number_error(first)),
        TokenKind::Float => first
            .value
            .trim_end_matches(|c: char| c == 'f' || c == 'F')
            .parse::<f32>()
            .map(Literal::Float)
            .map_err(|_| number_error(first)),
        TokenKind::True => Ok(Literal::Bool(true)),
        TokenKind::False => Ok(Literal::Bool(false)),
        _ => Err(malformed("literal", Some(first))),
    }
}
