use crate::lexer::tokens::Token;

#[derive(Debug, Clone, PartialEq)]
pub struct StatementListNode {
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementNode {
    Declaration(DeclarationNode),
    Embedded(EmbeddedNode),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationNode {
    Function(FunctionDeclarationNode),
    LocalVariable(LocalVariableDeclarationNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclarationNode {
    /// The `server` specifier, when present
    pub server: Option<Token>,
    pub return_type: TypeNode,
    pub name: Token,
    pub parameters: Vec<ParameterNode>,
    pub body: BlockNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterNode {
    pub parameter_type: TypeNode,
    pub name: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariableDeclarationNode {
    pub declared_type: TypeNode,
    pub declarators: Vec<DeclaratorNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclaratorNode {
    pub name: Token,
    pub initializer: Option<ExpressionNode>,
}

/// `ref`? followed by a primitive type keyword or an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub ref_token: Option<Token>,
    pub name: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
    pub open: Token,
    pub statements: StatementListNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedNode {
    Block(BlockNode),
    Null(Token),
    Expression(ExpressionNode),
    If {
        condition: ExpressionNode,
        then_branch: Box<EmbeddedNode>,
        else_branch: Option<Box<EmbeddedNode>>,
    },
    Switch {
        subject: ExpressionNode,
        sections: Vec<SwitchSectionNode>,
    },
    While {
        condition: ExpressionNode,
        body: Box<EmbeddedNode>,
    },
    DoWhile {
        body: Box<EmbeddedNode>,
        condition: ExpressionNode,
    },
    For {
        initializer: Option<ForInitializerNode>,
        condition: Option<ExpressionNode>,
        iterator: Option<ExpressionNode>,
        body: Box<EmbeddedNode>,
    },
    Break(Token),
    Continue(Token),
    Return {
        keyword: Token,
        value: Option<ExpressionNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInitializerNode {
    Declaration(LocalVariableDeclarationNode),
    Expression(ExpressionNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSectionNode {
    pub label: SwitchLabelNode,
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchLabelNode {
    Case(ExpressionNode),
    Default(Token),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    Assignment {
        target: Box<UnaryNode>,
        operator: Token,
        value: Box<ExpressionNode>,
    },
    NonAssignment(Box<ConditionalOrNode>),
}

/// A left-associative operator chain: `first (op operand)*`.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorChain<T> {
    pub first: T,
    pub rest: Vec<(Token, T)>,
}

impl<T> OperatorChain<T> {
    pub fn single(first: T) -> Self {
        OperatorChain { first, rest: vec![] }
    }

    /// Unwraps a chain without operators into its only operand.
    pub fn into_single(self) -> Result<T, Self> {
        if self.rest.is_empty() {
            Ok(self.first)
        } else {
            Err(self)
        }
    }
}

pub type MultiplicativeNode = OperatorChain<UnaryNode>;
pub type AdditiveNode = OperatorChain<MultiplicativeNode>;
pub type RelationalNode = OperatorChain<AdditiveNode>;
pub type EqualityNode = OperatorChain<RelationalNode>;
pub type ConditionalAndNode = OperatorChain<EqualityNode>;
pub type ConditionalOrNode = OperatorChain<ConditionalAndNode>;

impl ConditionalOrNode {
    /// Returns the unary operand when the whole chain is a single unary
    /// expression, which is the only shape allowed on the left of an
    /// assignment operator.
    pub fn into_unary(self) -> Result<UnaryNode, ConditionalOrNode> {
        if !self.rest.is_empty()
            || !self.first.rest.is_empty()
            || !self.first.first.rest.is_empty()
            || !self.first.first.first.rest.is_empty()
            || !self.first.first.first.first.rest.is_empty()
            || !self.first.first.first.first.first.rest.is_empty()
        {
            return Err(self);
        }

        Ok(self.first.first.first.first.first.first)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnaryNode {
    Postfix(PostfixNode),
    /// `+ - !` as well as the prefix `++ --`
    Prefix {
        operator: Token,
        operand: Box<UnaryNode>,
    },
    Cast {
        open: Token,
        cast_type: TypeNode,
        operand: Box<UnaryNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostfixNode {
    pub primary: PrimaryNode,
    pub suffixes: Vec<PostfixSuffix>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostfixSuffix {
    Invocation {
        open: Token,
        arguments: Vec<ArgumentNode>,
        extern_target: Option<Token>,
    },
    Member(Token),
    Increment(Token),
    Decrement(Token),
    Inject {
        open: Token,
        arguments: Vec<ExpressionNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentNode {
    pub ref_token: Option<Token>,
    pub value: ExpressionNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryNode {
    Identifier(Token),
    Literal(LiteralNode),
    Parenthesized {
        open: Token,
        inner: Box<ExpressionNode>,
    },
    Localized(Token),
}

/// One literal production. String literals may span several adjacent tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    pub tokens: Vec<Token>,
}
