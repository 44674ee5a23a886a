use std::collections::{BTreeSet, HashMap};

use crate::{
    ast::ast::{
        Argument, Expr, ExprKind, ForInit, FunctionDecl, Invocation, Literal, StatementList, Stmt, SwitchLabel,
        SwitchSection, VarDecl,
    },
    config::TranslatorConfig,
    transform::type_map::default_value,
};

use super::rewrites::{RewriteRule, DEFAULT_REWRITES};

const INDENT: &str = "    ";

/// How a literal is printed, decided by the node that contains it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PrintContext {
    Plain,
    /// A string passed by reference names a method: printed unquoted
    MethodRef,
}

/// Renders processed trees. One printer can print several trees; the
/// external script references are reset by every `print_ast`.
pub struct Printer<'a> {
    config: &'a TranslatorConfig,
    out: String,
    depth: usize,
    script_refs: BTreeSet<String>,
    rewrites: HashMap<String, RewriteRule>,
}

impl<'a> Printer<'a> {
    pub fn new(config: &'a TranslatorConfig) -> Self {
        Printer {
            config,
            out: String::new(),
            depth: 0,
            script_refs: BTreeSet::new(),
            rewrites: DEFAULT_REWRITES
                .iter()
                .map(|(name, rule)| (name.to_string(), rule.clone()))
                .collect(),
        }
    }

    /// Adds or replaces the rewrite rule for calls to `method`.
    pub fn register(&mut self, method: &str, rule: RewriteRule) {
        self.rewrites.insert(method.to_string(), rule);
    }

    /// Script files named by string literals in the last printed tree.
    pub fn external_script_refs(&self) -> &BTreeSet<String> {
        &self.script_refs
    }

    pub fn print_ast(&mut self, list: &StatementList, depth: usize) -> String {
        self.out = String::new();
        self.depth = depth;
        self.script_refs.clear();

        self.print_statement_list(list);

        std::mem::take(&mut self.out)
    }

    fn capture(&mut self, f: impl FnOnce(&mut Self)) -> String {
        let saved = std::mem::take(&mut self.out);
        f(self);
        std::mem::replace(&mut self.out, saved)
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }

    fn print_level(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn print_statement_list(&mut self, list: &StatementList) {
        for statement in &list.statements {
            self.print_level();
            self.print_stmt(statement);
            self.newline();
        }
    }

    /// `{` and `}` on their own lines at the current depth.
    fn print_block(&mut self, list: &StatementList) {
        self.newline();
        self.print_level();
        self.push("{\n");
        self.depth += 1;
        self.print_statement_list(list);
        self.depth -= 1;
        self.print_level();
        self.push("}");
    }

    /// The body of `if`, `else`, loops: a block, or one indented statement
    /// on the next line.
    fn print_body(&mut self, body: &Stmt) {
        if let Stmt::Block(list) = body {
            self.print_block(list);
            return;
        }

        self.newline();
        self.depth += 1;
        self.print_level();
        self.print_stmt(body);
        self.depth -= 1;
    }

    fn print_stmt(&mut self, statement: &Stmt) {
        match statement {
            Stmt::Expression(expression) => {
                self.print_expr(expression, PrintContext::Plain);
                self.push(";");
            }
            Stmt::VarDecl(declaration) => {
                self.print_var_decl(declaration);
                self.push(";");
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.push("if(");
                self.print_expr(condition, PrintContext::Plain);
                self.push(")");
                self.print_body(then_branch);

                if let Some(branch) = else_branch {
                    self.newline();
                    self.print_level();
                    self.push("else");
                    if let Stmt::If { .. } = branch.as_ref() {
                        self.push(" ");
                        self.print_stmt(branch);
                    } else {
                        self.print_body(branch);
                    }
                }
            }
            Stmt::While { condition, body } => {
                self.push("while(");
                self.print_expr(condition, PrintContext::Plain);
                self.push(")");
                self.print_body(body);
                self.newline();
            }
            Stmt::DoWhile { body, condition } => {
                self.push("do");
                self.print_body(body);
                self.newline();
                self.print_level();
                self.push("while(");
                self.print_expr(condition, PrintContext::Plain);
                self.push(");");
            }
            Stmt::For {
                initializer,
                condition,
                iterator,
                body,
            } => {
                self.push("for(");
                match initializer {
                    Some(ForInit::Declaration(declaration)) => self.print_var_decl(declaration),
                    Some(ForInit::Expression(expression)) => self.print_expr(expression, PrintContext::Plain),
                    None => {}
                }
                self.push("; ");
                if let Some(condition) = condition {
                    self.print_expr(condition, PrintContext::Plain);
                }
                self.push("; ");
                if let Some(iterator) = iterator {
                    self.print_expr(iterator, PrintContext::Plain);
                }
                self.push(")");
                self.print_body(body);
            }
            Stmt::Switch { subject, sections } => {
                self.push("switch (");
                self.print_expr(subject, PrintContext::Plain);
                self.push(")\n");
                self.print_level();
                self.push("{\n");
                self.depth += 1;
                for section in sections {
                    self.print_switch_section(section);
                }
                self.depth -= 1;
                self.print_level();
                self.push("}");
            }
            Stmt::Break => self.push("break;"),
            Stmt::Continue => self.push("continue;"),
            Stmt::Return(value) => match value {
                Some(value) => {
                    self.push("return ");
                    self.print_expr(value, PrintContext::Plain);
                    self.push(";");
                }
                None => self.push("return;"),
            },
            Stmt::Block(list) => {
                // Nested blocks open on the current line's indentation.
                self.push("{\n");
                self.depth += 1;
                self.print_statement_list(list);
                self.depth -= 1;
                self.print_level();
                self.push("}");
            }
            Stmt::Function(function) => self.print_function(function),
            Stmt::Null => self.push(";"),
        }
    }

    /// A case falls out of the switch with an implicit `break;` unless it
    /// already ends in a jump. Empty cases stack onto the next label.
    fn print_switch_section(&mut self, section: &SwitchSection) {
        self.print_level();
        match &section.label {
            SwitchLabel::Case(value) => {
                self.push("case ");
                self.print_expr(value, PrintContext::Plain);
                self.push(":\n");
            }
            SwitchLabel::Default => self.push("default:\n"),
        }

        self.depth += 1;
        self.print_statement_list(&section.body);
        if !section.body.is_empty() && !section.body.ends_in_jump() {
            self.print_level();
            self.push("break;\n");
        }
        self.depth -= 1;
    }

    fn print_function(&mut self, function: &FunctionDecl) {
        self.push("public ");
        if function.return_type.is_ref {
            self.push("ref ");
        }
        self.push(&function.return_type.name);
        self.push(" ");
        self.push(&function.name);
        self.push("(");

        let parameters = function
            .parameters
            .iter()
            .map(|parameter| format!("{} {}", parameter.param_type, parameter.name))
            .collect::<Vec<_>>()
            .join(", ");
        self.push(&parameters);

        self.push(")");
        self.print_block(&function.body);
    }

    /// `Type a = value, b = default` without the trailing `;`.
    fn print_var_decl(&mut self, declaration: &VarDecl) {
        self.push(&declaration.declared_type.name);
        self.push(" ");

        for (i, declarator) in declaration.declarators.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push(&declarator.name);
            self.push(" = ");

            match &declarator.initializer {
                Some(initializer) => self.print_expr(initializer, PrintContext::Plain),
                None => {
                    let resolved = declarator.inferred.known().unwrap_or(&declaration.declared_type);
                    self.push(default_value(resolved));
                }
            }
        }
    }

    fn print_expr(&mut self, expression: &Expr, context: PrintContext) {
        match &expression.kind {
            ExprKind::Literal(literal) => self.print_literal(literal, context),
            ExprKind::Variable(name) => self.push(name),
            ExprKind::Binary { left, operator, right } => {
                self.print_expr(left, PrintContext::Plain);
                self.push(" ");
                self.push(operator.symbol());
                self.push(" ");
                self.print_expr(right, PrintContext::Plain);
            }
            ExprKind::Unary { operator, operand } => {
                let symbol = operator.symbol();
                let operand = self.capture(|printer| printer.print_expr(operand, PrintContext::Plain));

                self.push(symbol);
                // `- -a` must not fuse into `--a`.
                if symbol.chars().last() == operand.chars().next() {
                    self.push(" ");
                }
                self.push(&operand);
            }
            ExprKind::Postfix { operator, operand } => {
                self.print_expr(operand, PrintContext::Plain);
                self.push(operator.symbol());
            }
            ExprKind::Assignment { target, operator, value } => {
                self.print_expr(target, PrintContext::Plain);
                self.push(" ");
                self.push(operator.symbol());
                self.push(" ");
                self.print_expr(value, PrintContext::Plain);
            }
            ExprKind::Parenthesized(inner) => {
                self.push("(");
                self.print_expr(inner, PrintContext::Plain);
                self.push(")");
            }
            ExprKind::Cast { target_type, operand } => {
                self.push("(");
                self.push(&target_type.name);
                self.push(")");
                self.print_expr(operand, PrintContext::Plain);
            }
            ExprKind::Member { receiver, member } => {
                self.print_expr(receiver, PrintContext::Plain);
                self.push(".");
                self.push(member);
            }
            ExprKind::Invocation(invocation) => self.print_invocation(invocation),
            ExprKind::Interpolation { base, arguments } => {
                self.push("string.Format(");
                self.print_expr(base, PrintContext::Plain);
                for argument in arguments {
                    self.push(", ");
                    self.print_expr(argument, PrintContext::Plain);
                }
                self.push(")");
            }
            ExprKind::Localized(key) => {
                self.push("GetLocalizedString(\"");
                self.push(key);
                self.push("\")");
            }
        }
    }

    fn print_literal(&mut self, literal: &Literal, context: PrintContext) {
        match literal {
            Literal::String(value) => {
                if value.ends_with(&self.config.script_extension) {
                    self.script_refs.insert(value.clone());
                }

                let quoted = format!("\"{}\"", value);
                let text = match context {
                    PrintContext::MethodRef if value.is_empty() => "null",
                    PrintContext::MethodRef if !value.contains(&self.config.script_extension) => value.as_str(),
                    _ => quoted.as_str(),
                };
                self.push(text);
            }
            Literal::Int(value) => self.push(&value.to_string()),
            Literal::Long(value) => self.push(&value.to_string()),
            Literal::Float(value) => self.push(&format!("{}f", value)),
            Literal::Bool(value) => self.push(if *value { "true" } else { "false" }),
        }
    }

    fn print_argument(&mut self, argument: &Argument, by_ref: bool) {
        if by_ref {
            match &argument.value.kind {
                ExprKind::Literal(Literal::String(_)) => {
                    self.print_expr(&argument.value, PrintContext::MethodRef);
                    return;
                }
                ExprKind::Variable(_) | ExprKind::Member { .. } => self.push("ref "),
                _ => {}
            }
        }

        self.print_expr(&argument.value, PrintContext::Plain);
    }

    fn print_arguments(&mut self, arguments: &[Argument], by_ref: impl Fn(usize, &Argument) -> bool) {
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.print_argument(argument, by_ref(i, argument));
        }
    }

    fn print_invocation(&mut self, invocation: &Invocation) {
        if let Some(target) = &invocation.extern_target {
            self.push("CallExtern(\"");
            self.push(target);
            self.push("\", \"");
            self.print_expr(&invocation.callee, PrintContext::Plain);
            self.push("\"");
            for argument in &invocation.arguments {
                self.push(", ");
                self.print_argument(argument, argument.by_ref);
            }
            self.push(")");
            return;
        }

        let rule = invocation
            .method()
            .and_then(|(_, method)| self.rewrites.get(method))
            .cloned();

        match (rule, invocation.method()) {
            (Some(RewriteRule::ReferenceTrailing), _) => {
                self.print_expr(&invocation.callee, PrintContext::Plain);
                self.push("(");
                self.print_arguments(&invocation.arguments, |i, argument| i > 0 || argument.by_ref);
                self.push(")");
            }
            (Some(RewriteRule::AssignMember(operator)), Some((receiver, _))) if invocation.arguments.len() >= 2 => {
                self.print_expr(receiver, PrintContext::Plain);
                self.push(".");
                let member = self.print_stripped(&invocation.arguments[0]);
                self.push(&member);
                self.push(" ");
                self.push(operator);
                self.push(" ");
                let value = self.print_stripped(&invocation.arguments[1]);
                self.push(&value);
            }
            (Some(RewriteRule::CallMember), Some((receiver, _))) if !invocation.arguments.is_empty() => {
                self.print_expr(receiver, PrintContext::Plain);
                self.push(".");
                let member = self.print_stripped(&invocation.arguments[0]);
                self.push(&member);
                self.push("(");
                self.print_arguments(&invocation.arguments[1..], |_, argument| argument.by_ref);
                self.push(")");
            }
            (Some(rule @ RewriteRule::MarkReference(_)), _) => {
                let marked = rule.marked(invocation.arguments.len());
                self.print_expr(&invocation.callee, PrintContext::Plain);
                self.push("(");
                self.print_arguments(&invocation.arguments, |i, argument| {
                    argument.by_ref || marked.contains(&i)
                });
                self.push(")");
            }
            _ => {
                self.print_expr(&invocation.callee, PrintContext::Plain);
                self.push("(");
                self.print_arguments(&invocation.arguments, |_, argument| argument.by_ref);
                self.push(")");
            }
        }
    }

    /// Prints an argument into a scratch buffer and drops its quotes.
    fn print_stripped(&mut self, argument: &Argument) -> String {
        let text = self.capture(|printer| printer.print_argument(argument, argument.by_ref));
        // Escaped quotes go too; the host expects the bare member name.
        text.replace('"', "")
    }
}
