use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::ast::{
    ast::{Expr, ExprKind, ForInit, StatementList, Stmt, SwitchLabel, Type, VarDecl},
    walk::visit_expr,
};

use super::interface_table::InterfaceMethod;

/// One call `receiver.method(args...)` on a variable of a known type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Observation {
    pub type_name: String,
    pub method: String,
    pub arguments: Vec<Option<Type>>,
    pub return_type: Option<Type>,
}

impl Observation {
    /// Number of known positions, return type included.
    fn specificity(&self) -> usize {
        self.arguments.iter().filter(|a| a.is_some()).count() + usize::from(self.return_type.is_some())
    }
}

type Receivers = HashMap<String, Type>;

/// The set of call-site observations of a corpus.
///
/// Observations are kept as a set, so recording files in any order, or
/// merging per-file sets in any order, yields the same synthesized
/// interfaces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observations {
    observed: BTreeSet<Observation>,
}

impl Observations {
    pub fn new() -> Self {
        Observations::default()
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observed.iter()
    }

    pub fn insert(&mut self, observation: Observation) {
        self.observed.insert(observation);
    }

    /// Adds every observation of `other`.
    pub fn merge(&mut self, other: Observations) {
        self.observed.extend(other.observed);
    }

    /// Records the method calls of one processed tree.
    pub fn record(&mut self, list: &StatementList) {
        let before = self.observed.len();
        self.record_list(list, &mut Receivers::new());
        debug!("recorded {} new observations", self.observed.len() - before);
    }

    fn record_list(&mut self, list: &StatementList, receivers: &mut Receivers) {
        for statement in &list.statements {
            self.record_stmt(statement, receivers);
        }
    }

    fn record_stmt(&mut self, statement: &Stmt, receivers: &mut Receivers) {
        match statement {
            Stmt::Expression(expression) => self.record_expr(expression, receivers),
            Stmt::VarDecl(declaration) => self.record_var_decl(declaration, receivers),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.record_expr(condition, receivers);
                self.record_stmt(then_branch, receivers);
                if let Some(branch) = else_branch {
                    self.record_stmt(branch, receivers);
                }
            }
            Stmt::While { condition, body } | Stmt::DoWhile { body, condition } => {
                self.record_expr(condition, receivers);
                self.record_stmt(body, receivers);
            }
            Stmt::For {
                initializer,
                condition,
                iterator,
                body,
            } => {
                let mut inner = receivers.clone();
                match initializer {
                    Some(ForInit::Declaration(declaration)) => self.record_var_decl(declaration, &mut inner),
                    Some(ForInit::Expression(expression)) => self.record_expr(expression, &inner),
                    None => {}
                }
                for expression in condition.iter().chain(iterator.iter()) {
                    self.record_expr(expression, &inner);
                }
                self.record_stmt(body, &mut inner);
            }
            Stmt::Switch { subject, sections } => {
                self.record_expr(subject, receivers);

                let mut inner = receivers.clone();
                for section in sections {
                    if let SwitchLabel::Case(value) = &section.label {
                        self.record_expr(value, &inner);
                    }
                    self.record_list(&section.body, &mut inner);
                }
            }
            Stmt::Return(Some(value)) => self.record_expr(value, receivers),
            Stmt::Block(list) => self.record_list(list, &mut receivers.clone()),
            Stmt::Function(function) => {
                let mut inner: Receivers = function
                    .parameters
                    .iter()
                    .map(|parameter| (parameter.name.clone(), parameter.param_type.clone()))
                    .collect();
                self.record_list(&function.body, &mut inner);
            }
            Stmt::Return(None) | Stmt::Break | Stmt::Continue | Stmt::Null => {}
        }
    }

    fn record_var_decl(&mut self, declaration: &VarDecl, receivers: &mut Receivers) {
        for declarator in &declaration.declarators {
            if let Some(initializer) = &declarator.initializer {
                self.record_expr(initializer, receivers);
            }
            receivers.insert(declarator.name.clone(), declaration.declared_type.clone());
        }
    }

    fn record_expr(&mut self, expression: &Expr, receivers: &Receivers) {
        let observed = &mut self.observed;

        visit_expr(expression, &mut |expression| {
            let ExprKind::Invocation(invocation) = &expression.kind else {
                return;
            };
            let Some((receiver, method)) = invocation.method() else {
                return;
            };
            let Some(receiver_type) = receiver.as_variable().and_then(|name| receivers.get(name)) else {
                return;
            };

            observed.insert(Observation {
                type_name: receiver_type.name.clone(),
                method: method.to_string(),
                arguments: invocation.arguments.iter().map(|a| a.inferred.known().cloned()).collect(),
                return_type: expression.inferred.known().cloned(),
            });
        });
    }

    /// Merges the observations into overload variants per type.
    ///
    /// Observations of one (type, method, arity) are visited most specific
    /// first, then in lexicographic order. Each joins the first variant it
    /// agrees with at every known parameter position, filling that variant's
    /// unknown positions; otherwise it starts a new variant. A variant keeps
    /// the first known return type it sees in that order.
    pub fn synthesize(&self) -> BTreeMap<String, Vec<InterfaceMethod>> {
        let mut groups: BTreeMap<(&str, &str, usize), Vec<&Observation>> = BTreeMap::new();
        for observation in &self.observed {
            groups
                .entry((observation.type_name.as_str(), observation.method.as_str(), observation.arguments.len()))
                .or_default()
                .push(observation);
        }

        let mut interfaces: BTreeMap<String, Vec<InterfaceMethod>> = BTreeMap::new();
        for ((type_name, method, _), mut observations) in groups {
            observations.sort_by(|a, b| b.specificity().cmp(&a.specificity()).then_with(|| a.cmp(b)));

            let mut variants: Vec<InterfaceMethod> = vec![];
            for observation in observations {
                match variants.iter_mut().find(|variant| agrees(variant, observation)) {
                    Some(variant) => absorb(variant, observation),
                    None => variants.push(InterfaceMethod {
                        name: method.to_string(),
                        return_type: observation.return_type.clone(),
                        parameters: observation.arguments.clone(),
                    }),
                }
            }

            interfaces.entry(type_name.to_string()).or_default().extend(variants);
        }

        for methods in interfaces.values_mut() {
            methods.sort();
        }

        interfaces
    }

    /// Renders one interface text per type, one line per variant.
    pub fn render(&self) -> BTreeMap<String, String> {
        self.synthesize()
            .into_iter()
            .map(|(type_name, methods)| {
                let text = methods.iter().map(|method| method.render() + "\n").collect::<String>();
                (type_name, text)
            })
            .collect()
    }
}

fn compatible(left: &Option<Type>, right: &Option<Type>) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => left == right,
        _ => true,
    }
}

/// Only parameters decide the variant; return types never split one.
fn agrees(variant: &InterfaceMethod, observation: &Observation) -> bool {
    variant
        .parameters
        .iter()
        .zip(&observation.arguments)
        .all(|(parameter, argument)| compatible(parameter, argument))
}

fn absorb(variant: &mut InterfaceMethod, observation: &Observation) {
    if variant.return_type.is_none() {
        variant.return_type = observation.return_type.clone();
    }
    for (parameter, argument) in variant.parameters.iter_mut().zip(&observation.arguments) {
        if parameter.is_none() {
            *parameter = argument.clone();
        }
    }
}
