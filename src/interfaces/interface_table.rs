use std::{collections::HashMap, sync::Arc};

use crate::{
    ast::ast::{Inferred, Stmt, Type},
    errors::errors::{Error, ErrorImpl},
    parse_source,
    transform::type_map::rename_type,
    Position,
};

/// Parameter type name that matches any argument.
pub const WILDCARD_TYPE: &str = "unk_type";

/// One method signature of a host type. `None` stands for a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceMethod {
    pub name: String,
    pub return_type: Option<Type>,
    pub parameters: Vec<Option<Type>>,
}

impl InterfaceMethod {
    /// Whether a call with these argument types can resolve to this method.
    /// Unknown arguments match any parameter.
    pub fn accepts(&self, arguments: &[Inferred]) -> bool {
        self.parameters.len() == arguments.len()
            && self
                .parameters
                .iter()
                .zip(arguments)
                .all(|(parameter, argument)| match (parameter, argument.known()) {
                    (Some(parameter), Some(argument)) => parameter.name == argument.name,
                    _ => true,
                })
    }

    /// Renders the method as one line of interface text.
    pub fn render(&self) -> String {
        let return_type = self.return_type.as_ref().map_or("void", |t| t.name.as_str());
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| format!("{} _", parameter.as_ref().map_or(WILDCARD_TYPE, |t| t.name.as_str())))
            .collect::<Vec<_>>()
            .join(", ");

        format!("server {} {}({}) {{ }}", return_type, self.name, parameters)
    }
}

fn wildcard_or(t: &Type) -> Option<Type> {
    if t.name == WILDCARD_TYPE {
        return None;
    }

    let mut renamed = t.clone();
    rename_type(&mut renamed);
    Some(renamed)
}

/// Method signatures of every known host type, keyed by type name.
/// Candidates keep the order they were read in.
#[derive(Debug, Clone, Default)]
pub struct InterfaceTable {
    types: HashMap<String, Vec<InterfaceMethod>>,
}

impl InterfaceTable {
    pub fn new() -> Self {
        InterfaceTable::default()
    }

    /// Parses interface text: every top-level statement must be a function
    /// declaration, whose body is ignored.
    pub fn parse(type_name: &str, text: &str) -> Result<Vec<InterfaceMethod>, Error> {
        let file = format!("{}.mint", type_name);
        let ast = parse_source(text, &file)?;

        ast.statements
            .iter()
            .map(|statement| match statement {
                Stmt::Function(function) => Ok(InterfaceMethod {
                    name: function.name.clone(),
                    return_type: wildcard_or(&function.return_type),
                    parameters: function.parameters.iter().map(|p| wildcard_or(&p.param_type)).collect(),
                }),
                _ => Err(Error::new(
                    ErrorImpl::InvalidInterface {
                        type_name: type_name.to_string(),
                        message: String::from("only function declarations are allowed"),
                    },
                    Position(0, Arc::new(file.clone())),
                )),
            })
            .collect()
    }

    /// Parses `text` and appends its methods to `type_name`'s candidates.
    pub fn add_source(&mut self, type_name: &str, text: &str) -> Result<usize, Error> {
        let methods = InterfaceTable::parse(type_name, text)?;
        let count = methods.len();
        self.types.entry(type_name.to_string()).or_default().extend(methods);
        Ok(count)
    }

    /// Builds a table from `(type name, interface text)` pairs.
    pub fn from_sources<I>(sources: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut table = InterfaceTable::new();
        for (type_name, text) in sources {
            table.add_source(&type_name, &text)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, type_name: &str, method: InterfaceMethod) {
        self.types.entry(type_name.to_string()).or_default().push(method);
    }

    pub fn methods(&self, type_name: &str) -> &[InterfaceMethod] {
        self.types.get(type_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First candidate of `type_name` with this name and arity, in file
    /// order, that accepts the argument types.
    pub fn find_match(&self, type_name: &str, name: &str, arguments: &[Inferred]) -> Option<&InterfaceMethod> {
        self.methods(type_name)
            .iter()
            .find(|method| method.name == name && method.accepts(arguments))
    }

    pub fn len(&self) -> usize {
        self.types.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
