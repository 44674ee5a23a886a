//! Types, inferred-type slots and literal values.
//!
//! A `Type` is a name plus a by-reference flag. Numeric names sit on a
//! promotion ladder (`byte < short < int < long < float`) which drives
//! `Type::combine`; every other name is opaque to the combination rules.

use std::fmt::Display;

/// Numeric promotion ladder, narrowest first.
pub const NUMERIC_LADDER: [&str; 5] = ["byte", "short", "int", "long", "float"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Type {
    pub name: String,
    pub is_ref: bool,
}

/// Two types that cannot be combined into one.
#[derive(Debug, Clone, PartialEq)]
pub struct CombineError {
    pub left: Type,
    pub right: Type,
}

impl Display for CombineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot combine `{}` with `{}`", self.left, self.right)
    }
}

impl Type {
    pub fn new(name: &str) -> Self {
        Type {
            name: name.to_string(),
            is_ref: false,
        }
    }

    pub fn by_ref(name: &str) -> Self {
        Type {
            name: name.to_string(),
            is_ref: true,
        }
    }

    pub fn void() -> Self {
        Type::new("void")
    }

    pub fn string() -> Self {
        Type::new("string")
    }

    pub fn bool() -> Self {
        Type::new("bool")
    }

    pub fn int() -> Self {
        Type::new("int")
    }

    pub fn long() -> Self {
        Type::new("long")
    }

    pub fn float() -> Self {
        Type::new("float")
    }

    /// Position on the numeric ladder, `None` for non-numeric names.
    pub fn numeric_rank(&self) -> Option<usize> {
        NUMERIC_LADDER.iter().position(|name| *name == self.name)
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_rank().is_some()
    }

    pub fn is_void(&self) -> bool {
        self.name == "void"
    }

    /// Combines two known types.
    ///
    /// `void` on either side places no constraint and yields the other type.
    /// Two numeric types yield the wider one; two equal types yield that
    /// type. Anything else is a combination failure.
    pub fn combine(&self, other: &Type) -> Result<Type, CombineError> {
        if self.is_void() {
            return Ok(other.clone());
        }
        if other.is_void() {
            return Ok(self.clone());
        }

        match (self.numeric_rank(), other.numeric_rank()) {
            (Some(left), Some(right)) => Ok(if right > left { other.clone() } else { self.clone() }),
            _ if self == other => Ok(self.clone()),
            _ => Err(CombineError {
                left: self.clone(),
                right: other.clone(),
            }),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_ref {
            write!(f, "ref {}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// The inferred-type slot carried by expressions and declarations.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Inferred {
    /// Not visited by inference yet
    #[default]
    Pending,
    /// Visited, no type could be determined
    Unknown,
    Known(Type),
}

impl Inferred {
    pub fn known(&self) -> Option<&Type> {
        match self {
            Inferred::Known(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Inferred::Pending)
    }

    pub fn is_unknown(&self) -> bool {
        !matches!(self, Inferred::Known(_))
    }

    /// Combines two slots; a slot without a type places no constraint.
    pub fn combine(&self, other: &Inferred) -> Result<Inferred, CombineError> {
        match (self.known(), other.known()) {
            (Some(left), Some(right)) => left.combine(right).map(Inferred::Known),
            (Some(_), None) => Ok(self.clone()),
            (None, Some(_)) => Ok(other.clone()),
            (None, None) => Ok(Inferred::Unknown),
        }
    }
}

impl From<Option<Type>> for Inferred {
    fn from(value: Option<Type>) -> Self {
        match value {
            Some(t) => Inferred::Known(t),
            None => Inferred::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Bool(bool),
}

impl Literal {
    pub fn get_type(&self) -> Type {
        match self {
            Literal::String(_) => Type::string(),
            Literal::Int(_) => Type::int(),
            Literal::Long(_) => Type::long(),
            Literal::Float(_) => Type::float(),
            Literal::Bool(_) => Type::bool(),
        }
    }
}
