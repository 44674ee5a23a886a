use std::collections::HashMap;

use lazy_static::lazy_static;

/// How a call to a method with a given name is printed instead of the
/// plain `receiver.Method(args)` form. Rules only apply to member calls.
#[derive(Debug, Clone, PartialEq)]
pub enum RewriteRule {
    /// Every argument after the first is printed in reference form.
    ReferenceTrailing,
    /// `receiver.<arg0> <operator> <arg1>` with quotes stripped from both
    /// arguments.
    AssignMember(&'static str),
    /// `receiver.<arg0>(remaining args)` with quotes stripped from arg0.
    CallMember,
    /// Marks arguments by reference before printing the plain call. Each
    /// entry is an optional required argument count and an argument index.
    MarkReference(Vec<(Option<usize>, usize)>),
}

impl RewriteRule {
    /// Indexes `MarkReference` marks for a call with `arity` arguments.
    pub fn marked(&self, arity: usize) -> Vec<usize> {
        match self {
            RewriteRule::MarkReference(entries) => entries
                .iter()
                .filter(|(required, index)| required.map_or(true, |required| required == arity) && *index < arity)
                .map(|(_, index)| *index)
                .collect(),
            _ => vec![],
        }
    }
}

lazy_static! {
    pub static ref DEFAULT_REWRITES: HashMap<&'static str, RewriteRule> = {
        let mut map = HashMap::new();
        map.insert("GetData", RewriteRule::ReferenceTrailing);
        map.insert("OverrideFunction", RewriteRule::AssignMember("="));
        map.insert("AddFunction", RewriteRule::AssignMember("+="));
        map.insert("CallFunction", RewriteRule::CallMember);
        map.insert("CreateMonsterGroup", RewriteRule::MarkReference(vec![(None, 1)]));
        map.insert("SetTimer", RewriteRule::MarkReference(vec![(None, 1)]));
        map.insert("AddPropWithAngle", RewriteRule::MarkReference(vec![(None, 6)]));
        map.insert(
            "AddPropWithAbsolutePosition",
            RewriteRule::MarkReference(vec![(Some(8), 6), (Some(9), 7)]),
        );
        map
    };
}
