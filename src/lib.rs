#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Arc};

use crate::{
    ast::ast::StatementList,
    config::TranslatorConfig,
    errors::errors::{Error, ErrorTip},
    interfaces::{interface_table::InterfaceTable, synthesizer::Observations},
    printer::printer::Printer,
};

pub mod ast;
pub mod builder;
pub mod config;
pub mod cst;
pub mod errors;
pub mod inference;
pub mod interfaces;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod printer;
pub mod transform;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Arc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Arc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.1, self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Output of translating one source file.
#[derive(Debug, Clone)]
pub struct Translation {
    /// Printed target-language body
    pub text: String,
    /// Script files referenced by string literals in the body
    pub script_refs: Vec<String>,
}

/// Lexes, parses and builds the AST for one source text.
pub fn parse_source(source: &str, file: &str) -> Result<StatementList, Error> {
    let tokens = lexer::lexer::tokenize(source.to_string(), Some(file.to_string()))?;
    let (_, cst) = parser::parser::parse(tokens, Arc::new(file.to_string()));
    builder::builder::build(&cst?)
}

/// Runs the full per-file pipeline: parse, transform, infer and print.
pub fn translate_source(
    source: &str,
    file: &str,
    interfaces: &InterfaceTable,
    config: &TranslatorConfig,
) -> Result<Translation, Error> {
    let mut ast = parse_source(source, file)?;
    transform::pipeline::process(&mut ast, interfaces);

    let mut printer = Printer::new(config);
    let text = printer.print_ast(&ast, config.initial_depth);

    Ok(Translation {
        text,
        script_refs: printer.external_script_refs().iter().cloned().collect(),
    })
}

/// Runs the per-file pipeline and records the opaque-type call sites of the result.
pub fn observe_source(source: &str, file: &str, interfaces: &InterfaceTable) -> Result<Observations, Error> {
    let mut ast = parse_source(source, file)?;
    transform::pipeline::process(&mut ast, interfaces);

    let mut observations = Observations::new();
    observations.record(&ast);
    Ok(observations)
}

pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos >= content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}


/// Renders an error against its source text:
///
/// ```text
/// Error: message
/// -> script.mint
///   |
/// 2 | int b = #;
///   | --------^
/// ```
pub fn render_error(error: &Error, content: &str) -> String {
    let position = error.get_position();
    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    rendered.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(content, position.0) else {
        return rendered;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

pub fn display_error(error: &Error, content: &str) {
    eprint!("{}", render_error(error, content));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

/// Convenience for callers that only hold a file's source: translate or render the error.
pub fn translate_or_render(
    source: &str,
    file: &str,
    interfaces: &InterfaceTable,
    config: &TranslatorConfig,
) -> Result<Translation, String> {
    translate_source(source, file, interfaces, config).map_err(|error| render_error(&error, source))
}
