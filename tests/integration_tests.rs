//! End-to-end tests for the translation pipeline.
//!
//! These run source text through lexing, parsing, building, the transform
//! passes, inference and printing, and check the synthesized interfaces
//! against the inference that reads them.

use mint_translator::{
    config::TranslatorConfig,
    interfaces::{interface_table::InterfaceTable, synthesizer::Observations},
    observe_source, parse_source,
    printer::{printer::Printer, template::render_script_file},
    transform::pipeline::process,
    translate_or_render, translate_source,
};

fn config_at(depth: usize) -> TranslatorConfig {
    TranslatorConfig {
        initial_depth: depth,
        ..TranslatorConfig::default()
    }
}

fn translate(source: &str) -> String {
    translate_source(source, "test.mint", &InterfaceTable::new(), &config_at(0))
        .unwrap()
        .text
}

#[test]
fn test_translate_arithmetic() {
    assert_eq!(translate("int x = 1 - 2 - 3;"), "int x = 1 - 2 - 3;\n");
    assert_eq!(translate("int x = 1 - (2 - 3);"), "int x = 1 - (2 - 3);\n");
}

#[test]
fn test_translate_default_initializers() {
    assert_eq!(translate("string s;"), "string s = null;\n");
    assert_eq!(translate("int i;"), "int i = 0;\n");
}

#[test]
fn test_translate_splits_declarations() {
    assert_eq!(translate("{ int a = 1, b = 2; }"), "{\n    int a = 1;\n    int b = 2;\n}\n");
}

#[test]
fn test_translate_reference_parameters() {
    let source = "void Take(string a, ref int b) { b = 1; } int n; Take(\"x\", n);";
    let expected = concat!(
        "public void Take(string a, ref int b)\n",
        "{\n",
        "    b = 1;\n",
        "}\n",
        "int n = 0;\n",
        "Take(\"x\", ref n);\n",
    );

    assert_eq!(translate(source), expected);
}

#[test]
fn test_translate_script_file() {
    let source = "server void OnLoad() { character c; c.SetTimer(5, \"Tick\"); Load(\"next.mint\"); }";
    let config = TranslatorConfig::default();
    let translation = translate_source(source, "town.mint", &InterfaceTable::new(), &config).unwrap();

    let body = concat!(
        "        public void OnLoad()\n",
        "        {\n",
        "            Creature c = null;\n",
        "            c.SetTimer(5, Tick);\n",
        "            Load(\"next.mint\");\n",
        "        }\n",
    );
    assert_eq!(translation.text, body);
    assert_eq!(translation.script_refs, vec![String::from("next.mint")]);

    let file = render_script_file(&config, "town", &translation.text);
    assert!(file.contains("    public class mint_town : MintScript {\n        public void OnLoad()\n"));
    assert!(file.ends_with("        }\n    }\n}\n"));
}

#[test]
fn test_translate_errors_are_rendered() {
    let rendered = translate_or_render("int a = 1;\nint b = #;\n", "bad.mint", &InterfaceTable::new(), &config_at(0))
        .unwrap_err();

    assert!(rendered.starts_with("Error: UnrecognisedToken"));
    assert!(rendered.contains("-> bad.mint"));
    assert!(rendered.contains("2 | int b = #;"));
}

#[test]
fn test_printed_program_is_a_fixpoint() {
    let source = concat!(
        "int a = 1, b;",
        "string s = \"x\";",
        "if (a < 2) { a = a + 1; } else a = 2;",
        "while (a < 10) a++;",
        "switch (a) { case 1: s = \"one\"; default: s = \"other\"; }",
        "for (int i = 0; i < 3; i++) { b += i; }",
        "do { b--; } while (b > 0);",
    );

    let first = translate(source);
    let second = translate(&first);
    assert_eq!(first, second);
}

#[test]
fn test_round_trip_preserves_tree() {
    let source = concat!(
        "int a = 1;",
        "float f = (float)a / 2;",
        "if (a < 2 && f > 0.5) { a = a * (a + 1); }",
        "while (a < 10) a++;",
        "switch (a) { case 1: a = 2; break; default: return; }",
    );

    let interfaces = InterfaceTable::new();
    let mut first = parse_source(source, "test.mint").unwrap();
    process(&mut first, &interfaces);

    let config = config_at(0);
    let mut printer = Printer::new(&config);
    let text = printer.print_ast(&first, 0);

    let mut second = parse_source(&text, "test.mint").unwrap();
    process(&mut second, &interfaces);

    assert_eq!(first, second);
    assert_eq!(printer.print_ast(&second, 0), text);
}

#[test]
fn test_synthesized_interfaces_feed_inference() {
    let files = [
        "character c; int level = c.GetLevel(); c.Say(\"hi\", level);",
        "void Greet(character who) { who.Say(\"hello\", 3); }",
        "character c; c.Say(text, 1);",
    ];

    let observe_all = |order: &[usize]| {
        let mut observations = Observations::new();
        for &i in order {
            observations.merge(observe_source(files[i], "test.mint", &InterfaceTable::new()).unwrap());
        }
        observations.render()
    };

    let rendered = observe_all(&[0, 1, 2]);
    assert_eq!(rendered, observe_all(&[2, 1, 0]));
    assert_eq!(rendered, observe_all(&[1, 2, 0]));
    assert_eq!(
        rendered["Creature"],
        "server int GetLevel() { }\nserver void Say(string _, int _) { }\n"
    );

    let interfaces = InterfaceTable::from_sources(rendered).unwrap();
    let translation = translate_source(
        "character c; x = c.GetLevel() + 1.5;",
        "test.mint",
        &interfaces,
        &config_at(0),
    )
    .unwrap();
    assert_eq!(translation.text, "Creature c = null;\nx = c.GetLevel() + 1.5f;\n");

    let mut ast = parse_source("character c; y = c.GetLevel();", "test.mint").unwrap();
    process(&mut ast, &interfaces);
    let observed = {
        let mut observations = Observations::new();
        observations.record(&ast);
        observations
    };
    let return_types: Vec<_> = observed.iter().map(|o| o.return_type.clone()).collect();
    assert_eq!(return_types, vec![Some(mint_translator::ast::ast::Type::int())]);
}
