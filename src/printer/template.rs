use crate::config::TranslatorConfig;

/// Wraps a printed body into the class file for `script_name`.
///
/// The body is expected to be printed at `config.initial_depth`, inside
/// both the namespace and the class braces.
pub fn render_script_file(config: &TranslatorConfig, script_name: &str, body: &str) -> String {
    let mut file = String::from("\n");

    for using in &config.usings {
        file.push_str(&format!("using {};\n", using));
    }

    file.push_str(&format!("\nnamespace {} {{ \n", config.namespace));
    file.push_str(&format!(
        "    public class {}{} : {} {{\n",
        config.class_prefix, script_name, config.base_class
    ));
    file.push_str(body);
    file.push_str("    }\n");
    file.push_str("}\n");

    file
}
