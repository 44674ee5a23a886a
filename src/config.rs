//! Output settings for the printer and the script file template.

/// Settings for one translation run. `Default` reproduces the output the
/// host server expects.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatorConfig {
    /// Suffix marking a string literal as a reference to another script
    pub script_extension: String,
    /// Indentation depth of the printed body inside the class template
    pub initial_depth: usize,
    pub namespace: String,
    /// Prefix of the generated class name, followed by the script name
    pub class_prefix: String,
    pub base_class: String,
    pub usings: Vec<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            script_extension: String::from(".mint"),
            initial_depth: 2,
            namespace: String::from("Aura.Mabi.Mint"),
            class_prefix: String::from("mint_"),
            base_class: String::from("MintScript"),
            usings: vec![
                String::from("Aura.Channel.Scripting.Mint"),
                String::from("Aura.Channel.World.Entities"),
                String::from("Aura.Mabi.Mint"),
            ],
        }
    }
}
