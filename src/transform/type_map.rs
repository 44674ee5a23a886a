use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ast::ast::Type;

lazy_static! {
    /// Builtin source type names and the host type they stand for.
    pub static ref TYPE_RENAMES: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("dungeonbuilder", "DungeonBuilder");
        map.insert("dungeon2", "Dungeon2");
        map.insert("puzzlebuilder", "PuzzleBuilder");
        map.insert("dword", "int");
        map.insert("qword", "long");
        map.insert("prop", "Prop");
        map.insert("dungeon2puzzle", "Dungeon2Puzzle");
        map.insert("dungeon2monster", "Dungeon2Monster");
        map.insert("dungeon2chest", "Dungeon2Chest");
        map.insert("object_list", "ObjectList");
        map.insert("character", "Creature");
        map.insert("meta_array", "MetaArray");
        map.insert("item", "Item");
        map
    };

    /// Initializer printed for a declarator without one.
    pub static ref DEFAULT_VALUES: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("byte", "0");
        map.insert("short", "0");
        map.insert("int", "0");
        map.insert("long", "0");
        map.insert("float", "0");
        map.insert("bool", "false");
        map
    };
}

/// Replaces a builtin type name with its host name. Unknown names pass through.
pub fn rename_type(t: &mut Type) {
    if let Some(renamed) = TYPE_RENAMES.get(t.name.as_str()) {
        t.name = renamed.to_string();
    }
}

pub fn default_value(t: &Type) -> &'static str {
    DEFAULT_VALUES.get(t.name.as_str()).copied().unwrap_or("null")
}
