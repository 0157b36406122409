use std::fs;

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    // The renderer cannot work without the core node types
    let supported = table
        .get("filter")
        .and_then(|filter| filter.get("supported"))
        .and_then(|supported| supported.as_array())
        .expect("default_config.toml must define filter.supported");
    for required in ["document", "paragraph", "link", "text"] {
        if !supported.iter().any(|v| v.as_str() == Some(required)) {
            panic!("default_config.toml: filter.supported is missing {:?}", required);
        }
    }
}
