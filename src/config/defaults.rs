//! Default value functions for serde deserialization.

pub fn output_dir() -> String {
    "./output".to_string()
}

pub fn config_path() -> &'static str {
    "configs/shakha.yaml"
}
