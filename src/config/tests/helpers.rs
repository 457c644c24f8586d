//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::config::StewardConfig;

/// Variables consulted as fallbacks, cleared by tests that need isolation.
pub const FALLBACK_VARIABLES: [&str; 9] = [
    "GITHUB_TOKEN",
    "GITHUB_REPOSITORY",
    "GITHUB_EVENT_PATH",
    "GITHUB_BASE_REF",
    "GITHUB_HEAD_REF",
    "GITHUB_REF",
    "GITHUB_API_URL",
    "GITHUB_WORKSPACE",
    "OPENAI_API_KEY",
];

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Composes a [`StewardConfig`] from a sequence of `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> StewardConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    StewardConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// Environment entries clearing every fallback variable except `overrides`.
pub fn env_with(
    overrides: &[(&'static str, &'static str)],
) -> Vec<(&'static str, Option<&'static str>)> {
    FALLBACK_VARIABLES
        .iter()
        .map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| *value);
            (*name, value)
        })
        .collect()
}
