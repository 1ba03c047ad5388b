pub mod compile;
pub mod inspect;

use std::path::PathBuf;

use anyhow::{Context, Result};
use rmenu_router::{CompiledTable, Compiler, Config, ModuleManifest, RouteRegistry};

/// Loads every manifest and compiles the resulting registry
pub fn compile_manifests(config: &Config, manifests: &[PathBuf]) -> Result<CompiledTable> {
    let mut registry = RouteRegistry::new();

    for path in manifests {
        let manifest = ModuleManifest::from_file(path)
            .with_context(|| format!("Failed to load manifest: {:?}", path))?;
        registry.register_module(manifest);
    }

    tracing::debug!(routes = registry.len(), modules = manifests.len(), "loaded manifests");

    let (declarations, functions) = registry.into_parts();
    Ok(Compiler::new(&functions)
        .with_options(config.compiler.clone())
        .compile(declarations))
}
