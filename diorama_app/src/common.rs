//! Shared setup for the diorama binaries
//!
//! Both binaries compose the same coffee-shop scene; they differ only in
//! the [`CompositionProfile`] they pass in.

use std::sync::Arc;

use diorama_engine::foundation::logging;
use diorama_engine::prelude::*;

/// Environment variable naming a `.toml` or `.ron` config file
pub const CONFIG_ENV: &str = "DIORAMA_CONFIG";

/// (path, uniform scale, position, rotation in radians)
type Placement = (&'static str, f32, [f32; 3], [f32; 3]);

const COFFEE_SHOP: &[Placement] = &[
    ("models/sleepycat/scene.gltf", 50.0, [15.0, 4.3, -50.0], [0.0; 3]),
    ("models/coffee_cup/scene.gltf", 70.0, [10.0, 5.445, 10.0], [0.0; 3]),
    ("models/folded_newspaper/scene.gltf", 0.9, [20.0, 2.8, -10.0], [0.0, 15.0, 0.0]),
    ("models/sesame_bagel/scene.gltf", 5.0, [20.0, 4.3, -30.0], [0.0; 3]),
    ("models/pastries/scene.gltf", 20.0, [4.0, 5.0, 32.0], [0.0; 3]),
    ("models/coffee_cake/scene.gltf", 2.0, [27.0, 2.0, -1.0], [0.0; 3]),
    ("models/coffee_cup_with_plate/scene.gltf", 70.0, [20.0, 2.6, 50.0], [0.0; 3]),
];

/// The built-in coffee-shop manifest
pub fn coffee_shop_manifest() -> Manifest {
    COFFEE_SHOP
        .iter()
        .map(|&(path, scale, position, rotation)| {
            PlacedAsset::new(path)
                .with_scale(Vec3::repeat(scale))
                .with_position(Vec3::from(position))
                .with_rotation(Vec3::from(rotation))
        })
        .collect()
}

fn load_config() -> Result<DioramaConfig, Box<dyn std::error::Error>> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => Ok(DioramaConfig::load_from_file(&path)?),
        Err(_) => Ok(DioramaConfig::default()),
    }
}

fn load_manifest(config: &DioramaConfig) -> Result<Manifest, Box<dyn std::error::Error>> {
    match &config.assets.manifest {
        Some(path) => {
            log::info!("Reading manifest from {}", path);
            Ok(Manifest::load_from_file(path)?)
        }
        None => Ok(coffee_shop_manifest()),
    }
}

/// Compose the diorama with `profile` and run its frame loop
pub fn run(profile: CompositionProfile) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init(&config.logging);
    log::info!("Starting diorama ({} profile)", profile.name);
    
    let manifest = load_manifest(&config)?;
    let source = Arc::new(FileSystemSource::new(config.assets.search_paths.clone()));
    let backend = HeadlessBackend::new(config.renderer.clone());
    let mut diorama = Diorama::compose(&config, profile, &manifest, source, backend)?;
    
    let mut scheduler = VsyncScheduler::new(config.frame.refresh_hz).with_max_frames(config.frame.max_frames);
    diorama.run(&mut scheduler)?;
    
    let report = diorama.load_report();
    log::info!(
        "Rendered {} frames; {} of {} models placed, {} failed",
        diorama.frames(),
        report.loaded.len(),
        manifest.len(),
        report.failed.len(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coffee_shop_manifest_matches_table() {
        let manifest = coffee_shop_manifest();
        assert_eq!(manifest.len(), 7);
        assert!(manifest.iter().all(|entry| !entry.path.contains("matcha_bag")));

        let newspaper = &manifest.entries()[2];
        assert_eq!(newspaper.path, "models/folded_newspaper/scene.gltf");
        assert_eq!(newspaper.scale, [0.9; 3]);
        assert_eq!(newspaper.rotation, [0.0, 15.0, 0.0]);
        assert!(manifest.iter().all(|entry| entry.shadows.casts()));
    }
}
