//! Diorama coordinator
//!
//! Owns the scene and is the only thing that mutates it after startup.

use std::sync::Arc;

use thiserror::Error;

use crate::assets::{AssetSource, Manifest};
use crate::composition::{
    CompositionProfile, Environment, EnvironmentBuilder, LoadReport, PendingPlacements, PlacementLoader,
};
use crate::config::ConfigError;
use crate::core::config::DioramaConfig;
use crate::foundation::math::Vec3;
use crate::frame_loop::{FrameLoop, FrameScheduler};
use crate::render::{
    FrameStats, OrbitController, PerspectiveCamera, PointerEvent, RenderBackend, RenderError, TextureLoader,
};
use crate::scene::Scene;

/// Errors surfaced by the coordinator
///
/// Per-model load failures are not errors here; they land in [`LoadReport`].
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration could not be used
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    
    /// The render host failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// A composed, running diorama
pub struct Diorama<B: RenderBackend> {
    profile: CompositionProfile,
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitController,
    backend: B,
    environment: Environment,
    placements: PendingPlacements,
    frame_loop: FrameLoop,
}

impl<B: RenderBackend> Diorama<B> {
    /// Build lights, environment and camera rig, and start loading `manifest`
    ///
    /// Returns as soon as loads are in flight; models appear in the scene
    /// on later ticks as they finish.
    pub fn compose(
        config: &DioramaConfig,
        profile: CompositionProfile,
        manifest: &Manifest,
        source: Arc<dyn AssetSource>,
        backend: B,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Composing diorama with {} profile", profile.name);
        
        let mut scene = Scene::new();
        for light in profile.lighting.lights() {
            scene.insert_light(light);
        }
        
        let environment = EnvironmentBuilder::new(TextureLoader::new(Arc::clone(&source)))
            .build(&config.environment, &mut scene);
        
        let camera = PerspectiveCamera::from_config(&config.camera, backend.settings().aspect());
        let controls = OrbitController::new(
            &camera,
            Vec3::from(config.camera.target),
            backend.settings().height as f32,
        );
        
        let placements = PlacementLoader::new(source, &profile).spawn(manifest);
        
        Ok(Self {
            profile,
            scene,
            camera,
            controls,
            backend,
            environment,
            placements,
            frame_loop: FrameLoop::new(),
        })
    }
    
    /// Apply finished loads, render one frame and request the next
    pub fn tick(&mut self, time: f64, scheduler: &mut dyn FrameScheduler) -> Result<FrameStats, EngineError> {
        let placed = self.placements.apply_ready(&mut self.scene);
        if placed > 0 {
            log::debug!("Frame at {:.1}ms picked up {} placements", time, placed);
        }
        self.controls.update(&mut self.camera);
        
        let stats = self
            .frame_loop
            .tick(time, &mut self.backend, &self.scene, &self.camera, scheduler)?;
        Ok(stats)
    }
    
    /// Drive ticks until the scheduler stops delivering frames
    pub fn run(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<(), EngineError> {
        log::info!("Starting frame loop");
        scheduler.request_frame();
        while let Some(time) = scheduler.next_frame() {
            self.tick(time, scheduler)?;
        }
        log::info!("Frame loop stopped after {} frames", self.frame_loop.frames());
        Ok(())
    }
    
    /// Feed pointer input to the orbit controller
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.controls.handle(event);
    }
    
    /// Resize the drawing surface and keep the camera aspect in sync
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        self.backend.resize(width, height)?;
        self.camera.set_aspect(self.backend.settings().aspect());
        self.controls.viewport_height = height as f32;
        Ok(())
    }
    
    /// Block until every placement has settled
    pub fn wait_for_placements(&mut self) -> &LoadReport {
        self.placements.wait(&mut self.scene)
    }
    
    /// Placement results so far
    pub fn load_report(&self) -> &LoadReport {
        self.placements.report()
    }
    
    /// Stop outstanding loads
    pub fn cancel_loading(&self) {
        self.placements.cancel();
    }
    
    /// Active profile
    pub fn profile(&self) -> &CompositionProfile {
        &self.profile
    }
    
    /// The scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
    
    /// The camera
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }
    
    /// The render host
    pub fn backend(&self) -> &B {
        &self.backend
    }
    
    /// Nodes created by the environment builder
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
    
    /// Ticks rendered so far
    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{fixtures, MemorySource, PlacedAsset};
    use crate::frame_loop::VsyncScheduler;
    use crate::render::HeadlessBackend;

    fn compose(manifest: &Manifest, config: &DioramaConfig) -> Diorama<HeadlessBackend> {
        let source = MemorySource::new()
            .with_file("models/cup/scene.gltf", fixtures::triangle_model())
            .with_file("models/cat/scene.gltf", fixtures::unlit_model());
        Diorama::compose(
            config,
            CompositionProfile::classic(),
            manifest,
            Arc::new(source),
            HeadlessBackend::new(config.renderer.clone()),
        )
        .unwrap()
    }

    #[test]
    fn composes_and_renders_until_the_frame_cap() {
        let manifest = Manifest::new(vec![
            PlacedAsset::new("models/cup/scene.gltf").with_uniform_scale(70.0),
            PlacedAsset::new("models/cat/scene.gltf").with_uniform_scale(50.0),
            PlacedAsset::new("models/missing/scene.gltf"),
        ]);
        let config = DioramaConfig::default();
        let mut diorama = compose(&manifest, &config);

        // three lights plus the floor
        assert_eq!(diorama.scene().roots().len(), 4);

        let report = diorama.wait_for_placements();
        assert_eq!(report.loaded.len(), 2);
        assert_eq!(report.failed.len(), 1);

        let mut scheduler = VsyncScheduler::new(1000.0).with_max_frames(Some(3));
        diorama.run(&mut scheduler).unwrap();
        assert_eq!(diorama.frames(), 3);

        let stats = diorama.backend().last_frame().unwrap();
        assert_eq!(stats.lights, 3);
        // floor plus one sub-part per model
        assert_eq!(stats.draw_calls, 3);
        assert_eq!(stats.shadow_casters, 2);
        assert_eq!(stats.shadow_receivers, 1);
        assert_eq!(stats.shadow_passes, 1);
        // floor and sky textures are missing from the source
        assert_eq!(stats.placeholder_textures, 7);
    }

    #[test]
    fn pointer_input_moves_the_camera_on_the_next_tick() {
        let config = DioramaConfig::default();
        let mut diorama = compose(&Manifest::default(), &config);
        let mut scheduler = VsyncScheduler::new(1000.0);
        let before = diorama.camera().position;

        diorama.handle_pointer(PointerEvent::Wheel { delta: 100.0 });
        diorama.tick(0.0, &mut scheduler).unwrap();
        assert_ne!(diorama.camera().position, before);
        assert_eq!(diorama.backend().last_frame().unwrap().camera_position, diorama.camera().position);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = DioramaConfig::default();
        config.renderer.width = 0;
        let result = Diorama::compose(
            &config,
            CompositionProfile::classic(),
            &Manifest::default(),
            Arc::new(MemorySource::new()),
            HeadlessBackend::new(config.renderer.clone()),
        );
        assert!(matches!(result, Err(EngineError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut diorama = compose(&Manifest::default(), &DioramaConfig::default());
        diorama.resize(800, 800).unwrap();
        assert_eq!(diorama.camera().aspect, 1.0);
        assert!(matches!(diorama.resize(0, 10), Err(EngineError::Render(_))));
    }

    #[test]
    fn engine_errors_come_only_from_config_and_render() {
        fn origin(error: &EngineError) -> &'static str {
            match error {
                EngineError::Config(_) => "config",
                EngineError::Render(_) => "render",
            }
        }

        let manifest = Manifest::new(vec![PlacedAsset::new("models/missing/scene.gltf")]);
        let mut diorama = compose(&manifest, &DioramaConfig::default());
        assert_eq!(diorama.wait_for_placements().failed.len(), 1);
        let error = diorama.resize(0, 0).unwrap_err();
        assert_eq!(origin(&error), "render");
    }
}
