//! # Scene Composition
//!
//! Populates a [`Scene`](crate::scene::Scene) from declarative inputs: a
//! [`Manifest`](crate::assets::Manifest) of placed models, an
//! [`EnvironmentSpec`] for floor and sky, and a [`CompositionProfile`]
//! choosing lights, loader capabilities and the material policy.
//!
//! Model loads run concurrently on worker threads. Only the thread that
//! owns the scene ever mutates it, by draining completions from
//! [`PendingPlacements`].

pub mod normalize;
pub mod profile;
pub mod placement;
pub mod environment;


pub use normalize::MaterialPolicy;
pub use profile::{CompositionProfile, LightingProfile};
pub use placement::{
    PlacementLoader, PendingPlacements, LoadReport, LoadedPlacement, FailedPlacement, CancelToken,
};
pub use environment::{EnvironmentBuilder, EnvironmentSpec, FloorSpec, SkyboxSpec, Environment};
pub use crate::assets::LoaderProfile;
