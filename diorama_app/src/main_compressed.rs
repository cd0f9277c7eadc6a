//! Coffee-shop diorama with Draco geometry and KTX2 textures enabled

mod common;

use diorama_engine::prelude::CompositionProfile;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::run(CompositionProfile::compressed())
}
