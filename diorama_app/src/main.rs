//! Coffee-shop diorama with plain glTF assets

mod common;

use diorama_engine::prelude::CompositionProfile;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::run(CompositionProfile::classic())
}
