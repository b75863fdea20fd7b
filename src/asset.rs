//! Texture assets and the catalog of which ones were actually loaded.
//!
//! The game logic never touches pixel data. It only needs to know whether a texture
//! exists (scene setup aborts without it) and, for sprite sheets, the frame size.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bevy_ecs::resource::Resource;
use glam::UVec2;
use strum_macros::{Display, EnumIter};

use crate::error::AssetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum Asset {
    Brick,
    EnergyDot,
    Hippo,
    DeadHippo,
    Copter,
    Gator,
    Lion,
    Drifter,
}

impl Asset {
    /// File name of the image, relative to the asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Asset::Brick => "bricks.png",
            Asset::EnergyDot => "alephdot.png",
            Asset::Hippo => "hippo.png",
            Asset::DeadHippo => "deadHippo.png",
            Asset::Copter => "copter.png",
            Asset::Gator => "gator.png",
            Asset::Lion => "lion.png",
            Asset::Drifter => "drifter.png",
        }
    }

    pub fn path(self, asset_dir: &Path) -> PathBuf {
        asset_dir.join(self.file_name())
    }

    /// Size of one frame for sprite sheets, `None` for plain images.
    pub fn frame_size(self) -> Option<UVec2> {
        match self {
            Asset::Brick | Asset::EnergyDot => None,
            Asset::Hippo => Some(UVec2::new(59, 53)),
            Asset::DeadHippo => Some(UVec2::new(64, 64)),
            Asset::Copter => Some(UVec2::new(101, 72)),
            Asset::Gator => Some(UVec2::new(80, 72)),
            Asset::Lion => Some(UVec2::new(62, 72)),
            Asset::Drifter => Some(UVec2::new(72, 72)),
        }
    }
}

/// Records every texture the frontend managed to load, with its full pixel size.
#[derive(Resource, Debug, Default, Clone)]
pub struct TextureCatalog {
    textures: HashMap<Asset, UVec2>,
}

impl TextureCatalog {
    pub fn insert(&mut self, asset: Asset, size: UVec2) {
        self.textures.insert(asset, size);
    }

    pub fn contains(&self, asset: Asset) -> bool {
        self.textures.contains_key(&asset)
    }

    pub fn size(&self, asset: Asset) -> Option<UVec2> {
        self.textures.get(&asset).copied()
    }

    /// Fails with [`AssetError::MissingTexture`] unless `asset` was loaded.
    pub fn require(&self, asset: Asset) -> Result<UVec2, AssetError> {
        self.size(asset).ok_or(AssetError::MissingTexture(asset))
    }

    /// Number of frames in a sprite sheet, laid out left to right, top to bottom.
    pub fn frame_count(&self, asset: Asset) -> Option<u32> {
        let size = self.size(asset)?;
        let frame = asset.frame_size()?;
        Some((size.x / frame.x).max(1) * (size.y / frame.y).max(1))
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
