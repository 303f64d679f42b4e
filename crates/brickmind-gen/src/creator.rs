//! Layered Creator/Critic placement loop.
//!
//! A variant starts from a baseplate at the origin and grows one layer at a
//! time. Each slot proposes up to `max_retries` random candidates and keeps
//! the first one the validator does not reject. Failed slots are counted
//! across the whole variant; once the count passes
//! `abandon_factor * max_retries`, every further failure ends its layer.

use crate::palette::generate_palette;
use crate::rng::SeededRng;
use crate::CreatorError;
use brickmind_core::config::{CreatorConfig, PhysicsConfig, VariantConfig};
use brickmind_core::constants::{SNAP_XZ, SNAP_Y};
use brickmind_core::geometry::instantiate_spec;
use brickmind_core::math::snap_int;
use brickmind_core::types::ALL_ROTATIONS;
use brickmind_core::{
    AssembledStructure, BrickColor, Catalog, HeightClass, Palette, Piece, PieceSpec, Rotation,
    ShapeKind,
};
use brickmind_physics::{validate_placement, PhysicsStatus};
use glam::IVec3;

/// Fewest pieces a layer asks for, before clamping to what is left.
const MIN_LAYER_QUOTA: usize = 3;

/// Id of the piece every variant is built on.
pub const BASEPLATE_ID: &str = "baseplate";

/// Square plate spec for a `studs` x `studs` baseplate.
pub fn baseplate_spec(studs: i32) -> PieceSpec {
    let (part_id, name) = match studs {
        4 => ("3031".to_string(), "Plate 4x4".to_string()),
        6 => ("3958".to_string(), "Plate 6x6".to_string()),
        n => (format!("plate-{n}x{n}"), format!("Plate {n}x{n}")),
    };
    PieceSpec {
        part_id,
        name,
        shape: ShapeKind::Plate,
        width_studs: studs,
        depth_studs: studs,
        height: HeightClass::Thin,
    }
}

/// Green if the palette has it, else the first entry's color.
fn baseplate_color(palette: &Palette) -> BrickColor {
    palette
        .entries
        .iter()
        .find(|e| e.color.is_green())
        .or_else(|| palette.entries.first())
        .map(|e| e.color.clone())
        .unwrap_or_else(|| BrickColor::new("Green", "#00852B"))
}

/// Pieces a variant aims for, baseplate included.
pub fn variant_target(budget: u32, variant: &VariantConfig) -> usize {
    (budget as f64 * variant.target_fraction).floor().max(0.0) as usize
}

/// Layer count for a target, baseplate layer included.
pub fn layer_count(target: usize, variant: &VariantConfig) -> usize {
    let divisor = variant.layer_divisor.max(1) as usize;
    (target / divisor).max(variant.min_layers as usize)
}

/// Everything one variant's placement loop reads.
pub struct VariantContext<'a> {
    pub variant: &'a VariantConfig,
    pub palette: &'a Palette,
    pub creator: &'a CreatorConfig,
    pub physics: &'a PhysicsConfig,
}

impl VariantContext<'_> {
    /// Draw one candidate for the next free id at height `y`.
    ///
    /// Random draws, in order: palette entry, x cell, z cell, rotation.
    fn propose(&self, id: String, y: i32, rng: &mut SeededRng) -> Result<Piece, CreatorError> {
        let entry = &self.palette.entries[rng.index(self.palette.len())];
        let template = instantiate_spec(&entry.spec, 1, &entry.color)?;
        let x = rng.cell(self.variant.grid_range) * SNAP_XZ;
        let z = rng.cell(self.variant.grid_range) * SNAP_XZ;
        let rotation = ALL_ROTATIONS[rng.index(ALL_ROTATIONS.len())];
        Ok(template.place(id, IVec3::new(x, snap_int(y, SNAP_Y), z), rotation))
    }

    /// Retry until a candidate is accepted or the retry budget runs out.
    fn place_slot(
        &self,
        placed: &[Piece],
        y: i32,
        rng: &mut SeededRng,
    ) -> Result<Option<Piece>, CreatorError> {
        let id = format!("B{}", placed.len());
        for attempt in 0..self.creator.max_retries {
            let candidate = self.propose(id.clone(), y, rng)?;
            match validate_placement(placed, &candidate, self.physics) {
                PhysicsStatus::Legal | PhysicsStatus::Unstable => return Ok(Some(candidate)),
                status => log::debug!(
                    "{} attempt {attempt}: {} at {:?} rejected ({status:?})",
                    id,
                    candidate.part_id,
                    candidate.position
                ),
            }
        }
        Ok(None)
    }

    /// Run the layered loop for one variant.
    pub fn assemble(&self, budget: u32, rng: &mut SeededRng) -> Result<AssembledStructure, CreatorError> {
        let target = variant_target(budget, self.variant);
        let layers = layer_count(target, self.variant);

        let baseplate = instantiate_spec(
            &baseplate_spec(self.variant.baseplate_studs),
            1,
            &baseplate_color(self.palette),
        )?
        .place(BASEPLATE_ID, IVec3::ZERO, Rotation::Deg0);
        let mut current_y = baseplate.top_y();
        let mut pieces = vec![baseplate];

        let abandon_after = self.creator.abandon_factor * self.creator.max_retries;
        let mut failures = 0u32;

        if !self.palette.is_empty() {
            for layer in 1..layers {
                if pieces.len() >= target {
                    break;
                }
                let jitter = 1.0 + (rng.next_f64() * 2.0 - 1.0) * self.creator.layer_jitter;
                let quota = ((target as f64 / layers as f64) * jitter).floor().max(0.0) as usize;
                let quota = quota.max(MIN_LAYER_QUOTA).min(target - pieces.len());

                for _ in 0..quota {
                    if pieces.len() >= target {
                        break;
                    }
                    match self.place_slot(&pieces, current_y, rng)? {
                        Some(piece) => pieces.push(piece),
                        None => {
                            failures += 1;
                            if failures > abandon_after {
                                log::debug!("{}: abandoning layer {layer} at y={current_y}", self.variant.name);
                                break;
                            }
                        }
                    }
                }
                current_y += self.variant.layer_step;
            }
        }

        if failures > 0 {
            log::warn!(
                "{}: {failures} slot(s) exhausted their retries; placed {} of {target}",
                self.variant.name,
                pieces.len()
            );
        }
        log::info!(
            "{}: {} pieces over {} layers (target {target})",
            self.variant.name,
            pieces.len(),
            layers
        );

        Ok(AssembledStructure::new(
            self.variant.name.clone(),
            self.variant.subtitle.clone(),
            pieces,
        ))
    }
}

/// Palette plus both variants, drawn from one random stream in the fixed
/// order palette, compact, full.
pub fn assemble_variants(
    budget: u32,
    catalog: &Catalog,
    creator: &CreatorConfig,
    physics: &PhysicsConfig,
    rng: &mut SeededRng,
) -> Result<(Palette, [AssembledStructure; 2]), CreatorError> {
    let palette = generate_palette(budget, catalog, rng);
    let compact = VariantContext {
        variant: &creator.compact,
        palette: &palette,
        creator,
        physics,
    }
    .assemble(budget, rng)?;
    let full = VariantContext {
        variant: &creator.full,
        palette: &palette,
        creator,
        physics,
    }
    .assemble(budget, rng)?;
    Ok((palette, [compact, full]))
}
