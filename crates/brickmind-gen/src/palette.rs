use crate::rng::SeededRng;
use brickmind_core::color::creator_colors;
use brickmind_core::{BrickColor, Catalog, Palette, PaletteEntry, PieceSpec};
use std::collections::HashSet;

/// Fewest distinct (shape, color) entries in a palette.
const MIN_UNIQUE_ENTRIES: usize = 6;

/// Redraws allowed when a (shape, color) pair is already in the palette.
const MAX_COMBINATION_DRAWS: usize = 16;

/// Total pieces a palette holds for `budget`:
/// `min(budget, max(20, floor(0.8 * budget)))`.
pub fn palette_part_count(budget: u32) -> u32 {
    // Four fifths of a u32 always fits back in a u32
    let four_fifths = (u64::from(budget) * 4 / 5) as u32;
    budget.min(20.max(four_fifths))
}

/// Build the request's palette.
///
/// Quantities always sum to [`palette_part_count`] exactly: every entry but
/// the last draws a random share of what is left (at least one, and never so
/// much that a later entry would be left with nothing), and the last entry
/// absorbs the remainder.
pub fn generate_palette(budget: u32, catalog: &Catalog, rng: &mut SeededRng) -> Palette {
    let count = palette_part_count(budget);
    let shapes = catalog.creator_shapes();
    let colors = creator_colors();
    if count == 0 || shapes.is_empty() {
        return Palette::default();
    }

    let unique = (count as usize / 4)
        .max(MIN_UNIQUE_ENTRIES)
        .min(shapes.len())
        .min(count as usize);

    let mut used: HashSet<(String, String)> = HashSet::new();
    let mut entries = Vec::with_capacity(unique);
    let mut remaining = count;

    for i in 0..unique {
        let (spec, color) = draw_combination(&shapes, &colors, &used, rng);
        used.insert((spec.part_id.clone(), color.name.clone()));

        let slots_left = (unique - i) as u32;
        let quantity = if slots_left == 1 {
            remaining
        } else {
            let share = (rng.next_f64() * (remaining as f64 / slots_left as f64)).floor() as u32;
            share.max(1).min(remaining - (slots_left - 1))
        };
        remaining -= quantity;

        entries.push(PaletteEntry {
            id: format!("P{:03}", i + 1),
            spec: spec.clone(),
            color,
            quantity,
        });
    }

    log::debug!(
        "Palette: {} entries, {} pieces for budget {budget}",
        entries.len(),
        count
    );
    Palette { entries }
}

/// Draw a shape then a color, redrawing while the pair is already used.
fn draw_combination<'a>(
    shapes: &[&'a PieceSpec],
    colors: &[BrickColor],
    used: &HashSet<(String, String)>,
    rng: &mut SeededRng,
) -> (&'a PieceSpec, BrickColor) {
    let mut pick = (shapes[0], colors[0].clone());
    for _ in 0..MAX_COMBINATION_DRAWS {
        let spec = shapes[rng.index(shapes.len())];
        let color = &colors[rng.index(colors.len())];
        pick = (spec, color.clone());
        if !used.contains(&(spec.part_id.clone(), color.name.clone())) {
            break;
        }
    }
    pick
}
