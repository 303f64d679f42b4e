use brickmind_core::{Catalog, Palette, PaletteEntry, Piece};
use std::collections::HashMap;

/// Deduplicated parts list: one entry per (part, color), most used first,
/// ties by part id then color name.
pub fn build_inventory(pieces: &[Piece], catalog: &Catalog) -> Palette {
    let mut counts: HashMap<(&str, &str), (&Piece, u32)> = HashMap::new();
    for piece in pieces {
        counts
            .entry((piece.part_id.as_str(), piece.color.name.as_str()))
            .or_insert((piece, 0))
            .1 += 1;
    }

    let mut grouped: Vec<(&Piece, u32)> = counts.into_values().collect();
    grouped.sort_by(|(a, qa), (b, qb)| {
        qb.cmp(qa)
            .then_with(|| a.part_id.cmp(&b.part_id))
            .then_with(|| a.color.name.cmp(&b.color.name))
    });

    let entries = grouped
        .into_iter()
        .enumerate()
        .map(|(i, (piece, quantity))| PaletteEntry {
            id: format!("P{:03}", i + 1),
            spec: catalog.normalize(&piece.part_id).clone(),
            color: piece.color.clone(),
            quantity,
        })
        .collect();
    Palette { entries }
}
