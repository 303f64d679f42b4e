use serde::{Deserialize, Serialize};

/// A named display color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrickColor {
    /// Human-readable name, e.g. "Dark Gray".
    pub name: String,
    /// Display color as `#RRGGBB`.
    pub hex: String,
}

impl BrickColor {
    pub fn new(name: &str, hex: &str) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }

    /// Case-insensitive check used to pick the baseplate color.
    pub fn is_green(&self) -> bool {
        self.name.to_lowercase().contains("green")
    }
}

/// Colors the Creator draws from, in draw order.
pub const CREATOR_COLORS: [(&str, &str); 8] = [
    ("Red", "#E3000B"),
    ("Blue", "#0057A8"),
    ("Yellow", "#FFD700"),
    ("Green", "#00852B"),
    ("White", "#F4F4F4"),
    ("Black", "#1B1B1B"),
    ("Orange", "#FF7E14"),
    ("Dark Gray", "#6B6B6B"),
];

/// Color code assumed when an external piece carries none.
pub const DEFAULT_COLOR_CODE: i64 = 4;

/// LDraw color codes (from LDConfig.ldr) understood by the sanitizer.
const LDRAW_COLORS: [(i64, &str, &str); 55] = [
    (0, "Black", "#1B2A34"),
    (1, "Blue", "#1E5AA8"),
    (2, "Green", "#00852B"),
    (3, "Dark Turquoise", "#069D9F"),
    (4, "Red", "#B40000"),
    (5, "Dark Pink", "#D3359D"),
    (6, "Brown", "#543324"),
    (7, "Light Grey", "#8A928D"),
    (8, "Dark Grey", "#545955"),
    (9, "Light Blue", "#97CBD9"),
    (10, "Bright Green", "#58AB41"),
    (11, "Light Turquoise", "#00AAA4"),
    (12, "Salmon", "#F06D61"),
    (13, "Pink", "#F6A9BB"),
    (14, "Yellow", "#FAC80A"),
    (15, "White", "#F4F4F4"),
    (17, "Light Green", "#ADD9A8"),
    (18, "Light Yellow", "#FFD67F"),
    (19, "Tan", "#D7BA8C"),
    (20, "Light Violet", "#AFBED6"),
    (22, "Purple", "#671F81"),
    (23, "Dark Blue Violet", "#0E3E9A"),
    (25, "Orange", "#D67923"),
    (26, "Magenta", "#901F76"),
    (27, "Lime", "#A5CA18"),
    (28, "Dark Tan", "#897D62"),
    (29, "Bright Pink", "#FF9ECD"),
    (33, "Trans Dark Blue", "#0020A0"),
    (34, "Trans Green", "#237841"),
    (36, "Trans Red", "#C91A09"),
    (40, "Trans Black", "#635F52"),
    (41, "Trans Medium Blue", "#559AB7"),
    (42, "Trans Neon Green", "#C0FF00"),
    (43, "Trans Light Blue", "#AEE9EF"),
    (46, "Trans Yellow", "#F5CD2F"),
    (47, "Trans Clear", "#FCFCFC"),
    (70, "Reddish Brown", "#582A12"),
    (71, "Light Bluish Grey", "#A0A5A9"),
    (72, "Dark Bluish Grey", "#6C6E68"),
    (73, "Medium Blue", "#5A93DB"),
    (74, "Medium Green", "#73DCA1"),
    (77, "Light Pink", "#FECCCF"),
    (78, "Light Nougat", "#F6D7B3"),
    (84, "Medium Nougat", "#E1A13D"),
    (85, "Medium Lilac", "#2C1577"),
    (272, "Dark Blue", "#19325A"),
    (288, "Dark Green", "#184632"),
    (308, "Dark Brown", "#352100"),
    (320, "Dark Red", "#720012"),
    (326, "Bright Light Yellow", "#FFF03A"),
    (330, "Olive Green", "#77774E"),
    (378, "Sand Green", "#708E7C"),
    (379, "Sand Blue", "#70819A"),
    (462, "Medium Orange", "#F58624"),
    (484, "Dark Orange", "#91501C"),
];

/// Look up an LDraw color code. Unknown codes yield a neutral grey named
/// after the code instead of failing.
pub fn color_by_code(code: i64) -> BrickColor {
    LDRAW_COLORS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, hex)| BrickColor::new(name, hex))
        .unwrap_or_else(|| BrickColor {
            name: format!("Color_{code}"),
            hex: "#808080".into(),
        })
}

/// The Creator's color list as owned values.
pub fn creator_colors() -> Vec<BrickColor> {
    CREATOR_COLORS
        .iter()
        .map(|(name, hex)| BrickColor::new(name, hex))
        .collect()
}
