//! 8-bit RGB colors and the static color table.
//!
//! The table maps the tile catalogue's color identifiers (plain names such
//! as `red` and coded tokens such as `dkblue` or `tercot`) to RGB triples.
//! Lookup is case-insensitive. Unknown identifiers resolve to a neutral gray
//! so that placement never aborts on a token the upstream parser let through.

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Color returned for identifiers missing from the table.
    pub const FALLBACK_GRAY: Rgb = Rgb::new(127, 127, 127);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the color as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Returns the RGBA bytes of this color at full opacity.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// True if every channel differs from `other` by at most `tolerance`.
    pub fn within(self, other: Rgb, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
    }
}

/// Canonical identifiers and their colors.
const ENTRIES: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("red", Rgb::new(255, 0, 0)),
    ("green", Rgb::new(0, 160, 60)),
    ("blue", Rgb::new(0, 0, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("gray", Rgb::new(128, 128, 128)),
    ("grey", Rgb::new(128, 128, 128)),
    ("brown", Rgb::new(139, 69, 19)),
    ("orange", Rgb::new(255, 165, 0)),
    ("pink", Rgb::new(255, 192, 203)),
    ("beige", Rgb::new(245, 245, 220)),
    ("dkblue", Rgb::new(0, 0, 139)),
    ("dkgray", Rgb::new(64, 64, 64)),
    ("dkgreen", Rgb::new(0, 100, 0)),
    ("emerald", Rgb::new(0, 128, 0)),
    ("grnapl", Rgb::new(0, 128, 0)),
    ("grsgrn", Rgb::new(34, 139, 34)),
    ("khaki", Rgb::new(240, 230, 140)),
    ("lilac", Rgb::new(200, 162, 200)),
    ("limegrn", Rgb::new(50, 205, 50)),
    ("ltgray", Rgb::new(192, 192, 192)),
    ("ltgreen", Rgb::new(144, 238, 144)),
    ("pearl", Rgb::new(240, 248, 255)),
    ("salmon", Rgb::new(250, 128, 114)),
    ("sand", Rgb::new(244, 164, 96)),
    ("skyblue", Rgb::new(135, 206, 235)),
    ("tercot", Rgb::new(205, 92, 92)),
    ("turqse", Rgb::new(64, 224, 208)),
    ("violet", Rgb::new(238, 130, 238)),
    ("whtgrn", Rgb::new(240, 255, 240)),
];

/// Catalogue display names mapped to canonical identifiers.
const ALIASES: &[(&str, &str)] = &[
    ("Бежевый", "beige"),
    ("Бело-зеленый", "whtgrn"),
    ("Белый", "white"),
    ("Бирюзовый", "turqse"),
    ("Голубой", "skyblue"),
    ("Желтый", "yellow"),
    ("Жемчужный", "pearl"),
    ("Зеленая трава", "grsgrn"),
    ("Зеленое яблоко", "grnapl"),
    ("Изумрудный", "emerald"),
    ("Коричневый", "brown"),
    ("Красный", "red"),
    ("Лосось", "salmon"),
    ("Оранжевый", "orange"),
    ("Песочный", "sand"),
    ("Розовый", "pink"),
    ("Салатовый", "limegrn"),
    ("Светло-зеленый", "ltgreen"),
    ("Светло-серый", "ltgray"),
    ("Серый", "gray"),
    ("Синий", "blue"),
    ("Сиреневый", "lilac"),
    ("Темно-зеленый", "dkgreen"),
    ("Темно-серый", "dkgray"),
    ("Темно-синий", "dkblue"),
    ("Терракот", "tercot"),
    ("Фиолетовый", "violet"),
    ("Хаки", "khaki"),
    ("Чёрный", "black"),
];

/// Read-only view over the static color table.
///
/// Zero-sized; every instance sees the same data, so it can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorTable;

impl ColorTable {
    /// Resolves an identifier to its color, or [`Rgb::FALLBACK_GRAY`] if unknown.
    pub fn resolve(identifier: &str) -> Rgb {
        Self::lookup(identifier).unwrap_or(Rgb::FALLBACK_GRAY)
    }

    /// Resolves an identifier or alias, returning `None` if it is unknown.
    pub fn lookup(identifier: &str) -> Option<Rgb> {
        let canonical = Self::canonical(identifier)?;
        ENTRIES
            .iter()
            .find(|(name, _)| *name == canonical)
            .map(|&(_, rgb)| rgb)
    }

    /// Returns the canonical identifier for a name, coded token, or alias.
    pub fn canonical(identifier: &str) -> Option<&'static str> {
        let trimmed = identifier.trim();
        if let Some(&(name, _)) = ENTRIES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        {
            return Some(name);
        }
        let lowered = trimmed.to_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| alias.to_lowercase() == lowered)
            .map(|&(_, name)| name)
    }

    /// Returns all canonical identifiers in table order.
    pub fn names() -> Vec<&'static str> {
        ENTRIES.iter().map(|&(name, _)| name).collect()
    }

    /// Returns all `(alias, canonical)` pairs.
    pub fn aliases() -> &'static [(&'static str, &'static str)] {
        ALIASES
    }
}
