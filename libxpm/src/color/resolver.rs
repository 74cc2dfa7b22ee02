use strum::{Display, EnumString};
use tracing::warn;

use super::{quantize_to_palette, ColorNameSource, ColorSpec, NameLookupCache, Rgb};

/// Resolves [`ColorSpec`]s to truecolor values and 256-color palette indices
///
/// Owns the [`NameLookupCache`] used for named colors; build one resolver and share it.
#[derive(Debug, Default)]
pub struct ColorResolver {
    names: NameLookupCache,
}

/// The representation requested from [`ColorResolver::convert_color_name`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ColorFormat {
    /// 24-bit truecolor
    #[strum(serialize = "full")]
    Full,
    /// 256-color palette index
    #[strum(serialize = "256")]
    Palette,
}

/// A color converted by [`ColorResolver::convert_color_name`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertedColor {
    /// 24-bit truecolor
    Full(Rgb),
    /// 256-color palette index
    Palette(u8),
}

impl std::fmt::Display for ConvertedColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full(rgb) => write!(f, "{rgb}"),
            Self::Palette(index) => write!(f, "{index}"),
        }
    }
}

impl ColorResolver {
    /// Creates a resolver looking names up in `source`
    #[must_use]
    pub fn new(source: impl ColorNameSource + 'static) -> Self {
        Self {
            names: NameLookupCache::new(source),
        }
    }

    /// The name cache of this resolver
    #[must_use]
    pub const fn names(&self) -> &NameLookupCache {
        &self.names
    }

    /// Resolves a color to truecolor. `None` is the transparent marker.
    ///
    /// Unknown names are not an error: a warning is logged and opaque black is returned.
    #[must_use]
    pub fn resolve_truecolor(&self, spec: &ColorSpec) -> Option<Rgb> {
        match spec {
            ColorSpec::None => None,
            ColorSpec::Hex(rgb) => Some(*rgb),
            ColorSpec::Named(name) => Some(self.names.get(name).unwrap_or_else(|| {
                warn!("no color named {name:?} found, using {}", Rgb::BLACK);
                Rgb::BLACK
            })),
        }
    }

    /// Resolves a color to a 256-color palette index. `None` is the transparent marker.
    #[must_use]
    pub fn resolve_palette_index(&self, spec: &ColorSpec) -> Option<u8> {
        self.resolve_truecolor(spec).map(quantize_to_palette)
    }

    /// Converts a color name to the requested representation
    ///
    /// Returns `None` (and logs a warning) when the name is unknown; there is no black
    /// fallback on this path. Hex values are accepted as well.
    #[must_use]
    pub fn convert_color_name(&self, name: &str, format: ColorFormat) -> Option<ConvertedColor> {
        let rgb = match name.parse::<ColorSpec>() {
            Ok(ColorSpec::Hex(rgb)) => rgb,
            Ok(ColorSpec::Named(name)) => {
                let Some(rgb) = self.names.get(&name) else {
                    warn!("no color named {name:?} found");
                    return None;
                };
                rgb
            }
            Ok(ColorSpec::None) | Err(_) => {
                warn!("{name:?} cannot be converted to a color");
                return None;
            }
        };
        Some(match format {
            ColorFormat::Full => ConvertedColor::Full(rgb),
            ColorFormat::Palette => ConvertedColor::Palette(quantize_to_palette(rgb)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ColorResolver {
        ColorResolver::new(vec![("teal".to_owned(), [0.0, 0.5, 0.5])])
    }

    #[test]
    fn dispatches_on_spec() {
        let r = resolver();
        assert_eq!(r.resolve_truecolor(&ColorSpec::None), None);
        assert_eq!(
            r.resolve_truecolor(&ColorSpec::Hex(Rgb::new(1, 2, 3))),
            Some(Rgb::new(1, 2, 3))
        );
        assert_eq!(
            r.resolve_truecolor(&ColorSpec::Named("teal".into())),
            Some(Rgb::new(0, 128, 128))
        );
        assert_eq!(
            r.resolve_truecolor(&ColorSpec::Named("gray100".into())),
            Some(Rgb::new(255, 255, 255))
        );
    }

    #[test]
    fn unknown_names_fall_back_to_black() {
        let r = resolver();
        assert_eq!(
            r.resolve_truecolor(&ColorSpec::Named("no such color".into())),
            Some(Rgb::BLACK)
        );
    }

    #[test]
    fn palette_indices() {
        let r = resolver();
        assert_eq!(r.resolve_palette_index(&ColorSpec::None), None);
        assert_eq!(
            r.resolve_palette_index(&ColorSpec::Hex(Rgb::new(255, 0, 0))),
            Some(196)
        );
    }

    #[test]
    fn converts_names() {
        let r = resolver();
        assert_eq!(
            r.convert_color_name("Teal", ColorFormat::Full),
            Some(ConvertedColor::Full(Rgb::new(0, 128, 128)))
        );
        // 128 -> cube index 2 on both green and blue
        assert_eq!(
            r.convert_color_name("teal", ColorFormat::Palette),
            Some(ConvertedColor::Palette(16 + 12 + 2))
        );
        assert_eq!(r.convert_color_name("unknown", ColorFormat::Full), None);
        assert_eq!(r.convert_color_name("none", ColorFormat::Full), None);
        assert_eq!("256".parse::<ColorFormat>(), Ok(ColorFormat::Palette));
        assert_eq!("FULL".parse::<ColorFormat>(), Ok(ColorFormat::Full));
    }
}
