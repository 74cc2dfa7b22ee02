use std::{collections::HashMap, sync::OnceLock};

use tracing::debug;

use super::Rgb;

/// A source of color names, such as a system color database
///
/// Channels are reported in `[0, 1]`. A source is queried once, when the
/// [`NameLookupCache`] owning it is first used.
pub trait ColorNameSource: Send + Sync {
    /// Returns every `(name, [r, g, b])` pair known to the source
    fn colors(&self) -> Vec<(String, [f64; 3])>;
}

impl ColorNameSource for HashMap<String, [f64; 3]> {
    fn colors(&self) -> Vec<(String, [f64; 3])> {
        self.iter().map(|(name, rgb)| (name.clone(), *rgb)).collect()
    }
}

impl ColorNameSource for Vec<(String, [f64; 3])> {
    fn colors(&self) -> Vec<(String, [f64; 3])> {
        self.clone()
    }
}

/// The CSS/X11 color names plus the single-letter base colors `b g r c m y k w`
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinColorNames;

// single-letter shorthands, given as unit channels
const BASE_COLORS: [(&str, [f64; 3]); 8] = [
    ("b", [0.0, 0.0, 1.0]),
    ("g", [0.0, 0.5, 0.0]),
    ("r", [1.0, 0.0, 0.0]),
    ("c", [0.0, 0.75, 0.75]),
    ("m", [0.75, 0.0, 0.75]),
    ("y", [0.75, 0.75, 0.0]),
    ("k", [0.0, 0.0, 0.0]),
    ("w", [1.0, 1.0, 1.0]),
];

impl ColorNameSource for BuiltinColorNames {
    fn colors(&self) -> Vec<(String, [f64; 3])> {
        let unit = |hex: u32, shift: u32| f64::from((hex >> shift) & 0xff) / 255.0;
        BASE_COLORS
            .iter()
            .map(|&(name, rgb)| (name.to_owned(), rgb))
            .chain(CSS_COLORS.iter().map(|&(name, hex)| {
                (name.to_owned(), [unit(hex, 16), unit(hex, 8), unit(hex, 0)])
            }))
            .collect()
    }
}

/// Lazily built map from color name to truecolor value
///
/// The map is built on the first lookup: the entries of the [`ColorNameSource`], then
/// `gray0..=gray100` and `grey0..=grey100` for the names the source does not define.
/// Initialization happens at most once; concurrent callers wait for it to finish and
/// the map is read-only afterwards.
pub struct NameLookupCache {
    source: Box<dyn ColorNameSource>,
    names: OnceLock<HashMap<String, Rgb>>,
}

impl NameLookupCache {
    /// Creates a cache over the given source. The source is not queried yet.
    #[must_use]
    pub fn new(source: impl ColorNameSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            names: OnceLock::new(),
        }
    }

    /// Looks up a color name. Callers lower-case names; `light blue` falls back to `lightblue`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rgb> {
        let names = self.names();
        names.get(name).copied().or_else(|| {
            name.contains(char::is_whitespace)
                .then(|| name.split_whitespace().collect::<String>())
                .and_then(|joined| names.get(&joined).copied())
        })
    }

    /// Returns `true` once the map has been built
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.names.get().is_some()
    }

    /// Number of known names, building the map if needed
    #[must_use]
    pub fn len(&self) -> usize {
        self.names().len()
    }

    /// Returns `true` if no names are known, building the map if needed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }

    fn names(&self) -> &HashMap<String, Rgb> {
        self.names.get_or_init(|| self.build())
    }

    fn build(&self) -> HashMap<String, Rgb> {
        let mut names: HashMap<String, Rgb> = self
            .source
            .colors()
            .into_iter()
            .map(|(name, rgb)| (name.to_lowercase(), Rgb::from_unit(rgb)))
            .collect();
        let from_source = names.len();
        for i in 0..=100u32 {
            // round(255 * i / 100), halves up
            #[allow(clippy::cast_possible_truncation)]
            let level = ((255 * i + 50) / 100) as u8;
            let gray = Rgb::new(level, level, level);
            for prefix in ["gray", "grey"] {
                names.entry(format!("{prefix}{i}")).or_insert(gray);
            }
        }
        debug!(
            "built color name table: {from_source} names from source, {} total",
            names.len()
        );
        names
    }
}

impl Default for NameLookupCache {
    fn default() -> Self {
        Self::new(BuiltinColorNames)
    }
}

impl std::fmt::Debug for NameLookupCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameLookupCache")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

#[rustfmt::skip]
const CSS_COLORS: [(&str, u32); 148] = [
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    struct CountingSource(Arc<AtomicUsize>);

    impl ColorNameSource for CountingSource {
        fn colors(&self) -> Vec<(String, [f64; 3])> {
            self.0.fetch_add(1, Ordering::SeqCst);
            vec![("Gray50".to_owned(), [1.0, 0.0, 0.0])]
        }
    }

    #[test]
    fn source_is_queried_once_and_lazily() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = NameLookupCache::new(CountingSource(Arc::clone(&calls)));
        assert!(!cache.is_initialized());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(cache.get("gray50"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(cache.get("missing"), None);
        assert!(cache.is_initialized());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn gray_ramp_fills_missing_names() {
        let cache = NameLookupCache::new(Vec::<(String, [f64; 3])>::new());
        assert_eq!(cache.len(), 202);
        assert_eq!(cache.get("gray0"), Some(Rgb::new(0, 0, 0)));
        assert_eq!(cache.get("grey50"), Some(Rgb::new(128, 128, 128)));
        assert_eq!(cache.get("gray1"), Some(Rgb::new(3, 3, 3)));
        assert_eq!(cache.get("gray100"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(cache.get("gray101"), None);
    }

    #[test]
    fn concurrent_first_use_builds_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = Arc::new(NameLookupCache::new(CountingSource(Arc::clone(&calls))));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get("grey7"))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(Rgb::new(18, 18, 18)));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn builtin_names() {
        let cache = NameLookupCache::default();
        assert_eq!(cache.get("rebeccapurple"), Some(Rgb::new(0x66, 0x33, 0x99)));
        assert_eq!(cache.get("g"), Some(Rgb::new(0, 128, 0)));
        assert_eq!(cache.get("gray"), Some(Rgb::new(128, 128, 128)));
        assert_eq!(cache.get("light  blue"), cache.get("lightblue"));
        assert_eq!(cache.get("no such color"), None);
    }
}
