//! Vim `highlight`/`syntax` commands that paint every symbol of a pixmap in its own color,
//! for viewing `.xpm` files in the editor.

use itertools::Itertools;
use strum::{Display, IntoStaticStr};
use tracing::debug;

use crate::{
    color::{ColorResolver, ColorSpec},
    image::Pixmap,
};

/// Characters escaped with a backslash inside a `syntax match` pattern
const PATTERN_SPECIALS: [char; 9] = ['\'', '"', '$', '.', '~', '^', '/', '[', ']'];

/// Which set of highlight attributes to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Term {
    /// `guifg`/`guibg`, colors written as in the pixmap
    Gui,
    /// `ctermfg`/`ctermbg`, colors quantized to the 256-color palette
    Cterm,
}

impl From<bool> for Term {
    fn from(gui: bool) -> Self {
        if gui {
            Self::Gui
        } else {
            Self::Cterm
        }
    }
}

/// Commands for one color table entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VimHighlight {
    /// `highlight Xpmcolor{i} ...`
    pub highlight: String,
    /// `syntax match Xpmcolor{i} /{symbol}/ contained`
    pub syntax: String,
}

/// All highlight commands of a pixmap, in color table order, plus the cluster grouping them
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VimHighlights {
    entries: Vec<VimHighlight>,
    cluster: String,
}

fn group(i: usize) -> String {
    format!("Xpmcolor{i}")
}

fn escape_pattern(symbol: &str) -> String {
    let mut escaped = String::with_capacity(symbol.len());
    for c in symbol.chars() {
        if PATTERN_SPECIALS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn transparent_highlight(group: &str, term: Term) -> String {
    format!(
        "try | highlight link {group} Normal | highlight {group} {term}fg=bg | catch | highlight {group} {term}fg=NONE {term}bg=NONE | endtry"
    )
}

impl VimHighlights {
    /// Builds the commands for every entry of `pixmap`'s color table
    ///
    /// With `gui` the colors are the upper-cased values of the color table (multi-word names
    /// are single-quoted), otherwise the palette index of the resolved color.
    #[must_use]
    pub fn new(pixmap: &Pixmap, resolver: &ColorResolver, gui: bool) -> Self {
        let term = Term::from(gui);
        let entries: Vec<_> = pixmap
            .color_table()
            .values()
            .enumerate()
            .map(|(i, entry)| {
                let group = group(i);
                let highlight = match (&entry.color, term) {
                    (ColorSpec::None, _) => transparent_highlight(&group, term),
                    (_, Term::Gui) => {
                        let mut col = entry.source.to_uppercase();
                        if col.contains(char::is_whitespace) {
                            col = format!("'{col}'");
                        }
                        format!("highlight {group} {term}fg={col} {term}bg={col}")
                    }
                    (spec, Term::Cterm) => {
                        // only `None` has no palette index
                        let col = resolver.resolve_palette_index(spec).unwrap_or_default();
                        format!("highlight {group} {term}fg={col} {term}bg={col}")
                    }
                };
                let syntax = format!(
                    "syntax match {group} /{}/ contained",
                    escape_pattern(&entry.symbol)
                );
                VimHighlight { highlight, syntax }
            })
            .collect();
        let cluster = format!(
            "syntax cluster Xpmcolors contains={}",
            (0..entries.len()).map(group).join(",")
        );
        debug!("{} vim highlight groups ({term})", entries.len());
        Self { entries, cluster }
    }

    /// Per-entry commands, in color table order
    #[must_use]
    pub fn entries(&self) -> &[VimHighlight] {
        &self.entries
    }

    /// `syntax cluster Xpmcolors contains=Xpmcolor0,...`
    #[must_use]
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// Every command, one per line: highlights and syntax matches interleaved, cluster last
    #[must_use]
    pub fn to_script(&self) -> String {
        self.entries
            .iter()
            .flat_map(|e| [e.highlight.as_str(), e.syntax.as_str()])
            .chain(std::iter::once(self.cluster.as_str()))
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXMAP: &str = r#"static char *x[] = {
"3 1 3 1",
". c None",
"a c #FF0000",
"~ c light blue",
".a~"
};"#;

    #[test]
    fn gui_highlights() {
        let pixmap: Pixmap = PIXMAP.parse().unwrap();
        let vim = VimHighlights::new(&pixmap, &ColorResolver::default(), true);
        let entries = vim.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0].highlight,
            "try | highlight link Xpmcolor0 Normal | highlight Xpmcolor0 guifg=bg | catch | highlight Xpmcolor0 guifg=NONE guibg=NONE | endtry"
        );
        assert_eq!(entries[0].syntax, r"syntax match Xpmcolor0 /\./ contained");
        assert_eq!(
            entries[1].highlight,
            "highlight Xpmcolor1 guifg=#FF0000 guibg=#FF0000"
        );
        assert_eq!(entries[1].syntax, "syntax match Xpmcolor1 /a/ contained");
        assert_eq!(
            entries[2].highlight,
            "highlight Xpmcolor2 guifg='LIGHT BLUE' guibg='LIGHT BLUE'"
        );
        assert_eq!(entries[2].syntax, r"syntax match Xpmcolor2 /\~/ contained");
        assert_eq!(
            vim.cluster(),
            "syntax cluster Xpmcolors contains=Xpmcolor0,Xpmcolor1,Xpmcolor2"
        );
        assert_eq!(vim.to_script().lines().count(), 7);
        assert!(vim.to_script().ends_with(vim.cluster()));
    }

    #[test]
    fn cterm_highlights() {
        let pixmap: Pixmap = PIXMAP.parse().unwrap();
        let vim = VimHighlights::new(&pixmap, &ColorResolver::default(), false);
        let entries = vim.entries();
        assert!(entries[0].highlight.contains("ctermfg=NONE ctermbg=NONE"));
        assert_eq!(
            entries[1].highlight,
            "highlight Xpmcolor1 ctermfg=196 ctermbg=196"
        );
        // light blue (173, 216, 230)
        assert_eq!(
            entries[2].highlight,
            "highlight Xpmcolor2 ctermfg=152 ctermbg=152"
        );
    }

    #[test]
    fn pattern_escapes() {
        assert_eq!(escape_pattern(r#"'"$.~^/[]"#), r#"\'\"\$\.\~\^\/\[\]"#);
        assert_eq!(escape_pattern("ab"), "ab");
    }
}
