pub(crate) mod comment;
mod error;
mod literal;
pub(crate) mod record;

pub use comment::{strip_comments, strip_comments_str};
pub use error::ParseError;

use std::str::FromStr;

use crate::image::Pixmap;

impl FromStr for Pixmap {
    type Err = ParseError;

    /// Parses the full text of an XPM file, comments included
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        record::parse(&strip_comments_str(s))
    }
}
