use itertools::Itertools;
use nom::{
    character::complete::{digit1, multispace0, multispace1},
    combinator::{all_consuming, map_res},
    multi::separated_list1,
    sequence::delimited,
    IResult,
};
use std::collections::HashMap;
use strum::{EnumString, IntoStaticStr};
use tracing::{debug, info, trace};

use crate::{
    color::{ColorEntry, ColorSpec, ColorTable},
    image::{header::PixmapHeader, Pixmap},
};

use super::{
    error::ParseError,
    literal::{container_region, split_entries},
};

/// Keys of a color table row
#[derive(IntoStaticStr, EnumString, PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub(crate) enum Key {
    /// color visual
    #[strum(serialize = "c")]
    Color,
    /// symbolic name
    #[strum(serialize = "s")]
    Str,
    /// monochrome visual
    #[strum(serialize = "m")]
    Mono,
    /// grayscale visual
    #[strum(serialize = "g")]
    Gray,
}

fn unsigned(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

fn values_line(input: &str) -> IResult<&str, Vec<u32>> {
    all_consuming(delimited(
        multispace0,
        separated_list1(multispace1, unsigned),
        multispace0,
    ))(input)
}

/// Parses the values line, `width height num_colors char_per_pixel [x_hot y_hot]`
pub(crate) fn parse_header(line: &str) -> Result<PixmapHeader, ParseError> {
    let (_, values) = values_line(line)
        .map_err(|_| ParseError::BadHeader(format!("expected unsigned integers, got {line:?}")))?;
    let (width, height, num_colors, char_per_pixel, hotspot) = match values[..] {
        [w, h, n, c] => (w, h, n, c, None),
        [w, h, n, c, x, y] => (w, h, n, c, Some((x, y))),
        _ => {
            return Err(ParseError::BadHeader(format!(
                "expected 4 or 6 values, got {}",
                values.len()
            )))
        }
    };
    if char_per_pixel == 0 {
        return Err(ParseError::BadHeader("char_per_pixel must be at least 1".into()));
    }
    Ok(PixmapHeader::builder()
        .width(width)
        .height(height)
        .num_colors(num_colors)
        .char_per_pixel(char_per_pixel)
        .maybe_hotspot(hotspot)
        .build())
}

/// Splits a row into its `cpp`-character symbols
pub(crate) fn split_symbols(row: &str, cpp: usize) -> Vec<&str> {
    let mut bounds: Vec<usize> = row.char_indices().map(|(i, _)| i).step_by(cpp).collect();
    bounds.push(row.len());
    bounds
        .iter()
        .tuple_windows()
        .map(|(&start, &end)| &row[start..end])
        .collect()
}

/// Parses one color table row: the symbol followed by `key value` groups
///
/// A value runs until the next key, so multi-word names like `light blue` are kept whole.
/// A token right after a key is always a value, which allows names such as `g`.
pub(crate) fn parse_color_row(
    index: usize,
    row: &str,
    cpp: usize,
) -> Result<ColorEntry, ParseError> {
    let malformed = |reason: String| ParseError::MalformedEntry { index, reason };

    let split = row
        .char_indices()
        .nth(cpp)
        .map_or(row.len(), |(i, _)| i);
    if row[..split].chars().count() < cpp {
        return Err(malformed(format!(
            "color row {row:?} is shorter than {cpp} characters"
        )));
    }
    let (symbol, rest) = row.split_at(split);

    let mut groups: Vec<(Key, Vec<&str>)> = Vec::new();
    for token in rest.split_whitespace() {
        let key = token.parse::<Key>().ok();
        let is_value = groups
            .last()
            .is_some_and(|(_, words)| words.is_empty() || key.is_none());
        if is_value {
            if let Some((_, words)) = groups.last_mut() {
                words.push(token);
            }
        } else if let Some(key) = key {
            groups.push((key, Vec::new()));
        } else {
            return Err(malformed(format!("value {token:?} is not preceded by a key")));
        }
    }

    let mut value_of = HashMap::new();
    for (key, words) in groups {
        if words.is_empty() {
            return Err(malformed(format!(
                "key {:?} has no value",
                <&'static str>::from(key)
            )));
        }
        value_of.insert(key, words.join(" "));
    }

    let source = [Key::Color, Key::Gray, Key::Mono]
        .iter()
        .find_map(|key| value_of.get(key))
        .ok_or_else(|| malformed(format!("color row {row:?} has no c, g or m key")))?
        .to_lowercase();
    let color = source
        .parse::<ColorSpec>()
        .map_err(|e| malformed(format!("bad color {source:?}: {e}")))?;

    Ok(ColorEntry {
        symbol: symbol.to_owned(),
        source,
        color,
        string: value_of.get(&Key::Str).cloned(),
        mono: value_of.get(&Key::Mono).cloned(),
        gray: value_of.get(&Key::Gray).cloned(),
    })
}

/// Checks the pixel rows against the header and the color table
pub(crate) fn validate_body(
    header: &PixmapHeader,
    colors: &ColorTable,
    body: &[String],
) -> Result<(), ParseError> {
    let expected_rows = header.height as usize;
    if body.len() != expected_rows {
        return Err(ParseError::RowCountMismatch {
            expected: expected_rows,
            found: body.len(),
        });
    }
    let cpp = header.char_per_pixel as usize;
    let expected_width = header.width as usize * cpp;
    for (row, line) in body.iter().enumerate() {
        let found = line.chars().count();
        if found != expected_width {
            return Err(ParseError::RowWidthMismatch {
                row,
                expected: expected_width,
                found,
            });
        }
    }
    for (row, line) in body.iter().enumerate() {
        if let Some((column, symbol)) = split_symbols(line, cpp)
            .into_iter()
            .enumerate()
            .find(|(_, symbol)| !colors.contains_key(*symbol))
        {
            return Err(ParseError::UnknownSymbol {
                row,
                column,
                symbol: symbol.to_owned(),
            });
        }
    }
    Ok(())
}

/// Parses comment-free XPM text
pub(crate) fn parse(text: &str) -> Result<Pixmap, ParseError> {
    let entries = split_entries(container_region(text)?)?;
    let Some((values, rest)) = entries.split_first() else {
        return Err(ParseError::BadHeader("no values line".into()));
    };
    let header = parse_header(values)?;
    info!(
        "width: {}, height: {}, colors: {}, char_per_pixel: {}",
        header.width, header.height, header.num_colors, header.char_per_pixel
    );

    let num_colors = header.num_colors as usize;
    if rest.len() < num_colors {
        return Err(ParseError::MissingColors {
            expected: num_colors,
            found: rest.len(),
        });
    }
    let (color_rows, body) = rest.split_at(num_colors);

    let cpp = header.char_per_pixel as usize;
    let mut colors = ColorTable::with_capacity(num_colors);
    for (i, row) in color_rows.iter().enumerate() {
        let entry = parse_color_row(i + 1, row, cpp)?;
        if colors.contains_key(&entry.symbol) {
            return Err(ParseError::DuplicateSymbol(entry.symbol));
        }
        colors.insert(entry.symbol.clone(), entry);
    }
    debug!(
        "color table:\n{}",
        colors
            .values()
            .map(|e| format!("  {:?}: {}", e.symbol, e.color))
            .join("\n")
    );

    let body: Vec<String> = body.iter().map(|&row| row.to_owned()).collect();
    for (i, row) in body.iter().enumerate() {
        trace!("body {i}: {row}");
    }
    validate_body(&header, &colors, &body)?;

    Ok(Pixmap::from_parts(header, colors, body))
}
