//! Removal of C-style comments from XPM sources.

/// Strips `//` line comments and `/* */` block comments from the given lines.
///
/// Tabs become single spaces and line terminators are dropped, so the surviving characters of
/// all lines are concatenated. The block comment state is carried from one line to the next;
/// an unterminated block comment swallows the rest of the input.
pub fn strip_comments<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    let mut in_block = false;
    for line in lines {
        let line = line.as_ref().replace('\t', " ");
        let line = line.trim_end_matches(['\r', '\n']);
        strip_line(line, &mut in_block, &mut out);
    }
    out
}

/// Same as [`strip_comments`], splitting `text` into lines first
pub fn strip_comments_str(text: &str) -> String {
    strip_comments(text.lines())
}

fn strip_line(line: &str, in_block: &mut bool, out: &mut String) {
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('/', Some('/')) if !*in_block => return,
            ('/', Some('*')) => {
                chars.next();
                *in_block = true;
            }
            ('*', Some('/')) if *in_block => {
                chars.next();
                *in_block = false;
            }
            _ if *in_block => {}
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_line_comments() {
        assert_eq!(strip_comments(["\"ab\", // trailing", "\"cd\""]), "\"ab\", \"cd\"");
    }

    #[test]
    fn removes_block_comments_across_lines() {
        let lines = [
            "/* XPM */",
            "static char *x[] = {",
            "/* colors",
            " still comment */\"a\"",
            "};",
        ];
        assert_eq!(strip_comments(lines), "static char *x[] = {\"a\"};");
    }

    #[test]
    fn tabs_become_spaces() {
        assert_eq!(strip_comments_str("a\tb\n\tc"), "a b c");
    }

    #[test]
    fn lone_slash_and_star_survive() {
        assert_eq!(strip_comments(["a/b*c", "*/d"]), "a/b*c*/d");
    }

    #[test]
    fn unterminated_block_consumes_rest() {
        assert_eq!(strip_comments(["keep /* drop", "drop too", "and this"]), "keep ");
    }

    #[test]
    fn line_comment_inside_block_is_ignored() {
        assert_eq!(strip_comments(["/* // */x"]), "x");
    }

    #[test]
    fn stripping_is_idempotent() {
        let inputs = [
            "static char * x[] = { /* c */ \"1 1 1 1\", // hi",
            "a /* b */ c // d",
            "/*/ still */ out",
            "no comments here",
            "x */ y /* z",
            "\t\"a\tb\"\t",
        ];
        for input in inputs {
            let once = strip_comments([input]);
            let twice = strip_comments([once.as_str()]);
            assert_eq!(once, twice, "input: {input:?}");
        }
    }
}
