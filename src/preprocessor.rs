//! Minimal source preprocessor.
//!
//! Strips `//` and `/* */` comments and rewrites the source into a form
//! that carries its own location information: every source line is
//! preceded by a debug marker `<|>line|file<|>` that the lexer consumes
//! to know which file and line the tokens that follow came from.
//!
//! Include inlining and `#define`/`#ifdef` evaluation are out of scope;
//! this stage only removes comments and stamps locations.

/// Preprocess `source`, attributed to `filename`, into marker-annotated text.
pub fn preprocess(source: &str, filename: &str) -> String {
    let mut out = String::with_capacity(source.len() + source.len() / 4);
    let mut in_block_comment = false;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        out.push_str("<|>");
        out.push_str(&line_no.to_string());
        out.push('|');
        out.push_str(filename);
        out.push_str("<|>\n");
        out.push_str(&strip_comments(raw_line, &mut in_block_comment));
        out.push('\n');
    }

    out
}

fn strip_comments(line: &str, in_block_comment: &mut bool) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut result = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        if *in_block_comment {
            if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                *in_block_comment = false;
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }

        if chars[i] == '/' && chars.get(i + 1) == Some(&'/') {
            break;
        }

        if chars[i] == '/' && chars.get(i + 1) == Some(&'*') {
            *in_block_comment = true;
            i += 2;
            continue;
        }

        result.push(chars[i]);
        i += 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_one_marker_per_line() {
        let out = preprocess("int x;\nx = 1;\n", "t.scs");
        assert_eq!(
            out,
            "<|>1|t.scs<|>\nint x;\n<|>2|t.scs<|>\nx = 1;\n<|>3|t.scs<|>\n\n"
        );
    }

    #[test]
    fn strips_line_comments() {
        let out = preprocess("int x; // comment\n", "t.scs");
        assert!(out.contains("int x; \n"));
        assert!(!out.contains("comment"));
    }

    #[test]
    fn strips_block_comments_spanning_lines() {
        let out = preprocess("int x; /* start\nstill in comment\nend */ x = 1;\n", "t.scs");
        assert!(!out.contains("still in comment"));
        assert!(out.contains("x = 1;"));
    }
}
