//! Glob matching for file selections
//!
//! Patterns are matched segment-wise against `/`-separated relative
//! paths:
//! - `**` matches any number of path segments
//! - `*` matches any run of characters within a single segment
//! - `?` matches a single character within a segment

/// Check whether a relative path matches a pattern.
pub(crate) fn matches(pattern: &str, path: &str) -> bool {
    let pattern = normalize(pattern);
    let pattern_parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match_parts(&pattern_parts, &path_parts, 0, 0)
}

/// A pattern ending in `/` selects the whole subtree, like `dir/**`.
fn normalize(pattern: &str) -> String {
    let pattern = pattern.trim().replace('\\', "/");
    if pattern.ends_with('/') {
        format!("{}**", pattern)
    } else {
        pattern
    }
}

/// Recursively match pattern segments against path segments.
fn match_parts(pattern: &[&str], path: &[&str], pat_idx: usize, path_idx: usize) -> bool {
    // Both exhausted - match
    if pat_idx >= pattern.len() && path_idx >= path.len() {
        return true;
    }

    // Pattern exhausted but path remains - no match
    if pat_idx >= pattern.len() {
        return false;
    }

    // Path exhausted - only matches if the remaining pattern is all **
    if path_idx >= path.len() {
        return pattern[pat_idx..].iter().all(|&p| p == "**");
    }

    match pattern[pat_idx] {
        // ** matches zero or more segments
        "**" => (path_idx..=path.len())
            .any(|next| match_parts(pattern, path, pat_idx + 1, next)),
        part => {
            match_segment(part, path[path_idx])
                && match_parts(pattern, path, pat_idx + 1, path_idx + 1)
        }
    }
}

/// Match a single path segment against a pattern segment.
fn match_segment(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    match_chars(&p, &t, 0, 0)
}

fn match_chars(p: &[char], t: &[char], pi: usize, ti: usize) -> bool {
    if pi >= p.len() {
        return ti >= t.len();
    }
    match p[pi] {
        '*' => (ti..=t.len()).any(|next| match_chars(p, t, pi + 1, next)),
        '?' => ti < t.len() && match_chars(p, t, pi + 1, ti + 1),
        c => ti < t.len() && t[ti] == c && match_chars(p, t, pi + 1, ti + 1),
    }
}
