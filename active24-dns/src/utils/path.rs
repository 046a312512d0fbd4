/// Normalise a request path to a clean absolute path.
///
/// Joins `path` under `/` and resolves it lexically: repeated separators
/// collapse, `.` segments drop out, `..` removes the preceding segment (never
/// climbing above the root). The result always starts with exactly one `/`
/// and has no trailing separator unless it is the root itself.
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}
