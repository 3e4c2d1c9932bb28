//! Input generators shared by the vgroup benchmarks.

/// Markup with `groups` flat groups of `items` items each, separated by
/// plain classes.
pub fn flat_markup(groups: usize, items: usize) -> String {
    let mut out = String::new();
    for g in 0..groups {
        let body = (0..items)
            .map(|i| format!("p-{}", i))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&format!(
            "<div class=\"flex items-center md{}:({}) text-sm\">\n",
            g % 5,
            body
        ));
    }
    out
}

/// A single group nested `depth` levels deep.
pub fn nested_markup(depth: usize) -> String {
    let mut out = String::new();
    for d in 0..depth {
        out.push_str(&format!("v{}:(a-{},", d, d));
    }
    out.push_str("leaf");
    out.push_str(&")".repeat(depth));
    out
}

/// Plain markup of roughly `bytes` bytes with no groups.
pub fn plain_markup(bytes: usize) -> String {
    let line = "<div class=\"flex items-center hover:bg-red-500 md:p-4\">text</div>\n";
    line.repeat(bytes / line.len() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgroup_core::expand;

    #[test]
    fn test_generators_expand() {
        assert_eq!(expand(&nested_markup(2)), "v0:a-0 v0:v1:a-1 v0:v1:leaf");
        assert!(expand(&flat_markup(1, 2)).contains("md0:p-0 md0:p-1"));

        let plain = plain_markup(500);
        assert!(plain.len() >= 500);
        assert_eq!(expand(&plain), plain);
    }
}
