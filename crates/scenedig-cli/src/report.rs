// Report serialization: hierarchy dumps, unused script CSV, text trees

use scenedig_tracer::{HierarchyLine, UnusedAsset, assemble};
use std::borrow::Cow;
use std::fmt::Write;
use std::path::Path;
use text_trees::StringTreeNode;

pub const CSV_HEADER: &str = "Relative Path,GUID";

/// One line per object: `indent` repeated `depth` times, then the name.
pub fn format_dump(lines: &[HierarchyLine], indent: &str) -> String {
    let mut out = String::new();
    for line in lines {
        for _ in 0..line.depth {
            out.push_str(indent);
        }
        out.push_str(&line.name);
        out.push('\n');
    }
    out
}

/// Unused script report with a header row.
pub fn format_unused_csv(unused: &[UnusedAsset]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for asset in unused {
        let path = display_path(&asset.path);
        let _ = writeln!(out, "{},{}", csv_field(&path), csv_field(&asset.asset_id));
    }
    out
}

/// Project-relative path with `/` separators on every platform.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// One text tree per root, built bottom-up from pre-order lines.
pub fn build_text_trees(lines: &[HierarchyLine], show_ids: bool) -> Vec<StringTreeNode> {
    assemble(lines, |line, children| {
        let label = if show_ids {
            format!("{} (&{})", line.name, line.transform_id)
        } else {
            line.name.clone()
        };
        if children.is_empty() {
            StringTreeNode::new(label)
        } else {
            StringTreeNode::with_child_nodes(label, children.into_iter())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn line(depth: usize, name: &str) -> HierarchyLine {
        HierarchyLine {
            depth,
            name: name.to_string(),
            transform_id: depth as i64 + 7,
            object_id: 0,
        }
    }

    #[test]
    fn test_dump_repeats_indent_per_depth() {
        let lines = [line(0, "Root"), line(1, "Child"), line(2, "Leaf")];
        assert_eq!(format_dump(&lines, "--"), "Root\n--Child\n----Leaf\n");
        assert_eq!(format_dump(&[], "--"), "");
    }

    #[test]
    fn test_csv_escapes_delimiters() {
        let unused = vec![
            UnusedAsset {
                path: PathBuf::from("Assets/Plain.cs"),
                asset_id: "aaaa".to_string(),
            },
            UnusedAsset {
                path: PathBuf::from("Assets/Odd, \"Name\".cs"),
                asset_id: "bbbb".to_string(),
            },
        ];
        assert_eq!(
            format_unused_csv(&unused),
            "Relative Path,GUID\nAssets/Plain.cs,aaaa\n\"Assets/Odd, \"\"Name\"\".cs\",bbbb\n"
        );
    }

    #[test]
    fn test_text_tree_labels() {
        let lines = [line(0, "Root"), line(1, "Child"), line(0, "Other")];
        let trees = build_text_trees(&lines, true);
        assert_eq!(trees.len(), 2);
        let rendered = trees[0].to_string();
        assert!(rendered.contains("Root (&7)"));
        assert!(rendered.contains("Child (&8)"));
        assert!(!rendered.contains("Other"));
    }
}
