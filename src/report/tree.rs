use colored::Colorize;

use crate::license::LicenseGroups;

/// Label of the tree root.
pub const ROOT_LABEL: &str = "licenses";

/// A node of the license tree. Field leaves carry a `key` that is emphasized
/// when rendered (`URL:`, `VendorUrl:`, `VendorName:`).
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub key: Option<&'static str>,
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn branch(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            key: None,
            label: label.into(),
            children,
        }
    }

    fn field(key: &'static str, value: &str) -> Self {
        Self {
            key: Some(key),
            label: value.to_string(),
            children: Vec::new(),
        }
    }

    /// Plain-text label, as shown without emphasis.
    #[cfg(test)]
    pub fn text(&self) -> String {
        match self.key {
            Some(key) => format!("{}: {}", key, self.label),
            None => self.label.clone(),
        }
    }

    fn styled(&self) -> String {
        match self.key {
            Some(key) => format!("{} {}", format!("{}:", key).bold(), self.label),
            None => self.label.clone(),
        }
    }
}

/// Build the `licenses → license → name@version → fields` tree.
pub fn build(groups: &LicenseGroups) -> TreeNode {
    let licenses = groups
        .iter()
        .map(|group| {
            let packages = group
                .packages()
                .iter()
                .map(|info| {
                    let mut fields = Vec::new();
                    if let Some(url) = &info.url {
                        fields.push(TreeNode::field("URL", url));
                    }
                    if let Some(vendor_url) = &info.vendor_url {
                        fields.push(TreeNode::field("VendorUrl", vendor_url));
                    }
                    if let Some(vendor_name) = &info.vendor_name {
                        fields.push(TreeNode::field("VendorName", vendor_name));
                    }
                    TreeNode::branch(info.key(), fields)
                })
                .collect();
            TreeNode::branch(group.license(), packages)
        })
        .collect();

    TreeNode::branch(ROOT_LABEL, licenses)
}

/// Render the tree with box-drawing connectors. The root is always printed,
/// even when there are no license buckets.
pub fn render(groups: &LicenseGroups) -> String {
    let root = build(groups);
    let mut out = root.styled();
    out.push('\n');
    render_children(&root.children, "", &mut out);
    out
}

fn render_children(children: &[TreeNode], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let (connector, indent) = if is_last {
            ("└─ ", "   ")
        } else {
            ("├─ ", "│  ")
        };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&child.styled());
        out.push('\n');
        render_children(&child.children, &format!("{}{}", prefix, indent), out);
    }
}
