use serde::Deserialize;

/// A single decision tree stored as a flat node array; node 0 is the root.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// `x[feature] <= threshold` goes left, everything else goes right.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: Vec<f64> },
}

impl Tree {
    /// Walk from the root to a leaf. Assumes `check` passed.
    pub fn leaf(&self, x: &[f64]) -> &[f64] {
        let mut idx = 0;
        // Bounded by node count: a validated tree only points forward.
        for _ in 0..self.nodes.len() {
            match &self.nodes[idx] {
                Node::Leaf { value } => return value,
                Node::Split { feature, threshold, left, right } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
        &[]
    }

    /// Structural checks: children point forward and in range, features fit the
    /// encoded width, leaves have `leaf_width` finite entries.
    pub fn check(&self, width: usize, leaf_width: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        let n = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split { feature, threshold, left, right } => {
                    if *feature >= width {
                        return Err(format!(
                            "node {i} splits on feature {feature}, encoded width is {width}"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {i} has a non-finite threshold"));
                    }
                    for child in [left, right] {
                        if *child <= i || *child >= n {
                            return Err(format!("node {i} has invalid child index {child}"));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != leaf_width {
                        return Err(format!(
                            "leaf {i} has {} values, expected {leaf_width}",
                            value.len()
                        ));
                    }
                    if value.iter().any(|v| !v.is_finite()) {
                        return Err(format!("leaf {i} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }
}
