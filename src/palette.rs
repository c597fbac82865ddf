// Categorical color palette for wedge fills

/// Color palette for categorical data
pub struct ColorPalette {
    colors: Vec<String>,
}

impl ColorPalette {
    /// Create a Category10 color palette (D3 schemeCategory10)
    /// Colors: blue, orange, green, red, purple, brown, pink, gray, olive, cyan
    pub fn category10() -> Self {
        ColorPalette {
            colors: [
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
                "#7f7f7f", "#bcbd22", "#17becf",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }

    /// Get color for a specific index (wraps around if index > palette size)
    pub fn get_color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
