use std::fmt;

/// A router path given as segments, e.g. `["/concepts", "g1", "concept", "c1"]`.
/// An empty route means "no navigation".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route(Vec<String>);

impl Route {
    pub fn none() -> Self {
        Self::default()
    }

    /// The page of a concept within its vocabulary graph.
    pub fn concept(graph_id: &str, concept_id: &str) -> Self {
        Self(vec![
            "/concepts".to_string(),
            graph_id.to_string(),
            "concept".to_string(),
            concept_id.to_string(),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

/// Renders the route as an href. The first segment is taken as-is.
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.0.iter();
        if let Some(first) = segments.next() {
            f.write_str(first)?;
        }
        for segment in segments {
            f.write_str("/")?;
            for ch in segment.chars() {
                match ch {
                    '/' => f.write_str("%2F")?,
                    '?' => f.write_str("%3F")?,
                    '#' => f.write_str("%23")?,
                    '%' => f.write_str("%25")?,
                    ' ' => f.write_str("%20")?,
                    _ => write!(f, "{ch}")?,
                }
            }
        }
        Ok(())
    }
}
