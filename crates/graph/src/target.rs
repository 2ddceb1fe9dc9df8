use crate::types::{AnalysisResult, Node, NodeId};

/// Resolves the focus node of an analysis
///
/// This is the only place the focus is derived; everything downstream takes
/// the resolved id as input.
pub struct TargetResolver;

impl TargetResolver {
    /// Focus node id, or `None` for an empty node set.
    ///
    /// Prefers the node matching `metadata.analyzedFile` (exact path, id
    /// suffix `":" + file`, or path suffix), otherwise the first node.
    pub fn resolve(result: &AnalysisResult) -> Option<NodeId> {
        let analyzed = result
            .metadata
            .analyzed_file
            .as_deref()
            .filter(|file| !file.is_empty());

        if let Some(file) = analyzed {
            let id_suffix = format!(":{file}");
            let matched = result
                .nodes
                .iter()
                .find(|node| matches_analyzed_file(node, file, &id_suffix));

            match matched {
                Some(node) => return Some(node.id.clone()),
                None => log::debug!("Analyzed file {file} matches no node, using first node"),
            }
        }

        result.nodes.first().map(|node| node.id.clone())
    }
}

fn matches_analyzed_file(node: &Node, file: &str, id_suffix: &str) -> bool {
    node.path == file || node.id.ends_with(id_suffix) || node.path.ends_with(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArtifactType;

    fn result(ids: &[&str]) -> AnalysisResult {
        AnalysisResult::new(
            ids.iter()
                .map(|id| Node::new(*id, ArtifactType::PrimaryUnit))
                .collect(),
            vec![],
        )
    }

    #[test]
    fn test_exact_path_match() {
        let r = result(&["a:x/One.cls", "a:x/Two.cls"]).analyzed_file("x/Two.cls");
        assert_eq!(TargetResolver::resolve(&r).as_deref(), Some("a:x/Two.cls"));
    }

    #[test]
    fn test_id_suffix_match() {
        let mut r = result(&["a:x/One.cls", "b:force-app/Two.cls"]).analyzed_file("force-app/Two.cls");
        // Path left empty by the analyzer; the id still carries it
        r.nodes[1].path.clear();
        assert_eq!(TargetResolver::resolve(&r).as_deref(), Some("b:force-app/Two.cls"));
    }

    #[test]
    fn test_path_suffix_tolerates_prefix_differences() {
        let r = result(&["a:x/One.cls", "a:src/main/x/Two.cls"]).analyzed_file("x/Two.cls");
        assert_eq!(TargetResolver::resolve(&r).as_deref(), Some("a:src/main/x/Two.cls"));
    }

    #[test]
    fn test_fallback_to_first_node() {
        let r = result(&["a:One.cls", "a:Two.cls"]).analyzed_file("Missing.cls");
        assert_eq!(TargetResolver::resolve(&r).as_deref(), Some("a:One.cls"));

        let r = result(&["a:One.cls", "a:Two.cls"]);
        assert_eq!(TargetResolver::resolve(&r).as_deref(), Some("a:One.cls"));
    }

    #[test]
    fn test_analyzed_file_is_matched_verbatim() {
        let r = result(&["a:Two.cls", "a:dir/ Two.cls"]).analyzed_file(" Two.cls");
        assert_eq!(TargetResolver::resolve(&r).as_deref(), Some("a:dir/ Two.cls"));

        let r = result(&["a:One.cls", "a:Two.cls"]).analyzed_file("Two.cls ");
        assert_eq!(TargetResolver::resolve(&r).as_deref(), Some("a:One.cls"));
    }

    #[test]
    fn test_empty_graph_has_no_target() {
        let r = result(&[]).analyzed_file("Anything.cls");
        assert_eq!(TargetResolver::resolve(&r), None);
    }
}
