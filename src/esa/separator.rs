use super::Esa;

impl Esa {
    /// Finds a shortest byte string absent from the whole buffer: a
    /// depth-first walk of the interval tree, at each node checking which
    /// of the 256 possible bytes is missing as an immediate continuation.
    /// Deterministic: left-to-right child order, ascending byte tie-break.
    pub(crate) fn choose_separator(&self) -> Vec<u8> {
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            let children = self.children(&node);
            let mut present = [false; 256];
            for child in &children {
                if let Some(c) = self.edge_char(&node, &child) {
                    present[c as usize] = true;
                }
            }
            if let Some(missing) = present.iter().position(|&p| !p) {
                let start = self.sa[node.start as usize] as usize;
                let len = node.length as usize;
                let mut sep = self.data[start..start + len].to_vec();
                sep.push(missing as u8);
                return sep;
            }
            for child in children.into_iter().rev() {
                if !child.is_leaf() {
                    stack.push(child);
                }
            }
        }
        // Unreachable for any non-empty buffer: a finite buffer cannot
        // contain every finite byte string, so some depth must have a
        // missing continuation.
        vec![0]
    }
}
