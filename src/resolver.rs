use std::collections::HashMap;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::normalize::NormalizedLine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub name: String,
    pub pc: u32,
    pub jump_index: Option<u32>,
}

/// Label bindings built by the first pass. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    pcs: HashMap<String, u32>,
    jump_indices: HashMap<String, u32>,
    // names in first-appearance order; position == jump index
    order: Vec<String>,
}

impl LabelTable {
    pub fn pc(&self, name: &str) -> Option<u32> {
        self.pcs.get(name).copied()
    }

    pub fn jump_index(&self, name: &str) -> Option<u32> {
        self.jump_indices.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<Label> {
        let pc = self.pc(name)?;
        Some(Label { name: name.to_string(), pc, jump_index: self.jump_index(name) })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Largest assigned jump index, `None` when no labels exist.
    pub fn max_jump_index(&self) -> Option<u32> {
        self.jump_indices.values().copied().max()
    }

    /// Label bound to a jump-table slot.
    pub fn label_at(&self, index: u32) -> Option<Label> {
        self.order.get(index as usize).and_then(|n| self.get(n))
    }

    /// Labels in jump-index order.
    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        self.order.iter().filter_map(|n| self.get(n))
    }

    fn declare(&mut self, name: String, pc: u32) {
        if let Some(prev) = self.pcs.insert(name.clone(), pc) {
            debug!(label = %name, prev, pc, "label redeclared, last binding wins");
        }
        if !self.jump_indices.contains_key(&name) {
            self.jump_indices.insert(name.clone(), self.order.len() as u32);
            self.order.push(name);
        }
    }
}

/// Serialized as a list of labels in jump-index order.
impl Serialize for LabelTable {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(self.iter())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub labels: LabelTable,
    /// Instruction lines in source order, each with `pc` set.
    pub lines: Vec<NormalizedLine>,
}

/// First pass: bind labels to PCs and jump indices, number instruction lines.
pub fn resolve<I>(lines: I) -> Resolved
where
    I: IntoIterator<Item = NormalizedLine>,
{
    let mut out = Resolved::default();
    let mut pc = 0u32;
    for mut line in lines {
        if let Some(name) = line.label_decl() {
            out.labels.declare(name, pc);
            continue;
        }
        line.pc = Some(pc);
        out.lines.push(line);
        pc += 1;
    }
    debug!(
        instructions = out.lines.len(),
        labels = out.labels.len(),
        "pass 1 complete"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, source_lines};

    fn run(src: &str) -> Resolved {
        resolve(source_lines(src).filter_map(|l| normalize(&l)))
    }

    #[test]
    fn jump_indices_follow_first_appearance() {
        let r = run("a:\nADD R0, R1\nb:\na:\nSUB R1, R2\n");
        assert_eq!(r.labels.jump_index("a"), Some(0));
        assert_eq!(r.labels.jump_index("b"), Some(1));
        assert_eq!(r.labels.pc("a"), Some(1));
        assert_eq!(r.labels.pc("b"), Some(1));
        assert_eq!(r.labels.max_jump_index(), Some(1));
        assert_eq!(r.labels.label_at(0).map(|l| l.pc), Some(1));
        assert!(r.labels.label_at(2).is_none());
    }

    #[test]
    fn serializes_in_jump_index_order() {
        let r = run("z:\nLI R0, 1\nm:\na:\nz:\n");
        let json = serde_json::to_string(&r.labels).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"z","pc":1,"jump_index":0},{"name":"m","pc":1,"jump_index":1},{"name":"a","pc":1,"jump_index":2}]"#
        );
    }
}
