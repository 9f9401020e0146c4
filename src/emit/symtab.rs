//! An insertion-ordered, append-on-lookup name table.
//!
//! Generalizes the teacher's `SymbolTable` (label → address) into a bare
//! "intern a string, get back a stable index" table: the emitter needs
//! this shape twice — once for `identifiers`, once for `strings` — and
//! neither needs an address payload, only the index itself (`spec.md` §3:
//! "Lookup is linear scan returning existing index or appending").

#[derive(Debug, Clone, Default)]
pub struct NameTable {
    entries: Vec<String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Return `name`'s index, appending it if this is the first time it's
    /// been seen.
    pub fn intern(&mut self, name: &str) -> usize {
        match self.entries.iter().position(|existing| existing == name) {
            Some(idx) => idx,
            None => {
                self.entries.push(name.to_string());
                self.entries.len() - 1
            }
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}
