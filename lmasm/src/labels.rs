/// Append-only label table. Lookups scan in insertion order and the first
/// definition wins; later definitions with the same name are dead but not
/// rejected.
#[derive(Debug, Default)]
pub struct LabelTable {
    entries: Vec<(String, usize)>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: String, addr: usize) {
        self.entries.push((name, addr));
    }

    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|&(_, addr)| addr)
    }
}
