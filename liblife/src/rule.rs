/// Birth/survival neighbor counts. The default is Conway's B3/S23.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub birth: Vec<usize>,
    pub survive: Vec<usize>,
}

impl Rule {
    pub fn next_alive(&self, alive: bool, alive_neighbors: usize) -> bool {
        if alive {
            self.survive.contains(&alive_neighbors)
        } else {
            self.birth.contains(&alive_neighbors)
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            birth: vec![3],
            survive: vec![2, 3],
        }
    }
}
