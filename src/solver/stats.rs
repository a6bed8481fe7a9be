use std::fmt::{self, Debug, Display, Formatter};

use separator::Separatable;

/// Counters collected during one search call.
///
/// IDDFS accumulates `expanded`, `created` and `reached_duplicates` over all rounds,
/// `max_frontier` is the largest frontier of any round.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub expanded: u64,
    pub created: u64,
    pub reached_duplicates: u64,
    pub max_frontier: usize,
    pub rounds: u32,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats {
            max_frontier: 1,
            ..Default::default()
        }
    }

    pub(crate) fn add_expanded(&mut self) {
        self.expanded += 1;
    }

    pub(crate) fn add_created(&mut self) {
        self.created += 1;
    }

    pub(crate) fn add_reached_duplicate(&mut self) {
        self.reached_duplicates += 1;
    }

    pub(crate) fn update_frontier(&mut self, len: usize) {
        self.max_frontier = self.max_frontier.max(len);
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", self.created.separated_string())?;
        writeln!(f, "Expanded total: {}", self.expanded.separated_string())?;
        writeln!(
            f,
            "Reached duplicates total: {}",
            self.reached_duplicates.separated_string()
        )?;
        writeln!(f, "Max frontier: {}", (self.max_frontier as u64).separated_string())?;
        if self.rounds > 0 {
            writeln!(f, "Rounds: {}", self.rounds)?;
        }
        Ok(())
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "created: {}, expanded: {}, duplicates: {}, max frontier: {}, rounds: {}",
            self.created, self.expanded, self.reached_duplicates, self.max_frontier, self.rounds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_stats() {
        let mut stats = Stats::new();
        for _ in 0..1234 {
            stats.add_created();
        }
        stats.add_expanded();
        stats.add_reached_duplicate();
        stats.update_frontier(3);
        stats.update_frontier(2);

        let expected = r"
States created total: 1,234
Expanded total: 1
Reached duplicates total: 1
Max frontier: 3
"
        .trim_start_matches('\n');
        assert_eq!(stats.to_string(), expected);
    }
}
