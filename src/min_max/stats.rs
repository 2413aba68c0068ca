pub trait Stats {
    fn record_node(&mut self);
    fn record_terminal(&mut self);
    fn record_prune(&mut self);
    fn record_deadline_cutoff(&mut self);
    fn record_state_scored(&mut self);
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct NullStats;

#[cfg(test)]
impl Stats for NullStats {
    fn record_node(&mut self) {}
    fn record_terminal(&mut self) {}
    fn record_prune(&mut self) {}
    fn record_deadline_cutoff(&mut self) {}
    fn record_state_scored(&mut self) {}
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct SimpleStats {
    pub node_count: u64,
    pub terminal_count: u64,
    pub prune_count: u64,
    pub deadline_cutoff_count: u64,
    pub state_scored_count: u64,
}

impl Stats for SimpleStats {
    fn record_node(&mut self) {
        self.node_count += 1;
    }

    fn record_terminal(&mut self) {
        self.terminal_count += 1;
    }

    fn record_prune(&mut self) {
        self.prune_count += 1;
    }

    fn record_deadline_cutoff(&mut self) {
        self.deadline_cutoff_count += 1;
    }

    fn record_state_scored(&mut self) {
        self.state_scored_count += 1;
    }
}
