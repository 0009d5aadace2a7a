/// A single page of the guided tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourStep {
    pub title: &'static str,
    pub body: &'static str,
}

pub static TOUR_STEPS: [TourStep; 4] = [
    TourStep {
        title: "Welcome",
        body: "This dashboard simulates up to five live data streams and charts the \
               last 20 samples of each one.",
    },
    TourStep {
        title: "Streams",
        body: "Use `add` and `remove` to change how many streams are simulated. \
               There is always at least one stream and never more than five.",
    },
    TourStep {
        title: "Controls",
        body: "`start`, `stop` and `rate <1-100>` control the simulation clock. \
               The rate is the number of samples produced per second.",
    },
    TourStep {
        title: "Statistics",
        body: "`select <id>` shows statistics for one stream; `compare <id> <id>...` \
               puts several side by side.",
    },
];

/// Linear tour state machine: `step` in `[0, 3]` plus a visibility flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourState {
    step: usize,
    visible: bool,
}

impl Default for TourState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TourState {
    pub fn new(visible: bool) -> Self {
        Self { step: 0, visible }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Content of the current step while the tour is shown.
    pub fn current(&self) -> Option<&'static TourStep> {
        self.visible.then(|| &TOUR_STEPS[self.step])
    }

    /// Advance one step; on the last step this closes the tour instead.
    pub fn next(&mut self) {
        if self.step + 1 < TOUR_STEPS.len() {
            self.step += 1;
        } else {
            self.visible = false;
        }
    }

    /// Close (or skip) the tour from any step.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Restart from the first step.
    pub fn reopen(&mut self) {
        self.step = 0;
        self.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_to_last_step_then_closes() {
        let mut tour = TourState::default();
        for expected in 1..=3 {
            tour.next();
            assert_eq!(tour.step(), expected);
            assert!(tour.is_visible());
        }
        tour.next();
        assert!(!tour.is_visible());
        assert_eq!(tour.step(), 3);
        assert!(tour.current().is_none());
    }

    #[test]
    fn close_from_any_step() {
        for steps in 0..4 {
            let mut tour = TourState::default();
            (0..steps).for_each(|_| tour.next());
            tour.close();
            assert!(!tour.is_visible());
        }
    }

    #[test]
    fn reopen_resets_to_first_step() {
        let mut tour = TourState::default();
        tour.next();
        tour.next();
        tour.close();
        tour.reopen();
        assert_eq!(tour.step(), 0);
        assert!(tour.is_visible());
        assert_eq!(tour.current().map(|s| s.title), Some("Welcome"));
    }
}
