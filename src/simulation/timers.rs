use std::time::Duration;

/// Periodic callbacks owned by a simulation session. Declaration order is
/// the firing order for timers that fall due at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    Bootstrap,
    Generation,
    Progression,
    Eviction,
    Counters,
    Insights,
    Security,
}

impl TimerKind {
    pub const ALL: [TimerKind; 7] = [
        TimerKind::Bootstrap,
        TimerKind::Generation,
        TimerKind::Progression,
        TimerKind::Eviction,
        TimerKind::Counters,
        TimerKind::Insights,
        TimerKind::Security,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Due times, in milliseconds of session time, of every armed timer.
#[derive(Debug, Clone, Default)]
pub struct TimerSet {
    due: [Option<u64>; 7],
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, kind: TimerKind, at_ms: u64) {
        self.due[kind.slot()] = Some(at_ms);
    }

    pub fn arm_after(&mut self, kind: TimerKind, now_ms: u64, delay: Duration) {
        self.arm(kind, now_ms.saturating_add(duration_ms(delay)));
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.due[kind.slot()] = None;
    }

    pub fn cancel_all(&mut self) {
        self.due = [None; 7];
    }

    pub fn due_at(&self, kind: TimerKind) -> Option<u64> {
        self.due[kind.slot()]
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.due_at(kind).is_some()
    }

    pub fn armed_count(&self) -> usize {
        self.due.iter().filter(|d| d.is_some()).count()
    }

    /// Earliest timer due at or before `until_ms`.
    pub fn next_due(&self, until_ms: u64) -> Option<(TimerKind, u64)> {
        let mut best: Option<(TimerKind, u64)> = None;
        for kind in TimerKind::ALL {
            let Some(at) = self.due_at(kind) else { continue };
            if at > until_ms {
                continue;
            }
            match best {
                Some((_, best_at)) if best_at <= at => {}
                _ => best = Some((kind, at)),
            }
        }
        best
    }
}

pub fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earliest_timer_wins_and_ties_follow_declaration_order() {
        let mut timers = TimerSet::new();
        timers.arm(TimerKind::Counters, 3_000);
        timers.arm(TimerKind::Progression, 5_000);
        timers.arm(TimerKind::Eviction, 5_000);

        assert_eq!(timers.next_due(2_999), None);
        assert_eq!(timers.next_due(10_000), Some((TimerKind::Counters, 3_000)));

        timers.cancel(TimerKind::Counters);
        assert_eq!(timers.next_due(10_000), Some((TimerKind::Progression, 5_000)));
    }

    #[test]
    fn cancel_all_disarms_everything() {
        let mut timers = TimerSet::new();
        for kind in TimerKind::ALL {
            timers.arm_after(kind, 0, Duration::from_secs(1));
        }
        assert_eq!(timers.armed_count(), 7);
        timers.cancel_all();
        assert_eq!(timers.armed_count(), 0);
        assert_eq!(timers.next_due(u64::MAX), None);
    }
}
